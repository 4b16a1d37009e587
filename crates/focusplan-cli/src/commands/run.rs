//! Interactive terminal session.
//!
//! A current-thread tokio loop owns the controller. A one-second interval
//! drives `tick()` while the countdown runs or overtime is showing; typed
//! commands arrive from a stdin thread over an unbounded channel.

use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::time::Duration;

use clap::Args;
use focusplan_core::{
    generate, BreakTips, Config, CsvDistractionLog, Direction, DistractionOutcome,
    DistractionSink, Event, ExpiryOutcome, IgnoreReason, PhaseKind, SessionController,
};
use rand::rngs::ThreadRng;
use tokio::sync::mpsc;
use tokio::time::{interval, MissedTickBehavior};

use super::intent::{parse_intent, Intent, HELP};
use super::plan::TOO_SHORT;

#[derive(Args)]
pub struct RunArgs {
    /// Available time in minutes (defaults to session.default_plan_minutes)
    #[arg(long, allow_negative_numbers = true)]
    pub minutes: Option<i64>,
    /// Skip planning and alternate the default work/break pair
    #[arg(long, conflicts_with = "minutes")]
    pub legacy: bool,
    /// Distraction log file (defaults to log.distraction_log)
    #[arg(long)]
    pub log: Option<PathBuf>,
}

pub fn run(args: RunArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let log_path = args.log.unwrap_or_else(|| config.distraction_log_path());

    let mut host = Host::new(
        SessionController::new(config.session_defaults()),
        CsvDistractionLog::new(log_path),
        &config,
        std::io::stdout(),
    );

    if !args.legacy {
        let minutes = args
            .minutes
            .unwrap_or_else(|| i64::from(config.session.default_plan_minutes));
        host.handle(Intent::Plan(minutes))?;
    } else {
        host.show_status()?;
    }
    writeln!(host.out, "type 'help' for commands")?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;
    runtime.block_on(session_loop(host))
}

/// Whether the loop should keep going after an intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    /// The countdown (re)started; realign the tick interval.
    Restarted,
    Quit,
}

async fn session_loop<S, W>(mut host: Host<S, W>) -> Result<(), Box<dyn std::error::Error>>
where
    S: DistractionSink,
    W: Write,
{
    let (tx, mut rx) = mpsc::unbounded_channel();
    spawn_input_reader(tx);

    let mut ticker = interval(Duration::from_secs(1));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        let ticking = host.controller.is_running() || host.controller.is_in_overtime();
        tokio::select! {
            _ = ticker.tick(), if ticking => host.on_second()?,
            line = rx.recv() => match line {
                Some(Ok(intent)) => match host.handle(intent)? {
                    Flow::Quit => break,
                    Flow::Restarted => ticker.reset(),
                    Flow::Continue => {}
                },
                Some(Err(message)) => writeln!(host.out, "{message}")?,
                None => break,
            },
        }
    }
    Ok(())
}

/// Reads stdin on its own thread and forwards parsed lines, in order.
fn spawn_input_reader(tx: mpsc::UnboundedSender<Result<Intent, String>>) {
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if line.trim().is_empty() {
                continue;
            }
            if tx.send(parse_intent(&line)).is_err() {
                break;
            }
        }
    });
}

/// Presentation around a controller: turns intents into commands and
/// events into text.
pub struct Host<S, W> {
    pub controller: SessionController,
    sink: S,
    tips: BreakTips,
    rng: ThreadRng,
    show_tips: bool,
    bell: bool,
    pub out: W,
}

impl<S, W> Host<S, W>
where
    S: DistractionSink,
    W: Write,
{
    pub fn new(controller: SessionController, sink: S, config: &Config, out: W) -> Self {
        Self {
            controller,
            sink,
            tips: BreakTips::default(),
            rng: rand::thread_rng(),
            show_tips: config.ui.show_tips,
            bell: config.ui.bell_on_expire,
            out,
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn handle(&mut self, intent: Intent) -> std::io::Result<Flow> {
        let event = match intent {
            Intent::Start => {
                return match self.controller.start() {
                    Some(event) => {
                        self.render(&event)?;
                        Ok(Flow::Restarted)
                    }
                    None => {
                        if self.controller.is_plan_complete() {
                            writeln!(self.out, "The plan is complete. Plan a new session.")?;
                        }
                        Ok(Flow::Continue)
                    }
                };
            }
            Intent::Pause => self.controller.pause(),
            Intent::Reset => Some(self.controller.reset()),
            Intent::Next => self.controller.advance(Direction::Forward),
            Intent::Prev => self.controller.advance(Direction::Back),
            Intent::Jump(index) => {
                let event = self.controller.jump_to(index);
                if event.is_none() {
                    writeln!(self.out, "no step {}", index + 1)?;
                }
                event
            }
            Intent::Plan(minutes) => Some(self.controller.load_schedule(generate(minutes))),
            Intent::Distract => {
                self.distract()?;
                None
            }
            Intent::Status => {
                self.show_status()?;
                None
            }
            Intent::Help => {
                writeln!(self.out, "{HELP}")?;
                None
            }
            Intent::Quit => return Ok(Flow::Quit),
        };

        if let Some(event) = event {
            self.render(&event)?;
        }
        Ok(Flow::Continue)
    }

    /// One second of wall time passed.
    pub fn on_second(&mut self) -> std::io::Result<()> {
        if let Some(event) = self.controller.tick() {
            return self.render(&event);
        }
        if let Some(overtime) = self.controller.snapshot().overtime {
            write!(self.out, "\r{overtime}   ")?;
            self.out.flush()?;
        }
        Ok(())
    }

    pub fn show_status(&mut self) -> std::io::Result<()> {
        let snap = self.controller.snapshot();
        let mut line = format!("{}  {}", self.controller.status_line(), snap.remaining);
        if let Some(overtime) = &snap.overtime {
            line.push_str(&format!("  {overtime}"));
        }
        if self.controller.is_plan_active() && !self.controller.is_plan_complete() {
            line.push_str(&format!("  ({} steps left)", snap.phases_remaining));
        }
        writeln!(self.out, "{line}")
    }

    fn distract(&mut self) -> std::io::Result<()> {
        match self.controller.record_distraction(&mut self.sink) {
            Ok(DistractionOutcome::Recorded(record)) => {
                writeln!(self.out, "Recorded! ({} left)", record.remaining())
            }
            Ok(DistractionOutcome::Ignored(IgnoreReason::OnBreak)) => {
                writeln!(self.out, "Distractions are only logged during focus.")
            }
            Ok(DistractionOutcome::Ignored(IgnoreReason::Paused)) => {
                writeln!(self.out, "Start the timer first.")
            }
            Err(e) => {
                tracing::warn!(error = %e, "distraction not logged");
                writeln!(self.out, "warning: {e}")
            }
        }
    }

    fn render(&mut self, event: &Event) -> std::io::Result<()> {
        match event {
            Event::Ticked { .. } => {
                write!(self.out, "\r{}   ", self.controller.snapshot().remaining)?;
                self.out.flush()
            }
            Event::PhaseLoaded { kind, .. } => {
                self.show_status()?;
                self.maybe_tip(*kind)
            }
            Event::PlanCompleted { .. } => {
                writeln!(self.out, "{} All steps done.", self.controller.current_label())
            }
            Event::NoViablePlan { .. } => {
                writeln!(self.out, "{TOO_SHORT}")?;
                self.show_status()
            }
            Event::TimerStarted { .. } => {
                writeln!(self.out, "started")
            }
            Event::TimerPaused { .. } => {
                writeln!(self.out, "\npaused")
            }
            Event::TimerReset { .. } => self.show_status(),
            Event::PhaseExpired { outcome, .. } => {
                if self.bell {
                    write!(self.out, "\x07")?;
                }
                writeln!(self.out, "\ntime's up!")?;
                match outcome {
                    ExpiryOutcome::PlanCompleted => {
                        writeln!(self.out, "{} All steps done.", self.controller.current_label())
                    }
                    ExpiryOutcome::NextPhaseLoaded { kind, .. }
                    | ExpiryOutcome::LegacyToggled { kind } => {
                        self.show_status()?;
                        self.maybe_tip(*kind)?;
                        writeln!(self.out, "type 'start' to continue")
                    }
                }
            }
            Event::DistractionRecorded { .. } => Ok(()),
        }
    }

    fn maybe_tip(&mut self, kind: PhaseKind) -> std::io::Result<()> {
        if !self.show_tips {
            return Ok(());
        }
        match self.tips.tip_for(kind, &mut self.rng) {
            Some(tip) => writeln!(self.out, "Tip: {tip}"),
            None => Ok(()),
        }
    }
}
