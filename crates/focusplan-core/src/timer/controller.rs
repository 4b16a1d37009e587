//! Session controller.
//!
//! Holds the active schedule, the phase cursor, the countdown and the
//! overtime clock. Like the rest of the core it owns no thread: the host
//! calls `tick()` once per elapsed second while the countdown runs and
//! serializes every other command on the same loop.
//!
//! ## State Transitions
//!
//! ```text
//! NoPlan --load_schedule--> Paused <--start/pause--> Running
//! Running --tick to zero--> Overtime (next phase loaded) | PlanComplete
//! Overtime --start--> Running
//! any --advance/jump/reset--> Paused | PlanComplete
//! ```
//!
//! Without a schedule (legacy mode) the controller flips between a fixed
//! work/break pair forever.

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

use super::schedule::{Phase, PhaseKind, Schedule};
use crate::error::LogError;
use crate::events::{Event, ExpiryOutcome};
use crate::format::{format_clock, format_overtime};
use crate::storage::{DistractionRecord, DistractionSink};

pub const LABEL_PLAN_COMPLETE: &str = "Plan complete! 🎉";
pub const LABEL_LEGACY_WORK: &str = "Work session 🚀";
pub const LABEL_LEGACY_BREAK: &str = "Break time ☕";

/// Fixed work/break pair used when no schedule is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionDefaults {
    pub work_secs: u64,
    pub break_secs: u64,
}

impl Default for SessionDefaults {
    fn default() -> Self {
        Self {
            work_secs: 25 * 60,
            break_secs: 5 * 60,
        }
    }
}

impl SessionDefaults {
    pub fn duration_for(&self, kind: PhaseKind) -> u64 {
        match kind {
            PhaseKind::Work => self.work_secs,
            PhaseKind::Break => self.break_secs,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Forward,
    Back,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    /// No schedule; the legacy pair is loaded and paused.
    NoPlan,
    Paused,
    Running,
    /// The countdown ran out and the user has not acted yet.
    Overtime,
    /// Navigated past the last phase. Only `load_schedule` leaves this.
    PlanComplete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IgnoreReason {
    Paused,
    OnBreak,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DistractionOutcome {
    Recorded(DistractionRecord),
    Ignored(IgnoreReason),
}

impl DistractionOutcome {
    pub fn is_recorded(&self) -> bool {
        matches!(self, DistractionOutcome::Recorded(_))
    }

    pub fn event(&self) -> Option<Event> {
        match self {
            DistractionOutcome::Recorded(r) => Some(Event::DistractionRecorded {
                remaining_secs: r.remaining_secs,
                at: r.at.with_timezone(&Utc),
            }),
            DistractionOutcome::Ignored(_) => None,
        }
    }
}

/// Everything a host needs to redraw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub status: SessionStatus,
    pub kind: PhaseKind,
    pub label: String,
    /// 1-based step number while a phase of the plan is loaded.
    pub step: Option<usize>,
    pub step_count: usize,
    pub remaining_secs: u64,
    /// `MM:SS`
    pub remaining: String,
    pub overtime_secs: Option<u64>,
    /// `+MM:SS`, absent when overtime is hidden.
    pub overtime: Option<String>,
    pub phases_remaining: usize,
    pub schedule_progress_pct: f64,
    pub at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionController {
    defaults: SessionDefaults,
    schedule: Schedule,
    /// `None` before the first phase is loaded and in legacy mode.
    /// `Some(len)` means the plan is complete.
    current_index: Option<usize>,
    remaining_secs: u64,
    running: bool,
    /// Set only between a countdown reaching zero and the next user action.
    overtime_started_at: Option<DateTime<Utc>>,
    legacy_kind: PhaseKind,
}

impl Default for SessionController {
    fn default() -> Self {
        Self::new(SessionDefaults::default())
    }
}

impl SessionController {
    /// Starts in legacy mode with the work default loaded and paused.
    pub fn new(defaults: SessionDefaults) -> Self {
        Self {
            defaults,
            schedule: Schedule::empty(),
            current_index: None,
            remaining_secs: defaults.work_secs,
            running: false,
            overtime_started_at: None,
            legacy_kind: PhaseKind::Work,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn defaults(&self) -> SessionDefaults {
        self.defaults
    }

    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    pub fn is_plan_active(&self) -> bool {
        !self.schedule.is_empty()
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current_index
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_plan_complete(&self) -> bool {
        self.is_plan_active() && self.current_index == Some(self.schedule.len())
    }

    /// The loaded phase of the plan, if any.
    pub fn current_phase(&self) -> Option<&Phase> {
        self.current_index.and_then(|i| self.schedule.get(i))
    }

    pub fn current_kind(&self) -> PhaseKind {
        match self.current_phase() {
            Some(phase) => phase.kind,
            None if self.is_plan_active() => PhaseKind::Work,
            None => self.legacy_kind,
        }
    }

    pub fn current_label(&self) -> String {
        match self.current_phase() {
            Some(phase) => phase.label.clone(),
            None if self.is_plan_complete() => LABEL_PLAN_COMPLETE.to_string(),
            None => match self.legacy_kind {
                PhaseKind::Work => LABEL_LEGACY_WORK.to_string(),
                PhaseKind::Break => LABEL_LEGACY_BREAK.to_string(),
            },
        }
    }

    /// `Step 2/4: Short break ☕` while a phase is loaded, the plain label otherwise.
    pub fn status_line(&self) -> String {
        match (self.current_index, self.current_phase()) {
            (Some(i), Some(phase)) => {
                format!("Step {}/{}: {}", i + 1, self.schedule.len(), phase.label)
            }
            _ => self.current_label(),
        }
    }

    /// Phases after the loaded one.
    pub fn phases_remaining(&self) -> usize {
        match (self.current_index, self.current_phase()) {
            (Some(i), Some(_)) => self.schedule.len() - (i + 1),
            _ => 0,
        }
    }

    pub fn status(&self) -> SessionStatus {
        if self.is_plan_complete() {
            SessionStatus::PlanComplete
        } else if self.running {
            SessionStatus::Running
        } else if self.overtime_started_at.is_some() {
            SessionStatus::Overtime
        } else if self.is_plan_active() {
            SessionStatus::Paused
        } else {
            SessionStatus::NoPlan
        }
    }

    pub fn is_in_overtime(&self) -> bool {
        self.overtime_started_at.is_some()
    }

    pub fn overtime_started_at(&self) -> Option<DateTime<Utc>> {
        self.overtime_started_at
    }

    /// Whole seconds of overtime as of `now`.
    pub fn overtime_secs_at(&self, now: DateTime<Utc>) -> Option<u64> {
        self.overtime_started_at
            .map(|since| u64::try_from((now - since).num_seconds()).unwrap_or(0))
    }

    pub fn overtime_secs(&self) -> Option<u64> {
        self.overtime_secs_at(Utc::now())
    }

    /// 0.0 .. 100.0 progress across the entire schedule.
    pub fn schedule_progress_pct(&self) -> f64 {
        let total = self.schedule.total_secs();
        if total == 0 {
            return 0.0;
        }
        if self.is_plan_complete() {
            return 100.0;
        }
        let (done, current) = match (self.current_index, self.current_phase()) {
            (Some(i), Some(phase)) => (
                self.schedule.cumulative_secs(i),
                phase.duration_secs.saturating_sub(self.remaining_secs),
            ),
            _ => (0, 0),
        };
        ((done + current) as f64 / total as f64 * 100.0).min(100.0)
    }

    pub fn snapshot_at(&self, now: DateTime<Utc>) -> SessionSnapshot {
        let overtime_secs = self.overtime_secs_at(now);
        SessionSnapshot {
            status: self.status(),
            kind: self.current_kind(),
            label: self.current_label(),
            step: self
                .current_phase()
                .and(self.current_index)
                .map(|i| i + 1),
            step_count: self.schedule.len(),
            remaining_secs: self.remaining_secs,
            remaining: format_clock(self.remaining_secs),
            overtime_secs,
            overtime: overtime_secs.map(format_overtime),
            phases_remaining: self.phases_remaining(),
            schedule_progress_pct: self.schedule_progress_pct(),
            at: now,
        }
    }

    /// Build a full state snapshot.
    pub fn snapshot(&self) -> SessionSnapshot {
        self.snapshot_at(Utc::now())
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Replace the schedule and load its first phase, paused.
    ///
    /// An empty schedule drops back to legacy mode and reports
    /// `NoViablePlan`.
    pub fn load_schedule(&mut self, schedule: Schedule) -> Event {
        self.running = false;
        self.overtime_started_at = None;
        self.current_index = None;

        if schedule.is_empty() {
            tracing::warn!("no viable plan for the requested duration");
            self.schedule = Schedule::empty();
            self.legacy_kind = PhaseKind::Work;
            self.remaining_secs = self.defaults.work_secs;
            return Event::NoViablePlan { at: Utc::now() };
        }

        tracing::debug!(
            phases = schedule.len(),
            total_secs = schedule.total_secs(),
            "schedule loaded"
        );
        self.schedule = schedule;
        self.load_index(0)
    }

    /// Step one phase forward or back. Out-of-range moves return `None`
    /// and change nothing.
    pub fn advance(&mut self, direction: Direction) -> Option<Event> {
        let len = self.schedule.len();
        if len == 0 {
            return None;
        }
        let target = match (direction, self.current_index) {
            (Direction::Forward, None) => 0,
            (Direction::Forward, Some(i)) if i < len => i + 1,
            (Direction::Back, Some(i)) if i > 0 => i - 1,
            _ => return None,
        };
        Some(self.load_index(target))
    }

    /// Load phase `index` directly. Indices outside the plan return `None`.
    pub fn jump_to(&mut self, index: usize) -> Option<Event> {
        if index >= self.schedule.len() {
            return None;
        }
        Some(self.load_index(index))
    }

    pub fn start(&mut self) -> Option<Event> {
        if self.running || self.is_plan_complete() {
            return None;
        }
        self.running = true;
        self.overtime_started_at = None;
        tracing::debug!(remaining_secs = self.remaining_secs, "countdown started");
        Some(Event::TimerStarted {
            kind: self.current_kind(),
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    pub fn pause(&mut self) -> Option<Event> {
        if !self.running {
            return None;
        }
        self.running = false;
        tracing::debug!(remaining_secs = self.remaining_secs, "countdown paused");
        Some(Event::TimerPaused {
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    /// Stop and refill the countdown for the phase that is loaded now.
    pub fn reset(&mut self) -> Event {
        self.running = false;
        self.overtime_started_at = None;
        self.remaining_secs = match self.current_phase() {
            Some(phase) => phase.duration_secs,
            None if self.is_plan_active() => 0,
            None => self.defaults.duration_for(self.legacy_kind),
        };
        tracing::debug!(remaining_secs = self.remaining_secs, "countdown reset");
        Event::TimerReset {
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        }
    }

    /// Call once per elapsed second. Returns `None` while paused,
    /// `PhaseExpired` on the tick that reaches zero, `Ticked` otherwise.
    pub fn tick(&mut self) -> Option<Event> {
        if !self.running {
            return None;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs > 0 {
            return Some(Event::Ticked {
                remaining_secs: self.remaining_secs,
            });
        }
        // Cleared before expiring so the expiry can only fire once.
        self.running = false;
        Some(self.expire())
    }

    /// Log a distraction. Only counts while a WORK countdown is running.
    ///
    /// # Errors
    ///
    /// Returns the sink's error; the session itself is left untouched.
    pub fn record_distraction<S>(&self, sink: &mut S) -> Result<DistractionOutcome, LogError>
    where
        S: DistractionSink + ?Sized,
    {
        if self.current_kind() == PhaseKind::Break {
            return Ok(DistractionOutcome::Ignored(IgnoreReason::OnBreak));
        }
        if !self.running {
            return Ok(DistractionOutcome::Ignored(IgnoreReason::Paused));
        }
        let record = DistractionRecord::new(Local::now(), self.remaining_secs);
        sink.append(&record)?;
        Ok(DistractionOutcome::Recorded(record))
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn load_index(&mut self, index: usize) -> Event {
        self.current_index = Some(index);
        self.running = false;
        self.overtime_started_at = None;
        let at = Utc::now();

        match self.schedule.get(index) {
            Some(phase) => {
                self.remaining_secs = phase.duration_secs;
                tracing::debug!(index, label = %phase.label, "phase loaded");
                Event::PhaseLoaded {
                    index,
                    phase_count: self.schedule.len(),
                    kind: phase.kind,
                    label: phase.label.clone(),
                    duration_secs: phase.duration_secs,
                    at,
                }
            }
            None => {
                self.remaining_secs = 0;
                tracing::info!(phases = self.schedule.len(), "plan complete");
                Event::PlanCompleted {
                    phase_count: self.schedule.len(),
                    at,
                }
            }
        }
    }

    fn expire(&mut self) -> Event {
        let kind = self.current_kind();
        let at = Utc::now();

        let outcome = if self.is_plan_active() {
            self.advance(Direction::Forward);
            match (self.current_index, self.current_phase()) {
                (Some(index), Some(next)) => ExpiryOutcome::NextPhaseLoaded {
                    index,
                    kind: next.kind,
                },
                _ => ExpiryOutcome::PlanCompleted,
            }
        } else {
            self.legacy_kind = self.legacy_kind.toggled();
            self.remaining_secs = self.defaults.duration_for(self.legacy_kind);
            ExpiryOutcome::LegacyToggled {
                kind: self.legacy_kind,
            }
        };

        if outcome.starts_overtime() {
            self.overtime_started_at = Some(at);
        }
        tracing::info!(?kind, ?outcome, "countdown expired");
        Event::PhaseExpired { kind, outcome, at }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryDistractionLog;
    use crate::timer::generate;
    use chrono::Duration;

    fn two_step() -> Schedule {
        Schedule::new(vec![
            Phase::new(PhaseKind::Work, 100, "Step1"),
            Phase::new(PhaseKind::Break, 50, "Step2"),
        ])
    }

    fn loaded(schedule: Schedule) -> SessionController {
        let mut c = SessionController::default();
        c.load_schedule(schedule);
        c
    }

    fn run_down(c: &mut SessionController) -> Event {
        c.start();
        loop {
            match c.tick() {
                Some(Event::Ticked { .. }) => continue,
                Some(other) => return other,
                None => panic!("countdown stopped without expiring"),
            }
        }
    }

    #[test]
    fn initial_state_is_legacy_work() {
        let c = SessionController::default();
        assert_eq!(c.status(), SessionStatus::NoPlan);
        assert_eq!(c.current_index(), None);
        assert_eq!(c.remaining_secs(), 1500);
        assert_eq!(c.current_kind(), PhaseKind::Work);
        assert!(!c.is_running());
    }

    #[test]
    fn load_schedule_loads_first_phase_paused() {
        let mut c = SessionController::default();
        let event = c.load_schedule(two_step());
        assert!(matches!(event, Event::PhaseLoaded { index: 0, phase_count: 2, .. }));
        assert_eq!(c.current_index(), Some(0));
        assert_eq!(c.remaining_secs(), 100);
        assert_eq!(c.status(), SessionStatus::Paused);
        assert_eq!(c.phases_remaining(), 1);
        assert_eq!(c.status_line(), "Step 1/2: Step1");
    }

    #[test]
    fn loading_empty_schedule_reports_no_plan() {
        let mut c = loaded(two_step());
        c.start();
        let event = c.load_schedule(generate(10));
        assert!(matches!(event, Event::NoViablePlan { .. }));
        assert_eq!(c.status(), SessionStatus::NoPlan);
        assert_eq!(c.current_index(), None);
        assert!(!c.is_plan_active());
        assert!(!c.is_running());
    }

    #[test]
    fn start_is_idempotent() {
        let mut c = loaded(two_step());
        assert!(c.start().is_some());
        assert!(c.start().is_none());
        assert_eq!(c.status(), SessionStatus::Running);
    }

    #[test]
    fn pause_stops_ticking() {
        let mut c = loaded(two_step());
        c.start();
        c.tick();
        assert!(c.pause().is_some());
        assert!(c.pause().is_none());
        assert!(c.tick().is_none());
        assert_eq!(c.remaining_secs(), 99);
    }

    #[test]
    fn expiry_preloads_next_phase_and_starts_overtime() {
        let mut c = loaded(two_step());
        let event = run_down(&mut c);
        match event {
            Event::PhaseExpired { kind, outcome, .. } => {
                assert_eq!(kind, PhaseKind::Work);
                assert_eq!(
                    outcome,
                    ExpiryOutcome::NextPhaseLoaded { index: 1, kind: PhaseKind::Break }
                );
            }
            other => panic!("expected PhaseExpired, got {other:?}"),
        }
        assert_eq!(c.current_index(), Some(1));
        assert_eq!(c.remaining_secs(), 50);
        assert!(!c.is_running());
        assert!(c.is_in_overtime());
        assert_eq!(c.status(), SessionStatus::Overtime);
        assert_eq!(c.snapshot().remaining, "00:50");
    }

    #[test]
    fn expiry_on_last_phase_completes_plan_without_overtime() {
        let mut c = loaded(two_step());
        c.jump_to(1);
        let event = run_down(&mut c);
        assert!(matches!(
            event,
            Event::PhaseExpired { outcome: ExpiryOutcome::PlanCompleted, .. }
        ));
        assert_eq!(c.status(), SessionStatus::PlanComplete);
        assert!(!c.is_in_overtime());
        assert_eq!(c.current_label(), LABEL_PLAN_COMPLETE);
        assert!(c.start().is_none());
        assert!(c.tick().is_none());
    }

    #[test]
    fn expiry_fires_once() {
        let mut c = loaded(two_step());
        run_down(&mut c);
        let index = c.current_index();
        assert!(c.tick().is_none());
        assert_eq!(c.current_index(), index);
    }

    #[test]
    fn legacy_expiry_toggles_pair() {
        let defaults = SessionDefaults { work_secs: 3, break_secs: 2 };
        let mut c = SessionController::new(defaults);

        let event = run_down(&mut c);
        assert!(matches!(
            event,
            Event::PhaseExpired {
                kind: PhaseKind::Work,
                outcome: ExpiryOutcome::LegacyToggled { kind: PhaseKind::Break },
                ..
            }
        ));
        assert_eq!(c.current_kind(), PhaseKind::Break);
        assert_eq!(c.remaining_secs(), 2);
        assert_eq!(c.current_label(), LABEL_LEGACY_BREAK);
        assert_eq!(c.status(), SessionStatus::Overtime);

        run_down(&mut c);
        assert_eq!(c.current_kind(), PhaseKind::Work);
        assert_eq!(c.remaining_secs(), 3);
    }

    #[test]
    fn start_clears_overtime() {
        let mut c = loaded(two_step());
        run_down(&mut c);
        assert!(c.is_in_overtime());
        c.start();
        assert!(!c.is_in_overtime());
        assert_eq!(c.status(), SessionStatus::Running);
    }

    #[test]
    fn navigation_and_reset_clear_overtime() {
        let mut c = loaded(generate(120));
        run_down(&mut c);
        assert!(c.is_in_overtime());
        c.advance(Direction::Back);
        assert!(!c.is_in_overtime());

        run_down(&mut c);
        assert!(c.is_in_overtime());
        c.reset();
        assert!(!c.is_in_overtime());

        c.jump_to(0);
        run_down(&mut c);
        c.jump_to(3);
        assert!(!c.is_in_overtime());
    }

    #[test]
    fn overtime_counts_from_expiry() {
        let mut c = loaded(two_step());
        run_down(&mut c);
        let since = c.overtime_started_at().unwrap();
        assert_eq!(c.overtime_secs_at(since + Duration::seconds(65)), Some(65));
        // Clock skew never goes negative.
        assert_eq!(c.overtime_secs_at(since - Duration::seconds(5)), Some(0));
        let snap = c.snapshot_at(since + Duration::seconds(65));
        assert_eq!(snap.overtime.as_deref(), Some("+01:05"));
    }

    #[test]
    fn advance_is_clamped() {
        let mut c = loaded(two_step());
        assert!(c.advance(Direction::Back).is_none());
        assert_eq!(c.current_index(), Some(0));
        assert_eq!(c.remaining_secs(), 100);

        assert!(c.advance(Direction::Forward).is_some());
        assert!(matches!(
            c.advance(Direction::Forward),
            Some(Event::PlanCompleted { phase_count: 2, .. })
        ));
        assert_eq!(c.current_index(), Some(2));
        assert!(c.advance(Direction::Forward).is_none());
        assert_eq!(c.current_index(), Some(2));
        assert_eq!(c.status(), SessionStatus::PlanComplete);
    }

    #[test]
    fn back_from_complete_reloads_last_phase() {
        let mut c = loaded(two_step());
        c.jump_to(1);
        c.advance(Direction::Forward);
        assert!(c.is_plan_complete());
        c.advance(Direction::Back);
        assert_eq!(c.current_index(), Some(1));
        assert_eq!(c.remaining_secs(), 50);
    }

    #[test]
    fn advance_without_plan_is_noop() {
        let mut c = SessionController::default();
        assert!(c.advance(Direction::Forward).is_none());
        assert!(c.advance(Direction::Back).is_none());
        assert_eq!(c.status(), SessionStatus::NoPlan);
    }

    #[test]
    fn navigation_stops_countdown_and_reloads_duration() {
        let mut c = loaded(two_step());
        c.start();
        c.tick();
        c.advance(Direction::Forward);
        assert!(!c.is_running());
        assert_eq!(c.remaining_secs(), 50);
        assert!(c.tick().is_none());
    }

    #[test]
    fn jump_out_of_range_is_noop() {
        let mut c = loaded(two_step());
        assert!(c.jump_to(2).is_none());
        assert_eq!(c.current_index(), Some(0));
    }

    #[test]
    fn reset_reloads_current_phase() {
        let mut c = loaded(two_step());
        c.jump_to(1);
        c.start();
        for _ in 0..10 {
            c.tick();
        }
        c.reset();
        assert_eq!(c.remaining_secs(), 50);
        assert!(!c.is_running());
        assert_eq!(c.current_index(), Some(1));
    }

    #[test]
    fn reset_in_legacy_mode_uses_kind_default() {
        let mut c = SessionController::new(SessionDefaults { work_secs: 3, break_secs: 2 });
        c.start();
        c.tick();
        c.reset();
        assert_eq!(c.remaining_secs(), 3);

        run_down(&mut c);
        c.start();
        c.tick();
        c.reset();
        assert_eq!(c.current_kind(), PhaseKind::Break);
        assert_eq!(c.remaining_secs(), 2);
    }

    #[test]
    fn reset_when_complete_stays_complete() {
        let mut c = loaded(two_step());
        c.jump_to(1);
        c.advance(Direction::Forward);
        c.reset();
        assert_eq!(c.status(), SessionStatus::PlanComplete);
        assert_eq!(c.remaining_secs(), 0);
    }

    #[test]
    fn distraction_recorded_only_while_working() {
        let mut c = loaded(two_step());
        let mut log = MemoryDistractionLog::default();

        let outcome = c.record_distraction(&mut log).unwrap();
        assert_eq!(outcome, DistractionOutcome::Ignored(IgnoreReason::Paused));

        c.start();
        for _ in 0..10 {
            c.tick();
        }
        let outcome = c.record_distraction(&mut log).unwrap();
        assert!(outcome.is_recorded());
        assert!(matches!(
            outcome.event(),
            Some(Event::DistractionRecorded { remaining_secs: 90, .. })
        ));
        assert_eq!(log.records.len(), 1);
        assert_eq!(log.records[0].remaining(), "01:30");
    }

    #[test]
    fn distraction_ignored_on_break() {
        let mut c = loaded(two_step());
        c.jump_to(1);
        c.start();
        let mut log = MemoryDistractionLog::default();
        let outcome = c.record_distraction(&mut log).unwrap();
        assert_eq!(outcome, DistractionOutcome::Ignored(IgnoreReason::OnBreak));
        assert!(outcome.event().is_none());
        assert!(log.records.is_empty());
        assert!(c.is_running());
        assert_eq!(c.current_index(), Some(1));
    }

    struct FailingSink;

    impl DistractionSink for FailingSink {
        fn append(&mut self, _record: &DistractionRecord) -> Result<(), LogError> {
            Err(LogError::Io {
                path: "focus_log.csv".into(),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
            })
        }
    }

    #[test]
    fn failing_sink_leaves_session_intact() {
        let mut c = loaded(two_step());
        c.start();
        c.tick();
        assert!(c.record_distraction(&mut FailingSink).is_err());
        assert!(c.is_running());
        assert_eq!(c.remaining_secs(), 99);
    }

    #[test]
    fn snapshot_reports_progress() {
        let mut c = loaded(generate(60));
        let snap = c.snapshot();
        assert_eq!(snap.step, Some(1));
        assert_eq!(snap.step_count, 4);
        assert_eq!(snap.remaining, "25:00");
        assert_eq!(snap.phases_remaining, 3);
        assert_eq!(snap.overtime, None);
        assert_eq!(snap.schedule_progress_pct, 0.0);

        c.jump_to(2);
        let snap = c.snapshot();
        assert_eq!(snap.step, Some(3));
        assert!((snap.schedule_progress_pct - 50.0).abs() < 1e-9);

        c.jump_to(3);
        c.advance(Direction::Forward);
        let snap = c.snapshot();
        assert_eq!(snap.status, SessionStatus::PlanComplete);
        assert_eq!(snap.step, None);
        assert_eq!(snap.phases_remaining, 0);
        assert_eq!(snap.schedule_progress_pct, 100.0);
    }

    #[test]
    fn remaining_never_increases_while_running() {
        let mut c = loaded(two_step());
        c.start();
        let mut last = c.remaining_secs();
        while c.is_running() {
            c.tick();
            if c.is_running() {
                assert!(c.remaining_secs() < last);
                last = c.remaining_secs();
            }
        }
    }
}
