use clap::Args;
use focusplan_core::{format_clock, generate, PhaseKind, Schedule};

#[derive(Args)]
pub struct PlanArgs {
    /// Available time in minutes
    #[arg(allow_negative_numbers = true)]
    pub minutes: i64,
    /// Print the schedule as JSON
    #[arg(long)]
    pub json: bool,
}

pub const TOO_SHORT: &str = "Not enough time for a meaningful session (at least 25 minutes).";

pub fn run(args: PlanArgs) -> Result<(), Box<dyn std::error::Error>> {
    let schedule = generate(args.minutes);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&schedule)?);
        return Ok(());
    }
    print!("{}", render(&schedule));
    Ok(())
}

/// Human-readable table of a schedule.
pub fn render(schedule: &Schedule) -> String {
    if schedule.is_empty() {
        return format!("{TOO_SHORT}\n");
    }

    let mut out = String::new();
    for (i, phase) in schedule.iter().enumerate() {
        let kind = match phase.kind {
            PhaseKind::Work => "WORK ",
            PhaseKind::Break => "BREAK",
        };
        out.push_str(&format!(
            "{:>2}. {kind} {}  {}\n",
            i + 1,
            format_clock(phase.duration_secs),
            phase.label
        ));
    }
    out.push_str(&format!(
        "Total: {} focus, {} break\n",
        format_clock(schedule.work_secs()),
        format_clock(schedule.break_secs())
    ));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_one_row_per_phase() {
        let text = render(&generate(60));
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(lines[0].starts_with(" 1. WORK  25:00"));
        assert!(lines[1].contains("BREAK 05:00"));
        assert_eq!(lines[4], "Total: 50:00 focus, 10:00 break");
    }

    #[test]
    fn infeasible_plan_explains_itself() {
        assert_eq!(render(&generate(20)), format!("{TOO_SHORT}\n"));
    }
}
