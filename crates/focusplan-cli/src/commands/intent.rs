//! Interactive commands typed into a running session.
//!
//! Lines are parsed on the input thread and handed to the session loop as
//! discrete intents; the input thread never touches session state.

/// Whole-hour presets offered by `preset <n>`.
pub const PRESET_HOURS: [i64; 4] = [1, 2, 3, 4];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Start,
    Pause,
    Reset,
    Next,
    Prev,
    /// Zero-based phase index.
    Jump(usize),
    Distract,
    /// Replan with this many minutes.
    Plan(i64),
    Status,
    Help,
    Quit,
}

pub const HELP: &str = "\
commands:
  s, start        start or resume the countdown
  p, pause        pause the countdown
  r, reset        refill the current phase
  n, next         skip to the next phase
  b, prev         go back one phase
  j, jump <n>     go to step n
  d, distract     log a distraction (focus phases only)
  plan <minutes>  plan a new session
  preset <1-4>    plan 1 to 4 hours
  status          show where you are
  q, quit         exit";

/// Parse one input line.
///
/// # Errors
///
/// Returns a message for unknown commands and bad numbers.
pub fn parse_intent(line: &str) -> Result<Intent, String> {
    let mut words = line.split_whitespace();
    let command = words.next().unwrap_or_default().to_lowercase();
    let arg = words.next();

    let intent = match command.as_str() {
        "s" | "start" => Intent::Start,
        "p" | "pause" => Intent::Pause,
        "r" | "reset" => Intent::Reset,
        "n" | "next" | "skip" => Intent::Next,
        "b" | "prev" | "back" => Intent::Prev,
        "d" | "distract" | "distraction" => Intent::Distract,
        "status" => Intent::Status,
        "h" | "help" | "?" => Intent::Help,
        "q" | "quit" | "exit" => Intent::Quit,
        "j" | "jump" => {
            let step = number(arg, "a step number")?;
            match usize::try_from(step) {
                Ok(step) if step >= 1 => Intent::Jump(step - 1),
                _ => return Err("step numbers start at 1".into()),
            }
        }
        "plan" => Intent::Plan(number(arg, "minutes")?),
        "preset" => {
            let n = number(arg, "a preset between 1 and 4")?;
            let hours = usize::try_from(n)
                .ok()
                .and_then(|n| n.checked_sub(1))
                .and_then(|i| PRESET_HOURS.get(i))
                .ok_or_else(|| "presets are 1 to 4 hours".to_string())?;
            Intent::Plan(hours * 60)
        }
        "" => return Err("empty command".into()),
        other => return Err(format!("unknown command '{other}' (type 'help')")),
    };
    Ok(intent)
}

fn number(arg: Option<&str>, what: &str) -> Result<i64, String> {
    let arg = arg.ok_or_else(|| format!("expected {what}"))?;
    arg.parse::<i64>()
        .map_err(|_| format!("'{arg}' is not a valid number; expected {what}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_and_long_forms() {
        assert_eq!(parse_intent("s"), Ok(Intent::Start));
        assert_eq!(parse_intent("  START "), Ok(Intent::Start));
        assert_eq!(parse_intent("pause"), Ok(Intent::Pause));
        assert_eq!(parse_intent("n"), Ok(Intent::Next));
        assert_eq!(parse_intent("b"), Ok(Intent::Prev));
        assert_eq!(parse_intent("d"), Ok(Intent::Distract));
        assert_eq!(parse_intent("q"), Ok(Intent::Quit));
    }

    #[test]
    fn jump_is_one_based() {
        assert_eq!(parse_intent("jump 3"), Ok(Intent::Jump(2)));
        assert!(parse_intent("j 0").is_err());
        assert!(parse_intent("j -2").is_err());
        assert!(parse_intent("j").is_err());
    }

    #[test]
    fn plan_takes_minutes() {
        assert_eq!(parse_intent("plan 90"), Ok(Intent::Plan(90)));
        assert_eq!(parse_intent("plan -5"), Ok(Intent::Plan(-5)));
        assert!(parse_intent("plan ninety").unwrap_err().contains("not a valid number"));
    }

    #[test]
    fn presets_map_to_hours() {
        assert_eq!(parse_intent("preset 1"), Ok(Intent::Plan(60)));
        assert_eq!(parse_intent("preset 4"), Ok(Intent::Plan(240)));
        assert!(parse_intent("preset 5").is_err());
        assert!(parse_intent("preset 0").is_err());
    }

    #[test]
    fn unknown_command_is_rejected() {
        assert!(parse_intent("dance").unwrap_err().contains("unknown command"));
        assert!(parse_intent("   ").is_err());
    }
}
