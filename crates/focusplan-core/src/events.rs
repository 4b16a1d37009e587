use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::PhaseKind;

/// Every state change of the session controller produces an Event.
/// Hosts redraw from these instead of polling fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    PhaseLoaded {
        index: usize,
        phase_count: usize,
        kind: PhaseKind,
        label: String,
        duration_secs: u64,
        at: DateTime<Utc>,
    },
    /// Navigation moved past the last phase.
    PlanCompleted {
        phase_count: usize,
        at: DateTime<Utc>,
    },
    /// An empty schedule was loaded; the controller is back in legacy mode.
    NoViablePlan {
        at: DateTime<Utc>,
    },
    TimerStarted {
        kind: PhaseKind,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerPaused {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerReset {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    Ticked {
        remaining_secs: u64,
    },
    /// The countdown reached zero.
    PhaseExpired {
        /// Kind of the phase that just ran out.
        kind: PhaseKind,
        outcome: ExpiryOutcome,
        at: DateTime<Utc>,
    },
    DistractionRecorded {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
}

/// What the controller did in response to a countdown reaching zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ExpiryOutcome {
    /// The next phase is loaded but paused; overtime is counting.
    NextPhaseLoaded { index: usize, kind: PhaseKind },
    /// The last phase ran out.
    PlanCompleted,
    /// No plan: the default work/break pair flipped; overtime is counting.
    LegacyToggled { kind: PhaseKind },
}

impl ExpiryOutcome {
    pub fn starts_overtime(&self) -> bool {
        !matches!(self, ExpiryOutcome::PlanCompleted)
    }
}
