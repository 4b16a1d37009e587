mod controller;
mod schedule;

pub use controller::{
    Direction, DistractionOutcome, IgnoreReason, SessionController, SessionDefaults,
    SessionSnapshot, SessionStatus, LABEL_LEGACY_BREAK, LABEL_LEGACY_WORK, LABEL_PLAN_COMPLETE,
};
pub use schedule::{
    generate, Phase, PhaseKind, PlannerRules, Schedule, LABEL_BREAK, LABEL_DEEP_FOCUS,
    LABEL_FOCUS, LABEL_OPENING, LABEL_SHORT_BREAK, LABEL_WRAP_UP, MAX_PLAN_MINUTES,
};
