//! # Focusplan Core Library
//!
//! This library provides the core logic for Focusplan, a focus timer that
//! splits a block of available time into alternating work and break phases.
//! Hosts (the CLI, or any GUI) are thin layers that call into it and render
//! whatever it reports.
//!
//! ## Architecture
//!
//! - **Planner**: a pure function from available minutes to a [`Schedule`]
//! - **Session Controller**: a tick-driven state machine over that schedule,
//!   with an overtime clock and a legacy work/break loop when no plan exists
//! - **Storage**: the append-only distraction CSV and TOML configuration
//!
//! ## Key Components
//!
//! - [`generate`]: Schedule generator
//! - [`SessionController`]: Countdown and navigation state machine
//! - [`Event`]: State-change notifications returned by every command
//! - [`CsvDistractionLog`]: Distraction log writer
//! - [`Config`]: Application configuration management

pub mod error;
pub mod events;
pub mod format;
pub mod storage;
pub mod timer;
pub mod tips;

pub use error::{ConfigError, CoreError, LogError};
pub use events::{Event, ExpiryOutcome};
pub use format::{format_clock, format_overtime};
pub use storage::{
    read_log, Config, CsvDistractionLog, DistractionRecord, DistractionSink,
    MemoryDistractionLog,
};
pub use timer::{
    generate, Direction, DistractionOutcome, IgnoreReason, Phase, PhaseKind, PlannerRules,
    Schedule, SessionController, SessionDefaults, SessionSnapshot, SessionStatus,
    MAX_PLAN_MINUTES,
};
pub use tips::BreakTips;
