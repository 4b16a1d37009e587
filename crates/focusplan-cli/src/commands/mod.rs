pub mod config;
pub mod intent;
pub mod log;
pub mod plan;
pub mod run;
