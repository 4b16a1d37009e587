use std::path::PathBuf;

use clap::Args;
use focusplan_core::{read_log, Config};

#[derive(Args)]
pub struct LogArgs {
    /// Distraction log file (defaults to log.distraction_log)
    #[arg(long)]
    pub path: Option<PathBuf>,
    /// Print rows as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: LogArgs) -> Result<(), Box<dyn std::error::Error>> {
    let path = match args.path {
        Some(path) => path,
        None => Config::load_or_default().distraction_log_path(),
    };
    let rows = read_log(&path)?;

    if args.json {
        let rows: Vec<_> = rows
            .iter()
            .map(|(timestamp, remaining)| {
                serde_json::json!({ "timestamp": timestamp, "remaining": remaining })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    if rows.is_empty() {
        println!("No distractions logged.");
        return Ok(());
    }
    for (timestamp, remaining) in &rows {
        println!("{timestamp}  {remaining} left");
    }
    println!("{} distraction(s)", rows.len());
    Ok(())
}
