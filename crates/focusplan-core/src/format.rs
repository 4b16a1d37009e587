//! Clock-face formatting shared by snapshots, the distraction log and hosts.

/// `MM:SS`. Minutes are zero-padded to two digits and keep growing past 99.
pub fn format_clock(secs: u64) -> String {
    let (mins, secs) = (secs / 60, secs % 60);
    format!("{mins:02}:{secs:02}")
}

/// `+MM:SS`, the overtime counter.
pub fn format_overtime(secs: u64) -> String {
    format!("+{}", format_clock(secs))
}
