//! m:ss time labels

/// Format whole seconds as `m:ss`
///
/// Minutes are not capped, so an hour reads `60:00`.
pub fn format_clock(total_secs: u64) -> String {
    format!("{}:{:02}", total_secs / 60, total_secs % 60)
}

/// Format an elapsed playback position (seconds, fractional) as `m:ss`
///
/// Partial seconds are truncated; negative or non-finite positions read `0:00`.
pub fn format_elapsed(position_secs: f64) -> String {
    if !position_secs.is_finite() || position_secs <= 0.0 {
        return format_clock(0);
    }
    format_clock(position_secs.floor() as u64)
}

/// Format a track length given in milliseconds, rounded to the nearest second
pub fn format_track_duration(duration_ms: u64) -> String {
    format_clock(duration_ms.saturating_add(500) / 1000)
}
