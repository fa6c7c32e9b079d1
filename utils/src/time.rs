//! Time formatting helpers.

use std::time::Duration;

/// Format a duration to a short human-readable string.
///
/// Sub-second durations are shown in milliseconds; everything else is
/// truncated to whole seconds.
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    if secs == 0 {
        format!("{}ms", duration.as_millis())
    } else if secs < 60 {
        format!("{}s", secs)
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m", secs / 3600, (secs % 3600) / 60)
    }
}
