//! Relative-time labels for the last sync timestamp.

use chrono::{DateTime, Utc};

/// Render an epoch-millisecond timestamp relative to `now`.
///
/// Buckets: under a minute "just now", under an hour minutes, under a day
/// hours, under a week days, anything older the absolute date.
pub fn format_relative_time(timestamp_ms: i64, now: DateTime<Utc>) -> String {
    let Some(then) = DateTime::from_timestamp_millis(timestamp_ms) else {
        return String::new();
    };
    let elapsed = now.signed_duration_since(then);

    let seconds = elapsed.num_seconds();
    if seconds < 60 {
        return "just now".to_string();
    }

    let minutes = elapsed.num_minutes();
    if minutes < 60 {
        return format!("{} {} ago", minutes, plural(minutes, "minute"));
    }

    let hours = elapsed.num_hours();
    if hours < 24 {
        return format!("{} {} ago", hours, plural(hours, "hour"));
    }

    let days = elapsed.num_days();
    if days < 7 {
        return format!("{} {} ago", days, plural(days, "day"));
    }

    then.format("%Y-%m-%d").to_string()
}

fn plural(n: i64, unit: &str) -> String {
    if n == 1 {
        unit.to_string()
    } else {
        format!("{unit}s")
    }
}
