//! Timestamp rendering for projected log lines
//!
//! Entries are stored in UTC. When they are projected for display the
//! timestamp is rendered either as an exact time in a caller-chosen zone or
//! as a relative "time ago" string.

use chrono::{DateTime, TimeDelta, Utc};
use chrono_tz::Tz;

/// Exact time layout: `08 Jan 25 10:30 UTC`
pub const EXACT_TIME_FORMAT: &str = "%d %b %y %H:%M %Z";

/// Resolve an IANA time zone identifier.
///
/// Empty strings and unknown identifiers resolve to UTC; rendering never
/// fails because of a bad zone name.
pub fn resolve_timezone(timezone: &str) -> Tz {
    let name = timezone.trim();
    if name.is_empty() {
        return Tz::UTC;
    }
    name.parse::<Tz>().unwrap_or(Tz::UTC)
}

/// Render `timestamp` as an exact time in `timezone`.
///
/// # Examples
///
/// ```
/// use rust_tracelog::core::timestamp::format_exact;
/// use chrono::{TimeZone, Utc};
///
/// let ts = Utc.with_ymd_and_hms(2025, 1, 8, 10, 30, 45).unwrap();
/// assert_eq!(format_exact(&ts, "UTC"), "08 Jan 25 10:30 UTC");
/// assert_eq!(format_exact(&ts, "Not/AZone"), "08 Jan 25 10:30 UTC");
/// ```
pub fn format_exact(timestamp: &DateTime<Utc>, timezone: &str) -> String {
    let tz = resolve_timezone(timezone);
    timestamp
        .with_timezone(&tz)
        .format(EXACT_TIME_FORMAT)
        .to_string()
}

/// Render how long before `now` the `timestamp` happened.
///
/// Anything a day old or more falls back to [`format_exact`]. Timestamps in
/// the future (clock skew) count as zero seconds ago.
///
/// # Examples
///
/// ```
/// use rust_tracelog::core::timestamp::format_time_ago;
/// use chrono::{Duration, TimeZone, Utc};
///
/// let now = Utc.with_ymd_and_hms(2025, 1, 8, 10, 30, 45).unwrap();
/// assert_eq!(format_time_ago(&(now - Duration::seconds(42)), &now, "UTC"), "42s ago");
/// assert_eq!(format_time_ago(&(now - Duration::seconds(125)), &now, "UTC"), "2m 5s ago");
/// assert_eq!(format_time_ago(&(now - Duration::hours(3)), &now, "UTC"), "3h ago");
/// ```
pub fn format_time_ago(timestamp: &DateTime<Utc>, now: &DateTime<Utc>, timezone: &str) -> String {
    let elapsed = (*now - *timestamp).max(TimeDelta::zero());

    if elapsed < TimeDelta::minutes(1) {
        format!("{}s ago", elapsed.num_seconds())
    } else if elapsed < TimeDelta::hours(1) {
        format!(
            "{}m {}s ago",
            elapsed.num_minutes(),
            elapsed.num_seconds() % 60
        )
    } else if elapsed < TimeDelta::days(1) {
        let hours = elapsed.num_hours();
        let minutes = elapsed.num_minutes() % 60;
        if minutes == 0 {
            format!("{}h ago", hours)
        } else {
            format!("{}h {}m ago", hours, minutes)
        }
    } else {
        format_exact(timestamp, timezone)
    }
}
