//! Log entry structure

use super::log_level::LogLevel;
use super::timestamp::{format_exact, format_time_ago};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Longest message the store keeps, in characters.
pub const MAX_MESSAGE_CHARS: usize = 1000;

/// One deduplicated `(level, message)` occurrence within a span.
///
/// `timestamp` is the last time the message was written and `count` is how
/// many times it was written since it entered the span.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub group: String,
    pub span: String,
    pub level: LogLevel,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub count: u32,
}

impl LogEntry {
    pub fn new(
        group: impl Into<String>,
        span: impl Into<String>,
        level: LogLevel,
        message: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            group: group.into(),
            span: span.into(),
            level,
            message: message.into(),
            timestamp,
            count: 1,
        }
    }

    /// True when this entry absorbs a write of `(level, message)`.
    #[inline]
    pub fn matches(&self, level: LogLevel, message: &str) -> bool {
        self.level == level && self.message == message
    }

    /// Record another occurrence at `now`.
    pub(crate) fn touch(&mut self, now: DateTime<Utc>) {
        self.count = self.count.saturating_add(1);
        self.timestamp = now;
    }

    /// Render as `"<time> - [<LEVEL>] <message>"`, with `" [x<count>]"`
    /// appended when the message was seen more than once.
    ///
    /// `now` anchors relative rendering; it is ignored when `with_exact_time`
    /// is set.
    pub fn formatted_message(
        &self,
        timezone: &str,
        with_exact_time: bool,
        now: &DateTime<Utc>,
    ) -> String {
        let time = if with_exact_time {
            format_exact(&self.timestamp, timezone)
        } else {
            format_time_ago(&self.timestamp, now, timezone)
        };

        let out = format!("{} - [{}] {}", time, self.level, self.message);
        if self.count > 1 {
            format!("{} [x{}]", out, self.count)
        } else {
            out
        }
    }
}

/// Clamp a formatted message to [`MAX_MESSAGE_CHARS`] characters.
///
/// Returns `true` when the message was shortened. Truncation always lands on
/// a character boundary.
pub(crate) fn truncate_message(message: &mut String) -> bool {
    match message.char_indices().nth(MAX_MESSAGE_CHARS) {
        Some((byte_idx, _)) => {
            message.truncate(byte_idx);
            true
        }
        None => false,
    }
}
