//! Store capacity configuration
//!
//! Capacities bound each of the three levels of the store. A capacity of
//! zero means "use the default for that level", so a partially filled
//! configuration is always usable.

use super::error::{Result, TracelogError};
use serde::{Deserialize, Serialize};

/// Default maximum number of groups
pub const DEFAULT_GROUP_COUNT: usize = 40;
/// Default maximum number of spans per group
pub const DEFAULT_SPAN_COUNT: usize = 60;
/// Default maximum number of messages per span
pub const DEFAULT_MESSAGE_COUNT: usize = 60;

pub const ENV_NUM_GROUPS: &str = "TRACELOG_NUM_GROUPS";
pub const ENV_NUM_SPANS: &str = "TRACELOG_NUM_SPANS";
pub const ENV_NUM_MESSAGES: &str = "TRACELOG_NUM_MESSAGES";
pub const ENV_ENABLED: &str = "TRACELOG_ENABLED";

/// Capacities and initial state of a trace store.
///
/// # Examples
///
/// ```
/// use rust_tracelog::TracelogConfig;
///
/// let config = TracelogConfig::new()
///     .with_num_groups(8)
///     .with_num_messages(0)
///     .normalized();
///
/// assert_eq!(config.num_groups, 8);
/// assert_eq!(config.num_spans, 60);
/// assert_eq!(config.num_messages, 60);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TracelogConfig {
    /// Maximum number of groups kept
    pub num_groups: usize,
    /// Maximum number of spans kept per group
    pub num_spans: usize,
    /// Maximum number of distinct messages kept per span
    pub num_messages: usize,
    /// Whether writes are captured when the store is created
    pub enabled: bool,
}

impl Default for TracelogConfig {
    fn default() -> Self {
        Self {
            num_groups: DEFAULT_GROUP_COUNT,
            num_spans: DEFAULT_SPAN_COUNT,
            num_messages: DEFAULT_MESSAGE_COUNT,
            enabled: true,
        }
    }
}

impl TracelogConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_num_groups(mut self, num_groups: usize) -> Self {
        self.num_groups = num_groups;
        self
    }

    #[must_use]
    pub fn with_num_spans(mut self, num_spans: usize) -> Self {
        self.num_spans = num_spans;
        self
    }

    #[must_use]
    pub fn with_num_messages(mut self, num_messages: usize) -> Self {
        self.num_messages = num_messages;
        self
    }

    #[must_use]
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Replace zero capacities with their defaults.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        if self.num_groups == 0 {
            self.num_groups = DEFAULT_GROUP_COUNT;
        }
        if self.num_spans == 0 {
            self.num_spans = DEFAULT_SPAN_COUNT;
        }
        if self.num_messages == 0 {
            self.num_messages = DEFAULT_MESSAGE_COUNT;
        }
        self
    }

    /// Check that every capacity is positive.
    ///
    /// Stores accept zero and substitute the default; call this instead when
    /// a zero capacity should be reported as a mistake.
    pub fn validate(&self) -> Result<()> {
        let capacities = [
            ("num_groups", self.num_groups),
            ("num_spans", self.num_spans),
            ("num_messages", self.num_messages),
        ];
        for (name, value) in capacities {
            if value == 0 {
                return Err(TracelogError::config(name, "capacity must be greater than zero"));
            }
        }
        Ok(())
    }

    /// Load a configuration from `TRACELOG_*` environment variables.
    ///
    /// Unset variables keep their defaults and non-positive sizes fall back
    /// to the default. A value that does not parse is an error.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with a custom variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENV_NUM_GROUPS) {
            config.num_groups = parse_capacity(ENV_NUM_GROUPS, &raw)?;
        }
        if let Some(raw) = lookup(ENV_NUM_SPANS) {
            config.num_spans = parse_capacity(ENV_NUM_SPANS, &raw)?;
        }
        if let Some(raw) = lookup(ENV_NUM_MESSAGES) {
            config.num_messages = parse_capacity(ENV_NUM_MESSAGES, &raw)?;
        }
        if let Some(raw) = lookup(ENV_ENABLED) {
            config.enabled = parse_flag(ENV_ENABLED, &raw)?;
        }

        Ok(config.normalized())
    }
}

fn parse_capacity(key: &str, raw: &str) -> Result<usize> {
    let value: i64 = raw.trim().parse().map_err(|_| {
        TracelogError::config(key, format!("expected an integer, got '{}'", raw))
    })?;
    // Zero is normalized to the default by the caller.
    Ok(usize::try_from(value).unwrap_or(0))
}

fn parse_flag(key: &str, raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(TracelogError::config(
            key,
            format!("expected a boolean, got '{}'", raw),
        )),
    }
}
