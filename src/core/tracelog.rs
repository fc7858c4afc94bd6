//! The trace log store
//!
//! [`Tracelog`] keeps recent diagnostic messages under a `group -> span`
//! namespace, bounded at every level. Writes never fail: once a capacity is
//! reached the least recently active group, span or message is dropped.

use super::{
    clock::{Clock, SystemClock},
    config::TracelogConfig,
    error::Result,
    handle::SpanLogger,
    log_entry::{truncate_message, LogEntry, MAX_MESSAGE_CHARS},
    log_level::LogLevel,
    metrics::TracelogMetrics,
    store::{StoreState, WriteOutcome},
};
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Rendered view of the store: `group -> span -> formatted lines`.
pub type Projection = BTreeMap<String, BTreeMap<String, Vec<String>>>;

/// Bounded, thread-safe store of recent trace messages.
///
/// # Example
///
/// ```
/// use rust_tracelog::prelude::*;
///
/// let tracelog = Tracelog::with_sizes(2, 2, 4);
/// tracelog.write("server", "run", LogLevel::Info, "boot");
/// tracelog.write("server", "run", LogLevel::Info, "boot");
///
/// let spans = tracelog.entries("server");
/// assert_eq!(spans[0][0].count, 2);
///
/// let view = tracelog.project("UTC", false, "", "");
/// assert!(view["server"]["run"][0].ends_with("[INFO] boot [x2]"));
/// ```
#[derive(Debug)]
pub struct Tracelog {
    state: RwLock<StoreState>,
    config: TracelogConfig,
    clock: Arc<dyn Clock>,
    metrics: TracelogMetrics,
}

impl Tracelog {
    /// Create a store with the default capacities (40 groups, 60 spans per
    /// group, 60 messages per span).
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(TracelogConfig::default())
    }

    /// Create a store with explicit capacities. A zero capacity falls back to
    /// the default for that level.
    #[must_use]
    pub fn with_sizes(num_groups: usize, num_spans: usize, num_messages: usize) -> Self {
        Self::with_config(
            TracelogConfig::new()
                .with_num_groups(num_groups)
                .with_num_spans(num_spans)
                .with_num_messages(num_messages),
        )
    }

    #[must_use]
    pub fn with_config(config: TracelogConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock::new()))
    }

    /// Create a store that reads time from `clock`.
    #[must_use]
    pub fn with_clock(config: TracelogConfig, clock: Arc<dyn Clock>) -> Self {
        let config = config.normalized();
        Self {
            state: RwLock::new(StoreState::new(config.enabled)),
            config,
            clock,
            metrics: TracelogMetrics::new(),
        }
    }

    /// Create a builder for Tracelog
    #[must_use]
    pub fn builder() -> TracelogBuilder {
        TracelogBuilder::new()
    }

    /// Record `message` under `(group, span)`.
    ///
    /// Does nothing while the store is disabled or when the message is empty.
    /// Messages longer than 1000 characters are truncated. An identical
    /// `(level, message)` already in the span is collapsed into a count.
    pub fn write(&self, group: &str, span: &str, level: LogLevel, message: impl Into<String>) {
        if !self.is_enabled() {
            self.metrics.record_skipped();
            return;
        }
        self.insert(group, span, level, message.into());
    }

    /// Like [`write`](Self::write), formatting `args` only when enabled.
    pub fn write_args(&self, group: &str, span: &str, level: LogLevel, args: fmt::Arguments<'_>) {
        if !self.is_enabled() {
            self.metrics.record_skipped();
            return;
        }
        self.insert(group, span, level, fmt::format(args));
    }

    fn insert(&self, group: &str, span: &str, level: LogLevel, mut message: String) {
        if message.is_empty() {
            self.metrics.record_skipped();
            return;
        }
        if truncate_message(&mut message) {
            self.metrics.record_truncated();
            tracing::trace!(group, span, "message truncated to {} characters", MAX_MESSAGE_CHARS);
        }

        let outcome = {
            let mut state = self.state.write();
            // disable() may have won the race for the lock
            if !state.enabled {
                self.metrics.record_skipped();
                return;
            }
            let now = self.clock.now();
            state.record(group, span, level, message, now, &self.config)
        };

        self.observe(group, outcome);
    }

    fn observe(&self, group: &str, outcome: WriteOutcome) {
        match outcome {
            WriteOutcome::Collapsed { count } => {
                self.metrics.record_collapsed();
                tracing::trace!(group, count, "collapsed duplicate message");
            }
            WriteOutcome::Inserted(evictions) => {
                self.metrics.record_inserted();
                if evictions.messages > 0 {
                    self.metrics.record_messages_evicted(evictions.messages as u64);
                }
                for span in &evictions.spans {
                    self.metrics.record_span_evicted();
                    tracing::debug!(group, span = %span, "evicted least recently active span");
                }
                for evicted in &evictions.groups {
                    self.metrics.record_group_evicted();
                    tracing::debug!(group = %evicted, "evicted least recently active group");
                }
            }
        }
    }

    /// Resume capturing writes.
    pub fn enable(&self) {
        self.state.write().enabled = true;
    }

    /// Stop capturing writes. Already captured messages stay readable.
    pub fn disable(&self) {
        self.state.write().enabled = false;
    }

    pub fn is_enabled(&self) -> bool {
        self.state.read().enabled
    }

    /// Names of all groups currently held, sorted by name.
    pub fn list_groups(&self) -> Vec<String> {
        self.state.read().group_names()
    }

    /// Names of the spans held for `group`, sorted by name. Empty when the
    /// group is unknown.
    pub fn list_spans(&self, group: &str) -> Vec<String> {
        self.state.read().span_names(group)
    }

    /// Entries of every span in `group`.
    ///
    /// Spans are ordered most recently active first; entries within a span
    /// newest first. An unknown group yields an empty vector.
    pub fn entries(&self, group: &str) -> Vec<Vec<LogEntry>> {
        let state = self.state.read();
        state
            .spans_by_recency(group)
            .into_iter()
            .map(|span| state.span_entries(group, span))
            .collect()
    }

    /// Render the store as formatted lines.
    ///
    /// Only groups starting with `group_prefix` and spans starting with
    /// `span_prefix` are included; an empty prefix matches everything. A
    /// matching group with no matching span maps to an empty span map.
    ///
    /// Each line reads `"<time> - [<LEVEL>] <message>"`, followed by
    /// `" [x<count>]"` for repeated messages. `<time>` is exact in
    /// `timezone` when `with_exact_time` is set, otherwise relative to now.
    /// Unknown time zones render in UTC.
    pub fn project(
        &self,
        timezone: &str,
        with_exact_time: bool,
        group_prefix: &str,
        span_prefix: &str,
    ) -> Projection {
        let state = self.state.read();
        // Read under the lock so no rendered entry is newer than `now`.
        let now = self.clock.now();

        let mut projection = Projection::new();
        for group in state.group_names() {
            if !group.starts_with(group_prefix) {
                continue;
            }

            let mut spans = BTreeMap::new();
            for span in state.span_names(&group) {
                if !span.starts_with(span_prefix) {
                    continue;
                }
                let lines = state
                    .span_entries(&group, &span)
                    .iter()
                    .map(|entry| entry.formatted_message(timezone, with_exact_time, &now))
                    .collect();
                spans.insert(span, lines);
            }

            projection.insert(group, spans);
        }
        projection
    }

    /// [`project`](Self::project) serialized as pretty JSON.
    #[cfg(feature = "json")]
    pub fn to_json(
        &self,
        timezone: &str,
        with_exact_time: bool,
        group_prefix: &str,
        span_prefix: &str,
    ) -> Result<String> {
        let projection = self.project(timezone, with_exact_time, group_prefix, span_prefix);
        Ok(serde_json::to_string_pretty(&projection)?)
    }

    /// Check capacity bounds and index consistency.
    ///
    /// Intended for tests and debugging; a healthy store always returns `Ok`.
    pub fn check_invariants(&self) -> Result<()> {
        self.state.read().verify(&self.config)
    }

    /// Effective configuration, with zero capacities replaced by defaults.
    pub fn config(&self) -> &TracelogConfig {
        &self.config
    }

    pub fn metrics(&self) -> &TracelogMetrics {
        &self.metrics
    }

    /// Logger bound to `(group, span)`.
    pub fn trace(self: &Arc<Self>, group: impl Into<String>, span: impl Into<String>) -> SpanLogger {
        SpanLogger::new(Arc::clone(self), group, span)
    }

    /// Logger bound to `group` with an empty span name; narrow it with
    /// [`SpanLogger::span`].
    pub fn group(self: &Arc<Self>, group: impl Into<String>) -> SpanLogger {
        SpanLogger::new(Arc::clone(self), group, "")
    }
}

impl Default for Tracelog {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for constructing a Tracelog with a fluent API
///
/// # Example
/// ```
/// use rust_tracelog::prelude::*;
///
/// let tracelog = Tracelog::builder()
///     .num_groups(4)
///     .num_spans(8)
///     .num_messages(16)
///     .build();
///
/// assert_eq!(tracelog.config().num_groups, 4);
/// assert!(tracelog.is_enabled());
/// ```
#[derive(Debug, Default)]
pub struct TracelogBuilder {
    config: TracelogConfig,
    clock: Option<Arc<dyn Clock>>,
}

impl TracelogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing configuration
    #[must_use = "builder methods return a new value"]
    pub fn config(mut self, config: TracelogConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn num_groups(mut self, num_groups: usize) -> Self {
        self.config.num_groups = num_groups;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn num_spans(mut self, num_spans: usize) -> Self {
        self.config.num_spans = num_spans;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn num_messages(mut self, num_messages: usize) -> Self {
        self.config.num_messages = num_messages;
        self
    }

    /// Whether the store captures writes from the start (default `true`)
    #[must_use = "builder methods return a new value"]
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.config.enabled = enabled;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn clock<C: Clock + 'static>(mut self, clock: C) -> Self {
        self.clock = Some(Arc::new(clock));
        self
    }

    pub fn build(self) -> Tracelog {
        match self.clock {
            Some(clock) => Tracelog::with_clock(self.config, clock),
            None => Tracelog::with_config(self.config),
        }
    }
}
