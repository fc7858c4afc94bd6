//! Bounded group/span/entry storage and its eviction rules
//!
//! Span buckets live in one flat table keyed by `(group, span)`. Which spans
//! belong to a group, and which groups exist, is answered by the two recency
//! indexes: `group_ts` and `span_ts`. Every mutation keeps the table and both
//! indexes in step, so the key sets always agree.
//!
//! Nothing here locks; [`Tracelog`](super::tracelog::Tracelog) owns the
//! `RwLock` around a [`StoreState`] and calls into it with the lock held.

use super::config::TracelogConfig;
use super::error::{Result, TracelogError};
use super::log_entry::LogEntry;
use super::log_level::LogLevel;
use chrono::{DateTime, Utc};
use std::collections::HashMap;

type RecencyIndex = HashMap<String, DateTime<Utc>>;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) struct SpanKey {
    group: String,
    span: String,
}

impl SpanKey {
    fn new(group: &str, span: &str) -> Self {
        Self {
            group: group.to_owned(),
            span: span.to_owned(),
        }
    }
}

/// What a single write did to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum WriteOutcome {
    /// Merged into an existing identical entry.
    Collapsed { count: u32 },
    /// Added a new entry, possibly evicting to stay within capacity.
    Inserted(Evictions),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Evictions {
    /// Entries dropped from the tail of the written span.
    pub messages: usize,
    /// Spans evicted from the written group.
    pub spans: Vec<String>,
    /// Groups evicted from the store.
    pub groups: Vec<String>,
}

#[derive(Debug)]
pub(crate) struct StoreState {
    spans: HashMap<SpanKey, Vec<LogEntry>>,
    group_ts: RecencyIndex,
    span_ts: HashMap<String, RecencyIndex>,
    pub(crate) enabled: bool,
}

impl StoreState {
    pub(crate) fn new(enabled: bool) -> Self {
        Self {
            spans: HashMap::new(),
            group_ts: HashMap::new(),
            span_ts: HashMap::new(),
            enabled,
        }
    }

    /// Apply one write at `now`: dedup or insert, then enforce capacities.
    ///
    /// `message` must already be formatted, non-empty and length-clamped.
    pub(crate) fn record(
        &mut self,
        group: &str,
        span: &str,
        level: LogLevel,
        message: String,
        now: DateTime<Utc>,
        config: &TracelogConfig,
    ) -> WriteOutcome {
        // Recency reflects the latest activity, even for collapsed writes.
        let new_group = self.group_ts.insert(group.to_owned(), now).is_none();
        let new_span = self
            .span_ts
            .entry(group.to_owned())
            .or_default()
            .insert(span.to_owned(), now)
            .is_none();

        let bucket = self.spans.entry(SpanKey::new(group, span)).or_default();

        if let Some(pos) = bucket.iter().position(|e| e.matches(level, &message)) {
            let mut entry = bucket.remove(pos);
            entry.touch(now);
            let count = entry.count;
            bucket.insert(0, entry);
            sort_newest_first(bucket);
            return WriteOutcome::Collapsed { count };
        }

        bucket.insert(0, LogEntry::new(group, span, level, message, now));
        let mut evictions = Evictions {
            messages: bucket.len().saturating_sub(config.num_messages),
            ..Evictions::default()
        };
        bucket.truncate(config.num_messages);

        if new_span {
            evictions.spans = self.enforce_span_capacity(group, span, config.num_spans);
        }
        if new_group {
            evictions.groups = self.enforce_group_capacity(group, config.num_groups);
        }

        WriteOutcome::Inserted(evictions)
    }

    fn enforce_span_capacity(&mut self, group: &str, keep: &str, num_spans: usize) -> Vec<String> {
        let mut evicted = Vec::new();
        let Some(index) = self.span_ts.get_mut(group) else {
            return evicted;
        };

        while index.len() > num_spans {
            let Some(victim) = least_recent(index, keep) else {
                break;
            };
            index.remove(&victim);
            self.spans.remove(&SpanKey::new(group, &victim));
            evicted.push(victim);
        }
        evicted
    }

    fn enforce_group_capacity(&mut self, keep: &str, num_groups: usize) -> Vec<String> {
        let mut evicted = Vec::new();

        while self.group_ts.len() > num_groups {
            let Some(victim) = least_recent(&self.group_ts, keep) else {
                break;
            };
            self.remove_group(&victim);
            evicted.push(victim);
        }
        evicted
    }

    fn remove_group(&mut self, group: &str) {
        self.group_ts.remove(group);
        if let Some(spans) = self.span_ts.remove(group) {
            for span in spans.keys() {
                self.spans.remove(&SpanKey::new(group, span));
            }
        }
    }

    pub(crate) fn group_names(&self) -> Vec<String> {
        let mut groups: Vec<String> = self.group_ts.keys().cloned().collect();
        groups.sort_unstable();
        groups
    }

    pub(crate) fn span_names(&self, group: &str) -> Vec<String> {
        let mut spans: Vec<String> = self
            .span_ts
            .get(group)
            .map(|index| index.keys().cloned().collect())
            .unwrap_or_default();
        spans.sort_unstable();
        spans
    }

    /// Span names of `group`, most recently active first.
    pub(crate) fn spans_by_recency(&self, group: &str) -> Vec<&str> {
        let Some(index) = self.span_ts.get(group) else {
            return Vec::new();
        };
        let mut spans: Vec<(&str, &DateTime<Utc>)> =
            index.iter().map(|(name, ts)| (name.as_str(), ts)).collect();
        spans.sort_by(|(na, ta), (nb, tb)| tb.cmp(ta).then_with(|| na.cmp(nb)));
        spans.into_iter().map(|(name, _)| name).collect()
    }

    /// Entries of one span, newest first.
    pub(crate) fn span_entries(&self, group: &str, span: &str) -> Vec<LogEntry> {
        let mut entries = self
            .spans
            .get(&SpanKey::new(group, span))
            .cloned()
            .unwrap_or_default();
        sort_newest_first(&mut entries);
        entries
    }

    /// Check capacity bounds and that the span table and both recency
    /// indexes describe the same keys.
    pub(crate) fn verify(&self, config: &TracelogConfig) -> Result<()> {
        if self.group_ts.len() > config.num_groups {
            return Err(TracelogError::other(format!(
                "{} groups stored, capacity is {}",
                self.group_ts.len(),
                config.num_groups
            )));
        }
        if self.group_ts.len() != self.span_ts.len()
            || self.group_ts.keys().any(|g| !self.span_ts.contains_key(g))
        {
            return Err(TracelogError::other(
                "group recency index disagrees with span recency index",
            ));
        }

        let mut indexed_spans = 0;
        for (group, index) in &self.span_ts {
            if index.len() > config.num_spans {
                return Err(TracelogError::other(format!(
                    "group '{}' holds {} spans, capacity is {}",
                    group,
                    index.len(),
                    config.num_spans
                )));
            }
            for span in index.keys() {
                match self.spans.get(&SpanKey::new(group, span)) {
                    None => {
                        return Err(TracelogError::other(format!(
                            "span '{}/{}' is indexed but has no bucket",
                            group, span
                        )))
                    }
                    Some(bucket) if bucket.len() > config.num_messages => {
                        return Err(TracelogError::other(format!(
                            "span '{}/{}' holds {} messages, capacity is {}",
                            group,
                            span,
                            bucket.len(),
                            config.num_messages
                        )))
                    }
                    Some(_) => {}
                }
            }
            indexed_spans += index.len();
        }

        if indexed_spans != self.spans.len() {
            return Err(TracelogError::other(format!(
                "{} span buckets stored but {} spans indexed",
                self.spans.len(),
                indexed_spans
            )));
        }
        Ok(())
    }
}

/// Key with the oldest timestamp, never `keep`.
///
/// Equal timestamps are broken by the lexicographically smallest key so the
/// victim does not depend on map iteration order.
fn least_recent(index: &RecencyIndex, keep: &str) -> Option<String> {
    index
        .iter()
        .filter(|(key, _)| key.as_str() != keep)
        .min_by(|(ka, ta), (kb, tb)| ta.cmp(tb).then_with(|| ka.cmp(kb)))
        .map(|(key, _)| key.clone())
}

/// Stable descending sort by timestamp.
fn sort_newest_first(entries: &mut [LogEntry]) {
    entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
}
