//! Store metrics for observability
//!
//! Counters describing what the write path did: how many entries were
//! recorded or collapsed, how many writes were skipped, and how much was
//! evicted at each level.

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics for trace store observability
///
/// # Example
///
/// ```
/// use rust_tracelog::TracelogMetrics;
///
/// let metrics = TracelogMetrics::new();
///
/// metrics.record_inserted();
/// metrics.record_collapsed();
///
/// assert_eq!(metrics.entries_inserted(), 1);
/// assert_eq!(metrics.writes_collapsed(), 1);
/// assert_eq!(metrics.total_writes(), 2);
/// ```
#[derive(Debug)]
pub struct TracelogMetrics {
    /// Writes that created a new entry
    entries_inserted: AtomicU64,

    /// Writes merged into an existing identical entry
    writes_collapsed: AtomicU64,

    /// Writes ignored because the store was disabled or the message was empty
    writes_skipped: AtomicU64,

    /// Messages shortened to the maximum length
    messages_truncated: AtomicU64,

    /// Entries dropped from the tail of a full span
    messages_evicted: AtomicU64,

    /// Spans evicted from a full group
    spans_evicted: AtomicU64,

    /// Groups evicted from a full store
    groups_evicted: AtomicU64,
}

impl TracelogMetrics {
    /// Create a new metrics instance with all counters at zero
    pub const fn new() -> Self {
        Self {
            entries_inserted: AtomicU64::new(0),
            writes_collapsed: AtomicU64::new(0),
            writes_skipped: AtomicU64::new(0),
            messages_truncated: AtomicU64::new(0),
            messages_evicted: AtomicU64::new(0),
            spans_evicted: AtomicU64::new(0),
            groups_evicted: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn entries_inserted(&self) -> u64 {
        self.entries_inserted.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn writes_collapsed(&self) -> u64 {
        self.writes_collapsed.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn writes_skipped(&self) -> u64 {
        self.writes_skipped.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn messages_truncated(&self) -> u64 {
        self.messages_truncated.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn messages_evicted(&self) -> u64 {
        self.messages_evicted.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn spans_evicted(&self) -> u64 {
        self.spans_evicted.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn groups_evicted(&self) -> u64 {
        self.groups_evicted.load(Ordering::Relaxed)
    }

    /// Writes that reached the store (inserted or collapsed)
    pub fn total_writes(&self) -> u64 {
        self.entries_inserted() + self.writes_collapsed()
    }

    #[inline]
    pub fn record_inserted(&self) -> u64 {
        self.entries_inserted.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_collapsed(&self) -> u64 {
        self.writes_collapsed.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_skipped(&self) -> u64 {
        self.writes_skipped.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_truncated(&self) -> u64 {
        self.messages_truncated.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_messages_evicted(&self, count: u64) -> u64 {
        self.messages_evicted.fetch_add(count, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_span_evicted(&self) -> u64 {
        self.spans_evicted.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_group_evicted(&self) -> u64 {
        self.groups_evicted.fetch_add(1, Ordering::Relaxed)
    }

    /// Fraction of writes that collapsed into an existing entry, as a
    /// percentage (0.0 - 100.0).
    ///
    /// Returns 0.0 if nothing has been written.
    pub fn collapse_rate(&self) -> f64 {
        let collapsed = self.writes_collapsed() as f64;
        let total = self.total_writes() as f64;
        if total == 0.0 {
            0.0
        } else {
            (collapsed / total) * 100.0
        }
    }

    /// Reset all metrics to zero
    pub fn reset(&self) {
        self.entries_inserted.store(0, Ordering::Relaxed);
        self.writes_collapsed.store(0, Ordering::Relaxed);
        self.writes_skipped.store(0, Ordering::Relaxed);
        self.messages_truncated.store(0, Ordering::Relaxed);
        self.messages_evicted.store(0, Ordering::Relaxed);
        self.spans_evicted.store(0, Ordering::Relaxed);
        self.groups_evicted.store(0, Ordering::Relaxed);
    }
}

impl Default for TracelogMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for TracelogMetrics {
    /// Create a snapshot of the current metrics values
    fn clone(&self) -> Self {
        Self {
            entries_inserted: AtomicU64::new(self.entries_inserted()),
            writes_collapsed: AtomicU64::new(self.writes_collapsed()),
            writes_skipped: AtomicU64::new(self.writes_skipped()),
            messages_truncated: AtomicU64::new(self.messages_truncated()),
            messages_evicted: AtomicU64::new(self.messages_evicted()),
            spans_evicted: AtomicU64::new(self.spans_evicted()),
            groups_evicted: AtomicU64::new(self.groups_evicted()),
        }
    }
}
