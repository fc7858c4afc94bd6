//! # Rust Tracelog
//!
//! A bounded, in-process store for recent diagnostic trace messages,
//! organized by `group` and `span`.
//!
//! ## Features
//!
//! - **Bounded Memory**: Capacity limits on groups, spans per group and messages per span
//! - **Recency Eviction**: The least recently active group, span or message is dropped first
//! - **Deduplication**: Repeated messages collapse into a single entry with a count
//! - **Thread Safe**: One `RwLock` per store; readers never block each other
//! - **On-demand Dumps**: Render recent activity as text lines or JSON

pub mod core;
pub mod macros;

pub mod prelude {
    pub use crate::core::{
        Clock, LogEntry, LogLevel, MockClock, Projection, Result, SpanLogger, SystemClock,
        Tracelog, TracelogBuilder, TracelogConfig, TracelogError, TracelogMetrics,
    };
}

pub use crate::core::{
    Clock, LogEntry, LogLevel, MockClock, Projection, Result, SpanLogger, SystemClock, Tracelog,
    TracelogBuilder, TracelogConfig, TracelogError, TracelogMetrics, DEFAULT_GROUP_COUNT,
    DEFAULT_MESSAGE_COUNT, DEFAULT_SPAN_COUNT, MAX_MESSAGE_CHARS,
};
