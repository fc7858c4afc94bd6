//! Core trace store types

pub mod clock;
pub mod config;
pub mod error;
pub mod handle;
pub mod log_entry;
pub mod log_level;
pub mod metrics;
mod store;
pub mod timestamp;
pub mod tracelog;

pub use clock::{Clock, MockClock, SystemClock};
pub use config::{
    TracelogConfig, DEFAULT_GROUP_COUNT, DEFAULT_MESSAGE_COUNT, DEFAULT_SPAN_COUNT,
};
pub use error::{Result, TracelogError};
pub use handle::SpanLogger;
pub use log_entry::{LogEntry, MAX_MESSAGE_CHARS};
pub use log_level::LogLevel;
pub use metrics::TracelogMetrics;
pub use tracelog::{Projection, Tracelog, TracelogBuilder};
