//! Loggers bound to a `(group, span)` pair

use super::log_level::LogLevel;
use super::tracelog::Tracelog;
use std::fmt;
use std::sync::Arc;

/// Cheap, cloneable handle that writes into a shared [`Tracelog`] under a
/// fixed group and span.
///
/// # Example
///
/// ```
/// use rust_tracelog::prelude::*;
/// use std::sync::Arc;
///
/// let tracelog = Arc::new(Tracelog::new());
/// let server = tracelog.group("server");
///
/// let run = server.span("run");
/// run.info("boot");
/// run.warn("slow start");
///
/// server.span("startServices").info("startAPI");
///
/// assert_eq!(tracelog.list_spans("server"), vec!["run", "startServices"]);
/// ```
#[derive(Debug, Clone)]
pub struct SpanLogger {
    tracelog: Arc<Tracelog>,
    group: String,
    span: String,
}

impl SpanLogger {
    pub(crate) fn new(
        tracelog: Arc<Tracelog>,
        group: impl Into<String>,
        span: impl Into<String>,
    ) -> Self {
        Self {
            tracelog,
            group: group.into(),
            span: span.into(),
        }
    }

    /// Same group, different span.
    #[must_use]
    pub fn span(&self, span: impl Into<String>) -> Self {
        Self::new(Arc::clone(&self.tracelog), self.group.clone(), span)
    }

    /// Same store, different group and span.
    #[must_use]
    pub fn with(&self, group: impl Into<String>, span: impl Into<String>) -> Self {
        Self::new(Arc::clone(&self.tracelog), group, span)
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    pub fn span_name(&self) -> &str {
        &self.span
    }

    pub fn tracelog(&self) -> &Arc<Tracelog> {
        &self.tracelog
    }

    pub fn log(&self, level: LogLevel, message: impl Into<String>) {
        self.tracelog.write(&self.group, &self.span, level, message);
    }

    /// Used by the logging macros; formats only when the store is enabled.
    pub fn log_args(&self, level: LogLevel, args: fmt::Arguments<'_>) {
        self.tracelog.write_args(&self.group, &self.span, level, args);
    }

    #[inline]
    pub fn info(&self, message: impl Into<String>) {
        self.log(LogLevel::Info, message);
    }

    #[inline]
    pub fn warn(&self, message: impl Into<String>) {
        self.log(LogLevel::Warn, message);
    }

    #[inline]
    pub fn error(&self, message: impl Into<String>) {
        self.log(LogLevel::Error, message);
    }
}
