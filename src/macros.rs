//! Logging macros for ergonomic message formatting.
//!
//! These macros write through a [`SpanLogger`](crate::SpanLogger) with
//! `format!`-style arguments. Arguments are only formatted when the store is
//! enabled.
//!
//! # Examples
//!
//! ```
//! use rust_tracelog::prelude::*;
//! use rust_tracelog::info;
//! use std::sync::Arc;
//!
//! let tracelog = Arc::new(Tracelog::new());
//! let rpc = tracelog.trace("api", "rpc");
//!
//! info!(rpc, "Server started");
//!
//! let user_id = 42;
//! info!(rpc, "getUser id={}", user_id);
//! ```

/// Log a message at a given level with automatic formatting.
///
/// # Examples
///
/// ```
/// # use rust_tracelog::prelude::*;
/// # let tracelog = std::sync::Arc::new(Tracelog::new());
/// # let logger = tracelog.trace("g", "s");
/// use rust_tracelog::log;
/// log!(logger, LogLevel::Info, "Simple message");
/// log!(logger, LogLevel::Error, "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.log_args($level, format_args!($($arg)+))
    };
}

/// Log an info-level message.
///
/// # Examples
///
/// ```
/// # use rust_tracelog::prelude::*;
/// # let tracelog = std::sync::Arc::new(Tracelog::new());
/// # let logger = tracelog.trace("g", "s");
/// use rust_tracelog::info;
/// info!(logger, "Application started");
/// info!(logger, "Processing {} items", 100);
/// ```
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Info, $($arg)+)
    };
}

/// Log a warning-level message.
///
/// # Examples
///
/// ```
/// # use rust_tracelog::prelude::*;
/// # let tracelog = std::sync::Arc::new(Tracelog::new());
/// # let logger = tracelog.trace("g", "s");
/// use rust_tracelog::warn;
/// warn!(logger, "Low disk space");
/// warn!(logger, "Retry attempt {} of {}", 3, 5);
/// ```
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warn, $($arg)+)
    };
}

/// Log an error-level message.
///
/// # Examples
///
/// ```
/// # use rust_tracelog::prelude::*;
/// # let tracelog = std::sync::Arc::new(Tracelog::new());
/// # let logger = tracelog.trace("g", "s");
/// use rust_tracelog::error;
/// error!(logger, "Failed to connect to database");
/// error!(logger, "Error code: {}, message: {}", 500, "Internal error");
/// ```
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, $($arg)+)
    };
}
