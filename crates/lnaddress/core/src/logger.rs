//! Logging interface injected into every component.
//!
//! Nothing in this crate installs a global subscriber or consults a global switch. Components
//! log through the [`Logger`] they were handed; [`NoopLogger`] is the default and
//! [`TracingLogger`] forwards into whatever `tracing` subscriber the application installed.

pub use tracing::Level;

pub trait Logger: Send + Sync {
    fn log(&self, entry: LogEntry);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub line: String,
    pub level: Level,
}

impl LogEntry {
    pub fn new(level: Level, line: impl Into<String>) -> Self {
        Self {
            line: line.into(),
            level,
        }
    }
}

/// Drops every entry.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopLogger;

impl Logger for NoopLogger {
    fn log(&self, _entry: LogEntry) {}
}

/// Re-emits entries as `tracing` events under the `lnaddress` target.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn log(&self, entry: LogEntry) {
        let line = entry.line;
        if entry.level == Level::ERROR {
            tracing::error!(target: "lnaddress", "{line}");
        } else if entry.level == Level::WARN {
            tracing::warn!(target: "lnaddress", "{line}");
        } else if entry.level == Level::INFO {
            tracing::info!(target: "lnaddress", "{line}");
        } else if entry.level == Level::DEBUG {
            tracing::debug!(target: "lnaddress", "{line}");
        } else {
            tracing::trace!(target: "lnaddress", "{line}");
        }
    }
}

#[macro_export]
macro_rules! log_error {
    ($logger:expr, $($arg:tt)*) => {
        $logger.log($crate::logger::LogEntry::new($crate::logger::Level::ERROR, format!($($arg)*)))
    };
}

#[macro_export]
macro_rules! log_warn {
    ($logger:expr, $($arg:tt)*) => {
        $logger.log($crate::logger::LogEntry::new($crate::logger::Level::WARN, format!($($arg)*)))
    };
}

#[macro_export]
macro_rules! log_info {
    ($logger:expr, $($arg:tt)*) => {
        $logger.log($crate::logger::LogEntry::new($crate::logger::Level::INFO, format!($($arg)*)))
    };
}

#[macro_export]
macro_rules! log_debug {
    ($logger:expr, $($arg:tt)*) => {
        $logger.log($crate::logger::LogEntry::new($crate::logger::Level::DEBUG, format!($($arg)*)))
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::CollectingLogger;

    #[test]
    fn test_macros_forward_level_and_line() {
        let logger = CollectingLogger::default();
        let as_dyn: &dyn Logger = &logger;
        log_info!(as_dyn, "min. amount: {}", 1000);
        log_error!(as_dyn, "boom");

        let entries = logger.entries();
        assert_eq!(
            entries,
            vec![
                LogEntry::new(Level::INFO, "min. amount: 1000"),
                LogEntry::new(Level::ERROR, "boom"),
            ]
        );
    }

    #[test]
    fn test_noop_and_tracing_loggers_accept_entries() {
        NoopLogger.log(LogEntry::new(Level::WARN, "ignored"));
        // Without an installed subscriber the event is simply discarded.
        TracingLogger.log(LogEntry::new(Level::DEBUG, "discarded"));
    }
}
