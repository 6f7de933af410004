use std::fmt::Arguments;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

/// Receiver of crawl events.
///
/// `record` is the only required method; the level helpers forward to it.
/// Implementations must be safe to share between workers.
pub trait Logger: Send + Sync {
    fn record(&self, level: LogLevel, args: Arguments<'_>);

    fn debug(&self, args: Arguments<'_>) { self.record(LogLevel::Debug, args) }

    fn info(&self, args: Arguments<'_>) { self.record(LogLevel::Info, args) }

    fn warn(&self, args: Arguments<'_>) { self.record(LogLevel::Warn, args) }

    fn error(&self, args: Arguments<'_>) { self.record(LogLevel::Error, args) }
}

#[macro_export]
macro_rules! log_debug {
    ($logger:expr, $($arg:tt)*) => {
        $logger.debug(format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_info {
    ($logger:expr, $($arg:tt)*) => {
        $logger.info(format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_warn {
    ($logger:expr, $($arg:tt)*) => {
        $logger.warn(format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_error {
    ($logger:expr, $($arg:tt)*) => {
        $logger.error(format_args!($($arg)*))
    };
}

/// Forwards every event to the `tracing` macros under the `gpxcrawl` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn record(&self, level: LogLevel, args: Arguments<'_>) {
        match level {
            LogLevel::Debug => tracing::debug!(target: "gpxcrawl", "{}", args),
            LogLevel::Info => tracing::info!(target: "gpxcrawl", "{}", args),
            LogLevel::Warn => tracing::warn!(target: "gpxcrawl", "{}", args),
            LogLevel::Error => tracing::error!(target: "gpxcrawl", "{}", args),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpLogger;

impl Logger for NoOpLogger {
    #[inline]
    fn record(&self, _level: LogLevel, _args: Arguments<'_>) {}
}
