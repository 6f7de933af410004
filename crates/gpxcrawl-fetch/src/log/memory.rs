use std::fmt::Arguments;
use std::sync::{Mutex, PoisonError};

use super::sink::{LogLevel, Logger};

/// Keeps every event in memory, in arrival order.
#[derive(Debug, Default)]
pub struct MemoryLogger {
    events: Mutex<Vec<(LogLevel, String)>>,
}

impl MemoryLogger {
    pub fn new() -> Self { Self::default() }

    pub fn events(&self) -> Vec<(LogLevel, String)> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn lines(&self) -> Vec<String> { self.events().into_iter().map(|(_, line)| line).collect() }

    /// Number of recorded lines containing `needle`.
    pub fn count_containing(&self, needle: &str) -> usize {
        self.events()
            .iter()
            .filter(|(_, line)| line.contains(needle))
            .count()
    }
}

impl Logger for MemoryLogger {
    fn record(&self, level: LogLevel, args: Arguments<'_>) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((level, args.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{log_info, log_warn};

    #[test]
    fn test_records_in_order_with_levels() {
        let logger = MemoryLogger::new();
        log_info!(logger, "first {}", 1);
        log_warn!(logger, "second");
        assert_eq!(
            logger.events(),
            vec![
                (LogLevel::Info, "first 1".to_string()),
                (LogLevel::Warn, "second".to_string()),
            ]
        );
        assert_eq!(logger.count_containing("second"), 1);
    }
}
