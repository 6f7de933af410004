//! Logging collaborator.
//!
//! Components receive an `Arc<dyn Logger>` instead of writing to a global
//! sink. Production wiring uses [`TracingLogger`]; tests use [`MemoryLogger`]
//! to assert on the events a run produced, or [`NoOpLogger`] to stay quiet.
//!
//! ```
//! use gpxcrawl_fetch::log::{Logger, MemoryLogger};
//! use gpxcrawl_fetch::log_info;
//! use std::sync::Arc;
//!
//! let logger = Arc::new(MemoryLogger::new());
//! log_info!(logger, "Fetching GPS traces for bbox: {}, page: {}", "(0, 0, 1, 1)", 0);
//! assert_eq!(logger.lines().len(), 1);
//! ```

mod memory;
mod sink;

pub use memory::MemoryLogger;
pub use sink::{LogLevel, Logger, NoOpLogger, TracingLogger};
