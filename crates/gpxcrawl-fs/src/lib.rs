//! Filesystem primitives for crawl output.
//!
//! Two operations back every run:
//! - [`create_unique_dir`] claims a fresh run directory without ever reusing
//!   an existing one (`name`, `name(1)`, `name(2)`, ...)
//! - [`append_bytes`] appends one fetched page to a tile file and syncs it
//!   before returning, so earlier pages survive a later failure

mod error;
mod primitives;

pub use error::{Error, Result};
pub use primitives::{append_bytes, create_unique_dir, suffixed_name};
