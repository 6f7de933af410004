pub mod append;
pub mod unique_dir;

pub use append::append_bytes;
pub use unique_dir::{create_unique_dir, suffixed_name};
