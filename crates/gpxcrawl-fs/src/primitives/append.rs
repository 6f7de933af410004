use crate::{Error, Result};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

/// Append `content` to `path`, creating the file if it does not exist.
///
/// Bytes already in the file are never rewritten, and the new data is flushed
/// to stable storage before this returns.
pub fn append_bytes(path: impl AsRef<Path>, content: &[u8]) -> Result<()> {
    let path = path.as_ref();
    let append_err = |source| Error::Append {
        path: path.to_path_buf(),
        source,
    };

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(append_err)?;

    file.write_all(content).map_err(append_err)?;
    file.sync_data().map_err(append_err)?;

    Ok(())
}
