use crate::{Error, Result};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

const MAX_SUFFIX: u32 = 100_000;

/// Name of the `n`-th candidate for `base`: `base` itself for 0, then
/// `base(1)`, `base(2)`, ...
pub fn suffixed_name(base: &str, n: u32) -> String {
    if n == 0 { base.to_string() } else { format!("{base}({n})") }
}

/// Create a directory under `parent` that did not exist before this call.
///
/// Each candidate is claimed with a single `create_dir`, so two callers racing
/// on the same base name always end up with different directories.
pub fn create_unique_dir(parent: impl AsRef<Path>, base: &str) -> Result<PathBuf> {
    let parent = parent.as_ref();
    if !parent.as_os_str().is_empty() {
        std::fs::create_dir_all(parent).map_err(|e| Error::CreateDir {
            path:   parent.to_path_buf(),
            source: e,
        })?;
    }

    for n in 0..=MAX_SUFFIX {
        let candidate = parent.join(suffixed_name(base, n));
        match std::fs::create_dir(&candidate) {
            Ok(()) => return Ok(candidate),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
            Err(e) => {
                return Err(Error::CreateDir {
                    path:   candidate,
                    source: e,
                });
            },
        }
    }

    Err(Error::Exhausted {
        base: parent.join(base),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_suffixed_name() {
        assert_eq!(suffixed_name("gps_traces", 0), "gps_traces");
        assert_eq!(suffixed_name("gps_traces", 1), "gps_traces(1)");
        assert_eq!(suffixed_name("gps_traces", 12), "gps_traces(12)");
    }

    #[test]
    fn test_first_run_uses_base_name() -> Result<()> {
        let dir = tempdir().unwrap();
        let path = create_unique_dir(dir.path(), "gps_traces")?;
        assert_eq!(path, dir.path().join("gps_traces"));
        assert!(path.is_dir());
        Ok(())
    }

    #[test]
    fn test_collision_appends_suffix() -> Result<()> {
        let dir = tempdir().unwrap();
        let first = create_unique_dir(dir.path(), "gps_traces")?;
        let second = create_unique_dir(dir.path(), "gps_traces")?;
        let third = create_unique_dir(dir.path(), "gps_traces")?;
        assert_eq!(first, dir.path().join("gps_traces"));
        assert_eq!(second, dir.path().join("gps_traces(1)"));
        assert_eq!(third, dir.path().join("gps_traces(2)"));
        assert!(first.is_dir() && second.is_dir() && third.is_dir());
        Ok(())
    }

    #[test]
    fn test_skips_existing_file_with_same_name() -> Result<()> {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("gps_traces"), b"not a dir").unwrap();
        let path = create_unique_dir(dir.path(), "gps_traces")?;
        assert_eq!(path, dir.path().join("gps_traces(1)"));
        Ok(())
    }

    #[test]
    fn test_creates_missing_parent() -> Result<()> {
        let dir = tempdir().unwrap();
        let parent = dir.path().join("a").join("b");
        let path = create_unique_dir(&parent, "run")?;
        assert_eq!(path, parent.join("run"));
        assert!(path.is_dir());
        Ok(())
    }

    #[test]
    fn test_parent_is_a_file() {
        let dir = tempdir().unwrap();
        let parent = dir.path().join("file");
        std::fs::write(&parent, b"x").unwrap();
        let err = create_unique_dir(&parent, "run").unwrap_err();
        assert!(matches!(err, Error::CreateDir { .. }));
    }
}
