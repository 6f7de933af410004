use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to create directory {path}")]
    CreateDir {
        path:   PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to append to {path}")]
    Append {
        path:   PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no free directory name left for {base}")]
    Exhausted { base: PathBuf },
}

pub type Result<T> = std::result::Result<T, Error>;
