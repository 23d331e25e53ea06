use std::path::PathBuf;

/// Errors that can occur managing the named pipe.
#[derive(Debug, thiserror::Error)]
pub enum FifoError {
    /// Failed to create the FIFO at the specified path.
    #[error("failed to create fifo at {path}: {source}")]
    Create {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to open the FIFO for reading.
    #[error("failed to open fifo at {path}: {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The path exists but is not a FIFO.
    #[error("existing path is not a fifo: {path}")]
    NotAFifo { path: PathBuf },

    /// The path contains an interior NUL byte and cannot be passed to mkfifo.
    #[error("fifo path contains a NUL byte: {path}")]
    InvalidPath { path: PathBuf },
}

pub type Result<T> = std::result::Result<T, FifoError>;
