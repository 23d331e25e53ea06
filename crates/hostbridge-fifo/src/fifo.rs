use std::ffi::CString;
use std::fs::File;
use std::os::unix::ffi::OsStrExt;
use std::os::unix::fs::{FileTypeExt, PermissionsExt};
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{FifoError, Result};

/// A filesystem-backed FIFO at a well-known path.
///
/// The pipe is created once at startup if absent and then reopened for
/// reading each time the writer side disconnects. The path is not removed
/// on drop: external writers locate the pipe by its fixed path and expect
/// it to survive host restarts.
pub struct NamedPipe {
    path: PathBuf,
}

impl NamedPipe {
    /// Permission mode for the created FIFO. World-readable/writable so any
    /// local process can deliver lines without coordinating uids.
    pub const DEFAULT_PIPE_MODE: u32 = 0o666;

    /// Ensure a FIFO exists at `path`, creating it if necessary.
    ///
    /// The parent directory is created if missing. A stale FIFO at the path
    /// is removed and recreated; an existing path that is not a FIFO is an
    /// error and is never removed.
    pub fn ensure(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        // Remove a stale fifo if present, but never remove non-fifo files.
        if path.exists() {
            let metadata = std::fs::symlink_metadata(&path).map_err(|e| FifoError::Create {
                path: path.clone(),
                source: e,
            })?;
            if !metadata.file_type().is_fifo() {
                return Err(FifoError::NotAFifo { path });
            }
            debug!(?path, "removing stale fifo");
            std::fs::remove_file(&path).map_err(|e| FifoError::Create {
                path: path.clone(),
                source: e,
            })?;
        }

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| FifoError::Create {
                path: path.clone(),
                source: e,
            })?;
        }

        mkfifo(&path, Self::DEFAULT_PIPE_MODE)?;

        // mkfifo modes are filtered through the umask; re-apply explicitly.
        std::fs::set_permissions(
            &path,
            std::fs::Permissions::from_mode(Self::DEFAULT_PIPE_MODE),
        )
        .map_err(|e| FifoError::Create {
            path: path.clone(),
            source: e,
        })?;

        info!(?path, "created named pipe");

        Ok(Self { path })
    }

    /// Open the FIFO for reading (blocking).
    ///
    /// Blocks until a writer opens the other end. Returns the open file;
    /// end-of-stream on the file means the writer side disconnected and the
    /// pipe should be reopened.
    pub fn open_reader(&self) -> Result<File> {
        let file = File::open(&self.path).map_err(|e| FifoError::Open {
            path: self.path.clone(),
            source: e,
        })?;
        debug!(path = ?self.path, "opened fifo for reading");
        Ok(file)
    }

    /// The path this pipe lives at.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn mkfifo(path: &Path, mode: u32) -> Result<()> {
    let c_path =
        CString::new(path.as_os_str().as_bytes()).map_err(|_| FifoError::InvalidPath {
            path: path.to_path_buf(),
        })?;

    let rc = unsafe { libc::mkfifo(c_path.as_ptr(), mode as libc::mode_t) };
    if rc != 0 {
        return Err(FifoError::Create {
            path: path.to_path_buf(),
            source: std::io::Error::last_os_error(),
        });
    }
    Ok(())
}
