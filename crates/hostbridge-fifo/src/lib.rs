//! Named pipe (FIFO) lifecycle for the hostbridge native messaging host.
//!
//! A FIFO at a fixed well-known path is the side channel through which local
//! processes hand lines of text to the host. This crate owns creating that
//! pipe (directory ensured, stale pipe replaced, fixed permissions) and
//! opening it for reading; the reconnect-on-disconnect loop lives with the
//! channel reader in the host binary.
//!
//! Unix-only: the pipe is created with `mkfifo(3)`.

mod error;
mod fifo;

pub use error::{FifoError, Result};
pub use fifo::NamedPipe;
