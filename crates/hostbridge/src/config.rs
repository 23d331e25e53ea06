use std::path::PathBuf;

/// Well-known path local agents write lines to.
pub const DEFAULT_PIPE_PATH: &str = "/tmp/hostbridge";

/// Default log file, relative to whatever working directory the browser
/// launches the host in.
pub const DEFAULT_LOG_FILE: &str = "hostbridge-log.txt";

/// Immutable host configuration, constructed once at startup from the CLI
/// and passed into the components that need it.
#[derive(Debug, Clone)]
pub struct HostConfig {
    /// Path of the named pipe the agent channel reads from.
    pub pipe_path: PathBuf,
    /// Read-buffer capacity for inbound stdio frames.
    pub buffer_size: usize,
}
