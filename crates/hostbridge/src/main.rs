mod config;
mod host;
mod logging;
mod pipe;
mod processor;
mod sink;
mod stdio;

use std::path::PathBuf;

use clap::Parser;

use crate::config::HostConfig;
use crate::logging::{init_logging, LogFormat, LogLevel};

#[derive(Parser, Debug)]
#[command(
    name = "hostbridge",
    version,
    about = "Browser native messaging host with a named-pipe side channel"
)]
struct Cli {
    /// Named pipe to accept local agent input on.
    #[arg(long, value_name = "PATH", default_value = config::DEFAULT_PIPE_PATH)]
    pipe_path: PathBuf,

    /// Read buffer capacity in bytes for inbound frames.
    #[arg(long, value_name = "BYTES", default_value_t = hostbridge_frame::DEFAULT_BUFFER_SIZE)]
    buffer_size: usize,

    /// Log file. Falls back to stderr if it cannot be opened.
    #[arg(long, value_name = "PATH", default_value = config::DEFAULT_LOG_FILE)]
    log_file: PathBuf,

    /// Log output format.
    #[arg(long, value_name = "FORMAT", default_value = "text")]
    log_format: LogFormat,

    /// Minimum log level.
    #[arg(long, value_name = "LEVEL", default_value = "info")]
    log_level: LogLevel,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_format, cli.log_level, &cli.log_file);

    let config = HostConfig {
        pipe_path: cli.pipe_path,
        buffer_size: cli.buffer_size,
    };

    if let Err(err) = host::run(config) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
