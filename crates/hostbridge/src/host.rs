use std::fmt;
use std::io;
use std::sync::mpsc;
use std::sync::Arc;
use std::thread;

use tracing::{error, info};

use hostbridge_frame::{ByteOrder, FrameConfig, FrameReader};

use crate::config::HostConfig;
use crate::pipe;
use crate::sink::ResponseSink;
use crate::stdio;

/// The two independent input channels racing to finish.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ChannelId {
    Stdio,
    Pipe,
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChannelId::Stdio => f.write_str("stdio"),
            ChannelId::Pipe => f.write_str("pipe"),
        }
    }
}

/// Run the host until either input channel finishes.
///
/// Both channel readers run as independent threads, each reporting on the
/// shared completion channel after logging its own outcome. This is a race,
/// not a join: the first completion shuts the process down, and the
/// surviving thread is reclaimed by process exit rather than cancelled.
pub fn run(config: HostConfig) -> io::Result<()> {
    let frame_config = FrameConfig {
        buffer_size: config.buffer_size,
        byte_order: ByteOrder::native(),
    };
    info!(
        byte_order = ?frame_config.byte_order,
        buffer_size = frame_config.buffer_size,
        pipe_path = ?config.pipe_path,
        "native messaging host started"
    );

    let sink = Arc::new(ResponseSink::new(io::stdout(), frame_config));
    let (done_tx, done_rx) = mpsc::channel();

    {
        let sink = Arc::clone(&sink);
        let done = done_tx.clone();
        thread::Builder::new()
            .name("stdio-reader".to_string())
            .spawn(move || {
                let reader = FrameReader::with_config(io::stdin(), frame_config);
                match stdio::run(reader, &sink) {
                    Ok(()) => info!("stdio channel finished"),
                    Err(err) => error!(%err, "stdio channel failed"),
                }
                let _ = done.send(ChannelId::Stdio);
            })?;
    }

    {
        let sink = Arc::clone(&sink);
        let pipe_path = config.pipe_path.clone();
        thread::Builder::new()
            .name("pipe-reader".to_string())
            .spawn(move || {
                match pipe::run(&pipe_path, &sink) {
                    Ok(()) => info!("pipe channel finished"),
                    Err(err) => error!(%err, "pipe channel failed"),
                }
                let _ = done_tx.send(ChannelId::Pipe);
            })?;
    }

    match done_rx.recv() {
        Ok(channel) => info!(%channel, "input channel finished first, exiting"),
        Err(_) => error!("channel readers stopped without reporting"),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_ids_display_by_name() {
        assert_eq!(ChannelId::Stdio.to_string(), "stdio");
        assert_eq!(ChannelId::Pipe.to_string(), "pipe");
    }
}
