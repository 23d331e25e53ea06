use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use tracing::{debug, info, warn};

use hostbridge_fifo::{FifoError, NamedPipe};
use hostbridge_frame::FrameError;

use crate::processor;
use crate::sink::ResponseSink;

/// Errors that end the pipe channel.
#[derive(Debug, thiserror::Error)]
pub enum PipeChannelError {
    #[error(transparent)]
    Fifo(#[from] FifoError),
    #[error(transparent)]
    Write(#[from] FrameError),
}

pub type Result<T> = std::result::Result<T, PipeChannelError>;

/// Run the pipe channel: ensure the FIFO exists, then serve writers until
/// the pipe cannot be (re)opened or the output stream fails.
///
/// The open is blocking and read-only; it parks until a writer appears.
/// End-of-stream means the writer disconnected, so the pipe is reopened for
/// the next one — this loop never finishes on its own, only on error.
pub fn run<W: Write>(path: &Path, sink: &ResponseSink<W>) -> Result<()> {
    let pipe = NamedPipe::ensure(path)?;

    loop {
        let file = pipe.open_reader()?;
        debug!(path = ?pipe.path(), "waiting for data on the named pipe");
        pump_lines(BufReader::new(file), sink)?;
        info!(path = ?pipe.path(), "pipe writer disconnected, reopening");
    }
}

/// Forward newline-terminated lines until end-of-stream.
///
/// Read errors are logged and treated like end-of-stream (the caller
/// reopens the pipe); only output write failures propagate.
fn pump_lines<R: BufRead, W: Write>(mut reader: R, sink: &ResponseSink<W>) -> Result<()> {
    let mut line = String::new();
    loop {
        line.clear();
        match reader.read_line(&mut line) {
            Ok(0) => return Ok(()),
            Ok(_) => {}
            Err(err) => {
                warn!(%err, "pipe read failed, treating as disconnect");
                return Ok(());
            }
        }

        let content = line.strip_suffix('\n').unwrap_or(&line);
        debug!(line = content, "received pipe line");
        sink.send(&processor::pipe_notification(content))?;
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use hostbridge_frame::{FrameConfig, FrameReader, OutgoingMessage};

    use super::*;

    fn responses(sink: ResponseSink<Vec<u8>>) -> Vec<OutgoingMessage> {
        let wire = sink.into_inner().into_inner();
        let mut reader = FrameReader::new(Cursor::new(wire));
        let mut out = Vec::new();
        while let Ok(frame) = reader.read_frame() {
            out.push(serde_json::from_slice(frame.payload()).expect("response should be json"));
        }
        out
    }

    #[test]
    fn each_line_becomes_one_notification() {
        let sink = ResponseSink::new(Vec::new(), FrameConfig::default());
        pump_lines(Cursor::new(&b"first\nsecond\n"[..]), &sink).unwrap();

        let responses = responses(sink);
        assert_eq!(responses.len(), 2);
        assert_eq!(responses[0].query, processor::PIPE_QUERY);
        assert_eq!(responses[0].response, "first");
        assert_eq!(responses[1].response, "second");
    }

    #[test]
    fn final_line_without_newline_is_still_forwarded() {
        let sink = ResponseSink::new(Vec::new(), FrameConfig::default());
        pump_lines(Cursor::new(&b"unterminated"[..]), &sink).unwrap();

        let responses = responses(sink);
        assert_eq!(responses.len(), 1);
        assert_eq!(responses[0].response, "unterminated");
    }

    #[test]
    fn read_error_is_a_disconnect_not_a_failure() {
        let sink = ResponseSink::new(Vec::new(), FrameConfig::default());
        // invalid UTF-8 makes read_line fail
        pump_lines(Cursor::new(&[0xff, 0xfe, b'\n'][..]), &sink).unwrap();
        assert!(responses(sink).is_empty());
    }

    #[test]
    fn write_failure_propagates() {
        let sink = ResponseSink::new(FailingWriter, FrameConfig::default());
        let err = pump_lines(Cursor::new(&b"line\n"[..]), &sink).unwrap_err();
        assert!(matches!(err, PipeChannelError::Write(_)));
    }

    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::from(std::io::ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    #[cfg(unix)]
    fn unusable_pipe_path_ends_the_channel() {
        let dir = std::env::temp_dir().join(format!(
            "hostbridge-pipe-fatal-{}-{}",
            std::process::id(),
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .expect("time should be after epoch")
                .as_nanos()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        // a regular file where a directory is needed makes ensure() fail
        let blocker = dir.join("blocker");
        std::fs::write(&blocker, b"file").unwrap();

        let sink = ResponseSink::new(Vec::new(), FrameConfig::default());
        let err = run(&blocker.join("agent.pipe"), &sink).unwrap_err();
        assert!(matches!(err, PipeChannelError::Fifo(_)));

        let _ = std::fs::remove_dir_all(&dir);
    }
}
