use std::io::Write;
use std::sync::{Mutex, PoisonError};

use hostbridge_frame::{FrameConfig, FrameWriter, OutgoingMessage, Result};

/// Serializes frame writes from the two channel readers onto the single
/// shared output stream.
///
/// Both readers can produce output concurrently; the mutex guarantees each
/// frame's encode-then-write is atomic with respect to the other, so a
/// conformant reader of stdout never observes a torn frame.
pub struct ResponseSink<W> {
    writer: Mutex<FrameWriter<W>>,
}

impl<W: Write> ResponseSink<W> {
    pub fn new(inner: W, config: FrameConfig) -> Self {
        Self {
            writer: Mutex::new(FrameWriter::with_config(inner, config)),
        }
    }

    /// Encode and write one frame, exclusively against concurrent callers.
    ///
    /// A poisoned lock is absorbed: a panic on one channel thread must not
    /// wedge the surviving channel's output.
    pub fn send(&self, msg: &OutgoingMessage) -> Result<()> {
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        writer.send(msg)
    }

    #[cfg(test)]
    pub fn into_inner(self) -> FrameWriter<W> {
        self.writer
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use hostbridge_frame::{FrameReader, LENGTH_PREFIX_SIZE};

    use super::*;

    fn msg(query: &str, response: &str) -> OutgoingMessage {
        OutgoingMessage {
            query: query.to_string(),
            response: response.to_string(),
        }
    }

    #[test]
    fn sequential_sends_append_whole_frames() {
        let sink = ResponseSink::new(Vec::new(), FrameConfig::default());
        sink.send(&msg("a", "1")).unwrap();
        sink.send(&msg("b", "2")).unwrap();

        let wire = sink.into_inner().into_inner();
        let mut reader = FrameReader::new(Cursor::new(wire));
        assert_eq!(
            serde_json::from_slice::<OutgoingMessage>(reader.read_frame().unwrap().payload())
                .unwrap(),
            msg("a", "1")
        );
        assert_eq!(
            serde_json::from_slice::<OutgoingMessage>(reader.read_frame().unwrap().payload())
                .unwrap(),
            msg("b", "2")
        );
    }

    #[test]
    fn concurrent_senders_never_tear_frames() {
        const PER_THREAD: usize = 200;

        let sink = ResponseSink::new(Vec::new(), FrameConfig::default());

        std::thread::scope(|scope| {
            for channel in ["stdio", "pipe"] {
                let sink = &sink;
                scope.spawn(move || {
                    for i in 0..PER_THREAD {
                        sink.send(&msg(channel, &format!("{channel}-{i}"))).unwrap();
                    }
                });
            }
        });

        let wire = sink.into_inner().into_inner();
        let mut reader = FrameReader::new(Cursor::new(wire));
        let mut seen = 0usize;
        loop {
            let frame = match reader.read_frame() {
                Ok(frame) => frame,
                Err(hostbridge_frame::FrameError::Closed) => break,
                Err(err) => panic!("malformed frame in output: {err}"),
            };
            assert_eq!(frame.declared_len(), frame.payload().len());
            let body: OutgoingMessage = serde_json::from_slice(frame.payload())
                .expect("every frame payload should be intact JSON");
            assert!(body.response.starts_with(&body.query));
            seen += 1;
        }
        assert_eq!(seen, 2 * PER_THREAD);
    }

    #[test]
    fn frame_layout_is_prefix_then_payload() {
        let sink = ResponseSink::new(Vec::new(), FrameConfig::default());
        sink.send(&msg("q", "r")).unwrap();

        let wire = sink.into_inner().into_inner();
        let config = FrameConfig::default();
        let declared = config
            .byte_order
            .decode_len(&wire[..LENGTH_PREFIX_SIZE])
            .unwrap() as usize;
        assert_eq!(declared, wire.len() - LENGTH_PREFIX_SIZE);
    }
}
