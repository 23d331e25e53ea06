use std::io::{Read, Write};

use tracing::{debug, info, warn};

use hostbridge_frame::{decode_payload, FrameError, FrameReader, IncomingMessage, Result};

use crate::processor;
use crate::sink::ResponseSink;

/// Run the stdio channel: read length-prefixed frames from `reader` until
/// the stream closes or a persistent error occurs.
///
/// Frame-level problems stay inside the loop: a truncated payload is
/// abandoned (counted and logged), a payload that fails JSON decode is
/// answered with the zero-value query so the extension is never left
/// without a response frame. Only stream closure, a persistent read error,
/// or an output write failure end the channel.
pub fn run<R: Read, W: Write>(mut reader: FrameReader<R>, sink: &ResponseSink<W>) -> Result<()> {
    let mut short_frames = 0u64;

    loop {
        let frame = match reader.read_frame() {
            Ok(frame) => frame,
            Err(FrameError::Closed) => {
                info!("stdin closed");
                return Ok(());
            }
            Err(err @ FrameError::ShortPayload { .. }) => {
                short_frames += 1;
                warn!(%err, short_frames, "abandoning incomplete frame");
                continue;
            }
            Err(err) => return Err(err),
        };

        debug!(
            declared_len = frame.declared_len(),
            truncated = frame.is_truncated(),
            "frame received"
        );

        let incoming = match decode_payload(frame.payload()) {
            Ok(msg) => msg,
            Err(err) => {
                warn!(%err, "payload did not decode, responding with empty query");
                IncomingMessage::default()
            }
        };

        sink.send(&processor::respond(&incoming))?;
    }
}
