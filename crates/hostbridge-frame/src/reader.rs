use std::io::{ErrorKind, Read};

use tracing::warn;

use crate::codec::{FrameConfig, LENGTH_PREFIX_SIZE};
use crate::error::{FrameError, Result};

/// One inbound frame: the declared length and the payload bytes actually read.
///
/// The two differ only when the declared length exceeded the configured
/// buffer capacity, in which case the payload was truncated to capacity and
/// JSON decoding is expected (and allowed) to fail downstream.
#[derive(Debug, Clone)]
pub struct RawFrame {
    declared_len: usize,
    payload: Vec<u8>,
}

impl RawFrame {
    /// The length the peer declared in the frame prefix.
    pub fn declared_len(&self) -> usize {
        self.declared_len
    }

    /// The payload bytes read, at most the configured buffer capacity.
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Whether the payload was cut short of its declared length.
    pub fn is_truncated(&self) -> bool {
        self.payload.len() < self.declared_len
    }
}

/// Reads length-prefixed frames from any `Read` stream.
pub struct FrameReader<T> {
    inner: T,
    config: FrameConfig,
}

impl<T: Read> FrameReader<T> {
    /// Create a new frame reader with default configuration.
    pub fn new(inner: T) -> Self {
        Self::with_config(inner, FrameConfig::default())
    }

    /// Create a new frame reader with explicit configuration.
    pub fn with_config(inner: T, config: FrameConfig) -> Self {
        Self { inner, config }
    }

    /// Read the next frame (blocking).
    ///
    /// Returns `Err(FrameError::Closed)` when the stream ends at a frame
    /// boundary or inside the length prefix. A declared length above the
    /// buffer capacity yields a truncated [`RawFrame`] (logged, not an
    /// error); the declared length is trusted for sizing the read and the
    /// excess bytes are left in the stream. A stream that ends mid-payload
    /// yields `Err(FrameError::ShortPayload)`.
    pub fn read_frame(&mut self) -> Result<RawFrame> {
        let mut len_buf = [0u8; LENGTH_PREFIX_SIZE];
        match self.inner.read_exact(&mut len_buf) {
            Ok(()) => {}
            Err(err) if err.kind() == ErrorKind::UnexpectedEof => return Err(FrameError::Closed),
            Err(err) => return Err(FrameError::Io(err)),
        }

        let declared = self.config.byte_order.decode_len(&len_buf)? as usize;
        let to_read = declared.min(self.config.buffer_size);
        if declared > self.config.buffer_size {
            warn!(
                declared,
                capacity = self.config.buffer_size,
                "frame length exceeds buffer capacity, payload will be truncated"
            );
        }

        let mut payload = vec![0u8; to_read];
        let read = read_fill(&mut self.inner, &mut payload)?;
        if read < to_read {
            return Err(FrameError::ShortPayload {
                expected: declared,
                read,
            });
        }

        Ok(RawFrame {
            declared_len: declared,
            payload,
        })
    }

    /// Borrow the underlying stream.
    pub fn get_ref(&self) -> &T {
        &self.inner
    }

    /// Mutably borrow the underlying stream.
    pub fn get_mut(&mut self) -> &mut T {
        &mut self.inner
    }

    /// Consume the reader and return the inner stream.
    pub fn into_inner(self) -> T {
        self.inner
    }

    /// Current frame reader configuration.
    pub fn config(&self) -> &FrameConfig {
        &self.config
    }
}

/// Read until `buf` is full or the stream ends; returns bytes read.
fn read_fill<R: Read>(reader: &mut R, buf: &mut [u8]) -> std::io::Result<usize> {
    let mut filled = 0usize;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(err) if err.kind() == ErrorKind::Interrupted => continue,
            Err(err) => return Err(err),
        }
    }
    Ok(filled)
}
