use std::io::{ErrorKind, Write};

use bytes::{BufMut, BytesMut};

use crate::codec::{FrameConfig, LENGTH_PREFIX_SIZE};
use crate::error::{FrameError, Result};
use crate::message::{encode_payload, OutgoingMessage};

const INITIAL_BUFFER_CAPACITY: usize = 8 * 1024;

/// Writes length-prefixed frames to any `Write` stream.
///
/// Each frame (prefix and payload) is assembled into one buffer and written
/// as a unit, so a single `FrameWriter` never emits a partial frame between
/// messages. Exclusion between concurrent senders is the caller's job; the
/// host wraps this in a mutex-guarded sink.
pub struct FrameWriter<T> {
    inner: T,
    buf: BytesMut,
    config: FrameConfig,
}

impl<T: Write> FrameWriter<T> {
    /// Create a new frame writer with default configuration.
    pub fn new(inner: T) -> Self {
        Self::with_config(inner, FrameConfig::default())
    }

    /// Create a new frame writer with explicit configuration.
    pub fn with_config(inner: T, config: FrameConfig) -> Self {
        Self {
            inner,
            buf: BytesMut::with_capacity(INITIAL_BUFFER_CAPACITY),
            config,
        }
    }

    /// Encode and write one message as a single frame (blocking).
    pub fn send(&mut self, msg: &OutgoingMessage) -> Result<()> {
        let json = encode_payload(msg)?;
        if json.len() > u32::MAX as usize {
            return Err(FrameError::PayloadTooLarge {
                size: json.len(),
                max: u32::MAX as usize,
            });
        }

        self.buf.clear();
        self.buf.reserve(LENGTH_PREFIX_SIZE + json.len());
        self.buf
            .put_slice(&self.config.byte_order.encode_len(json.len() as u32));
        self.buf.put_slice(&json);

        let mut offset = 0usize;
        while offset < self.buf.len() {
            match self.inner.write(&self.buf[offset..]) {
                Ok(0) => return Err(FrameError::Closed),
                Ok(n) => offset += n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) if err.kind() == ErrorKind::WouldBlock => continue,
                Err(err) => return Err(FrameError::Io(err)),
            }
        }

        self.flush()
    }

    /// Flush the underlying stream.
    pub fn flush(&mut self) -> Result<()> {
        loop {
            match self.inner.flush() {
                Ok(()) => return Ok(()),
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) if err.kind() == ErrorKind::WouldBlock => continue,
                Err(err) => return Err(FrameError::Io(err)),
            }
        }
    }

    /// Borrow the underlying stream.
    pub fn get_ref(&self) -> &T {
        &self.inner
    }

    /// Mutably borrow the underlying stream.
    pub fn get_mut(&mut self) -> &mut T {
        &mut self.inner
    }

    /// Consume the writer and return the inner stream.
    pub fn into_inner(self) -> T {
        self.inner
    }

    /// Current frame writer configuration.
    pub fn config(&self) -> &FrameConfig {
        &self.config
    }
}
