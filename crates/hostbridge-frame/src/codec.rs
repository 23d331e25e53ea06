use crate::error::{FrameError, Result};

/// Size of the length prefix preceding every payload.
pub const LENGTH_PREFIX_SIZE: usize = 4;

/// Default read-buffer capacity for inbound payloads.
///
/// Payloads whose declared length exceeds this are truncated on read; see
/// [`crate::FrameReader`].
pub const DEFAULT_BUFFER_SIZE: usize = 8192;

/// Byte order used for the length prefix on the wire.
///
/// The native messaging protocol frames lengths in the *host's* byte order,
/// not network order: the peer is the browser process on the same machine.
/// The order is probed once at startup and carried in [`FrameConfig`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ByteOrder {
    Little,
    Big,
}

impl ByteOrder {
    /// Determine the byte order of the running machine by probing the
    /// native representation of a two-byte integer.
    pub fn native() -> Self {
        let probe: u16 = 1;
        if probe.to_ne_bytes()[0] == 1 {
            ByteOrder::Little
        } else {
            ByteOrder::Big
        }
    }

    /// Encode a length as the 4-byte wire prefix.
    pub fn encode_len(self, n: u32) -> [u8; LENGTH_PREFIX_SIZE] {
        match self {
            ByteOrder::Little => n.to_le_bytes(),
            ByteOrder::Big => n.to_be_bytes(),
        }
    }

    /// Decode a 4-byte wire prefix back into a length.
    ///
    /// Fails unless exactly four bytes are supplied.
    pub fn decode_len(self, bytes: &[u8]) -> Result<u32> {
        let bytes: [u8; LENGTH_PREFIX_SIZE] = bytes
            .try_into()
            .map_err(|_| FrameError::ShortLength(bytes.len()))?;
        Ok(match self {
            ByteOrder::Little => u32::from_le_bytes(bytes),
            ByteOrder::Big => u32::from_be_bytes(bytes),
        })
    }
}

/// Configuration for the frame codec.
///
/// Constructed once at startup and passed by value into each reader/writer;
/// nothing here is process-global.
#[derive(Debug, Clone, Copy)]
pub struct FrameConfig {
    /// Read-buffer capacity in bytes. Inbound payloads declaring more than
    /// this are truncated to it. Default: 8 KiB.
    pub buffer_size: usize,
    /// Byte order for length prefixes. Default: the host's native order.
    pub byte_order: ByteOrder,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            buffer_size: DEFAULT_BUFFER_SIZE,
            byte_order: ByteOrder::native(),
        }
    }
}
