//! Native messaging frame codec.
//!
//! The stdio wire format between a browser and its native host: a 4-byte
//! unsigned length in the *host's native byte order*, immediately followed
//! by that many bytes of UTF-8 JSON. No magic number, no version field, no
//! checksum — the peer is a process on the same machine.
//!
//! - [`ByteOrder`] — the native-order probe and length prefix codec
//! - [`IncomingMessage`] / [`OutgoingMessage`] — the JSON payload schema
//! - [`FrameReader`] / [`FrameWriter`] — framed I/O over any `Read`/`Write`

mod codec;
mod error;
mod message;
mod reader;
mod writer;

pub use codec::{ByteOrder, FrameConfig, DEFAULT_BUFFER_SIZE, LENGTH_PREFIX_SIZE};
pub use error::{FrameError, Result};
pub use message::{decode_payload, encode_payload, IncomingMessage, OutgoingMessage};
pub use reader::{FrameReader, RawFrame};
pub use writer::FrameWriter;
