use serde::{Deserialize, Serialize};

use crate::error::Result;

/// A request sent by the browser extension to the host.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct IncomingMessage {
    pub query: String,
}

/// A response from the host, either answering an [`IncomingMessage`] or
/// relaying a line received on the named pipe.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct OutgoingMessage {
    pub query: String,
    pub response: String,
}

/// Serialize an outgoing message to its JSON wire bytes.
pub fn encode_payload(msg: &OutgoingMessage) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec(msg)?)
}

/// Decode an inbound JSON payload.
///
/// Fails if the bytes are not valid JSON or do not match the message shape.
/// Callers treat this as non-fatal: the stdio loop logs the error and
/// proceeds with `IncomingMessage::default()`.
pub fn decode_payload(payload: &[u8]) -> Result<IncomingMessage> {
    Ok(serde_json::from_slice(payload)?)
}
