/// Errors that can occur during frame encoding/decoding.
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    /// The length prefix is not exactly four bytes.
    #[error("length prefix must be 4 bytes, got {0}")]
    ShortLength(usize),

    /// The stream ended before a declared payload was fully read.
    #[error("short payload read ({read} of {expected} bytes)")]
    ShortPayload { expected: usize, read: usize },

    /// The payload exceeds what a u32 length prefix can describe.
    #[error("payload too large ({size} bytes, max {max})")]
    PayloadTooLarge { size: usize, max: usize },

    /// The payload is not the expected JSON shape.
    #[error("payload JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// An I/O error occurred while reading or writing frames.
    #[error("frame I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The stream was closed at a frame boundary or mid-frame.
    #[error("stream closed")]
    Closed,
}

pub type Result<T> = std::result::Result<T, FrameError>;
