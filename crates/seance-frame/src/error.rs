/// Errors that can occur during frame encoding/decoding.
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    /// The frame header has one or more reserved bits set.
    #[error("reserved header bits set (rsv=0b{bits:05b})")]
    ReservedBits { bits: u8 },

    /// The extended length field carries a value that fits the inline field.
    #[error("non-canonical extended length {length} (fits the inline length field)")]
    NonCanonicalLength { length: u64 },

    /// The transmitted CRC32 disagrees with the one computed over the frame.
    #[error("crc mismatch (frame carries {expected:#010x}, computed {computed:#010x})")]
    CrcMismatch { expected: u32, computed: u32 },

    /// The payload exceeds the configured maximum size.
    #[error("payload too large ({size} bytes, max {max})")]
    PayloadTooLarge { size: u64, max: u64 },

    /// The decoder already delivered a frame or failed.
    #[error("decoder already finished")]
    DecoderFinished,

    /// An I/O error occurred while reading or writing frames.
    #[error("frame I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The connection was closed before a complete frame was received.
    #[error("connection closed (incomplete frame)")]
    ConnectionClosed,
}

impl FrameError {
    /// True for protocol violations after which the peer connection should be closed.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            Self::ReservedBits { .. } | Self::NonCanonicalLength { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, FrameError>;
