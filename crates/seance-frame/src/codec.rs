use bytes::{Buf, BytesMut};

use crate::decoder::{Feed, FrameDecoder};
use crate::encoder::encode_frame;
use crate::error::{FrameError, Result};
use crate::frame::Frame;
use crate::header::FrameHeader;

/// Default maximum payload size: 16 MiB.
pub const DEFAULT_MAX_PAYLOAD: u64 = 16 * 1024 * 1024;

/// Configuration for the frame codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameConfig {
    /// Maximum payload size in bytes, for both directions. Default: 16 MiB.
    pub max_payload_size: u64,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            max_payload_size: DEFAULT_MAX_PAYLOAD,
        }
    }
}

/// Stream-level codec: splits a byte stream into frames.
///
/// Holds at most one in-progress [`FrameDecoder`]. Bytes are taken off the
/// front of the caller's buffer as the decoder absorbs them, so whatever is
/// left belongs to the next frame.
#[derive(Debug, Default)]
pub struct FrameCodec {
    config: FrameConfig,
    pending: Option<FrameDecoder>,
}

impl FrameCodec {
    /// Create a codec with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a codec with explicit configuration.
    pub fn with_config(config: FrameConfig) -> Self {
        Self {
            config,
            pending: None,
        }
    }

    /// Current codec configuration.
    pub fn config(&self) -> &FrameConfig {
        &self.config
    }

    /// Update maximum payload size. Applies from the next header on.
    pub fn set_max_payload_size(&mut self, max_payload_size: u64) {
        self.config.max_payload_size = max_payload_size;
    }

    /// True if a frame has been started but not finished.
    pub fn is_mid_frame(&self) -> bool {
        self.pending.is_some()
    }

    /// Decode the next frame from `src`.
    ///
    /// Returns `Ok(None)` if the buffer doesn't contain a complete frame yet;
    /// the bytes seen so far are consumed and kept by the codec. On error the
    /// partial frame is dropped and the stream should be abandoned.
    pub fn decode_frame(&mut self, src: &mut BytesMut) -> Result<Option<Frame>> {
        if self.pending.is_none() {
            let Some(header) = FrameHeader::peek(src)? else {
                return Ok(None); // Need more data
            };
            let decoder = FrameDecoder::with_max_payload(header, self.config.max_payload_size)?;
            src.advance(FrameHeader::SIZE);
            self.pending = Some(decoder);
        }
        let Some(decoder) = self.pending.as_mut() else {
            return Ok(None);
        };

        match decoder.write(&src[..]) {
            Ok(Feed::Incomplete { consumed }) => {
                src.advance(consumed);
                Ok(None)
            }
            Ok(Feed::Complete { frame, consumed }) => {
                src.advance(consumed);
                self.pending = None;
                Ok(Some(frame))
            }
            Err(err) => {
                self.pending = None;
                Err(err)
            }
        }
    }

    /// Encode a frame, enforcing the configured payload limit.
    pub fn encode_frame(&self, frame: &Frame, dst: &mut BytesMut) -> Result<()> {
        if frame.length() > self.config.max_payload_size {
            return Err(FrameError::PayloadTooLarge {
                size: frame.length(),
                max: self.config.max_payload_size,
            });
        }
        encode_frame(frame, dst);
        Ok(())
    }
}

#[cfg(feature = "async")]
impl tokio_util::codec::Decoder for FrameCodec {
    type Item = Frame;
    type Error = FrameError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Frame>> {
        self.decode_frame(src)
    }

    // Bytes of a partial frame live inside the codec, not in `src`.
    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<Frame>> {
        match self.decode_frame(src)? {
            Some(frame) => Ok(Some(frame)),
            None if src.is_empty() && !self.is_mid_frame() => Ok(None),
            None => {
                self.pending = None;
                src.clear();
                Err(FrameError::ConnectionClosed)
            }
        }
    }
}

#[cfg(feature = "async")]
impl tokio_util::codec::Encoder<Frame> for FrameCodec {
    type Error = FrameError;

    fn encode(&mut self, frame: Frame, dst: &mut BytesMut) -> Result<()> {
        self.encode_frame(&frame, dst)
    }
}
