use bytes::BytesMut;
use tracing::{debug, trace};

use crate::codec::DEFAULT_MAX_PAYLOAD;
use crate::endian;
use crate::error::{FrameError, Result};
use crate::frame::{frame_crc, Frame};
use crate::header::{FrameHeader, MAX_INLINE_LENGTH};
use crate::mask::apply_mask;

/// Outcome of feeding bytes to a [`FrameDecoder`].
#[derive(Debug)]
pub enum Feed {
    /// Every offered byte was absorbed and the frame still needs more data.
    Incomplete { consumed: usize },
    /// The frame is complete and its CRC verified. Bytes past `consumed`
    /// belong to whatever follows on the stream.
    Complete { frame: Frame, consumed: usize },
}

impl Feed {
    /// Number of input bytes absorbed by the call.
    pub fn consumed(&self) -> usize {
        match self {
            Self::Incomplete { consumed } | Self::Complete { consumed, .. } => *consumed,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    ExtendedLength,
    MessageId,
    ResponseTo,
    Mask,
    Crc,
    Payload,
    Finished,
}

/// Bytes gathered so far for the fixed-width field being decoded.
#[derive(Debug, Default)]
struct FieldBuf {
    bytes: [u8; 8],
    filled: usize,
}

impl FieldBuf {
    /// Move bytes off the front of `src` until `width` are held.
    ///
    /// Returns true once the field is complete.
    fn fill(&mut self, src: &mut &[u8], width: usize) -> bool {
        let take = (width - self.filled).min(src.len());
        self.bytes[self.filled..self.filled + take].copy_from_slice(&src[..take]);
        self.filled += take;
        *src = &src[take..];
        self.filled == width
    }

    fn take_u32(&mut self) -> u32 {
        let [a, b, c, d, ..] = self.bytes;
        self.filled = 0;
        endian::from_network_32(u32::from_ne_bytes([a, b, c, d]))
    }

    fn take_u64(&mut self) -> u64 {
        self.filled = 0;
        endian::from_network_64(u64::from_ne_bytes(self.bytes))
    }
}

/// Incremental decoder for the fields and payload that follow one header.
///
/// Feed it successive chunks with [`FrameDecoder::write`]. A partial field is
/// kept across calls, so chunk boundaries may fall anywhere. The decoder
/// never reads past the end of its frame and is finished once it has
/// delivered a frame or returned an error.
#[derive(Debug)]
pub struct FrameDecoder {
    header: FrameHeader,
    max_payload: u64,
    state: State,
    field: FieldBuf,
    length: Option<u64>,
    message_id: u32,
    response_to: Option<u32>,
    mask: Option<u32>,
    crc: u32,
    payload: BytesMut,
}

impl FrameDecoder {
    /// Create a decoder for a parsed header with the default payload limit.
    pub fn new(header: FrameHeader) -> Result<Self> {
        Self::with_max_payload(header, DEFAULT_MAX_PAYLOAD)
    }

    /// Create a decoder that rejects payloads longer than `max_payload`.
    ///
    /// An inline length over the limit is rejected here, before any buffer
    /// is allocated.
    pub fn with_max_payload(header: FrameHeader, max_payload: u64) -> Result<Self> {
        let mut decoder = Self {
            header,
            max_payload,
            state: State::ExtendedLength,
            field: FieldBuf::default(),
            length: None,
            message_id: 0,
            response_to: None,
            mask: None,
            crc: 0,
            payload: BytesMut::new(),
        };
        if !header.is_extended() {
            decoder.set_length(u64::from(header.length))?;
            decoder.state = State::MessageId;
        }
        Ok(decoder)
    }

    /// The header this decoder was built from.
    pub fn header(&self) -> &FrameHeader {
        &self.header
    }

    /// Payload length, once known.
    pub fn length(&self) -> Option<u64> {
        self.length
    }

    /// True once a frame was delivered or an error was returned.
    pub fn is_finished(&self) -> bool {
        self.state == State::Finished
    }

    /// Feed the next chunk of the stream.
    ///
    /// Consumes as much of `src` as the frame needs. Returns
    /// [`Feed::Incomplete`] when `src` ran out first, or [`Feed::Complete`]
    /// with the verified frame. Errors are fatal to the frame; so is any call
    /// after completion.
    pub fn write(&mut self, src: &[u8]) -> Result<Feed> {
        if self.state == State::Finished {
            return Err(FrameError::DecoderFinished);
        }
        self.advance(src).inspect_err(|_| {
            self.state = State::Finished;
            self.payload = BytesMut::new();
        })
    }

    fn advance(&mut self, src: &[u8]) -> Result<Feed> {
        let mut rest = src;
        loop {
            match self.state {
                State::ExtendedLength => {
                    if !self.field.fill(&mut rest, 8) {
                        break;
                    }
                    let length = self.field.take_u64();
                    if length <= u64::from(MAX_INLINE_LENGTH) {
                        return Err(FrameError::NonCanonicalLength { length });
                    }
                    self.set_length(length)?;
                    self.transition(State::MessageId);
                }
                State::MessageId => {
                    if !self.field.fill(&mut rest, 4) {
                        break;
                    }
                    self.message_id = self.field.take_u32();
                    self.transition(if self.header.rsp {
                        State::ResponseTo
                    } else {
                        self.after_response_to()
                    });
                }
                State::ResponseTo => {
                    if !self.field.fill(&mut rest, 4) {
                        break;
                    }
                    self.response_to = Some(self.field.take_u32());
                    self.transition(self.after_response_to());
                }
                State::Mask => {
                    if !self.field.fill(&mut rest, 4) {
                        break;
                    }
                    self.mask = Some(self.field.take_u32());
                    self.transition(State::Crc);
                }
                State::Crc => {
                    if !self.field.fill(&mut rest, 4) {
                        break;
                    }
                    self.crc = self.field.take_u32();
                    self.transition(State::Payload);
                }
                State::Payload => {
                    let remaining = self.length.unwrap_or(0) - self.payload.len() as u64;
                    if remaining == 0 {
                        let frame = self.finish()?;
                        return Ok(Feed::Complete {
                            frame,
                            consumed: src.len() - rest.len(),
                        });
                    }
                    if rest.is_empty() {
                        break;
                    }
                    let take =
                        usize::try_from(remaining).map_or(rest.len(), |r| r.min(rest.len()));
                    self.payload.extend_from_slice(&rest[..take]);
                    rest = &rest[take..];
                }
                State::Finished => return Err(FrameError::DecoderFinished),
            }
        }

        Ok(Feed::Incomplete {
            consumed: src.len() - rest.len(),
        })
    }

    fn after_response_to(&self) -> State {
        if self.header.mask {
            State::Mask
        } else {
            State::Crc
        }
    }

    fn transition(&mut self, next: State) {
        trace!(from = ?self.state, to = ?next, "frame decoder advanced");
        self.state = next;
    }

    fn set_length(&mut self, length: u64) -> Result<()> {
        if length > self.max_payload {
            return Err(FrameError::PayloadTooLarge {
                size: length,
                max: self.max_payload,
            });
        }
        let capacity = usize::try_from(length).map_err(|_| FrameError::PayloadTooLarge {
            size: length,
            max: usize::MAX as u64,
        })?;
        self.length = Some(length);
        self.payload = BytesMut::with_capacity(capacity);
        Ok(())
    }

    fn finish(&mut self) -> Result<Frame> {
        self.state = State::Finished;
        let length = self.length.unwrap_or(0);
        let computed = frame_crc(
            &self.header,
            length,
            self.message_id,
            self.response_to,
            self.mask,
            &self.payload,
        );
        if computed != self.crc {
            debug!(
                message_id = self.message_id,
                expected = self.crc,
                computed,
                "frame crc mismatch"
            );
            return Err(FrameError::CrcMismatch {
                expected: self.crc,
                computed,
            });
        }

        let mut payload = std::mem::take(&mut self.payload);
        if let Some(key) = self.mask {
            apply_mask(&mut payload, key);
        }
        trace!(message_id = self.message_id, length, "frame decoded");
        Ok(Frame::from_parts(
            &self.header,
            self.message_id,
            self.response_to,
            self.mask,
            payload.freeze(),
        ))
    }
}
