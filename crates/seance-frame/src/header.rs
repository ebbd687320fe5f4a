use crate::endian;
use crate::error::{FrameError, Result};

/// Inline length value signalling that an 8-byte extended length follows.
pub const LENGTH_ESCAPE: u16 = u16::MAX;

/// Largest payload length carried in the inline length field.
pub const MAX_INLINE_LENGTH: u16 = LENGTH_ESCAPE - 1;

const FIN_BIT: u8 = 0x80;
const RSP_BIT: u8 = 0x40;
const MASK_BIT: u8 = 0x20;
const RSV_BITS: u8 = 0x1F;

/// The fixed 4-byte leading header of every frame.
///
/// Wire layout:
/// ```text
/// ┌─┬─┬─┬───────┬──────────┬─────────────────────┐
/// │F│R│M│ RSV   │ Opcode   │ Length              │
/// │I│S│A│ (5b)  │ (1B)     │ (2B BE)             │
/// │N│P│S│ = 0   │          │ 65535 = extended    │
/// └─┴─┴─┴───────┴──────────┴─────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHeader {
    /// Final frame of a logical message.
    pub fin: bool,
    /// A response-to ID follows the message ID.
    pub rsp: bool,
    /// A mask key is present and the payload is masked.
    pub mask: bool,
    /// Message kind, carried through untouched.
    pub opcode: u8,
    /// Inline payload length, or [`LENGTH_ESCAPE`].
    pub length: u16,
}

impl FrameHeader {
    /// Size of the encoded header in bytes.
    pub const SIZE: usize = 4;

    /// Build the header describing a payload of `payload_len` bytes.
    pub fn for_payload(fin: bool, rsp: bool, mask: bool, opcode: u8, payload_len: u64) -> Self {
        let length = match u16::try_from(payload_len) {
            Ok(len) if len <= MAX_INLINE_LENGTH => len,
            _ => LENGTH_ESCAPE,
        };
        Self {
            fin,
            rsp,
            mask,
            opcode,
            length,
        }
    }

    /// Parse a raw header as read off the wire.
    ///
    /// Rejects any header with a reserved bit set.
    pub fn parse(bytes: [u8; Self::SIZE]) -> Result<Self> {
        let flags = bytes[0];
        let rsv = flags & RSV_BITS;
        if rsv != 0 {
            tracing::debug!(rsv, "rejecting header with reserved bits set");
            return Err(FrameError::ReservedBits { bits: rsv });
        }

        Ok(Self {
            fin: flags & FIN_BIT != 0,
            rsp: flags & RSP_BIT != 0,
            mask: flags & MASK_BIT != 0,
            opcode: bytes[1],
            length: endian::from_network_16(u16::from_ne_bytes([bytes[2], bytes[3]])),
        })
    }

    /// Parse the header at the front of `src` without consuming it.
    ///
    /// Returns `Ok(None)` if fewer than [`FrameHeader::SIZE`] bytes are buffered.
    pub fn peek(src: &[u8]) -> Result<Option<Self>> {
        match src.first_chunk::<4>() {
            Some(bytes) => Self::parse(*bytes).map(Some),
            None => Ok(None),
        }
    }

    /// Encode the header in wire order.
    pub fn to_bytes(self) -> [u8; Self::SIZE] {
        let mut flags = 0u8;
        if self.fin {
            flags |= FIN_BIT;
        }
        if self.rsp {
            flags |= RSP_BIT;
        }
        if self.mask {
            flags |= MASK_BIT;
        }
        let [hi, lo] = endian::to_network_16(self.length).to_ne_bytes();
        [flags, self.opcode, hi, lo]
    }

    /// True if an 8-byte extended length follows the header.
    pub fn is_extended(&self) -> bool {
        self.length == LENGTH_ESCAPE
    }

    /// Number of bytes between the header and the payload.
    pub fn fields_size(&self) -> usize {
        let mut size = 4 + 4; // message id + crc
        if self.is_extended() {
            size += 8;
        }
        if self.rsp {
            size += 4;
        }
        if self.mask {
            size += 4;
        }
        size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_flag_bits() {
        let header = FrameHeader::parse([0xE0, 0x09, 0x00, 0x05]).unwrap();
        assert!(header.fin);
        assert!(header.rsp);
        assert!(header.mask);
        assert_eq!(header.opcode, 0x09);
        assert_eq!(header.length, 5);

        let header = FrameHeader::parse([0x40, 0x01, 0x01, 0x02]).unwrap();
        assert!(!header.fin);
        assert!(header.rsp);
        assert!(!header.mask);
        assert_eq!(header.length, 0x0102);
    }

    #[test]
    fn rejects_every_reserved_bit() {
        for bit in 0..5 {
            let flags = 0x80 | (1u8 << bit);
            let err = FrameHeader::parse([flags, 0x02, 0x00, 0x00]).unwrap_err();
            assert!(matches!(err, FrameError::ReservedBits { bits } if bits == 1 << bit));
        }
    }

    #[test]
    fn encode_parse_roundtrip() {
        let header = FrameHeader {
            fin: true,
            rsp: false,
            mask: true,
            opcode: 0x0A,
            length: 300,
        };
        let bytes = header.to_bytes();
        assert_eq!(bytes, [0xA0, 0x0A, 0x01, 0x2C]);
        assert_eq!(FrameHeader::parse(bytes).unwrap(), header);
    }

    #[test]
    fn for_payload_escape_threshold() {
        let inline = FrameHeader::for_payload(true, false, false, 2, u64::from(MAX_INLINE_LENGTH));
        assert_eq!(inline.length, MAX_INLINE_LENGTH);
        assert!(!inline.is_extended());

        let extended =
            FrameHeader::for_payload(true, false, false, 2, u64::from(MAX_INLINE_LENGTH) + 1);
        assert_eq!(extended.length, LENGTH_ESCAPE);
        assert!(extended.is_extended());

        let huge = FrameHeader::for_payload(true, false, false, 2, u64::MAX);
        assert!(huge.is_extended());
    }

    #[test]
    fn peek_needs_four_bytes() {
        assert!(FrameHeader::peek(&[0x80, 0x02, 0x00]).unwrap().is_none());
        let header = FrameHeader::peek(&[0x80, 0x02, 0x00, 0x05, 0xFF]).unwrap().unwrap();
        assert_eq!(header.length, 5);
        assert!(FrameHeader::peek(&[0x81, 0x02, 0x00, 0x05]).is_err());
    }

    #[test]
    fn fields_size_tracks_optional_fields() {
        let mut header = FrameHeader::for_payload(true, false, false, 1, 3);
        assert_eq!(header.fields_size(), 8);
        header.rsp = true;
        header.mask = true;
        assert_eq!(header.fields_size(), 16);
        header.length = LENGTH_ESCAPE;
        assert_eq!(header.fields_size(), 24);
    }
}
