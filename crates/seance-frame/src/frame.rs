use std::borrow::Cow;

use bytes::Bytes;

use crate::crc32;
use crate::endian;
use crate::header::FrameHeader;
use crate::mask::apply_mask;

/// High bit of a message ID, set on server-originated IDs.
pub const SERVER_ID_BIT: u32 = 0x8000_0000;

/// Which side of a session allocated a message ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    Client,
    Server,
}

impl Origin {
    /// Classify a message ID by its high bit.
    pub fn of(message_id: u32) -> Self {
        if message_id & SERVER_ID_BIT != 0 {
            Self::Server
        } else {
            Self::Client
        }
    }
}

/// A complete logical frame.
///
/// The payload is always held unmasked; masking exists only on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    fin: bool,
    opcode: u8,
    message_id: u32,
    response_to: Option<u32>,
    mask: Option<u32>,
    payload: Bytes,
}

impl Frame {
    /// Create a final, unmasked, non-response frame.
    pub fn new(opcode: u8, message_id: u32, payload: impl Into<Bytes>) -> Self {
        Self {
            fin: true,
            opcode,
            message_id,
            response_to: None,
            mask: None,
            payload: payload.into(),
        }
    }

    /// Set or clear the FIN flag.
    pub fn with_fin(mut self, fin: bool) -> Self {
        self.fin = fin;
        self
    }

    /// Mark this frame as a response to `message_id`.
    pub fn with_response_to(mut self, message_id: u32) -> Self {
        self.response_to = Some(message_id);
        self
    }

    /// Mask the payload on the wire with `key`.
    pub fn with_mask(mut self, key: u32) -> Self {
        self.mask = Some(key);
        self
    }

    pub(crate) fn from_parts(
        header: &FrameHeader,
        message_id: u32,
        response_to: Option<u32>,
        mask: Option<u32>,
        payload: Bytes,
    ) -> Self {
        Self {
            fin: header.fin,
            opcode: header.opcode,
            message_id,
            response_to,
            mask,
            payload,
        }
    }

    pub fn fin(&self) -> bool {
        self.fin
    }

    pub fn opcode(&self) -> u8 {
        self.opcode
    }

    pub fn message_id(&self) -> u32 {
        self.message_id
    }

    pub fn response_to(&self) -> Option<u32> {
        self.response_to
    }

    pub fn mask(&self) -> Option<u32> {
        self.mask
    }

    /// The unmasked payload.
    pub fn payload(&self) -> &Bytes {
        &self.payload
    }

    pub fn into_payload(self) -> Bytes {
        self.payload
    }

    /// Payload length in bytes.
    pub fn length(&self) -> u64 {
        self.payload.len() as u64
    }

    /// Which side allocated this frame's message ID.
    pub fn origin(&self) -> Origin {
        Origin::of(self.message_id)
    }

    /// The header this frame encodes with.
    pub fn header(&self) -> FrameHeader {
        FrameHeader::for_payload(
            self.fin,
            self.response_to.is_some(),
            self.mask.is_some(),
            self.opcode,
            self.length(),
        )
    }

    /// The total wire size of this frame.
    pub fn wire_size(&self) -> usize {
        let header = self.header();
        FrameHeader::SIZE + header.fields_size() + self.payload.len()
    }

    /// The CRC32 this frame carries on the wire.
    pub fn crc(&self) -> u32 {
        frame_crc(
            &self.header(),
            self.length(),
            self.message_id,
            self.response_to,
            self.mask,
            &self.wire_payload(),
        )
    }

    /// The payload as transmitted: masked when the frame carries a key.
    pub(crate) fn wire_payload(&self) -> Cow<'_, [u8]> {
        match self.mask {
            Some(key) => {
                let mut wire = self.payload.to_vec();
                apply_mask(&mut wire, key);
                Cow::Owned(wire)
            }
            None => Cow::Borrowed(&self.payload[..]),
        }
    }
}

/// CRC32 over the canonical frame image.
///
/// Covers, in order: flags and opcode, the extended length when the header
/// escapes, the message ID, the response-to ID and mask key when present, a
/// zeroed CRC field, and the payload exactly as transmitted.
pub(crate) fn frame_crc(
    header: &FrameHeader,
    length: u64,
    message_id: u32,
    response_to: Option<u32>,
    mask: Option<u32>,
    wire_payload: &[u8],
) -> u32 {
    let header_bytes = header.to_bytes();
    let mut crc = crc32::calculate(0, &header_bytes[..2]);
    if header.is_extended() {
        crc = crc32::calculate(crc, &endian::to_network_64(length).to_ne_bytes());
    }
    crc = crc32::calculate(crc, &endian::to_network_32(message_id).to_ne_bytes());
    if let Some(id) = response_to {
        crc = crc32::calculate(crc, &endian::to_network_32(id).to_ne_bytes());
    }
    if let Some(key) = mask {
        crc = crc32::calculate(crc, &endian::to_network_32(key).to_ne_bytes());
    }
    crc = crc32::calculate(crc, &[0u8; 4]);
    crc32::calculate(crc, wire_payload)
}
