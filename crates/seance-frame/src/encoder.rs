use bytes::{BufMut, Bytes, BytesMut};

use crate::frame::{frame_crc, Frame};

/// Encode a frame into the wire format.
///
/// Wire format:
/// ```text
/// ┌──────────┬──────────────┬──────────┬──────────────┬──────────┬──────────┬───────────┐
/// │ Header   │ Ext. length  │ Msg ID   │ Response-to  │ Mask     │ CRC32    │ Payload   │
/// │ (4B)     │ (8B BE)      │ (4B BE)  │ (4B BE)      │ (4B BE)  │ (4B BE)  │ (masked   │
/// │          │ if escaped   │          │ if RSP       │ if MASK  │          │  if MASK) │
/// └──────────┴──────────────┴──────────┴──────────────┴──────────┴──────────┴───────────┘
/// ```
pub fn encode_frame(frame: &Frame, dst: &mut BytesMut) {
    let header = frame.header();
    let wire_payload = frame.wire_payload();
    let crc = frame_crc(
        &header,
        frame.length(),
        frame.message_id(),
        frame.response_to(),
        frame.mask(),
        &wire_payload,
    );

    dst.reserve(frame.wire_size());
    dst.put_slice(&header.to_bytes());
    if header.is_extended() {
        dst.put_u64(frame.length());
    }
    dst.put_u32(frame.message_id());
    if let Some(id) = frame.response_to() {
        dst.put_u32(id);
    }
    if let Some(key) = frame.mask() {
        dst.put_u32(key);
    }
    dst.put_u32(crc);
    dst.put_slice(&wire_payload);
}

impl Frame {
    /// Serialize this frame into a standalone buffer.
    pub fn to_bytes(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(self.wire_size());
        encode_frame(self, &mut buf);
        buf.freeze()
    }
}
