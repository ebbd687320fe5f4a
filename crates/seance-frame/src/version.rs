//! Protocol version strings.
//!
//! A version is four unsigned 16-bit parts, sent as eight network-order
//! bytes in the binary frame that opens a connection. Only the encoding and
//! the ordering live here; choosing a version is up to the session layer.

use std::fmt;

use bytes::{Buf, BufMut, BytesMut};

/// `MAJOR.MINOR.MICRO.BUILD`, ordered part by part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ProtocolVersion {
    pub major: u16,
    pub minor: u16,
    pub micro: u16,
    pub build: u16,
}

impl ProtocolVersion {
    /// Size of the encoded version in bytes.
    pub const SIZE: usize = 8;

    pub const fn new(major: u16, minor: u16, micro: u16, build: u16) -> Self {
        Self {
            major,
            minor,
            micro,
            build,
        }
    }

    /// Append the wire encoding to `dst`.
    pub fn encode(&self, dst: &mut BytesMut) {
        dst.reserve(Self::SIZE);
        dst.put_u16(self.major);
        dst.put_u16(self.minor);
        dst.put_u16(self.micro);
        dst.put_u16(self.build);
    }

    /// Parse a version payload. It must be exactly eight bytes.
    pub fn decode(mut payload: &[u8]) -> Option<Self> {
        if payload.len() != Self::SIZE {
            return None;
        }
        Some(Self {
            major: payload.get_u16(),
            minor: payload.get_u16(),
            micro: payload.get_u16(),
            build: payload.get_u16(),
        })
    }
}

impl fmt::Display for ProtocolVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}.{}.{}",
            self.major, self.minor, self.micro, self.build
        )
    }
}
