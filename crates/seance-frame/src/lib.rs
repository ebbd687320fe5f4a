//! Incremental frame codec for the Seance binary messaging protocol.
//!
//! Every frame on the wire carries:
//! - A 4-byte header (FIN/RSP/MASK flags, 5 reserved bits, opcode, 16-bit length)
//! - An 8-byte extended length when the inline length holds its escape value
//! - A message ID, an optional response-to ID, and an optional mask key
//! - A CRC32 over the frame image with the CRC field zeroed
//!
//! All multi-byte fields are big-endian. Decoding resumes across reads of any
//! size; nothing is delivered until the checksum verifies.

pub mod codec;
pub mod crc32;
pub mod decoder;
pub mod encoder;
pub mod endian;
pub mod error;
pub mod frame;
pub mod header;
pub mod mask;
pub mod opcode;
pub mod reader;
pub mod version;
pub mod writer;

pub use codec::{FrameCodec, FrameConfig, DEFAULT_MAX_PAYLOAD};
pub use decoder::{Feed, FrameDecoder};
pub use encoder::encode_frame;
pub use error::{FrameError, Result};
pub use frame::{Frame, Origin};
pub use header::{FrameHeader, LENGTH_ESCAPE, MAX_INLINE_LENGTH};
pub use opcode::{BINARY, CLOSE, CONTINUATION, EXTENSION, PING, SESSION, TEXT};
pub use reader::FrameReader;
pub use version::ProtocolVersion;
pub use writer::FrameWriter;
