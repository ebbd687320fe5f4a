//! Seance message framing.
//!
//! A Seance frame carries an opcode byte, a message id, an optional
//! response-to id, an optional payload mask, and a CRC32. The checksum
//! covers the flag and opcode bytes, any extended length, the ids, the mask
//! key, the CRC field as zeros, and the payload as sent. The inline length
//! bytes are not part of it.
//!
//! The codec lives in `seance-frame`; this crate re-exports it and ships the
//! `seance` binary (behind the `cli` feature) for encoding and inspecting
//! frames.
//!
//! # Crate Structure
//!
//! - [`frame`]: frame model, incremental decoder, encoder, and stream codec

/// Re-export frame types.
pub mod frame {
    pub use seance_frame::*;
}
