//! Well-known opcodes.
//!
//! Opcodes 0x0-0x7 are non-control frames, 0x8-0xF are control frames.
//! The codec never interprets payloads by opcode; these names exist for
//! dispatching and display in the layers above it.

/// Continuation of a fragmented message.
pub const CONTINUATION: u8 = 0x0;

/// UTF-8 text payload.
pub const TEXT: u8 = 0x1;

/// Binary payload.
pub const BINARY: u8 = 0x2;

/// Extension payload.
pub const EXTENSION: u8 = 0x3;

/// Close the connection.
pub const CLOSE: u8 = 0x8;

/// Ping/pong liveness check.
pub const PING: u8 = 0x9;

/// Establish a semi-persistent session.
pub const SESSION: u8 = 0xA;

/// First control opcode.
pub const CONTROL_START: u8 = 0x8;

/// Returns a human-readable name for an opcode.
pub fn opcode_name(opcode: u8) -> &'static str {
    match opcode {
        CONTINUATION => "CONTINUATION",
        TEXT => "TEXT",
        BINARY => "BINARY",
        EXTENSION => "EXTENSION",
        CLOSE => "CLOSE",
        PING => "PING",
        SESSION => "SESSION",
        0x4..=0x7 | 0xB..=0xF => "RESERVED",
        _ => "UNASSIGNED",
    }
}

/// Returns true if the opcode is in the control range.
pub fn is_control(opcode: u8) -> bool {
    (CONTROL_START..=0xF).contains(&opcode)
}

/// Returns true if the opcode is reserved for future protocol versions.
pub fn is_reserved(opcode: u8) -> bool {
    matches!(opcode, 0x4..=0x7 | 0xB..=0xF)
}
