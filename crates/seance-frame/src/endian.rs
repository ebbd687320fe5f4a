//! Host/network byte-order conversion.
//!
//! The 16- and 32-bit helpers mirror the classic `htons`/`htonl` family; the
//! 64-bit pair fills the gap those primitives leave. Host order is probed once
//! from the native layout of a known 16-bit constant rather than assumed from
//! the target architecture.

use std::sync::OnceLock;

static NETWORK_ENDIAN: OnceLock<bool> = OnceLock::new();

/// True iff the host's native byte order is network (big-endian) order.
pub fn is_network_endian() -> bool {
    *NETWORK_ENDIAN.get_or_init(|| 0xFF00u16.to_ne_bytes()[0] == 0xFF)
}

pub fn to_network_16(value: u16) -> u16 {
    value.to_be()
}

pub fn from_network_16(value: u16) -> u16 {
    u16::from_be(value)
}

pub fn to_network_32(value: u32) -> u32 {
    value.to_be()
}

pub fn from_network_32(value: u32) -> u32 {
    u32::from_be(value)
}

/// Convert a host-order `u64` to network order.
pub fn to_network_64(value: u64) -> u64 {
    if is_network_endian() {
        value
    } else {
        value.swap_bytes()
    }
}

/// Convert a network-order `u64` to host order.
///
/// Byte reversal is an involution, so this is the same transform as
/// [`to_network_64`].
pub fn from_network_64(value: u64) -> u64 {
    to_network_64(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLES: [u64; 4] = [0, 1, u64::MAX, 0xC0FF_EECA_FEC0_DE42];

    #[test]
    fn probe_matches_target_endianness() {
        assert_eq!(is_network_endian(), cfg!(target_endian = "big"));
    }

    #[test]
    fn round_trip_64() {
        for value in SAMPLES {
            assert_eq!(from_network_64(to_network_64(value)), value);
        }
    }

    #[test]
    fn network_64_native_bytes_are_big_endian() {
        let value = 0xC0FF_EECA_FEC0_DE42u64;
        assert_eq!(to_network_64(value).to_ne_bytes(), value.to_be_bytes());
        assert_eq!(
            from_network_64(u64::from_ne_bytes(value.to_be_bytes())),
            value
        );
    }

    #[test]
    fn byte_reversal_on_little_endian_hosts() {
        if !is_network_endian() {
            assert_eq!(to_network_64(0xC0FF_EECA_FEC0_DE42), 0x42DE_C0FE_CAEE_FFC0);
        }
    }

    #[test]
    fn narrow_conversions_agree_with_be_bytes() {
        assert_eq!(to_network_16(0x1234).to_ne_bytes(), [0x12, 0x34]);
        assert_eq!(to_network_32(0x1234_5678).to_ne_bytes(), [0x12, 0x34, 0x56, 0x78]);
        assert_eq!(from_network_16(u16::from_ne_bytes([0xAB, 0xCD])), 0xABCD);
        assert_eq!(
            from_network_32(u32::from_ne_bytes([0xDE, 0xAD, 0xBE, 0xEF])),
            0xDEAD_BEEF
        );
    }
}
