//! Table-driven CRC-32 (ISO 3309 / RFC 1952).
//!
//! The lookup table is built on first use and shared by the whole process.
//! `OnceLock` gives the double-checked discipline: an unlocked check on the
//! hot path, and a lock held only while the table is being built.

use std::sync::OnceLock;

/// Reflected CRC-32 polynomial.
pub const POLYNOMIAL: u32 = 0xEDB8_8320;

static TABLE: OnceLock<[u32; 256]> = OnceLock::new();

fn table() -> &'static [u32; 256] {
    TABLE.get_or_init(|| {
        tracing::trace!("building crc32 lookup table");
        build_table()
    })
}

fn build_table() -> [u32; 256] {
    let mut table = [0u32; 256];
    for (i, slot) in table.iter_mut().enumerate() {
        let mut crc = i as u32;
        for _ in 0..8 {
            crc = (POLYNOMIAL * (crc & 1)) ^ (crc >> 1);
        }
        *slot = crc;
    }
    table
}

/// Continue a CRC-32 from `seed` over `bytes`.
///
/// Start with a seed of `0`. Feeding the result back in as the next seed
/// checksums separate buffers as one logical stream.
pub fn calculate(seed: u32, bytes: &[u8]) -> u32 {
    let table = table();
    let mut crc = seed ^ 0xFFFF_FFFF;
    for &byte in bytes {
        crc = table[((crc ^ u32::from(byte)) & 0xFF) as usize] ^ (crc >> 8);
    }
    crc ^ 0xFFFF_FFFF
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_value() {
        assert_eq!(calculate(0, b"123456789"), 0xCBF4_3926);
    }

    #[test]
    fn empty_input_returns_seed() {
        assert_eq!(calculate(0, b""), 0);
        assert_eq!(calculate(0x1234_5678, b""), 0x1234_5678);
    }

    #[test]
    fn known_table_entries() {
        let table = table();
        assert_eq!(table[0], 0);
        assert_eq!(table[1], 0x7707_3096);
        assert_eq!(table[255], 0x2D02_EF8D);
    }

    #[test]
    fn running_seed_matches_contiguous() {
        let data = b"the quick brown fox jumps over the lazy dog";
        let whole = calculate(0, data);
        for split in 0..=data.len() {
            let (a, b) = data.split_at(split);
            assert_eq!(calculate(calculate(0, a), b), whole, "split at {split}");
        }
    }

    #[test]
    fn concurrent_first_use_agrees() {
        let handles: Vec<_> = (0..8)
            .map(|_| std::thread::spawn(|| calculate(0, b"seance")))
            .collect();
        let results: Vec<u32> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert!(results.windows(2).all(|w| w[0] == w[1]));
        assert_eq!(results[0], calculate(0, b"seance"));
    }
}
