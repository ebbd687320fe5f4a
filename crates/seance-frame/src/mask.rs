//! Payload masking.
//!
//! Each byte of the 4-byte key, in network order, is XORed against the
//! payload cyclically. The transform is its own inverse.

/// XOR `buf` in place with the network-order bytes of `key`.
pub fn apply_mask(buf: &mut [u8], key: u32) {
    let key = key.to_be_bytes();
    for (i, byte) in buf.iter_mut().enumerate() {
        *byte ^= key[i % 4];
    }
}
