//! TFRecord frame encoding with masked CRC32C checksums.
//!
//! Frame layout (all integers little-endian):
//! - length: u64
//! - length_crc: u32 (masked CRC32C of the 8 length bytes)
//! - payload: bytes[length]
//! - payload_crc: u32 (masked CRC32C of the payload)
//!
//! Records are concatenated with no separators; the framing is the
//! wire contract shared with every conformant reader, so the layout and
//! the masking constants below must never change.

use bytes::{BufMut, Bytes, BytesMut};

/// Bytes occupied by the length prefix.
pub const LENGTH_SIZE: usize = 8;
/// Bytes occupied by each checksum field.
pub const CRC_SIZE: usize = 4;
/// Length prefix plus its checksum.
pub const HEADER_SIZE: usize = LENGTH_SIZE + CRC_SIZE;
/// Trailing payload checksum.
pub const FOOTER_SIZE: usize = CRC_SIZE;

const MASK_DELTA: u32 = 0xa282_ead8;

/// Masks a raw CRC32C for storage.
///
/// Storing a CRC next to the data it covers means a reader that
/// misinterprets stored bytes (say, a payload as a length prefix) could
/// see an accidentally valid checksum. The rotate-and-offset makes that
/// vanishingly unlikely.
pub fn mask_crc(crc: u32) -> u32 {
    ((crc >> 15) | (crc << 17)).wrapping_add(MASK_DELTA)
}

/// Inverse of [`mask_crc`].
pub fn unmask_crc(masked: u32) -> u32 {
    let rot = masked.wrapping_sub(MASK_DELTA);
    (rot >> 17) | (rot << 15)
}

/// Masked CRC32C of `data`, as stored in a frame.
pub fn masked_crc32c(data: &[u8]) -> u32 {
    mask_crc(crc32c::crc32c(data))
}

/// Total encoded size of a frame carrying `payload_len` bytes.
pub fn encoded_len(payload_len: usize) -> usize {
    HEADER_SIZE + payload_len + FOOTER_SIZE
}

/// Encodes one record payload into its on-wire frame.
///
/// Never fails; every byte sequence, including the empty one, has a
/// valid frame.
pub fn encode(payload: &[u8]) -> Bytes {
    let mut buf = BytesMut::with_capacity(encoded_len(payload.len()));

    let len_bytes = (payload.len() as u64).to_le_bytes();
    buf.put_slice(&len_bytes);
    buf.put_u32_le(masked_crc32c(&len_bytes));
    buf.put_slice(payload);
    buf.put_u32_le(masked_crc32c(payload));

    buf.freeze()
}
