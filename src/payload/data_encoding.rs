//! # JT808 Data Encoding and Decoding
//!
//! This module provides the byte-level primitives the body decoders are built
//! from: big-endian integers, BCD digits and timestamps, and the
//! printable-ASCII rendering used for identifiers and strings.
//!
//! None of these fail. Out-of-range reads return `None` and invalid BCD
//! nibbles render as `?`, so callers can keep decoding malformed frames.

use crate::util::hex::encode_hex_upper;

/// Reads `length` bytes at `offset` as an unsigned big-endian integer.
///
/// Returns `None` when the span runs past the end of `bytes`, or when it is
/// wider than 8 bytes. A zero-length read yields `Some(0)`.
pub fn be_uint(bytes: &[u8], offset: usize, length: usize) -> Option<u64> {
    if length > 8 {
        return None;
    }
    let end = offset.checked_add(length)?;
    let span = bytes.get(offset..end)?;
    Some(span.iter().fold(0u64, |acc, b| (acc << 8) | u64::from(*b)))
}

/// Big-endian 16-bit word at `offset`.
pub fn word_at(bytes: &[u8], offset: usize) -> Option<u16> {
    be_uint(bytes, offset, 2).map(|v| v as u16)
}

/// Big-endian 32-bit double word at `offset`.
pub fn dword_at(bytes: &[u8], offset: usize) -> Option<u32> {
    be_uint(bytes, offset, 4).map(|v| v as u32)
}

/// Renders each byte as two decimal digits, high nibble first.
///
/// Nibbles 0xA-0xF render as `?` instead of failing.
pub fn bcd_digits(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        out.push(bcd_nibble(byte >> 4));
        out.push(bcd_nibble(byte & 0x0F));
    }
    out
}

fn bcd_nibble(nibble: u8) -> char {
    if nibble <= 9 {
        char::from(b'0' + nibble)
    } else {
        '?'
    }
}

/// Formats a 6-byte BCD timestamp as `YY-MM-DD HH:MM:SS`.
///
/// With fewer than 12 digits available the raw digits are returned.
pub fn format_bcd_time(bytes: &[u8]) -> String {
    let digits = bcd_digits(bytes);
    if digits.len() < 12 {
        return digits;
    }
    format!(
        "{}-{}-{} {}:{}:{}",
        &digits[0..2],
        &digits[2..4],
        &digits[4..6],
        &digits[6..8],
        &digits[8..10],
        &digits[10..12]
    )
}

/// Keeps printable ASCII (0x20-0x7E), drops everything else, trims.
pub fn ascii_printable(bytes: &[u8]) -> String {
    let kept: String = bytes
        .iter()
        .filter(|b| (0x20..=0x7E).contains(*b))
        .map(|b| char::from(*b))
        .collect();
    kept.trim().to_string()
}

/// Printable ASCII if any survives, otherwise uppercase hex.
pub fn ascii_or_hex(bytes: &[u8]) -> String {
    let ascii = ascii_printable(bytes);
    if ascii.is_empty() {
        encode_hex_upper(bytes)
    } else {
        ascii
    }
}
