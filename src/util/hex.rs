//! # Hex Encoding/Decoding Utilities
//!
//! This module provides the hex helpers used throughout the decoder for
//! turning operator input into bytes and for rendering byte slices in
//! diagnostics, report rows and logs.
//!
//! ## Usage
//!
//! ```rust
//! use jt808_rs::util::hex::{encode_hex_upper, decode_hex, sanitize_hex};
//!
//! let data = [0x7E, 0x00, 0x02];
//! assert_eq!(encode_hex_upper(&data), "7E0002");
//!
//! let decoded = decode_hex("7e 00 02").unwrap();
//! assert_eq!(decoded, data);
//!
//! assert_eq!(sanitize_hex("0x7E, 0x00"), "7E00");
//! ```

use thiserror::Error;

/// Errors that can occur during hex operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HexError {
    #[error("Invalid hex character: {0}")]
    InvalidCharacter(char),

    #[error("Odd number of hex characters: {0}")]
    OddLength(usize),
}

/// Encode bytes to uppercase hex string
///
/// This is the rendering used for every hex value the decoder reports.
pub fn encode_hex_upper(data: &[u8]) -> String {
    hex::encode_upper(data)
}

/// Decode hex string to bytes
///
/// Accepts both uppercase and lowercase hex characters.
/// Whitespace is automatically stripped. An empty string decodes to an
/// empty vector; the decoder reports empty input itself.
pub fn decode_hex(hex_str: &str) -> Result<Vec<u8>, HexError> {
    let cleaned: String = hex_str.chars().filter(|c| !c.is_whitespace()).collect();

    hex::decode(&cleaned).map_err(|e| match e {
        hex::FromHexError::InvalidHexCharacter { c, .. } => HexError::InvalidCharacter(c),
        _ => HexError::OddLength(cleaned.len()),
    })
}

/// Strip `0x` prefixes and every non-hex character from operator input.
///
/// `0x` is removed before the general filter so that `0x7E` yields `7E`
/// rather than `07E`.
pub fn sanitize_hex(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '0' && matches!(chars.peek(), Some('x') | Some('X')) {
            chars.next();
            continue;
        }
        if c.is_ascii_hexdigit() {
            out.push(c);
        }
    }
    out
}

/// Normalized form used as the history key: sanitized and uppercased.
pub fn normalize_hex(input: &str) -> String {
    sanitize_hex(input).to_ascii_uppercase()
}

/// Format hex data for compact display (useful for logs)
///
/// Formats data as "7E 00 02 00" with spaces between bytes.
pub fn format_hex_compact(data: &[u8]) -> String {
    data.iter()
        .map(|b| format!("{b:02X}"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Helper for creating test data from hex strings
///
/// Panics on invalid hex (intended for test code only).
pub fn hex_to_bytes(hex: &str) -> Vec<u8> {
    decode_hex(hex).expect("Invalid hex in test data")
}
