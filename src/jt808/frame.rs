//! # JT808 Frame Extraction
//!
//! A frame on the wire is `7E <escaped payload> 7E`. Inside the payload the
//! delimiter and the escape byte are stuffed:
//!
//! | on the wire | payload byte |
//! |-------------|--------------|
//! | `7D 02`     | `7E`         |
//! | `7D 01`     | `7D`         |
//!
//! Extraction never fails. Missing delimiters and malformed escapes are
//! recorded as diagnostics and the bytes are carried through unchanged.

use crate::constants::{JT808_ESCAPE, JT808_ESCAPE_ESCAPE, JT808_ESCAPE_FLAG, JT808_FLAG};
use crate::error::{DecodeError, DecodeWarning};

/// Result of delimiter removal and unstuffing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedFrame {
    /// First byte of the input is `0x7E`.
    pub has_start_flag: bool,
    /// Last byte of the input is `0x7E`.
    pub has_end_flag: bool,
    /// Payload with delimiters removed, still stuffed.
    pub escaped_payload: Vec<u8>,
    /// Payload after escape substitution.
    pub payload: Vec<u8>,
    pub errors: Vec<DecodeError>,
    pub warnings: Vec<DecodeWarning>,
}

/// Strips the delimiters from `raw` and unstuffs what is between them.
///
/// Delimiters are only stripped when both are present; otherwise the whole
/// buffer is treated as payload and a `MissingFlags` warning is recorded.
pub fn extract_frame(raw: &[u8]) -> ExtractedFrame {
    let has_start_flag = raw.first() == Some(&JT808_FLAG);
    let has_end_flag = raw.last() == Some(&JT808_FLAG);

    let mut warnings = Vec::new();
    let escaped: &[u8] = if has_start_flag && has_end_flag && raw.len() >= 2 {
        &raw[1..raw.len() - 1]
    } else {
        log::debug!("Frame delimiters missing, decoding {} raw bytes", raw.len());
        warnings.push(DecodeWarning::MissingFlags);
        raw
    };

    let (payload, errors) = unescape_payload(escaped);

    ExtractedFrame {
        has_start_flag,
        has_end_flag,
        escaped_payload: escaped.to_vec(),
        payload,
        errors,
        warnings,
    }
}

/// Replaces `7D 02` with `7E` and `7D 01` with `7D`.
///
/// A `7D` followed by anything else, or by nothing, is kept as a literal
/// byte and the following byte is not consumed. Each occurrence produces an
/// `InvalidEscape` error carrying its offset in `escaped`.
pub fn unescape_payload(escaped: &[u8]) -> (Vec<u8>, Vec<DecodeError>) {
    let mut data = Vec::with_capacity(escaped.len());
    let mut errors = Vec::new();
    let mut i = 0;

    while i < escaped.len() {
        let byte = escaped[i];
        if byte != JT808_ESCAPE {
            data.push(byte);
            i += 1;
            continue;
        }
        match escaped.get(i + 1) {
            Some(&JT808_ESCAPE_FLAG) => {
                data.push(JT808_FLAG);
                i += 2;
            }
            Some(&JT808_ESCAPE_ESCAPE) => {
                data.push(JT808_ESCAPE);
                i += 2;
            }
            _ => {
                log::debug!("Invalid escape at offset {i}");
                errors.push(DecodeError::InvalidEscape { offset: i });
                data.push(byte);
                i += 1;
            }
        }
    }

    (data, errors)
}
