//! Delimiter handling and byte unstuffing.

mod common;

use common::{build_frame, stuff};
use jt808_rs::jt808::frame::{extract_frame, unescape_payload};
use jt808_rs::{decode_frame, DecodeError, DecodeWarning};
use proptest::prelude::*;

#[test]
fn test_extract_delimited_frame() {
    let frame = build_frame(0x0002, 1, &[]);
    let extracted = extract_frame(&frame);
    assert!(extracted.has_start_flag);
    assert!(extracted.has_end_flag);
    assert!(extracted.warnings.is_empty());
    assert_eq!(extracted.payload.len(), 13);
}

#[test]
fn test_raw_payload_without_flags() {
    let frame = build_frame(0x0002, 1, &[]);
    let inner = &frame[1..frame.len() - 1];
    let result = decode_frame(inner);
    assert!(!result.has_start_flag);
    assert!(!result.has_end_flag);
    assert_eq!(result.warnings, vec![DecodeWarning::MissingFlags]);
    assert!(result.errors.is_empty());
    assert!(result.checksum_valid);
}

#[test]
fn test_only_start_flag() {
    let frame = build_frame(0x0002, 1, &[]);
    let result = decode_frame(&frame[..frame.len() - 1]);
    assert!(result.has_start_flag);
    assert!(!result.has_end_flag);
    assert_eq!(result.warnings[0], DecodeWarning::MissingFlags);
    // the leading 7E is now part of the payload
    assert_eq!(result.payload[0], 0x7E);
}

#[test]
fn test_invalid_escape_reported_per_occurrence() {
    let raw = [0x7E, 0x00, 0x7D, 0x05, 0x7D, 0x7E];
    let result = decode_frame(&raw);
    assert_eq!(result.payload, vec![0x00, 0x7D, 0x05, 0x7D]);
    assert_eq!(
        &result.errors[..2],
        &[
            DecodeError::InvalidEscape { offset: 1 },
            DecodeError::InvalidEscape { offset: 3 },
        ]
    );
}

#[test]
fn test_escaped_payload_is_kept() {
    let raw = [0x7E, 0x7D, 0x02, 0x7D, 0x01, 0x7E];
    let result = decode_frame(&raw);
    assert_eq!(result.escaped_payload, vec![0x7D, 0x02, 0x7D, 0x01]);
    assert_eq!(result.payload, vec![0x7E, 0x7D]);
}

#[test]
fn test_two_flags_only() {
    let result = decode_frame(&[0x7E, 0x7E]);
    assert!(result.payload.is_empty());
    assert_eq!(
        result.errors,
        vec![
            DecodeError::FrameTooShort { length: 0 },
            DecodeError::HeaderIncomplete { length: 0 },
        ]
    );
    assert_eq!(result.checksum, None);
    assert_eq!(result.checksum_computed, None);
    assert!(!result.checksum_valid);
}

proptest! {
    #[test]
    fn prop_unstuff_is_left_inverse_of_stuff(payload in proptest::collection::vec(any::<u8>(), 0..256)) {
        let (unstuffed, errors) = unescape_payload(&stuff(&payload));
        prop_assert!(errors.is_empty());
        prop_assert_eq!(unstuffed, payload);
    }

    #[test]
    fn prop_stuffed_frame_has_no_inner_delimiter(payload in proptest::collection::vec(any::<u8>(), 13..128)) {
        let stuffed = stuff(&payload);
        prop_assert!(!stuffed.contains(&0x7E));
    }

    #[test]
    fn prop_decode_never_panics(raw in proptest::collection::vec(any::<u8>(), 0..512)) {
        let result = decode_frame(&raw);
        if raw.is_empty() {
            prop_assert_eq!(result.errors, vec![DecodeError::EmptyMessage]);
        }
    }
}
