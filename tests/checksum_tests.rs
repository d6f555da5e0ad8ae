//! Check code computation and validation.

mod common;

use common::{content, wrap};
use jt808_rs::decode_frame;
use jt808_rs::jt808::checksum::{validate, xor_checksum};
use proptest::prelude::*;

#[test]
fn test_valid_and_corrupted_frames() {
    let frame = wrap(&content(0x0002, 0, 7, &[]));
    assert!(decode_frame(&frame).checksum_valid);

    let mut corrupted = frame.clone();
    corrupted[5] ^= 0x10;
    let result = decode_frame(&corrupted);
    assert!(!result.checksum_valid);
    assert_ne!(result.checksum, result.checksum_computed);
}

#[test]
fn test_all_zero_content_validates() {
    // XOR of zeros is zero, so an all-zero frame passes the check
    let mut payload = vec![0u8; 12];
    payload.push(0x00);
    let result = decode_frame(&payload);
    assert!(result.checksum_valid);
    assert_eq!(result.checksum_computed, Some(0x00));
    assert_eq!(result.message_id, Some(0x0000));
}

#[test]
fn test_no_content_is_never_valid() {
    assert_eq!(xor_checksum(&[]), None);
    let report = validate(&[], Some(0));
    assert!(!report.valid);
    assert_eq!(report.computed, None);
}

proptest! {
    #[test]
    fn prop_valid_iff_xor_matches(content in proptest::collection::vec(any::<u8>(), 1..64), received in any::<u8>()) {
        let expected = content.iter().fold(0u8, |acc, b| acc ^ b);
        let report = validate(&content, Some(received));
        prop_assert_eq!(report.computed, Some(expected));
        prop_assert_eq!(report.valid, received == expected);
    }

    #[test]
    fn prop_single_bit_flip_invalidates(
        content in proptest::collection::vec(any::<u8>(), 12..64),
        index in any::<prop::sample::Index>(),
        bit in 0u8..8,
    ) {
        let received = xor_checksum(&content);
        let mut flipped = content.clone();
        let i = index.index(flipped.len());
        flipped[i] ^= 1 << bit;
        prop_assert!(!validate(&flipped, received).valid);
    }
}
