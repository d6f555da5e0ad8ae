//! Tests for the hex and byte-level helpers.

use jt808_rs::payload::data_encoding::{ascii_or_hex, bcd_digits, be_uint, format_bcd_time};
use jt808_rs::util::hex::{
    decode_hex, encode_hex_upper, format_hex_compact, normalize_hex, sanitize_hex,
};
use jt808_rs::{decode_hex_str, DecodeError, HexError};

#[test]
fn test_sanitize_operator_input() {
    assert_eq!(sanitize_hex("7E 00 02"), "7E0002");
    assert_eq!(sanitize_hex("0x7E,0x00,0x02"), "7E0002");
    assert_eq!(sanitize_hex("7e-00:02\n"), "7e0002");
    assert_eq!(normalize_hex("0x7e 0x0a"), "7E0A");
}

#[test]
fn test_decode_hex_str_odd_and_empty() {
    assert_eq!(decode_hex_str("7E0"), Err(HexError::OddLength(3)));
    let empty = decode_hex_str("   ").unwrap();
    assert_eq!(empty.errors, vec![DecodeError::EmptyMessage]);
}

#[test]
fn test_decode_hex_errors() {
    assert_eq!(decode_hex("7G"), Err(HexError::InvalidCharacter('G')));
    assert_eq!(decode_hex("ABC"), Err(HexError::OddLength(3)));
    assert_eq!(decode_hex(" "), Ok(Vec::new()));
}

#[test]
fn test_hex_roundtrip_helpers() {
    let bytes = decode_hex("00 7e FF").unwrap();
    assert_eq!(bytes, vec![0x00, 0x7E, 0xFF]);
    assert_eq!(encode_hex_upper(&bytes), "007EFF");
    assert_eq!(format_hex_compact(&bytes), "00 7E FF");
}

#[test]
fn test_byte_codec() {
    assert_eq!(be_uint(&[0x01, 0x04], 0, 2), Some(260));
    assert_eq!(be_uint(&[0x01], 0, 2), None);
    assert_eq!(bcd_digits(&[0x34, 0x40, 0x50, 0x04, 0x93, 0x73]), "344050049373");
    assert_eq!(format_bcd_time(&[0x23, 0x12, 0x31, 0x23, 0x59, 0x59]), "23-12-31 23:59:59");
    assert_eq!(ascii_or_hex(b"\x01\x02"), "0102");
    assert_eq!(ascii_or_hex(b" TRK "), "TRK");
}
