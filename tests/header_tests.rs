//! Header field extraction over complete and truncated content.

mod common;

use common::{content, wrap, DEVICE};
use jt808_rs::jt808::header::{decode_header, Properties, PropertyFlags};
use jt808_rs::{decode_frame, DecodeError, DecodeWarning};

#[test]
fn test_properties_fields() {
    // length 0x155, encryption 1, sub-package
    let props = Properties::from_raw(0x2555);
    assert_eq!(props.body_length, 0x155);
    assert_eq!(props.encryption_mode, 1);
    assert!(props.has_sub_package);
    assert!(!props.reserved14);
    assert!(!props.reserved15);
    assert_eq!(props.flags(), PropertyFlags::SUB_PACKAGE);
}

#[test]
fn test_reserved_bits() {
    let props = Properties::from_raw(0xC000);
    assert_eq!(props.body_length, 0);
    assert!(props.reserved14 && props.reserved15);
    assert!(!props.has_sub_package);
}

#[test]
fn test_encryption_mode_is_three_bits() {
    for mode in 0u16..8 {
        let props = Properties::from_raw(mode << 10);
        assert_eq!(u16::from(props.encryption_mode), mode);
        assert_eq!(props.body_length, 0);
    }
}

#[test]
fn test_device_id_bcd_with_invalid_nibbles() {
    let mut c = content(0x0002, 0, 1, &[]);
    c[4] = 0xAB;
    let header = decode_header(&c);
    let device = header.device_id.unwrap();
    assert_eq!(device.digits, format!("??{}", &DEVICE[2..]));
}

#[test]
fn test_truncated_header_keeps_present_fields() {
    // message id, properties and three device bytes, then the check code
    let payload = [0x02, 0x00, 0x00, 0x05, 0x01, 0x39, 0x12, 0xFF];
    let result = decode_frame(&payload);

    assert_eq!(
        result.errors,
        vec![
            DecodeError::FrameTooShort { length: 8 },
            DecodeError::HeaderIncomplete { length: 7 },
        ]
    );
    assert_eq!(result.message_id, Some(0x0200));
    assert_eq!(result.body_length(), Some(5));
    assert_eq!(result.device_id.unwrap().bytes, vec![0x01, 0x39, 0x12]);
    assert_eq!(result.sequence_number, None);
    assert!(result.body.is_empty());
    assert!(result.warnings.contains(&DecodeWarning::BodyShorterThanDeclared {
        declared: 5,
        available: 0
    }));
}

#[test]
fn test_single_byte_payload() {
    let result = decode_frame(&[0x7E, 0x42, 0x7E]);
    assert_eq!(result.checksum, Some(0x42));
    assert_eq!(result.message_id, None);
    assert_eq!(result.properties, None);
    assert!(result.body.is_empty());
    assert!(result.extra.is_empty());
    // no properties, so no body-length diagnostics
    assert!(result.warnings.is_empty());
}

#[test]
fn test_sub_package_flag_without_bytes() {
    let c = content(0x0900, 0x2000, 9, &[]);
    let result = decode_frame(&wrap(&c));
    assert_eq!(result.sub_package, None);
    assert_eq!(result.body_offset, 12);
    assert_eq!(result.warnings, vec![DecodeWarning::SubPackageMissing]);
    assert!(result.errors.is_empty());
}

#[test]
fn test_sub_package_shifts_body() {
    let mut body = vec![0x00, 0x02, 0x00, 0x02];
    body.extend_from_slice(b"AB");
    let c = content(0x0102, 0x2002, 9, &body);
    let result = decode_frame(&wrap(&c));
    assert!(result.warnings.is_empty());
    assert_eq!(result.body_offset, 16);
    assert_eq!(result.body, b"AB".to_vec());
    let line = &result.body_lines[0];
    assert_eq!(line.value.as_deref(), Some("AB"));
    assert_eq!(line.range.map(|r| (r.start, r.end)), Some((16, 17)));
}
