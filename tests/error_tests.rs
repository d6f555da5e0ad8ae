//! Display and serialization of the crate's error and diagnostic types.

use jt808_rs::{DecodeError, DecodeWarning, HexError, Jt808Error};

#[test]
fn test_decode_error_messages() {
    assert_eq!(DecodeError::EmptyMessage.to_string(), "empty message");
    assert_eq!(
        DecodeError::InvalidEscape { offset: 7 }.to_string(),
        "invalid escape sequence at offset 7: 0x7D not followed by 0x01/0x02"
    );
    assert_eq!(
        DecodeError::FrameTooShort { length: 4 }.to_string(),
        "payload too short for header + checksum: 4 bytes (minimum 13)"
    );
    assert_eq!(
        DecodeError::HeaderIncomplete { length: 3 }.to_string(),
        "header incomplete: 3 bytes (minimum 12)"
    );
}

#[test]
fn test_decode_warning_messages() {
    assert_eq!(
        DecodeWarning::MissingFlags.to_string(),
        "missing start/end flags 0x7E, decoding raw payload"
    );
    assert_eq!(
        DecodeWarning::BodyShorterThanDeclared { declared: 50, available: 7 }.to_string(),
        "body shorter than declared: 50 bytes declared, 7 available"
    );
    assert_eq!(
        DecodeWarning::ExtraBytes { count: 2 }.to_string(),
        "2 extra bytes after the declared body"
    );
    assert_eq!(DecodeWarning::ParameterListIncomplete.to_string(), "parameter list incomplete");
    assert_eq!(
        DecodeWarning::ParameterTruncated { id: 0x0013 }.to_string(),
        "parameter 0x00000013 truncated"
    );
}

#[test]
fn test_jt808_error_messages() {
    let err = Jt808Error::InvalidRegistry("bad".to_string());
    assert_eq!(err.to_string(), "Invalid registry definition: bad");

    let err: Jt808Error = HexError::InvalidCharacter('G').into();
    assert_eq!(err.to_string(), "Invalid hex input: Invalid hex character: G");

    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
    let err: Jt808Error = io.into();
    assert!(matches!(err, Jt808Error::HistoryIo(_)));
}

#[test]
fn test_warning_serialization() {
    let warning = DecodeWarning::BodyIncomplete {
        message_id: 0x0200,
    };
    let json = serde_json::to_string(&warning).unwrap();
    assert_eq!(json, r#"{"kind":"body_incomplete","message_id":512}"#);
}
