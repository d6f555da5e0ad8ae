//! # JT808 Message Decoder
//!
//! Composes frame extraction, header and sub-package decoding, body
//! interpretation and checksum validation into a single pass.
//!
//! Decoding never fails: every stage contributes what it could decode plus
//! diagnostics, and the pass always runs to the end. Errors mean the frame
//! cannot be trusted as a whole; warnings mean some part was degraded.
//!
//! ```rust
//! use jt808_rs::jt808::decode_hex_str;
//!
//! let result = decode_hex_str("7E000200003440500493730104C77E").unwrap();
//! assert_eq!(result.message_id, Some(0x0002));
//! assert_eq!(result.sequence_number, Some(260));
//! assert!(result.checksum_valid);
//! ```

use serde::{Serialize, Serializer};

use crate::constants::{JT808_HEADER_LENGTH, JT808_MIN_FRAME_LENGTH};
use crate::error::{DecodeError, DecodeWarning};
use crate::jt808::checksum;
use crate::jt808::frame::extract_frame;
use crate::jt808::header::{decode_header, read_sub_package, DeviceId, Properties, SubPackageInfo};
use crate::payload::body::interpret_body;
use crate::payload::field::FieldLine;
use crate::payload::registry::Registry;
use crate::util::hex::{decode_hex, encode_hex_upper, sanitize_hex, HexError};
use crate::util::logging::{log_frame_hex, log_frame_structured, span_frame_decode};

/// Everything decoded from one frame.
///
/// Offsets and byte ranges refer to `payload`, the unstuffed bytes between
/// the delimiters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DecodeResult {
    pub has_start_flag: bool,
    pub has_end_flag: bool,
    #[serde(serialize_with = "as_hex")]
    pub escaped_payload: Vec<u8>,
    #[serde(serialize_with = "as_hex")]
    pub payload: Vec<u8>,

    pub message_id: Option<u16>,
    pub properties: Option<Properties>,
    pub device_id: Option<DeviceId>,
    pub sequence_number: Option<u16>,
    pub sub_package: Option<SubPackageInfo>,

    /// Offset of the first body byte: 12, or 16 after a sub-package block.
    pub body_offset: usize,
    #[serde(serialize_with = "as_hex")]
    pub body: Vec<u8>,
    /// Bytes between the declared body and the checksum.
    #[serde(serialize_with = "as_hex")]
    pub extra: Vec<u8>,
    pub body_lines: Vec<FieldLine>,

    /// Trailing check code as received.
    pub checksum: Option<u8>,
    pub checksum_computed: Option<u8>,
    pub checksum_valid: bool,

    pub errors: Vec<DecodeError>,
    pub warnings: Vec<DecodeWarning>,
}

fn as_hex<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&encode_hex_upper(bytes))
}

impl DecodeResult {
    /// Payload without its trailing check code.
    pub fn content(&self) -> &[u8] {
        self.payload.split_last().map_or(&[], |(_, content)| content)
    }

    pub fn body_length(&self) -> Option<u16> {
        self.properties.map(|p| p.body_length)
    }

    pub fn encryption_mode(&self) -> Option<u8> {
        self.properties.map(|p| p.encryption_mode)
    }

    pub fn has_sub_package(&self) -> Option<bool> {
        self.properties.map(|p| p.has_sub_package)
    }

    /// Index of the check code within `payload`.
    pub fn checksum_index(&self) -> Option<usize> {
        self.payload.len().checked_sub(1)
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Frame decoder bound to a lookup registry.
#[derive(Debug, Clone, Copy)]
pub struct Decoder<'r> {
    registry: &'r Registry,
}

impl Decoder<'static> {
    /// Decoder using the built-in registry.
    pub fn new() -> Self {
        Self {
            registry: Registry::builtin(),
        }
    }
}

impl Default for Decoder<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'r> Decoder<'r> {
    pub fn with_registry(registry: &'r Registry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &'r Registry {
        self.registry
    }

    /// Decodes hex text after stripping `0x` prefixes and separators.
    pub fn decode_hex(&self, text: &str) -> Result<DecodeResult, HexError> {
        let sanitized = sanitize_hex(text);
        let bytes = decode_hex(&sanitized)?;
        Ok(self.decode(&bytes))
    }

    /// Decodes one raw frame.
    pub fn decode(&self, raw: &[u8]) -> DecodeResult {
        #[cfg(feature = "tracing")]
        let _span = span_frame_decode(raw.len()).entered();
        #[cfg(not(feature = "tracing"))]
        span_frame_decode(raw.len());

        log_frame_hex("Decoding frame", raw);

        if raw.is_empty() {
            log::debug!("Empty input");
            return DecodeResult {
                errors: vec![DecodeError::EmptyMessage],
                ..Default::default()
            };
        }

        let frame = extract_frame(raw);
        let mut errors = frame.errors;
        let mut warnings = frame.warnings;
        let payload = frame.payload;

        if payload.len() < JT808_MIN_FRAME_LENGTH {
            errors.push(DecodeError::FrameTooShort {
                length: payload.len(),
            });
        }

        let (checksum, content): (Option<u8>, &[u8]) = match payload.split_last() {
            Some((last, content)) => (Some(*last), content),
            None => (None, &[]),
        };

        if content.len() < JT808_HEADER_LENGTH {
            errors.push(DecodeError::HeaderIncomplete {
                length: content.len(),
            });
        }

        let header = decode_header(content);
        let (sub_package, body_offset, sub_warning) =
            read_sub_package(content, header.properties.as_ref());
        warnings.extend(sub_warning);

        let (body, extra) = match header.properties {
            Some(props) => {
                let declared = usize::from(props.body_length);
                let body_end = body_offset + declared;
                let body = slice_clamped(content, body_offset, body_end);
                let extra = content.get(body_end..).unwrap_or(&[]);
                if content.len() < body_end {
                    warnings.push(DecodeWarning::BodyShorterThanDeclared {
                        declared,
                        available: body.len(),
                    });
                }
                if !extra.is_empty() {
                    warnings.push(DecodeWarning::ExtraBytes { count: extra.len() });
                }
                (body.to_vec(), extra.to_vec())
            }
            None => (Vec::new(), Vec::new()),
        };

        let interpretation = interpret_body(header.message_id, &body, body_offset, self.registry);
        warnings.extend(interpretation.warnings);

        let check = checksum::validate(content, checksum);

        for error in &errors {
            log::debug!("Decode error: {error}");
        }
        for warning in &warnings {
            log::debug!("Decode warning: {warning}");
        }
        log_frame_structured(
            header.message_id,
            payload.len(),
            errors.len(),
            warnings.len(),
            check.valid,
        );

        DecodeResult {
            has_start_flag: frame.has_start_flag,
            has_end_flag: frame.has_end_flag,
            escaped_payload: frame.escaped_payload,
            message_id: header.message_id,
            properties: header.properties,
            device_id: header.device_id,
            sequence_number: header.sequence_number,
            sub_package,
            body_offset,
            body,
            extra,
            body_lines: interpretation.lines,
            checksum: check.received,
            checksum_computed: check.computed,
            checksum_valid: check.valid,
            errors,
            warnings,
            payload,
        }
    }
}

fn slice_clamped(bytes: &[u8], start: usize, end: usize) -> &[u8] {
    let end = end.min(bytes.len());
    bytes.get(start..end).unwrap_or(&[])
}

/// Decodes `raw` with the built-in registry.
pub fn decode_frame(raw: &[u8]) -> DecodeResult {
    Decoder::new().decode(raw)
}

/// Sanitizes and decodes hex text with the built-in registry.
///
/// Fails only when the sanitized text has an odd number of digits. Text with
/// no hex digits at all decodes as empty input.
pub fn decode_hex_str(text: &str) -> Result<DecodeResult, HexError> {
    Decoder::new().decode_hex(text)
}
