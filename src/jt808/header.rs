//! # JT808 Message Header
//!
//! The header occupies the first 12 bytes of the unstuffed content:
//!
//! | offset | size | field                  |
//! |--------|------|------------------------|
//! | 0      | 2    | message id             |
//! | 2      | 2    | body properties        |
//! | 4      | 6    | device id (BCD)        |
//! | 10     | 2    | message sequence number|
//!
//! When the sub-package flag is set, 4 more bytes follow: total package
//! count and package index.
//!
//! Each field is decoded independently, so a short header still yields the
//! fields whose bytes are present.

use bitflags::bitflags;
use serde::Serialize;

use crate::constants::*;
use crate::error::DecodeWarning;
use crate::payload::data_encoding::{bcd_digits, word_at};

bitflags! {
    /// Flag bits of the body properties word.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct PropertyFlags: u16 {
        /// Body is one package of a split message.
        const SUB_PACKAGE = JT808_PROPS_BIT_SUB_PACKAGE;
        const RESERVED_14 = JT808_PROPS_BIT_RESERVED_14;
        const RESERVED_15 = JT808_PROPS_BIT_RESERVED_15;
    }
}

/// Decoded body properties word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Properties {
    pub raw: u16,
    /// Declared body length, 0-1023.
    pub body_length: u16,
    /// 0 = none, 1 = RSA, others unassigned.
    pub encryption_mode: u8,
    pub has_sub_package: bool,
    pub reserved14: bool,
    pub reserved15: bool,
}

impl Properties {
    pub fn from_raw(raw: u16) -> Self {
        let flags = PropertyFlags::from_bits_truncate(raw);
        let encryption = (raw >> JT808_PROPS_SHIFT_ENCRYPTION) & JT808_PROPS_MASK_ENCRYPTION;
        Self {
            raw,
            body_length: raw & JT808_PROPS_MASK_BODY_LENGTH,
            encryption_mode: encryption as u8,
            has_sub_package: flags.contains(PropertyFlags::SUB_PACKAGE),
            reserved14: flags.contains(PropertyFlags::RESERVED_14),
            reserved15: flags.contains(PropertyFlags::RESERVED_15),
        }
    }

    pub fn flags(&self) -> PropertyFlags {
        PropertyFlags::from_bits_truncate(self.raw)
    }
}

/// Human label for an encryption mode.
pub fn encryption_label(mode: u8) -> String {
    match mode {
        0 => "0 (none)".to_string(),
        1 => "1 (RSA)".to_string(),
        other => format!("{other} (unknown)"),
    }
}

/// Terminal identifier: 6 BCD bytes, normally the last 12 IMEI digits.
///
/// With a truncated header `bytes` holds whatever part was present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceId {
    pub bytes: Vec<u8>,
    pub digits: String,
}

impl DeviceId {
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            bytes: bytes.to_vec(),
            digits: bcd_digits(bytes),
        }
    }
}

/// Fixed header fields; each is `None` when its bytes are missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Header {
    pub message_id: Option<u16>,
    pub properties: Option<Properties>,
    pub device_id: Option<DeviceId>,
    pub sequence_number: Option<u16>,
}

/// Decodes the header fields present in `content`.
pub fn decode_header(content: &[u8]) -> Header {
    let device_end = (JT808_OFFSET_DEVICE_ID + JT808_DEVICE_ID_LENGTH).min(content.len());
    let device_id = content
        .get(JT808_OFFSET_DEVICE_ID..device_end)
        .filter(|bytes| !bytes.is_empty())
        .map(DeviceId::from_bytes);

    Header {
        message_id: word_at(content, JT808_OFFSET_MESSAGE_ID),
        properties: word_at(content, JT808_OFFSET_PROPERTIES).map(Properties::from_raw),
        device_id,
        sequence_number: word_at(content, JT808_OFFSET_SEQUENCE),
    }
}

/// Package position of a split message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SubPackageInfo {
    pub total_packages: u16,
    pub package_index: u16,
}

/// Reads the sub-package block after the header when `properties` says
/// one is present.
///
/// Returns the block (if read), the offset at which the body starts, and
/// a warning if the flag is set but the bytes are missing. The body offset
/// only advances past the block when it was actually read.
pub fn read_sub_package(
    content: &[u8],
    properties: Option<&Properties>,
) -> (Option<SubPackageInfo>, usize, Option<DecodeWarning>) {
    let offset = JT808_HEADER_LENGTH;
    if !properties.is_some_and(|p| p.has_sub_package) {
        return (None, offset, None);
    }

    if content.len() < offset + JT808_SUB_PACKAGE_LENGTH {
        return (None, offset, Some(DecodeWarning::SubPackageMissing));
    }

    match (word_at(content, offset), word_at(content, offset + 2)) {
        (Some(total_packages), Some(package_index)) => (
            Some(SubPackageInfo {
                total_packages,
                package_index,
            }),
            offset + JT808_SUB_PACKAGE_LENGTH,
            None,
        ),
        _ => (None, offset, Some(DecodeWarning::SubPackageMissing)),
    }
}
