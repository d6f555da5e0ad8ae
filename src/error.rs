//! # JT808 Error Handling
//!
//! This module defines the `Jt808Error` enum for the fallible surfaces of the
//! crate (hex input, registry overrides, history files), and the two
//! diagnostic enums the decoder accumulates instead of failing:
//! `DecodeError` (the frame cannot be fully trusted) and `DecodeWarning`
//! (decoding continued with degraded confidence).

use serde::Serialize;
use thiserror::Error;

use crate::util::hex::HexError;

/// Represents the different error types that can occur in the JT808 crate.
#[derive(Debug, Error)]
pub enum Jt808Error {
    /// Indicates the input text could not be turned into bytes.
    #[error("Invalid hex input: {0}")]
    Hex(#[from] HexError),

    /// Indicates a registry override document could not be used.
    #[error("Invalid registry definition: {0}")]
    InvalidRegistry(String),

    /// Indicates a history file could not be read or written.
    #[error("History I/O error: {0}")]
    HistoryIo(#[from] std::io::Error),

    /// Indicates a JSON (de)serialization failure.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Hard problems found while decoding a frame.
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DecodeError {
    #[error("empty message")]
    EmptyMessage,

    /// `0x7D` not followed by `0x01` or `0x02`. `offset` is relative to the
    /// escaped payload (delimiters already stripped).
    #[error("invalid escape sequence at offset {offset}: 0x7D not followed by 0x01/0x02")]
    InvalidEscape { offset: usize },

    #[error("payload too short for header + checksum: {length} bytes (minimum 13)")]
    FrameTooShort { length: usize },

    #[error("header incomplete: {length} bytes (minimum 12)")]
    HeaderIncomplete { length: usize },
}

/// Soft problems: the decode carried on, but the result is less certain.
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DecodeWarning {
    #[error("missing start/end flags 0x7E, decoding raw payload")]
    MissingFlags,

    #[error("sub-package flag set but package bytes are missing")]
    SubPackageMissing,

    #[error("body shorter than declared: {declared} bytes declared, {available} available")]
    BodyShorterThanDeclared { declared: usize, available: usize },

    #[error("{count} extra bytes after the declared body")]
    ExtraBytes { count: usize },

    #[error("body incomplete for 0x{message_id:04X}")]
    BodyIncomplete { message_id: u16 },

    #[error("parameter list incomplete")]
    ParameterListIncomplete,

    #[error("parameter 0x{id:08X} truncated")]
    ParameterTruncated { id: u32 },

    #[error("location extension 0x{id:02X} truncated")]
    ExtensionTruncated { id: u8 },
}
