//! Labeled output lines produced by the body decoders.

use serde::Serialize;
use std::fmt;

use crate::util::hex::encode_hex_upper;

/// Placeholder for a value whose bytes are missing.
pub const MISSING: &str = "-";

/// Inclusive byte range, as absolute offsets into the unstuffed payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ByteRange {
    pub start: usize,
    pub end: usize,
}

impl ByteRange {
    /// Whether `other` shares at least one byte with this range.
    pub fn overlaps(&self, other: &ByteRange) -> bool {
        self.start <= other.end && other.start <= self.end
    }
}

impl fmt::Display for ByteRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start == self.end {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}

/// One interpreted field of a message body.
///
/// `range` and `hex` are `None` when none of the field's bytes are present
/// (and for descriptive lines that cover no bytes at all).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldLine {
    pub range: Option<ByteRange>,
    pub hex: Option<String>,
    pub label: String,
    pub value: Option<String>,
}

impl FieldLine {
    /// A descriptive line that covers no bytes.
    pub fn note(text: impl Into<String>) -> Self {
        Self {
            range: None,
            hex: None,
            label: text.into(),
            value: None,
        }
    }

    /// A field of `len` bytes at `start` within `bytes`.
    ///
    /// The reported range is clipped to the bytes actually available;
    /// `base` shifts it to an absolute payload offset.
    pub fn field(
        bytes: &[u8],
        start: usize,
        len: usize,
        base: usize,
        label: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        let from = start.min(bytes.len());
        let to = start.saturating_add(len).min(bytes.len());
        let slice = &bytes[from..to];

        let (range, hex) = if slice.is_empty() {
            (None, None)
        } else {
            (
                Some(ByteRange {
                    start: base + from,
                    end: base + to - 1,
                }),
                Some(encode_hex_upper(slice)),
            )
        };

        Self {
            range,
            hex,
            label: label.into(),
            value: Some(value.into()),
        }
    }

    /// A variable-length field running from `start` to the end of `bytes`.
    pub fn tail(
        bytes: &[u8],
        start: usize,
        base: usize,
        label: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        let len = bytes.len().saturating_sub(start);
        Self::field(bytes, start, len, base, label, value)
    }
}

impl fmt::Display for FieldLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.range, &self.hex) {
            (Some(range), Some(hex)) => write!(f, "Byte {range}: {hex} | ")?,
            _ => write!(f, "{MISSING} | ")?,
        }
        match &self.value {
            Some(value) => write!(f, "{}: {}", self.label, value),
            None => write!(f, "{}", self.label),
        }
    }
}

/// Renders an optional number, or the missing-value placeholder.
pub fn or_missing<T: fmt::Display>(value: Option<T>) -> String {
    value.map_or_else(|| MISSING.to_string(), |v| v.to_string())
}
