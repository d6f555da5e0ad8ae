//! # Decode Report
//!
//! Turns a [`DecodeResult`] into the views an operator reads: an overall
//! status, a one-line summary, and a table of rows, one per frame region,
//! each tagged with the absolute byte range it covers in the payload.

use serde::Serialize;
use std::fmt::{self, Write as _};

use crate::jt808::decoder::DecodeResult;
use crate::jt808::header::encryption_label;
use crate::payload::data_encoding::bcd_digits;
use crate::payload::field::{ByteRange, FieldLine, MISSING};
use crate::payload::registry::Registry;
use crate::util::hex::{encode_hex_upper, format_hex_compact};

/// Overall verdict for a decoded frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Status {
    Valid,
    Warning,
    Invalid,
}

impl Status {
    pub fn of(result: &DecodeResult) -> Self {
        if result.has_errors() {
            Status::Invalid
        } else if result.has_warnings() {
            Status::Warning
        } else {
            Status::Valid
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Status::Valid => "Valid",
            Status::Warning => "Warning",
            Status::Invalid => "Invalid",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Status line with diagnostic counts.
pub fn status_text(result: &DecodeResult) -> String {
    match Status::of(result) {
        Status::Invalid => format!("Errors found ({}).", result.errors.len()),
        Status::Warning => format!("Warnings found ({}).", result.warnings.len()),
        Status::Valid => "Valid message.".to_string(),
    }
}

/// One row of the report table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRow {
    pub label: String,
    pub hex: String,
    pub meaning: String,
    pub range: Option<ByteRange>,
    /// Interpreted body lines; only the interpreted-body row has any.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub lines: Vec<FieldLine>,
}

impl ReportRow {
    fn new(
        label: &str,
        hex: impl Into<String>,
        meaning: impl Into<String>,
        range: Option<ByteRange>,
    ) -> Self {
        Self {
            label: label.to_string(),
            hex: hex.into(),
            meaning: meaning.into(),
            range,
            lines: Vec::new(),
        }
    }
}

fn span(start: usize, len: usize) -> Option<ByteRange> {
    (len > 0).then(|| ByteRange {
        start,
        end: start + len - 1,
    })
}

/// One-line summary of the header and checksum.
pub fn summary(result: &DecodeResult) -> String {
    if result.has_errors() {
        return "Message not valid for complete analysis.".to_string();
    }

    let mut parts = Vec::new();
    if let Some(id) = result.message_id {
        parts.push(format!("Message ID: 0x{id:04X}"));
    }
    if let Some(props) = result.properties {
        parts.push(format!("Body length: {} bytes", props.body_length));
        parts.push(format!("Encryption mode: {}", encryption_label(props.encryption_mode)));
        parts.push(format!(
            "Sub-package: {}",
            if props.has_sub_package { "yes" } else { "no" }
        ));
    }
    if result.checksum_valid {
        parts.push("Checksum: valid".to_string());
    } else if result.checksum.is_some() {
        parts.push("Checksum: invalid".to_string());
    }

    if parts.is_empty() {
        "Summary unavailable.".to_string()
    } else {
        parts.join(" | ")
    }
}

/// Builds the report table for `result`.
///
/// `registry` supplies the message names shown on the message id row.
pub fn rows(result: &DecodeResult, registry: &Registry) -> Vec<ReportRow> {
    let mut rows = Vec::new();

    rows.push(ReportRow::new(
        "Start flag",
        if result.has_start_flag { "7E" } else { MISSING },
        if result.has_start_flag { "Frame start" } else { "Not found" },
        None,
    ));

    rows.push(match result.message_id {
        Some(id) => {
            let info = match registry.message(id) {
                Some(info) => format!("Type: {}. Flow: {}", info.name, info.flow),
                None => "No description registered for this message ID.".to_string(),
            };
            ReportRow::new(
                "Message ID",
                format!("{id:04X}"),
                format!("Message identifier. {info}"),
                span(0, 2),
            )
        }
        None => ReportRow::new("Message ID", MISSING, MISSING, None),
    });

    rows.push(match result.properties {
        Some(props) => ReportRow::new(
            "Message Body Properties",
            format!("{:04X}", props.raw),
            format!(
                "Length={} | Encryption={} | Sub-package={} | Reserved14={} | Reserved15={}",
                props.body_length,
                encryption_label(props.encryption_mode),
                u8::from(props.has_sub_package),
                u8::from(props.reserved14),
                u8::from(props.reserved15)
            ),
            span(2, 2),
        ),
        None => ReportRow::new("Message Body Properties", MISSING, MISSING, None),
    });

    rows.push(match &result.device_id {
        Some(device) => ReportRow::new(
            "Device ID (BCD[6])",
            encode_hex_upper(&device.bytes),
            format!("Last 12 IMEI digits: {}", bcd_digits(&device.bytes)),
            span(4, device.bytes.len()),
        ),
        None => ReportRow::new("Device ID (BCD[6])", MISSING, MISSING, None),
    });

    rows.push(ReportRow::new(
        "Sequence Number",
        result.sequence_number.map_or_else(|| MISSING.to_string(), |s| s.to_string()),
        "Message sequence number",
        result.sequence_number.and_then(|_| span(10, 2)),
    ));

    if result.has_sub_package() == Some(true) {
        let sub = result.sub_package;
        rows.push(ReportRow::new(
            "Sub-package total",
            sub.map_or_else(|| MISSING.to_string(), |s| s.total_packages.to_string()),
            "Total number of packages",
            sub.and_then(|_| span(12, 2)),
        ));
        rows.push(ReportRow::new(
            "Sub-package index",
            sub.map_or_else(|| MISSING.to_string(), |s| s.package_index.to_string()),
            "Index of this package",
            sub.and_then(|_| span(14, 2)),
        ));
    }

    rows.push(ReportRow::new(
        "Message Body",
        if result.body.is_empty() {
            MISSING.to_string()
        } else {
            encode_hex_upper(&result.body)
        },
        format!("Payload ({} bytes)", result.body.len()),
        span(result.body_offset, result.body.len()),
    ));

    let mut interpreted = ReportRow::new(
        "Message Body (interpreted)",
        MISSING,
        format!("{} lines", result.body_lines.len()),
        None,
    );
    interpreted.lines = result.body_lines.clone();
    rows.push(interpreted);

    if !result.extra.is_empty() {
        rows.push(ReportRow::new(
            "Extra bytes",
            encode_hex_upper(&result.extra),
            "Data after the declared body",
            span(result.body_offset + result.body.len(), result.extra.len()),
        ));
    }

    rows.push(ReportRow::new(
        "Checksum",
        result.checksum.map_or_else(|| MISSING.to_string(), |c| format!("{c:02X}")),
        match result.checksum_computed {
            Some(computed) => format!(
                "Computed: {computed:02X} ({})",
                if result.checksum_valid { "OK" } else { "mismatch" }
            ),
            None => MISSING.to_string(),
        },
        result.checksum_index().and_then(|i| span(i, 1)),
    ));

    rows.push(ReportRow::new(
        "End flag",
        if result.has_end_flag { "7E" } else { MISSING },
        if result.has_end_flag { "Frame end" } else { "Not found" },
        None,
    ));

    rows
}

/// Rows, or interpreted body lines, that cover any byte of `range`.
///
/// This is the lookup behind highlighting a byte and finding what it means.
pub fn rows_covering<'a>(rows: &'a [ReportRow], range: ByteRange) -> Vec<&'a str> {
    let mut labels = Vec::new();
    for row in rows {
        if row.range.is_some_and(|r| r.overlaps(&range)) {
            labels.push(row.label.as_str());
        }
        for line in &row.lines {
            if line.range.is_some_and(|r| r.overlaps(&range)) {
                labels.push(line.label.as_str());
            }
        }
    }
    labels
}

/// Plain-text rendering of the whole report.
pub fn render_text(result: &DecodeResult, registry: &Registry) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail.
    let _ = write_report(&mut out, result, registry);
    out
}

fn write_report(out: &mut String, result: &DecodeResult, registry: &Registry) -> fmt::Result {
    writeln!(out, "Status: {}", status_text(result))?;
    writeln!(out, "Summary: {}", summary(result))?;
    writeln!(out, "Escaped payload: {}", hex_or_missing(&result.escaped_payload))?;
    writeln!(out, "Payload: {}", hex_or_missing(&result.payload))?;
    writeln!(out)?;

    for row in rows(result, registry) {
        let range = row.range.map_or_else(String::new, |r| format!(" [{r}]"));
        writeln!(out, "{}{range} | {} | {}", row.label, row.hex, row.meaning)?;
        for line in &row.lines {
            writeln!(out, "    {line}")?;
        }
    }

    if result.has_errors() || result.has_warnings() {
        writeln!(out)?;
        for error in &result.errors {
            writeln!(out, "Error: {error}")?;
        }
        for warning in &result.warnings {
            writeln!(out, "Warning: {warning}")?;
        }
    }
    Ok(())
}

fn hex_or_missing(bytes: &[u8]) -> String {
    if bytes.is_empty() {
        MISSING.to_string()
    } else {
        format_hex_compact(bytes)
    }
}
