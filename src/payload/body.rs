//! # Message Body Interpretation
//!
//! Dispatches a body on its message id and renders it as an ordered list of
//! [`FieldLine`]s. Every handler is a pure function of the body bytes and
//! their absolute offset in the payload. A body shorter than its handler
//! expects produces a `BodyIncomplete` warning, and the handler still emits
//! every line it can.

use serde::Serialize;

use crate::constants::*;
use crate::error::DecodeWarning;
use crate::payload::data_encoding::{ascii_or_hex, word_at};
use crate::payload::field::{or_missing, FieldLine, MISSING};
use crate::payload::location::interpret_location;
use crate::payload::params::parse_param_list;
use crate::payload::registry::Registry;

/// Message ids with a dedicated body decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MessageKind {
    DeviceRegistration,
    RegistrationResponse,
    Authentication,
    DeviceGeneralResponse,
    ServerGeneralResponse,
    Heartbeat,
    ParameterSet,
    ParameterQuery,
    ParameterQueryResponse,
    LocationReport,
    /// Any other id, or none at all.
    Unknown,
}

impl MessageKind {
    pub fn from_id(message_id: Option<u16>) -> Self {
        match message_id {
            Some(JT808_MSG_REGISTRATION) => Self::DeviceRegistration,
            Some(JT808_MSG_REGISTRATION_RESPONSE) => Self::RegistrationResponse,
            Some(JT808_MSG_AUTHENTICATION) => Self::Authentication,
            Some(JT808_MSG_DEVICE_GENERAL_RESPONSE) => Self::DeviceGeneralResponse,
            Some(JT808_MSG_SERVER_GENERAL_RESPONSE) => Self::ServerGeneralResponse,
            Some(JT808_MSG_HEARTBEAT) => Self::Heartbeat,
            Some(JT808_MSG_PARAMETER_SET) => Self::ParameterSet,
            Some(JT808_MSG_PARAMETER_QUERY) => Self::ParameterQuery,
            Some(JT808_MSG_PARAMETER_QUERY_RESPONSE) => Self::ParameterQueryResponse,
            Some(JT808_MSG_LOCATION_REPORT) => Self::LocationReport,
            _ => Self::Unknown,
        }
    }
}

/// Rendered lines and warnings for one body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BodyInterpretation {
    pub lines: Vec<FieldLine>,
    pub warnings: Vec<DecodeWarning>,
}

/// Interprets `body` as the body of `message_id`.
///
/// `base` is the absolute payload offset of `body[0]`, used for the byte
/// ranges of the produced lines.
pub fn interpret_body(
    message_id: Option<u16>,
    body: &[u8],
    base: usize,
    registry: &Registry,
) -> BodyInterpretation {
    match MessageKind::from_id(message_id) {
        MessageKind::DeviceRegistration => interpret_registration(body, base),
        MessageKind::RegistrationResponse => interpret_registration_response(body, base),
        MessageKind::Authentication => interpret_authentication(body, base),
        MessageKind::DeviceGeneralResponse => {
            interpret_general_response(JT808_MSG_DEVICE_GENERAL_RESPONSE, body, base)
        }
        MessageKind::ServerGeneralResponse => {
            interpret_general_response(JT808_MSG_SERVER_GENERAL_RESPONSE, body, base)
        }
        MessageKind::Heartbeat => placeholder("Heartbeat without payload."),
        MessageKind::ParameterQuery => placeholder("Query without payload."),
        MessageKind::ParameterSet => interpret_parameter_set(body, base, registry),
        MessageKind::ParameterQueryResponse => {
            interpret_parameter_query_response(body, base, registry)
        }
        MessageKind::LocationReport => interpret_location(body, base),
        MessageKind::Unknown => placeholder("No specific interpretation for this message ID."),
    }
}

/// Label for a general-response result code.
pub fn result_label(code: u8) -> Option<&'static str> {
    match code {
        0 => Some("success"),
        1 => Some("failure"),
        2 => Some("message incorrect"),
        3 => Some("unsupported"),
        4 => Some("alarm acknowledged"),
        _ => None,
    }
}

fn format_result(code: Option<u8>) -> String {
    match code {
        Some(code) => match result_label(code) {
            Some(label) => format!("{code} ({label})"),
            None => code.to_string(),
        },
        None => MISSING.to_string(),
    }
}

fn check_minimum(out: &mut BodyInterpretation, message_id: u16, body: &[u8], minimum: usize) {
    if body.len() < minimum {
        out.warnings.push(DecodeWarning::BodyIncomplete { message_id });
    }
}

fn placeholder(text: &str) -> BodyInterpretation {
    BodyInterpretation {
        lines: vec![FieldLine::note(text)],
        warnings: Vec::new(),
    }
}

fn text_field(body: &[u8], start: usize, len: usize) -> String {
    let end = start.saturating_add(len).min(body.len());
    body.get(start..end).map(ascii_or_hex).unwrap_or_default()
}

fn text_tail(body: &[u8], start: usize) -> String {
    let value = body.get(start..).map(ascii_or_hex).unwrap_or_default();
    if value.is_empty() {
        MISSING.to_string()
    } else {
        value
    }
}

fn interpret_registration(body: &[u8], base: usize) -> BodyInterpretation {
    let mut out = BodyInterpretation::default();
    check_minimum(&mut out, JT808_MSG_REGISTRATION, body, JT808_REGISTRATION_MIN_LENGTH);

    out.lines.extend([
        FieldLine::field(body, 0, 2, base, "Province ID", or_missing(word_at(body, 0))),
        FieldLine::field(body, 2, 2, base, "City ID", or_missing(word_at(body, 2))),
        FieldLine::field(body, 4, 5, base, "Manufacturer", text_field(body, 4, 5)),
        FieldLine::field(body, 9, 20, base, "Device model", text_field(body, 9, 20)),
        FieldLine::field(body, 29, 7, base, "Device ID", text_field(body, 29, 7)),
        FieldLine::field(body, 36, 1, base, "Plate color", or_missing(body.get(36))),
        FieldLine::tail(body, 37, base, "Vehicle identification", text_tail(body, 37)),
    ]);
    out
}

fn interpret_registration_response(body: &[u8], base: usize) -> BodyInterpretation {
    let mut out = BodyInterpretation::default();
    check_minimum(
        &mut out,
        JT808_MSG_REGISTRATION_RESPONSE,
        body,
        JT808_REGISTRATION_RESPONSE_MIN_LENGTH,
    );

    out.lines.extend([
        FieldLine::field(body, 0, 2, base, "Response sequence", or_missing(word_at(body, 0))),
        FieldLine::field(body, 2, 1, base, "Result", format_result(body.get(2).copied())),
        FieldLine::tail(body, 3, base, "Authentication code", text_tail(body, 3)),
    ]);
    out
}

fn interpret_authentication(body: &[u8], base: usize) -> BodyInterpretation {
    BodyInterpretation {
        lines: vec![FieldLine::tail(body, 0, base, "Authentication code", text_tail(body, 0))],
        warnings: Vec::new(),
    }
}

fn interpret_general_response(message_id: u16, body: &[u8], base: usize) -> BodyInterpretation {
    let mut out = BodyInterpretation::default();
    check_minimum(&mut out, message_id, body, JT808_GENERAL_RESPONSE_MIN_LENGTH);

    let answered = word_at(body, 2).map_or_else(|| MISSING.to_string(), |id| format!("0x{id:04X}"));
    out.lines.extend([
        FieldLine::field(body, 0, 2, base, "Response sequence", or_missing(word_at(body, 0))),
        FieldLine::field(body, 2, 2, base, "Answered message ID", answered),
        FieldLine::field(body, 4, 1, base, "Result", format_result(body.get(4).copied())),
    ]);
    out
}

fn interpret_parameter_set(body: &[u8], base: usize, registry: &Registry) -> BodyInterpretation {
    let mut out = BodyInterpretation::default();
    check_minimum(&mut out, JT808_MSG_PARAMETER_SET, body, JT808_PARAMETER_SET_MIN_LENGTH);

    let total = body.first().copied();
    out.lines.push(FieldLine::field(body, 0, 1, base, "Total parameters", or_missing(total)));

    let parsed = parse_param_list(body, 1, usize::from(total.unwrap_or(0)), base, registry);
    out.lines.extend(parsed.lines);
    out.warnings.extend(parsed.warnings);
    out
}

fn interpret_parameter_query_response(
    body: &[u8],
    base: usize,
    registry: &Registry,
) -> BodyInterpretation {
    let mut out = BodyInterpretation::default();
    check_minimum(
        &mut out,
        JT808_MSG_PARAMETER_QUERY_RESPONSE,
        body,
        JT808_PARAMETER_QUERY_RESPONSE_MIN_LENGTH,
    );

    let total = body.get(2).copied();
    out.lines.extend([
        FieldLine::field(body, 0, 2, base, "Response sequence", or_missing(word_at(body, 0))),
        FieldLine::field(body, 2, 1, base, "Total parameters", or_missing(total)),
    ]);

    let parsed = parse_param_list(body, 3, usize::from(total.unwrap_or(0)), base, registry);
    out.lines.extend(parsed.lines);
    out.warnings.extend(parsed.warnings);
    out
}
