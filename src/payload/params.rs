//! # Parameter List Decoding
//!
//! Parameter set commands (0x8103) and query responses (0x0104) carry a
//! count-prefixed list of `(id: u32, length: u8, value: [u8; length])`
//! entries. Each complete entry is rendered through the registry's
//! [`ParameterDefinition`]; unknown ids fall back to raw hex.

use nom::{
    bytes::complete::take,
    number::complete::{be_u32, be_u8},
    IResult,
};
use serde::Serialize;

use crate::constants::JT808_PARAM_HEADER_LENGTH;
use crate::error::DecodeWarning;
use crate::payload::data_encoding::{ascii_printable, be_uint};
use crate::payload::field::FieldLine;
use crate::payload::param_maps::{ParamType, ParameterDefinition};
use crate::payload::registry::Registry;
use crate::util::hex::encode_hex_upper;

/// One decoded parameter entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParameterEntry {
    pub id: u32,
    pub length: u8,
    pub value: Vec<u8>,
}

/// Output of [`parse_param_list`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParamListResult {
    pub entries: Vec<ParameterEntry>,
    pub lines: Vec<FieldLine>,
    pub warnings: Vec<DecodeWarning>,
    /// Offset just past the last complete entry.
    pub cursor: usize,
}

fn entry_header(input: &[u8]) -> IResult<&[u8], (u32, u8)> {
    let (input, id) = be_u32(input)?;
    let (input, length) = be_u8(input)?;
    Ok((input, (id, length)))
}

/// Decodes up to `count` entries from `body`, starting at `offset`.
///
/// `base` is the absolute payload offset of `body[0]`. Parsing stops at the
/// first entry whose header or value does not fit; entries decoded before
/// that point are kept.
pub fn parse_param_list(
    body: &[u8],
    offset: usize,
    count: usize,
    base: usize,
    registry: &Registry,
) -> ParamListResult {
    let mut result = ParamListResult {
        cursor: offset,
        ..Default::default()
    };

    for _ in 0..count {
        let cursor = result.cursor;
        let remaining = body.get(cursor..).unwrap_or(&[]);

        let Ok((rest, (id, length))) = entry_header(remaining) else {
            result.warnings.push(DecodeWarning::ParameterListIncomplete);
            break;
        };
        let value: IResult<&[u8], &[u8]> = take(length)(rest);
        let Ok((_, value)) = value else {
            result.warnings.push(DecodeWarning::ParameterTruncated { id });
            break;
        };

        let id_offset = cursor;
        let length_offset = cursor + 4;
        let value_offset = cursor + JT808_PARAM_HEADER_LENGTH;
        let definition = registry.parameter(id);
        let name = definition.map_or("Parameter", |def| def.name.as_str());

        result.lines.push(FieldLine::field(
            body,
            id_offset,
            4,
            base,
            "Parameter ID",
            format!("0x{id:08X} ({name})"),
        ));
        result.lines.push(FieldLine::field(
            body,
            length_offset,
            1,
            base,
            "Parameter length",
            length.to_string(),
        ));
        result.lines.push(FieldLine::field(
            body,
            value_offset,
            usize::from(length),
            base,
            "Parameter value",
            format_param_value(definition, value),
        ));

        result.entries.push(ParameterEntry {
            id,
            length,
            value: value.to_vec(),
        });
        result.cursor = value_offset + usize::from(length);
    }

    result
}

/// Renders a parameter value according to its definition.
pub fn format_param_value(definition: Option<&ParameterDefinition>, value: &[u8]) -> String {
    let hex = || format!("Hex: {}", encode_hex_upper(value));

    let Some(def) = definition else {
        return hex();
    };

    if def.kind == ParamType::String {
        let ascii = ascii_printable(value);
        return if ascii.is_empty() { hex() } else { ascii };
    }

    let Some(number) = be_uint(value, 0, value.len()) else {
        return hex();
    };
    let mut rendered = number.to_string();
    if let Some(unit) = &def.unit {
        rendered.push(' ');
        rendered.push_str(unit);
    }
    if let Some(label) = def.label_for(number) {
        rendered.push_str(&format!(" ({label})"));
    }
    rendered
}
