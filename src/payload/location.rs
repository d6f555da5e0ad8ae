//! # Location Report (0x0200)
//!
//! The basic information block is 28 bytes: alarm flags, status flags,
//! latitude, longitude, altitude, speed, direction and a BCD timestamp.
//! Anything after it is a sequence of `(id: u8, length: u8, value)`
//! extension records.

use nom::{bytes::complete::take, number::complete::be_u8, IResult};
use serde::Serialize;

use crate::constants::{
    JT808_EXTENSION_HEADER_LENGTH, JT808_LOCATION_BASIC_LENGTH, JT808_MSG_LOCATION_REPORT,
};
use crate::error::DecodeWarning;
use crate::payload::body::BodyInterpretation;
use crate::payload::data_encoding::{be_uint, dword_at, format_bcd_time, word_at};
use crate::payload::field::FieldLine;
use crate::util::hex::encode_hex_upper;

const OFFSET_ALARM: usize = 0;
const OFFSET_STATUS: usize = 4;
const OFFSET_LATITUDE: usize = 8;
const OFFSET_LONGITUDE: usize = 12;
const OFFSET_ALTITUDE: usize = 16;
const OFFSET_SPEED: usize = 18;
const OFFSET_DIRECTION: usize = 20;
const OFFSET_TIME: usize = 22;
const TIME_LENGTH: usize = 6;

/// Basic information block; a field is `None` when its bytes are missing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationBasic {
    pub alarm: Option<u32>,
    pub status: Option<u32>,
    /// Degrees.
    pub latitude: Option<f64>,
    /// Degrees.
    pub longitude: Option<f64>,
    /// Meters.
    pub altitude: Option<u16>,
    /// km/h.
    pub speed: Option<f64>,
    /// Degrees from north.
    pub direction: Option<u16>,
    /// `YY-MM-DD HH:MM:SS`, or the raw digits when the timestamp is short.
    pub time: String,
}

impl LocationBasic {
    pub fn parse(body: &[u8]) -> Self {
        let time_end = (OFFSET_TIME + TIME_LENGTH).min(body.len());
        let time_bytes = body.get(OFFSET_TIME..time_end).unwrap_or(&[]);
        Self {
            alarm: dword_at(body, OFFSET_ALARM),
            status: dword_at(body, OFFSET_STATUS),
            latitude: dword_at(body, OFFSET_LATITUDE).map(|v| f64::from(v) / 1e6),
            longitude: dword_at(body, OFFSET_LONGITUDE).map(|v| f64::from(v) / 1e6),
            altitude: word_at(body, OFFSET_ALTITUDE),
            speed: word_at(body, OFFSET_SPEED).map(|v| f64::from(v) / 10.0),
            direction: word_at(body, OFFSET_DIRECTION),
            time: format_bcd_time(time_bytes),
        }
    }
}

/// One additional-information record following the basic block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocationExtension {
    pub id: u8,
    pub value: Vec<u8>,
}

pub(crate) fn interpret_location(body: &[u8], base: usize) -> BodyInterpretation {
    let mut out = BodyInterpretation::default();
    if body.len() < JT808_LOCATION_BASIC_LENGTH {
        out.warnings.push(DecodeWarning::BodyIncomplete {
            message_id: JT808_MSG_LOCATION_REPORT,
        });
    }

    let basic = LocationBasic::parse(body);
    let mut field = |offset: usize, len: usize, label: &str, value: String| {
        out.lines.push(FieldLine::field(body, offset, len, base, label, value));
    };
    if let Some(alarm) = basic.alarm {
        field(OFFSET_ALARM, 4, "Alarm flags", format!("0x{alarm:08X}"));
    }
    if let Some(status) = basic.status {
        field(OFFSET_STATUS, 4, "Status", format!("0x{status:08X}"));
    }
    if let Some(lat) = basic.latitude {
        field(OFFSET_LATITUDE, 4, "Latitude", format!("{lat:.6}"));
    }
    if let Some(lon) = basic.longitude {
        field(OFFSET_LONGITUDE, 4, "Longitude", format!("{lon:.6}"));
    }
    if let Some(altitude) = basic.altitude {
        field(OFFSET_ALTITUDE, 2, "Altitude", format!("{altitude} m"));
    }
    if let Some(speed) = basic.speed {
        field(OFFSET_SPEED, 2, "Speed", format!("{speed:.1} km/h"));
    }
    if let Some(direction) = basic.direction {
        field(OFFSET_DIRECTION, 2, "Direction", format!("{direction}°"));
    }
    field(OFFSET_TIME, TIME_LENGTH, "Time (BCD)", basic.time);

    if body.len() > JT808_LOCATION_BASIC_LENGTH {
        out.lines.push(FieldLine::note("Extensions:"));
        let (extensions, truncated) = read_extensions(body);
        let mut cursor = JT808_LOCATION_BASIC_LENGTH;
        for ext in &extensions {
            let len = ext.value.len();
            let value_offset = cursor + JT808_EXTENSION_HEADER_LENGTH;
            out.lines.push(FieldLine::field(
                body,
                cursor,
                1,
                base,
                "Ext ID",
                format!("0x{:02X}", ext.id),
            ));
            out.lines.push(FieldLine::field(
                body,
                cursor + 1,
                1,
                base,
                "Ext length",
                len.to_string(),
            ));
            out.lines.push(FieldLine::field(
                body,
                value_offset,
                len,
                base,
                "Ext value",
                encode_hex_upper(&ext.value),
            ));
            cursor = value_offset + len;
        }
        if let Some(id) = truncated {
            out.warnings.push(DecodeWarning::ExtensionTruncated { id });
        }
    }

    out
}

fn extension_header(input: &[u8]) -> IResult<&[u8], (u8, u8)> {
    let (input, id) = be_u8(input)?;
    let (input, length) = be_u8(input)?;
    Ok((input, (id, length)))
}

/// Walks the extension records after the basic block.
///
/// Returns the complete records plus the id of a record whose value runs
/// past the end of the body, if any. A single trailing byte is ignored.
pub fn read_extensions(body: &[u8]) -> (Vec<LocationExtension>, Option<u8>) {
    let mut extensions = Vec::new();
    let mut remaining = body.get(JT808_LOCATION_BASIC_LENGTH..).unwrap_or(&[]);

    while remaining.len() >= JT808_EXTENSION_HEADER_LENGTH {
        let Ok((rest, (id, length))) = extension_header(remaining) else {
            break;
        };
        let value: IResult<&[u8], &[u8]> = take(length)(rest);
        let Ok((rest, value)) = value else {
            log::debug!(
                "Location extension 0x{id:02X} declares {length} bytes, {} left",
                rest.len()
            );
            return (extensions, Some(id));
        };
        extensions.push(LocationExtension {
            id,
            value: value.to_vec(),
        });
        remaining = rest;
    }

    (extensions, None)
}

/// Extension value as an unsigned integer, when it fits in 8 bytes.
pub fn extension_value(ext: &LocationExtension) -> Option<u64> {
    be_uint(&ext.value, 0, ext.value.len())
}
