//! Terminal Parameter Definition Tables
//!
//! This module provides the built-in definitions used to render the entries
//! of a parameter list (0x8103 set command, 0x0104 query response): the
//! standard JT/T 808 ids the devices in the field use, plus the
//! vendor-specific 0xF0xx range.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Declared value type of a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ParamType {
    Byte,
    Word,
    Dword,
    String,
}

/// How to label and render one parameter id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterDefinition {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ParamType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(default, rename = "map", skip_serializing_if = "BTreeMap::is_empty")]
    pub enum_map: BTreeMap<u64, String>,
}

impl ParameterDefinition {
    /// Enumeration label for `value`, if the definition has one.
    pub fn label_for(&self, value: u64) -> Option<&str> {
        self.enum_map.get(&value).map(String::as_str)
    }
}

type ParamRow = (
    u32,
    &'static str,
    ParamType,
    Option<&'static str>,
    &'static [(u64, &'static str)],
);

const OFF_ON: &[(u64, &str)] = &[(0, "off"), (1, "on")];

/// Built-in parameter definitions: (id, name, type, unit, enumeration).
pub const PARAM_DEFS: &[ParamRow] = &[
    (0x0001, "Heartbeat interval", ParamType::Dword, Some("s"), &[]),
    (0x0010, "APN server", ParamType::String, None, &[]),
    (0x0011, "APN user", ParamType::String, None, &[]),
    (0x0012, "APN password", ParamType::String, None, &[]),
    (0x0013, "Main server", ParamType::String, None, &[]),
    (0x0017, "Backup server", ParamType::String, None, &[]),
    (0x0018, "Main server port", ParamType::Dword, None, &[]),
    (0x0027, "Sleep interval", ParamType::Dword, Some("s"), &[]),
    (0x0029, "Run interval", ParamType::Dword, Some("s"), &[]),
    (0x0030, "Turn angle", ParamType::Dword, Some("degrees"), &[]),
    (0x0055, "Maximum speed", ParamType::Dword, Some("km/h"), &[]),
    (0x0056, "Overspeed duration", ParamType::Dword, Some("s"), &[]),
    (0x0080, "Odometer", ParamType::Dword, Some("0.1 km"), &[]),
    (0xF000, "Device ID", ParamType::String, None, &[]),
    (0xF001, "Running voltage", ParamType::Dword, Some("mV"), &[]),
    (0xF002, "Parked voltage", ParamType::Dword, Some("mV"), &[]),
    (0xF003, "Sleep voltage", ParamType::Word, Some("mV"), &[]),
    (0xF004, "NTP server", ParamType::String, None, &[]),
    (0xF005, "NTP port", ParamType::Dword, None, &[]),
    (0xF006, "Time zone", ParamType::Byte, None, &[]),
    (0xF007, "Protocol type", ParamType::Byte, None, &[(0, "JTT808"), (1, "TAIP")]),
    (
        0xF009,
        "Encryption",
        ParamType::Byte,
        None,
        &[(0, "NULL"), (1, "RSA"), (2, "AES"), (3, "XTEA")],
    ),
    (
        0xF00A,
        "GNSS",
        ParamType::Byte,
        None,
        &[(0, "GPS+BD"), (1, "GPS+GLO"), (2, "GPS+GAL")],
    ),
    (0xF00B, "WiFi", ParamType::Byte, None, OFF_ON),
    (0xF00C, "WiFi mode", ParamType::Byte, None, &[(0, "AP"), (1, "STA")]),
    (0xF00F, "Bluetooth", ParamType::Byte, None, OFF_ON),
    (0xF010, "Bluetooth mode", ParamType::Byte, None, &[(0, "host"), (1, "slave")]),
    (0xF011, "Max Bluetooth nodes", ParamType::Byte, None, &[]),
    (0xF012, "BT scan timeout", ParamType::Byte, Some("min"), &[]),
    (0xF014, "BT sensor mask", ParamType::Byte, None, &[]),
    (0xF015, "GPIO mode", ParamType::Word, None, &[]),
    (0xF016, "GPIO direction", ParamType::Byte, None, &[]),
    (
        0xF017,
        "Communication protocol",
        ParamType::Byte,
        None,
        &[(0, "TCP"), (1, "UDP"), (2, "MQTT")],
    ),
    (0xF018, "Report mask", ParamType::Dword, None, &[]),
    (0xF01A, "Accelerometer sensitivity", ParamType::Byte, None, &[]),
    (
        0xF01B,
        "Accelerometer range",
        ParamType::Byte,
        None,
        &[(0, "±2g"), (1, "±4g"), (2, "±8g"), (3, "±16g")],
    ),
    (0xF01D, "Accelerometer motion", ParamType::Dword, None, &[]),
    (0xF01F, "Accelerometer report mask", ParamType::Byte, None, &[]),
    (0xF02B, "Backup server port", ParamType::Dword, None, &[]),
    (0xF02C, "Buffer enable", ParamType::Byte, None, OFF_ON),
    (0xF02D, "Server ack enable", ParamType::Byte, None, OFF_ON),
    (0xF030, "AT command", ParamType::String, None, &[]),
];

/// Builds an owned definition from a table row.
pub fn definition_from_row(row: &ParamRow) -> (u32, ParameterDefinition) {
    let (id, name, kind, unit, map) = *row;
    (
        id,
        ParameterDefinition {
            name: name.to_string(),
            kind,
            unit: unit.map(str::to_string),
            enum_map: map.iter().map(|(k, v)| (*k, v.to_string())).collect(),
        },
    )
}
