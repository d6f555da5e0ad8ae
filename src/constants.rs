//! JT/T 808 Protocol Constants
//!
//! This module defines the framing bytes, header layout, properties bit ranges
//! and message identifiers used by the decoder.

// ----------------------------------------------------------------------------
// Framing
// ----------------------------------------------------------------------------

/// Frame delimiter at both ends of a frame
pub const JT808_FLAG: u8 = 0x7E;

/// Escape byte introducing a two-byte stuffing sequence
pub const JT808_ESCAPE: u8 = 0x7D;

/// Second byte of `7D 02`, which stands for the delimiter
pub const JT808_ESCAPE_FLAG: u8 = 0x02;

/// Second byte of `7D 01`, which stands for the escape byte itself
pub const JT808_ESCAPE_ESCAPE: u8 = 0x01;

// ----------------------------------------------------------------------------
// Header layout (offsets relative to the content start)
// ----------------------------------------------------------------------------

pub const JT808_HEADER_LENGTH: usize = 12;

/// Header plus the trailing checksum byte
pub const JT808_MIN_FRAME_LENGTH: usize = JT808_HEADER_LENGTH + 1;

pub const JT808_OFFSET_MESSAGE_ID: usize = 0;
pub const JT808_OFFSET_PROPERTIES: usize = 2;
pub const JT808_OFFSET_DEVICE_ID: usize = 4;
pub const JT808_DEVICE_ID_LENGTH: usize = 6;
pub const JT808_OFFSET_SEQUENCE: usize = 10;

/// Total packages (2) + package index (2)
pub const JT808_SUB_PACKAGE_LENGTH: usize = 4;

// ----------------------------------------------------------------------------
// Properties word: 10/3/1/1/1 bit layout
// ----------------------------------------------------------------------------

pub const JT808_PROPS_MASK_BODY_LENGTH: u16 = 0x03FF;
pub const JT808_PROPS_SHIFT_ENCRYPTION: u16 = 10;
pub const JT808_PROPS_MASK_ENCRYPTION: u16 = 0x07;
pub const JT808_PROPS_BIT_SUB_PACKAGE: u16 = 0x2000;
pub const JT808_PROPS_BIT_RESERVED_14: u16 = 0x4000;
pub const JT808_PROPS_BIT_RESERVED_15: u16 = 0x8000;

// ----------------------------------------------------------------------------
// Message identifiers
// ----------------------------------------------------------------------------

pub const JT808_MSG_DEVICE_GENERAL_RESPONSE: u16 = 0x0001;
pub const JT808_MSG_HEARTBEAT: u16 = 0x0002;
pub const JT808_MSG_REGISTRATION: u16 = 0x0100;
pub const JT808_MSG_AUTHENTICATION: u16 = 0x0102;
pub const JT808_MSG_PARAMETER_QUERY_RESPONSE: u16 = 0x0104;
pub const JT808_MSG_LOCATION_REPORT: u16 = 0x0200;
pub const JT808_MSG_ADDITIONAL_INFORMATION: u16 = 0x0900;
pub const JT808_MSG_SERVER_GENERAL_RESPONSE: u16 = 0x8001;
pub const JT808_MSG_REGISTRATION_RESPONSE: u16 = 0x8100;
pub const JT808_MSG_PARAMETER_SET: u16 = 0x8103;
pub const JT808_MSG_PARAMETER_QUERY: u16 = 0x8104;

// ----------------------------------------------------------------------------
// Body layouts
// ----------------------------------------------------------------------------

/// Fixed basic-information prefix of a location report
pub const JT808_LOCATION_BASIC_LENGTH: usize = 28;

/// Parameter entry header: 4-byte id + 1-byte length
pub const JT808_PARAM_HEADER_LENGTH: usize = 5;

/// Location extension record header: 1-byte id + 1-byte length
pub const JT808_EXTENSION_HEADER_LENGTH: usize = 2;

pub const JT808_REGISTRATION_MIN_LENGTH: usize = 38;
pub const JT808_REGISTRATION_RESPONSE_MIN_LENGTH: usize = 3;
pub const JT808_GENERAL_RESPONSE_MIN_LENGTH: usize = 5;
pub const JT808_PARAMETER_SET_MIN_LENGTH: usize = 1;
pub const JT808_PARAMETER_QUERY_RESPONSE_MIN_LENGTH: usize = 3;

/// Sample heartbeat frame
pub const JT808_SAMPLE_FRAME: &str = "7E000200003440500493730104C77E";
