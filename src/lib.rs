//! # jt808-rs - A Rust Crate for JT/T 808 Frame Decoding
//!
//! The jt808-rs crate decodes frames of the JT/T 808 vehicle-telematics
//! protocol into a field-by-field representation suited for inspection and
//! troubleshooting.
//!
//! ## Features
//!
//! - Strip `0x7E` delimiters and undo `0x7D` byte stuffing
//! - Decode the 12-byte header: message id, body properties, BCD device id, sequence number
//! - Read sub-package information when the properties ask for it
//! - Interpret bodies of registration, authentication, heartbeat, general response,
//!   location report and parameter set/query messages
//! - Render parameter lists through a registry of typed definitions, extensible from JSON
//! - Validate the XOR check code
//! - Collect errors and warnings instead of failing, so malformed frames still decode as far as possible
//! - Plain-text and JSON reports, plus a small persisted decode history
//!
//! ## Usage
//!
//! ```rust
//! use jt808_rs::{decode_hex_str, report, Registry};
//!
//! let result = decode_hex_str("7E000200003440500493730104C77E").unwrap();
//! assert!(result.errors.is_empty());
//! assert_eq!(result.message_id, Some(0x0002));
//!
//! println!("{}", report::render_text(&result, Registry::builtin()));
//! ```

pub mod constants;
pub mod error;
pub mod history;
pub mod jt808;
pub mod logging;
pub mod payload;
pub mod report;
pub mod util;

pub use crate::error::{DecodeError, DecodeWarning, Jt808Error};
pub use crate::logging::{init_logger, log_info};

// Core decoding pipeline
pub use jt808::{decode_frame, decode_hex_str, DecodeResult, Decoder};
pub use jt808::{DeviceId, Header, Properties, PropertyFlags, SubPackageInfo};

// Body interpretation and lookup tables
pub use payload::{
    interpret_body, parse_param_list, BodyInterpretation, ByteRange, FieldLine, MessageKind,
    MessageTypeInfo, ParamType, ParameterDefinition, ParameterEntry, Registry,
};

// Presentation and persistence
pub use history::{History, HistoryEntry, HISTORY_LIMIT};
pub use report::{ReportRow, Status};
pub use util::hex::HexError;
