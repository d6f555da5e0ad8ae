//! The payload module contains the components responsible for interpreting
//! the body of a JT808 message: byte-level codecs, per-message body
//! decoders, the parameter list parser and the lookup registries.

pub mod body;
pub mod data_encoding;
pub mod field;
pub mod location;
pub mod message_maps;
pub mod param_maps;
pub mod params;
pub mod registry;

pub use body::{interpret_body, BodyInterpretation, MessageKind};
pub use data_encoding::*;
pub use field::{ByteRange, FieldLine};
pub use location::{LocationBasic, LocationExtension};
pub use message_maps::MessageTypeInfo;
pub use param_maps::{ParamType, ParameterDefinition};
pub use params::{format_param_value, parse_param_list, ParamListResult, ParameterEntry};

/// Shared message and parameter lookup tables.
pub use registry::Registry;
