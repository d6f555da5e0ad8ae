//! The jt808 module contains the core frame decoding pipeline: delimiter and
//! escape handling, header decoding, checksum validation and the decoder
//! that ties them together.

pub mod checksum;
pub mod decoder;
pub mod frame;
pub mod header;

pub use checksum::{validate, xor_checksum, ChecksumReport};
pub use decoder::{decode_frame, decode_hex_str, DecodeResult, Decoder};
pub use frame::{extract_frame, unescape_payload, ExtractedFrame};
pub use header::{
    decode_header, encryption_label, read_sub_package, DeviceId, Header, Properties, PropertyFlags,
    SubPackageInfo,
};
