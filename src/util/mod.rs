//! # Utility Modules
//!
//! This module provides common utility functions used throughout the
//! jt808-rs crate: hex encoding/decoding and frame logging helpers.

pub mod hex;
pub mod logging;

// Re-export commonly used types and functions
pub use hex::{
    decode_hex, encode_hex_upper, format_hex_compact, hex_to_bytes, sanitize_hex, HexError,
};
pub use logging::{log_frame_hex, log_frame_structured};
