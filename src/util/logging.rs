//! # Frame Logging Utilities
//!
//! Logging helpers shared by the decoder: bounded hex dumps of frames,
//! structured one-line summaries, and an optional `tracing` span around a
//! decode pass.
//!
//! ## Usage
//!
//! ```rust
//! use jt808_rs::util::logging::log_frame_hex;
//!
//! let frame = [0x7E, 0x00, 0x02, 0x7E];
//! log_frame_hex("Received frame", &frame);
//! ```

/// Hex output is cut at this many bytes to keep log lines readable
const MAX_LOG_BYTES: usize = 64;

/// Log frame data in hex format for debugging
pub fn log_frame_hex(prefix: &str, data: &[u8]) {
    let display_data = &data[..data.len().min(MAX_LOG_BYTES)];

    let hex_str = crate::util::hex::format_hex_compact(display_data);
    let suffix = if data.len() > MAX_LOG_BYTES {
        format!(" ... ({} bytes total)", data.len())
    } else {
        String::new()
    };

    log::debug!(target: "jt808::frame", "{prefix}: {hex_str}{suffix}");
}

/// Log the outcome of a decode pass on one line.
pub fn log_frame_structured(
    message_id: Option<u16>,
    payload_len: usize,
    errors: usize,
    warnings: usize,
    checksum_valid: bool,
) {
    log::debug!(
        target: "jt808::decode",
        "decoded: id={}, payload={} bytes, errors={}, warnings={}, checksum_valid={}",
        message_id.map_or_else(|| "-".to_string(), |id| format!("0x{id:04X}")),
        payload_len,
        errors,
        warnings,
        checksum_valid
    );
}

/// Create a tracing span for one decode pass
#[cfg(feature = "tracing")]
pub fn span_frame_decode(frame_len: usize) -> tracing::Span {
    tracing::debug_span!("jt808_decode", frame_len = frame_len)
}

/// Fallback span creation when tracing is not available
#[cfg(not(feature = "tracing"))]
pub fn span_frame_decode(_frame_len: usize) {}

/// Debug logging for protocol analysis
pub mod debug {
    /// Log checksum validation results
    pub fn log_checksum_result(received: Option<u8>, computed: Option<u8>, valid: bool) {
        if valid {
            log::debug!("Checksum valid: {:02X}", computed.unwrap_or_default());
        } else if let (Some(received), Some(computed)) = (received, computed) {
            log::debug!("Checksum mismatch: received {received:02X}, computed {computed:02X}");
        }
    }
}
