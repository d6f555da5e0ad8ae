//! JT808 check code: XOR of every byte from the message id up to the last
//! body byte. Note that any content whose bytes XOR to zero validates
//! against a zero check code, including an all-zero header.

use serde::Serialize;

/// Received and computed check codes for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChecksumReport {
    pub received: Option<u8>,
    pub computed: Option<u8>,
    pub valid: bool,
}

/// XOR-fold of `content`, or `None` if it is empty.
pub fn xor_checksum(content: &[u8]) -> Option<u8> {
    if content.is_empty() {
        return None;
    }
    Some(content.iter().fold(0u8, |acc, b| acc ^ b))
}

/// Compares the received check code against the one computed over `content`.
pub fn validate(content: &[u8], received: Option<u8>) -> ChecksumReport {
    let computed = xor_checksum(content);
    let valid = matches!((received, computed), (Some(r), Some(c)) if r == c);
    crate::util::logging::debug::log_checksum_result(received, computed, valid);
    ChecksumReport {
        received,
        computed,
        valid,
    }
}
