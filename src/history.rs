//! # Decode History
//!
//! A small JSON file remembering the frames an operator decoded, newest
//! first. Entries are keyed by their normalized hex text, so decoding the
//! same frame again moves it to the front instead of duplicating it.
//!
//! The file is advisory: a missing or unreadable file loads as an empty
//! history rather than failing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Jt808Error;
use crate::jt808::decoder::{decode_frame, DecodeResult};
use crate::util::hex::{decode_hex, normalize_hex};

/// Maximum number of remembered frames.
pub const HISTORY_LIMIT: usize = 30;

const PREVIEW_LENGTH: usize = 64;

/// File name used when no path is configured.
pub const DEFAULT_HISTORY_FILE: &str = "jt808_history.json";

/// One remembered frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Normalized (sanitized, uppercase) hex text.
    pub hex: String,
    pub timestamp: DateTime<Utc>,
}

/// Short description of a history entry, derived by decoding it again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntrySummary {
    pub valid: bool,
    /// `0xNNNN`, or `Unknown` without a message id.
    pub id_label: String,
    /// Raw frame length in bytes.
    pub length: usize,
}

impl fmt::Display for EntrySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} | {} | {} bytes",
            if self.valid { "Valid" } else { "Invalid" },
            self.id_label,
            self.length
        )
    }
}

impl HistoryEntry {
    pub fn summary(&self) -> EntrySummary {
        let bytes = decode_hex(&self.hex).unwrap_or_default();
        let result = decode_frame(&bytes);
        EntrySummary {
            valid: !result.has_errors(),
            id_label: result
                .message_id
                .map_or_else(|| "Unknown".to_string(), |id| format!("0x{id:04X}")),
            length: bytes.len(),
        }
    }

    /// First 64 hex characters, with `...` when cut.
    pub fn preview(&self) -> String {
        let mut chars = self.hex.chars();
        let head: String = chars.by_ref().take(PREVIEW_LENGTH).collect();
        if chars.next().is_some() {
            format!("{head}...")
        } else {
            head
        }
    }

    /// Whether `hex` is non-empty, even-length, normalized hex text.
    fn is_well_formed(&self) -> bool {
        !self.hex.is_empty() && self.hex.len() % 2 == 0 && normalize_hex(&self.hex) == self.hex
    }
}

/// Persistent list of decoded frames.
#[derive(Debug, Clone)]
pub struct History {
    path: PathBuf,
    entries: Vec<HistoryEntry>,
}

impl History {
    /// Loads the history at `path`, falling back to an empty list.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let entries = match fs::read_to_string(&path) {
            Ok(text) => match serde_json::from_str::<Vec<HistoryEntry>>(&text) {
                Ok(mut entries) => {
                    let before = entries.len();
                    entries.retain(HistoryEntry::is_well_formed);
                    if entries.len() < before {
                        log::warn!(
                            "Dropped {} malformed history entries from {}",
                            before - entries.len(),
                            path.display()
                        );
                    }
                    entries.truncate(HISTORY_LIMIT);
                    entries
                }
                Err(e) => {
                    log::warn!("Ignoring unreadable history file {}: {e}", path.display());
                    Vec::new()
                }
            },
            Err(e) => {
                log::debug!("No history loaded from {}: {e}", path.display());
                Vec::new()
            }
        };
        Self { path, entries }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remembers `input` if `result` (its decode) has no errors.
    ///
    /// Returns whether the entry was recorded.
    pub fn record(&mut self, input: &str, result: &DecodeResult) -> bool {
        self.record_at(input, result, Utc::now())
    }

    /// Like [`History::record`] with an explicit timestamp.
    pub fn record_at(
        &mut self,
        input: &str,
        result: &DecodeResult,
        timestamp: DateTime<Utc>,
    ) -> bool {
        if result.has_errors() {
            return false;
        }
        let hex = normalize_hex(input);
        if hex.is_empty() || hex.len() % 2 != 0 {
            return false;
        }

        self.entries.retain(|entry| entry.hex != hex);
        self.entries.insert(0, HistoryEntry { hex, timestamp });
        self.entries.truncate(HISTORY_LIMIT);
        true
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Writes the history back to its file.
    pub fn save(&self) -> Result<(), Jt808Error> {
        let json = serde_json::to_string_pretty(&self.entries)?;
        fs::write(&self.path, json)?;
        log::debug!("Saved {} history entries to {}", self.entries.len(), self.path.display());
        Ok(())
    }
}
