//! Lookup registry for message descriptions and parameter definitions.
//!
//! The built-in registry is constructed once from the embedded tables and
//! shared read-only by every decode. A custom registry can be derived from
//! it by merging a JSON override document:
//!
//! ```json
//! {
//!   "parameters": [
//!     { "id": "0xF040", "name": "Tow alarm", "type": "BYTE", "map": { "0": "off", "1": "on" } }
//!   ],
//!   "messages": [
//!     { "id": "0x0704", "name": "Bulk Location Upload", "flow": "Batch of 0x0200 reports." }
//!   ]
//! }
//! ```

use once_cell::sync::Lazy;
use serde::{Deserialize, Deserializer};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use crate::error::Jt808Error;
use crate::payload::message_maps::{info_from_row, MessageTypeInfo, MESSAGE_ID_INFO};
use crate::payload::param_maps::{definition_from_row, ParamType, ParameterDefinition, PARAM_DEFS};

static BUILTIN: Lazy<Registry> = Lazy::new(Registry::from_tables);

/// Message-type and parameter-definition lookup tables.
#[derive(Debug, Clone, PartialEq)]
pub struct Registry {
    messages: HashMap<u16, MessageTypeInfo>,
    parameters: HashMap<u32, ParameterDefinition>,
}

impl Registry {
    /// The shared registry built from the embedded tables.
    pub fn builtin() -> &'static Registry {
        &BUILTIN
    }

    /// Builds a fresh registry from the embedded tables.
    pub fn from_tables() -> Self {
        Self {
            messages: MESSAGE_ID_INFO.iter().map(info_from_row).collect(),
            parameters: PARAM_DEFS.iter().map(definition_from_row).collect(),
        }
    }

    pub fn message(&self, id: u16) -> Option<&MessageTypeInfo> {
        self.messages.get(&id)
    }

    pub fn parameter(&self, id: u32) -> Option<&ParameterDefinition> {
        self.parameters.get(&id)
    }

    pub fn message_count(&self) -> usize {
        self.messages.len()
    }

    pub fn parameter_count(&self) -> usize {
        self.parameters.len()
    }

    /// Built-in tables with the entries of `json` merged over them.
    pub fn with_overrides_json(json: &str) -> Result<Self, Jt808Error> {
        let overrides: RegistryOverrides = serde_json::from_str(json)?;
        let mut registry = Self::from_tables();
        registry.merge(overrides)?;
        Ok(registry)
    }

    /// Like [`Registry::with_overrides_json`], reading the document from `path`.
    pub fn load_overrides(path: impl AsRef<Path>) -> Result<Self, Jt808Error> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            Jt808Error::InvalidRegistry(format!("cannot read {}: {e}", path.display()))
        })?;
        let registry = Self::with_overrides_json(&json)?;
        log::info!(
            "Loaded registry overrides from {}: {} messages, {} parameters",
            path.display(),
            registry.message_count(),
            registry.parameter_count()
        );
        Ok(registry)
    }

    fn merge(&mut self, overrides: RegistryOverrides) -> Result<(), Jt808Error> {
        for entry in overrides.messages {
            let id = u16::try_from(entry.id).map_err(|_| {
                Jt808Error::InvalidRegistry(format!("message id 0x{:X} exceeds 16 bits", entry.id))
            })?;
            if entry.name.trim().is_empty() {
                return Err(Jt808Error::InvalidRegistry(format!(
                    "message 0x{id:04X} has an empty name"
                )));
            }
            self.messages.insert(
                id,
                MessageTypeInfo {
                    name: entry.name,
                    flow: entry.flow,
                },
            );
        }
        for entry in overrides.parameters {
            let id = u32::try_from(entry.id).map_err(|_| {
                Jt808Error::InvalidRegistry(format!(
                    "parameter id 0x{:X} exceeds 32 bits",
                    entry.id
                ))
            })?;
            if entry.name.trim().is_empty() {
                return Err(Jt808Error::InvalidRegistry(format!(
                    "parameter 0x{id:08X} has an empty name"
                )));
            }
            self.parameters.insert(
                id,
                ParameterDefinition {
                    name: entry.name,
                    kind: entry.kind,
                    unit: entry.unit,
                    enum_map: entry.map,
                },
            );
        }
        Ok(())
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::from_tables()
    }
}

#[derive(Debug, Deserialize)]
struct RegistryOverrides {
    #[serde(default)]
    parameters: Vec<ParameterOverride>,
    #[serde(default)]
    messages: Vec<MessageOverride>,
}

#[derive(Debug, Deserialize)]
struct ParameterOverride {
    #[serde(deserialize_with = "deserialize_id")]
    id: u64,
    name: String,
    #[serde(rename = "type")]
    kind: ParamType,
    #[serde(default)]
    unit: Option<String>,
    #[serde(default)]
    map: BTreeMap<u64, String>,
}

#[derive(Debug, Deserialize)]
struct MessageOverride {
    #[serde(deserialize_with = "deserialize_id")]
    id: u64,
    name: String,
    flow: String,
}

/// Ids may be written as JSON numbers or as `"0x..."` strings.
fn deserialize_id<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum IdRepr {
        Number(u64),
        Text(String),
    }

    match IdRepr::deserialize(deserializer)? {
        IdRepr::Number(n) => Ok(n),
        IdRepr::Text(s) => {
            let trimmed = s.trim();
            let parsed = match trimmed
                .strip_prefix("0x")
                .or_else(|| trimmed.strip_prefix("0X"))
            {
                Some(hex) => u64::from_str_radix(hex, 16),
                None => trimmed.parse::<u64>(),
            };
            parsed.map_err(|_| serde::de::Error::custom(format!("invalid id: {s}")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_lookups() {
        let registry = Registry::builtin();
        assert_eq!(registry.message(0x0002).unwrap().name, "Device Heartbeat");
        assert!(registry.message(0x1234).is_none());
        assert_eq!(registry.parameter(0x0001).unwrap().unit.as_deref(), Some("s"));
        assert!(registry.parameter(0xDEAD).is_none());
        assert_eq!(registry.message_count(), MESSAGE_ID_INFO.len());
        assert_eq!(registry.parameter_count(), PARAM_DEFS.len());
    }

    #[test]
    fn test_builtin_is_shared() {
        assert!(std::ptr::eq(Registry::builtin(), Registry::builtin()));
    }

    #[test]
    fn test_overrides_merge_over_builtin() {
        let json = r#"{
            "parameters": [
                { "id": "0xF040", "name": "Tow alarm", "type": "BYTE", "map": { "1": "on" } },
                { "id": 1, "name": "Keepalive", "type": "DWORD", "unit": "ms" }
            ],
            "messages": [
                { "id": "0x0704", "name": "Bulk Location Upload", "flow": "Batch of reports." }
            ]
        }"#;
        let registry = Registry::with_overrides_json(json).unwrap();

        let tow = registry.parameter(0xF040).unwrap();
        assert_eq!(tow.kind, ParamType::Byte);
        assert_eq!(tow.label_for(1), Some("on"));

        let keepalive = registry.parameter(0x0001).unwrap();
        assert_eq!(keepalive.name, "Keepalive");
        assert_eq!(keepalive.unit.as_deref(), Some("ms"));

        assert_eq!(registry.message(0x0704).unwrap().name, "Bulk Location Upload");
        // untouched built-ins survive
        assert!(registry.message(0x0200).is_some());
        // the shared registry is not modified
        assert_eq!(Registry::builtin().parameter(0x0001).unwrap().name, "Heartbeat interval");
    }

    #[test]
    fn test_overrides_reject_bad_entries() {
        let too_wide = r#"{ "messages": [ { "id": 70000, "name": "x", "flow": "y" } ] }"#;
        assert!(matches!(
            Registry::with_overrides_json(too_wide),
            Err(Jt808Error::InvalidRegistry(_))
        ));

        let empty_name = r#"{ "parameters": [ { "id": 5, "name": " ", "type": "BYTE" } ] }"#;
        assert!(matches!(
            Registry::with_overrides_json(empty_name),
            Err(Jt808Error::InvalidRegistry(_))
        ));

        assert!(matches!(
            Registry::with_overrides_json("not json"),
            Err(Jt808Error::Json(_))
        ));

        let bad_id = r#"{ "parameters": [ { "id": "0xZZ", "name": "x", "type": "BYTE" } ] }"#;
        assert!(Registry::with_overrides_json(bad_id).is_err());
    }
}
