/// The persisted enable flag in chrome.storage.local

use crate::chrome;
use crate::errors::ExtensionError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

pub const ENABLED_KEY: &str = "enabled";

fn default_enabled() -> bool {
    true
}

/// Everything the extension keeps in storage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

impl Settings {
    pub fn new(enabled: bool) -> Self {
        Settings { enabled }
    }

    /// Settings with the bit flipped, as the popup toggle does
    pub fn toggled(self) -> Self {
        Settings {
            enabled: !self.enabled,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            enabled: default_enabled(),
        }
    }
}

/// One entry of a `storage.onChanged` payload
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct StorageChange {
    #[serde(rename = "oldValue", default)]
    pub old_value: Option<Value>,
    #[serde(rename = "newValue", default)]
    pub new_value: Option<Value>,
}

pub type StorageChanges = HashMap<String, StorageChange>;

/// How a running content script answers a flag change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagReaction {
    /// Turned on: restart from a clean page
    ReloadPage,
    /// Turned off or cleared: tear down without reloading
    StopScanning,
}

/// `None` when the change set does not touch the enable flag
pub fn flag_reaction(changes: &StorageChanges) -> Option<FlagReaction> {
    changes.get(ENABLED_KEY).map(|change| match change.new_value {
        Some(Value::Bool(true)) => FlagReaction::ReloadPage,
        _ => FlagReaction::StopScanning,
    })
}

/// Read the settings, filling in defaults for absent keys
pub async fn load() -> Result<Settings, ExtensionError> {
    let stored = chrome::get_storage(&[ENABLED_KEY]).await?;
    if stored.is_null() || stored.is_undefined() {
        return Ok(Settings::default());
    }

    serde_wasm_bindgen::from_value(stored).map_err(|e| ExtensionError::decode("settings", e))
}

/// Overwrite the stored settings
pub async fn store(settings: Settings) -> Result<(), ExtensionError> {
    let value = serde_wasm_bindgen::to_value(&settings)
        .map_err(|e| ExtensionError::decode("settings", e))?;
    chrome::set_storage(value).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn changes(value: Value) -> StorageChanges {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_absent_flag_defaults_to_enabled() {
        let settings: Settings = serde_json::from_str("{}").unwrap();
        assert!(settings.enabled);
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_stored_flag_is_respected() {
        let settings: Settings = serde_json::from_str(r#"{"enabled": false}"#).unwrap();
        assert!(!settings.enabled);
    }

    #[test]
    fn test_serialization() {
        let json = serde_json::to_value(Settings::new(false)).unwrap();
        assert_eq!(json, json!({ "enabled": false }));
    }

    #[test]
    fn test_toggled() {
        assert_eq!(Settings::new(true).toggled(), Settings::new(false));
        assert_eq!(Settings::new(false).toggled(), Settings::new(true));
    }

    #[test]
    fn test_enable_reloads() {
        let c = changes(json!({ "enabled": { "oldValue": false, "newValue": true } }));
        assert_eq!(flag_reaction(&c), Some(FlagReaction::ReloadPage));
    }

    #[test]
    fn test_disable_stops() {
        let c = changes(json!({ "enabled": { "oldValue": true, "newValue": false } }));
        assert_eq!(flag_reaction(&c), Some(FlagReaction::StopScanning));
    }

    #[test]
    fn test_removed_flag_stops() {
        let c = changes(json!({ "enabled": { "oldValue": true } }));
        assert_eq!(flag_reaction(&c), Some(FlagReaction::StopScanning));
    }

    #[test]
    fn test_unrelated_keys_are_ignored() {
        let c = changes(json!({ "theme": { "newValue": "dark" } }));
        assert_eq!(flag_reaction(&c), None);
    }
}
