//! Key-value persistence of [`VolumePreferences`].
//!
//! The store is a trait so the browser's `localStorage` and the in-memory
//! store used by host tests share the same load/save path. Reads overlay the
//! stored blob onto the defaults; anything unreadable is ignored.

use crate::constants::PREFERENCES_KEY;
use crate::volume::VolumePreferences;
use serde::Deserialize;
use serde_json::Value;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error("failed to read `{key}`: {reason}")]
    Read { key: String, reason: String },
    #[error("failed to write `{key}`: {reason}")]
    Write { key: String, reason: String },
    #[error("failed to encode preferences: {0}")]
    Encode(#[from] serde_json::Error),
}

pub trait PreferenceStore {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn write(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// In-memory store. Clones share the same backing map, which models two
/// controller instances opened over the same browser storage.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }
}

impl PreferenceStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Read the persisted blob and overlay it on the defaults.
///
/// Missing keys keep their default, unknown keys are ignored, and stored
/// values are clamped. A failed read or unparseable blob yields the defaults.
pub fn load_preferences(store: &impl PreferenceStore) -> VolumePreferences {
    let raw = match store.read(PREFERENCES_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return VolumePreferences::default(),
        Err(e) => {
            log::warn!("[prefs] {e}; using defaults");
            return VolumePreferences::default();
        }
    };
    match parse_blob(&raw) {
        Ok(prefs) => prefs.clamped(),
        Err(reason) => {
            log::warn!("[prefs] ignoring unreadable settings blob: {reason}");
            VolumePreferences::default()
        }
    }
}

/// Only a JSON object is overlaid; arrays and scalars count as corrupt.
fn parse_blob(raw: &str) -> Result<VolumePreferences, String> {
    let value: Value = serde_json::from_str(raw).map_err(|e| e.to_string())?;
    if !value.is_object() {
        return Err(format!("expected an object, found `{raw}`"));
    }
    VolumePreferences::deserialize(value).map_err(|e| e.to_string())
}

pub fn save_preferences(
    store: &mut impl PreferenceStore,
    prefs: &VolumePreferences,
) -> Result<(), StoreError> {
    let json = serde_json::to_string(prefs)?;
    store.write(PREFERENCES_KEY, &json)
}
