use novel_core::{PreferenceStore, StoreError};
use web_sys as web;

/// `window.localStorage` behind the core's store trait.
pub struct LocalStore {
    storage: Option<web::Storage>,
}

impl LocalStore {
    pub fn open() -> Self {
        let storage = web::window().and_then(|w| w.local_storage().ok().flatten());
        if storage.is_none() {
            log::warn!("[prefs] localStorage unavailable; settings will not persist");
        }
        Self { storage }
    }

    fn storage(&self) -> Result<&web::Storage, StoreError> {
        self.storage
            .as_ref()
            .ok_or_else(|| StoreError::Unavailable("localStorage".to_string()))
    }
}

impl PreferenceStore for LocalStore {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.storage()?.get_item(key).map_err(|e| StoreError::Read {
            key: key.to_string(),
            reason: format!("{:?}", e),
        })
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.storage()?
            .set_item(key, value)
            .map_err(|e| StoreError::Write {
                key: key.to_string(),
                reason: format!("{:?}", e),
            })
    }
}
