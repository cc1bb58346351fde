//! Browser Storage Backend
//!
//! `localStorage` behind the core crate's `KeyValueBackend`. When storage is
//! unavailable (private mode, sandboxed frame) reads come back empty and
//! writes fail, so the dashboard keeps running on defaults.

use medlinks_core::{FaviconConfig, KeyValueBackend, StoreError, StoreResult};
use wasm_bindgen::JsValue;

/// Key holding optional favicon overrides as JSON
pub const FAVICON_CONFIG_KEY: &str = "faviconConfig";

pub struct BrowserStorage {
    storage: Option<web_sys::Storage>,
}

impl BrowserStorage {
    pub fn open() -> Self {
        let storage = web_sys::window().and_then(|w| w.local_storage().ok().flatten());
        if storage.is_none() {
            log::warn!("[STORE] localStorage unavailable, changes will not persist");
        }
        Self { storage }
    }
}

fn reason(e: JsValue) -> String {
    e.as_string().unwrap_or_else(|| format!("{:?}", e))
}

impl KeyValueBackend for BrowserStorage {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let Some(storage) = &self.storage else {
            return Ok(None);
        };
        storage.get_item(key).map_err(|e| StoreError::Read {
            key: key.to_string(),
            reason: reason(e),
        })
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        let Some(storage) = &self.storage else {
            return Err(StoreError::Write {
                key: key.to_string(),
                reason: "localStorage unavailable".to_string(),
            });
        };
        storage.set_item(key, value).map_err(|e| StoreError::Write {
            key: key.to_string(),
            reason: reason(e),
        })
    }
}

/// Favicon tunables, with any stored overrides applied
pub fn load_favicon_config(storage: &BrowserStorage) -> FaviconConfig {
    match storage.get(FAVICON_CONFIG_KEY) {
        Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|e| {
            log::warn!("[FAVICON] Ignoring malformed `{}`: {}", FAVICON_CONFIG_KEY, e);
            FaviconConfig::default()
        }),
        _ => FaviconConfig::default(),
    }
}
