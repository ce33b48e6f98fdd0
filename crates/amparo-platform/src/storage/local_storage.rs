//! Browser `localStorage` backend.
//! Tab-scoped, persistent across page reloads, synchronous. Private
//! browsing modes and storage quotas surface as `ChatError::Storage` from
//! the individual operations; the session store absorbs those.

use wasm_bindgen::JsValue;
use web_sys::Storage;

use amparo_core::ports::StorageBackend;
use amparo_types::{ChatError, Result};

pub struct LocalStorage {
    storage: Storage,
}

impl LocalStorage {
    /// Bind to the window's localStorage. Fails when there is no window
    /// (worker context) or the browser has storage disabled.
    pub fn open() -> Result<Self> {
        let window = web_sys::window()
            .ok_or_else(|| ChatError::Storage("no window object".to_string()))?;
        let storage = window
            .local_storage()
            .map_err(js_err)?
            .ok_or_else(|| ChatError::Storage("localStorage disabled".to_string()))?;
        Ok(Self { storage })
    }
}

impl StorageBackend for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.storage.get_item(key).map_err(js_err)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        // QuotaExceededError lands here
        self.storage.set_item(key, value).map_err(js_err)
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.storage.remove_item(key).map_err(js_err)
    }

    fn list_keys(&self, prefix: &str) -> Result<Vec<String>> {
        let len = self.storage.length().map_err(js_err)?;
        let mut keys = Vec::new();
        for i in 0..len {
            if let Some(key) = self.storage.key(i).map_err(js_err)? {
                if key.starts_with(prefix) {
                    keys.push(key);
                }
            }
        }
        Ok(keys)
    }

    fn backend_name(&self) -> &str {
        "localstorage"
    }
}

fn js_err(e: JsValue) -> ChatError {
    ChatError::Storage(format!("{:?}", e))
}
