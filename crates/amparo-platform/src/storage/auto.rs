//! Auto-detect the best available storage backend.
//!
//! Priority: localStorage → Memory (fallback). Memory is also what every
//! non-browser target gets, which keeps native test runs off the wall.

use std::rc::Rc;

use amparo_core::ports::StorageBackend;
use amparo_types::config::StorageBackendType;
use amparo_types::{ChatError, Result};

use super::MemoryStorage;

/// Pick the best available backend. Never fails: when tab storage is not
/// usable the session simply will not survive a reload.
pub fn auto_detect_storage() -> Rc<dyn StorageBackend> {
    #[cfg(target_arch = "wasm32")]
    {
        match super::LocalStorage::open() {
            Ok(ls) => {
                log::info!("Storage backend: localStorage");
                return Rc::new(ls);
            }
            Err(e) => {
                log::warn!("localStorage unavailable ({}), falling back to memory", e);
            }
        }
    }
    log::info!("Storage backend: memory");
    Rc::new(MemoryStorage::new())
}

/// Open the backend named in the config.
pub fn storage_for(backend: &StorageBackendType) -> Result<Rc<dyn StorageBackend>> {
    match backend {
        StorageBackendType::Auto => Ok(auto_detect_storage()),
        StorageBackendType::Memory => Ok(Rc::new(MemoryStorage::new())),
        StorageBackendType::LocalStorage => {
            #[cfg(target_arch = "wasm32")]
            {
                super::LocalStorage::open().map(|ls| Rc::new(ls) as Rc<dyn StorageBackend>)
            }
            #[cfg(not(target_arch = "wasm32"))]
            {
                Err(ChatError::Storage(
                    "localStorage requires a browser".to_string(),
                ))
            }
        }
    }
}
