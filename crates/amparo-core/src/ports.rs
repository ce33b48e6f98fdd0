//! Port traits — the platform boundary.
//!
//! Defined here in `amparo-core` (pure Rust); implementations live in
//! `amparo-platform` (browser adapters). The core never imports platform
//! code; it only depends on this trait.

use amparo_types::Result;

/// Tab-scoped key/value storage with string values.
///
/// Synchronous on purpose: every session-store operation must complete
/// without suspension, and the browser backend (`localStorage`) is itself
/// synchronous. Errors carry the real cause; the session store decides
/// whether to absorb them.
pub trait StorageBackend {
    /// Get a value by key
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Set a value, overwriting any previous one
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove a value; removing a missing key is not an error
    fn remove(&self, key: &str) -> Result<()>;

    /// List keys with a given prefix
    fn list_keys(&self, prefix: &str) -> Result<Vec<String>>;

    /// Check if a key exists
    fn exists(&self, key: &str) -> Result<bool> {
        Ok(self.get(key)?.is_some())
    }

    /// Name of this backend (for logging/debug)
    fn backend_name(&self) -> &str;
}
