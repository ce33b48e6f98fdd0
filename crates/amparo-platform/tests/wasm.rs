//! WASM-target tests for amparo-platform (Node.js runtime).
//!
//! Tests MemoryStorage under wasm32-unknown-unknown via
//! `wasm-pack test --node`.
//!
//! LocalStorage needs a real window object, so those paths are only
//! exercised with `wasm-pack test --chrome`.

#![cfg(target_arch = "wasm32")]

use wasm_bindgen_test::*;

use amparo_core::ports::StorageBackend;
use amparo_platform::storage::MemoryStorage;

#[wasm_bindgen_test]
fn memory_storage_backend_name() {
    let storage = MemoryStorage::new();
    assert_eq!(storage.backend_name(), "memory");
}

#[wasm_bindgen_test]
fn memory_storage_set_and_get() {
    let storage = MemoryStorage::new();
    storage.set("key1", "value1").unwrap();
    assert_eq!(storage.get("key1").unwrap(), Some("value1".to_string()));
}

#[wasm_bindgen_test]
fn memory_storage_remove() {
    let storage = MemoryStorage::new();
    storage.set("key", "val").unwrap();
    storage.remove("key").unwrap();
    assert!(storage.get("key").unwrap().is_none());
}

#[wasm_bindgen_test]
fn memory_storage_list_keys() {
    let storage = MemoryStorage::new();
    storage.set("chat_messages_a", "1").unwrap();
    storage.set("other", "2").unwrap();
    let keys = storage.list_keys("chat_messages_").unwrap();
    assert_eq!(keys, vec!["chat_messages_a"]);
}
