//! WASM-target tests for amparo-core.
//!
//! Runs the arbiter and session-store contracts under
//! wasm32-unknown-unknown via `wasm-pack test --node`.

#![cfg(target_arch = "wasm32")]

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use wasm_bindgen_test::*;

use amparo_core::arbiter::InstanceArbiter;
use amparo_core::ports::StorageBackend;
use amparo_core::session::SessionStore;
use amparo_types::message::ChatMessage;
use amparo_types::Result;

struct MapStorage {
    data: RefCell<HashMap<String, String>>,
}

impl StorageBackend for MapStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.data.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.data
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.data.borrow_mut().remove(key);
        Ok(())
    }

    fn list_keys(&self, prefix: &str) -> Result<Vec<String>> {
        Ok(self
            .data
            .borrow()
            .keys()
            .filter(|k| k.starts_with(prefix))
            .cloned()
            .collect())
    }

    fn backend_name(&self) -> &str {
        "map"
    }
}

#[wasm_bindgen_test]
fn arbiter_single_owner() {
    let arbiter = InstanceArbiter::new();
    arbiter.open("widget-a");
    assert_eq!(arbiter.open("widget-b"), Some("widget-a".to_string()));
    assert!(!arbiter.is_owner("widget-a"));
    assert!(arbiter.is_owner("widget-b"));
}

#[wasm_bindgen_test]
fn session_survives_store_recreation() {
    let storage = Rc::new(MapStorage {
        data: RefCell::new(HashMap::new()),
    });

    let mut store = SessionStore::new(storage.clone() as Rc<dyn StorageBackend>);
    store.initialize();
    store.add_message(ChatMessage::user("oi"));
    store.update_conversation_id("conv-123");

    let mut reloaded = SessionStore::new(storage as Rc<dyn StorageBackend>);
    let session = reloaded.load().unwrap();
    assert_eq!(session.conversation_id, Some("conv-123".to_string()));
    assert_eq!(session.messages.len(), 1);
}
