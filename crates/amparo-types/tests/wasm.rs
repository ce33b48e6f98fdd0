//! WASM-target tests for amparo-types.
//!
//! Mirrors the native unit tests but runs under wasm32-unknown-unknown
//! via `wasm-pack test --node`.

#![cfg(target_arch = "wasm32")]

use wasm_bindgen_test::*;

use amparo_types::config::*;
use amparo_types::message::*;
use amparo_types::now_ms;
use amparo_types::session::*;

#[wasm_bindgen_test]
fn message_user() {
    let msg = ChatMessage::user("oi");
    assert_eq!(msg.role, Role::User);
    assert_eq!(msg.text, "oi");
    assert!(!msg.id.is_empty());
}

#[wasm_bindgen_test]
fn message_serialization_roundtrip() {
    let msg = ChatMessage::assistant("I'm here");
    let json = serde_json::to_string(&msg).unwrap();
    let deserialized: ChatMessage = serde_json::from_str(&json).unwrap();
    assert_eq!(deserialized.role, Role::Assistant);
    assert_eq!(deserialized.text, "I'm here");
}

#[wasm_bindgen_test]
fn role_serialization() {
    assert_eq!(serde_json::to_string(&Role::User).unwrap(), r#""user""#);
    assert_eq!(
        serde_json::to_string(&Role::Assistant).unwrap(),
        r#""assistant""#
    );
}

#[wasm_bindgen_test]
fn session_new_is_active_and_empty() {
    let session = ChatSession::new(now_ms());
    assert!(session.is_active);
    assert!(session.messages.is_empty());
    assert!(!session.has_active_session());
}

#[wasm_bindgen_test]
fn persisted_session_camel_case() {
    let session = ChatSession::new(1_000);
    let value = serde_json::to_value(PersistedSession::from(&session)).unwrap();
    let obj = value.as_object().unwrap();
    assert!(obj.contains_key("lastActivity"));
    assert!(obj.contains_key("isActive"));
}

#[wasm_bindgen_test]
fn session_config_defaults() {
    let config = SessionConfig::default();
    assert_eq!(config.ttl_ms, DEFAULT_SESSION_TTL_MS);
    assert!(config.mirror_legacy);
}
