//! Persistent session store — keeps an in-progress conversation alive
//! across widget remounts and page navigations within the same tab.
//!
//! Staleness is a read-time check only: nothing sweeps expired records in
//! the background, `load` simply refuses anything older than the freshness
//! window. Storage failures never propagate past this module; the chat
//! experience is additive and must keep working when persistence is not
//! available, so every write degrades to in-memory-only on error.

use std::rc::Rc;

use amparo_types::config::SessionConfig;
use amparo_types::message::ChatMessage;
use amparo_types::now_ms;
use amparo_types::session::{ChatSession, LegacySessionRecord, PersistedSession};

use crate::ports::StorageBackend;

/// Current-format record
pub const CURRENT_SESSION_KEY: &str = "global-persistent-chat";
/// Pre-migration record, read as a fallback and mirrored on write while
/// `SessionConfig::mirror_legacy` is set
pub const LEGACY_SESSION_KEY: &str = "persistent-chat-session";
/// Per-conversation scratch records written by the widget, swept on clear
pub const SCRATCH_KEY_PREFIX: &str = "chat_messages_";

/// Outcome of probing one storage key
enum Probe {
    Fresh(ChatSession),
    Expired,
    Absent,
}

pub struct SessionStore {
    storage: Rc<dyn StorageBackend>,
    config: SessionConfig,
    session: Option<ChatSession>,
}

impl SessionStore {
    pub fn new(storage: Rc<dyn StorageBackend>) -> Self {
        Self::with_config(storage, SessionConfig::default())
    }

    pub fn with_config(storage: Rc<dyn StorageBackend>, config: SessionConfig) -> Self {
        Self {
            storage,
            config,
            session: None,
        }
    }

    /// The session currently held in memory, if any.
    pub fn current(&self) -> Option<&ChatSession> {
        self.session.as_ref()
    }

    /// Load a resumable session, if one exists.
    ///
    /// The current-format key wins: if it holds a fresh record, that record
    /// is returned; if it holds an expired one, the key is deleted and
    /// `None` is returned without consulting the legacy key. Only when the
    /// current key is absent is the legacy key probed, under the same
    /// freshness rule and without migrating it. Corrupted records are
    /// deleted and treated as absent. Never panics.
    pub fn load(&mut self) -> Option<ChatSession> {
        let now = now_ms();

        match self.probe(CURRENT_SESSION_KEY, now, decode_current) {
            Probe::Fresh(session) => {
                log::debug!(
                    "resumed session ({} messages, conversation {:?})",
                    session.messages.len(),
                    session.conversation_id
                );
                self.session = Some(session.clone());
                return Some(session);
            }
            Probe::Expired => {
                log::debug!("stored session expired, discarding");
                self.remove_key(CURRENT_SESSION_KEY);
                self.session = None;
                return None;
            }
            Probe::Absent => {}
        }

        match self.probe(LEGACY_SESSION_KEY, now, decode_legacy) {
            Probe::Fresh(session) => {
                log::debug!("resumed session from legacy record");
                self.session = Some(session.clone());
                Some(session)
            }
            Probe::Expired => {
                self.remove_key(LEGACY_SESSION_KEY);
                self.session = None;
                None
            }
            Probe::Absent => {
                self.session = None;
                None
            }
        }
    }

    /// Start a new session, unconditionally overwriting any existing one.
    pub fn initialize(&mut self) -> ChatSession {
        let session = ChatSession::new(now_ms());
        self.session = Some(session.clone());
        self.persist();
        session
    }

    /// Like `initialize`, recording the page path the session started on.
    pub fn initialize_at(&mut self, location: impl Into<String>) -> ChatSession {
        let mut session = ChatSession::new(now_ms());
        session.location = Some(location.into());
        self.session = Some(session.clone());
        self.persist();
        session
    }

    /// Bind the backend conversation id. When no session is loaded this
    /// merges into a fresh empty one rather than dropping the id, so a
    /// conversation created by the widget before the store was touched is
    /// never lost.
    pub fn update_conversation_id(&mut self, id: &str) {
        let session = self.session.get_or_insert_with(|| ChatSession::new(now_ms()));
        session.conversation_id = Some(id.to_string());
        session.is_active = true;
        session.last_activity = now_ms();
        self.persist();
    }

    /// Append a message to the loaded session. No-op when no session is
    /// loaded: there is nothing to append to, and auto-creating here would
    /// resurrect sessions after `clear`.
    pub fn add_message(&mut self, message: ChatMessage) {
        let Some(session) = self.session.as_mut() else {
            log::debug!("add_message with no session loaded, dropping");
            return;
        };
        session.messages.push(message);
        session.last_activity = now_ms();
        self.persist();
    }

    /// Heartbeat: bump the activity timestamp so the freshness window
    /// tracks real use. No-op when no session is loaded.
    pub fn touch_activity(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        session.last_activity = now_ms();
        self.persist();
    }

    /// Drop every persisted representation (current key, legacy key, any
    /// per-conversation scratch keys) and the in-memory session. Always
    /// succeeds; storage failures are logged and swallowed.
    pub fn clear(&mut self) {
        self.session = None;
        self.remove_key(CURRENT_SESSION_KEY);
        self.remove_key(LEGACY_SESSION_KEY);
        match self.storage.list_keys(SCRATCH_KEY_PREFIX) {
            Ok(keys) => {
                for key in keys {
                    self.remove_key(&key);
                }
            }
            Err(e) => log::warn!("could not enumerate scratch keys: {}", e),
        }
    }

    /// Single write path: the whole session is written back to the current
    /// key, then best-effort mirrored to the legacy key while the migration
    /// window is open. A legacy failure never undoes the current-format
    /// write, and either failure leaves the in-memory session updated.
    fn persist(&self) {
        let Some(session) = self.session.as_ref() else {
            return;
        };

        match serde_json::to_string(&PersistedSession::from(session)) {
            Ok(json) => {
                if let Err(e) = self.storage.set(CURRENT_SESSION_KEY, &json) {
                    log::warn!("session write failed, continuing in memory: {}", e);
                }
            }
            Err(e) => log::warn!("session serialization failed: {}", e),
        }

        if self.config.mirror_legacy {
            match serde_json::to_string(&LegacySessionRecord::from(session)) {
                Ok(json) => {
                    if let Err(e) = self.storage.set(LEGACY_SESSION_KEY, &json) {
                        log::warn!("legacy mirror write failed: {}", e);
                    }
                }
                Err(e) => log::warn!("legacy mirror serialization failed: {}", e),
            }
        }
    }

    /// Read one key and classify it. Unparsable data is removed and
    /// reported as absent; a storage read error is reported as absent
    /// without touching the key.
    fn probe(
        &self,
        key: &str,
        now: i64,
        decode: fn(&str) -> serde_json::Result<ChatSession>,
    ) -> Probe {
        let raw = match self.storage.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Probe::Absent,
            Err(e) => {
                log::warn!("storage read failed for {}: {}", key, e);
                return Probe::Absent;
            }
        };
        match decode(&raw) {
            Ok(session) => {
                if now - session.last_activity < self.config.ttl_ms {
                    Probe::Fresh(session)
                } else {
                    Probe::Expired
                }
            }
            Err(e) => {
                log::warn!("corrupted session record at {}, removing: {}", key, e);
                self.remove_key(key);
                Probe::Absent
            }
        }
    }

    fn remove_key(&self, key: &str) {
        if let Err(e) = self.storage.remove(key) {
            log::warn!("failed to remove {}: {}", key, e);
        }
    }
}

fn decode_current(raw: &str) -> serde_json::Result<ChatSession> {
    serde_json::from_str::<PersistedSession>(raw).map(ChatSession::from)
}

fn decode_legacy(raw: &str) -> serde_json::Result<ChatSession> {
    serde_json::from_str::<LegacySessionRecord>(raw).map(ChatSession::from)
}
