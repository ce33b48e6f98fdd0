use serde::{Deserialize, Serialize};

use crate::message::ChatMessage;

/// The in-memory view of one ongoing conversation.
///
/// This is a local cache for resumption across remounts and reloads; the
/// backend conversation/message rows remain the source of truth.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatSession {
    /// Backend identifier, absent until the first exchange establishes one
    pub conversation_id: Option<String>,
    /// Insertion order equals chronological order; append-only
    pub messages: Vec<ChatMessage>,
    /// Milliseconds since the Unix epoch, bumped on every mutation
    pub last_activity: i64,
    pub is_active: bool,
    /// Page path where the session was started, if the caller recorded one
    pub location: Option<String>,
}

impl ChatSession {
    /// Fresh session: no backend id, no messages, active as of `now`.
    pub fn new(now: i64) -> Self {
        Self {
            conversation_id: None,
            messages: Vec::new(),
            last_activity: now,
            is_active: true,
            location: None,
        }
    }

    /// A session is resumable against the backend only once it is both
    /// live and bound to a conversation id.
    pub fn has_active_session(&self) -> bool {
        self.is_active && self.conversation_id.is_some()
    }
}

/// Current on-disk shape, stored under the `global-persistent-chat` key.
///
/// camelCase keys to stay wire-compatible with records written by earlier
/// releases of the widget. `messageCount` is redundant (always
/// `messages.len()` at write time) and ignored on read.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedSession {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<String>,
    pub messages: Vec<ChatMessage>,
    pub last_activity: i64,
    #[serde(default)]
    pub message_count: usize,
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl From<&ChatSession> for PersistedSession {
    fn from(session: &ChatSession) -> Self {
        Self {
            conversation_id: session.conversation_id.clone(),
            messages: session.messages.clone(),
            last_activity: session.last_activity,
            message_count: session.messages.len(),
            is_active: session.is_active,
            location: session.location.clone(),
        }
    }
}

impl From<PersistedSession> for ChatSession {
    fn from(record: PersistedSession) -> Self {
        Self {
            conversation_id: record.conversation_id,
            messages: record.messages,
            last_activity: record.last_activity,
            is_active: record.is_active,
            location: record.location,
        }
    }
}

/// Legacy on-disk shape, stored under the `persistent-chat-session` key.
///
/// Read as a fallback when no current-format record exists; still mirrored
/// on write while the migration window is open (see `SessionConfig`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LegacySessionRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<String>,
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
    pub last_activity: i64,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl From<&ChatSession> for LegacySessionRecord {
    fn from(session: &ChatSession) -> Self {
        Self {
            conversation_id: session.conversation_id.clone(),
            messages: session.messages.clone(),
            last_activity: session.last_activity,
            is_active: session.is_active,
        }
    }
}

impl From<LegacySessionRecord> for ChatSession {
    fn from(record: LegacySessionRecord) -> Self {
        Self {
            conversation_id: record.conversation_id,
            messages: record.messages,
            last_activity: record.last_activity,
            is_active: record.is_active,
            location: None,
        }
    }
}
