//! Conversation state: ordered history, pending flag, generation counter.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::error::RequestError;

/// Who authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Author {
    User,
    Assistant,
}

/// A single conversation turn. Never mutated after creation; destroyed
/// only by a full conversation reset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: u64,
    pub text: String,
    pub author: Author,
    pub created_at: DateTime<Utc>,
}

/// Owns the message sequence and the "reply pending" flag.
///
/// Ids come from a monotonic counter rather than wall-clock time, so two
/// messages appended within the same instant still get distinct ids.
/// `reset` bumps the generation counter; a reply issued against an older
/// generation must be discarded by the caller.
#[derive(Debug, Default)]
pub struct ConversationStore {
    messages: Vec<Message>,
    pending: bool,
    next_id: u64,
    generation: u64,
}

impl ConversationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a user turn. Empty or whitespace-only text is rejected here,
    /// before anything reaches the network, even when the caller already
    /// validated it.
    pub fn append_user_message(&mut self, text: &str) -> Result<Message, RequestError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(RequestError::InvalidInput);
        }
        Ok(self.push(text.to_string(), Author::User))
    }

    /// Append an assistant turn.
    pub fn append_assistant_message(&mut self, text: impl Into<String>) -> Message {
        self.push(text.into(), Author::Assistant)
    }

    fn push(&mut self, text: String, author: Author) -> Message {
        let message = Message {
            id: self.next_id,
            text,
            author,
            created_at: Utc::now(),
        };
        self.next_id += 1;
        self.messages.push(message.clone());
        message
    }

    pub fn set_pending(&mut self, pending: bool) {
        self.pending = pending;
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Drop the whole conversation: empty history, pending cleared, new
    /// generation. Observers never see an intermediate state.
    pub fn reset(&mut self) {
        self.messages.clear();
        self.pending = false;
        self.generation += 1;
        tracing::debug!("[ConversationStore] Reset to generation {}", self.generation);
    }

    /// Current conversation generation; captured at request issue time and
    /// compared at resolution time.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Read-only view of the history, in causal order.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appends_preserve_order_and_authors() {
        let mut store = ConversationStore::new();
        store.append_user_message("What is hypertension?").unwrap();
        store.append_assistant_message("Elevated blood pressure.");

        let messages = store.messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].author, Author::User);
        assert_eq!(messages[1].author, Author::Assistant);
        assert_eq!(messages[0].text, "What is hypertension?");
    }

    #[test]
    fn ids_stay_unique_within_the_same_instant() {
        let mut store = ConversationStore::new();
        let a = store.append_user_message("one").unwrap();
        let b = store.append_assistant_message("two");
        let c = store.append_user_message("three").unwrap();

        assert!(a.id < b.id && b.id < c.id);
    }

    #[test]
    fn empty_text_is_rejected() {
        let mut store = ConversationStore::new();
        let err = store.append_user_message("   \n\t ").unwrap_err();

        assert!(matches!(err, RequestError::InvalidInput));
        assert!(store.messages().is_empty());
    }

    #[test]
    fn user_text_is_stored_trimmed() {
        let mut store = ConversationStore::new();
        let message = store.append_user_message("  hello  ").unwrap();
        assert_eq!(message.text, "hello");
    }

    #[test]
    fn reset_clears_everything_and_bumps_generation() {
        let mut store = ConversationStore::new();
        store.append_user_message("hi").unwrap();
        store.append_assistant_message("hello");
        store.set_pending(true);
        let before = store.generation();

        store.reset();

        assert!(store.messages().is_empty());
        assert!(!store.is_pending());
        assert_eq!(store.generation(), before + 1);
    }

    #[test]
    fn ids_keep_increasing_across_resets() {
        let mut store = ConversationStore::new();
        let first = store.append_user_message("hi").unwrap();
        store.reset();
        let second = store.append_user_message("hi again").unwrap();

        assert!(second.id > first.id);
    }
}
