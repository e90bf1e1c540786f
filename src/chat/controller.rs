//! Conversation controller: the composition root for chat and uploads.
//!
//! Owns the store, the upload coordinator, and the gateway. Everything
//! above this layer sees conversation state only through read-only
//! projections and raises intents through the methods here.

use crate::chat::conversation::{ConversationStore, Message};
use crate::chat::fallback;
use crate::chat::uploads::{UploadCandidate, UploadCoordinator, UploadOutcome, UploadedDocument};
use crate::config::Settings;
use crate::core::error::RequestError;
use crate::core::gateway::RequestGateway;

/// How a send was resolved.
#[derive(Debug, Clone)]
pub enum SendOutcome {
    /// The assistant turn appended for this send: the service reply, or
    /// the fixed fallback when the request failed.
    Completed(Message),
    /// A reply was already pending; the send was dropped, not queued.
    Busy,
    /// The conversation was reset while the request was outstanding; the
    /// late reply was discarded.
    Superseded,
}

pub struct ChatController {
    store: ConversationStore,
    uploads: UploadCoordinator,
    gateway: RequestGateway,
}

impl ChatController {
    pub fn new(settings: &Settings) -> Self {
        Self {
            store: ConversationStore::new(),
            uploads: UploadCoordinator::new(),
            gateway: RequestGateway::new(settings),
        }
    }

    /// Send one user turn and resolve it to an assistant turn.
    ///
    /// At most one chat request is outstanding at any time; a send while
    /// pending is a no-op. Empty input is rejected before any network
    /// call. A failing request still resolves the conversation with the
    /// fixed fallback reply, and the pending flag is cleared on every
    /// path that still belongs to the live conversation.
    pub async fn send_message(&mut self, text: &str) -> Result<SendOutcome, RequestError> {
        if self.store.is_pending() {
            tracing::debug!("[ChatController] Send ignored: a reply is already pending");
            return Ok(SendOutcome::Busy);
        }

        let user_message = self.store.append_user_message(text)?;
        self.store.set_pending(true);
        let generation = self.store.generation();

        let result = self.gateway.send_chat(&user_message.text).await;
        Ok(self.resolve_chat(generation, result))
    }

    /// Apply a resolved chat result, unless the conversation was reset
    /// after the request was issued.
    fn resolve_chat(
        &mut self,
        issued_generation: u64,
        result: Result<String, RequestError>,
    ) -> SendOutcome {
        if self.store.generation() != issued_generation {
            tracing::warn!(
                "[ChatController] Discarding reply issued for generation {} (now {})",
                issued_generation,
                self.store.generation()
            );
            return SendOutcome::Superseded;
        }

        let reply = match result {
            Ok(text) => self.store.append_assistant_message(text),
            Err(error) => self
                .store
                .append_assistant_message(fallback::user_facing_reply(&error)),
        };
        self.store.set_pending(false);
        SendOutcome::Completed(reply)
    }

    /// Upload a batch of candidate files, sequentially.
    pub async fn upload_files(&mut self, candidates: Vec<UploadCandidate>) -> Vec<UploadOutcome> {
        self.uploads.submit(&self.gateway, candidates).await
    }

    /// Start a new conversation: clear local state unconditionally, then
    /// ask the service to drop its session context. The remote clear is
    /// best-effort; failure leaves the fresh local conversation intact.
    pub async fn start_new_chat(&mut self) {
        self.store.reset();
        if let Err(error) = self.gateway.clear_session().await {
            tracing::warn!("[ChatController] Remote session clear failed: {}", error);
        }
    }

    pub fn messages(&self) -> &[Message] {
        self.store.messages()
    }

    pub fn is_pending(&self) -> bool {
        self.store.is_pending()
    }

    pub fn documents(&self) -> &[UploadedDocument] {
        self.uploads.documents()
    }

    pub fn is_uploading(&self) -> bool {
        self.uploads.is_uploading()
    }
}
