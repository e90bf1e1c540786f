//! Conversation orchestration: history, pending state, uploads, and the
//! failure policy that keeps the conversation stable when requests fail.

pub mod controller;
pub mod conversation;
pub mod fallback;
pub mod uploads;

pub use controller::{ChatController, SendOutcome};
pub use conversation::{Author, ConversationStore, Message};
pub use uploads::{UploadCandidate, UploadCoordinator, UploadOutcome, UploadedDocument};
