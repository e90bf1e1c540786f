//! MedBot - command-line chat client for the MedBot medical assistant
//! service.
//!
//! The conversation-orchestration core lives in [`chat`]: message history
//! and pending state, sequential document uploads, and the fixed fallback
//! reply that keeps a conversation stable when a request fails. HTTP
//! plumbing lives in [`core`]; the terminal surface in the binary only
//! consumes read-only projections of the core.

pub mod chat;
pub mod cli;
mod config;
pub mod core;
pub mod utils;

pub use crate::chat::{
    ChatController, SendOutcome, UploadCandidate, UploadOutcome, UploadedDocument,
};
pub use crate::config::{LoggingConfig, ServiceConfig, Settings};
pub use crate::core::error::RequestError;
pub use crate::core::gateway::{HealthStatus, RequestGateway};
