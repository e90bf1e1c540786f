//! Fixed user-facing reply for failed chat requests.

use crate::core::error::RequestError;

/// Shown in place of an assistant reply whenever a chat request fails.
pub const FALLBACK_REPLY: &str = "I'm sorry, I encountered an error while \
     processing your medical query. Please try again or contact support if \
     the issue persists.";

/// Map a request failure to the fixed fallback reply.
///
/// Total: every error kind produces the same text, so no transport detail
/// ever reaches the user. The specific error is logged here so operators
/// can diagnose what the user never sees.
pub fn user_facing_reply(error: &RequestError) -> &'static str {
    tracing::error!("[ErrorPolicy] Chat request failed: {}", error);
    FALLBACK_REPLY
}
