//! Typed failures for requests to the MedBot service.

use reqwest::StatusCode;
use thiserror::Error;

/// Failure of a single request to the service.
///
/// The gateway normalizes transport and status failures into this value;
/// nothing panics or leaks `reqwest` errors past that boundary.
#[derive(Debug, Error)]
pub enum RequestError {
    /// The outbound message was empty after trimming. Rejected before any
    /// network call is made.
    #[error("message cannot be empty")]
    InvalidInput,

    /// The call itself could not complete: connect failure, DNS, or a
    /// response body that broke mid-read.
    #[error("request could not reach the service: {0}")]
    Transport(#[from] reqwest::Error),

    /// The call completed but the service answered with a non-success
    /// status.
    #[error("service returned status {0}")]
    Server(StatusCode),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_input_display() {
        assert_eq!(
            RequestError::InvalidInput.to_string(),
            "message cannot be empty"
        );
    }

    #[test]
    fn server_display_carries_status() {
        let err = RequestError::Server(StatusCode::BAD_GATEWAY);
        assert_eq!(err.to_string(), "service returned status 502 Bad Gateway");
    }

    #[test]
    fn errors_implement_debug() {
        let dbg = format!("{:?}", RequestError::Server(StatusCode::INTERNAL_SERVER_ERROR));
        assert!(dbg.contains("Server"));
    }
}
