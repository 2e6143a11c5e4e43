use thiserror::Error;

/// Failures of a single question/answer round trip with the model endpoint.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("failed to encode request payload: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("request to the model endpoint failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("model endpoint returned HTTP {status}: {body}")]
    RemoteRejection { status: u16, body: String },

    #[error("response body is not valid JSON: {0}")]
    MalformedResponse(#[source] serde_json::Error),

    #[error("response has no text at {path}")]
    UnexpectedShape { path: &'static str },
}

impl LlmError {
    /// Rate limiting, server-side failures and network errors may succeed on
    /// a later attempt; everything else is final.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport(_) => true,
            Self::RemoteRejection { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("ERROR: API KEY not set")]
    MissingCredential,
}

/// Reasons an interactive session ends without reaching the final answer.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("console I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("standard input closed before the session finished")]
    InputClosed,

    #[error("could not verify city: {0}")]
    CheckFailed(#[source] LlmError),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rejection(status: u16) -> LlmError {
        LlmError::RemoteRejection {
            status,
            body: String::new(),
        }
    }

    #[test]
    fn server_errors_and_rate_limits_are_retryable() {
        assert!(rejection(429).is_retryable());
        assert!(rejection(500).is_retryable());
        assert!(rejection(503).is_retryable());
    }

    #[test]
    fn client_errors_and_bad_payloads_are_final() {
        assert!(!rejection(400).is_retryable());
        assert!(!rejection(403).is_retryable());
        assert!(!LlmError::UnexpectedShape { path: "candidates" }.is_retryable());
    }

    #[test]
    fn rejection_message_names_status_and_body() {
        let err = LlmError::RemoteRejection {
            status: 403,
            body: "API key not valid".into(),
        };
        assert_eq!(
            err.to_string(),
            "model endpoint returned HTTP 403: API key not valid"
        );
    }
}
