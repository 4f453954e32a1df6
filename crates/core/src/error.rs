// Central Error Type for RulesKit

use thiserror::Error;

/// Why a request never produced a response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportErrorKind {
    /// Connection refused, DNS or TLS failure
    Connect,
    /// Configured timeout elapsed
    Timeout,
    /// Anything else (body read failure, protocol error, aborted request)
    Other,
}

impl std::fmt::Display for TransportErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransportErrorKind::Connect => write!(f, "connect"),
            TransportErrorKind::Timeout => write!(f, "timeout"),
            TransportErrorKind::Other => write!(f, "other"),
        }
    }
}

/// Client-level error type
///
/// Every invocation ends in exactly one output value or exactly one of these.
/// `Transport`, `ServerRejection` and `Decode` are the three outcomes of a
/// request that was actually attempted; the rest are raised before anything
/// is sent.
#[derive(Error, Debug)]
pub enum RulesError {
    /// The request never reached the server, or no response came back
    #[error("Transport error ({kind}): {message}")]
    Transport {
        kind: TransportErrorKind,
        message: String,
    },

    /// The server answered with a status outside 200..300
    ///
    /// `body` is the raw response text, kept for diagnostics only.
    #[error("Server rejected request with status {status}: {body}")]
    ServerRejection { status: u16, body: String },

    /// The server answered 2xx but the body does not fit the output shape
    #[error("Failed to decode response from {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// The input value could not be serialized (programmer error)
    #[error("Failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("Invalid endpoint address: {0}")]
    InvalidEndpoint(String),

    #[error("Invalid operation path: {0}")]
    InvalidPath(String),

    #[error("Unknown operation: {0}")]
    UnknownOperation(String),

    /// A JSON value handed to name-keyed dispatch does not fit the input shape
    #[error("Invalid input for {operation}: {source}")]
    InvalidInput {
        operation: String,
        #[source]
        source: serde_json::Error,
    },
}

impl RulesError {
    pub fn transport(kind: TransportErrorKind, message: impl Into<String>) -> Self {
        RulesError::Transport {
            kind,
            message: message.into(),
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, RulesError::Transport { .. })
    }

    pub fn is_server_rejection(&self) -> bool {
        matches!(self, RulesError::ServerRejection { .. })
    }

    pub fn is_decode(&self) -> bool {
        matches!(self, RulesError::Decode { .. })
    }

    /// HTTP status of a server rejection
    pub fn status(&self) -> Option<u16> {
        match self {
            RulesError::ServerRejection { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Transient failures a caller-supplied retry policy may repeat
    ///
    /// Connect/timeout failures and gateway-style rejections (502, 503, 504).
    /// Decode, encode and client-side validation errors are never retryable.
    pub fn is_retryable(&self) -> bool {
        match self {
            RulesError::Transport { kind, .. } => {
                matches!(kind, TransportErrorKind::Connect | TransportErrorKind::Timeout)
            }
            RulesError::ServerRejection { status, .. } => matches!(status, 502..=504),
            _ => false,
        }
    }
}

/// Result type alias using RulesError
pub type Result<T> = std::result::Result<T, RulesError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn decode_error() -> RulesError {
        let source = serde_json::from_str::<u32>("\"nope\"").unwrap_err();
        RulesError::Decode {
            path: "apply/x/Y-z".to_string(),
            source,
        }
    }

    #[test]
    fn test_classification_is_exclusive() {
        let transport = RulesError::transport(TransportErrorKind::Connect, "refused");
        let rejection = RulesError::ServerRejection {
            status: 500,
            body: "internal error".to_string(),
        };
        let decode = decode_error();

        assert!(transport.is_transport());
        assert!(!transport.is_server_rejection() && !transport.is_decode());

        assert!(rejection.is_server_rejection());
        assert!(!rejection.is_transport() && !rejection.is_decode());
        assert_eq!(rejection.status(), Some(500));

        assert!(decode.is_decode());
        assert_eq!(decode.status(), None);
    }

    #[test]
    fn test_retryable_errors() {
        assert!(RulesError::transport(TransportErrorKind::Timeout, "slow").is_retryable());
        assert!(RulesError::transport(TransportErrorKind::Connect, "refused").is_retryable());
        assert!(!RulesError::transport(TransportErrorKind::Other, "reset").is_retryable());

        for status in [502, 503, 504] {
            let err = RulesError::ServerRejection {
                status,
                body: String::new(),
            };
            assert!(err.is_retryable(), "status {} should be retryable", status);
        }
        for status in [400, 404, 422, 500] {
            let err = RulesError::ServerRejection {
                status,
                body: String::new(),
            };
            assert!(!err.is_retryable(), "status {} should not be retryable", status);
        }

        assert!(!decode_error().is_retryable());
    }

    #[test]
    fn test_display_carries_status_and_body() {
        let err = RulesError::ServerRejection {
            status: 422,
            body: "beamSegments must not be empty".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("422"));
        assert!(msg.contains("beamSegments must not be empty"));
    }
}
