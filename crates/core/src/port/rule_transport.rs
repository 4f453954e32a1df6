// Rule Transport Port
// One raw JSON exchange with the rule service; typing happens in dispatch

use crate::domain::OperationPath;
use crate::error::Result;
use async_trait::async_trait;

/// Raw response of one exchange, before status validation or decoding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Status lies in 200..300
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Body as text for diagnostics (invalid UTF-8 is replaced, not rejected)
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Rule Transport trait
///
/// Implementations:
/// - HttpTransport (ruleskit-sdk): POST over reqwest
/// - MockTransport: scripted replies for tests
///
/// Implementations must not mutate shared state per call; a single instance
/// serves concurrent invocations.
#[async_trait]
pub trait RuleTransport: Send + Sync {
    /// POST `body` (already-encoded JSON) to `path` relative to the endpoint
    ///
    /// Returns the response whatever its status; only failures to obtain a
    /// response at all are errors.
    ///
    /// # Errors
    /// - RulesError::Transport if the request could not be sent or no response arrived
    async fn post_json(&self, path: &OperationPath, body: Vec<u8>) -> Result<RawResponse>;
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use crate::error::{RulesError, TransportErrorKind};
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    /// Scripted reply for one path
    #[derive(Debug, Clone)]
    pub enum MockReply {
        /// Answer with this status and body
        Respond { status: u16, body: String },
        /// Fail without a response
        Fail(TransportErrorKind),
    }

    /// One request seen by the mock
    #[derive(Debug, Clone)]
    pub struct RecordedRequest {
        pub path: String,
        pub body: Vec<u8>,
    }

    impl RecordedRequest {
        pub fn json(&self) -> serde_json::Value {
            serde_json::from_slice(&self.body).unwrap_or(serde_json::Value::Null)
        }
    }

    /// Mock Rule Transport for testing
    ///
    /// Paths without a scripted reply answer 404.
    #[derive(Clone, Default)]
    pub struct MockTransport {
        replies: Arc<Mutex<HashMap<String, MockReply>>>,
        requests: Arc<Mutex<Vec<RecordedRequest>>>,
    }

    impl MockTransport {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn respond(self, path: &str, status: u16, body: impl Into<String>) -> Self {
            self.replies.lock().unwrap().insert(
                path.to_string(),
                MockReply::Respond {
                    status,
                    body: body.into(),
                },
            );
            self
        }

        pub fn fail(self, path: &str, kind: TransportErrorKind) -> Self {
            self.replies
                .lock()
                .unwrap()
                .insert(path.to_string(), MockReply::Fail(kind));
            self
        }

        pub fn requests(&self) -> Vec<RecordedRequest> {
            self.requests.lock().unwrap().clone()
        }

        pub fn call_count(&self) -> usize {
            self.requests.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl RuleTransport for MockTransport {
        async fn post_json(&self, path: &OperationPath, body: Vec<u8>) -> Result<RawResponse> {
            self.requests.lock().unwrap().push(RecordedRequest {
                path: path.to_string(),
                body,
            });

            let reply = self.replies.lock().unwrap().get(path.as_str()).cloned();

            match reply {
                Some(MockReply::Respond { status, body }) => Ok(RawResponse::new(status, body)),
                Some(MockReply::Fail(kind)) => {
                    Err(RulesError::transport(kind, "mock transport failure"))
                }
                None => Ok(RawResponse::new(404, "not found")),
            }
        }
    }
}
