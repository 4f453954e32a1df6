//! Typed dispatch
//!
//! The single request/response path every operation goes through:
//! encode input → one exchange over the [`RuleTransport`] → status check →
//! decode output. One attempt per call; retries belong to
//! [`crate::application::retry::RetryPolicy`].

use crate::domain::{Operation, OperationPath};
use crate::error::{Result, RulesError};
use crate::port::RuleTransport;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, error, info_span, warn, Instrument};
use uuid::Uuid;

/// Invoke a catalog operation
///
/// # Example
/// ```text
/// let output = invoke::<ResolveBeamCollisions>(transport.as_ref(), &input).await?;
/// println!("offsets: {:?}", output.offsets);
/// ```
pub async fn invoke<O: Operation>(
    transport: &dyn RuleTransport,
    input: &O::Input,
) -> Result<O::Output> {
    let path = O::path();
    let span = info_span!(
        "invoke",
        operation = O::NAME,
        path = %path,
        invocation_id = %Uuid::new_v4()
    );
    exchange(transport, &path, input).instrument(span).await
}

/// Invoke an arbitrary path with caller-chosen shapes
///
/// Used for rules that have no catalog entry yet; with `serde_json::Value`
/// as both shapes this is a fully untyped call.
pub async fn invoke_path<I, O>(
    transport: &dyn RuleTransport,
    path: &OperationPath,
    input: &I,
) -> Result<O>
where
    I: Serialize + ?Sized,
    O: DeserializeOwned,
{
    let span = info_span!("invoke", path = %path, invocation_id = %Uuid::new_v4());
    exchange(transport, path, input).instrument(span).await
}

/// Invoke a catalog operation with its input and output as JSON values
///
/// The value is decoded into the operation's input shape first, so malformed
/// input (e.g. an unknown stem direction) is refused before anything is sent.
pub async fn invoke_value<O: Operation>(
    transport: &dyn RuleTransport,
    input: serde_json::Value,
) -> Result<serde_json::Value> {
    let input: O::Input =
        serde_json::from_value(input).map_err(|source| RulesError::InvalidInput {
            operation: O::NAME.to_string(),
            source,
        })?;

    let output = invoke::<O>(transport, &input).await?;
    serde_json::to_value(&output).map_err(RulesError::Encode)
}

async fn exchange<I, O>(transport: &dyn RuleTransport, path: &OperationPath, input: &I) -> Result<O>
where
    I: Serialize + ?Sized,
    O: DeserializeOwned,
{
    let body = serde_json::to_vec(input).map_err(|e| {
        error!(error = %e, "Failed to encode rule input");
        RulesError::Encode(e)
    })?;

    debug!(bytes = body.len(), "Sending rule request");
    let response = transport.post_json(path, body).await?;
    debug!(
        status = response.status,
        bytes = response.body.len(),
        "Received rule response"
    );

    if !response.is_success() {
        warn!(status = response.status, "Rule service rejected request");
        return Err(RulesError::ServerRejection {
            status: response.status,
            body: response.body_text(),
        });
    }

    serde_json::from_slice(&response.body).map_err(|source| {
        warn!(error = %source, "Rule response does not match output shape");
        RulesError::Decode {
            path: path.to_string(),
            source,
        }
    })
}
