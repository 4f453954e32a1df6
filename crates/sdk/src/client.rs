//! RulesKit Client Implementation

use crate::config::ClientConfig;
use crate::error::Result;
use crate::transport::HttpTransport;
use ruleskit_core::application::{dispatch, RetryPolicy};
use ruleskit_core::domain::catalog::{self, *};
use ruleskit_core::domain::shapes::*;
use ruleskit_core::port::RuleTransport;
use ruleskit_core::{Operation, OperationDescriptor, OperationPath};
use std::sync::Arc;

/// RulesKit rule-service client
///
/// Cheap to clone; clones share one transport. Every method performs exactly
/// one request (except [`RulesKitClient::invoke_with_retry`]) and never
/// mutates the client, so calls may run concurrently.
///
/// # Example
///
/// ```no_run
/// use ruleskit_sdk::shapes::{BBox, BeamCollisionInput, BeamSegment};
/// use ruleskit_sdk::RulesKitClient;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = RulesKitClient::connect("http://127.0.0.1:8000")?;
/// let output = client
///     .resolve_beam_collisions(&BeamCollisionInput {
///         beam_segments: vec![BeamSegment::new(0.0, 0.0, 10.0, 2.0)],
///         nearby_grobs: vec![BBox::new(1.0, 1.0, 2.0, 2.0)],
///     })
///     .await?;
/// println!("offsets: {:?}", output.offsets);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct RulesKitClient {
    transport: Arc<dyn RuleTransport>,
}

impl RulesKitClient {
    /// Client for the rule service at `url` with default configuration
    ///
    /// # Arguments
    ///
    /// * `url` - Endpoint address (e.g., `http://127.0.0.1:8000`)
    pub fn connect(url: impl AsRef<str>) -> Result<Self> {
        Self::with_config(ClientConfig::new(url.as_ref()))
    }

    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let transport = HttpTransport::new(&config)?;
        tracing::debug!(endpoint = %transport.endpoint(), "RulesKit client created");
        Ok(Self::with_transport(Arc::new(transport)))
    }

    /// Client over any transport (custom HTTP stacks, test doubles)
    pub fn with_transport(transport: Arc<dyn RuleTransport>) -> Self {
        Self { transport }
    }

    /// Every operation the client knows about
    pub fn operations() -> &'static [OperationDescriptor] {
        catalog::CATALOG
    }

    /// Invoke a catalog operation by its marker type
    ///
    /// Every forwarding method below is exactly this call with a fixed marker.
    pub async fn invoke<O: Operation>(&self, input: &O::Input) -> Result<O::Output> {
        dispatch::invoke::<O>(self.transport.as_ref(), input).await
    }

    /// Invoke with a caller-supplied retry policy
    pub async fn invoke_with_retry<O: Operation>(
        &self,
        policy: &RetryPolicy,
        input: &O::Input,
    ) -> Result<O::Output> {
        policy.invoke::<O>(self.transport.as_ref(), input).await
    }

    /// Invoke by catalog name with JSON input and output
    pub async fn invoke_json(
        &self,
        name: &str,
        input: serde_json::Value,
    ) -> Result<serde_json::Value> {
        catalog::invoke_json(self.transport.as_ref(), name, input).await
    }

    /// Invoke a path that has no typed catalog entry
    pub async fn apply_untyped(
        &self,
        path: &OperationPath,
        input: &serde_json::Value,
    ) -> Result<serde_json::Value> {
        dispatch::invoke_path(self.transport.as_ref(), path, input).await
    }

    /// Invoke a registry rule by agent and rule id, e.g.
    /// (`BeamingAgent`, `RULE.Beaming.auto_knee_threshold`)
    pub async fn apply_rule(
        &self,
        agent: &str,
        rule_id: &str,
        input: &serde_json::Value,
    ) -> Result<serde_json::Value> {
        let path = OperationPath::for_rule(agent, rule_id)?;
        self.apply_untyped(&path, input).await
    }

    // ------------------------------------------------------------------------
    // Collision
    // ------------------------------------------------------------------------

    pub async fn resolve_beam_collisions(
        &self,
        input: &BeamCollisionInput,
    ) -> Result<BeamCollisionOutput> {
        self.invoke::<ResolveBeamCollisions>(input).await
    }

    pub async fn resolve_rest_collisions(
        &self,
        input: &RestCollisionInput,
    ) -> Result<RestCollisionOutput> {
        self.invoke::<ResolveRestCollisions>(input).await
    }

    // ------------------------------------------------------------------------
    // Dynamics
    // ------------------------------------------------------------------------

    pub async fn dynamic_kerning(&self, input: &DynamicKerningInput) -> Result<DynamicKerningOutput> {
        self.invoke::<DynamicKerning>(input).await
    }

    pub async fn dynamics_stacked_kerning(
        &self,
        input: &DynamicsStackKerningInput,
    ) -> Result<DynamicsStackKerningOutput> {
        self.invoke::<DynamicsStackedKerning>(input).await
    }

    // ------------------------------------------------------------------------
    // Beaming
    // ------------------------------------------------------------------------

    pub async fn beaming_slope_with_clearance(
        &self,
        input: &BeamingSlopeClearanceInput,
    ) -> Result<BeamingSlopeClearanceOutput> {
        self.invoke::<BeamingSlopeWithClearance>(input).await
    }

    pub async fn beaming_cross_voice_mixed_stem(
        &self,
        input: &BeamingCrossVoiceSlopeInput,
    ) -> Result<BeamingCrossVoiceSlopeOutput> {
        self.invoke::<BeamingCrossVoiceMixedStem>(input).await
    }

    // ------------------------------------------------------------------------
    // Spacing
    // ------------------------------------------------------------------------

    pub async fn note_spacing_optical_weights(
        &self,
        input: &NoteSpacingOpticalWeightsInput,
    ) -> Result<NoteSpacingOpticalWeightsOutput> {
        self.invoke::<NoteSpacingOpticalWeights>(input).await
    }

    // ------------------------------------------------------------------------
    // Lyrics
    // ------------------------------------------------------------------------

    pub async fn lyrics_baseline_variance(
        &self,
        input: &LyricsBaselineVarianceInput,
    ) -> Result<LyricsBaselineVarianceOutput> {
        self.invoke::<LyricsBaselineVariance>(input).await
    }

    pub async fn lyrics_hyphen_melisma(
        &self,
        input: &LyricsHyphenMelismaInput,
    ) -> Result<LyricsHyphenMelismaOutput> {
        self.invoke::<LyricsHyphenMelisma>(input).await
    }
}
