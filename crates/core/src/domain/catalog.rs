//! Operation catalog
//!
//! One row per rule operation. Each row declares a zero-sized marker type
//! implementing [`Operation`] and contributes a descriptor to [`CATALOG`] and
//! an arm to [`invoke_json`]. Adding an operation means adding a row here and
//! a forwarding method on the SDK client; dispatch is never touched.

use crate::application::dispatch::invoke_value;
use crate::domain::operation::{Operation, OperationDescriptor};
use crate::domain::shapes::*;
use crate::error::{Result, RulesError};
use crate::port::RuleTransport;

// ---------------------------------------------------------------------------
// Generates: marker struct + Operation impl per row, the CATALOG table,
// and name-keyed JSON dispatch.
// ---------------------------------------------------------------------------
macro_rules! rule_operations {
    ($(
        $(#[$attr:meta])*
        $marker:ident {
            name: $name:literal,
            rule: $rule:literal,
            agent: $agent:literal,
            path: $path:literal,
            input: $input:ident,
            output: $output:ident $(,)?
        }
    )*) => {
        $(
            $(#[$attr])*
            #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
            pub struct $marker;

            impl Operation for $marker {
                const NAME: &'static str = $name;
                const PATH: &'static str = $path;
                type Input = $input;
                type Output = $output;
            }
        )*

        /// Every known operation, in declaration order
        pub static CATALOG: &[OperationDescriptor] = &[
            $(
                OperationDescriptor {
                    name: $name,
                    rule_id: $rule,
                    agent: $agent,
                    path: $path,
                    input_shape: stringify!($input),
                    output_shape: stringify!($output),
                },
            )*
        ];

        /// Invoke an operation by catalog name with JSON input and output
        ///
        /// # Errors
        /// - RulesError::UnknownOperation if no operation has this name
        /// - RulesError::InvalidInput if `input` does not fit the input shape
        /// - anything [`crate::application::dispatch::invoke`] returns
        pub async fn invoke_json(
            transport: &dyn RuleTransport,
            name: &str,
            input: serde_json::Value,
        ) -> Result<serde_json::Value> {
            match name {
                $($name => invoke_value::<$marker>(transport, input).await,)*
                other => Err(RulesError::UnknownOperation(other.to_string())),
            }
        }
    };
}

rule_operations! {
    /// Vertical offsets that move beams clear of nearby grobs
    ResolveBeamCollisions {
        name: "resolveBeamCollisions",
        rule: "RULE.BeamCollision.resolve_overlaps",
        agent: "CollisionAgent",
        path: "apply/collision/BeamCollision-resolve_overlaps",
        input: BeamCollisionInput,
        output: BeamCollisionOutput,
    }

    /// Rest offsets clearing note columns
    ResolveRestCollisions {
        name: "resolveRestCollisions",
        rule: "RULE.RestCollision.resolve_overlaps",
        agent: "CollisionAgent",
        path: "apply/collision/RestCollision-resolve_overlaps",
        input: RestCollisionInput,
        output: RestCollisionOutput,
    }

    /// Dynamic mark position kerned against hairpins and lyrics
    DynamicKerning {
        name: "dynamicKerning",
        rule: "RULE.DynamicAlign.kerning_with_hairpins",
        agent: "DynamicsTextAgent",
        path: "apply/dynamicstext/DynamicAlign-kerning_with_hairpins",
        input: DynamicKerningInput,
        output: DynamicKerningOutput,
    }

    BeamingSlopeWithClearance {
        name: "beamingSlopeWithClearance",
        rule: "RULE.Beaming.slope_with_clearance",
        agent: "BeamingAgent",
        path: "apply/beaming/Beaming-slope_with_clearance",
        input: BeamingSlopeClearanceInput,
        output: BeamingSlopeClearanceOutput,
    }

    NoteSpacingOpticalWeights {
        name: "noteSpacingOpticalWeights",
        rule: "RULE.NoteSpacing.optical_stem_weight_scalars",
        agent: "SpacingAgent",
        path: "apply/spacing/NoteSpacing-optical_stem_weight_scalars",
        input: NoteSpacingOpticalWeightsInput,
        output: NoteSpacingOpticalWeightsOutput,
    }

    LyricsBaselineVariance {
        name: "lyricsBaselineVariance",
        rule: "RULE.Lyrics.baseline_adjustment_with_variance",
        agent: "VerticalStackAgent",
        path: "apply/verticalstack/Lyrics-baseline_adjustment_with_variance",
        input: LyricsBaselineVarianceInput,
        output: LyricsBaselineVarianceOutput,
    }

    /// Slope balanced across voices with mixed stem directions
    BeamingCrossVoiceMixedStem {
        name: "beamingCrossVoiceMixedStem",
        rule: "RULE.Beaming.cross_voice_mixed_stem_slope_balance",
        agent: "BeamingAgent",
        path: "apply/beaming/Beaming-cross_voice_mixed_stem_slope_balance",
        input: BeamingCrossVoiceSlopeInput,
        output: BeamingCrossVoiceSlopeOutput,
    }

    DynamicsStackedKerning {
        name: "dynamicsStackedKerning",
        rule: "RULE.Dynamics.stacked_kerning_with_system_breaks",
        agent: "DynamicsTextAgent",
        path: "apply/dynamicstext/Dynamics-stacked_kerning_with_system_breaks",
        input: DynamicsStackKerningInput,
        output: DynamicsStackKerningOutput,
    }

    LyricsHyphenMelisma {
        name: "lyricsHyphenMelisma",
        rule: "RULE.Lyrics.hyphen_melisma_spacing_interaction",
        agent: "VerticalStackAgent",
        path: "apply/verticalstack/Lyrics-hyphen_melisma_spacing_interaction",
        input: LyricsHyphenMelismaInput,
        output: LyricsHyphenMelismaOutput,
    }
}

/// Look up a descriptor by operation name
pub fn find_by_name(name: &str) -> Option<&'static OperationDescriptor> {
    CATALOG.iter().find(|d| d.name == name)
}

/// Look up a descriptor by path (a leading `/` is tolerated)
pub fn find_by_path(path: &str) -> Option<&'static OperationDescriptor> {
    let path = path.strip_prefix('/').unwrap_or(path);
    CATALOG.iter().find(|d| d.path == path)
}
