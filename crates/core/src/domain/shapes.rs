//! Rule input/output shapes
//!
//! These mirror the rule service's JSON contract field for field. Field names
//! on the wire are fixed by the service (including the `SP` staff-space
//! suffixes), so every struct spells them out explicitly. Optional fields are
//! omitted from the request when `None` and default to `None` when missing
//! from a response.
//!
//! JSON has no NaN or infinity: a non-finite `f64` in an input is sent as
//! `null`, which the service rejects, rather than failing to encode. Callers
//! must keep coordinates finite.

use serde::{Deserialize, Serialize};

// ============================================================================
// Shared primitives
// ============================================================================

/// Distance in staff spaces
pub type StaffSpace = f64;

/// Axis-aligned bounding box of a graphical object
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BBox {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl BBox {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }
}

/// Straight beam segment from (x1, y1) to (x2, y2)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BeamSegment {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl BeamSegment {
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }
}

/// Position or offset
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Stem direction; anything other than `"up"`/`"down"` fails to deserialize
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StemDirection {
    Up,
    Down,
}

impl std::fmt::Display for StemDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StemDirection::Up => write!(f, "up"),
            StemDirection::Down => write!(f, "down"),
        }
    }
}

// ============================================================================
// Collision
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeamCollisionInput {
    #[serde(rename = "beamSegments")]
    pub beam_segments: Vec<BeamSegment>,
    #[serde(rename = "nearbyGrobs")]
    pub nearby_grobs: Vec<BBox>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeamCollisionOutput {
    pub offsets: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestCollisionInput {
    #[serde(rename = "restBBoxes")]
    pub rest_bboxes: Vec<BBox>,
    #[serde(rename = "noteColumnBBoxes")]
    pub note_column_bboxes: Vec<BBox>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestCollisionOutput {
    #[serde(rename = "restOffsets")]
    pub rest_offsets: Vec<Point>,
}

// ============================================================================
// Dynamics
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DynamicKerningInput {
    #[serde(rename = "dynamicBBox")]
    pub dynamic_bbox: BBox,
    #[serde(
        rename = "hairpinBBox",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub hairpin_bbox: Option<BBox>,
    #[serde(rename = "lyricBBox", default, skip_serializing_if = "Option::is_none")]
    pub lyric_bbox: Option<BBox>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DynamicKerningOutput {
    #[serde(rename = "dynamicPosition")]
    pub dynamic_position: Point,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DynamicsStackKerningInput {
    #[serde(rename = "dynamicBBoxes")]
    pub dynamic_bboxes: Vec<BBox>,
    #[serde(
        rename = "hairpinBBoxes",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub hairpin_bboxes: Option<Vec<BBox>>,
    #[serde(
        rename = "atSystemBreak",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub at_system_break: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DynamicsStackKerningOutput {
    #[serde(rename = "dynamicPositions")]
    pub dynamic_positions: Vec<Point>,
}

// ============================================================================
// Beaming
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeamingSlopeClearanceInput {
    #[serde(rename = "notePositionsSP")]
    pub note_positions_sp: Vec<StaffSpace>,
    #[serde(rename = "stemDirections")]
    pub stem_directions: Vec<StemDirection>,
    #[serde(rename = "beamThicknessSP")]
    pub beam_thickness_sp: StaffSpace,
    #[serde(
        rename = "nearbyGrobs",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub nearby_grobs: Option<Vec<BBox>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeamingSlopeClearanceOutput {
    #[serde(rename = "slopeSPPerSpaceAdjusted")]
    pub slope_sp_per_space_adjusted: f64,
    #[serde(
        rename = "minClearanceSP",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub min_clearance_sp: Option<StaffSpace>,
}

/// Per-voice note positions and stem directions; outer vectors are indexed by voice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeamingCrossVoiceSlopeInput {
    #[serde(rename = "voiceNotePositionsSP")]
    pub voice_note_positions_sp: Vec<Vec<StaffSpace>>,
    #[serde(rename = "voiceStemDirections")]
    pub voice_stem_directions: Vec<Vec<StemDirection>>,
    #[serde(rename = "beamThicknessSP")]
    pub beam_thickness_sp: StaffSpace,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeamingCrossVoiceSlopeOutput {
    #[serde(rename = "slopeSPPerSpaceAdjusted")]
    pub slope_sp_per_space_adjusted: f64,
    #[serde(rename = "balanceScore")]
    pub balance_score: f64,
}

// ============================================================================
// Spacing
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoteSpacingOpticalWeightsInput {
    #[serde(rename = "stemDirections")]
    pub stem_directions: Vec<StemDirection>,
    #[serde(rename = "beatStrengths")]
    pub beat_strengths: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoteSpacingOpticalWeightsOutput {
    pub weights: Vec<f64>,
}

// ============================================================================
// Lyrics (vertical stack)
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LyricsBaselineVarianceInput {
    #[serde(rename = "lyricBBox")]
    pub lyric_bbox: BBox,
    #[serde(rename = "staffBaseline")]
    pub staff_baseline: f64,
    #[serde(rename = "varianceSP", default, skip_serializing_if = "Option::is_none")]
    pub variance_sp: Option<StaffSpace>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LyricsBaselineVarianceOutput {
    #[serde(rename = "yOffsetSP")]
    pub y_offset_sp: StaffSpace,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LyricsHyphenMelismaInput {
    #[serde(rename = "syllableBBoxes")]
    pub syllable_bboxes: Vec<BBox>,
    #[serde(
        rename = "hyphenBBoxes",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub hyphen_bboxes: Option<Vec<BBox>>,
    #[serde(
        rename = "melismaLineBBoxes",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub melisma_line_bboxes: Option<Vec<BBox>>,
    #[serde(rename = "staffBaseline")]
    pub staff_baseline: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LyricsHyphenMelismaOutput {
    #[serde(rename = "lyricOffsets")]
    pub lyric_offsets: Vec<f64>,
    #[serde(
        rename = "baselineYOffsetSP",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub baseline_y_offset_sp: Option<StaffSpace>,
}
