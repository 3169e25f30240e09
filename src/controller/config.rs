use std::io::Read;

use crate::animation::ease::Ease;
use crate::controller::env::{ElementId, MediaCondition};
use crate::foundation::core::{STATE_COUNT, StateIndex, Vec2};
use crate::foundation::error::{MorphError, MorphResult};
use crate::geometry::anchors::ScaleBounds;

/// How the icon travels between resting slots.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Route {
    /// Straight line from the current position to the destination.
    #[default]
    Direct,
    /// Polyline through every slot between the origin and destination states.
    ThroughSlots,
}

/// Static controller configuration. Never mutated at runtime.
///
/// Deserializes from camelCase JSON; every field except the element identities and marker
/// names has a default.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct MorphConfig {
    /// URL of the Lottie animation asset.
    pub asset_url: String,
    /// Marker names, one per state, in state order.
    pub state_markers: [String; STATE_COUNT],
    /// Elements whose scroll position selects each state.
    pub anchor_ids: [ElementId; STATE_COUNT],
    /// Elements the icon rests on for each state.
    pub slot_ids: [ElementId; STATE_COUNT],
    /// Container defining the local coordinate origin.
    pub lane_id: ElementId,
    /// Icon footprint in asset-native units.
    #[serde(default = "default_size_px")]
    pub size_px: f64,
    /// Responsive activation condition.
    #[serde(default)]
    pub media: MediaCondition,
    /// Per-state pixel offsets added to slot centers.
    #[serde(default)]
    pub offsets: [Vec2; STATE_COUNT],
    /// Bounds for the automatic fit scale.
    #[serde(default)]
    pub scale: ScaleBounds,
    /// Position tween duration in milliseconds; `0` snaps.
    #[serde(default = "default_move_ms")]
    pub move_ms: f64,
    /// Position tween easing.
    #[serde(default)]
    pub ease: Ease,
    /// Target wall-clock duration of one morph in milliseconds; `0` jumps to the end frame.
    #[serde(default = "default_segment_ms")]
    pub segment_ms: f64,
    /// Travel path between slots.
    #[serde(default)]
    pub route: Route,
    /// Minimum slot height; each slot is resized to match its anchor. `None` disables syncing.
    #[serde(default = "default_min_slot_height_px")]
    pub min_slot_height_px: Option<f64>,
    /// Scroll offsets at or below this value force [`MorphConfig::default_state`].
    #[serde(default)]
    pub top_snap_px: Option<f64>,
    /// State used near the top of the page.
    #[serde(default)]
    pub default_state: StateIndex,
    /// Promote per-transition diagnostics to `info`.
    #[serde(default)]
    pub debug: bool,
}

fn default_size_px() -> f64 {
    1080.0
}

fn default_move_ms() -> f64 {
    200.0
}

fn default_segment_ms() -> f64 {
    500.0
}

fn default_min_slot_height_px() -> Option<f64> {
    Some(200.0)
}

impl MorphConfig {
    /// Configuration with default tuning for the given identities.
    pub fn new(
        asset_url: impl Into<String>,
        state_markers: [String; STATE_COUNT],
        anchor_ids: [ElementId; STATE_COUNT],
        slot_ids: [ElementId; STATE_COUNT],
        lane_id: ElementId,
    ) -> Self {
        Self {
            asset_url: asset_url.into(),
            state_markers,
            anchor_ids,
            slot_ids,
            lane_id,
            size_px: default_size_px(),
            media: MediaCondition::default(),
            offsets: [Vec2::ZERO; STATE_COUNT],
            scale: ScaleBounds::default(),
            move_ms: default_move_ms(),
            ease: Ease::default(),
            segment_ms: default_segment_ms(),
            route: Route::default(),
            min_slot_height_px: default_min_slot_height_px(),
            top_snap_px: None,
            default_state: StateIndex::default(),
            debug: false,
        }
    }

    /// Parse and validate JSON text.
    pub fn from_json_str(json: &str) -> MorphResult<Self> {
        let cfg: Self = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Parse and validate JSON from a reader.
    pub fn from_json_reader(reader: impl Read) -> MorphResult<Self> {
        let cfg: Self = serde_json::from_reader(reader)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Check identities, sizes and durations.
    pub fn validate(&self) -> MorphResult<()> {
        if self.asset_url.trim().is_empty() {
            return Err(MorphError::validation("assetUrl must not be empty"));
        }
        if self.state_markers.iter().any(|m| m.trim().is_empty()) {
            return Err(MorphError::validation("stateMarkers must not be empty"));
        }
        let ids = self
            .anchor_ids
            .iter()
            .chain(self.slot_ids.iter())
            .chain(std::iter::once(&self.lane_id));
        for id in ids {
            if id.as_str().trim().is_empty() {
                return Err(MorphError::validation("element ids must not be empty"));
            }
        }
        if !(self.size_px.is_finite() && self.size_px > 0.0) {
            return Err(MorphError::validation("sizePx must be finite and > 0"));
        }
        let ScaleBounds { base, min, max } = self.scale;
        if !(base.is_finite() && min.is_finite() && max.is_finite()) {
            return Err(MorphError::validation("scale bounds must be finite"));
        }
        if min <= 0.0 || min > max {
            return Err(MorphError::validation("scale bounds need 0 < min <= max"));
        }
        for (name, ms) in [("moveMs", self.move_ms), ("segmentMs", self.segment_ms)] {
            if !(ms.is_finite() && ms >= 0.0) {
                return Err(MorphError::validation(format!(
                    "{name} must be finite and >= 0"
                )));
            }
        }
        if self.offsets.iter().any(|o| !o.is_finite()) {
            return Err(MorphError::validation("offsets must be finite"));
        }
        for (name, v) in [
            ("minSlotHeightPx", self.min_slot_height_px),
            ("topSnapPx", self.top_snap_px),
        ] {
            if v.is_some_and(|px| !(px.is_finite() && px >= 0.0)) {
                return Err(MorphError::validation(format!(
                    "{name} must be finite and >= 0"
                )));
            }
        }
        self.media.validate()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/controller/config.rs"]
mod tests;
