//! Lane-space anchor measurement.
//!
//! All positions here are in the lane's local coordinate space: the origin is the lane
//! element's top-left corner, so values are stable under scrolling.

use crate::foundation::core::{Point, Rect, STATE_COUNT, StateIndex, Vec2};
use crate::foundation::math::round_point;

/// Resting points of the icon, one per state, in lane coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AnchorSet {
    points: [Point; STATE_COUNT],
}

impl AnchorSet {
    /// Wrap explicit per-state points.
    pub fn new(points: [Point; STATE_COUNT]) -> Self {
        Self { points }
    }

    /// Anchor point for `state`.
    pub fn point(&self, state: StateIndex) -> Point {
        self.points[state.get()]
    }

    /// All anchor points in state order.
    pub fn points(&self) -> &[Point; STATE_COUNT] {
        &self.points
    }

    /// Anchor points visited when travelling from `from` to `to`, both ends included.
    pub fn route(&self, from: StateIndex, to: StateIndex) -> Vec<Point> {
        let (a, b) = (from.get(), to.get());
        if a <= b {
            self.points[a..=b].to_vec()
        } else {
            self.points[b..=a].iter().rev().copied().collect()
        }
    }
}

/// Center of `slot` relative to `lane`, shifted by `offset`.
pub fn slot_center(lane: Rect, slot: Rect, offset: Vec2) -> Point {
    Point::new(
        slot.x0 - lane.x0 + slot.width() / 2.0 + offset.x,
        slot.y0 - lane.y0 + slot.height() / 2.0 + offset.y,
    )
}

/// Centers of every slot in lane space, with per-state offsets applied.
pub fn anchor_centers(
    lane: Rect,
    slots: &[Rect; STATE_COUNT],
    offsets: &[Vec2; STATE_COUNT],
) -> AnchorSet {
    AnchorSet::new(std::array::from_fn(|i| {
        slot_center(lane, slots[i], offsets[i])
    }))
}

/// Top-left translation that centers an icon of `size_px` on `center`, snapped to pixels.
pub fn icon_origin(center: Point, size_px: f64) -> Point {
    round_point(center - Vec2::new(size_px / 2.0, size_px / 2.0))
}

/// Vertical center of a viewport-space rect expressed in document coordinates.
pub fn document_center_y(rect: Rect, scroll_y: f64) -> f64 {
    rect.y0 + scroll_y + rect.height() / 2.0
}

/// Scroll cut points separating consecutive states.
///
/// Cut `i` is the midpoint between the document-space centers of anchors `i` and `i + 1`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Thresholds {
    cuts: [f64; STATE_COUNT - 1],
}

impl Thresholds {
    /// Midpoints between consecutive anchor centers.
    pub fn from_centers(centers_y: &[f64; STATE_COUNT]) -> Self {
        Self {
            cuts: std::array::from_fn(|i| (centers_y[i] + centers_y[i + 1]) / 2.0),
        }
    }

    /// Cut points in state order.
    pub fn cuts(&self) -> &[f64] {
        &self.cuts
    }

    /// Bucket a document-space y coordinate into a state.
    pub fn classify(&self, y: f64) -> StateIndex {
        self.cuts
            .iter()
            .position(|&cut| y < cut)
            .map_or(StateIndex::last(), |i| StateIndex::ALL[i])
    }
}

/// Bounds applied to the icon's automatically computed fit scale.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ScaleBounds {
    /// Multiplier applied to the raw lane-fit ratio.
    pub base: f64,
    /// Smallest allowed scale.
    pub min: f64,
    /// Largest allowed scale.
    pub max: f64,
}

impl Default for ScaleBounds {
    fn default() -> Self {
        Self {
            base: 1.9,
            min: 1.1,
            max: 2.1,
        }
    }
}

/// Scale that fits an icon of `size_px` into the lane's shorter side, within `bounds`.
pub fn fit_scale(lane: Rect, size_px: f64, bounds: ScaleBounds) -> f64 {
    let short_side = lane.width().min(lane.height()).max(1e-6);
    let base = if bounds.base > 0.0 { bounds.base } else { 1.0 };
    (short_side / size_px * base).clamp(bounds.min, bounds.max)
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/anchors.rs"]
mod tests;
