use crate::foundation::error::{MorphError, MorphResult};

pub use kurbo::{Point, Rect, Vec2};

/// Number of semantic states the controller moves between.
pub const STATE_COUNT: usize = 3;

/// Absolute 0-based frame number on an animation asset's timeline.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

impl FrameIndex {
    /// Round a fractional timeline position to the nearest frame, clamping negatives to 0.
    pub fn from_f64_round(frame: f64) -> Self {
        if !frame.is_finite() {
            return Self(0);
        }
        Self(frame.round().max(0.0) as u64)
    }

    /// Signed distance `other - self` in frames, saturating at the `i64` range.
    pub fn delta_to(self, other: FrameIndex) -> i64 {
        let d = i128::from(other.0) - i128::from(self.0);
        i64::try_from(d).unwrap_or(if d < 0 { i64::MIN } else { i64::MAX })
    }
}

/// Inclusive frame range `[start, end]` an asset can be seeked within.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FrameBounds {
    /// First playable frame.
    pub start: FrameIndex,
    /// Last playable frame (inclusive).
    pub end: FrameIndex,
}

impl FrameBounds {
    /// Create validated bounds with `start <= end`.
    pub fn new(start: FrameIndex, end: FrameIndex) -> MorphResult<Self> {
        if start.0 > end.0 {
            return Err(MorphError::validation("FrameBounds start must be <= end"));
        }
        Ok(Self { start, end })
    }

    /// Bounds of a Lottie timeline given its `ip` (in point) and `op` (out point).
    ///
    /// `op` is exclusive, so the last frame is `op - 1`, and the range always spans at least
    /// one frame past `ip`.
    pub fn from_in_out(ip: f64, op: f64) -> Self {
        let start = FrameIndex::from_f64_round(ip);
        let end = FrameIndex::from_f64_round((ip + 1.0).max(op - 1.0));
        Self {
            start,
            end: end.max(start),
        }
    }

    /// Return `true` when `f` lies inside `[start, end]`.
    pub fn contains(self, f: FrameIndex) -> bool {
        self.start <= f && f <= self.end
    }

    /// Nearest frame to `f` inside `[start, end]`.
    pub fn clamp(self, f: FrameIndex) -> FrameIndex {
        f.clamp(self.start, self.end)
    }

    /// Frame at fraction `t` of the way from start to end, rounded to the nearest frame.
    pub fn at_fraction(self, t: f64) -> FrameIndex {
        let s = self.start.0 as f64;
        let e = self.end.0 as f64;
        FrameIndex::from_f64_round(s + (e - s) * t.clamp(0.0, 1.0))
    }
}

/// Frames-per-second of an animation asset.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Fps(f64);

impl Fps {
    /// Create a validated frame rate (finite and `> 0`).
    pub fn new(fps: f64) -> MorphResult<Self> {
        if !fps.is_finite() || fps <= 0.0 {
            return Err(MorphError::validation("Fps must be finite and > 0"));
        }
        Ok(Self(fps))
    }

    /// Frame rate as a float.
    pub fn as_f64(self) -> f64 {
        self.0
    }

    /// Wall-clock milliseconds needed to play `frames` frames at normal speed.
    pub fn frames_to_ms(self, frames: u64) -> f64 {
        frames as f64 / self.0 * 1000.0
    }
}

/// Index of one of the [`STATE_COUNT`] semantic states (for example "human", "heart", "dev").
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize,
    serde::Deserialize,
)]
#[serde(try_from = "usize", into = "usize")]
pub struct StateIndex(usize);

impl StateIndex {
    /// Every state in order.
    pub const ALL: [StateIndex; STATE_COUNT] = [StateIndex(0), StateIndex(1), StateIndex(2)];

    /// Create a validated state index (`< STATE_COUNT`).
    pub fn new(idx: usize) -> MorphResult<Self> {
        if idx >= STATE_COUNT {
            return Err(MorphError::validation(format!(
                "state index {idx} out of range (expected < {STATE_COUNT})"
            )));
        }
        Ok(Self(idx))
    }

    /// The last state.
    pub fn last() -> Self {
        Self(STATE_COUNT - 1)
    }

    /// Position of this state in per-state arrays.
    pub fn get(self) -> usize {
        self.0
    }
}

impl TryFrom<usize> for StateIndex {
    type Error = MorphError;

    fn try_from(idx: usize) -> MorphResult<Self> {
        Self::new(idx)
    }
}

impl From<StateIndex> for usize {
    fn from(s: StateIndex) -> usize {
        s.0
    }
}

impl std::fmt::Display for StateIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Named point on an animation timeline.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Marker {
    /// Marker name as authored in the asset.
    pub name: String,
    /// Frame the marker sits on.
    pub frame: FrameIndex,
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
