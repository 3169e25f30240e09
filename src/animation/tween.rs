use crate::animation::ease::Ease;
use crate::foundation::core::Point;
use crate::foundation::math::clamp01;
use crate::geometry::polyline::{PathSample, point_along_polyline};

/// Time-based positional tween along a polyline of waypoints.
///
/// A two-point path is a plain straight-line move. Time is expressed in milliseconds on the
/// host's animation-frame clock.
#[derive(Clone, Debug, PartialEq)]
pub struct Tween {
    path: Vec<Point>,
    start_ms: f64,
    duration_ms: f64,
    ease: Ease,
}

impl Tween {
    /// Create a tween over `path` starting at `start_ms`.
    ///
    /// Non-positive durations produce a tween that is already finished.
    pub fn new(path: Vec<Point>, start_ms: f64, duration_ms: f64, ease: Ease) -> Self {
        Self {
            path,
            start_ms,
            duration_ms: duration_ms.max(0.0),
            ease,
        }
    }

    /// Normalized (un-eased) progress at `now_ms`.
    pub fn progress(&self, now_ms: f64) -> f64 {
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        clamp01((now_ms - self.start_ms) / self.duration_ms)
    }

    /// Position and heading at `now_ms`.
    pub fn sample(&self, now_ms: f64) -> PathSample {
        point_along_polyline(&self.path, self.ease.apply(self.progress(now_ms)))
    }

    /// Return `true` once the tween has reached its destination.
    pub fn is_done(&self, now_ms: f64) -> bool {
        self.progress(now_ms) >= 1.0
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/tween.rs"]
mod tests;
