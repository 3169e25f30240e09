use crate::animation::ease::Ease;
use crate::animation::tween::Tween;
use crate::controller::env::IconSurface;
use crate::foundation::core::Point;

/// Outcome of advancing the transport on an animation frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransportStatus {
    /// No tween in progress.
    Idle,
    /// A tween is still moving; another frame is needed.
    Moving,
    /// The tween reached its destination on this frame.
    Arrived,
}

/// Owns the icon's on-screen position and its (at most one) in-flight tween.
///
/// A new move cancels the previous tween outright: last call wins, nothing is queued.
#[derive(Clone, Debug)]
pub struct Transport {
    position: Option<Point>,
    scale: f64,
    tween: Option<Tween>,
    duration_ms: f64,
    ease: Ease,
}

impl Transport {
    /// Create a transport that tweens over `duration_ms` with `ease`.
    pub fn new(duration_ms: f64, ease: Ease) -> Self {
        Self {
            position: None,
            scale: 1.0,
            tween: None,
            duration_ms,
            ease,
        }
    }

    /// Last position written to the surface.
    pub fn position(&self) -> Option<Point> {
        self.position
    }

    /// Return `true` while a tween is in flight.
    pub fn is_moving(&self) -> bool {
        self.tween.is_some()
    }

    /// Change the icon scale and re-apply the transform in place.
    pub fn set_scale(&mut self, scale: f64, surface: &mut dyn IconSurface) {
        self.scale = scale;
        if let Some(pos) = self.position {
            surface.set_transform(pos, scale);
        }
    }

    /// Move to `destination`, following `via` waypoints first.
    ///
    /// Snaps synchronously when `immediate` is set, when the configured duration is not
    /// positive, or when there is no known starting position. Otherwise starts a tween from
    /// the current (possibly mid-tween) position at `now_ms`.
    pub fn move_to(
        &mut self,
        via: &[Point],
        destination: Point,
        immediate: bool,
        now_ms: f64,
        surface: &mut dyn IconSurface,
    ) {
        let from = match (&self.tween, self.position) {
            (Some(tw), _) => Some(tw.sample(now_ms).pos),
            (None, pos) => pos,
        };
        self.tween = None;

        let Some(from) = from.filter(|_| !immediate && self.duration_ms > 0.0) else {
            self.snap(destination, surface);
            return;
        };

        let mut path = Vec::with_capacity(via.len() + 2);
        path.push(from);
        path.extend(via.iter().copied().filter(|p| *p != from));
        path.push(destination);
        self.tween = Some(Tween::new(path, now_ms, self.duration_ms, self.ease));
    }

    /// Place the icon at `pos` immediately, cancelling any tween.
    pub fn snap(&mut self, pos: Point, surface: &mut dyn IconSurface) {
        self.tween = None;
        self.position = Some(pos);
        surface.set_transform(pos, self.scale);
    }

    /// Advance the in-flight tween to `now_ms`.
    pub fn tick(&mut self, now_ms: f64, surface: &mut dyn IconSurface) -> TransportStatus {
        let Some(tween) = &self.tween else {
            return TransportStatus::Idle;
        };
        let pos = tween.sample(now_ms).pos;
        let done = tween.is_done(now_ms);
        self.position = Some(pos);
        surface.set_transform(pos, self.scale);
        if done {
            self.tween = None;
            TransportStatus::Arrived
        } else {
            TransportStatus::Moving
        }
    }

    /// Drop any in-flight tween, leaving the icon where it is.
    pub fn cancel(&mut self) {
        self.tween = None;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/controller/transport.rs"]
mod tests;
