//! The observed environment: everything the controller reads from or writes to the host page.
//!
//! The controller holds no global state. A browser host implements these traits over the
//! DOM; tests and the simulation binary use [`MemoryEnvironment`](crate::MemoryEnvironment).

use crate::foundation::core::{Point, Rect};
use crate::foundation::error::{MorphError, MorphResult};

/// Identity of a layout element (a CSS selector on the web).
#[derive(
    Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct ElementId(pub String);

impl ElementId {
    /// Build an id from anything string-like.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The raw identity.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ElementId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Responsive condition under which the controller is active.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MediaCondition {
    /// Always active.
    Always,
    /// Active while the viewport is at least this wide.
    MinWidth(f64),
    /// Active while the viewport is at most this wide.
    MaxWidth(f64),
}

impl Default for MediaCondition {
    fn default() -> Self {
        Self::MinWidth(1280.0)
    }
}

impl MediaCondition {
    /// Evaluate against a viewport width.
    pub fn matches(self, viewport_width: f64) -> bool {
        match self {
            Self::Always => true,
            Self::MinWidth(px) => viewport_width >= px,
            Self::MaxWidth(px) => viewport_width <= px,
        }
    }

    pub(crate) fn validate(self) -> MorphResult<()> {
        match self {
            Self::Always => Ok(()),
            Self::MinWidth(px) | Self::MaxWidth(px) if px.is_finite() && px >= 0.0 => Ok(()),
            _ => Err(MorphError::validation("media width must be finite and >= 0")),
        }
    }
}

/// Snapshot of the scroll viewport.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Viewport {
    /// Viewport width in CSS pixels.
    pub width: f64,
    /// Viewport height in CSS pixels.
    pub inner_height: f64,
    /// Vertical scroll offset of the document.
    pub scroll_y: f64,
    /// Total scrollable document height.
    pub scroll_height: f64,
}

impl Viewport {
    /// Document-space y of the viewport's vertical center, kept inside the document.
    pub fn center_y(self) -> f64 {
        let mid = self.scroll_y + self.inner_height / 2.0;
        mid.max(1.0).min(self.scroll_height - 1.0)
    }
}

/// A notification source the controller attaches while enabled.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Subscription {
    /// Window scroll events.
    Scroll,
    /// Window resize events.
    Resize,
    /// Device orientation changes.
    OrientationChange,
    /// Size changes of one element.
    ElementResize(ElementId),
}

/// Host notifications delivered to [`MorphController::handle`](crate::MorphController::handle).
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Event {
    /// The responsive media condition may have flipped.
    MediaChanged,
    /// The document scrolled.
    Scroll,
    /// The window resized.
    Resize,
    /// The device orientation changed.
    OrientationChange,
    /// An observed element changed size.
    ElementResized(ElementId),
    /// A previously requested animation frame is being rendered.
    AnimationFrame {
        /// Host clock in milliseconds.
        now_ms: f64,
    },
    /// The animation asset finished the range it was playing.
    MorphComplete,
    /// The host is tearing the component down.
    Teardown,
}

/// Layout, viewport and event-registration capability of the host page.
pub trait Environment {
    /// Current viewport snapshot.
    fn viewport(&self) -> Viewport;

    /// Whether the user asked for reduced motion.
    fn prefers_reduced_motion(&self) -> bool;

    /// Bounding rectangle of `id` in viewport coordinates, or `None` when it does not exist.
    fn element_rect(&self, id: &ElementId) -> Option<Rect>;

    /// Set the layout height of `id`. Missing elements are ignored.
    fn set_element_height(&mut self, id: &ElementId, px: f64);

    /// Start delivering events for `sub`.
    fn subscribe(&mut self, sub: Subscription);

    /// Stop delivering every event source registered through [`Environment::subscribe`].
    fn unsubscribe_all(&mut self);

    /// Ask for one [`Event::AnimationFrame`] before the next paint.
    fn request_animation_frame(&mut self);

    /// Evaluate a media condition against the current viewport.
    fn matches_media(&self, cond: MediaCondition) -> bool {
        cond.matches(self.viewport().width)
    }
}

/// The single icon element owned by the controller.
pub trait IconSurface {
    /// Place the icon's top-left corner at `pos` (lane coordinates) with uniform `scale`.
    fn set_transform(&mut self, pos: Point, scale: f64);

    /// Show or hide the icon.
    fn set_visible(&mut self, visible: bool);
}

#[cfg(test)]
#[path = "../../tests/unit/controller/env.rs"]
mod tests;
