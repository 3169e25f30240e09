use std::collections::{BTreeMap, BTreeSet};

use crate::controller::env::{ElementId, Environment, IconSurface, Subscription, Viewport};
use crate::foundation::core::{Point, Rect, Vec2};

/// In-memory page for tests and simulation.
///
/// Element rects are stored in document coordinates and reported in viewport coordinates,
/// so scrolling moves every element the way a browser would.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryEnvironment {
    viewport: Viewport,
    #[serde(default)]
    reduced_motion: bool,
    #[serde(default)]
    elements: BTreeMap<ElementId, Rect>,
    #[serde(skip)]
    subscriptions: BTreeSet<Subscription>,
    #[serde(skip)]
    frame_requested: bool,
}

impl MemoryEnvironment {
    /// Create an empty page with the given viewport.
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            ..Self::default()
        }
    }

    /// Place (or move) an element, in document coordinates.
    pub fn set_rect(&mut self, id: impl Into<ElementId>, rect: Rect) {
        let _ = self.elements.insert(id.into(), rect);
    }

    /// Remove an element from the page.
    pub fn remove(&mut self, id: &ElementId) {
        let _ = self.elements.remove(id);
    }

    /// Document-space rect of `id`.
    pub fn document_rect(&self, id: &ElementId) -> Option<Rect> {
        self.elements.get(id).copied()
    }

    /// Scroll to document offset `y`.
    pub fn scroll_to(&mut self, y: f64) {
        self.viewport.scroll_y = y;
    }

    /// Resize the viewport.
    pub fn resize(&mut self, width: f64, inner_height: f64) {
        self.viewport.width = width;
        self.viewport.inner_height = inner_height;
    }

    /// Toggle the reduced-motion preference.
    pub fn set_reduced_motion(&mut self, reduced: bool) {
        self.reduced_motion = reduced;
    }

    /// Active subscriptions.
    pub fn subscriptions(&self) -> &BTreeSet<Subscription> {
        &self.subscriptions
    }

    /// Return and clear the pending animation-frame request.
    pub fn take_frame_request(&mut self) -> bool {
        std::mem::take(&mut self.frame_requested)
    }
}

impl Environment for MemoryEnvironment {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn prefers_reduced_motion(&self) -> bool {
        self.reduced_motion
    }

    fn element_rect(&self, id: &ElementId) -> Option<Rect> {
        self.elements
            .get(id)
            .map(|r| *r - Vec2::new(0.0, self.viewport.scroll_y))
    }

    fn set_element_height(&mut self, id: &ElementId, px: f64) {
        if let Some(r) = self.elements.get_mut(id) {
            r.y1 = r.y0 + px;
        }
    }

    fn subscribe(&mut self, sub: Subscription) {
        let _ = self.subscriptions.insert(sub);
    }

    fn unsubscribe_all(&mut self) {
        self.subscriptions.clear();
        self.frame_requested = false;
    }

    fn request_animation_frame(&mut self) {
        self.frame_requested = true;
    }
}

/// Icon state change recorded by [`RecordingSurface`].
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum SurfaceOp {
    /// `set_transform(pos, scale)`.
    Transform {
        /// Top-left position in lane coordinates.
        pos: Point,
        /// Uniform scale.
        scale: f64,
    },
    /// `set_visible(visible)`.
    Visible {
        /// New visibility.
        visible: bool,
    },
}

/// Icon surface that records every change, for tests and debugging.
#[derive(Clone, Debug, Default)]
pub struct RecordingSurface {
    ops: Vec<SurfaceOp>,
    position: Option<Point>,
    scale: f64,
    visible: bool,
}

impl RecordingSurface {
    /// Create an empty, hidden surface.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every recorded change, oldest first.
    pub fn ops(&self) -> &[SurfaceOp] {
        &self.ops
    }

    /// Forget recorded changes, keeping the current state.
    pub fn clear_ops(&mut self) {
        self.ops.clear();
    }

    /// Last position set, if any.
    pub fn position(&self) -> Option<Point> {
        self.position
    }

    /// Last scale set.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Current visibility.
    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

impl IconSurface for RecordingSurface {
    fn set_transform(&mut self, pos: Point, scale: f64) {
        self.position = Some(pos);
        self.scale = scale;
        self.ops.push(SurfaceOp::Transform { pos, scale });
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
        self.ops.push(SurfaceOp::Visible { visible });
    }
}

#[cfg(test)]
#[path = "../../tests/unit/controller/memory.rs"]
mod tests;
