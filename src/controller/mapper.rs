use crate::controller::env::Viewport;
use crate::foundation::core::StateIndex;
use crate::geometry::anchors::Thresholds;

/// A change of the active state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StateChange {
    /// Previously active state.
    pub from: StateIndex,
    /// Newly active state.
    pub to: StateIndex,
}

/// Maps the scroll-derived viewport center onto a state and owns the active state.
#[derive(Clone, Debug)]
pub struct ScrollMapper {
    thresholds: Option<Thresholds>,
    active: StateIndex,
    top_snap_px: Option<f64>,
    default_state: StateIndex,
}

impl ScrollMapper {
    /// Create a mapper; `top_snap_px` forces `default_state` while `scroll_y` is at or
    /// below it.
    pub fn new(top_snap_px: Option<f64>, default_state: StateIndex) -> Self {
        Self {
            thresholds: None,
            active: default_state,
            top_snap_px,
            default_state,
        }
    }

    /// Replace the scroll cut points after a measurement pass.
    pub fn set_thresholds(&mut self, thresholds: Thresholds) {
        self.thresholds = Some(thresholds);
    }

    /// Current cut points; `None` until a complete measurement was seen.
    pub fn thresholds(&self) -> Option<&Thresholds> {
        self.thresholds.as_ref()
    }

    /// Currently active state.
    pub fn active(&self) -> StateIndex {
        self.active
    }

    /// State the viewport maps to, without changing the active state.
    ///
    /// Without thresholds every viewport maps to the default state.
    pub fn map(&self, vp: Viewport) -> StateIndex {
        if self.top_snap_px.is_some_and(|px| vp.scroll_y <= px) {
            return self.default_state;
        }
        match &self.thresholds {
            Some(th) => th.classify(vp.center_y()),
            None => self.default_state,
        }
    }

    /// Force the active state (used when enabling).
    pub fn reset(&mut self, state: StateIndex) {
        self.active = state;
    }

    /// Re-evaluate the viewport; returns the change when the mapped state differs.
    pub fn update(&mut self, vp: Viewport) -> Option<StateChange> {
        let to = self.map(vp);
        if to == self.active {
            return None;
        }
        let change = StateChange {
            from: self.active,
            to,
        };
        self.active = to;
        Some(change)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/controller/mapper.rs"]
mod tests;
