use crate::foundation::core::{FrameBounds, FrameIndex, Marker, STATE_COUNT, StateIndex};

/// One timeline frame per semantic state, resolved once per loaded asset.
///
/// Values need not be sorted; a morph's direction comes from the sign of the frame delta.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameMap {
    frames: [FrameIndex; STATE_COUNT],
}

impl FrameMap {
    /// Wrap explicit per-state frames.
    pub fn new(frames: [FrameIndex; STATE_COUNT]) -> Self {
        Self { frames }
    }

    /// Look up each configured state name among `markers`.
    ///
    /// A name that is absent falls back to an evenly spaced frame inside `bounds`: the first
    /// state to `bounds.start`, the last to `bounds.end`, and states in between to the
    /// matching fraction of the range (the rounded midpoint for three states). When a name
    /// occurs more than once the last marker wins. Marker frames outside `bounds` are pulled
    /// to the nearest bound.
    pub fn resolve(markers: &[Marker], bounds: FrameBounds, names: &[String; STATE_COUNT]) -> Self {
        let frames = std::array::from_fn(|i| {
            let found = markers.iter().rev().find(|m| m.name == names[i]);
            match found {
                Some(m) if bounds.contains(m.frame) => m.frame,
                Some(m) => {
                    let clamped = bounds.clamp(m.frame);
                    tracing::warn!(
                        marker = %names[i],
                        frame = m.frame.0,
                        clamped = clamped.0,
                        "marker outside asset bounds; clamping"
                    );
                    clamped
                }
                None => {
                    let fallback = fallback_frame(bounds, i);
                    tracing::debug!(
                        marker = %names[i],
                        frame = fallback.0,
                        "marker missing; using evenly spaced fallback"
                    );
                    fallback
                }
            }
        });
        Self { frames }
    }

    /// Frame for `state`.
    pub fn frame(&self, state: StateIndex) -> FrameIndex {
        self.frames[state.get()]
    }

    /// Frames in state order.
    pub fn frames(&self) -> &[FrameIndex; STATE_COUNT] {
        &self.frames
    }
}

fn fallback_frame(bounds: FrameBounds, i: usize) -> FrameIndex {
    match i {
        0 => bounds.start,
        i if i + 1 == STATE_COUNT => bounds.end,
        i => bounds.at_fraction(i as f64 / (STATE_COUNT - 1) as f64),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/asset/frames.rs"]
mod tests;
