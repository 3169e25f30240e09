//! Serialized morph playback with a pending slot of size one.
//!
//! At most one morph plays on the shared asset. Requests arriving meanwhile overwrite a
//! single pending target; when the in-flight morph completes the sequencer settles on its
//! target and, if the pending target still differs, chains straight into it. Intermediate
//! requests are dropped, never queued.

use crate::asset::frames::FrameMap;
use crate::asset::player::{AnimationAsset, PlayDirection, PlayRange};
use crate::foundation::core::{FrameIndex, Fps, StateIndex};

/// Occupancy of the morph slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MorphPhase {
    /// Nothing playing.
    Idle,
    /// One morph playing, nothing waiting.
    InFlight {
        /// State the morph started from.
        from: StateIndex,
        /// State the morph ends on.
        to: StateIndex,
    },
    /// One morph playing and a newer target waiting for it.
    Pending {
        /// State the morph started from.
        from: StateIndex,
        /// State the morph ends on.
        to: StateIndex,
        /// Most recently requested target.
        next: StateIndex,
    },
}

/// Input to [`step`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MorphInput {
    /// A morph from `from` to `to` was requested.
    Request {
        /// Caller's idea of the current state.
        from: StateIndex,
        /// Desired state.
        to: StateIndex,
    },
    /// The asset reported the end of the playing range.
    Complete,
}

/// Side effect selected by [`step`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MorphAction {
    /// Nothing to do.
    None,
    /// The request was parked in the pending slot.
    Defer {
        /// Target now waiting.
        target: StateIndex,
    },
    /// Begin playing `from -> to`.
    Start {
        /// Origin state.
        from: StateIndex,
        /// Destination state.
        to: StateIndex,
    },
    /// The in-flight morph ended on `state`.
    Settle {
        /// State now displayed.
        state: StateIndex,
    },
    /// The in-flight morph ended on `state`; begin the deferred `state -> to` at once.
    SettleAndStart {
        /// State now displayed.
        state: StateIndex,
        /// Deferred destination.
        to: StateIndex,
    },
}

/// The sequencer's transition function.
pub fn step(phase: MorphPhase, input: MorphInput) -> (MorphPhase, MorphAction) {
    use MorphAction as A;
    use MorphPhase as P;

    match (phase, input) {
        (P::Idle, MorphInput::Request { from, to }) if from == to => (P::Idle, A::None),
        (P::Idle, MorphInput::Request { from, to }) => {
            (P::InFlight { from, to }, A::Start { from, to })
        }
        (
            P::InFlight { from, to } | P::Pending { from, to, .. },
            MorphInput::Request { to: next, .. },
        ) => (P::Pending { from, to, next }, A::Defer { target: next }),
        (P::Idle, MorphInput::Complete) => (P::Idle, A::None),
        (P::InFlight { to, .. }, MorphInput::Complete) => (P::Idle, A::Settle { state: to }),
        (P::Pending { to, next, .. }, MorphInput::Complete) if next == to => {
            (P::Idle, A::Settle { state: to })
        }
        (P::Pending { to, next, .. }, MorphInput::Complete) => (
            P::InFlight { from: to, to: next },
            A::SettleAndStart { state: to, to: next },
        ),
    }
}

/// Observable result of driving the sequencer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MorphEvent {
    /// Playback of `from -> to` was commanded.
    Started {
        /// Origin state.
        from: StateIndex,
        /// Destination state.
        to: StateIndex,
    },
    /// A request was parked behind the in-flight morph.
    Deferred {
        /// Target now pending.
        target: StateIndex,
    },
    /// Terminal event of one logical transition.
    Settled {
        /// State now displayed.
        state: StateIndex,
    },
}

/// Frame range and speed that play `start -> end` in `segment_ms` of wall-clock time.
///
/// Speed falls back to `1.0` when the natural duration or `segment_ms` is not positive.
pub fn playback_range(
    start: FrameIndex,
    end: FrameIndex,
    fps: Fps,
    segment_ms: f64,
) -> PlayRange {
    let natural_ms = fps.frames_to_ms(start.delta_to(end).unsigned_abs());
    let speed = if natural_ms > 0.0 && segment_ms > 0.0 {
        natural_ms / segment_ms
    } else {
        1.0
    };
    PlayRange {
        start,
        end,
        direction: PlayDirection::between(start, end),
        speed,
    }
}

/// Drives the animation asset between state frames.
#[derive(Clone, Debug)]
pub struct MorphSequencer {
    phase: MorphPhase,
    current: StateIndex,
    segment_ms: f64,
}

impl MorphSequencer {
    /// Create an idle sequencer displaying `current`.
    ///
    /// A non-positive `segment_ms` makes every morph jump straight to its end frame.
    pub fn new(current: StateIndex, segment_ms: f64) -> Self {
        Self {
            phase: MorphPhase::Idle,
            current,
            segment_ms,
        }
    }

    /// State the asset last settled on.
    pub fn current(&self) -> StateIndex {
        self.current
    }

    /// Current slot occupancy.
    pub fn phase(&self) -> MorphPhase {
        self.phase
    }

    /// Return `true` while a morph is in flight.
    pub fn is_busy(&self) -> bool {
        self.phase != MorphPhase::Idle
    }

    /// Request a morph from `from` to `to`.
    ///
    /// Idle and `from == to`: nothing happens. Busy: `to` replaces the pending target.
    pub fn morph_to(
        &mut self,
        from: StateIndex,
        to: StateIndex,
        frames: &FrameMap,
        asset: &mut dyn AnimationAsset,
    ) -> Vec<MorphEvent> {
        self.drive(MorphInput::Request { from, to }, frames, asset)
    }

    /// Handle the asset's completion of the playing range.
    ///
    /// Completions that arrive while idle are stale and ignored.
    pub fn on_complete(
        &mut self,
        frames: &FrameMap,
        asset: &mut dyn AnimationAsset,
    ) -> Vec<MorphEvent> {
        self.drive(MorphInput::Complete, frames, asset)
    }

    fn drive(
        &mut self,
        input: MorphInput,
        frames: &FrameMap,
        asset: &mut dyn AnimationAsset,
    ) -> Vec<MorphEvent> {
        let mut events = Vec::new();
        let mut next = Some(input);
        while let Some(input) = next.take() {
            let (phase, action) = step(self.phase, input);
            self.phase = phase;
            let start = match action {
                MorphAction::None => None,
                MorphAction::Defer { target } => {
                    events.push(MorphEvent::Deferred { target });
                    None
                }
                MorphAction::Start { from, to } => Some((from, to)),
                MorphAction::Settle { state } => {
                    self.current = state;
                    events.push(MorphEvent::Settled { state });
                    None
                }
                MorphAction::SettleAndStart { state, to } => {
                    self.current = state;
                    events.push(MorphEvent::Settled { state });
                    Some((state, to))
                }
            };
            if let Some((from, to)) = start {
                if self.play(from, to, frames, asset) {
                    events.push(MorphEvent::Started { from, to });
                } else {
                    next = Some(MorphInput::Complete);
                }
            }
        }
        events
    }

    /// Command playback; `false` means the morph finished synchronously.
    fn play(
        &self,
        from: StateIndex,
        to: StateIndex,
        frames: &FrameMap,
        asset: &mut dyn AnimationAsset,
    ) -> bool {
        let start = frames.frame(from);
        let end = frames.frame(to);
        if start != end && self.segment_ms > 0.0 {
            let range = playback_range(start, end, asset.frame_rate(), self.segment_ms);
            match asset.play_range(range) {
                Ok(()) => {
                    tracing::debug!(
                        %from,
                        %to,
                        start = start.0,
                        end = end.0,
                        speed = range.speed,
                        "morph started"
                    );
                    return true;
                }
                Err(err) => tracing::warn!(
                    %from,
                    %to,
                    error = %err,
                    "morph playback failed; jumping to end frame"
                ),
            }
        }
        if let Err(err) = asset.seek_and_hold(end) {
            tracing::warn!(frame = end.0, error = %err, "seek failed; keeping last frame");
        }
        false
    }
}

#[cfg(test)]
#[path = "../../tests/unit/controller/sequencer.rs"]
mod tests;
