//! Scroll-synchronized icon transport and morph controller.
//!
//! A single vector icon rests in one of three slots beside a column of content cards. As the
//! page scrolls, the card nearest the viewport center selects a state; the icon then glides
//! to that state's slot while a Lottie animation morphs between the frames marked for the
//! old and new states.
//!
//! # Pipeline overview
//!
//! 1. **Measure**: lane, slot and anchor rects become an [`AnchorSet`] (lane coordinates) and
//!    [`Thresholds`] (document coordinates).
//! 2. **Resolve**: the asset's markers become a [`FrameMap`], falling back to evenly spaced
//!    frames for missing names.
//! 3. **Map**: on each animation frame with pending scroll, the viewport center is bucketed
//!    into a [`StateIndex`] by the [`ScrollMapper`].
//! 4. **Transport + morph**: a state change retargets the [`Transport`] tween and asks the
//!    [`MorphSequencer`] to play the frame range, deferring into a single pending slot while
//!    another morph is playing.
//!
//! The host page is abstracted behind [`Environment`], [`IconSurface`] and [`AssetLoader`]
//! and drives the [`MorphController`] by feeding it [`Event`]s, so the whole controller runs
//! headless against [`MemoryEnvironment`], [`RecordingSurface`] and [`HeadlessLoader`].
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod animation;
mod asset;
mod controller;
mod foundation;
mod geometry;

pub use crate::animation::ease::Ease;
pub use crate::animation::tween::Tween;
pub use crate::asset::frames::FrameMap;
pub use crate::asset::lottie::{LottieDoc, LottieMarker};
pub use crate::asset::player::{
    AnimationAsset, AssetCommand, AssetLoader, HeadlessLoader, HeadlessPlayer, PlayDirection,
    PlayRange, SharedPlayer,
};
pub use crate::controller::config::{MorphConfig, Route};
pub use crate::controller::env::{
    ElementId, Environment, Event, IconSurface, MediaCondition, Subscription, Viewport,
};
pub use crate::controller::lifecycle::MorphController;
pub use crate::controller::mapper::{ScrollMapper, StateChange};
pub use crate::controller::memory::{MemoryEnvironment, RecordingSurface, SurfaceOp};
pub use crate::controller::sequencer::{
    MorphAction, MorphEvent, MorphInput, MorphPhase, MorphSequencer, playback_range, step,
};
pub use crate::controller::transport::{Transport, TransportStatus};
pub use crate::foundation::core::{
    FrameBounds, FrameIndex, Fps, Marker, Point, Rect, STATE_COUNT, StateIndex, Vec2,
};
pub use crate::foundation::error::{MorphError, MorphResult};
pub use crate::foundation::math::{clamp01, distance, lerp};
pub use crate::geometry::anchors::{
    AnchorSet, ScaleBounds, Thresholds, anchor_centers, document_center_y, fit_scale,
    icon_origin, slot_center,
};
pub use crate::geometry::polyline::{PathSample, point_along_polyline, polyline_length};
