use crate::asset::frames::FrameMap;
use crate::asset::player::{AnimationAsset, AssetLoader};
use crate::controller::config::{MorphConfig, Route};
use crate::controller::env::{Environment, Event, IconSurface, Subscription};
use crate::controller::mapper::{ScrollMapper, StateChange};
use crate::controller::sequencer::{MorphEvent, MorphPhase, MorphSequencer};
use crate::controller::transport::{Transport, TransportStatus};
use crate::foundation::core::{Point, StateIndex};
use crate::foundation::error::MorphResult;
use crate::geometry::anchors::{
    AnchorSet, Thresholds, document_center_y, fit_scale, icon_origin, slot_center,
};

/// Scroll-synchronized icon transport and morph controller.
///
/// Constructed once per page with its capabilities; all mutable state of an enabled period
/// lives in a session that is created by [`MorphController::enable`] and dropped by
/// [`MorphController::disable`]. Every host notification goes through
/// [`MorphController::handle`], which never fails: errors are logged and the icon stays at
/// its last valid position and frame.
pub struct MorphController<E, L, S> {
    cfg: MorphConfig,
    env: E,
    loader: L,
    surface: S,
    session: Option<Session>,
}

struct Session {
    asset: Box<dyn AnimationAsset>,
    frames: FrameMap,
    anchors: AnchorSet,
    mapper: ScrollMapper,
    transport: Transport,
    sequencer: MorphSequencer,
    scroll_dirty: bool,
    frame_requested: bool,
}

struct Measurement {
    anchors: AnchorSet,
    thresholds: Option<Thresholds>,
    scale: f64,
}

impl<E, L, S> MorphController<E, L, S>
where
    E: Environment,
    L: AssetLoader,
    S: IconSurface,
{
    /// Validate `cfg` and build a disabled controller.
    pub fn new(cfg: MorphConfig, env: E, loader: L, surface: S) -> MorphResult<Self> {
        cfg.validate()?;
        Ok(Self {
            cfg,
            env,
            loader,
            surface,
            session: None,
        })
    }

    /// Evaluate the media condition once, as on mount.
    pub fn start(&mut self) {
        self.handle(Event::MediaChanged);
    }

    /// Dispatch one host notification.
    pub fn handle(&mut self, event: Event) {
        match event {
            Event::MediaChanged => {
                if self.env.matches_media(self.cfg.media) {
                    self.enable();
                } else {
                    self.disable();
                }
            }
            Event::Teardown => self.disable(),
            Event::Scroll => self.on_scroll(),
            Event::Resize | Event::OrientationChange | Event::ElementResized(_) => {
                self.remeasure();
            }
            Event::AnimationFrame { now_ms } => self.on_frame(now_ms),
            Event::MorphComplete => self.on_morph_complete(),
        }
    }

    /// Measure, load the asset, place the icon on the initial state without animating and
    /// attach listeners. No-op when already enabled or when the media condition fails.
    #[tracing::instrument(skip(self), fields(url = %self.cfg.asset_url))]
    pub fn enable(&mut self) {
        if self.session.is_some() {
            return;
        }
        if !self.env.matches_media(self.cfg.media) {
            tracing::debug!("media condition not met; staying disabled");
            return;
        }
        let Some(m) = measure(&self.cfg, &mut self.env, &AnchorSet::default()) else {
            tracing::warn!(lane = %self.cfg.lane_id, "lane element missing; staying disabled");
            return;
        };
        let mut asset = match self.loader.load(&self.cfg.asset_url) {
            Ok(asset) => asset,
            Err(err) => {
                tracing::warn!(error = %err, "animation asset failed to load; staying disabled");
                return;
            }
        };
        let frames = FrameMap::resolve(&asset.markers(), asset.bounds(), &self.cfg.state_markers);

        let reduced = self.env.prefers_reduced_motion();
        let (move_ms, segment_ms) = if reduced {
            (0.0, 0.0)
        } else {
            (self.cfg.move_ms, self.cfg.segment_ms)
        };

        let mut mapper = ScrollMapper::new(self.cfg.top_snap_px, self.cfg.default_state);
        match m.thresholds {
            Some(th) => mapper.set_thresholds(th),
            None => tracing::warn!(
                default = %self.cfg.default_state,
                "anchor geometry incomplete; starting on the default state"
            ),
        }
        let initial = mapper.map(self.env.viewport());
        mapper.reset(initial);

        self.surface.set_visible(false);
        let mut transport = Transport::new(move_ms, self.cfg.ease);
        transport.set_scale(m.scale, &mut self.surface);
        transport.snap(
            icon_origin(m.anchors.point(initial), self.cfg.size_px),
            &mut self.surface,
        );
        if let Err(err) = asset.seek_and_hold(frames.frame(initial)) {
            tracing::warn!(error = %err, "initial seek failed");
        }
        self.surface.set_visible(true);

        self.env.subscribe(Subscription::Scroll);
        self.env.subscribe(Subscription::Resize);
        self.env.subscribe(Subscription::OrientationChange);
        for id in &self.cfg.anchor_ids {
            self.env.subscribe(Subscription::ElementResize(id.clone()));
        }

        let frame_list: Vec<u64> = frames.frames().iter().map(|f| f.0).collect();
        if self.cfg.debug {
            tracing::info!(%initial, frames = ?frame_list, reduced, "enabled");
        } else {
            tracing::debug!(%initial, frames = ?frame_list, reduced, "enabled");
        }

        self.session = Some(Session {
            asset,
            frames,
            anchors: m.anchors,
            mapper,
            transport,
            sequencer: MorphSequencer::new(initial, segment_ms),
            scroll_dirty: false,
            frame_requested: false,
        });
    }

    /// Detach listeners, cancel any tween or morph and release the asset. Idempotent.
    pub fn disable(&mut self) {
        let Some(mut session) = self.session.take() else {
            return;
        };
        self.env.unsubscribe_all();
        session.transport.cancel();
        session.asset.dispose();
        self.surface.set_visible(false);
        tracing::debug!("disabled");
    }

    fn on_scroll(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        session.scroll_dirty = true;
        if !session.frame_requested {
            session.frame_requested = true;
            self.env.request_animation_frame();
        }
    }

    fn on_frame(&mut self, now_ms: f64) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        session.frame_requested = false;

        if std::mem::take(&mut session.scroll_dirty)
            && let Some(change) = session.mapper.update(self.env.viewport())
        {
            let via = match self.cfg.route {
                Route::Direct => Vec::new(),
                Route::ThroughSlots => {
                    let route = session.anchors.route(change.from, change.to);
                    route[1..route.len() - 1]
                        .iter()
                        .map(|p| icon_origin(*p, self.cfg.size_px))
                        .collect()
                }
            };
            let dest = icon_origin(session.anchors.point(change.to), self.cfg.size_px);
            session
                .transport
                .move_to(&via, dest, false, now_ms, &mut self.surface);
            let events = session.sequencer.morph_to(
                change.from,
                change.to,
                &session.frames,
                session.asset.as_mut(),
            );
            log_transition(self.cfg.debug, change, &events);
        }

        let status = session.transport.tick(now_ms, &mut self.surface);
        if status == TransportStatus::Moving && !session.frame_requested {
            session.frame_requested = true;
            self.env.request_animation_frame();
        }
    }

    fn on_morph_complete(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let events = session
            .sequencer
            .on_complete(&session.frames, session.asset.as_mut());
        if self.cfg.debug {
            tracing::info!(?events, "morph complete");
        } else {
            tracing::debug!(?events, "morph complete");
        }
    }

    /// Re-measure geometry and re-snap the icon to the active state. Never morphs.
    fn remeasure(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let Some(m) = measure(&self.cfg, &mut self.env, &session.anchors) else {
            tracing::warn!(lane = %self.cfg.lane_id, "lane element missing; keeping last layout");
            return;
        };
        session.anchors = m.anchors;
        if let Some(th) = m.thresholds {
            session.mapper.set_thresholds(th);
        }
        session.transport.set_scale(m.scale, &mut self.surface);
        let dest = icon_origin(
            session.anchors.point(session.mapper.active()),
            self.cfg.size_px,
        );
        session.transport.snap(dest, &mut self.surface);
    }

    /// Return `true` while a session is active.
    pub fn is_enabled(&self) -> bool {
        self.session.is_some()
    }

    /// State the scroll position currently selects.
    pub fn active_state(&self) -> Option<StateIndex> {
        self.session.as_ref().map(|s| s.mapper.active())
    }

    /// State the animation asset last settled on.
    pub fn displayed_state(&self) -> Option<StateIndex> {
        self.session.as_ref().map(|s| s.sequencer.current())
    }

    /// Occupancy of the morph slot.
    pub fn morph_phase(&self) -> Option<MorphPhase> {
        self.session.as_ref().map(|s| s.sequencer.phase())
    }

    /// Resolved per-state frames of the loaded asset.
    pub fn frame_map(&self) -> Option<&FrameMap> {
        self.session.as_ref().map(|s| &s.frames)
    }

    /// Lane-space anchor points from the last measurement.
    pub fn anchors(&self) -> Option<&AnchorSet> {
        self.session.as_ref().map(|s| &s.anchors)
    }

    /// Scroll cut points from the last measurement.
    pub fn thresholds(&self) -> Option<&Thresholds> {
        self.session.as_ref().and_then(|s| s.mapper.thresholds())
    }

    /// Icon position last written to the surface.
    pub fn position(&self) -> Option<Point> {
        self.session.as_ref().and_then(|s| s.transport.position())
    }

    /// Static configuration.
    pub fn config(&self) -> &MorphConfig {
        &self.cfg
    }

    /// Borrow the environment.
    pub fn env(&self) -> &E {
        &self.env
    }

    /// Mutably borrow the environment (hosts and tests update layout through this).
    pub fn env_mut(&mut self) -> &mut E {
        &mut self.env
    }

    /// Borrow the asset loader.
    pub fn loader(&self) -> &L {
        &self.loader
    }

    /// Borrow the icon surface.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutably borrow the icon surface.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }
}

impl<E, L, S> Drop for MorphController<E, L, S> {
    fn drop(&mut self) {
        if let Some(mut session) = self.session.take() {
            session.asset.dispose();
        }
    }
}

fn log_transition(debug: bool, change: StateChange, events: &[MorphEvent]) {
    if debug {
        tracing::info!(from = %change.from, to = %change.to, ?events, "state change");
    } else {
        tracing::debug!(from = %change.from, to = %change.to, ?events, "state change");
    }
}

/// One synchronous measurement pass. `None` when the lane cannot be resolved.
fn measure<E: Environment>(
    cfg: &MorphConfig,
    env: &mut E,
    previous: &AnchorSet,
) -> Option<Measurement> {
    if let Some(min_px) = cfg.min_slot_height_px {
        for (anchor, slot) in cfg.anchor_ids.iter().zip(&cfg.slot_ids) {
            if let Some(r) = env.element_rect(anchor) {
                env.set_element_height(slot, r.height().round().max(min_px));
            }
        }
    }

    let lane = env.element_rect(&cfg.lane_id)?;
    let scale = fit_scale(lane, cfg.size_px, cfg.scale);

    let points = std::array::from_fn(|i| match env.element_rect(&cfg.slot_ids[i]) {
        Some(slot) => slot_center(lane, slot, cfg.offsets[i]),
        None => {
            tracing::warn!(slot = %cfg.slot_ids[i], "slot element missing; keeping last anchor");
            previous.point(StateIndex::ALL[i])
        }
    });

    let scroll_y = env.viewport().scroll_y;
    let mut centers = [0.0; crate::foundation::core::STATE_COUNT];
    let mut complete = true;
    for (c, id) in centers.iter_mut().zip(&cfg.anchor_ids) {
        match env.element_rect(id) {
            Some(r) => *c = document_center_y(r, scroll_y),
            None => complete = false,
        }
    }
    let thresholds = complete.then(|| Thresholds::from_centers(&centers));
    if !complete {
        tracing::warn!("anchor element missing; keeping last scroll thresholds");
    }

    tracing::debug!(?points, ?thresholds, scale, "measured");
    Some(Measurement {
        anchors: AnchorSet::new(points),
        thresholds,
        scale,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/controller/lifecycle.rs"]
mod tests;
