use std::cell::RefCell;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::rc::Rc;

use anyhow::Context as _;

use crate::asset::lottie::LottieDoc;
use crate::foundation::core::{FrameBounds, FrameIndex, Fps, Marker};
use crate::foundation::error::{MorphError, MorphResult};

/// Playback direction across a frame range.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum PlayDirection {
    /// Increasing frame numbers.
    Forward,
    /// Decreasing frame numbers.
    Reverse,
}

impl PlayDirection {
    /// Direction that travels from `start` to `end`.
    pub fn between(start: FrameIndex, end: FrameIndex) -> Self {
        if end < start {
            Self::Reverse
        } else {
            Self::Forward
        }
    }

    /// `1` for forward, `-1` for reverse.
    pub fn signum(self) -> i8 {
        match self {
            Self::Forward => 1,
            Self::Reverse => -1,
        }
    }
}

/// A single "play exactly these frames" command.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PlayRange {
    /// Frame playback starts on.
    pub start: FrameIndex,
    /// Frame playback stops (and completes) on.
    pub end: FrameIndex,
    /// Travel direction, consistent with `start` and `end`.
    pub direction: PlayDirection,
    /// Playback rate multiplier (`1.0` = the asset's native frame rate).
    pub speed: f64,
}

/// Loaded multi-keyframe vector animation, as consumed by the morph sequencer.
///
/// Completion contract: every accepted [`AnimationAsset::play_range`] that reaches its end
/// frame must be reported to the controller exactly once, as
/// [`Event::MorphComplete`](crate::Event::MorphComplete). A later `play_range`,
/// `seek_and_hold` or `dispose` supersedes a range that has not completed yet.
pub trait AnimationAsset {
    /// Named markers authored in the asset.
    fn markers(&self) -> Vec<Marker>;
    /// Seekable frame bounds.
    fn bounds(&self) -> FrameBounds;
    /// Native frame rate.
    fn frame_rate(&self) -> Fps;
    /// Jump to `frame` and stop there.
    fn seek_and_hold(&mut self, frame: FrameIndex) -> MorphResult<()>;
    /// Play exactly `range`.
    fn play_range(&mut self, range: PlayRange) -> MorphResult<()>;
    /// Release the asset; further commands fail.
    fn dispose(&mut self);
}

/// Capability that turns an asset URL into a playable handle.
pub trait AssetLoader {
    /// Load the animation at `url`.
    fn load(&mut self, url: &str) -> MorphResult<Box<dyn AnimationAsset>>;
}

/// Command accepted by a [`HeadlessPlayer`], recorded in order.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "cmd", rename_all = "camelCase")]
pub enum AssetCommand {
    /// `seek_and_hold(frame)`.
    Seek {
        /// Target frame.
        frame: FrameIndex,
    },
    /// `play_range(range)`.
    Play {
        /// Requested range.
        range: PlayRange,
    },
    /// `dispose()`.
    Dispose,
}

/// Clock-driven software player for a Lottie timeline.
///
/// It renders nothing; it tracks the current frame so hosts without a real renderer (tests,
/// the simulation binary) can drive the controller.
#[derive(Clone, Debug)]
pub struct HeadlessPlayer {
    bounds: FrameBounds,
    fps: Fps,
    markers: Vec<Marker>,
    frame: f64,
    active: Option<PlayRange>,
    disposed: bool,
    log: Vec<AssetCommand>,
}

impl HeadlessPlayer {
    /// Create a player positioned on `bounds.start`.
    pub fn new(bounds: FrameBounds, fps: Fps, markers: Vec<Marker>) -> Self {
        Self {
            bounds,
            fps,
            markers,
            frame: bounds.start.0 as f64,
            active: None,
            disposed: false,
            log: Vec::new(),
        }
    }

    /// Create a player for a parsed Lottie document.
    pub fn from_doc(doc: &LottieDoc) -> MorphResult<Self> {
        Ok(Self::new(doc.bounds(), doc.fps()?, doc.markers()))
    }

    /// Current frame, rounded.
    pub fn current_frame(&self) -> FrameIndex {
        FrameIndex::from_f64_round(self.frame)
    }

    /// Range being played, if any.
    pub fn active_range(&self) -> Option<PlayRange> {
        self.active
    }

    /// Return `true` after [`AnimationAsset::dispose`].
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Every accepted command, oldest first.
    pub fn commands(&self) -> &[AssetCommand] {
        &self.log
    }

    /// Advance playback by `dt_ms` of wall-clock time.
    ///
    /// Returns `true` exactly once per range, on the call that reaches its end frame.
    pub fn advance(&mut self, dt_ms: f64) -> bool {
        let Some(range) = self.active else {
            return false;
        };
        let step = dt_ms.max(0.0) / 1000.0 * self.fps.as_f64() * range.speed;
        let end = range.end.0 as f64;
        self.frame += step * f64::from(range.direction.signum());

        let reached = match range.direction {
            PlayDirection::Forward => self.frame >= end,
            PlayDirection::Reverse => self.frame <= end,
        };
        if reached {
            self.frame = end;
            self.active = None;
        }
        reached
    }

    fn ensure_live(&self) -> MorphResult<()> {
        if self.disposed {
            return Err(MorphError::playback("asset has been disposed"));
        }
        Ok(())
    }

    fn ensure_in_bounds(&self, frame: FrameIndex) -> MorphResult<()> {
        if !self.bounds.contains(frame) {
            return Err(MorphError::playback(format!(
                "frame {} outside [{}, {}]",
                frame.0, self.bounds.start.0, self.bounds.end.0
            )));
        }
        Ok(())
    }
}

impl AnimationAsset for HeadlessPlayer {
    fn markers(&self) -> Vec<Marker> {
        self.markers.clone()
    }

    fn bounds(&self) -> FrameBounds {
        self.bounds
    }

    fn frame_rate(&self) -> Fps {
        self.fps
    }

    fn seek_and_hold(&mut self, frame: FrameIndex) -> MorphResult<()> {
        self.ensure_live()?;
        self.ensure_in_bounds(frame)?;
        self.frame = frame.0 as f64;
        self.active = None;
        self.log.push(AssetCommand::Seek { frame });
        Ok(())
    }

    fn play_range(&mut self, range: PlayRange) -> MorphResult<()> {
        self.ensure_live()?;
        self.ensure_in_bounds(range.start)?;
        self.ensure_in_bounds(range.end)?;
        if !range.speed.is_finite() || range.speed <= 0.0 {
            return Err(MorphError::playback("play speed must be finite and > 0"));
        }
        if PlayDirection::between(range.start, range.end) != range.direction {
            return Err(MorphError::playback("play direction disagrees with range"));
        }
        self.frame = range.start.0 as f64;
        self.active = Some(range);
        self.log.push(AssetCommand::Play { range });
        Ok(())
    }

    fn dispose(&mut self) {
        if !self.disposed {
            self.disposed = true;
            self.active = None;
            self.log.push(AssetCommand::Dispose);
        }
    }
}

/// Shared handle to a [`HeadlessPlayer`].
///
/// The controller owns one clone as its asset; the host keeps another to advance the clock
/// and forward completions.
#[derive(Clone, Debug)]
pub struct SharedPlayer(Rc<RefCell<HeadlessPlayer>>);

impl SharedPlayer {
    /// Wrap a player.
    pub fn new(player: HeadlessPlayer) -> Self {
        Self(Rc::new(RefCell::new(player)))
    }

    /// Advance the wrapped player; see [`HeadlessPlayer::advance`].
    pub fn advance(&self, dt_ms: f64) -> bool {
        self.0.borrow_mut().advance(dt_ms)
    }

    /// Current frame of the wrapped player.
    pub fn current_frame(&self) -> FrameIndex {
        self.0.borrow().current_frame()
    }

    /// Return `true` once the wrapped player was disposed.
    pub fn is_disposed(&self) -> bool {
        self.0.borrow().is_disposed()
    }

    /// Copy of the wrapped player's command log.
    pub fn commands(&self) -> Vec<AssetCommand> {
        self.0.borrow().commands().to_vec()
    }
}

impl AnimationAsset for SharedPlayer {
    fn markers(&self) -> Vec<Marker> {
        self.0.borrow().markers()
    }

    fn bounds(&self) -> FrameBounds {
        self.0.borrow().bounds()
    }

    fn frame_rate(&self) -> Fps {
        self.0.borrow().frame_rate()
    }

    fn seek_and_hold(&mut self, frame: FrameIndex) -> MorphResult<()> {
        self.0.borrow_mut().seek_and_hold(frame)
    }

    fn play_range(&mut self, range: PlayRange) -> MorphResult<()> {
        self.0.borrow_mut().play_range(range)
    }

    fn dispose(&mut self) {
        self.0.borrow_mut().dispose();
    }
}

#[derive(Clone, Debug)]
enum AssetSource {
    Dir(PathBuf),
    Memory(BTreeMap<String, String>),
}

/// Loader producing [`SharedPlayer`] assets from Lottie JSON.
///
/// URLs resolve either against a directory on disk (a leading `/` is ignored) or against
/// an in-memory table of documents.
#[derive(Clone, Debug)]
pub struct HeadlessLoader {
    source: AssetSource,
    current: Option<SharedPlayer>,
    loads: usize,
}

impl HeadlessLoader {
    /// Resolve URLs as paths under `root`.
    pub fn from_dir(root: impl Into<PathBuf>) -> Self {
        Self {
            source: AssetSource::Dir(root.into()),
            current: None,
            loads: 0,
        }
    }

    /// Resolve URLs from an in-memory table (see [`HeadlessLoader::with_document`]).
    pub fn in_memory() -> Self {
        Self {
            source: AssetSource::Memory(BTreeMap::new()),
            current: None,
            loads: 0,
        }
    }

    /// Register JSON text for `url` on an in-memory loader; ignored for directory loaders.
    pub fn with_document(mut self, url: impl Into<String>, json: impl Into<String>) -> Self {
        if let AssetSource::Memory(docs) = &mut self.source {
            let _ = docs.insert(url.into(), json.into());
        }
        self
    }

    /// Handle to the most recently loaded player.
    pub fn current(&self) -> Option<SharedPlayer> {
        self.current.clone()
    }

    /// Number of successful loads so far.
    pub fn load_count(&self) -> usize {
        self.loads
    }

    fn read(&self, url: &str) -> MorphResult<String> {
        match &self.source {
            AssetSource::Dir(root) => {
                let path = root.join(url.trim_start_matches('/'));
                let text = std::fs::read_to_string(&path)
                    .with_context(|| format!("read animation asset '{}'", path.display()))?;
                Ok(text)
            }
            AssetSource::Memory(docs) => docs
                .get(url)
                .cloned()
                .ok_or_else(|| MorphError::asset(format!("no document registered for '{url}'"))),
        }
    }
}

impl AssetLoader for HeadlessLoader {
    #[tracing::instrument(skip(self))]
    fn load(&mut self, url: &str) -> MorphResult<Box<dyn AnimationAsset>> {
        let doc = LottieDoc::from_json_str(&self.read(url)?)?;
        let player = SharedPlayer::new(HeadlessPlayer::from_doc(&doc)?);
        self.current = Some(player.clone());
        self.loads += 1;
        tracing::debug!(
            ip = doc.ip,
            op = doc.op,
            fr = doc.fr,
            w = doc.w,
            h = doc.h,
            markers = doc.markers.len(),
            "animation asset loaded"
        );
        Ok(Box::new(player))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/asset/player.rs"]
mod tests;
