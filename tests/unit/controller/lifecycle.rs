use super::*;
use crate::asset::player::HeadlessLoader;
use crate::controller::env::{ElementId, Viewport};
use crate::controller::memory::{MemoryEnvironment, RecordingSurface, SurfaceOp};
use crate::foundation::core::{FrameIndex, Rect};

const DOC: &str = r#"{"fr":30,"ip":0,"op":61,"w":64,"h":64,"markers":[]}"#;

fn ids(prefix: &str) -> [ElementId; 3] {
    std::array::from_fn(|i| ElementId::new(format!("#{prefix}-{i}")))
}

fn cfg() -> MorphConfig {
    let mut cfg = MorphConfig::new(
        "a.json",
        ["a".to_owned(), "b".to_owned(), "c".to_owned()],
        ids("bg"),
        ids("slot"),
        ElementId::new("#lane"),
    );
    cfg.size_px = 64.0;
    cfg
}

fn env() -> MemoryEnvironment {
    let mut env = MemoryEnvironment::new(Viewport {
        width: 1600.0,
        inner_height: 600.0,
        scroll_y: 0.0,
        scroll_height: 3000.0,
    });
    env.set_rect("#lane", Rect::new(1000.0, 0.0, 1400.0, 3000.0));
    for (i, top) in [100.0, 900.0, 1700.0].into_iter().enumerate() {
        env.set_rect(
            format!("#bg-{i}").as_str(),
            Rect::new(0.0, top, 900.0, top + 150.0),
        );
        env.set_rect(
            format!("#slot-{i}").as_str(),
            Rect::new(1100.0, top, 1300.0, top + 20.0),
        );
    }
    env
}

#[test]
fn measure_syncs_slot_heights_with_floor() {
    let cfg = cfg();
    let mut env = env();
    let m = measure(&cfg, &mut env, &AnchorSet::default()).unwrap();

    // Cards are 150px tall; the floor wins.
    let slot = env.document_rect(&ElementId::new("#slot-0")).unwrap();
    assert_eq!(slot.height(), 200.0);
    assert_eq!(m.anchors.point(StateIndex::ALL[0]), Point::new(200.0, 200.0));
    assert_eq!(m.anchors.point(StateIndex::ALL[2]), Point::new(200.0, 1800.0));
}

#[test]
fn measure_without_height_floor_leaves_slots_alone() {
    let mut cfg = cfg();
    cfg.min_slot_height_px = None;
    let mut env = env();
    let _ = measure(&cfg, &mut env, &AnchorSet::default()).unwrap();
    let slot = env.document_rect(&ElementId::new("#slot-1")).unwrap();
    assert_eq!(slot.height(), 20.0);
}

#[test]
fn measure_thresholds_are_scroll_invariant() {
    let cfg = cfg();
    let mut top = env();
    let mut scrolled = env();
    scrolled.scroll_to(750.0);

    let a = measure(&cfg, &mut top, &AnchorSet::default()).unwrap();
    let b = measure(&cfg, &mut scrolled, &AnchorSet::default()).unwrap();
    assert_eq!(a.thresholds, b.thresholds);
    assert_eq!(a.anchors, b.anchors);
    assert_eq!(a.thresholds.unwrap().cuts(), &[575.0, 1375.0]);
}

#[test]
fn measure_requires_lane() {
    let cfg = cfg();
    let mut env = env();
    env.remove(&ElementId::new("#lane"));
    assert!(measure(&cfg, &mut env, &AnchorSet::default()).is_none());
}

#[test]
fn measure_missing_anchor_drops_thresholds_only() {
    let cfg = cfg();
    let mut env = env();
    env.remove(&ElementId::new("#bg-1"));
    let m = measure(&cfg, &mut env, &AnchorSet::default()).unwrap();
    assert!(m.thresholds.is_none());
    assert_eq!(m.scale, 2.1);
}

#[test]
fn measure_missing_slot_reuses_previous_point() {
    let cfg = cfg();
    let mut env = env();
    let previous = AnchorSet::new([
        Point::new(1.0, 1.0),
        Point::new(2.0, 2.0),
        Point::new(3.0, 3.0),
    ]);
    env.remove(&ElementId::new("#slot-2"));
    let m = measure(&cfg, &mut env, &previous).unwrap();
    assert_eq!(m.anchors.point(StateIndex::ALL[2]), Point::new(3.0, 3.0));
    assert_ne!(m.anchors.point(StateIndex::ALL[0]), Point::new(1.0, 1.0));
}

#[test]
fn new_rejects_invalid_config() {
    let mut bad = cfg();
    bad.size_px = 0.0;
    let res = MorphController::new(
        bad,
        env(),
        HeadlessLoader::in_memory(),
        RecordingSurface::new(),
    );
    assert!(res.is_err());
}

#[test]
fn enable_hides_icon_until_first_frame_is_shown() {
    let loader = HeadlessLoader::in_memory().with_document("a.json", DOC);
    let mut ctl = MorphController::new(cfg(), env(), loader, RecordingSurface::new()).unwrap();
    ctl.enable();
    ctl.enable();

    let ops = ctl.surface().ops();
    assert_eq!(ops.first(), Some(&SurfaceOp::Visible { visible: false }));
    assert_eq!(ops.last(), Some(&SurfaceOp::Visible { visible: true }));
    assert_eq!(ctl.loader().load_count(), 1);
    // No markers: evenly spaced frames across [0, 60].
    assert_eq!(
        ctl.frame_map().unwrap().frames(),
        &[FrameIndex(0), FrameIndex(30), FrameIndex(60)]
    );
}

#[test]
fn dropping_the_controller_disposes_the_asset() {
    let loader = HeadlessLoader::in_memory().with_document("a.json", DOC);
    let mut ctl = MorphController::new(cfg(), env(), loader, RecordingSurface::new()).unwrap();
    ctl.start();
    let player = ctl.loader().current().unwrap();
    drop(ctl);
    assert!(player.is_disposed());
}
