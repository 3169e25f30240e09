use super::*;

fn s(i: usize) -> StateIndex {
    StateIndex::new(i).unwrap()
}

fn viewport(center: f64) -> Viewport {
    Viewport {
        width: 1440.0,
        inner_height: 200.0,
        scroll_y: center - 100.0,
        scroll_height: 10_000.0,
    }
}

fn mapper() -> ScrollMapper {
    let mut m = ScrollMapper::new(None, s(0));
    m.set_thresholds(Thresholds::from_centers(&[100.0, 400.0, 700.0]));
    m
}

#[test]
fn midpoint_buckets() {
    let m = mapper();
    assert_eq!(m.map(viewport(200.0)), s(0));
    assert_eq!(m.map(viewport(300.0)), s(1));
    assert_eq!(m.map(viewport(549.0)), s(1));
    assert_eq!(m.map(viewport(550.0)), s(2));
    assert_eq!(m.map(viewport(5000.0)), s(2));
}

#[test]
fn update_reports_changes_only() {
    let mut m = mapper();
    assert_eq!(m.update(viewport(120.0)), None);
    assert_eq!(
        m.update(viewport(800.0)),
        Some(StateChange { from: s(0), to: s(2) })
    );
    assert_eq!(m.update(viewport(900.0)), None);
    assert_eq!(m.active(), s(2));
}

#[test]
fn top_snap_forces_default_state() {
    let mut m = ScrollMapper::new(Some(40.0), s(1));
    m.set_thresholds(Thresholds::from_centers(&[100.0, 400.0, 700.0]));
    let near_top = Viewport {
        width: 1440.0,
        inner_height: 2000.0,
        scroll_y: 30.0,
        scroll_height: 10_000.0,
    };
    assert_eq!(m.map(near_top), s(1));
    let below = Viewport {
        scroll_y: 41.0,
        ..near_top
    };
    assert_eq!(m.map(below), s(2));
}

#[test]
fn viewport_center_is_clamped_to_document() {
    let short = Viewport {
        width: 1000.0,
        inner_height: 800.0,
        scroll_y: 0.0,
        scroll_height: 300.0,
    };
    assert_eq!(short.center_y(), 299.0);
    let negative = Viewport {
        scroll_y: -900.0,
        ..short
    };
    assert_eq!(negative.center_y(), 1.0);
}

#[test]
fn without_thresholds_the_default_state_holds() {
    let mut m = ScrollMapper::new(None, s(1));
    assert!(m.thresholds().is_none());
    assert_eq!(m.map(viewport(5000.0)), s(1));
    assert_eq!(m.update(viewport(20.0)), None);
    assert_eq!(m.active(), s(1));
}
