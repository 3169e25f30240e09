use super::*;

fn names() -> [String; STATE_COUNT] {
    ["human".to_owned(), "heart".to_owned(), "dev".to_owned()]
}

fn marker(name: &str, frame: u64) -> Marker {
    Marker {
        name: name.to_owned(),
        frame: FrameIndex(frame),
    }
}

#[test]
fn no_markers_resolve_to_start_mid_end() {
    let bounds = FrameBounds::from_in_out(0.0, 100.0);
    let map = FrameMap::resolve(&[], bounds, &names());
    assert_eq!(map.frames(), &[FrameIndex(0), FrameIndex(50), FrameIndex(99)]);
}

#[test]
fn exact_matches_win_and_need_not_be_sorted() {
    let bounds = FrameBounds::from_in_out(0.0, 200.0);
    let markers = [marker("dev", 10), marker("human", 150), marker("heart", 80)];
    let map = FrameMap::resolve(&markers, bounds, &names());
    assert_eq!(map.frames(), &[FrameIndex(150), FrameIndex(80), FrameIndex(10)]);
}

#[test]
fn partial_markers_mix_with_fallbacks() {
    let bounds = FrameBounds::from_in_out(10.0, 41.0);
    let markers = [marker("heart", 22), marker("unrelated", 3)];
    let map = FrameMap::resolve(&markers, bounds, &names());
    let s = |i| StateIndex::new(i).unwrap();
    assert_eq!(map.frame(s(0)), FrameIndex(10));
    assert_eq!(map.frame(s(1)), FrameIndex(22));
    assert_eq!(map.frame(s(2)), FrameIndex(40));
}

#[test]
fn duplicate_names_take_the_last_marker() {
    let bounds = FrameBounds::from_in_out(0.0, 100.0);
    let markers = [marker("heart", 20), marker("heart", 60)];
    let map = FrameMap::resolve(&markers, bounds, &names());
    assert_eq!(map.frames()[1], FrameIndex(60));
}

#[test]
fn out_of_bounds_markers_are_clamped() {
    let bounds = FrameBounds::from_in_out(5.0, 61.0);
    let markers = [
        marker("human", 1),
        marker("heart", 9_223_372_036_854_775_808),
        marker("dev", 30),
    ];
    let map = FrameMap::resolve(&markers, bounds, &names());
    assert_eq!(map.frames(), &[FrameIndex(5), FrameIndex(60), FrameIndex(30)]);
}
