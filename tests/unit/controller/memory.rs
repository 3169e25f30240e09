use super::*;

fn env() -> MemoryEnvironment {
    let mut env = MemoryEnvironment::new(Viewport {
        width: 1440.0,
        inner_height: 900.0,
        scroll_y: 0.0,
        scroll_height: 4000.0,
    });
    env.set_rect("#card", Rect::new(0.0, 1000.0, 300.0, 1400.0));
    env
}

#[test]
fn rects_are_reported_in_viewport_space() {
    let mut env = env();
    let id = ElementId::new("#card");
    env.scroll_to(600.0);
    assert_eq!(env.element_rect(&id), Some(Rect::new(0.0, 400.0, 300.0, 800.0)));
    assert_eq!(env.document_rect(&id), Some(Rect::new(0.0, 1000.0, 300.0, 1400.0)));
    assert_eq!(env.element_rect(&ElementId::new("#nope")), None);
}

#[test]
fn height_changes_keep_top_edge() {
    let mut env = env();
    let id = ElementId::new("#card");
    env.set_element_height(&id, 250.0);
    assert_eq!(env.document_rect(&id), Some(Rect::new(0.0, 1000.0, 300.0, 1250.0)));
    env.set_element_height(&ElementId::new("#nope"), 10.0);
}

#[test]
fn subscriptions_and_frame_requests_reset_together() {
    let mut env = env();
    env.subscribe(Subscription::Scroll);
    env.subscribe(Subscription::Scroll);
    env.request_animation_frame();
    assert_eq!(env.subscriptions().len(), 1);
    env.unsubscribe_all();
    assert!(env.subscriptions().is_empty());
    assert!(!env.take_frame_request());
}

#[test]
fn recording_surface_tracks_latest_state() {
    let mut s = RecordingSurface::new();
    s.set_visible(true);
    s.set_transform(Point::new(1.0, 2.0), 1.5);
    assert!(s.is_visible());
    assert_eq!(s.position(), Some(Point::new(1.0, 2.0)));
    assert_eq!(s.scale(), 1.5);
    assert_eq!(s.ops().len(), 2);
    s.clear_ops();
    assert!(s.ops().is_empty());
    assert_eq!(s.position(), Some(Point::new(1.0, 2.0)));
}

#[test]
fn environment_deserializes_from_json() {
    let env: MemoryEnvironment = serde_json::from_str(
        r##"{
            "viewport": {"width": 1300, "innerHeight": 800, "scrollY": 0, "scrollHeight": 3000},
            "elements": {"#lane": {"x0": 0, "y0": 0, "x1": 600, "y1": 3000}}
        }"##,
    )
    .unwrap();
    assert!(env.matches_media(crate::controller::env::MediaCondition::MinWidth(1280.0)));
    assert!(env.element_rect(&ElementId::new("#lane")).is_some());
}
