use super::*;

fn straight() -> Tween {
    Tween::new(
        vec![Point::new(0.0, 0.0), Point::new(100.0, 0.0)],
        1000.0,
        200.0,
        Ease::Linear,
    )
}

#[test]
fn samples_endpoints_and_midpoint() {
    let tw = straight();
    assert_eq!(tw.sample(1000.0).pos, Point::new(0.0, 0.0));
    assert_eq!(tw.sample(1100.0).pos, Point::new(50.0, 0.0));
    assert_eq!(tw.sample(1200.0).pos, Point::new(100.0, 0.0));
}

#[test]
fn clamps_before_start_and_after_end() {
    let tw = straight();
    assert_eq!(tw.sample(0.0).pos, Point::new(0.0, 0.0));
    assert_eq!(tw.sample(5000.0).pos, Point::new(100.0, 0.0));
    assert!(!tw.is_done(1199.0));
    assert!(tw.is_done(1200.0));
}

#[test]
fn zero_duration_is_done_immediately() {
    let tw = Tween::new(
        vec![Point::new(0.0, 0.0), Point::new(10.0, 10.0)],
        50.0,
        0.0,
        Ease::InOutCubic,
    );
    assert!(tw.is_done(50.0));
    assert_eq!(tw.sample(50.0).pos, Point::new(10.0, 10.0));
}

#[test]
fn eased_progress_is_applied_along_path() {
    let tw = Tween::new(
        vec![Point::new(0.0, 0.0), Point::new(100.0, 0.0)],
        0.0,
        100.0,
        Ease::InQuad,
    );
    assert_eq!(tw.sample(50.0).pos, Point::new(25.0, 0.0));
}
