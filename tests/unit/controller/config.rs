use super::*;

const MINIMAL: &str = r##"{
    "assetUrl": "/lottie/morph.json",
    "stateMarkers": ["human", "heart", "dev"],
    "anchorIds": ["#bg-0", "#bg-1", "#bg-2"],
    "slotIds": ["#slot-0", "#slot-1", "#slot-2"],
    "laneId": "#lane"
}"##;

#[test]
fn minimal_json_gets_component_defaults() {
    let cfg = MorphConfig::from_json_str(MINIMAL).unwrap();
    assert_eq!(cfg.size_px, 1080.0);
    assert_eq!(cfg.media, MediaCondition::MinWidth(1280.0));
    assert_eq!(cfg.scale, ScaleBounds::default());
    assert_eq!(cfg.move_ms, 200.0);
    assert_eq!(cfg.segment_ms, 500.0);
    assert_eq!(cfg.ease, Ease::InOutCubic);
    assert_eq!(cfg.route, Route::Direct);
    assert_eq!(cfg.min_slot_height_px, Some(200.0));
    assert_eq!(cfg.top_snap_px, None);
    assert_eq!(cfg.default_state.get(), 0);
    assert!(!cfg.debug);
    assert_eq!(cfg.lane_id.as_str(), "#lane");
}

#[test]
fn tuning_fields_parse() {
    let json = MINIMAL.replace(
        "\"laneId\": \"#lane\"",
        r##""laneId": "#lane",
        "offsets": [{"x": 0, "y": 0}, {"x": -40, "y": 12}, {"x": 0, "y": 0}],
        "ease": "sine.inOut",
        "route": "throughSlots",
        "minSlotHeightPx": null,
        "topSnapPx": 24,
        "defaultState": 1,
        "media": "always",
        "debug": true"##,
    );
    let cfg = MorphConfig::from_json_str(&json).unwrap();
    assert_eq!(cfg.offsets[1], Vec2::new(-40.0, 12.0));
    assert_eq!(cfg.ease, Ease::InOutSine);
    assert_eq!(cfg.route, Route::ThroughSlots);
    assert_eq!(cfg.min_slot_height_px, None);
    assert_eq!(cfg.top_snap_px, Some(24.0));
    assert_eq!(cfg.default_state.get(), 1);
    assert_eq!(cfg.media, MediaCondition::Always);
    assert!(cfg.debug);
}

#[test]
fn unknown_fields_are_rejected() {
    let json = MINIMAL.replace("\"laneId\"", "\"bogus\": 1, \"laneId\"");
    assert!(matches!(
        MorphConfig::from_json_str(&json),
        Err(MorphError::Serde(_))
    ));
}

#[test]
fn validation_catches_bad_values() {
    let base = MorphConfig::from_json_str(MINIMAL).unwrap();

    let mut c = base.clone();
    c.size_px = 0.0;
    assert!(c.validate().is_err());

    let mut c = base.clone();
    c.scale.min = 3.0;
    assert!(c.validate().is_err());

    let mut c = base.clone();
    c.segment_ms = -1.0;
    assert!(c.validate().is_err());

    let mut c = base.clone();
    c.slot_ids[2] = ElementId::new(" ");
    assert!(c.validate().is_err());

    let mut c = base.clone();
    c.state_markers[0] = String::new();
    assert!(c.validate().is_err());

    let mut c = base;
    c.top_snap_px = Some(f64::INFINITY);
    assert!(c.validate().is_err());
}

#[test]
fn out_of_range_default_state_fails_to_parse() {
    let json = MINIMAL.replace("\"laneId\"", "\"defaultState\": 3, \"laneId\"");
    assert!(MorphConfig::from_json_str(&json).is_err());
}

#[test]
fn reader_and_constructor_agree() {
    let from_reader = MorphConfig::from_json_reader(MINIMAL.as_bytes()).unwrap();
    let built = MorphConfig::new(
        "/lottie/morph.json",
        ["human".to_owned(), "heart".to_owned(), "dev".to_owned()],
        [
            ElementId::new("#bg-0"),
            ElementId::new("#bg-1"),
            ElementId::new("#bg-2"),
        ],
        [
            ElementId::new("#slot-0"),
            ElementId::new("#slot-1"),
            ElementId::new("#slot-2"),
        ],
        ElementId::new("#lane"),
    );
    assert_eq!(from_reader, built);
}
