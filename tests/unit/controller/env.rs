use super::*;

#[test]
fn media_conditions_compare_viewport_width() {
    assert!(MediaCondition::Always.matches(0.0));
    assert!(MediaCondition::MinWidth(1280.0).matches(1280.0));
    assert!(!MediaCondition::MinWidth(1280.0).matches(1279.0));
    assert!(MediaCondition::MaxWidth(600.0).matches(600.0));
    assert!(!MediaCondition::MaxWidth(600.0).matches(601.0));
}

#[test]
fn media_condition_json_shape() {
    let c: MediaCondition = serde_json::from_str(r#"{"minWidth": 1024}"#).unwrap();
    assert_eq!(c, MediaCondition::MinWidth(1024.0));
    let a: MediaCondition = serde_json::from_str(r#""always""#).unwrap();
    assert_eq!(a, MediaCondition::Always);
    assert!(MediaCondition::MinWidth(f64::NAN).validate().is_err());
}

#[test]
fn events_deserialize_from_camel_case() {
    let e: Event = serde_json::from_str(r#"{"animationFrame": {"nowMs": 16.0}}"#).unwrap();
    assert_eq!(e, Event::AnimationFrame { now_ms: 16.0 });
    let r: Event = serde_json::from_str(r##"{"elementResized": "#card-1"}"##).unwrap();
    assert_eq!(r, Event::ElementResized(ElementId::new("#card-1")));
}

#[test]
fn element_id_displays_raw_selector() {
    assert_eq!(ElementId::from("#lane").to_string(), "#lane");
}
