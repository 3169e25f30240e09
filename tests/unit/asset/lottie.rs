use super::*;

#[test]
fn parses_timeline_header_and_ignores_layers() {
    let doc = LottieDoc::from_json_str(
        r#"{
            "v": "5.7.4", "fr": 60, "ip": 0, "op": 181, "w": 1080, "h": 1080,
            "layers": [{"ty": 4, "nm": "shape"}],
            "markers": [
                {"cm": "human", "tm": 0, "dr": 0},
                {"cm": "heart", "tm": 89.6, "dr": 0},
                {"cm": "dev", "tm": 180, "dr": 0}
            ]
        }"#,
    )
    .unwrap();
    assert_eq!(doc.fps().unwrap().as_f64(), 60.0);
    assert_eq!(doc.bounds().end, FrameIndex(180));
    assert_eq!((doc.w, doc.h), (1080.0, 1080.0));
    let markers = doc.markers();
    assert_eq!(markers.len(), 3);
    assert_eq!(markers[1].name, "heart");
    assert_eq!(markers[1].frame, FrameIndex(90));
}

#[test]
fn missing_fields_fall_back_to_defaults() {
    let doc = LottieDoc::from_json_str("{}").unwrap();
    assert_eq!(doc.bounds().start, FrameIndex(0));
    assert_eq!(doc.bounds().end, FrameIndex(1));
    assert!(doc.markers().is_empty());
    assert_eq!(doc.fps().unwrap().as_f64(), 30.0);
}

#[test]
fn malformed_json_is_a_serde_error() {
    let err = LottieDoc::from_json_str("{\"ip\": \"zero\"}").unwrap_err();
    assert!(err.to_string().contains("serialization error:"));
}

#[test]
fn zero_frame_rate_is_rejected() {
    let doc = LottieDoc::from_json_str("{\"fr\": 0}").unwrap();
    assert!(doc.fps().is_err());
}
