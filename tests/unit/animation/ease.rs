use super::*;

const ALL: [Ease; 16] = [
    Ease::Linear,
    Ease::InQuad,
    Ease::OutQuad,
    Ease::InOutQuad,
    Ease::InCubic,
    Ease::OutCubic,
    Ease::InOutCubic,
    Ease::InQuart,
    Ease::OutQuart,
    Ease::InOutQuart,
    Ease::InQuint,
    Ease::OutQuint,
    Ease::InOutQuint,
    Ease::InSine,
    Ease::OutSine,
    Ease::InOutSine,
];

#[test]
fn endpoints_are_stable() {
    for ease in ALL {
        assert!(ease.apply(0.0).abs() < 1e-12, "{ease:?}");
        assert!((ease.apply(1.0) - 1.0).abs() < 1e-12, "{ease:?}");
    }
}

#[test]
fn monotonic_spot_check() {
    for ease in ALL {
        let a = ease.apply(0.25);
        let b = ease.apply(0.5);
        let c = ease.apply(0.75);
        assert!(a < b, "{ease:?}");
        assert!(b < c, "{ease:?}");
    }
}

#[test]
fn in_out_curves_are_symmetric_at_midpoint() {
    for ease in [
        Ease::InOutQuad,
        Ease::InOutCubic,
        Ease::InOutQuart,
        Ease::InOutQuint,
        Ease::InOutSine,
    ] {
        assert!((ease.apply(0.5) - 0.5).abs() < 1e-12, "{ease:?}");
    }
}

#[test]
fn gsap_names_parse() {
    assert_eq!("power2.inOut".parse::<Ease>().unwrap(), Ease::InOutCubic);
    assert_eq!("power1".parse::<Ease>().unwrap(), Ease::OutQuad);
    assert_eq!("none".parse::<Ease>().unwrap(), Ease::Linear);
    assert_eq!("sine.in".parse::<Ease>().unwrap(), Ease::InSine);
    assert!("bounce.out".parse::<Ease>().is_err());
    assert!("power2.sideways".parse::<Ease>().is_err());
}

#[test]
fn names_survive_serde() {
    for ease in ALL {
        let json = serde_json::to_string(&ease).unwrap();
        let back: Ease = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ease);
    }
}
