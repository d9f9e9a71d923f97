use super::*;

const ALL: &[Ease] = &[
    Ease::Linear,
    Ease::Step,
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
    Ease::InExpo,
    Ease::OutExpo,
    Ease::InOutExpo,
    Ease::InCirc,
    Ease::OutCirc,
    Ease::InOutCirc,
    Ease::InBack,
    Ease::OutBack,
    Ease::InOutBack,
    Ease::InElastic,
    Ease::OutElastic,
    Ease::InOutElastic,
    Ease::InBounce,
    Ease::OutBounce,
    Ease::InOutBounce,
];

#[test]
fn every_ease_is_exact_at_the_boundaries() {
    for &ease in ALL {
        assert!(ease.apply(0.0).abs() < 1e-9, "{ease:?} at 0");
        assert!((ease.apply(1.0) - 1.0).abs() < 1e-9, "{ease:?} at 1");
    }
}

#[test]
fn inputs_clamp_to_the_unit_interval() {
    for &ease in ALL {
        assert_eq!(ease.apply(-0.5), ease.apply(0.0), "{ease:?} below 0");
        assert_eq!(ease.apply(1.5), ease.apply(1.0), "{ease:?} above 1");
    }
}

#[test]
fn quad_family_spot_values() {
    assert!((Ease::InQuad.apply(0.5) - 0.25).abs() < 1e-9);
    assert!((Ease::OutQuad.apply(0.5) - 0.75).abs() < 1e-9);
    assert!((Ease::InOutQuad.apply(0.5) - 0.5).abs() < 1e-9);
    assert!((Ease::InOutCubic.apply(0.5) - 0.5).abs() < 1e-9);
}

#[test]
fn step_jumps_at_the_midpoint() {
    assert_eq!(Ease::Step.apply(0.499), 0.0);
    assert_eq!(Ease::Step.apply(0.5), 1.0);
}

#[test]
fn back_overshoots_outside_the_unit_range() {
    assert!(Ease::InBack.apply(0.3) < 0.0);
    assert!(Ease::OutBack.apply(0.7) > 1.0);
}

#[test]
fn monotone_eases_never_decrease() {
    let monotone = [
        Ease::Linear,
        Ease::InQuad,
        Ease::OutQuad,
        Ease::InOutQuad,
        Ease::InCubic,
        Ease::OutCubic,
        Ease::InOutCubic,
        Ease::InSine,
        Ease::OutSine,
        Ease::InOutSine,
        Ease::InExpo,
        Ease::OutExpo,
        Ease::InOutExpo,
        Ease::InCirc,
        Ease::OutCirc,
        Ease::InOutCirc,
    ];
    for ease in monotone {
        let mut prev = ease.apply(0.0);
        for i in 1..=100 {
            let v = ease.apply(i as f64 / 100.0);
            assert!(v >= prev - 1e-12, "{ease:?} decreased at step {i}");
            prev = v;
        }
    }
}

#[test]
fn serde_names_are_snake_case() {
    assert_eq!(
        serde_json::to_string(&Ease::InOutQuad).unwrap(),
        "\"in_out_quad\""
    );
    let back: Ease = serde_json::from_str("\"out_bounce\"").unwrap();
    assert_eq!(back, Ease::OutBounce);
}
