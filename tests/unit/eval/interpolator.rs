use super::*;

use crate::animation::ease::Ease;
use crate::state::model::VariantId;
use crate::timeline::keystate::KeystateRecord;
use crate::timeline::resolve::resolve_timeline;

fn square_at(x: f64, size: f64) -> ContourSet {
    ContourSet::solid(VertexLoop::closed(vec![
        Point::new(x, 0.0),
        Point::new(x + size, 0.0),
        Point::new(x + size, size),
        Point::new(x, size),
    ]))
}

fn scalar_timeline(from: f64, to: f64) -> Timeline {
    let a = Snapshot::new("dot").with("x", AttrValue::Scalar(from));
    let b = Snapshot::new("dot").with("x", AttrValue::Scalar(to));
    resolve_timeline(vec![(0.0, a).into(), (1.0, b).into()]).unwrap()
}

#[test]
fn boundaries_return_the_endpoint_snapshots_verbatim() {
    let timeline = scalar_timeline(0.0, 10.0);
    let engine = Interpolator::default();
    assert_eq!(engine.state_at(&timeline, 0.0), timeline.first().snapshot);
    assert_eq!(engine.state_at(&timeline, 1.0), timeline.last().snapshot);
    // Out-of-range queries clamp to the boundaries.
    assert_eq!(engine.state_at(&timeline, -0.5), timeline.first().snapshot);
    assert_eq!(engine.state_at(&timeline, 2.0), timeline.last().snapshot);
}

#[test]
fn scalars_interpolate_linearly_by_default() {
    let timeline = scalar_timeline(0.0, 10.0);
    let engine = Interpolator::default();
    assert_eq!(engine.state_at(&timeline, 0.25).scalar("x"), Some(2.5));
    assert_eq!(engine.state_at(&timeline, 0.5).scalar("x"), Some(5.0));
}

#[test]
fn scalar_interpolation_is_monotonic_under_identity_easing() {
    let a = Snapshot::new("dot").with("x", AttrValue::Scalar(0.0));
    let b = Snapshot::new("dot").with("x", AttrValue::Scalar(3.0));
    let c = Snapshot::new("dot").with("x", AttrValue::Scalar(10.0));
    let timeline =
        resolve_timeline(vec![(0.0, a).into(), (0.3, b).into(), (1.0, c).into()]).unwrap();
    let engine = Interpolator::default();

    let mut prev = f64::NEG_INFINITY;
    for i in 0..=100 {
        let t = i as f64 / 100.0;
        let x = engine.state_at(&timeline, t).scalar("x").unwrap();
        assert!(x >= prev, "x decreased from {prev} to {x} at t={t}");
        prev = x;
    }
}

#[test]
fn angles_take_the_shortest_arc() {
    let a = Snapshot::new("dot").with("heading", AttrValue::Angle(350.0));
    let b = Snapshot::new("dot").with("heading", AttrValue::Angle(10.0));
    let timeline = resolve_timeline(vec![(0.0, a).into(), (1.0, b).into()]).unwrap();
    let engine = Interpolator::default();
    let mid = engine.state_at(&timeline, 0.5);
    let Some(AttrValue::Angle(deg)) = mid.get("heading") else {
        panic!("heading missing");
    };
    assert!(deg.rem_euclid(360.0).abs() < 1e-9, "got {deg}");
}

#[test]
fn colors_interpolate_componentwise() {
    use crate::foundation::core::Rgba8;
    let a = Snapshot::new("dot").with("fill", AttrValue::Color(Rgba8::new(0, 0, 0, 0)));
    let b = Snapshot::new("dot").with("fill", AttrValue::Color(Rgba8::new(200, 100, 50, 255)));
    let timeline = resolve_timeline(vec![(0.0, a).into(), (1.0, b).into()]).unwrap();
    let mid = Interpolator::default().state_at(&timeline, 0.5);
    assert_eq!(
        mid.get("fill"),
        Some(&AttrValue::Color(Rgba8::new(100, 50, 25, 128)))
    );
}

#[test]
fn variants_switch_at_the_midpoint_while_scalars_stay_continuous() {
    let a = Snapshot::new("circle").with("x", AttrValue::Scalar(0.0));
    let b = Snapshot::new("star").with("x", AttrValue::Scalar(10.0));
    let timeline = resolve_timeline(vec![(0.0, a).into(), (1.0, b).into()]).unwrap();
    let engine = Interpolator::default();

    let before = engine.state_at(&timeline, 0.49);
    assert_eq!(before.variant, VariantId::new("circle"));
    assert!((before.scalar("x").unwrap() - 4.9).abs() < 1e-9);

    let after = engine.state_at(&timeline, 0.5);
    assert_eq!(after.variant, VariantId::new("star"));
    assert!((after.scalar("x").unwrap() - 5.0).abs() < 1e-9);
}

#[test]
fn one_sided_attributes_follow_the_base_snapshot() {
    let a = Snapshot::new("circle")
        .with("x", AttrValue::Scalar(0.0))
        .with("only_start", AttrValue::Scalar(7.0));
    let b = Snapshot::new("circle").with("x", AttrValue::Scalar(10.0));
    let timeline = resolve_timeline(vec![(0.0, a).into(), (1.0, b).into()]).unwrap();
    let engine = Interpolator::default();

    assert_eq!(engine.state_at(&timeline, 0.25).scalar("only_start"), Some(7.0));
    assert_eq!(engine.state_at(&timeline, 0.75).scalar("only_start"), None);
}

#[test]
fn bools_and_discrete_tags_switch_at_the_midpoint() {
    let a = Snapshot::new("dot")
        .with("visible", AttrValue::Bool(false))
        .with("mode", AttrValue::Discrete("fade".to_string()));
    let b = Snapshot::new("dot")
        .with("visible", AttrValue::Bool(true))
        .with("mode", AttrValue::Discrete("pop".to_string()));
    let timeline = resolve_timeline(vec![(0.0, a).into(), (1.0, b).into()]).unwrap();
    let engine = Interpolator::default();

    let early = engine.state_at(&timeline, 0.3);
    assert_eq!(early.get("visible"), Some(&AttrValue::Bool(false)));
    assert_eq!(
        early.get("mode"),
        Some(&AttrValue::Discrete("fade".to_string()))
    );
    let late = engine.state_at(&timeline, 0.7);
    assert_eq!(late.get("visible"), Some(&AttrValue::Bool(true)));
}

#[test]
fn segment_easing_overrides_reshape_progress() {
    let a = Snapshot::new("dot").with("x", AttrValue::Scalar(0.0));
    let b = Snapshot::new("dot").with("x", AttrValue::Scalar(10.0));
    let record = KeystateRecord::new(b).at(1.0).with_easing("x", Ease::Step);
    let timeline = resolve_timeline(vec![(0.0, a).into(), record.into()]).unwrap();
    let engine = Interpolator::default();

    assert_eq!(engine.state_at(&timeline, 0.4).scalar("x"), Some(0.0));
    assert_eq!(engine.state_at(&timeline, 0.6).scalar("x"), Some(10.0));
}

#[test]
fn entity_level_easing_applies_without_segment_overrides() {
    let timeline = scalar_timeline(0.0, 10.0);
    let engine = Interpolator::new(
        EasingResolver::new().with_attr_override("x", Ease::InQuad),
        MorphOptions::default(),
    );
    assert_eq!(engine.state_at(&timeline, 0.5).scalar("x"), Some(2.5));
}

#[test]
fn shapes_morph_pointwise_between_aligned_outers() {
    let a = Snapshot::new("square").with("shape", AttrValue::Shape(square_at(0.0, 1.0)));
    let b = Snapshot::new("square").with("shape", AttrValue::Shape(square_at(10.0, 1.0)));
    let timeline = resolve_timeline(vec![(0.0, a).into(), (1.0, b).into()]).unwrap();
    let engine = Interpolator::default();

    let mid = engine.state_at(&timeline, 0.5);
    let shape = mid.shape("shape").unwrap();
    assert_eq!(shape.outer.len(), 4);
    assert!(shape.outer.closed);
    // A pure translation morphs every vertex along the same vector.
    let src = square_at(0.0, 1.0);
    for (mid_p, src_p) in shape.outer.points.iter().zip(&src.outer.points) {
        assert!((mid_p.x - (src_p.x + 5.0)).abs() < 1e-9);
        assert!((mid_p.y - src_p.y).abs() < 1e-9);
    }
    // The aligned pair is memoized after the first shape query.
    engine.state_at(&timeline, 0.75);
    assert_eq!(engine.morpher().cache_len(), 1);
}

#[test]
fn declared_rotation_defaults_to_zero() {
    let plain = Snapshot::new("square");
    assert_eq!(declared_rotation(&plain), 0.0);
    let turned = Snapshot::new("square").with(ROTATION_ATTR, AttrValue::Angle(30.0));
    assert_eq!(declared_rotation(&turned), 30.0);
    let scalar = Snapshot::new("square").with(ROTATION_ATTR, AttrValue::Scalar(45.0));
    assert_eq!(declared_rotation(&scalar), 45.0);
}
