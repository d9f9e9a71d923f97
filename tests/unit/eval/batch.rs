use super::*;

use crate::state::model::AttrValue;
use crate::timeline::resolve::resolve_timeline;

fn timeline() -> Timeline {
    // Tests share one process; later init attempts are no-ops.
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    let a = Snapshot::new("dot").with("x", AttrValue::Scalar(0.0));
    let b = Snapshot::new("dot").with("x", AttrValue::Scalar(8.0));
    resolve_timeline(vec![(0.0, a).into(), (1.0, b).into()]).unwrap()
}

#[test]
fn batch_matches_sequential_evaluation() {
    let timeline = timeline();
    let engine = Interpolator::default();
    let times = [0.0, 0.1, 0.25, 0.5, 0.9, 1.0];

    let batch = engine.states_at(&timeline, &times);
    let sequential: Vec<Snapshot> = times.iter().map(|&t| engine.state_at(&timeline, t)).collect();
    assert_eq!(batch, sequential);
}

#[test]
fn batch_preserves_input_order() {
    let timeline = timeline();
    let engine = Interpolator::default();
    let times = [1.0, 0.0, 0.5];
    let states = engine.states_at(&timeline, &times);
    assert_eq!(states[0].scalar("x"), Some(8.0));
    assert_eq!(states[1].scalar("x"), Some(0.0));
    assert_eq!(states[2].scalar("x"), Some(4.0));
}

#[test]
fn pooled_evaluation_matches_the_shared_pool() {
    let timeline = timeline();
    let engine = Interpolator::default();
    let times: Vec<f64> = (0..=20).map(|i| i as f64 / 20.0).collect();

    let pooled = engine.states_at_pooled(&timeline, &times, Some(2)).unwrap();
    assert_eq!(pooled, engine.states_at(&timeline, &times));

    let default_pool = engine.states_at_pooled(&timeline, &times, None).unwrap();
    assert_eq!(default_pool, pooled);
}

#[test]
fn empty_batch_is_empty() {
    let engine = Interpolator::default();
    assert!(engine.states_at(&timeline(), &[]).is_empty());
}
