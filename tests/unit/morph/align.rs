use super::*;

fn diamond() -> VertexLoop {
    VertexLoop::closed(vec![
        Point::new(1.0, 0.0),
        Point::new(0.0, 1.0),
        Point::new(-1.0, 0.0),
        Point::new(0.0, -1.0),
    ])
}

fn closed_ctx() -> AlignContext {
    AlignContext {
        closed1: true,
        closed2: true,
        ..AlignContext::default()
    }
}

#[test]
fn vertex_angles_start_north_and_go_clockwise() {
    // Centroid at the origin; y grows downward in screen space, so
    // (0, -1) is north and (1, 0) is east.
    let angles = vertex_angles(&diamond());
    assert!((angles[3] - 0.0).abs() < 1e-9);
    assert!((angles[0] - std::f64::consts::FRAC_PI_2).abs() < 1e-9);
    assert!((angles[1] - std::f64::consts::PI).abs() < 1e-9);
    assert!((angles[2] - 1.5 * std::f64::consts::PI).abs() < 1e-9);
}

#[test]
fn angular_recovers_a_start_index_shift() {
    let a = diamond();
    let b = a.with_start_offset(1);
    let alignment = AngularAligner.align(&a, &b, &closed_ctx());
    // b[i] = a[i + 1], so reading b at offset n-1 restores a's order.
    assert_eq!(alignment.offset, 3);
    assert!(!alignment.applies_to_first);

    let (a2, b2) = alignment.apply(&a, &b);
    assert_eq!(a2.points, b2.points);
}

#[test]
fn angular_respects_declared_rotations() {
    let a = diamond();
    let b = diamond();
    let aligned_same = AngularAligner.align(&a, &b, &closed_ctx());
    assert_eq!(aligned_same.offset, 0);

    // Rotating the second shape by a quarter turn shifts every vertex
    // angle by one slot, so the best offset moves with it.
    let ctx = AlignContext {
        rotation2_deg: 90.0,
        ..closed_ctx()
    };
    let aligned_rotated = AngularAligner.align(&a, &b, &ctx);
    assert_eq!(aligned_rotated.offset, 3);
}

#[test]
fn euclidean_offsets_track_the_first_shapes_rotation() {
    let closed = diamond();
    let open = VertexLoop::open(diamond().points);
    let ctx = AlignContext {
        closed1: true,
        closed2: false,
        ..AlignContext::default()
    };

    let plain = EuclideanAligner.align(&closed, &open, &ctx);
    assert_eq!(plain.offset, 0);
    assert!(plain.applies_to_first);

    let rotated_ctx = AlignContext {
        rotation1_deg: 90.0,
        ..ctx
    };
    let rotated = EuclideanAligner.align(&closed, &open, &rotated_ctx);
    assert_ne!(rotated.offset, plain.offset);

    // Rotation declared on the open shape shifts the offset as well.
    let rotated_second = AlignContext {
        rotation2_deg: 90.0,
        ..ctx
    };
    let shifted = EuclideanAligner.align(&closed, &open, &rotated_second);
    assert_ne!(shifted.offset, plain.offset);
}

#[test]
fn euclidean_open_open_only_considers_reversal() {
    let a = VertexLoop::open(vec![
        Point::new(0.0, 0.0),
        Point::new(1.0, 0.0),
        Point::new(2.0, 0.0),
    ]);
    let b = a.reversed();
    let ctx = AlignContext::default();
    let alignment = EuclideanAligner.align(&a, &b, &ctx);
    assert_eq!(alignment.offset, 0);
    assert!(alignment.reverse_second);

    let (a2, b2) = alignment.apply(&a, &b);
    assert_eq!(a2.points, b2.points);
}

#[test]
fn null_aligner_is_the_identity() {
    let a = diamond();
    let b = a.with_start_offset(2);
    assert_eq!(
        NullAligner.align(&a, &b, &closed_ctx()),
        Alignment::default()
    );
}

#[test]
fn degenerate_loops_align_with_zero_offset() {
    let dot = VertexLoop::closed(vec![Point::new(0.0, 0.0)]);
    let pair = diamond();
    assert_eq!(
        AngularAligner.align(&dot, &dot, &closed_ctx()),
        Alignment::default()
    );
    // Mismatched lengths fall back the same way.
    assert_eq!(
        EuclideanAligner.align(&dot, &pair, &closed_ctx()),
        Alignment::default()
    );
}

#[test]
fn auto_choice_dispatches_on_closedness() {
    let a = VertexLoop::open(vec![
        Point::new(0.0, 0.0),
        Point::new(1.0, 0.0),
        Point::new(2.0, 0.0),
    ]);
    let b = a.reversed();
    let ctx = AlignContext::default();

    // Open<->open defaults to no alignment; the euclidean knob enables
    // the reversal check.
    let null = AlignerChoice::Auto.instance(&ctx, false).align(&a, &b, &ctx);
    assert_eq!(null, Alignment::default());
    let euclid = AlignerChoice::Auto.instance(&ctx, true).align(&a, &b, &ctx);
    assert!(euclid.reverse_second);

    // Closed<->closed picks the angular strategy.
    let c = diamond();
    let d = c.with_start_offset(1);
    let angular = AlignerChoice::Auto
        .instance(&closed_ctx(), false)
        .align(&c, &d, &closed_ctx());
    assert_eq!(angular.offset, 3);
}
