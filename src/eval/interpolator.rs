use kurbo::Point;

use crate::animation::easing_resolver::EasingResolver;
use crate::foundation::math;
use crate::morph::adapter::{MorphOptions, Morpher};
use crate::morph::align::AlignContext;
use crate::state::contours::{ContourSet, VertexLoop};
use crate::state::model::{AttrValue, Snapshot};
use crate::timeline::keystate::KeyState;
use crate::timeline::resolve::Timeline;

/// Name of the angle attribute the morph adapter reads as a shape's
/// declared rotation when building its alignment context.
pub const ROTATION_ATTR: &str = "rotation";

/// Stateless evaluator from a resolved timeline to the snapshot at one
/// instant.
///
/// Every call is an independent, pure function of (timeline, time,
/// configuration); the only shared state is the morph memoization cache,
/// which is deterministic and safe to share across threads.
#[derive(Debug, Default)]
pub struct Interpolator {
    /// Per-attribute easing resolution.
    pub easing: EasingResolver,
    /// Engine-level morphing defaults.
    pub options: MorphOptions,
    morpher: Morpher,
}

impl Interpolator {
    /// Interpolator with the given easing resolver and morph options.
    pub fn new(easing: EasingResolver, options: MorphOptions) -> Self {
        Self {
            easing,
            options,
            morpher: Morpher::new(),
        }
    }

    /// Shared morph adapter (exposed for cache inspection in tests and
    /// tooling).
    pub fn morpher(&self) -> &Morpher {
        &self.morpher
    }

    /// Compute the fully-resolved snapshot at global time `t`.
    ///
    /// Outside the timeline's span the boundary snapshots are returned
    /// verbatim. Within a segment, each attribute present in both
    /// endpoints interpolates under its resolved easing; the output is
    /// based on the start snapshot before local progress 0.5 and on the
    /// end snapshot from 0.5 onward, which is what switches the variant
    /// identifier discretely for incompatible shapes.
    #[tracing::instrument(skip(self, timeline))]
    pub fn state_at(&self, timeline: &Timeline, t: f64) -> Snapshot {
        if t <= timeline.first().time {
            return timeline.first().snapshot.clone();
        }
        if t >= timeline.last().time {
            return timeline.last().snapshot.clone();
        }
        let Some((_, start, end)) = timeline.segment_at(t) else {
            return timeline.last().snapshot.clone();
        };

        let t_local = ((t - start.time) / (end.time - start.time)).clamp(0.0, 1.0);
        self.eased_state(start, end, t_local)
    }

    fn eased_state(&self, start: &KeyState, end: &KeyState, t_local: f64) -> Snapshot {
        let base = if t_local < 0.5 { start } else { end };
        let mut out = base.snapshot.clone();

        for (name, start_value) in &start.snapshot.attrs {
            let Some(end_value) = end.snapshot.attrs.get(name) else {
                continue; // one-sided attribute, kept only if on the base
            };
            if start_value == end_value {
                continue; // base already carries the value
            }

            let ease = self
                .easing
                .resolve(name, &end.easing, &start.snapshot.variant);
            let eased_t = ease.apply(t_local);
            let value = self.interpolate_value(start, end, start_value, end_value, eased_t);
            out.attrs.insert(name.clone(), value);
        }

        out
    }

    fn interpolate_value(
        &self,
        start: &KeyState,
        end: &KeyState,
        start_value: &AttrValue,
        end_value: &AttrValue,
        eased_t: f64,
    ) -> AttrValue {
        match (start_value, end_value) {
            (AttrValue::Scalar(a), AttrValue::Scalar(b)) => {
                AttrValue::Scalar(math::lerp(*a, *b, eased_t))
            }
            (AttrValue::Angle(a), AttrValue::Angle(b)) => {
                AttrValue::Angle(math::lerp_angle_deg(*a, *b, eased_t))
            }
            (AttrValue::Color(a), AttrValue::Color(b)) => AttrValue::Color(a.lerp(*b, eased_t)),
            (AttrValue::Shape(a), AttrValue::Shape(b)) => {
                AttrValue::Shape(self.morph_shapes(start, end, a, b, eased_t))
            }
            // Booleans, discrete tags, and type-mismatched attributes
            // switch at the midpoint.
            (_, _) => {
                if eased_t < 0.5 {
                    start_value.clone()
                } else {
                    end_value.clone()
                }
            }
        }
    }

    fn morph_shapes(
        &self,
        start: &KeyState,
        end: &KeyState,
        src: &ContourSet,
        dst: &ContourSet,
        eased_t: f64,
    ) -> ContourSet {
        let ctx = AlignContext {
            rotation1_deg: declared_rotation(&start.snapshot),
            rotation2_deg: declared_rotation(&end.snapshot),
            closed1: src.outer.closed,
            closed2: dst.outer.closed,
        };

        // The destination keystate's segment override wins over engine
        // options, field by field.
        let mut options = self.options.clone();
        if let Some(overrides) = &end.morph {
            if let Some(strategy) = &overrides.hole_strategy {
                options.hole_strategy = strategy.clone();
            }
            if let Some(aligner) = overrides.aligner {
                options.aligner = aligner;
            }
        }

        let pair = self.morpher.aligned_pair(src, dst, &ctx, &options);
        let (a, b) = pair.as_ref();

        let outer = lerp_loop(&a.outer, &b.outer, eased_t);
        let holes = a
            .holes
            .iter()
            .zip(&b.holes)
            .map(|(ha, hb)| lerp_loop(ha, hb, eased_t))
            .collect();
        ContourSet::new(outer, holes)
    }
}

fn declared_rotation(snapshot: &Snapshot) -> f64 {
    match snapshot.get(ROTATION_ATTR) {
        Some(AttrValue::Angle(deg)) | Some(AttrValue::Scalar(deg)) => *deg,
        _ => 0.0,
    }
}

/// Per-point lerp of two equal-length loops. The result is closed only
/// when both inputs are closed; closure is implicit, so no vertex
/// duplication is needed.
fn lerp_loop(a: &VertexLoop, b: &VertexLoop, t: f64) -> VertexLoop {
    let points = a
        .points
        .iter()
        .zip(&b.points)
        .map(|(pa, pb)| {
            Point::new(
                math::lerp(pa.x, pb.x, t),
                math::lerp(pa.y, pb.y, t),
            )
        })
        .collect();
    VertexLoop {
        points,
        closed: a.closed && b.closed,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/eval/interpolator.rs"]
mod tests;
