use kurbo::Point;

use crate::foundation::math::angle_distance_rad;
use crate::state::contours::VertexLoop;

/// Closedness flags and declared rotations for the two loops being
/// aligned. Pure input to alignment; never persisted on a snapshot.
///
/// Rotations are in degrees and are applied to the loop geometry before
/// the distance metric is evaluated, so two shapes with different
/// declared rotations produce different best offsets. The returned
/// offset always applies to the original, unrotated point lists; the
/// visual rotation is reproduced separately by the output transform.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AlignContext {
    /// Declared rotation of the first shape, degrees.
    pub rotation1_deg: f64,
    /// Declared rotation of the second shape, degrees.
    pub rotation2_deg: f64,
    /// Whether the first loop is closed.
    pub closed1: bool,
    /// Whether the second loop is closed.
    pub closed2: bool,
}

/// Result of aligning two equal-length loops.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Alignment {
    /// Start-index offset for the loop named by `applies_to_first`.
    pub offset: usize,
    /// Offset applies to the first loop instead of the second. Set when
    /// only the first loop is closed: rotating the start of an open loop
    /// is meaningless, so the closed side absorbs the offset.
    pub applies_to_first: bool,
    /// Reverse the second loop's orientation before applying the offset.
    pub reverse_second: bool,
}

impl Alignment {
    /// Apply this alignment, returning the aligned loop pair.
    pub fn apply(self, a: &VertexLoop, b: &VertexLoop) -> (VertexLoop, VertexLoop) {
        let b = if self.reverse_second {
            b.reversed()
        } else {
            b.clone()
        };
        if self.applies_to_first {
            (a.with_start_offset(self.offset), b)
        } else {
            (a.clone(), b.with_start_offset(self.offset))
        }
    }
}

/// A strategy for choosing the start-index correspondence between two
/// equal-length point loops that minimizes a total distance metric.
///
/// Loops with fewer than 2 points, or with mismatched lengths, align
/// with a zero offset; such shapes have no meaningful alignment and this
/// is documented boundary behavior, not an error.
pub trait VertexAligner {
    /// Compute the best alignment of `b` against `a`.
    fn align(&self, a: &VertexLoop, b: &VertexLoop, ctx: &AlignContext) -> Alignment;
}

/// Selectable aligner, configuration-surface form.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlignerChoice {
    /// Pick by closedness: closed<->closed angular, mixed euclidean,
    /// open<->open per [`crate::morph::adapter::MorphOptions::open_open_euclidean`].
    #[default]
    Auto,
    /// Force [`AngularAligner`].
    Angular,
    /// Force [`EuclideanAligner`].
    Euclidean,
    /// Force [`NullAligner`].
    Null,
}

impl AlignerChoice {
    /// Resolve this choice to a concrete strategy.
    pub fn instance(self, ctx: &AlignContext, open_open_euclidean: bool) -> &'static dyn VertexAligner {
        match self {
            Self::Angular => &AngularAligner,
            Self::Euclidean => &EuclideanAligner,
            Self::Null => &NullAligner,
            Self::Auto => match (ctx.closed1, ctx.closed2) {
                (true, true) => &AngularAligner,
                (false, false) => {
                    if open_open_euclidean {
                        &EuclideanAligner
                    } else {
                        &NullAligner
                    }
                }
                _ => &EuclideanAligner,
            },
        }
    }
}

/// Centroid-relative angular alignment for closed<->closed morphs.
///
/// Vertex angles are measured from each loop's centroid with 0 degrees
/// at north, increasing clockwise. The offset minimizing the summed
/// shortest angular distance wins. Angles are precomputed once, so the
/// exhaustive offset search costs O(n) metric evaluations per offset.
#[derive(Clone, Copy, Debug, Default)]
pub struct AngularAligner;

impl VertexAligner for AngularAligner {
    fn align(&self, a: &VertexLoop, b: &VertexLoop, ctx: &AlignContext) -> Alignment {
        let n = b.len();
        if n < 2 || a.len() != n {
            return Alignment::default();
        }

        let a_rot = a.rotated(ctx.rotation1_deg);
        let b_rot = b.rotated(ctx.rotation2_deg);
        let angles1 = vertex_angles(&a_rot);
        let angles2 = vertex_angles(&b_rot);

        let mut best_offset = 0;
        let mut best_dist = f64::INFINITY;
        for offset in 0..n {
            let total: f64 = (0..n)
                .map(|i| angle_distance_rad(angles1[i], angles2[(i + offset) % n]))
                .sum();
            if total < best_dist {
                best_dist = total;
                best_offset = offset;
            }
        }

        Alignment {
            offset: best_offset,
            ..Alignment::default()
        }
    }
}

/// Euclidean point-to-point alignment for open/closed combinations.
///
/// Each loop is rotated by its own declared rotation before distances
/// are computed, and the offset search runs over the closed side (for
/// one open and one closed loop) or over the second loop (both closed).
/// Two open loops have no start offset to search; only orientation
/// reversal of the second loop is considered. O(n^2); callers needing
/// large n should subsample first.
#[derive(Clone, Copy, Debug, Default)]
pub struct EuclideanAligner;

impl VertexAligner for EuclideanAligner {
    fn align(&self, a: &VertexLoop, b: &VertexLoop, ctx: &AlignContext) -> Alignment {
        let n = b.len();
        if n < 2 || a.len() != n {
            return Alignment::default();
        }

        let a_rot = a.rotated(ctx.rotation1_deg);
        let b_rot = b.rotated(ctx.rotation2_deg);

        match (ctx.closed1, ctx.closed2) {
            (false, false) => {
                let forward = total_distance(&a_rot.points, &b_rot.points, 0);
                let reversed = b_rot.reversed();
                let backward = total_distance(&a_rot.points, &reversed.points, 0);
                Alignment {
                    offset: 0,
                    applies_to_first: false,
                    reverse_second: backward < forward,
                }
            }
            (true, false) => {
                // The closed first loop absorbs the offset.
                let offset = best_offset(&b_rot.points, &a_rot.points);
                Alignment {
                    offset,
                    applies_to_first: true,
                    reverse_second: false,
                }
            }
            _ => {
                let offset = best_offset(&a_rot.points, &b_rot.points);
                Alignment {
                    offset,
                    ..Alignment::default()
                }
            }
        }
    }
}

/// No alignment: identity offset.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullAligner;

impl VertexAligner for NullAligner {
    fn align(&self, _a: &VertexLoop, _b: &VertexLoop, _ctx: &AlignContext) -> Alignment {
        Alignment::default()
    }
}

/// Centroid-relative vertex angles, 0 = north, clockwise positive.
fn vertex_angles(vloop: &VertexLoop) -> Vec<f64> {
    let c = vloop.centroid();
    vloop
        .points
        .iter()
        .map(|p| {
            let angle = (p.x - c.x).atan2(-(p.y - c.y));
            if angle < 0.0 {
                angle + std::f64::consts::TAU
            } else {
                angle
            }
        })
        .collect()
}

/// Offset of `moving` minimizing total distance to `fixed`.
fn best_offset(fixed: &[Point], moving: &[Point]) -> usize {
    let n = moving.len();
    let mut best = 0;
    let mut best_dist = f64::INFINITY;
    for offset in 0..n {
        let total = total_distance(fixed, moving, offset);
        if total < best_dist {
            best_dist = total;
            best = offset;
        }
    }
    best
}

fn total_distance(fixed: &[Point], moving: &[Point], offset: usize) -> f64 {
    let n = fixed.len();
    (0..n)
        .map(|i| fixed[i].distance(moving[(i + offset) % n]))
        .sum()
}

#[cfg(test)]
#[path = "../../tests/unit/morph/align.rs"]
mod tests;
