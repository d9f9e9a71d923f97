use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::foundation::math::Fnv1a64;
use crate::morph::align::{AlignContext, AlignerChoice, AngularAligner, VertexAligner};
use crate::morph::holes::HoleStrategy;
use crate::state::contours::{ContourSet, VertexLoop};

/// Engine-level morphing configuration, passed in explicitly and never
/// read from ambient state. Per-segment
/// [`crate::timeline::keystate::MorphOverride`]s take precedence.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MorphOptions {
    /// Outer-boundary aligner selection.
    #[serde(default)]
    pub aligner: AlignerChoice,
    /// Use the euclidean aligner for open<->open morphs instead of no
    /// alignment. Unresolved policy upstream, so it is a knob here.
    #[serde(default)]
    pub open_open_euclidean: bool,
    /// Hole matching strategy.
    #[serde(default)]
    pub hole_strategy: HoleStrategy,
    /// Fixed resample resolution for outer loops; defaults to the larger
    /// of the two vertex counts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resample_to: Option<usize>,
}

/// A structurally compatible contour pair: equal outer vertex counts and
/// equal, pairwise-aligned hole lists, ready for per-point lerp.
pub type AlignedPair = (ContourSet, ContourSet);

/// Combines vertex alignment and hole matching into compatible contour
/// pairs, memoizing the result per (shape pair, context, options).
///
/// The cache is safe for concurrent read/insert and cannot introduce
/// nondeterminism: alignment is a pure function of the key, so identical
/// keys always carry identical values.
#[derive(Debug, Default)]
pub struct Morpher {
    cache: RwLock<HashMap<u64, Arc<AlignedPair>>>,
}

impl Morpher {
    /// Morpher with an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cached aligned pairs.
    pub fn cache_len(&self) -> usize {
        self.cache.read().map(|c| c.len()).unwrap_or(0)
    }

    /// Align `src` and `dst` into a structurally compatible pair.
    ///
    /// Outer loops are resampled to a common vertex count, aligned with
    /// the configured aligner, and holes are matched and pairwise
    /// aligned; unmatched holes pair against zero-size loops at their
    /// own centroid so they shrink to or grow from nothing.
    #[tracing::instrument(skip_all)]
    pub fn aligned_pair(
        &self,
        src: &ContourSet,
        dst: &ContourSet,
        ctx: &AlignContext,
        options: &MorphOptions,
    ) -> Arc<AlignedPair> {
        let key = cache_key(src, dst, ctx, options);
        if let Ok(cache) = self.cache.read() {
            if let Some(hit) = cache.get(&key) {
                return Arc::clone(hit);
            }
        }

        let pair = Arc::new(compute_aligned_pair(src, dst, ctx, options));
        if let Ok(mut cache) = self.cache.write() {
            // First writer wins; later identical computations are equal.
            return Arc::clone(cache.entry(key).or_insert(pair));
        }
        pair
    }
}

fn cache_key(src: &ContourSet, dst: &ContourSet, ctx: &AlignContext, options: &MorphOptions) -> u64 {
    let mut h = Fnv1a64::new_default();
    src.hash_into(&mut h);
    dst.hash_into(&mut h);
    h.write_f64(ctx.rotation1_deg);
    h.write_f64(ctx.rotation2_deg);
    h.write_u8(u8::from(ctx.closed1));
    h.write_u8(u8::from(ctx.closed2));
    if let Ok(bytes) = serde_json::to_vec(options) {
        h.write_bytes(&bytes);
    }
    h.finish()
}

fn compute_aligned_pair(
    src: &ContourSet,
    dst: &ContourSet,
    ctx: &AlignContext,
    options: &MorphOptions,
) -> AlignedPair {
    let target = options
        .resample_to
        .unwrap_or_else(|| src.outer.len().max(dst.outer.len()))
        .max(2);
    let outer1 = src.outer.resample(target);
    let outer2 = dst.outer.resample(target);

    let aligner = options.aligner.instance(ctx, options.open_open_euclidean);
    let alignment = aligner.align(&outer1, &outer2, ctx);
    let (outer1, outer2) = alignment.apply(&outer1, &outer2);

    let correspondence = options.hole_strategy.correspond(&src.holes, &dst.holes);

    let mut holes1 = Vec::new();
    let mut holes2 = Vec::new();
    for &(i, j) in &correspondence.pairs {
        let (a, b) = align_hole_pair(&src.holes[i], &dst.holes[j]);
        holes1.push(a);
        holes2.push(b);
    }
    for &i in &correspondence.shrink {
        holes1.push(src.holes[i].clone());
        holes2.push(src.holes[i].zero_at_centroid());
    }
    for &j in &correspondence.grow {
        holes1.push(dst.holes[j].zero_at_centroid());
        holes2.push(dst.holes[j].clone());
    }

    (
        ContourSet::new(outer1, holes1),
        ContourSet::new(outer2, holes2),
    )
}

/// Resample a matched hole pair to a common count and align the second
/// hole angularly. Holes are closed and carry no rotation of their own.
fn align_hole_pair(a: &VertexLoop, b: &VertexLoop) -> (VertexLoop, VertexLoop) {
    let target = a.len().max(b.len()).max(2);
    let a = a.resample(target);
    let b = b.resample(target);
    let ctx = AlignContext {
        closed1: true,
        closed2: true,
        ..AlignContext::default()
    };
    let alignment = AngularAligner.align(&a, &b, &ctx);
    alignment.apply(&a, &b)
}

#[cfg(test)]
#[path = "../../tests/unit/morph/adapter.rs"]
mod tests;
