//! Shape morphing: vertex alignment, hole matching, and the adapter that
//! combines them into structurally compatible contour pairs.

/// Morphing adapter and memoization cache.
pub mod adapter;
/// Vertex alignment strategies.
pub mod align;
/// Hole matching strategies.
pub mod holes;
/// Deterministic k-means used by the clustering hole strategy.
pub(crate) mod kmeans;
