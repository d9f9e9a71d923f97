//! The interpolation engine: per-instant snapshot evaluation and
//! parallel batch sampling.

/// Parallel batch sampling over many instants.
pub mod batch;
/// Per-instant snapshot interpolation.
pub mod interpolator;
