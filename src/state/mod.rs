//! Immutable attribute snapshots and the contour geometry they carry.

/// Point loops and contour sets.
pub mod contours;
/// Snapshot and attribute value model.
pub mod model;
