//! Morphyte is a state interpolation and shape-morphing engine for
//! programmatic vector animation.
//!
//! Given two or more immutable attribute snapshots ("keystates")
//! anchored on a normalized timeline, Morphyte computes the exact visual
//! attributes at any intermediate time, including topologically correct
//! morphing between polygon-like shapes with differing vertex counts and
//! differing numbers of interior holes.
//!
//! # Pipeline overview
//!
//! 1. **Resolve**: raw keystate list -> [`Timeline`] (ordered, fully
//!    timed, validated)
//! 2. **Locate**: `Timeline + t` -> active segment and local progress
//! 3. **Ease**: per-attribute easing via a 4-level priority
//!    ([`EasingResolver`])
//! 4. **Interpolate**: scalars/angles/colors directly; shape geometry
//!    through vertex alignment and hole matching ([`Morpher`])
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Pure-by-construction**: every instant is an independent function
//!   of (timeline, time, configuration); batch sampling parallelizes
//!   freely ([`Interpolator::states_at`]).
//! - **Fail fast at resolution**: malformed timelines error before any
//!   frame is computed; per-frame geometry edge cases resolve to
//!   documented fallbacks, never errors.
//! - **No ambient configuration**: strategy selection and parameters are
//!   explicit arguments ([`MorphOptions`]).
//!
//! Rendering the resolved snapshots into drawable primitives is the
//! responsibility of downstream collaborators; this crate never draws.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod animation;
mod eval;
mod foundation;
mod morph;
mod state;
mod timeline;

pub use animation::ease::Ease;
pub use animation::easing_resolver::EasingResolver;
pub use eval::interpolator::{Interpolator, ROTATION_ATTR};
pub use foundation::core::{Point, Rgba8};
pub use foundation::error::{MorphyteError, MorphyteResult};
pub use morph::adapter::{AlignedPair, MorphOptions, Morpher};
pub use morph::align::{
    AlignContext, Alignment, AlignerChoice, AngularAligner, EuclideanAligner, NullAligner,
    VertexAligner,
};
pub use morph::holes::{HoleCorrespondence, HoleStrategy};
pub use state::contours::{ContourSet, VertexLoop};
pub use state::model::{AttrValue, Snapshot, VariantId};
pub use timeline::keystate::{KeyState, KeystateEntry, KeystateRecord, MorphOverride};
pub use timeline::resolve::{Timeline, entries_from_json, resolve_timeline};
