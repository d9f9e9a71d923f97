use std::collections::BTreeMap;

use crate::foundation::core::Rgba8;
use crate::state::contours::ContourSet;

/// Identifier of a snapshot's concrete shape/entity kind.
///
/// Snapshots with equal variant identifiers are compatible for smooth
/// interpolation; across different variants only shared attributes
/// interpolate and the variant itself switches discretely.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct VariantId(pub String);

impl VariantId {
    /// Build a variant identifier.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}

impl std::fmt::Display for VariantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single named attribute value carried by a [`Snapshot`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum AttrValue {
    /// Plain numeric attribute, interpolated linearly.
    Scalar(f64),
    /// Angle in degrees, interpolated along the shortest signed arc.
    Angle(f64),
    /// Color, interpolated component-wise including alpha.
    Color(Rgba8),
    /// Boolean flag, switched discretely at the segment midpoint.
    Bool(bool),
    /// Enum-like tag, switched discretely at the segment midpoint.
    Discrete(String),
    /// Shape geometry, morphed via alignment and hole matching.
    Shape(ContourSet),
}

/// An immutable mapping of named attributes tagged with a variant
/// identifier.
///
/// Snapshots are constructed by the caller, consumed read-only by the
/// engine, and never mutated; every interpolation step produces a new
/// snapshot.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Snapshot {
    /// Concrete shape/entity kind of this snapshot.
    pub variant: VariantId,
    /// Named attribute values, iterated in deterministic order.
    pub attrs: BTreeMap<String, AttrValue>,
}

impl Snapshot {
    /// Build an empty snapshot of the given variant.
    pub fn new(variant: impl Into<String>) -> Self {
        Self {
            variant: VariantId::new(variant),
            attrs: BTreeMap::new(),
        }
    }

    /// Builder-style attribute insertion.
    pub fn with(mut self, name: impl Into<String>, value: AttrValue) -> Self {
        self.attrs.insert(name.into(), value);
        self
    }

    /// Look up an attribute by name.
    pub fn get(&self, name: &str) -> Option<&AttrValue> {
        self.attrs.get(name)
    }

    /// Scalar attribute value, if present and scalar-typed.
    pub fn scalar(&self, name: &str) -> Option<f64> {
        match self.attrs.get(name) {
            Some(AttrValue::Scalar(v)) => Some(*v),
            _ => None,
        }
    }

    /// Shape attribute value, if present and shape-typed.
    pub fn shape(&self, name: &str) -> Option<&ContourSet> {
        match self.attrs.get(name) {
            Some(AttrValue::Shape(c)) => Some(c),
            _ => None,
        }
    }
}
