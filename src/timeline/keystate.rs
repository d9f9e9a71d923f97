use std::collections::BTreeMap;

use crate::animation::ease::Ease;
use crate::morph::align::AlignerChoice;
use crate::morph::holes::HoleStrategy;
use crate::state::model::Snapshot;

/// Per-segment morphing-strategy override carried on a keystate.
///
/// Applies to the segment that ends at the carrying keystate; unset
/// fields fall back to the engine-level [`crate::morph::adapter::MorphOptions`].
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MorphOverride {
    /// Hole matching strategy for this segment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hole_strategy: Option<HoleStrategy>,
    /// Vertex aligner for this segment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aligner: Option<AlignerChoice>,
}

/// A fully annotated raw keystate record, possibly still untimed.
///
/// Input form only; resolution assigns times and produces [`KeyState`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct KeystateRecord {
    /// The attribute snapshot at this keystate.
    pub snapshot: Snapshot,
    /// Normalized time in `[0, 1]`, or `None` for auto-timing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<f64>,
    /// Per-attribute easing overrides for the segment ending here.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub easing: BTreeMap<String, Ease>,
    /// Morphing-strategy override for the segment ending here.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub morph: Option<MorphOverride>,
}

impl KeystateRecord {
    /// Untimed record with no overrides.
    pub fn new(snapshot: Snapshot) -> Self {
        Self {
            snapshot,
            time: None,
            easing: BTreeMap::new(),
            morph: None,
        }
    }

    /// Builder-style explicit time.
    pub fn at(mut self, time: f64) -> Self {
        self.time = Some(time);
        self
    }

    /// Builder-style easing override for one attribute.
    pub fn with_easing(mut self, attr: impl Into<String>, ease: Ease) -> Self {
        self.easing.insert(attr.into(), ease);
        self
    }

    /// Builder-style morphing override.
    pub fn with_morph(mut self, morph: MorphOverride) -> Self {
        self.morph = Some(morph);
        self
    }
}

/// A resolved keystate: a snapshot anchored at a concrete normalized
/// time, with its segment overrides.
///
/// Only [`crate::timeline::resolve::resolve_timeline`] constructs these;
/// within one timeline their times are unique and strictly increasing.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct KeyState {
    /// The attribute snapshot at this keystate.
    pub snapshot: Snapshot,
    /// Normalized time in `[0, 1]`.
    pub time: f64,
    /// Per-attribute easing overrides for the segment ending here.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub easing: BTreeMap<String, Ease>,
    /// Morphing-strategy override for the segment ending here.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub morph: Option<MorphOverride>,
}

/// One raw timeline entry in any of the three admissible shapes.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum KeystateEntry {
    /// Fully annotated record, timed or untimed.
    Full(KeystateRecord),
    /// Explicit `(time, snapshot)` pair.
    Timed(f64, Snapshot),
    /// Bare snapshot, auto-timed during resolution.
    Bare(Snapshot),
}

impl From<Snapshot> for KeystateEntry {
    fn from(snapshot: Snapshot) -> Self {
        Self::Bare(snapshot)
    }
}

impl From<(f64, Snapshot)> for KeystateEntry {
    fn from((time, snapshot): (f64, Snapshot)) -> Self {
        Self::Timed(time, snapshot)
    }
}

impl From<KeystateRecord> for KeystateEntry {
    fn from(record: KeystateRecord) -> Self {
        Self::Full(record)
    }
}
