use std::collections::BTreeMap;

use crate::animation::ease::Ease;
use crate::state::model::VariantId;

/// Resolves the easing function for one attribute over one timeline
/// segment, using a strict descending priority:
///
/// 1. per-attribute override on the destination keystate's segment,
/// 2. entity-level per-attribute override,
/// 3. per-variant default easing table,
/// 4. [`Ease::Linear`].
///
/// Resolution is a pure lookup. Callers resolve once per attribute per
/// instant, never per vertex.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct EasingResolver {
    /// Entity-level per-attribute overrides (priority 2).
    pub attr_overrides: BTreeMap<String, Ease>,
    /// Per-variant default easing tables, keyed by variant then attribute
    /// (priority 3).
    pub variant_defaults: BTreeMap<VariantId, BTreeMap<String, Ease>>,
}

impl EasingResolver {
    /// Resolver with no overrides; everything resolves to linear.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an entity-level override for `attr`.
    pub fn with_attr_override(mut self, attr: impl Into<String>, ease: Ease) -> Self {
        self.attr_overrides.insert(attr.into(), ease);
        self
    }

    /// Register a per-variant default for `attr` on `variant`.
    pub fn with_variant_default(
        mut self,
        variant: impl Into<String>,
        attr: impl Into<String>,
        ease: Ease,
    ) -> Self {
        self.variant_defaults
            .entry(VariantId::new(variant))
            .or_default()
            .insert(attr.into(), ease);
        self
    }

    /// Resolve the easing for `attr` on a segment whose destination
    /// keystate declares `segment_overrides`, for a snapshot of `variant`.
    pub fn resolve(
        &self,
        attr: &str,
        segment_overrides: &BTreeMap<String, Ease>,
        variant: &VariantId,
    ) -> Ease {
        if let Some(ease) = segment_overrides.get(attr) {
            return *ease;
        }
        if let Some(ease) = self.attr_overrides.get(attr) {
            return *ease;
        }
        if let Some(ease) = self
            .variant_defaults
            .get(variant)
            .and_then(|table| table.get(attr))
        {
            return *ease;
        }
        Ease::Linear
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/easing_resolver.rs"]
mod tests;
