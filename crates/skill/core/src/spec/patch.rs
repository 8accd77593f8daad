use std::collections::BTreeMap;

use super::{SkillSpec, SpecField};
use crate::tags::TagSet;
use crate::types::ClassId;

/// Carrier class replacements a patch may carry. `None` leaves the spec unchanged.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CarrierOverrides {
    pub projectile: Option<ClassId>,
    pub area: Option<ClassId>,
    pub minion: Option<ClassId>,
}

/// One support's modification of a skill spec.
///
/// Applied in two numeric phases: every additive modifier first, then every
/// multiplicative modifier as `value *= 1 + factor`.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Patch {
    pub additive: BTreeMap<SpecField, f32>,
    pub multiplicative: BTreeMap<SpecField, f32>,
    pub tags_to_add: TagSet,
    pub tags_to_remove: TagSet,
    pub effects_to_add: Vec<ClassId>,
    pub handlers_to_add: Vec<ClassId>,
    pub carrier_overrides: CarrierOverrides,
}

impl Patch {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_additive(mut self, field: SpecField, delta: f32) -> Self {
        self.additive.insert(field, delta);
        self
    }

    #[must_use]
    pub fn with_multiplicative(mut self, field: SpecField, factor: f32) -> Self {
        self.multiplicative.insert(field, factor);
        self
    }

    #[must_use]
    pub fn with_handler(mut self, handler: ClassId) -> Self {
        self.handlers_to_add.push(handler);
        self
    }

    pub fn apply_to(&self, spec: &mut SkillSpec) {
        for (&field, &delta) in &self.additive {
            *spec.field_mut(field) += delta;
        }
        for (&field, &factor) in &self.multiplicative {
            *spec.field_mut(field) *= 1.0 + factor;
        }

        spec.tags.append(&self.tags_to_add);
        spec.tags.remove_all(&self.tags_to_remove);

        spec.applied_effects.extend(self.effects_to_add.iter().cloned());
        spec.handlers.extend(self.handlers_to_add.iter().cloned());

        let overrides = &self.carrier_overrides;
        if let Some(class) = &overrides.projectile {
            spec.projectile_class = Some(class.clone());
        }
        if let Some(class) = &overrides.area {
            spec.area_class = Some(class.clone());
        }
        if let Some(class) = &overrides.minion {
            spec.minion_class = Some(class.clone());
        }
    }
}
