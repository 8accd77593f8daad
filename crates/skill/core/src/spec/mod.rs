//! Skill specification model.
//!
//! A [`SkillSpec`] is the fully merged, per-activation description of a skill:
//! the authored [`SkillDefinition`] with every linked support [`Patch`]
//! applied in order. Specs carry no runtime state; carriers copy them.

mod definition;
mod field;
mod merge;
mod params;
mod patch;
pub mod wire;

pub use definition::{ParameterSource, SkillCues, SkillDefinition, SupportDefinition};
pub use field::SpecField;
pub use merge::build_spec;
pub use params::{CustomParam, CustomParams};
pub use patch::{CarrierOverrides, Patch};
pub use wire::WireError;

use crate::class::ClassRegistry;
use crate::tags::TagSet;
use crate::types::{ClassId, SkillId};

/// Final runtime specification of one skill activation.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillSpec {
    pub skill_id: SkillId,

    pub ability_class: Option<ClassId>,
    pub projectile_class: Option<ClassId>,
    pub area_class: Option<ClassId>,
    pub minion_class: Option<ClassId>,
    pub summon_count: i32,

    pub final_damage: f32,
    /// Effect applied on hit. Authority-only; not part of the wire record.
    pub damage_effect: Option<ClassId>,

    pub cooldown: f32,
    pub resource_cost: f32,
    pub cast_time: f32,
    pub area_radius: f32,
    pub projectile_speed: f32,
    pub max_range: f32,
    /// Seconds a carrier lives. `<= 0` means unbounded.
    pub lifetime: f32,

    pub tags: TagSet,
    pub applied_effects: Vec<ClassId>,
    /// Handler classes instantiated per activation, in dispatch order.
    pub handlers: Vec<ClassId>,
    pub custom_params: CustomParams,
}

impl SkillSpec {
    pub fn has_identity(&self) -> bool {
        !self.skill_id.is_none()
    }

    /// SHA-256 over the wire record.
    pub fn digest(&self) -> Result<[u8; 32], WireError> {
        Ok(wire::digest(&wire::encode(self)?))
    }

    /// Convenience wrapper around [`wire::decode`].
    pub fn from_wire(bytes: &[u8], registry: &ClassRegistry) -> Result<Self, WireError> {
        wire::decode(bytes, registry)
    }

    pub fn to_wire(&self) -> Result<Vec<u8>, WireError> {
        wire::encode(self)
    }
}

impl Default for SkillSpec {
    fn default() -> Self {
        Self {
            skill_id: SkillId::none(),
            ability_class: None,
            projectile_class: None,
            area_class: None,
            minion_class: None,
            summon_count: 1,
            final_damage: 0.0,
            damage_effect: None,
            cooldown: 0.0,
            resource_cost: 0.0,
            cast_time: 0.0,
            area_radius: 0.0,
            projectile_speed: 0.0,
            max_range: 0.0,
            lifetime: 0.0,
            tags: TagSet::new(),
            applied_effects: Vec::new(),
            handlers: Vec::new(),
            custom_params: CustomParams::new(),
        }
    }
}
