use std::collections::BTreeMap;

use super::{Patch, SkillSpec};
use crate::carrier::area::TICK_INTERVAL_PARAM;
use crate::handler::pierce::PIERCE_COUNT_PARAM;
use crate::tags::{GameplayTag, TagSet};
use crate::types::{ClassId, SkillId};

/// Cue tags a skill may emit at the points of its lifecycle.
///
/// Only `on_cast` is played by the executor. The other tags are presentation
/// data for the host: carriers only see the final spec, which carries no
/// cues, and play the native impact cue on hits.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SkillCues {
    /// Local cue on the caster after a successful commit.
    pub on_cast: Option<GameplayTag>,
    pub on_projectile: Option<GameplayTag>,
    pub on_impact: Option<GameplayTag>,
    pub on_residual: Option<GameplayTag>,
    pub on_aura: Option<GameplayTag>,
}

impl SkillCues {
    /// Every authored cue with its lifecycle point, in lifecycle order.
    pub fn authored(&self) -> impl Iterator<Item = (&'static str, &GameplayTag)> {
        [
            ("on_cast", &self.on_cast),
            ("on_projectile", &self.on_projectile),
            ("on_impact", &self.on_impact),
            ("on_residual", &self.on_residual),
            ("on_aura", &self.on_aura),
        ]
        .into_iter()
        .filter_map(|(point, tag)| tag.as_ref().map(|tag| (point, tag)))
    }
}

/// A contributor of named float parameters to the base spec.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ParameterSource {
    /// Number of targets a projectile passes through.
    Pierce { count: u32 },
    /// Seconds between area pulses.
    AreaPulse { interval: f32 },
    Custom { key: String, value: f32 },
}

impl ParameterSource {
    /// Inserts this source's parameters, overwriting existing keys.
    pub fn contribute(&self, params: &mut BTreeMap<String, f32>) {
        match self {
            Self::Pierce { count } => {
                params.insert(PIERCE_COUNT_PARAM.to_owned(), *count as f32);
            }
            Self::AreaPulse { interval } => {
                params.insert(TICK_INTERVAL_PARAM.to_owned(), *interval);
            }
            Self::Custom { key, value } => {
                params.insert(key.clone(), *value);
            }
        }
    }
}

/// Authored, immutable description of a skill.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SkillDefinition {
    pub skill_id: SkillId,
    pub display_name: String,
    pub tags: TagSet,

    pub ability_class: Option<ClassId>,
    /// Opaque animation id; playback is the host's concern.
    pub cast_montage: Option<String>,

    /// Damage category for host-side resistances and presentation. The
    /// damage execution does not read it.
    pub damage_type: Option<GameplayTag>,
    pub base_damage: f32,
    pub damage_effect: Option<ClassId>,

    pub cooldown: f32,
    pub cost: f32,
    pub cast_time: f32,
    pub radius: f32,
    pub speed: f32,
    pub max_range: f32,
    pub duration: f32,

    pub projectile_class: Option<ClassId>,
    pub area_class: Option<ClassId>,
    pub minion_class: Option<ClassId>,
    pub summon_count: i32,

    pub cues: SkillCues,

    pub default_effects: Vec<ClassId>,
    pub default_handlers: Vec<ClassId>,
    pub parameters: Vec<ParameterSource>,
}

impl SkillDefinition {
    pub fn new(skill_id: impl Into<SkillId>) -> Self {
        Self {
            skill_id: skill_id.into(),
            ..Self::default()
        }
    }

    /// Copies the authored values into a fresh spec (no patches applied).
    pub fn create_base_spec(&self) -> SkillSpec {
        let mut flattened = BTreeMap::new();
        for source in &self.parameters {
            source.contribute(&mut flattened);
        }

        let mut spec = SkillSpec {
            skill_id: self.skill_id.clone(),
            ability_class: self.ability_class.clone(),
            projectile_class: self.projectile_class.clone(),
            area_class: self.area_class.clone(),
            minion_class: self.minion_class.clone(),
            summon_count: self.summon_count,
            final_damage: self.base_damage,
            damage_effect: self.damage_effect.clone(),
            cooldown: self.cooldown,
            resource_cost: self.cost,
            cast_time: self.cast_time,
            area_radius: self.radius,
            projectile_speed: self.speed,
            max_range: self.max_range,
            lifetime: self.duration,
            tags: self.tags.clone(),
            applied_effects: self.default_effects.clone(),
            handlers: self.default_handlers.clone(),
            ..SkillSpec::default()
        };
        for (key, value) in flattened {
            spec.custom_params.set(key, value);
        }
        spec
    }
}

impl Default for SkillDefinition {
    fn default() -> Self {
        Self {
            skill_id: SkillId::none(),
            display_name: String::new(),
            tags: TagSet::new(),
            ability_class: None,
            cast_montage: None,
            damage_type: None,
            base_damage: 0.0,
            damage_effect: None,
            cooldown: 0.0,
            cost: 0.0,
            cast_time: 0.0,
            radius: 0.0,
            speed: 0.0,
            max_range: 0.0,
            duration: 0.0,
            projectile_class: None,
            area_class: None,
            minion_class: None,
            summon_count: 1,
            cues: SkillCues::default(),
            default_effects: Vec::new(),
            default_handlers: Vec::new(),
            parameters: Vec::new(),
        }
    }
}

/// Authored support gem: a named source of one patch.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SupportDefinition {
    pub support_id: String,
    pub display_name: String,
    pub patch: Patch,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_spec_renames_authored_fields() {
        let def = SkillDefinition {
            base_damage: 25.0,
            cost: 8.0,
            radius: 150.0,
            speed: 1200.0,
            duration: 3.0,
            ..SkillDefinition::new("Fireball")
        };
        let spec = def.create_base_spec();

        assert_eq!(spec.skill_id, SkillId::new("Fireball"));
        assert_eq!(spec.final_damage, 25.0);
        assert_eq!(spec.resource_cost, 8.0);
        assert_eq!(spec.area_radius, 150.0);
        assert_eq!(spec.projectile_speed, 1200.0);
        assert_eq!(spec.lifetime, 3.0);
        assert_eq!(spec.summon_count, 1);
    }

    #[test]
    fn authored_cues_in_lifecycle_order() {
        let cues = SkillCues {
            on_aura: Some(GameplayTag::new("GameplayCue.Aura")),
            on_cast: Some(GameplayTag::new("GameplayCue.Cast")),
            ..SkillCues::default()
        };
        let points: Vec<_> = cues.authored().map(|(point, _)| point).collect();
        assert_eq!(points, vec!["on_cast", "on_aura"]);
        assert_eq!(SkillCues::default().authored().count(), 0);
    }

    #[test]
    fn later_parameter_sources_overwrite_earlier_ones() {
        let def = SkillDefinition {
            parameters: vec![
                ParameterSource::Pierce { count: 1 },
                ParameterSource::Custom {
                    key: "Burn.Chance".into(),
                    value: 0.25,
                },
                ParameterSource::Pierce { count: 3 },
            ],
            ..SkillDefinition::new("Spark")
        };
        let spec = def.create_base_spec();

        assert_eq!(spec.custom_params.len(), 2);
        assert_eq!(spec.custom_params.get(PIERCE_COUNT_PARAM, 0.0), 3.0);
        // flattened in key order
        let keys: Vec<_> = spec.custom_params.iter().map(|p| p.key.as_str()).collect();
        assert_eq!(keys, vec!["Burn.Chance", PIERCE_COUNT_PARAM]);
    }
}
