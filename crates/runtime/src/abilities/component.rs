//! Per-actor ability component: attributes, equipped skills, linked supports,
//! cooldowns.

use std::collections::BTreeMap;
use std::sync::Arc;

use skill_core::{Patch, SkillDefinition, SkillId, SkillSpec, SupportDefinition};

use super::attributes::{CoreAttribute, CoreAttributes};

/// Why a commit was refused.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum CommitError {
    #[error("skill {skill} on cooldown for {remaining:.2}s")]
    OnCooldown { skill: SkillId, remaining: f32 },

    #[error("skill {skill} costs {required} mana, {available} available")]
    InsufficientMana {
        skill: SkillId,
        required: f32,
        available: f32,
    },
}

/// An equipped skill and the supports linked to it, in link order.
#[derive(Clone, Debug)]
pub struct SkillLink {
    pub skill: Arc<SkillDefinition>,
    pub supports: Vec<Arc<SupportDefinition>>,
}

#[derive(Clone, Debug, Default)]
pub struct AbilityComponent {
    attributes: CoreAttributes,
    links: Vec<SkillLink>,
    cooldowns: BTreeMap<SkillId, f32>,
}

impl AbilityComponent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attributes(&self) -> &CoreAttributes {
        &self.attributes
    }

    pub fn attributes_mut(&mut self) -> &mut CoreAttributes {
        &mut self.attributes
    }

    /// Equips `skill`. False if a skill with the same id is already equipped.
    pub fn equip_skill(&mut self, skill: Arc<SkillDefinition>) -> bool {
        if self.link(&skill.skill_id).is_some() {
            return false;
        }
        self.links.push(SkillLink {
            skill,
            supports: Vec::new(),
        });
        true
    }

    /// Links `support` to an equipped skill. False if the skill is not
    /// equipped or the support is already linked to it.
    pub fn link_support(&mut self, skill: &SkillId, support: Arc<SupportDefinition>) -> bool {
        let Some(link) = self.links.iter_mut().find(|l| &l.skill.skill_id == skill) else {
            return false;
        };
        if link
            .supports
            .iter()
            .any(|s| s.support_id == support.support_id)
        {
            return false;
        }
        link.supports.push(support);
        true
    }

    pub fn link(&self, skill: &SkillId) -> Option<&SkillLink> {
        self.links.iter().find(|l| &l.skill.skill_id == skill)
    }

    pub fn equipped(&self) -> impl Iterator<Item = &SkillLink> {
        self.links.iter()
    }

    /// Patches of the supports linked to `skill`, in link order.
    pub fn patches_for_skill(&self, skill: &SkillId) -> Vec<Patch> {
        self.link(skill)
            .map(|link| link.supports.iter().map(|s| s.patch.clone()).collect())
            .unwrap_or_default()
    }

    pub fn cooldown_remaining(&self, skill: &SkillId) -> f32 {
        self.cooldowns.get(skill).copied().unwrap_or(0.0)
    }

    /// Pays the resource cost and starts the cooldown.
    pub fn commit(&mut self, spec: &SkillSpec) -> Result<(), CommitError> {
        let remaining = self.cooldown_remaining(&spec.skill_id);
        if remaining > 0.0 {
            return Err(CommitError::OnCooldown {
                skill: spec.skill_id.clone(),
                remaining,
            });
        }
        let cost = spec.resource_cost.max(0.0);
        if cost > self.attributes.mana() {
            return Err(CommitError::InsufficientMana {
                skill: spec.skill_id.clone(),
                required: cost,
                available: self.attributes.mana(),
            });
        }

        self.attributes.modify(CoreAttribute::Mana, -cost);
        if spec.cooldown > 0.0 {
            self.cooldowns.insert(spec.skill_id.clone(), spec.cooldown);
        }
        Ok(())
    }

    /// Counts cooldowns down by `dt`.
    pub fn advance(&mut self, dt: f32) {
        for remaining in self.cooldowns.values_mut() {
            *remaining -= dt;
        }
        self.cooldowns.retain(|_, remaining| *remaining > 0.0);
    }
}
