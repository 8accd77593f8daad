//! Ability components of the sandbox world and the effects they can apply.

mod attributes;
mod component;
mod damage;

pub use attributes::{CoreAttribute, CoreAttributes};
pub use component::{AbilityComponent, CommitError, SkillLink};
pub use damage::DamageExecution;

use std::collections::BTreeMap;

use skill_core::{
    AbilitySystem, ActorId, ClassId, ClassKind, ClassRegistry, EffectContext, EffectSpec,
    GameplayTag, Patch, SkillDefinition, SkillSpec,
};
use tracing::{debug, warn};

/// What applying an effect class does.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EffectExecution {
    Damage,
}

/// Effect classes the sandbox knows how to execute.
#[derive(Clone, Debug, Default)]
pub struct EffectLibrary {
    effects: BTreeMap<ClassId, EffectExecution>,
}

impl EffectLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every effect class in `registry` executes as damage.
    pub fn from_registry(registry: &ClassRegistry) -> Self {
        let mut library = Self::new();
        for class in registry.classes_of(ClassKind::Effect) {
            library.register(class.clone(), EffectExecution::Damage);
        }
        library
    }

    pub fn register(&mut self, effect: ClassId, execution: EffectExecution) {
        self.effects.insert(effect, execution);
    }

    pub fn get(&self, effect: &ClassId) -> Option<EffectExecution> {
        self.effects.get(effect).copied()
    }
}

/// All ability components, keyed by owning actor.
#[derive(Clone, Debug, Default)]
pub struct AbilityComponents {
    components: BTreeMap<ActorId, AbilityComponent>,
    effects: EffectLibrary,
}

impl AbilityComponents {
    pub fn new(effects: EffectLibrary) -> Self {
        Self {
            components: BTreeMap::new(),
            effects,
        }
    }

    /// Attaches a fresh component. False if `actor` already has one.
    pub fn attach(&mut self, actor: ActorId) -> bool {
        if self.components.contains_key(&actor) {
            return false;
        }
        self.components.insert(actor, AbilityComponent::new());
        true
    }

    pub fn detach(&mut self, actor: ActorId) -> Option<AbilityComponent> {
        self.components.remove(&actor)
    }

    pub fn get(&self, actor: ActorId) -> Option<&AbilityComponent> {
        self.components.get(&actor)
    }

    pub fn get_mut(&mut self, actor: ActorId) -> Option<&mut AbilityComponent> {
        self.components.get_mut(&actor)
    }

    pub fn effects_mut(&mut self) -> &mut EffectLibrary {
        &mut self.effects
    }

    /// Counts every component's cooldowns down by `dt`.
    pub fn advance(&mut self, dt: f32) {
        for component in self.components.values_mut() {
            component.advance(dt);
        }
    }
}

impl AbilitySystem for AbilityComponents {
    fn has_component(&self, actor: ActorId) -> bool {
        self.components.contains_key(&actor)
    }

    fn make_outgoing_spec(
        &self,
        instigator: ActorId,
        effect: &ClassId,
        level: f32,
        context: EffectContext,
    ) -> Option<EffectSpec> {
        if !self.has_component(instigator) {
            return None;
        }
        if self.effects.get(effect).is_none() {
            warn!(target: "runtime::abilities", %effect, "unknown effect class");
            return None;
        }
        Some(EffectSpec::new(effect.clone(), level, context))
    }

    fn apply_effect_spec_to_target(&mut self, spec: &EffectSpec, target: ActorId) -> bool {
        let Some(execution) = self.effects.get(&spec.effect) else {
            return false;
        };
        let Some(component) = self.components.get_mut(&target) else {
            return false;
        };
        match execution {
            EffectExecution::Damage => {
                DamageExecution::execute(spec, component.attributes_mut());
            }
        }
        true
    }

    fn patches_for_skill(&self, actor: ActorId, skill: &SkillDefinition) -> Vec<Patch> {
        self.get(actor)
            .map(|c| c.patches_for_skill(&skill.skill_id))
            .unwrap_or_default()
    }

    fn commit_ability(&mut self, actor: ActorId, spec: &SkillSpec) -> bool {
        let Some(component) = self.components.get_mut(&actor) else {
            warn!(target: "runtime::abilities", %actor, "commit without ability component");
            return false;
        };
        match component.commit(spec) {
            Ok(()) => true,
            Err(e) => {
                debug!(target: "runtime::abilities", %actor, reason = %e, "commit refused");
                false
            }
        }
    }

    fn set_numeric_attribute_base(
        &mut self,
        actor: ActorId,
        attribute: &GameplayTag,
        value: f32,
    ) -> bool {
        let (Some(component), Some(attribute)) = (
            self.components.get_mut(&actor),
            CoreAttribute::from_tag(attribute),
        ) else {
            return false;
        };
        component.attributes_mut().set_base(attribute, value);
        true
    }
}
