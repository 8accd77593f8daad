//! Minimal host for unit tests: no actors, no collision, records destruction.

use crate::effect::{EffectContext, EffectSpec};
use crate::handler::CarrierRef;
use crate::host::{AbilitySystem, ActorSpawn, CarrierKind, CueParams, CueService, Impact, SkillHost};
use crate::spec::{Patch, SkillDefinition, SkillSpec};
use crate::tags::GameplayTag;
use crate::types::{ActorId, CarrierId, ClassId, Transform, Vec3};

#[derive(Debug, Default)]
pub struct NullAbilities;

impl AbilitySystem for NullAbilities {
    fn has_component(&self, _actor: ActorId) -> bool {
        false
    }

    fn make_outgoing_spec(
        &self,
        _instigator: ActorId,
        _effect: &ClassId,
        _level: f32,
        _context: EffectContext,
    ) -> Option<EffectSpec> {
        None
    }

    fn apply_effect_spec_to_target(&mut self, _spec: &EffectSpec, _target: ActorId) -> bool {
        false
    }

    fn patches_for_skill(&self, _actor: ActorId, _skill: &SkillDefinition) -> Vec<Patch> {
        Vec::new()
    }

    fn commit_ability(&mut self, _actor: ActorId, _spec: &SkillSpec) -> bool {
        true
    }

    fn set_numeric_attribute_base(
        &mut self,
        _actor: ActorId,
        _attribute: &GameplayTag,
        _value: f32,
    ) -> bool {
        false
    }
}

#[derive(Debug, Default)]
pub struct NullCues;

impl CueService for NullCues {
    fn play_local_cue(&mut self, _target: ActorId, _cue: &GameplayTag, _params: &CueParams) {}

    fn play_net_cue(&mut self, _target: ActorId, _cue: &GameplayTag, _params: &CueParams) {}
}

#[derive(Debug, Default)]
pub struct NullHost {
    pub abilities: NullAbilities,
    pub cues: NullCues,
    pub destroyed: Vec<ActorId>,
    pub spawned: u32,
}

impl SkillHost for NullHost {
    fn has_authority(&self) -> bool {
        true
    }

    fn actor_transform(&self, _actor: ActorId) -> Option<Transform> {
        None
    }

    fn spawn_actor(&mut self, _spawn: ActorSpawn<'_>) -> Option<ActorId> {
        self.spawned += 1;
        Some(ActorId(1000 + self.spawned))
    }

    fn set_actor_transform(&mut self, _actor: ActorId, _transform: Transform) {}

    fn destroy_actor(&mut self, actor: ActorId) {
        self.destroyed.push(actor);
    }

    fn overlapping_actors(&self, _center: Vec3, _radius: f32) -> Vec<ActorId> {
        Vec::new()
    }

    fn sweep(&self, _from: Vec3, _to: Vec3, _radius: f32) -> Vec<Impact> {
        Vec::new()
    }

    fn abilities(&mut self) -> &mut dyn AbilitySystem {
        &mut self.abilities
    }

    fn cues(&mut self) -> &mut dyn CueService {
        &mut self.cues
    }
}

pub fn carrier_ref(kind: CarrierKind, class: &ClassId) -> CarrierRef<'_> {
    CarrierRef {
        id: CarrierId(1),
        kind,
        class,
        actor: ActorId(100),
        owner: Some(ActorId(1)),
        transform: Transform::default(),
    }
}
