//! Collaborator interfaces the framework consumes.
//!
//! The host engine owns actors, collision, the ability/effect runtime and cue
//! presentation. Everything in this crate reaches the engine only through
//! these traits, which keeps the dispatch pipeline testable against a
//! headless implementation.

use crate::class::ClassKind;
use crate::effect::{EffectContext, EffectSpec};
use crate::spec::{Patch, SkillDefinition, SkillSpec};
use crate::tags::GameplayTag;
use crate::types::{ActorId, ClassId, Transform, Vec3};

/// Variant of a carrier body.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CarrierKind {
    Projectile,
    AreaEffect,
    Minion,
}

impl CarrierKind {
    /// Registry kind a class must have to back this carrier.
    pub fn class_kind(self) -> ClassKind {
        match self {
            Self::Projectile => ClassKind::Projectile,
            Self::AreaEffect => ClassKind::AreaEffect,
            Self::Minion => ClassKind::Minion,
        }
    }
}

/// Request to place a carrier body into the world.
#[derive(Clone, Debug)]
pub struct ActorSpawn<'a> {
    pub class: &'a ClassId,
    pub kind: CarrierKind,
    pub transform: Transform,
    pub owner: Option<ActorId>,
}

/// Result of a collision query.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Impact {
    pub actor: Option<ActorId>,
    pub location: Vec3,
    pub normal: Vec3,
    /// Distance from the query origin.
    pub distance: f32,
}

impl Impact {
    /// Synthetic impact at an actor's location, used by area pulses.
    pub fn at_actor(actor: ActorId, location: Vec3) -> Self {
        Self {
            actor: Some(actor),
            location,
            normal: Vec3::UP,
            distance: 0.0,
        }
    }
}

/// Parameters forwarded to cue presentation.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CueParams {
    pub location: Vec3,
    pub normal: Vec3,
    pub raw_magnitude: f32,
    pub instigator: Option<ActorId>,
}

/// Engine facade: world, collision, authority.
pub trait SkillHost {
    /// True on the instance allowed to mutate gameplay state.
    fn has_authority(&self) -> bool;

    fn actor_transform(&self, actor: ActorId) -> Option<Transform>;

    /// Places a carrier body. `None` if the host refuses.
    fn spawn_actor(&mut self, spawn: ActorSpawn<'_>) -> Option<ActorId>;

    fn set_actor_transform(&mut self, actor: ActorId, transform: Transform);

    fn destroy_actor(&mut self, actor: ActorId);

    /// Actors whose collision overlaps the sphere.
    fn overlapping_actors(&self, center: Vec3, radius: f32) -> Vec<ActorId>;

    /// Sphere sweep from `from` to `to`, impacts ordered by distance.
    fn sweep(&self, from: Vec3, to: Vec3, radius: f32) -> Vec<Impact>;

    fn abilities(&mut self) -> &mut dyn AbilitySystem;

    fn cues(&mut self) -> &mut dyn CueService;
}

/// Ability components of all actors, keyed by actor.
pub trait AbilitySystem {
    fn has_component(&self, actor: ActorId) -> bool;

    fn make_effect_context(&self, instigator: ActorId) -> EffectContext {
        EffectContext::new(instigator)
    }

    /// Builds an outgoing spec from `instigator`'s component. `None` if the
    /// instigator has no component or the effect class is unknown.
    fn make_outgoing_spec(
        &self,
        instigator: ActorId,
        effect: &ClassId,
        level: f32,
        context: EffectContext,
    ) -> Option<EffectSpec>;

    /// Applies `spec` to `target`. Returns false when nothing was applied.
    fn apply_effect_spec_to_target(&mut self, spec: &EffectSpec, target: ActorId) -> bool;

    /// Patches of every support linked to `skill` on `actor`, in link order.
    fn patches_for_skill(&self, actor: ActorId, skill: &SkillDefinition) -> Vec<Patch>;

    /// Pays cost and starts cooldown. False aborts the activation.
    fn commit_ability(&mut self, actor: ActorId, spec: &SkillSpec) -> bool;

    fn set_numeric_attribute_base(&mut self, actor: ActorId, attribute: &GameplayTag, value: f32)
    -> bool;
}

/// Cosmetic cue playback.
pub trait CueService {
    /// Plays on this instance only.
    fn play_local_cue(&mut self, target: ActorId, cue: &GameplayTag, params: &CueParams);

    /// Broadcasts to every instance. Authority only; otherwise ignored.
    fn play_net_cue(&mut self, target: ActorId, cue: &GameplayTag, params: &CueParams);
}
