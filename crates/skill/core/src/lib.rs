//! Skill composition and mechanic dispatch.
//!
//! Turns authored skill definitions plus an ordered chain of support patches
//! into a final [`SkillSpec`], instantiates stateful mechanic handlers for it,
//! and drives those handlers through one lifecycle shared by projectile,
//! area-effect and minion carriers.
//!
//! # Activation pipeline
//!
//! ```text
//! SkillDefinition --create_base_spec--> SkillSpec
//!        patches (link order) --build_spec--> final SkillSpec
//!        SpecReadyHook, commit, cast cue
//!        handler prototypes --on_cast--> carriers --clone per carrier-->
//!        on_spawn / on_hit / on_tick / on_end
//! ```
//!
//! [`SkillExecutor::activate`] resolves, merges and commits; it either
//! returns a spec or an [`ActivationError`] and never leaves a carrier
//! behind. [`SkillExecutor::execute_effects`] fans the spec out into
//! carriers held by a [`CarrierSet`].
//!
//! # Ownership and authority
//!
//! Handler prototypes belong to one activation. Every carrier clones its own
//! instances, so per-instance state such as pierce counters never leaks
//! between carriers or casts. Damage, hit resolution, net cues and pulse
//! timers only run when [`SkillHost::has_authority`] is true; proxies move,
//! tick handlers and expire.
//!
//! # Wire format
//!
//! A spec replicates as a versioned little-endian record (see
//! [`spec::wire`]). Class references are checked against a
//! [`ClassRegistry`] on read; the damage effect stays on the authority.
//!
//! The host engine is reached only through the traits in [`host`]; the
//! `skill-runtime` crate provides a headless implementation.
//!
//! Modules:
//! - [`spec`]: definitions, patches, merge engine, wire format
//! - [`handler`]: handler protocol and built-in handlers
//! - [`carrier`]: carrier lifecycle controller
//! - [`executor`]: activation and carrier fan-out
pub mod carrier;
pub mod class;
pub mod config;
pub mod effect;
pub mod error;
pub mod executor;
pub mod handler;
pub mod host;
pub mod spec;
pub mod tags;
pub mod types;

#[cfg(test)]
mod test_support;

pub use carrier::{
    AreaBody, AreaState, Carrier, CarrierBody, CarrierPhase, CarrierSet, EndReason, HitOutcome,
    Lifespan, ProjectileBody, ProjectileState,
};
pub use class::{ClassKind, ClassRegistry, HandlerFactory};
pub use config::{SkillConfig, UnknownFieldPolicy};
pub use effect::{EffectContext, EffectSpec};
pub use error::{ErrorSeverity, SkillError};
pub use executor::{
    Activation, ActivationError, ActivationRequest, ExecutionOverride, ExecutionReport,
    SkillExecutor, SpecReadyHook, TargetData, TriggerEvent,
};
pub use handler::{
    BaseHandler, CarrierRef, HandlerSet, HitDecision, HitResult, MechanicHandler, PierceHandler,
};
pub use host::{AbilitySystem, ActorSpawn, CarrierKind, CueParams, CueService, Impact, SkillHost};
pub use spec::{
    CarrierOverrides, CustomParam, CustomParams, ParameterSource, Patch, SkillCues,
    SkillDefinition, SkillSpec, SpecField, SupportDefinition, WireError, build_spec,
};
pub use tags::{GameplayTag, TagSet};
pub use types::{ActorId, CarrierId, ClassId, SkillId, Transform, Vec3};
