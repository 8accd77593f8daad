//! Mechanic handler protocol.
//!
//! A mechanic handler is a stateful plug-in attached to a skill spec. The
//! executor instantiates one prototype per handler class and calls
//! [`MechanicHandler::on_cast`] on it; every spawned carrier then clones its
//! own instances and drives the remaining hooks. Instances are never shared
//! between carriers, so per-instance state (such as pierce counters) is
//! naturally scoped to one carrier.

mod base;
pub mod pierce;
mod set;

pub use base::BaseHandler;
pub use pierce::PierceHandler;
pub use set::{HandlerSet, HitDecision};

use core::fmt;

use crate::host::{AbilitySystem, CarrierKind, Impact, SkillHost};
use crate::spec::SkillSpec;
use crate::types::{ActorId, CarrierId, ClassId, Transform};

/// Decision a handler reports for one hit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum HitResult {
    /// No opinion; the next handler decides.
    Continue,
    /// The carrier ends.
    Stop,
    /// The carrier survives this hit.
    Pierce,
    /// Reserved for retargeting; treated like `Continue`.
    Chain,
}

/// Read-only view of the carrier a hook runs on.
#[derive(Clone, Copy, Debug)]
pub struct CarrierRef<'a> {
    pub id: CarrierId,
    pub kind: CarrierKind,
    pub class: &'a ClassId,
    /// Body actor in the host world.
    pub actor: ActorId,
    /// Actor whose ability component cast the skill.
    pub owner: Option<ActorId>,
    pub transform: Transform,
}

/// Object-safe cloning for boxed handlers.
pub trait HandlerClone {
    fn clone_box(&self) -> Box<dyn MechanicHandler>;
}

impl<T> HandlerClone for T
where
    T: MechanicHandler + Clone + 'static,
{
    fn clone_box(&self) -> Box<dyn MechanicHandler> {
        Box::new(self.clone())
    }
}

impl Clone for Box<dyn MechanicHandler> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// The five-hook handler interface.
///
/// Every hook has a no-op default, so a handler implements only what it
/// reacts to. `on_hit` defaults to [`HitResult::Continue`].
pub trait MechanicHandler: HandlerClone + Send + Sync + fmt::Debug {
    /// Stable name used in logs.
    fn name(&self) -> &'static str;

    /// Called once per activation on the prototype, before any carrier exists.
    fn on_cast(&mut self, _caster: ActorId, _abilities: &mut dyn AbilitySystem, _spec: &SkillSpec) {
    }

    /// Called right after the owning carrier cloned this instance.
    fn on_spawn(&mut self, _carrier: &CarrierRef<'_>, _host: &mut dyn SkillHost, _spec: &SkillSpec) {
    }

    fn on_hit(
        &mut self,
        _carrier: &CarrierRef<'_>,
        _host: &mut dyn SkillHost,
        _target: ActorId,
        _impact: &Impact,
        _spec: &SkillSpec,
    ) -> HitResult {
        HitResult::Continue
    }

    fn on_tick(
        &mut self,
        _carrier: &CarrierRef<'_>,
        _host: &mut dyn SkillHost,
        _dt: f32,
        _spec: &SkillSpec,
    ) {
    }

    /// Called exactly once when the owning carrier ends.
    fn on_end(&mut self, _carrier: &CarrierRef<'_>, _host: &mut dyn SkillHost, _spec: &SkillSpec) {
    }
}
