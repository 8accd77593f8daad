use tracing::debug;

use super::{CarrierRef, HitResult, MechanicHandler};
use crate::host::{Impact, SkillHost};
use crate::spec::SkillSpec;
use crate::types::{ActorId, CarrierId};

/// Outcome of running the hit chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HitDecision {
    pub result: HitResult,
    /// Handler that decided, or `None` when the chain fell through.
    pub decided_by: Option<&'static str>,
}

/// Ordered handler instances owned by one carrier.
#[derive(Debug, Default)]
pub struct HandlerSet {
    owner: Option<CarrierId>,
    handlers: Vec<Box<dyn MechanicHandler>>,
}

impl HandlerSet {
    pub fn new(owner: CarrierId) -> Self {
        Self {
            owner: Some(owner),
            handlers: Vec::new(),
        }
    }

    /// Carrier that owns these instances.
    pub fn owner(&self) -> Option<CarrierId> {
        self.owner
    }

    /// Clones `prototype` into the set and fires its `on_spawn`.
    pub fn adopt(
        &mut self,
        prototype: &dyn MechanicHandler,
        carrier: &CarrierRef<'_>,
        host: &mut dyn SkillHost,
        spec: &SkillSpec,
    ) {
        let mut handler = prototype.clone_box();
        handler.on_spawn(carrier, host, spec);
        self.handlers.push(handler);
    }

    /// Runs `on_hit` in order until a handler returns `Stop` or `Pierce`.
    ///
    /// `Continue` and `Chain` pass to the next handler. An empty set or a
    /// chain that falls through resolves to `Stop`.
    pub fn resolve_hit(
        &mut self,
        carrier: &CarrierRef<'_>,
        host: &mut dyn SkillHost,
        target: ActorId,
        impact: &Impact,
        spec: &SkillSpec,
    ) -> HitDecision {
        for handler in &mut self.handlers {
            let result = handler.on_hit(carrier, host, target, impact, spec);
            debug!(
                carrier = %carrier.id,
                handler = handler.name(),
                %target,
                result = %result,
                "hit handler"
            );
            if matches!(result, HitResult::Stop | HitResult::Pierce) {
                return HitDecision {
                    result,
                    decided_by: Some(handler.name()),
                };
            }
        }
        HitDecision {
            result: HitResult::Stop,
            decided_by: None,
        }
    }

    /// Runs `on_hit` on every handler for side effects; results are ignored.
    pub fn notify_hit(
        &mut self,
        carrier: &CarrierRef<'_>,
        host: &mut dyn SkillHost,
        target: ActorId,
        impact: &Impact,
        spec: &SkillSpec,
    ) {
        for handler in &mut self.handlers {
            let _ = handler.on_hit(carrier, host, target, impact, spec);
        }
    }

    pub fn tick(
        &mut self,
        carrier: &CarrierRef<'_>,
        host: &mut dyn SkillHost,
        dt: f32,
        spec: &SkillSpec,
    ) {
        for handler in &mut self.handlers {
            handler.on_tick(carrier, host, dt, spec);
        }
    }

    /// Fires `on_end` on every handler, then releases them.
    pub fn end(&mut self, carrier: &CarrierRef<'_>, host: &mut dyn SkillHost, spec: &SkillSpec) {
        for handler in &mut self.handlers {
            handler.on_end(carrier, host, spec);
        }
        self.handlers.clear();
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.handlers.iter().map(|h| h.name())
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}
