use tracing::debug;

use super::{CarrierRef, HitResult, MechanicHandler};
use crate::host::{AbilitySystem, Impact, SkillHost};
use crate::spec::SkillSpec;
use crate::types::ActorId;

/// Named handler that traces its hooks and ends carriers on first hit.
///
/// Serves as the default mechanic for skills without specialised behaviour
/// and as a hook tracer when `debug_logging` is on. Ticks are never
/// logged.
#[derive(Clone, Debug)]
pub struct BaseHandler {
    label: String,
    debug_logging: bool,
}

impl BaseHandler {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            debug_logging: false,
        }
    }

    #[must_use]
    pub fn with_debug_logging(mut self, enabled: bool) -> Self {
        self.debug_logging = enabled;
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    fn trace(&self, hook: &'static str, spec: &SkillSpec) {
        if self.debug_logging {
            debug!(handler = %self.label, hook, skill = %spec.skill_id, "mechanic hook");
        }
    }
}

impl MechanicHandler for BaseHandler {
    fn name(&self) -> &'static str {
        "BaseHandler"
    }

    fn on_cast(&mut self, _caster: ActorId, _abilities: &mut dyn AbilitySystem, spec: &SkillSpec) {
        self.trace("on_cast", spec);
    }

    fn on_spawn(&mut self, _carrier: &CarrierRef<'_>, _host: &mut dyn SkillHost, spec: &SkillSpec) {
        self.trace("on_spawn", spec);
    }

    fn on_hit(
        &mut self,
        _carrier: &CarrierRef<'_>,
        _host: &mut dyn SkillHost,
        _target: ActorId,
        _impact: &Impact,
        spec: &SkillSpec,
    ) -> HitResult {
        self.trace("on_hit", spec);
        HitResult::Stop
    }

    fn on_end(&mut self, _carrier: &CarrierRef<'_>, _host: &mut dyn SkillHost, spec: &SkillSpec) {
        self.trace("on_end", spec);
    }
}
