//! Skill executor: activation and carrier fan-out.
//!
//! ```text
//! activate:        resolve definition -> collect patches -> build_spec
//!                  -> spec-ready hook -> commit -> cast cue
//! execute_effects: instantiate handler prototypes -> on_cast (once each)
//!                  -> spawn projectile / area / minions, each carrier
//!                     cloning its own handler set
//! ```

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::carrier::CarrierSet;
use crate::class::ClassRegistry;
use crate::config::SkillConfig;
use crate::error::{ErrorSeverity, SkillError};
use crate::handler::MechanicHandler;
use crate::host::{ActorSpawn, CarrierKind, CueParams, SkillHost};
use crate::spec::{SkillDefinition, SkillSpec, build_spec};
use crate::types::{ActorId, CarrierId, ClassId, SkillId, Transform, Vec3};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ActivationError {
    #[error("no skill definition could be resolved for {caster}")]
    MissingDefinition { caster: ActorId },

    #[error("skill definition '{display_name}' has no identity")]
    EmptyIdentity { display_name: String },

    #[error("commit failed for skill {skill}")]
    CommitFailed { skill: SkillId },
}

impl SkillError for ActivationError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::CommitFailed { .. } => ErrorSeverity::Recoverable,
            _ => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::MissingDefinition { .. } => "ACTIVATION_MISSING_DEFINITION",
            Self::EmptyIdentity { .. } => "ACTIVATION_EMPTY_IDENTITY",
            Self::CommitFailed { .. } => "ACTIVATION_COMMIT_FAILED",
        }
    }
}

/// Targeting payload of a trigger event. Carried through but never used to
/// resolve a definition.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TargetData {
    pub actors: Vec<ActorId>,
    pub location: Option<Vec3>,
}

/// Gameplay event that triggered an activation.
#[derive(Clone, Debug, Default)]
pub struct TriggerEvent {
    pub payload: Option<Arc<SkillDefinition>>,
    pub target_data: Vec<TargetData>,
}

#[derive(Clone, Debug)]
pub struct ActivationRequest<'a> {
    pub caster: ActorId,
    pub trigger: Option<&'a TriggerEvent>,
    /// Definition the ability was granted with.
    pub source: Option<Arc<SkillDefinition>>,
}

impl ActivationRequest<'_> {
    pub fn from_source(caster: ActorId, source: Arc<SkillDefinition>) -> Self {
        Self {
            caster,
            trigger: None,
            source: Some(source),
        }
    }
}

/// A committed activation, ready for [`SkillExecutor::execute_effects`].
#[derive(Clone, Debug)]
pub struct Activation {
    pub caster: ActorId,
    pub definition: Arc<SkillDefinition>,
    pub spec: SkillSpec,
}

/// Last-chance edit of a freshly built spec, before commit.
pub trait SpecReadyHook: Send + Sync {
    fn on_spec_ready(&mut self, caster: ActorId, spec: &mut SkillSpec);
}

/// Replaces the default carrier spawning.
pub trait ExecutionOverride: Send + Sync {
    /// Returns true if spawning was handled and the default must be skipped.
    fn execute(
        &mut self,
        caster: ActorId,
        spec: &SkillSpec,
        prototypes: &[Box<dyn MechanicHandler>],
        host: &mut dyn SkillHost,
    ) -> bool;
}

/// What one `execute_effects` call produced.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExecutionReport {
    pub handlers: usize,
    pub projectile: Option<CarrierId>,
    pub area: Option<CarrierId>,
    pub minions: Vec<CarrierId>,
    pub overridden: bool,
}

impl ExecutionReport {
    pub fn carriers(&self) -> impl Iterator<Item = CarrierId> + '_ {
        self.projectile
            .iter()
            .chain(self.area.iter())
            .chain(self.minions.iter())
            .copied()
    }
}

pub struct SkillExecutor {
    registry: Arc<ClassRegistry>,
    spec_ready: Option<Box<dyn SpecReadyHook>>,
    execution_override: Option<Box<dyn ExecutionOverride>>,
}

impl SkillExecutor {
    pub fn new(registry: Arc<ClassRegistry>) -> Self {
        Self {
            registry,
            spec_ready: None,
            execution_override: None,
        }
    }

    #[must_use]
    pub fn with_spec_ready_hook(mut self, hook: impl SpecReadyHook + 'static) -> Self {
        self.spec_ready = Some(Box::new(hook));
        self
    }

    #[must_use]
    pub fn with_execution_override(mut self, hook: impl ExecutionOverride + 'static) -> Self {
        self.execution_override = Some(Box::new(hook));
        self
    }

    pub fn registry(&self) -> &Arc<ClassRegistry> {
        &self.registry
    }

    /// Resolves, merges, validates and commits one activation.
    ///
    /// Fails without side effects beyond logging; no carrier exists yet.
    pub fn activate(
        &mut self,
        request: ActivationRequest<'_>,
        host: &mut dyn SkillHost,
    ) -> Result<Activation, ActivationError> {
        let caster = request.caster;
        let Some(definition) = resolve_definition(&request) else {
            error!(%caster, "activation cancelled: no skill definition");
            return Err(ActivationError::MissingDefinition { caster });
        };

        let patches = host.abilities().patches_for_skill(caster, &definition);
        let mut spec = build_spec(&definition, &patches);
        if !spec.has_identity() {
            error!(%caster, display_name = %definition.display_name, "activation aborted: skill has no identity");
            return Err(ActivationError::EmptyIdentity {
                display_name: definition.display_name.clone(),
            });
        }

        if let Some(hook) = self.spec_ready.as_mut() {
            hook.on_spec_ready(caster, &mut spec);
        }

        if !host.abilities().commit_ability(caster, &spec) {
            warn!(%caster, skill = %spec.skill_id, "activation aborted: commit failed");
            return Err(ActivationError::CommitFailed {
                skill: spec.skill_id.clone(),
            });
        }

        if let Some(montage) = &definition.cast_montage {
            debug!(%caster, montage = %montage, "cast montage requested");
        }

        if let Some(cue) = &definition.cues.on_cast {
            let location = host
                .actor_transform(caster)
                .map_or(Vec3::ZERO, |t| t.location);
            let params = CueParams {
                location,
                raw_magnitude: spec.final_damage,
                instigator: Some(caster),
                ..CueParams::default()
            };
            host.cues().play_local_cue(caster, cue, &params);
        }

        info!(
            %caster,
            skill = %spec.skill_id,
            patches = patches.len(),
            final_damage = spec.final_damage,
            handlers = spec.handlers.len(),
            "skill activated"
        );

        Ok(Activation {
            caster,
            definition,
            spec,
        })
    }

    /// Instantiates handler prototypes, fires `on_cast` once on each, then
    /// spawns every carrier the spec names.
    pub fn execute_effects(
        &mut self,
        caster: ActorId,
        spec: &SkillSpec,
        host: &mut dyn SkillHost,
        carriers: &mut CarrierSet,
    ) -> ExecutionReport {
        let mut prototypes: Vec<Box<dyn MechanicHandler>> = Vec::with_capacity(spec.handlers.len());
        for class in &spec.handlers {
            match self.registry.instantiate_handler(class) {
                Some(handler) => prototypes.push(handler),
                None => warn!(%class, skill = %spec.skill_id, "unknown handler class skipped"),
            }
        }

        {
            let abilities = host.abilities();
            for prototype in &mut prototypes {
                prototype.on_cast(caster, abilities, spec);
            }
        }

        let mut report = ExecutionReport {
            handlers: prototypes.len(),
            ..ExecutionReport::default()
        };

        if let Some(hook) = self.execution_override.as_mut() {
            if hook.execute(caster, spec, &prototypes, host) {
                debug!(%caster, skill = %spec.skill_id, "execution handled by override");
                report.overridden = true;
                return report;
            }
        }

        let Some(origin) = host.actor_transform(caster) else {
            warn!(%caster, skill = %spec.skill_id, "caster has no transform; nothing spawned");
            return report;
        };

        if let Some(class) = self.carrier_class(&spec.projectile_class, CarrierKind::Projectile) {
            report.projectile = carriers.spawn(
                launch(class, CarrierKind::Projectile, origin, caster),
                spec,
                &prototypes,
                host,
            );
        }

        if let Some(class) = self.carrier_class(&spec.area_class, CarrierKind::AreaEffect) {
            report.area = carriers.spawn(
                launch(class, CarrierKind::AreaEffect, origin, caster),
                spec,
                &prototypes,
                host,
            );
        }

        if let Some(class) = self.carrier_class(&spec.minion_class, CarrierKind::Minion) {
            // same bounds as a spec read from the wire
            let count = SkillConfig::clamp_summon_count(spec.summon_count);
            let spread = carriers.config().minion_spread;
            for (index, transform) in minion_placements(origin, count, spread).into_iter().enumerate() {
                let spawned = carriers.spawn(
                    launch(class, CarrierKind::Minion, transform, caster),
                    spec,
                    &prototypes,
                    host,
                );
                if let Some(id) = spawned {
                    if let Some(minion) = carriers.get_mut(id) {
                        minion.set_minion_index(index as u32);
                    }
                    report.minions.push(id);
                }
            }
        }

        info!(
            %caster,
            skill = %spec.skill_id,
            handlers = report.handlers,
            carriers = report.carriers().count(),
            "skill effects executed"
        );
        report
    }

    /// Returns `class` if it is registered as the carrier kind's class.
    fn carrier_class<'s>(&self, class: &'s Option<ClassId>, kind: CarrierKind) -> Option<&'s ClassId> {
        let class = class.as_ref()?;
        if self.registry.is_kind(class, kind.class_kind()) {
            Some(class)
        } else {
            warn!(
                %class,
                expected = %kind.class_kind(),
                actual = ?self.registry.kind_of(class),
                "carrier class skipped: wrong or unknown kind"
            );
            None
        }
    }
}

/// Payload first, then target data (passthrough), then the ability source.
fn resolve_definition(request: &ActivationRequest<'_>) -> Option<Arc<SkillDefinition>> {
    if let Some(trigger) = request.trigger {
        if let Some(payload) = &trigger.payload {
            return Some(Arc::clone(payload));
        }
        if !trigger.target_data.is_empty() {
            debug!(
                caster = %request.caster,
                entries = trigger.target_data.len(),
                "target data does not resolve skill definitions"
            );
        }
    }
    request.source.clone()
}

fn launch(class: &ClassId, kind: CarrierKind, transform: Transform, caster: ActorId) -> ActorSpawn<'_> {
    ActorSpawn {
        class,
        kind,
        transform,
        owner: Some(caster),
    }
}

/// Fans `count` minions out along the caster's right axis, centred on the caster.
pub fn minion_placements(origin: Transform, count: i32, spread: f32) -> Vec<Transform> {
    let right = origin.right();
    let centre = (count - 1) as f32 / 2.0;
    (0..count)
        .map(|i| {
            let offset = (i as f32 - centre) * spread;
            origin.with_location(origin.location + right * offset)
        })
        .collect()
}
