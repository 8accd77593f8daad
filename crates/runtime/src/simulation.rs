//! Frame-driven sandbox simulation.
//!
//! [`Simulation`] owns a [`SandboxWorld`], the live [`CarrierSet`] and a
//! [`SkillExecutor`]. Each [`step`](Simulation::step) advances cooldowns,
//! then ticks every carrier in spawn order.

use std::sync::Arc;

use skill_core::{
    ActivationRequest, ActorId, CarrierId, CarrierSet, ClassRegistry, ExecutionReport, HitOutcome,
    Impact, SkillConfig, SkillDefinition, SkillExecutor, SkillHost, SkillSpec,
};
use tracing::{debug, info, trace};

use crate::abilities::EffectLibrary;
use crate::error::{Result, RuntimeError};
use crate::replication::{self, CarrierSnapshot};
use crate::world::SandboxWorld;

/// Outcome of one successful cast.
#[derive(Clone, Debug)]
pub struct CastReport {
    pub caster: ActorId,
    pub spec: SkillSpec,
    pub execution: ExecutionReport,
}

pub struct Simulation {
    world: SandboxWorld,
    carriers: CarrierSet,
    executor: SkillExecutor,
    frame: u64,
    elapsed: f32,
}

impl Simulation {
    pub fn builder() -> SimulationBuilder {
        SimulationBuilder::new()
    }

    /// Activates `definition` for `caster` and spawns its carriers.
    pub fn cast(&mut self, caster: ActorId, definition: &Arc<SkillDefinition>) -> Result<CastReport> {
        self.activate(ActivationRequest::from_source(caster, Arc::clone(definition)))
    }

    /// Runs a full activation: resolve, merge, commit, execute.
    pub fn activate(&mut self, request: ActivationRequest<'_>) -> Result<CastReport> {
        let caster = request.caster;
        if self.world.actor(caster).is_none() {
            return Err(RuntimeError::UnknownActor(caster));
        }

        let activation = self.executor.activate(request, &mut self.world)?;
        let execution = self.executor.execute_effects(
            caster,
            &activation.spec,
            &mut self.world,
            &mut self.carriers,
        );
        Ok(CastReport {
            caster,
            spec: activation.spec,
            execution,
        })
    }

    /// Advances the world by `dt` seconds.
    pub fn step(&mut self, dt: f32) {
        self.frame += 1;
        self.elapsed += dt;
        self.world.ability_components_mut().advance(dt);
        self.carriers.tick(dt, &mut self.world);
        trace!(
            target: "runtime::simulation",
            frame = self.frame,
            carriers = self.carriers.len(),
            "frame stepped"
        );
    }

    /// Steps `frames` times, stopping early once no carrier is left.
    ///
    /// Returns the number of frames stepped.
    pub fn run(&mut self, frames: u32, dt: f32) -> u32 {
        for stepped in 0..frames {
            if self.carriers.is_empty() {
                debug!(target: "runtime::simulation", frames = stepped, "no carriers left");
                return stepped;
            }
            self.step(dt);
        }
        frames
    }

    /// Fires one pulse of an area carrier now. Returns targets affected.
    pub fn force_pulse(&mut self, carrier: CarrierId) -> usize {
        self.carriers
            .get_mut(carrier)
            .map_or(0, |area| area.force_pulse(&mut self.world))
    }

    /// Delivers a contact the host detected outside the carrier's own
    /// queries, such as a minion's melee swing.
    ///
    /// `None` if the carrier does not exist. A projectile ended by the hit
    /// is dropped on the next step.
    pub fn handle_impact(&mut self, carrier: CarrierId, impact: &Impact) -> Option<HitOutcome> {
        let outcome = self
            .carriers
            .get_mut(carrier)?
            .handle_impact(impact, &mut self.world);
        debug!(
            target: "runtime::simulation",
            %carrier,
            target_actor = ?impact.actor,
            ?outcome,
            "impact delivered"
        );
        Some(outcome)
    }

    /// Ends and drops one carrier.
    pub fn remove_carrier(&mut self, carrier: CarrierId) -> bool {
        self.carriers.remove(carrier, &mut self.world)
    }

    pub fn snapshot_carriers(&self) -> Result<Vec<CarrierSnapshot>> {
        self.carriers
            .iter()
            .filter(|carrier| carrier.is_active())
            .map(|carrier| CarrierSnapshot::capture(carrier).map_err(RuntimeError::from))
            .collect()
    }

    /// Rebuilds a replicated carrier in this simulation.
    pub fn apply_snapshot(&mut self, snapshot: &CarrierSnapshot) -> Result<CarrierId> {
        let registry = Arc::clone(self.executor.registry());
        Ok(replication::apply_snapshot(
            snapshot,
            &registry,
            &mut self.carriers,
            &mut self.world,
        )?)
    }

    /// Ends every carrier.
    pub fn shutdown(&mut self) {
        let live = self.carriers.len();
        self.carriers.clear(&mut self.world);
        info!(
            target: "runtime::simulation",
            frames = self.frame,
            carriers_ended = live,
            "simulation shut down"
        );
    }

    pub fn world(&self) -> &SandboxWorld {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut SandboxWorld {
        &mut self.world
    }

    pub fn carriers(&self) -> &CarrierSet {
        &self.carriers
    }

    pub fn registry(&self) -> &Arc<ClassRegistry> {
        self.executor.registry()
    }

    pub fn has_authority(&self) -> bool {
        self.world.has_authority()
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }
}

/// Builder for [`Simulation`].
///
/// Either a registry or a pre-built executor (carrying hooks) is required.
#[derive(Default)]
pub struct SimulationBuilder {
    config: SkillConfig,
    registry: Option<Arc<ClassRegistry>>,
    executor: Option<SkillExecutor>,
    proxy: bool,
}

impl SimulationBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(mut self, config: SkillConfig) -> Self {
        self.config = config;
        self
    }

    pub fn registry(mut self, registry: Arc<ClassRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Uses `executor` instead of a plain one built from the registry.
    pub fn executor(mut self, executor: SkillExecutor) -> Self {
        self.executor = Some(executor);
        self
    }

    /// Builds a replicated instance without authority.
    pub fn proxy(mut self) -> Self {
        self.proxy = true;
        self
    }

    pub fn build(self) -> Result<Simulation> {
        let executor = match (self.executor, self.registry) {
            (Some(executor), _) => executor,
            (None, Some(registry)) => SkillExecutor::new(registry),
            (None, None) => return Err(RuntimeError::MissingRegistry),
        };

        let effects = EffectLibrary::from_registry(executor.registry());
        let world = if self.proxy {
            SandboxWorld::proxy(effects)
        } else {
            SandboxWorld::authority(effects)
        };

        info!(
            target: "runtime::simulation",
            authority = !self.proxy,
            classes = executor.registry().len(),
            "simulation built"
        );

        Ok(Simulation {
            world,
            carriers: CarrierSet::new(self.config),
            executor,
            frame: 0,
            elapsed: 0.0,
        })
    }
}
