//! Shared fixtures for runtime integration tests.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use skill_core::{
    AbilitySystem, ActorId, CarrierRef, ClassId, ClassKind, ClassRegistry, HitResult, Impact,
    MechanicHandler, SkillDefinition, SkillHost, SkillSpec, Transform, Vec3,
};
use skill_runtime::Simulation;

pub const BOLT: &str = "Projectile.Bolt";
pub const FIELD: &str = "Area.Field";
pub const ZOMBIE: &str = "Minion.Zombie";
pub const DAMAGE: &str = "Effect.Damage";
pub const RECORDER: &str = "Mechanic.Recorder";

pub const TARGET_RADIUS: f32 = 20.0;

pub type HookLog = Arc<Mutex<Vec<String>>>;

/// Handler that appends one line per hook to a shared log.
#[derive(Clone, Debug)]
pub struct RecordingHandler {
    log: HookLog,
}

impl RecordingHandler {
    fn push(&self, line: String) {
        self.log.lock().unwrap().push(line);
    }
}

impl MechanicHandler for RecordingHandler {
    fn name(&self) -> &'static str {
        "RecordingHandler"
    }

    fn on_cast(&mut self, caster: ActorId, _abilities: &mut dyn AbilitySystem, _spec: &SkillSpec) {
        self.push(format!("cast {caster}"));
    }

    fn on_spawn(&mut self, carrier: &CarrierRef<'_>, _host: &mut dyn SkillHost, _spec: &SkillSpec) {
        let owner = carrier.owner.map(|o| o.to_string()).unwrap_or_default();
        self.push(format!("spawn {} owner={owner}", carrier.id));
    }

    fn on_hit(
        &mut self,
        carrier: &CarrierRef<'_>,
        _host: &mut dyn SkillHost,
        target: ActorId,
        _impact: &Impact,
        _spec: &SkillSpec,
    ) -> HitResult {
        self.push(format!("hit {} {target}", carrier.id));
        HitResult::Continue
    }

    fn on_tick(
        &mut self,
        carrier: &CarrierRef<'_>,
        _host: &mut dyn SkillHost,
        _dt: f32,
        _spec: &SkillSpec,
    ) {
        self.push(format!("tick {}", carrier.id));
    }

    fn on_end(&mut self, carrier: &CarrierRef<'_>, _host: &mut dyn SkillHost, _spec: &SkillSpec) {
        self.push(format!("end {}", carrier.id));
    }
}

/// Builtin handlers plus one class of every kind and the recording handler.
pub fn registry(log: &HookLog) -> ClassRegistry {
    let mut registry = ClassRegistry::with_builtin_handlers();
    registry.register(ClassId::new("Ability.SkillBase"), ClassKind::Ability);
    registry.register(ClassId::new(BOLT), ClassKind::Projectile);
    registry.register(ClassId::new(FIELD), ClassKind::AreaEffect);
    registry.register(ClassId::new(ZOMBIE), ClassKind::Minion);
    registry.register(ClassId::new(DAMAGE), ClassKind::Effect);

    let log = Arc::clone(log);
    registry.register_handler(ClassId::new(RECORDER), move || {
        Box::new(RecordingHandler {
            log: Arc::clone(&log),
        })
    });
    registry
}

pub fn new_log() -> HookLog {
    Arc::new(Mutex::new(Vec::new()))
}

pub fn lines(log: &HookLog) -> Vec<String> {
    log.lock().unwrap().clone()
}

pub fn authority(log: &HookLog) -> Simulation {
    Simulation::builder()
        .registry(Arc::new(registry(log)))
        .build()
        .expect("simulation should build")
}

pub fn proxy(log: &HookLog) -> Simulation {
    Simulation::builder()
        .registry(Arc::new(registry(log)))
        .proxy()
        .build()
        .expect("proxy should build")
}

/// Caster at the origin facing +X, with an ability component.
pub fn spawn_caster(sim: &mut Simulation) -> ActorId {
    let world = sim.world_mut();
    let caster = world.spawn_character("caster", Transform::default(), TARGET_RADIUS);
    assert!(world.add_ability_component(caster));
    caster
}

/// Target dummy on the X axis, with an ability component.
pub fn spawn_target(sim: &mut Simulation, x: f32) -> ActorId {
    spawn_target_at(sim, Vec3::new(x, 0.0, 0.0))
}

pub fn spawn_target_at(sim: &mut Simulation, location: Vec3) -> ActorId {
    let world = sim.world_mut();
    let target = world.spawn_character("target", Transform::at(location), TARGET_RADIUS);
    assert!(world.add_ability_component(target));
    target
}

pub fn health(sim: &Simulation, actor: ActorId) -> f32 {
    sim.world()
        .ability_component(actor)
        .expect("actor should have a component")
        .attributes()
        .health()
}

/// Projectile skill flying 100 units per 0.1s frame.
pub fn bolt(id: &str, damage: f32, handlers: &[&str]) -> SkillDefinition {
    SkillDefinition {
        display_name: id.to_owned(),
        base_damage: damage,
        damage_effect: Some(ClassId::new(DAMAGE)),
        speed: 1000.0,
        max_range: 1000.0,
        projectile_class: Some(ClassId::new(BOLT)),
        default_handlers: handlers.iter().map(|h| ClassId::new(*h)).collect(),
        ..SkillDefinition::new(id)
    }
}
