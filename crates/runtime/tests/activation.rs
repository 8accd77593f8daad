mod common;

use std::sync::Arc;

use common::{BOLT, FIELD, authority, bolt, new_log, registry, spawn_caster};
use skill_core::{
    ActivationError, ActivationRequest, ActorId, ClassId, ExecutionOverride, MechanicHandler,
    Patch, SkillDefinition, SkillExecutor, SkillHost, SkillSpec, SpecField, SpecReadyHook,
    SupportDefinition, TargetData, Transform, TriggerEvent,
};
use skill_runtime::{RuntimeError, Simulation};

fn support(id: &str, patch: Patch) -> Arc<SupportDefinition> {
    Arc::new(SupportDefinition {
        support_id: id.to_owned(),
        display_name: id.to_owned(),
        patch,
    })
}

fn mana(sim: &Simulation, actor: ActorId) -> f32 {
    sim.world()
        .ability_component(actor)
        .expect("actor should have a component")
        .attributes()
        .mana()
}

fn is_commit_failure(err: &RuntimeError) -> bool {
    matches!(
        err,
        RuntimeError::Activation(ActivationError::CommitFailed { .. })
    )
}

#[test]
fn linked_supports_shape_the_spec_in_link_order() {
    let log = new_log();
    let mut sim = authority(&log);
    let caster = spawn_caster(&mut sim);
    let skill = Arc::new(bolt("Fireball", 10.0, &[]));

    let component = sim
        .world_mut()
        .ability_component_mut(caster)
        .expect("caster component");
    assert!(component.equip_skill(Arc::clone(&skill)));
    assert!(component.link_support(
        &skill.skill_id,
        support("Added", Patch::new().with_additive(SpecField::FinalDamage, 5.0)),
    ));
    assert!(component.link_support(
        &skill.skill_id,
        support("More", Patch::new().with_multiplicative(SpecField::FinalDamage, 0.5)),
    ));

    let report = sim.cast(caster, &skill).expect("cast should succeed");
    assert_eq!(report.spec.final_damage, 22.5);
}

#[test]
fn empty_identity_aborts_before_commit() {
    let log = new_log();
    let mut sim = authority(&log);
    let caster = spawn_caster(&mut sim);

    let nameless = Arc::new(SkillDefinition {
        display_name: "Nameless".into(),
        cost: 30.0,
        projectile_class: Some(ClassId::new(BOLT)),
        ..SkillDefinition::default()
    });
    let err = sim.cast(caster, &nameless).unwrap_err();

    assert!(matches!(
        err,
        RuntimeError::Activation(ActivationError::EmptyIdentity { ref display_name })
            if display_name == "Nameless"
    ));
    assert!(sim.carriers().is_empty());
    assert_eq!(mana(&sim, caster), 100.0);
}

#[test]
fn caster_without_component_cannot_commit() {
    let log = new_log();
    let mut sim = authority(&log);
    let caster = sim
        .world_mut()
        .spawn_character("bystander", Transform::default(), 20.0);

    let err = sim
        .cast(caster, &Arc::new(bolt("Bolt", 10.0, &[])))
        .unwrap_err();
    assert!(is_commit_failure(&err));
    assert!(sim.carriers().is_empty());
}

#[test]
fn unknown_caster_is_rejected() {
    let log = new_log();
    let mut sim = authority(&log);

    let err = sim
        .cast(ActorId(999), &Arc::new(bolt("Bolt", 10.0, &[])))
        .unwrap_err();
    assert!(matches!(err, RuntimeError::UnknownActor(ActorId(999))));
}

#[test]
fn cooldown_blocks_recast_until_it_elapses() {
    let log = new_log();
    let mut sim = authority(&log);
    let caster = spawn_caster(&mut sim);
    let skill = Arc::new(SkillDefinition {
        cooldown: 1.0,
        ..bolt("Bolt", 10.0, &[])
    });

    sim.cast(caster, &skill).expect("first cast should succeed");
    let err = sim.cast(caster, &skill).unwrap_err();
    assert!(is_commit_failure(&err));

    sim.step(0.5);
    assert!(sim.cast(caster, &skill).is_err());
    sim.step(0.5);
    sim.cast(caster, &skill)
        .expect("cast after cooldown should succeed");
}

#[test]
fn resource_cost_is_paid_on_commit() {
    let log = new_log();
    let mut sim = authority(&log);
    let caster = spawn_caster(&mut sim);
    let skill = Arc::new(SkillDefinition {
        cost: 60.0,
        ..bolt("Bolt", 10.0, &[])
    });

    sim.cast(caster, &skill).expect("first cast should succeed");
    assert_eq!(mana(&sim, caster), 40.0);

    let err = sim.cast(caster, &skill).unwrap_err();
    assert!(is_commit_failure(&err));
    assert_eq!(mana(&sim, caster), 40.0);
}

#[test]
fn trigger_payload_takes_precedence_over_the_source() {
    let log = new_log();
    let mut sim = authority(&log);
    let caster = spawn_caster(&mut sim);

    let trigger = TriggerEvent {
        payload: Some(Arc::new(bolt("FromEvent", 10.0, &[]))),
        target_data: vec![TargetData::default()],
    };
    let report = sim
        .activate(ActivationRequest {
            caster,
            trigger: Some(&trigger),
            source: Some(Arc::new(bolt("FromSource", 10.0, &[]))),
        })
        .expect("activation should succeed");
    assert_eq!(report.spec.skill_id.as_str(), "FromEvent");
}

#[test]
fn target_data_alone_resolves_nothing() {
    let log = new_log();
    let mut sim = authority(&log);
    let caster = spawn_caster(&mut sim);

    let trigger = TriggerEvent {
        payload: None,
        target_data: vec![TargetData {
            actors: vec![caster],
            location: None,
        }],
    };
    let err = sim
        .activate(ActivationRequest {
            caster,
            trigger: Some(&trigger),
            source: None,
        })
        .unwrap_err();
    assert!(matches!(
        err,
        RuntimeError::Activation(ActivationError::MissingDefinition { .. })
    ));
}

struct DoubleDamage;

impl SpecReadyHook for DoubleDamage {
    fn on_spec_ready(&mut self, _caster: ActorId, spec: &mut SkillSpec) {
        spec.final_damage *= 2.0;
    }
}

#[test]
fn spec_ready_hook_edits_the_spec_before_commit() {
    let log = new_log();
    let executor =
        SkillExecutor::new(Arc::new(registry(&log))).with_spec_ready_hook(DoubleDamage);
    let mut sim = Simulation::builder()
        .executor(executor)
        .build()
        .expect("simulation should build");
    let caster = spawn_caster(&mut sim);

    let report = sim
        .cast(caster, &Arc::new(bolt("Bolt", 10.0, &[])))
        .expect("cast should succeed");
    assert_eq!(report.spec.final_damage, 20.0);

    let carrier = report.execution.projectile.expect("projectile spawned");
    assert_eq!(
        sim.carriers().get(carrier).map(|c| c.spec().final_damage),
        Some(20.0)
    );
}

struct SpawnNothing;

impl ExecutionOverride for SpawnNothing {
    fn execute(
        &mut self,
        _caster: ActorId,
        _spec: &SkillSpec,
        prototypes: &[Box<dyn MechanicHandler>],
        _host: &mut dyn SkillHost,
    ) -> bool {
        assert_eq!(prototypes.len(), 1);
        true
    }
}

#[test]
fn execution_override_replaces_default_spawning() {
    let log = new_log();
    let executor =
        SkillExecutor::new(Arc::new(registry(&log))).with_execution_override(SpawnNothing);
    let mut sim = Simulation::builder()
        .executor(executor)
        .build()
        .expect("simulation should build");
    let caster = spawn_caster(&mut sim);

    let report = sim
        .cast(
            caster,
            &Arc::new(bolt("Bolt", 10.0, &[skill_core::ClassRegistry::PIERCE_HANDLER])),
        )
        .expect("cast should succeed");
    assert!(report.execution.overridden);
    assert_eq!(report.execution.carriers().count(), 0);
    assert!(sim.carriers().is_empty());
}

#[test]
fn unknown_and_mismatched_classes_are_skipped() {
    let log = new_log();
    let mut sim = authority(&log);
    let caster = spawn_caster(&mut sim);

    let skill = Arc::new(SkillDefinition {
        projectile_class: Some(ClassId::new("Projectile.Missing")),
        area_class: Some(ClassId::new(BOLT)),
        minion_class: Some(ClassId::new(FIELD)),
        default_handlers: vec![ClassId::new("Mechanic.Missing")],
        ..SkillDefinition::new("Broken")
    });
    let report = sim.cast(caster, &skill).expect("activation itself succeeds");

    assert_eq!(report.execution.handlers, 0);
    assert_eq!(report.execution.carriers().count(), 0);
    assert!(sim.carriers().is_empty());
}

#[test]
fn refused_spawns_leave_no_carrier() {
    let log = new_log();
    let mut sim = authority(&log);
    let caster = spawn_caster(&mut sim);
    sim.world_mut().set_refuse_spawns(true);

    let report = sim
        .cast(caster, &Arc::new(bolt("Bolt", 10.0, &[])))
        .expect("cast should succeed");
    assert!(report.execution.projectile.is_none());
    assert!(sim.carriers().is_empty());
}

#[test]
fn builder_requires_a_registry() {
    assert!(matches!(
        Simulation::builder().build(),
        Err(RuntimeError::MissingRegistry)
    ));
}
