mod common;

use std::sync::Arc;

use common::{RECORDER, authority, bolt, health, new_log, spawn_caster, spawn_target};
use skill_core::tags::native;
use skill_core::{ClassRegistry, ParameterSource, SkillDefinition};

fn piercing_bolt(count: u32) -> SkillDefinition {
    SkillDefinition {
        parameters: vec![ParameterSource::Pierce { count }],
        ..bolt("Spark", 10.0, &[ClassRegistry::PIERCE_HANDLER])
    }
}

#[test]
fn pierce_two_passes_through_two_targets_and_stops_on_the_third() {
    let log = new_log();
    let mut sim = authority(&log);
    let caster = spawn_caster(&mut sim);
    let targets = [
        spawn_target(&mut sim, 200.0),
        spawn_target(&mut sim, 400.0),
        spawn_target(&mut sim, 600.0),
    ];

    sim.cast(caster, &Arc::new(piercing_bolt(2)))
        .expect("cast should succeed");
    sim.run(20, 0.1);

    for target in targets {
        assert_eq!(health(&sim, target), 90.0);
    }
    assert_eq!(health(&sim, caster), 100.0);
    assert!(sim.carriers().is_empty());

    let impacts = sim
        .world()
        .cue_log()
        .matching(&native::projectile_impact_cue())
        .count();
    assert_eq!(impacts, 3);
}

#[test]
fn pierce_one_spares_the_third_target() {
    let log = new_log();
    let mut sim = authority(&log);
    let caster = spawn_caster(&mut sim);
    let first = spawn_target(&mut sim, 200.0);
    let second = spawn_target(&mut sim, 400.0);
    let third = spawn_target(&mut sim, 600.0);

    sim.cast(caster, &Arc::new(piercing_bolt(1)))
        .expect("cast should succeed");
    sim.run(20, 0.1);

    assert_eq!(health(&sim, first), 90.0);
    assert_eq!(health(&sim, second), 90.0);
    assert_eq!(health(&sim, third), 100.0);
}

#[test]
fn without_handlers_the_first_hit_ends_the_projectile() {
    let log = new_log();
    let mut sim = authority(&log);
    let caster = spawn_caster(&mut sim);
    let first = spawn_target(&mut sim, 200.0);
    let second = spawn_target(&mut sim, 400.0);

    sim.cast(caster, &Arc::new(bolt("Bolt", 25.0, &[])))
        .expect("cast should succeed");
    sim.run(20, 0.1);

    assert_eq!(health(&sim, first), 75.0);
    assert_eq!(health(&sim, second), 100.0);
}

#[test]
fn continue_defers_to_the_next_handler() {
    let log = new_log();
    let mut sim = authority(&log);
    let caster = spawn_caster(&mut sim);
    let first = spawn_target(&mut sim, 200.0);
    let second = spawn_target(&mut sim, 400.0);

    let skill = SkillDefinition {
        parameters: vec![ParameterSource::Pierce { count: 1 }],
        ..bolt("Spark", 10.0, &[RECORDER, ClassRegistry::PIERCE_HANDLER])
    };
    sim.cast(caster, &Arc::new(skill)).expect("cast should succeed");
    sim.run(20, 0.1);

    assert_eq!(health(&sim, first), 90.0);
    assert_eq!(health(&sim, second), 90.0);
}

#[test]
fn concurrent_projectiles_keep_separate_pierce_counters() {
    let log = new_log();
    let mut sim = authority(&log);
    let caster = spawn_caster(&mut sim);
    let first = spawn_target(&mut sim, 200.0);
    let second = spawn_target(&mut sim, 400.0);
    let third = spawn_target(&mut sim, 600.0);

    let spark = Arc::new(piercing_bolt(1));
    sim.cast(caster, &spark).expect("first cast should succeed");
    sim.cast(caster, &spark).expect("second cast should succeed");
    assert_eq!(sim.carriers().len(), 2);

    sim.run(20, 0.1);

    // both bolts pierce the first target and stop on the second
    assert_eq!(health(&sim, first), 80.0);
    assert_eq!(health(&sim, second), 80.0);
    assert_eq!(health(&sim, third), 100.0);
}

#[test]
fn projectile_ends_at_max_range() {
    let log = new_log();
    let mut sim = authority(&log);
    let caster = spawn_caster(&mut sim);
    let beyond = spawn_target(&mut sim, 1500.0);

    sim.cast(caster, &Arc::new(bolt("Bolt", 10.0, &[])))
        .expect("cast should succeed");
    let frames = sim.run(50, 0.1);

    assert!(frames < 50);
    assert!(sim.carriers().is_empty());
    assert_eq!(health(&sim, beyond), 100.0);
}
