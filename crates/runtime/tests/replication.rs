mod common;

use std::sync::Arc;

use common::{authority, bolt, health, new_log, proxy, spawn_caster, spawn_target};
use skill_core::{CarrierKind, ClassRegistry, ParameterSource, SkillDefinition};
use skill_core::handler::pierce::PIERCE_COUNT_PARAM;
use skill_runtime::{CarrierSnapshot, ReplicationError, RuntimeError};

fn spark() -> Arc<SkillDefinition> {
    Arc::new(SkillDefinition {
        parameters: vec![ParameterSource::Pierce { count: 2 }],
        ..bolt("Spark", 10.0, &[ClassRegistry::PIERCE_HANDLER])
    })
}

#[test]
fn proxy_rebuilds_carrier_without_handlers_or_damage() {
    let log = new_log();
    let mut server = authority(&log);
    let caster = spawn_caster(&mut server);
    let report = server.cast(caster, &spark()).expect("cast should succeed");

    let snapshots = server.snapshot_carriers().expect("snapshot should encode");
    assert_eq!(snapshots.len(), 1);
    let bytes = snapshots[0].encode().expect("snapshot should serialize");

    let mut client = proxy(&log);
    let client_caster = spawn_caster(&mut client);
    assert_eq!(client_caster, caster);
    let target = spawn_target(&mut client, 200.0);

    let snapshot = CarrierSnapshot::decode(&bytes).expect("snapshot should deserialize");
    let id = client.apply_snapshot(&snapshot).expect("proxy should spawn");

    let carrier = client.carriers().get(id).expect("proxy carrier");
    assert_eq!(carrier.kind(), CarrierKind::Projectile);
    assert_eq!(carrier.owner(), Some(caster));
    assert_eq!(carrier.active_handler_count(), 0);

    let spec = carrier.spec();
    assert_eq!(spec.skill_id, report.spec.skill_id);
    assert_eq!(spec.final_damage, report.spec.final_damage);
    assert_eq!(spec.handlers, report.spec.handlers);
    assert_eq!(spec.custom_params.get(PIERCE_COUNT_PARAM, 0.0), 2.0);
    assert!(spec.damage_effect.is_none());

    // proxies move but never resolve hits
    client.run(5, 0.1);
    assert_eq!(health(&client, target), 100.0);
    assert!(client.world().cue_log().events().is_empty());
}

#[test]
fn tampered_spec_fails_digest_check() {
    let log = new_log();
    let mut server = authority(&log);
    let caster = spawn_caster(&mut server);
    server.cast(caster, &spark()).expect("cast should succeed");

    let mut snapshot = server
        .snapshot_carriers()
        .expect("snapshot should encode")
        .remove(0);
    let last = snapshot.spec.len() - 1;
    snapshot.spec[last] ^= 0xff;

    let mut client = proxy(&log);
    let err = client.apply_snapshot(&snapshot).unwrap_err();
    assert!(matches!(
        err,
        RuntimeError::Replication(ReplicationError::DigestMismatch { .. })
    ));
    assert!(client.carriers().is_empty());
}

#[test]
fn snapshot_with_unregistered_class_is_rejected() {
    let log = new_log();
    let mut server = authority(&log);
    let caster = spawn_caster(&mut server);
    server.cast(caster, &spark()).expect("cast should succeed");
    let snapshot = server
        .snapshot_carriers()
        .expect("snapshot should encode")
        .remove(0);

    // a client whose registry lacks the pierce handler
    let mut client = skill_runtime::Simulation::builder()
        .registry(Arc::new(ClassRegistry::new()))
        .proxy()
        .build()
        .expect("proxy should build");
    let err = client.apply_snapshot(&snapshot).unwrap_err();
    assert!(matches!(
        err,
        RuntimeError::Replication(ReplicationError::Wire(_))
    ));
}

#[test]
fn garbage_bytes_fail_to_decode() {
    assert!(matches!(
        CarrierSnapshot::decode(&[0x01, 0x02]),
        Err(ReplicationError::Codec(_))
    ));
}
