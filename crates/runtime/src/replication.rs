//! Carrier snapshots for replicated instances.
//!
//! A snapshot carries the spec in its wire encoding plus a SHA-256 digest of
//! that encoding. Proxies rebuild the carrier from it without handlers; the
//! authority keeps running mechanics and damage.

use serde::{Deserialize, Serialize};
use skill_core::{
    ActorId, ActorSpawn, Carrier, CarrierId, CarrierKind, CarrierSet, ClassId, ClassRegistry,
    SkillHost, SkillSpec, Transform, WireError, spec::wire,
};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum ReplicationError {
    #[error("spec wire error: {0}")]
    Wire(#[from] WireError),

    #[error("snapshot codec error: {0}")]
    Codec(String),

    #[error("spec digest mismatch for carrier {carrier}")]
    DigestMismatch { carrier: CarrierId },

    #[error("host refused to spawn proxy for carrier {carrier}")]
    SpawnRefused { carrier: CarrierId },
}

/// Replicated state of one carrier at spawn time.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CarrierSnapshot {
    pub carrier: CarrierId,
    pub kind: CarrierKind,
    pub class: ClassId,
    pub owner: Option<ActorId>,
    pub transform: Transform,
    /// Wire-encoded spec.
    pub spec: Vec<u8>,
    pub spec_digest: [u8; 32],
}

impl CarrierSnapshot {
    pub fn capture(carrier: &Carrier) -> Result<Self, ReplicationError> {
        let spec = carrier.spec().to_wire()?;
        let spec_digest = wire::digest(&spec);
        Ok(Self {
            carrier: carrier.id(),
            kind: carrier.kind(),
            class: carrier.class().clone(),
            owner: carrier.owner(),
            transform: carrier.transform(),
            spec,
            spec_digest,
        })
    }

    pub fn encode(&self) -> Result<Vec<u8>, ReplicationError> {
        bincode::serialize(self).map_err(|e| ReplicationError::Codec(e.to_string()))
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, ReplicationError> {
        bincode::deserialize(bytes).map_err(|e| ReplicationError::Codec(e.to_string()))
    }

    /// Checks the carried bytes against the digest, then decodes them.
    pub fn decode_spec(&self, registry: &ClassRegistry) -> Result<SkillSpec, ReplicationError> {
        if wire::digest(&self.spec) != self.spec_digest {
            warn!(
                target: "runtime::replication",
                carrier = %self.carrier,
                "spec digest mismatch"
            );
            return Err(ReplicationError::DigestMismatch {
                carrier: self.carrier,
            });
        }
        Ok(SkillSpec::from_wire(&self.spec, registry)?)
    }
}

/// Rebuilds a snapshot's carrier on a proxy, with no handler instances.
pub fn apply_snapshot(
    snapshot: &CarrierSnapshot,
    registry: &ClassRegistry,
    carriers: &mut CarrierSet,
    host: &mut dyn SkillHost,
) -> Result<CarrierId, ReplicationError> {
    let spec = snapshot.decode_spec(registry)?;
    let request = ActorSpawn {
        class: &snapshot.class,
        kind: snapshot.kind,
        transform: snapshot.transform,
        owner: snapshot.owner,
    };
    let id = carriers
        .spawn(request, &spec, &[], host)
        .ok_or(ReplicationError::SpawnRefused {
            carrier: snapshot.carrier,
        })?;
    debug!(
        target: "runtime::replication",
        source = %snapshot.carrier,
        proxy = %id,
        skill = %spec.skill_id,
        "proxy carrier spawned"
    );
    Ok(id)
}
