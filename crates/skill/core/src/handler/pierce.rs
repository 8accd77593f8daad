use tracing::warn;

use super::{CarrierRef, HitResult, MechanicHandler};
use crate::host::{CarrierKind, Impact, SkillHost};
use crate::spec::SkillSpec;
use crate::types::ActorId;

/// Custom parameter holding the number of targets a projectile passes through.
pub const PIERCE_COUNT_PARAM: &str = "Mechanic.Pierce.Count";

/// Lets a projectile survive a fixed number of hits.
///
/// The counter lives in the instance; each carrier clones its own copy, so
/// concurrent projectiles of the same skill never share pierce state.
#[derive(Clone, Debug, Default)]
pub struct PierceHandler {
    pierces_used: u32,
}

impl PierceHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pierces_used(&self) -> u32 {
        self.pierces_used
    }
}

impl MechanicHandler for PierceHandler {
    fn name(&self) -> &'static str {
        "PierceHandler"
    }

    fn on_hit(
        &mut self,
        carrier: &CarrierRef<'_>,
        _host: &mut dyn SkillHost,
        _target: ActorId,
        _impact: &Impact,
        spec: &SkillSpec,
    ) -> HitResult {
        if carrier.kind != CarrierKind::Projectile {
            warn!(
                carrier = %carrier.id,
                kind = %carrier.kind,
                "pierce handler attached to a non-projectile carrier"
            );
            return HitResult::Continue;
        }

        let total = spec.custom_params.get(PIERCE_COUNT_PARAM, 0.0).floor();
        if total <= 0.0 {
            return HitResult::Stop;
        }
        if (self.pierces_used as f32) < total {
            self.pierces_used += 1;
            HitResult::Pierce
        } else {
            HitResult::Stop
        }
    }
}
