use std::collections::BTreeMap;

use tracing::warn;

use super::{Carrier, EndReason};
use crate::config::SkillConfig;
use crate::handler::MechanicHandler;
use crate::host::{ActorSpawn, SkillHost};
use crate::spec::SkillSpec;
use crate::types::CarrierId;

/// Arena of live carriers, iterated in spawn order.
#[derive(Debug)]
pub struct CarrierSet {
    config: SkillConfig,
    carriers: BTreeMap<CarrierId, Carrier>,
    next_id: u32,
}

impl CarrierSet {
    pub fn new(config: SkillConfig) -> Self {
        Self {
            config,
            carriers: BTreeMap::new(),
            next_id: 1,
        }
    }

    pub fn config(&self) -> &SkillConfig {
        &self.config
    }

    /// Spawns a body through the host and initialises a carrier on it.
    ///
    /// Returns `None` if the host refuses the spawn.
    pub fn spawn(
        &mut self,
        request: ActorSpawn<'_>,
        spec: &SkillSpec,
        prototypes: &[Box<dyn MechanicHandler>],
        host: &mut dyn SkillHost,
    ) -> Option<CarrierId> {
        let ActorSpawn {
            class,
            kind,
            transform,
            owner,
        } = request.clone();
        let Some(actor) = host.spawn_actor(request) else {
            warn!(%class, %kind, "host refused to spawn carrier body");
            return None;
        };

        let id = CarrierId(self.next_id);
        self.next_id += 1;

        let mut carrier = Carrier::spawned(id, kind, class.clone(), actor, transform);
        carrier.init_from_spec(spec, owner, prototypes, &self.config, host);
        self.carriers.insert(id, carrier);
        Some(id)
    }

    /// Ticks every carrier, then drops the ones that ended.
    pub fn tick(&mut self, dt: f32, host: &mut dyn SkillHost) {
        for carrier in self.carriers.values_mut() {
            carrier.tick(dt, host);
        }
        self.purge();
    }

    /// Ends and drops one carrier. False if it does not exist.
    pub fn remove(&mut self, id: CarrierId, host: &mut dyn SkillHost) -> bool {
        match self.carriers.remove(&id) {
            Some(mut carrier) => {
                carrier.end(EndReason::Removed, host);
                true
            }
            None => false,
        }
    }

    /// Ends every carrier.
    pub fn clear(&mut self, host: &mut dyn SkillHost) {
        for (_, mut carrier) in std::mem::take(&mut self.carriers) {
            carrier.end(EndReason::Removed, host);
        }
    }

    pub fn get(&self, id: CarrierId) -> Option<&Carrier> {
        self.carriers.get(&id)
    }

    pub fn get_mut(&mut self, id: CarrierId) -> Option<&mut Carrier> {
        self.carriers.get_mut(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Carrier> {
        self.carriers.values()
    }

    pub fn len(&self) -> usize {
        self.carriers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.carriers.is_empty()
    }

    fn purge(&mut self) {
        self.carriers.retain(|_, carrier| !carrier.is_destroyed());
    }
}

impl Default for CarrierSet {
    fn default() -> Self {
        Self::new(SkillConfig::default())
    }
}
