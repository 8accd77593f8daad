//! Headless world implementing [`SkillHost`].
//!
//! Characters are spheres with an optional ability component. Carrier bodies
//! are tracked so their transforms can be queried, but only characters take
//! part in overlap and sweep queries.

use std::collections::BTreeMap;

use skill_core::{
    AbilitySystem, ActorId, ActorSpawn, CarrierKind, ClassId, CueService, Impact, SkillHost,
    Transform, Vec3,
};
use tracing::{debug, trace};

use crate::abilities::{AbilityComponent, AbilityComponents, EffectLibrary};
use crate::cues::CueLog;

/// Radius given to carrier bodies; they are never collision targets.
const CARRIER_BODY_RADIUS: f32 = 0.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActorKind {
    Character,
    Carrier(CarrierKind),
}

#[derive(Clone, Debug, PartialEq)]
pub struct ActorRecord {
    pub name: String,
    pub kind: ActorKind,
    pub transform: Transform,
    pub radius: f32,
    pub owner: Option<ActorId>,
    pub class: Option<ClassId>,
}

#[derive(Debug)]
pub struct SandboxWorld {
    authority: bool,
    actors: BTreeMap<ActorId, ActorRecord>,
    next_actor: u32,
    abilities: AbilityComponents,
    cues: CueLog,
    refuse_spawns: bool,
}

impl SandboxWorld {
    pub fn new(authority: bool, effects: EffectLibrary) -> Self {
        Self {
            authority,
            actors: BTreeMap::new(),
            next_actor: 1,
            abilities: AbilityComponents::new(effects),
            cues: CueLog::new(authority),
            refuse_spawns: false,
        }
    }

    /// World of the instance that owns gameplay state.
    pub fn authority(effects: EffectLibrary) -> Self {
        Self::new(true, effects)
    }

    /// World of a replicated instance.
    pub fn proxy(effects: EffectLibrary) -> Self {
        Self::new(false, effects)
    }

    pub fn spawn_character(
        &mut self,
        name: impl Into<String>,
        transform: Transform,
        radius: f32,
    ) -> ActorId {
        let name = name.into();
        let id = self.insert(ActorRecord {
            name,
            kind: ActorKind::Character,
            transform,
            radius,
            owner: None,
            class: None,
        });
        debug!(target: "runtime::world", actor = %id, "character spawned");
        id
    }

    /// Gives `actor` a fresh ability component. False if it is unknown or
    /// already has one.
    pub fn add_ability_component(&mut self, actor: ActorId) -> bool {
        self.actors.contains_key(&actor) && self.abilities.attach(actor)
    }

    pub fn ability_component(&self, actor: ActorId) -> Option<&AbilityComponent> {
        self.abilities.get(actor)
    }

    pub fn ability_component_mut(&mut self, actor: ActorId) -> Option<&mut AbilityComponent> {
        self.abilities.get_mut(actor)
    }

    pub fn ability_components(&self) -> &AbilityComponents {
        &self.abilities
    }

    pub fn ability_components_mut(&mut self) -> &mut AbilityComponents {
        &mut self.abilities
    }

    pub fn cue_log(&self) -> &CueLog {
        &self.cues
    }

    pub fn cue_log_mut(&mut self) -> &mut CueLog {
        &mut self.cues
    }

    /// Makes every later `spawn_actor` call fail.
    pub fn set_refuse_spawns(&mut self, refuse: bool) {
        self.refuse_spawns = refuse;
    }

    pub fn actor(&self, id: ActorId) -> Option<&ActorRecord> {
        self.actors.get(&id)
    }

    pub fn actors(&self) -> impl Iterator<Item = (ActorId, &ActorRecord)> {
        self.actors.iter().map(|(id, record)| (*id, record))
    }

    /// Live carrier bodies of the given kind.
    pub fn carrier_bodies(&self, kind: CarrierKind) -> impl Iterator<Item = (ActorId, &ActorRecord)> {
        self.actors()
            .filter(move |(_, record)| record.kind == ActorKind::Carrier(kind))
    }

    fn insert(&mut self, record: ActorRecord) -> ActorId {
        let id = ActorId(self.next_actor);
        self.next_actor += 1;
        self.actors.insert(id, record);
        id
    }

    /// Living characters; a character without a component is always alive.
    fn targets(&self) -> impl Iterator<Item = (ActorId, &ActorRecord)> {
        self.actors().filter(|(id, record)| {
            record.kind == ActorKind::Character
                && self
                    .abilities
                    .get(*id)
                    .is_none_or(|c| c.attributes().is_alive())
        })
    }
}

impl SkillHost for SandboxWorld {
    fn has_authority(&self) -> bool {
        self.authority
    }

    fn actor_transform(&self, actor: ActorId) -> Option<Transform> {
        self.actors.get(&actor).map(|record| record.transform)
    }

    fn spawn_actor(&mut self, spawn: ActorSpawn<'_>) -> Option<ActorId> {
        if self.refuse_spawns {
            return None;
        }
        let id = self.insert(ActorRecord {
            name: spawn.class.to_string(),
            kind: ActorKind::Carrier(spawn.kind),
            transform: spawn.transform,
            radius: CARRIER_BODY_RADIUS,
            owner: spawn.owner,
            class: Some(spawn.class.clone()),
        });
        trace!(target: "runtime::world", actor = %id, class = %spawn.class, "carrier body spawned");
        Some(id)
    }

    fn set_actor_transform(&mut self, actor: ActorId, transform: Transform) {
        if let Some(record) = self.actors.get_mut(&actor) {
            record.transform = transform;
        }
    }

    fn destroy_actor(&mut self, actor: ActorId) {
        if self.actors.remove(&actor).is_some() {
            self.abilities.detach(actor);
            trace!(target: "runtime::world", %actor, "actor destroyed");
        }
    }

    fn overlapping_actors(&self, center: Vec3, radius: f32) -> Vec<ActorId> {
        self.targets()
            .filter(|(_, record)| {
                record.transform.location.distance(center) <= radius + record.radius
            })
            .map(|(id, _)| id)
            .collect()
    }

    fn sweep(&self, from: Vec3, to: Vec3, radius: f32) -> Vec<Impact> {
        let mut impacts: Vec<Impact> = self
            .targets()
            .filter_map(|(id, record)| {
                sweep_sphere(from, to, record.transform.location, radius + record.radius)
                    .map(|(location, distance)| Impact {
                        actor: Some(id),
                        location,
                        normal: (location - record.transform.location).normalized(),
                        distance,
                    })
            })
            .collect();
        impacts.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        impacts
    }

    fn abilities(&mut self) -> &mut dyn AbilitySystem {
        &mut self.abilities
    }

    fn cues(&mut self) -> &mut dyn CueService {
        &mut self.cues
    }
}

/// First point where the segment `from..to` enters the sphere, with its
/// distance from `from`.
fn sweep_sphere(from: Vec3, to: Vec3, center: Vec3, radius: f32) -> Option<(Vec3, f32)> {
    let offset = from - center;
    let c = offset.dot(offset) - radius * radius;
    if c <= 0.0 {
        return Some((from, 0.0));
    }

    let length = from.distance(to);
    if length <= f32::EPSILON {
        return None;
    }
    let dir = (to - from) * (1.0 / length);
    let b = offset.dot(dir);
    if b > 0.0 {
        return None;
    }
    let discriminant = b * b - c;
    if discriminant < 0.0 {
        return None;
    }
    let t = -b - discriminant.sqrt();
    (t <= length).then(|| (from + dir * t, t))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn world() -> SandboxWorld {
        SandboxWorld::authority(EffectLibrary::new())
    }

    #[test]
    fn sweep_orders_impacts_by_distance() {
        let mut world = world();
        let far = world.spawn_character("far", Transform::at(Vec3::new(300.0, 0.0, 0.0)), 20.0);
        let near = world.spawn_character("near", Transform::at(Vec3::new(100.0, 0.0, 0.0)), 20.0);
        world.spawn_character("aside", Transform::at(Vec3::new(200.0, 500.0, 0.0)), 20.0);

        let impacts = world.sweep(Vec3::ZERO, Vec3::new(400.0, 0.0, 0.0), 10.0);
        let hit: Vec<_> = impacts.iter().filter_map(|i| i.actor).collect();
        assert_eq!(hit, vec![near, far]);
        assert!((impacts[0].distance - 70.0).abs() < 1e-3);
    }

    #[test]
    fn sweep_stops_at_segment_end() {
        let mut world = world();
        world.spawn_character("target", Transform::at(Vec3::new(500.0, 0.0, 0.0)), 20.0);
        assert!(world.sweep(Vec3::ZERO, Vec3::new(100.0, 0.0, 0.0), 10.0).is_empty());
    }

    #[test]
    fn overlaps_ignore_carrier_bodies() {
        let mut world = world();
        let target = world.spawn_character("target", Transform::at(Vec3::new(50.0, 0.0, 0.0)), 10.0);
        let class = ClassId::new("Area.FlameWall");
        world.spawn_actor(ActorSpawn {
            class: &class,
            kind: CarrierKind::AreaEffect,
            transform: Transform::default(),
            owner: None,
        });

        assert_eq!(world.overlapping_actors(Vec3::ZERO, 100.0), vec![target]);
    }

    #[test]
    fn refused_spawn_returns_none() {
        let mut world = world();
        world.set_refuse_spawns(true);
        let class = ClassId::new("Projectile.Fireball");
        let spawned = world.spawn_actor(ActorSpawn {
            class: &class,
            kind: CarrierKind::Projectile,
            transform: Transform::default(),
            owner: None,
        });
        assert!(spawned.is_none());
    }
}
