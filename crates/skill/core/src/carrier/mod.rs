//! Carrier lifecycle controller.
//!
//! A carrier is the in-world embodiment of one activation: a projectile, an
//! area effect or a minion. All three share one lifecycle:
//!
//! ```text
//! Spawned --init_from_spec--> Active --end(reason)--> Destroyed
//! ```
//!
//! While active, each frame runs the variant behaviour (movement, pulses),
//! then `on_tick` on every handler, then the lifespan countdown. Ending is
//! idempotent and fires `on_end` on every handler exactly once before the
//! body actor is destroyed.
//!
//! Gameplay mutation (damage, hit resolution, net cues, pulse timers) only
//! runs when the host reports authority. Proxies still move and tick.
//!
//! # Variants
//!
//! - Projectile: moves `speed * dt` along its forward axis and sweeps the
//!   travelled segment. Impacts resolve nearest first; each target is hit at
//!   most once. The handler chain decides: the first `Stop` or `Pierce`
//!   wins, and a chain that falls through stops the projectile. Travel
//!   beyond `max_range` ends it.
//! - Area effect: pulses every `max(0.05, Area.TickInterval or 1.0)` seconds,
//!   damaging and notifying every overlapping actor. It ticks only with
//!   handlers or a damage effect, and pulses once on spawn when it can deal
//!   damage. At most one pulse fires per tick.
//! - Minion: no variant behaviour. Hits are forwarded to handlers for side
//!   effects; their decisions never end the minion.
//!
//! Areas and minions ignore hit decisions, so only projectiles end through
//! [`EndReason::HitStop`].

pub mod area;
mod minion;
mod projectile;
mod set;

pub use area::{AreaBody, AreaState, TICK_INTERVAL_PARAM};
pub use minion::MinionBody;
pub use projectile::{ProjectileBody, ProjectileState};
pub use set::CarrierSet;

use tracing::{debug, warn};

use crate::config::SkillConfig;
use crate::handler::{CarrierRef, HandlerSet, MechanicHandler};
use crate::host::{CarrierKind, Impact, SkillHost};
use crate::spec::SkillSpec;
use crate::tags::native;
use crate::types::{ActorId, CarrierId, ClassId, Transform};

#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum CarrierPhase {
    /// Body exists, spec not handed off yet.
    Spawned,
    Active,
    Destroyed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum EndReason {
    /// A hit resolved to `Stop`.
    HitStop,
    Expired,
    RangeExceeded,
    /// Removed by the owner of the carrier set.
    Removed,
}

/// What a call to [`Carrier::handle_impact`] did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HitOutcome {
    /// Not a valid hit (no authority, self, owner, repeat target, ended).
    Ignored,
    /// Projectile resolved the hit and keeps flying.
    Survived,
    /// Projectile resolved the hit and ended.
    Ended,
    /// Area or minion dispatched the hit to its handlers.
    Notified,
}

/// Simulation-clock countdown. Unbounded when the spec lifetime is `<= 0`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Lifespan {
    Unbounded,
    Remaining(f32),
}

impl Lifespan {
    pub fn from_lifetime(lifetime: f32) -> Self {
        if lifetime > 0.0 {
            Self::Remaining(lifetime)
        } else {
            Self::Unbounded
        }
    }

    /// Advances the countdown; true once it has run out.
    pub fn advance(&mut self, dt: f32) -> bool {
        match self {
            Self::Unbounded => false,
            Self::Remaining(left) => {
                *left -= dt;
                *left <= 0.0
            }
        }
    }
}

/// Variant-specific state.
#[derive(Clone, Debug)]
pub enum CarrierBody {
    Projectile(ProjectileBody),
    Area(AreaBody),
    Minion(MinionBody),
}

impl CarrierBody {
    fn for_kind(kind: CarrierKind) -> Self {
        match kind {
            CarrierKind::Projectile => Self::Projectile(ProjectileBody::default()),
            CarrierKind::AreaEffect => Self::Area(AreaBody::default()),
            CarrierKind::Minion => Self::Minion(MinionBody::default()),
        }
    }
}

#[derive(Debug)]
pub struct Carrier {
    id: CarrierId,
    kind: CarrierKind,
    class: ClassId,
    actor: ActorId,
    owner: Option<ActorId>,
    transform: Transform,
    spec: SkillSpec,
    handlers: HandlerSet,
    lifespan: Lifespan,
    phase: CarrierPhase,
    tick_enabled: bool,
    body: CarrierBody,
}

impl Carrier {
    /// Wraps a freshly spawned body actor. Call [`init_from_spec`](Self::init_from_spec) next.
    pub fn spawned(
        id: CarrierId,
        kind: CarrierKind,
        class: ClassId,
        actor: ActorId,
        transform: Transform,
    ) -> Self {
        Self {
            id,
            kind,
            class,
            actor,
            owner: None,
            transform,
            spec: SkillSpec::default(),
            handlers: HandlerSet::new(id),
            lifespan: Lifespan::Unbounded,
            phase: CarrierPhase::Spawned,
            tick_enabled: false,
            body: CarrierBody::for_kind(kind),
        }
    }

    /// Hands a built spec to the carrier.
    ///
    /// Copies the spec, records the owning actor, clones every prototype
    /// (firing `on_spawn` per clone), starts the lifespan and runs the
    /// variant initialisation. Only valid once, on a `Spawned` carrier.
    pub fn init_from_spec(
        &mut self,
        spec: &SkillSpec,
        owner: Option<ActorId>,
        prototypes: &[Box<dyn MechanicHandler>],
        config: &SkillConfig,
        host: &mut dyn SkillHost,
    ) {
        if self.phase != CarrierPhase::Spawned {
            warn!(carrier = %self.id, phase = %self.phase, "init_from_spec on an initialised carrier");
            return;
        }

        self.spec = spec.clone();
        self.owner = owner;
        self.lifespan = Lifespan::from_lifetime(spec.lifetime);
        self.phase = CarrierPhase::Active;

        {
            let (view, handlers, spec) = self.split();
            for prototype in prototypes {
                handlers.adopt(prototype.as_ref(), &view, host, spec);
            }
        }

        match self.kind {
            CarrierKind::Projectile => self.init_projectile(config),
            CarrierKind::AreaEffect => self.init_area(config, host),
            CarrierKind::Minion => self.init_minion(),
        }

        debug!(
            carrier = %self.id,
            kind = %self.kind,
            skill = %self.spec.skill_id,
            handlers = self.handlers.len(),
            lifespan = ?self.lifespan,
            "carrier initialised"
        );
    }

    /// Advances one frame.
    pub fn tick(&mut self, dt: f32, host: &mut dyn SkillHost) {
        if self.phase != CarrierPhase::Active {
            return;
        }

        if self.tick_enabled {
            match self.kind {
                CarrierKind::Projectile => self.tick_projectile(dt, host),
                CarrierKind::AreaEffect => self.tick_area(dt, host),
                CarrierKind::Minion => {}
            }

            if self.phase == CarrierPhase::Active && !self.handlers.is_empty() {
                let (view, handlers, spec) = self.split();
                handlers.tick(&view, host, dt, spec);
            }
        }

        if self.phase == CarrierPhase::Active && self.lifespan.advance(dt) {
            self.end(EndReason::Expired, host);
        }
    }

    /// Dispatches an impact according to the carrier variant.
    ///
    /// Projectiles run the full hit chain and enforce its decision. Areas
    /// and minions forward the hit to their handlers and ignore the results.
    pub fn handle_impact(&mut self, impact: &Impact, host: &mut dyn SkillHost) -> HitOutcome {
        if self.phase != CarrierPhase::Active {
            return HitOutcome::Ignored;
        }
        let Some(target) = impact.actor else {
            return HitOutcome::Ignored;
        };
        if target == self.actor || Some(target) == self.owner {
            return HitOutcome::Ignored;
        }

        match self.kind {
            CarrierKind::Projectile => self.resolve_projectile_hit(target, impact, host),
            CarrierKind::AreaEffect | CarrierKind::Minion => {
                let (view, handlers, spec) = self.split();
                handlers.notify_hit(&view, host, target, impact, spec);
                HitOutcome::Notified
            }
        }
    }

    /// Ends the carrier: `on_end` on every handler, release, destroy the body.
    ///
    /// Returns false if the carrier had already ended.
    pub fn end(&mut self, reason: EndReason, host: &mut dyn SkillHost) -> bool {
        if self.phase == CarrierPhase::Destroyed {
            return false;
        }

        {
            let (view, handlers, spec) = self.split();
            handlers.end(&view, host, spec);
        }
        host.destroy_actor(self.actor);
        self.phase = CarrierPhase::Destroyed;
        self.tick_enabled = false;

        debug!(carrier = %self.id, kind = %self.kind, %reason, "carrier ended");
        true
    }

    pub fn id(&self) -> CarrierId {
        self.id
    }

    pub fn kind(&self) -> CarrierKind {
        self.kind
    }

    pub fn class(&self) -> &ClassId {
        &self.class
    }

    pub fn actor(&self) -> ActorId {
        self.actor
    }

    pub fn owner(&self) -> Option<ActorId> {
        self.owner
    }

    pub fn transform(&self) -> Transform {
        self.transform
    }

    pub fn spec(&self) -> &SkillSpec {
        &self.spec
    }

    pub fn phase(&self) -> CarrierPhase {
        self.phase
    }

    pub fn is_active(&self) -> bool {
        self.phase == CarrierPhase::Active
    }

    pub fn is_destroyed(&self) -> bool {
        self.phase == CarrierPhase::Destroyed
    }

    pub fn tick_enabled(&self) -> bool {
        self.tick_enabled
    }

    pub fn lifespan(&self) -> Lifespan {
        self.lifespan
    }

    pub fn body(&self) -> &CarrierBody {
        &self.body
    }

    pub fn handlers(&self) -> &HandlerSet {
        &self.handlers
    }

    pub fn active_handler_count(&self) -> usize {
        self.handlers.len()
    }

    /// Read-only view handed to handler hooks.
    pub fn view(&self) -> CarrierRef<'_> {
        CarrierRef {
            id: self.id,
            kind: self.kind,
            class: &self.class,
            actor: self.actor,
            owner: self.owner,
            transform: self.transform,
        }
    }

    fn split(&mut self) -> (CarrierRef<'_>, &mut HandlerSet, &SkillSpec) {
        let view = CarrierRef {
            id: self.id,
            kind: self.kind,
            class: &self.class,
            actor: self.actor,
            owner: self.owner,
            transform: self.transform,
        };
        (view, &mut self.handlers, &self.spec)
    }

    /// Applies the spec's damage effect from the owner to `target`.
    ///
    /// Skipped without a damage effect, an owner, or a target ability component.
    fn apply_damage(&self, target: ActorId, host: &mut dyn SkillHost) -> bool {
        let (Some(effect), Some(owner)) = (&self.spec.damage_effect, self.owner) else {
            return false;
        };

        let abilities = host.abilities();
        if !abilities.has_component(target) {
            debug!(carrier = %self.id, %target, "target has no ability component");
            return false;
        }

        let mut context = abilities.make_effect_context(owner);
        context.add_source_object(self.actor);
        let Some(mut outgoing) = abilities.make_outgoing_spec(owner, effect, 1.0, context) else {
            warn!(carrier = %self.id, %effect, %owner, "could not build outgoing damage spec");
            return false;
        };
        outgoing.set_by_caller_magnitude(native::data_damage(), self.spec.final_damage);
        abilities.apply_effect_spec_to_target(&outgoing, target)
    }
}
