use std::collections::BTreeSet;

use tracing::debug;

use super::{Carrier, CarrierBody, EndReason, HitOutcome};
use crate::config::SkillConfig;
use crate::handler::HitResult;
use crate::host::{CueParams, Impact, SkillHost};
use crate::tags::native;
use crate::types::{ActorId, Vec3};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ProjectileState {
    #[default]
    Flying,
    ResolvingHit,
}

#[derive(Clone, Debug, Default)]
pub struct ProjectileBody {
    pub speed: f32,
    pub velocity: Vec3,
    pub collision_radius: f32,
    /// Distance covered so far, checked against the spec's max range.
    pub travelled: f32,
    pub state: ProjectileState,
    /// Targets already resolved; each is hit at most once.
    pub hit_actors: BTreeSet<ActorId>,
}

impl Carrier {
    pub(super) fn init_projectile(&mut self, config: &SkillConfig) {
        let speed = if self.spec.projectile_speed > 0.0 {
            self.spec.projectile_speed
        } else {
            config.default_projectile_speed
        };
        let velocity = self.transform.forward * speed;

        if let CarrierBody::Projectile(body) = &mut self.body {
            body.speed = speed;
            body.velocity = velocity;
            body.collision_radius = config.projectile_radius;
        }
        self.tick_enabled = true;
    }

    /// Moves the projectile; on authority, sweeps the path and resolves impacts
    /// nearest first.
    pub(super) fn tick_projectile(&mut self, dt: f32, host: &mut dyn SkillHost) {
        let CarrierBody::Projectile(body) = &self.body else {
            return;
        };
        let (velocity, radius, travelled) = (body.velocity, body.collision_radius, body.travelled);

        let from = self.transform.location;
        let mut step = velocity * dt;
        let max_range = self.spec.max_range;
        if max_range > 0.0 {
            let remaining = (max_range - travelled).max(0.0);
            if step.length() > remaining {
                step = velocity.normalized() * remaining;
            }
        }
        let to = from + step;

        if host.has_authority() {
            for impact in host.sweep(from, to, radius) {
                if self.handle_impact(&impact, host) == HitOutcome::Ended {
                    self.transform.location = impact.location;
                    return;
                }
            }
        }

        self.transform.location = to;
        host.set_actor_transform(self.actor, self.transform);

        let travelled = travelled + step.length();
        if let CarrierBody::Projectile(body) = &mut self.body {
            body.travelled = travelled;
        }
        if max_range > 0.0 && travelled >= max_range {
            self.end(EndReason::RangeExceeded, host);
        }
    }

    pub(super) fn resolve_projectile_hit(
        &mut self,
        target: ActorId,
        impact: &Impact,
        host: &mut dyn SkillHost,
    ) -> HitOutcome {
        if !host.has_authority() {
            return HitOutcome::Ignored;
        }
        if let CarrierBody::Projectile(body) = &mut self.body {
            if !body.hit_actors.insert(target) {
                return HitOutcome::Ignored;
            }
            body.state = ProjectileState::ResolvingHit;
        }

        self.apply_damage(target, host);

        let params = CueParams {
            location: impact.location,
            normal: impact.normal,
            raw_magnitude: self.spec.final_damage,
            instigator: self.owner,
        };
        host.cues()
            .play_net_cue(self.actor, &native::projectile_impact_cue(), &params);

        let decision = {
            let (view, handlers, spec) = self.split();
            handlers.resolve_hit(&view, host, target, impact, spec)
        };
        debug!(
            carrier = %self.id,
            %target,
            result = %decision.result,
            decided_by = decision.decided_by.unwrap_or("default"),
            "projectile hit resolved"
        );

        match decision.result {
            HitResult::Pierce => {
                if let CarrierBody::Projectile(body) = &mut self.body {
                    body.state = ProjectileState::Flying;
                }
                HitOutcome::Survived
            }
            _ => {
                self.end(EndReason::HitStop, host);
                HitOutcome::Ended
            }
        }
    }
}
