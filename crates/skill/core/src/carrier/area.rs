use tracing::debug;

use super::{Carrier, CarrierBody};
use crate::config::SkillConfig;
use crate::host::{Impact, SkillHost};

/// Custom parameter holding the seconds between area pulses.
pub const TICK_INTERVAL_PARAM: &str = "Area.TickInterval";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AreaState {
    /// Tick disabled: no handlers and no damage effect.
    #[default]
    Idle,
    Active,
}

#[derive(Clone, Debug, Default)]
pub struct AreaBody {
    pub radius: f32,
    pub interval: f32,
    /// Time accumulated towards the next pulse.
    pub elapsed: f32,
    pub state: AreaState,
    pub pulses: u32,
}

impl AreaBody {
    /// Pulse interval for `value`, floored at the minimum rate.
    pub fn clamp_interval(value: f32) -> f32 {
        value.max(SkillConfig::MIN_PULSE_INTERVAL)
    }
}

impl Carrier {
    pub(super) fn init_area(&mut self, config: &SkillConfig, host: &mut dyn SkillHost) {
        let interval = AreaBody::clamp_interval(
            self.spec
                .custom_params
                .get(TICK_INTERVAL_PARAM, SkillConfig::DEFAULT_PULSE_INTERVAL),
        );
        let radius = if self.spec.area_radius > 0.0 {
            self.spec.area_radius
        } else {
            config.default_area_radius
        };
        let has_damage = self.spec.damage_effect.is_some();
        self.tick_enabled = !self.handlers.is_empty() || has_damage;

        if let CarrierBody::Area(body) = &mut self.body {
            body.radius = radius;
            body.interval = interval;
            // first active tick pulses unless an immediate pulse fires below
            body.elapsed = interval;
            body.state = if self.tick_enabled {
                AreaState::Active
            } else {
                AreaState::Idle
            };
        }

        if host.has_authority() && has_damage {
            self.pulse(host);
            if let CarrierBody::Area(body) = &mut self.body {
                body.elapsed = 0.0;
            }
        }
    }

    pub(super) fn tick_area(&mut self, dt: f32, host: &mut dyn SkillHost) {
        if !host.has_authority() {
            return;
        }
        let due = match &mut self.body {
            CarrierBody::Area(body) => {
                body.elapsed += dt;
                if body.elapsed >= body.interval {
                    body.elapsed -= body.interval;
                    true
                } else {
                    false
                }
            }
            _ => false,
        };
        if due {
            self.pulse(host);
        }
    }

    /// Pulses immediately, regardless of the timer. No-op without authority.
    ///
    /// Returns the number of targets affected.
    pub fn force_pulse(&mut self, host: &mut dyn SkillHost) -> usize {
        if !self.is_active() || !host.has_authority() {
            return 0;
        }
        self.pulse(host)
    }

    /// One pulse: damage then handler notification for every overlapping actor
    /// other than the area itself and its owner.
    fn pulse(&mut self, host: &mut dyn SkillHost) -> usize {
        let CarrierBody::Area(body) = &mut self.body else {
            return 0;
        };
        body.pulses += 1;
        let (radius, pulse) = (body.radius, body.pulses);

        let center = self.transform.location;
        let targets: Vec<_> = host
            .overlapping_actors(center, radius)
            .into_iter()
            .filter(|&actor| actor != self.actor && Some(actor) != self.owner)
            .collect();

        for &target in &targets {
            self.apply_damage(target, host);
            let location = host
                .actor_transform(target)
                .map_or(center, |t| t.location);
            let impact = Impact::at_actor(target, location);
            let (view, handlers, spec) = self.split();
            handlers.notify_hit(&view, host, target, &impact, spec);
        }

        debug!(carrier = %self.id, pulse, targets = targets.len(), "area pulse");
        targets.len()
    }

    /// Pulses fired so far; zero for other variants.
    pub fn pulse_count(&self) -> u32 {
        match &self.body {
            CarrierBody::Area(body) => body.pulses,
            _ => 0,
        }
    }
}
