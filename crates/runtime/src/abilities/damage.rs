//! Damage execution: turns the set-by-caller damage magnitude into a health loss.

use skill_core::EffectSpec;
use skill_core::tags::native;
use tracing::debug;

use super::attributes::{CoreAttribute, CoreAttributes};

pub struct DamageExecution;

impl DamageExecution {
    /// Reads `Data.Damage` from `spec` and subtracts it from `target` health.
    ///
    /// Returns the health actually removed. Non-positive damage is a no-op.
    pub fn execute(spec: &EffectSpec, target: &mut CoreAttributes) -> f32 {
        let damage = spec.get_set_by_caller_magnitude(&native::data_damage(), 0.0);
        if damage <= 0.0 {
            debug!(target: "runtime::damage", effect = %spec.effect, damage, "no damage to apply");
            return 0.0;
        }

        let before = target.health();
        target.modify(CoreAttribute::Health, -damage);
        let applied = before - target.health();
        debug!(
            target: "runtime::damage",
            effect = %spec.effect,
            damage,
            applied,
            health = target.health(),
            "damage executed"
        );
        applied
    }
}

#[cfg(test)]
mod tests {
    use skill_core::{ActorId, ClassId, EffectContext};

    use super::*;

    fn damage_spec(amount: Option<f32>) -> EffectSpec {
        let mut spec = EffectSpec::new(
            ClassId::new("Effect.Damage"),
            1.0,
            EffectContext::new(ActorId(1)),
        );
        if let Some(amount) = amount {
            spec.set_by_caller_magnitude(native::data_damage(), amount);
        }
        spec
    }

    #[test]
    fn damage_reduces_health() {
        let mut target = CoreAttributes::default();
        assert_eq!(DamageExecution::execute(&damage_spec(Some(30.0)), &mut target), 30.0);
        assert_eq!(target.health(), 70.0);
    }

    #[test]
    fn overkill_is_clamped_at_zero() {
        let mut target = CoreAttributes::default();
        // only the remaining 100 health is removed
        assert_eq!(DamageExecution::execute(&damage_spec(Some(500.0)), &mut target), 100.0);
        assert_eq!(target.health(), 0.0);
    }

    #[test]
    fn missing_or_negative_damage_is_ignored() {
        let mut target = CoreAttributes::default();
        assert_eq!(DamageExecution::execute(&damage_spec(None), &mut target), 0.0);
        assert_eq!(DamageExecution::execute(&damage_spec(Some(-10.0)), &mut target), 0.0);
        assert_eq!(target.health(), 100.0);
    }
}
