/// How the content layer treats patch modifier keys that do not name a
/// numeric spec field.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum UnknownFieldPolicy {
    /// Drop the modifier silently.
    Ignore,
    /// Drop the modifier and log a warning.
    #[default]
    Warn,
    /// Fail loading the support.
    Reject,
}

/// Skill framework constants and tunable parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SkillConfig {
    /// Lateral distance between neighbouring minions of one cast.
    pub minion_spread: f32,
    /// Projectile speed used when the spec does not carry a positive speed.
    pub default_projectile_speed: f32,
    /// Area radius used when the spec does not carry a positive radius.
    pub default_area_radius: f32,
    /// Radius of the sphere swept by projectiles.
    pub projectile_radius: f32,
    /// Policy for unknown patch modifier keys in authored content.
    pub unknown_patch_fields: UnknownFieldPolicy,
    /// Built-in base handlers trace every hook except ticks.
    pub debug_mechanics: bool,
}

impl SkillConfig {
    // ===== wire format =====
    pub const SPEC_VERSION: u8 = 1;
    /// Maximum element count of any list in the spec wire record.
    pub const MAX_WIRE_ARRAY: usize = 64;
    /// Maximum byte length of a name (identity, class id, param key) on the wire.
    pub const MAX_NAME_LEN: usize = 1024;

    // ===== carrier behaviour =====
    pub const SUMMON_COUNT_MIN: i32 = 1;
    pub const SUMMON_COUNT_MAX: i32 = 10;
    pub const MIN_PULSE_INTERVAL: f32 = 0.05;
    pub const DEFAULT_PULSE_INTERVAL: f32 = 1.0;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_MINION_SPREAD: f32 = 100.0;
    pub const DEFAULT_PROJECTILE_SPEED: f32 = 1000.0;
    pub const DEFAULT_AREA_RADIUS: f32 = 100.0;
    pub const DEFAULT_PROJECTILE_RADIUS: f32 = 10.0;

    pub fn new() -> Self {
        Self {
            minion_spread: Self::DEFAULT_MINION_SPREAD,
            default_projectile_speed: Self::DEFAULT_PROJECTILE_SPEED,
            default_area_radius: Self::DEFAULT_AREA_RADIUS,
            projectile_radius: Self::DEFAULT_PROJECTILE_RADIUS,
            unknown_patch_fields: UnknownFieldPolicy::default(),
            debug_mechanics: false,
        }
    }

    /// Clamps an authored or replicated summon count into the supported range.
    pub fn clamp_summon_count(count: i32) -> i32 {
        count.clamp(Self::SUMMON_COUNT_MIN, Self::SUMMON_COUNT_MAX)
    }
}

impl Default for SkillConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summon_count_is_clamped() {
        assert_eq!(SkillConfig::clamp_summon_count(0), 1);
        assert_eq!(SkillConfig::clamp_summon_count(-4), 1);
        assert_eq!(SkillConfig::clamp_summon_count(3), 3);
        assert_eq!(SkillConfig::clamp_summon_count(25), 10);
    }

    #[test]
    fn policy_parses_case_insensitively() {
        assert_eq!(
            "Reject".parse::<UnknownFieldPolicy>().ok(),
            Some(UnknownFieldPolicy::Reject)
        );
        assert_eq!(UnknownFieldPolicy::default(), UnknownFieldPolicy::Warn);
    }
}
