//! Core attribute set: health and mana with their maxima.

use skill_core::GameplayTag;
use skill_core::tags::native;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CoreAttribute {
    Health,
    MaxHealth,
    Mana,
    MaxMana,
}

impl CoreAttribute {
    pub fn from_tag(tag: &GameplayTag) -> Option<Self> {
        match tag.as_str() {
            native::ATTRIBUTE_HEALTH => Some(Self::Health),
            native::ATTRIBUTE_MAX_HEALTH => Some(Self::MaxHealth),
            native::ATTRIBUTE_MANA => Some(Self::Mana),
            native::ATTRIBUTE_MAX_MANA => Some(Self::MaxMana),
            _ => None,
        }
    }
}

/// Current values are clamped into `[0, max]` on every change; maxima never
/// drop below their floor and pull the current value down with them.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CoreAttributes {
    health: f32,
    max_health: f32,
    mana: f32,
    max_mana: f32,
}

impl CoreAttributes {
    pub const DEFAULT_HEALTH: f32 = 100.0;
    pub const DEFAULT_MANA: f32 = 100.0;
    /// Lowest allowed maximum health.
    pub const MIN_MAX_HEALTH: f32 = 1.0;

    pub fn get(&self, attribute: CoreAttribute) -> f32 {
        match attribute {
            CoreAttribute::Health => self.health,
            CoreAttribute::MaxHealth => self.max_health,
            CoreAttribute::Mana => self.mana,
            CoreAttribute::MaxMana => self.max_mana,
        }
    }

    pub fn set_base(&mut self, attribute: CoreAttribute, value: f32) {
        match attribute {
            CoreAttribute::Health => self.health = value.clamp(0.0, self.max_health),
            CoreAttribute::MaxHealth => {
                self.max_health = value.max(Self::MIN_MAX_HEALTH);
                self.health = self.health.min(self.max_health);
            }
            CoreAttribute::Mana => self.mana = value.clamp(0.0, self.max_mana),
            CoreAttribute::MaxMana => {
                self.max_mana = value.max(0.0);
                self.mana = self.mana.min(self.max_mana);
            }
        }
    }

    /// Adds `delta` to the current value of `attribute`, clamped.
    pub fn modify(&mut self, attribute: CoreAttribute, delta: f32) {
        self.set_base(attribute, self.get(attribute) + delta);
    }

    pub fn health(&self) -> f32 {
        self.health
    }

    pub fn max_health(&self) -> f32 {
        self.max_health
    }

    pub fn mana(&self) -> f32 {
        self.mana
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0.0
    }
}

impl Default for CoreAttributes {
    fn default() -> Self {
        Self {
            health: Self::DEFAULT_HEALTH,
            max_health: Self::DEFAULT_HEALTH,
            mana: Self::DEFAULT_MANA,
            max_mana: Self::DEFAULT_MANA,
        }
    }
}
