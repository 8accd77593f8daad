//! Hierarchical gameplay tags and the ordered tag set carried by specs.

use std::collections::BTreeSet;
use std::fmt;

/// Dotted hierarchical tag name, e.g. `Damage.Type.Fire`.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct GameplayTag(String);

impl GameplayTag {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when `self` equals `parent` or is nested beneath it.
    ///
    /// `Damage.Type.Fire` matches `Damage.Type` and `Damage`, not `Damage.Ty`.
    pub fn matches(&self, parent: &GameplayTag) -> bool {
        match self.0.strip_prefix(parent.as_str()) {
            Some("") => true,
            Some(rest) => rest.starts_with('.'),
            None => false,
        }
    }
}

impl fmt::Display for GameplayTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for GameplayTag {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Tags the framework itself reads or emits.
pub mod native {
    use super::GameplayTag;

    pub const DATA_DAMAGE: &str = "Data.Damage";
    pub const ATTRIBUTE_HEALTH: &str = "Attributes.Core.Health";
    pub const ATTRIBUTE_MAX_HEALTH: &str = "Attributes.Core.MaxHealth";
    pub const ATTRIBUTE_MANA: &str = "Attributes.Core.Mana";
    pub const ATTRIBUTE_MAX_MANA: &str = "Attributes.Core.MaxMana";
    pub const DAMAGE_BASE: &str = "Damage.Base";
    pub const DAMAGE_FIRE: &str = "Damage.Type.Fire";
    pub const DAMAGE_COLD: &str = "Damage.Type.Cold";
    pub const CUE_PROJECTILE_IMPACT: &str = "GameplayCue.Projectile.Impact";

    /// Set-by-caller key for the damage magnitude.
    pub fn data_damage() -> GameplayTag {
        GameplayTag::new(DATA_DAMAGE)
    }

    pub fn projectile_impact_cue() -> GameplayTag {
        GameplayTag::new(CUE_PROJECTILE_IMPACT)
    }
}

/// Ordered, duplicate-free set of tags.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct TagSet(BTreeSet<GameplayTag>);

impl TagSet {
    /// Largest tag set the wire record accepts.
    pub const MAX_WIRE_TAGS: usize = 255;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, tag: GameplayTag) -> bool {
        self.0.insert(tag)
    }

    pub fn remove(&mut self, tag: &GameplayTag) -> bool {
        self.0.remove(tag)
    }

    /// Exact membership.
    pub fn contains(&self, tag: &GameplayTag) -> bool {
        self.0.contains(tag)
    }

    /// Hierarchical membership: any tag in the set matches `tag`.
    pub fn has_tag(&self, tag: &GameplayTag) -> bool {
        self.0.iter().any(|t| t.matches(tag))
    }

    pub fn append(&mut self, other: &TagSet) {
        self.0.extend(other.0.iter().cloned());
    }

    pub fn remove_all(&mut self, other: &TagSet) {
        for tag in &other.0 {
            self.0.remove(tag);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &GameplayTag> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<T: Into<GameplayTag>> FromIterator<T> for TagSet {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}
