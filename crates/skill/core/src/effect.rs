//! Outgoing gameplay-effect specs handed to the host's ability system.

use std::collections::BTreeMap;

use crate::tags::GameplayTag;
use crate::types::{ActorId, ClassId};

/// Who caused an effect and through which object.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectContext {
    pub instigator: ActorId,
    /// Carrier body (or other object) the effect travelled through.
    pub source_object: Option<ActorId>,
}

impl EffectContext {
    pub fn new(instigator: ActorId) -> Self {
        Self {
            instigator,
            source_object: None,
        }
    }

    pub fn add_source_object(&mut self, source: ActorId) {
        self.source_object = Some(source);
    }
}

/// A ready-to-apply instance of an effect class.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectSpec {
    pub effect: ClassId,
    pub level: f32,
    pub context: EffectContext,
    set_by_caller: BTreeMap<GameplayTag, f32>,
}

impl EffectSpec {
    pub fn new(effect: ClassId, level: f32, context: EffectContext) -> Self {
        Self {
            effect,
            level,
            context,
            set_by_caller: BTreeMap::new(),
        }
    }

    pub fn set_by_caller_magnitude(&mut self, tag: GameplayTag, magnitude: f32) {
        self.set_by_caller.insert(tag, magnitude);
    }

    /// Magnitude stored under `tag`, or `default` if the caller never set it.
    pub fn get_set_by_caller_magnitude(&self, tag: &GameplayTag, default: f32) -> f32 {
        self.set_by_caller.get(tag).copied().unwrap_or(default)
    }
}
