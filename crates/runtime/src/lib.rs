//! Headless host for the skill framework.
//!
//! Provides a sandbox world implementing [`skill_core::SkillHost`], a simple
//! ability system with attributes, cooldowns and damage, a recording cue
//! service, carrier snapshots for replicated instances, and a frame-driven
//! [`Simulation`] tying them together.
//!
//! Modules:
//! - [`simulation`] hosts the frame loop and builder
//! - [`world`] implements actors, overlap and sweep queries
//! - [`abilities`] implements ability components and effect execution
//! - [`cues`] records cue playback
//! - [`replication`] captures and applies carrier snapshots
pub mod abilities;
pub mod cues;
pub mod error;
pub mod replication;
pub mod simulation;
pub mod world;

pub use abilities::{
    AbilityComponent, AbilityComponents, CommitError, CoreAttribute, CoreAttributes,
    DamageExecution, EffectExecution, EffectLibrary, SkillLink,
};
pub use cues::{CueEvent, CueLog, CueScope};
pub use error::{ReplicationError, Result, RuntimeError};
pub use replication::{CarrierSnapshot, apply_snapshot};
pub use simulation::{CastReport, Simulation, SimulationBuilder};
pub use world::{ActorKind, ActorRecord, SandboxWorld};
