//! Data-driven skill content and loaders.
//!
//! Provides loaders for RON/TOML data files:
//! - Skill definitions (`skills.ron`)
//! - Support definitions (`supports.ron`)
//! - Class catalogue (`classes.ron`)
//! - Framework configuration (`config.toml`)
//!
//! Skill definitions use skill-core types directly with serde. Supports are
//! authored with string-keyed modifier maps and converted to typed patches
//! under the configured [`UnknownFieldPolicy`](skill_core::UnknownFieldPolicy).

#[cfg(feature = "loaders")]
pub mod catalog;

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use catalog::ContentCatalog;

#[cfg(feature = "loaders")]
pub use loaders::{
    ClassLoader, ConfigLoader, ContentFactory, LoadResult, SkillLoader, SupportLoader, SupportSpec,
};
