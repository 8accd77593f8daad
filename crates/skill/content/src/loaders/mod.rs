//! File loaders for skill content.
//!
//! Each loader has a `parse` entry point over text so content can be
//! validated without touching the filesystem.

pub mod classes;
pub mod config;
pub mod factory;
pub mod skills;
pub mod supports;

pub use classes::ClassLoader;
pub use config::ConfigLoader;
pub use factory::ContentFactory;
pub use skills::SkillLoader;
pub use supports::{SupportLoader, SupportSpec};

use std::path::Path;

use anyhow::Context;

pub type LoadResult<T> = anyhow::Result<T>;

pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .with_context(|| format!("Cannot read content file {}", path.display()))
}
