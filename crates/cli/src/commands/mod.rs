mod cast;
mod inspect;
mod list;

pub use cast::Cast;
pub use inspect::Inspect;
pub use list::List;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use skill_content::{ContentCatalog, ContentFactory};
use skill_core::{Patch, SkillDefinition};

/// Where to load content from.
#[derive(Args)]
pub struct ContentArgs {
    /// Content directory holding config.toml, classes.ron, skills.ron and supports.ron
    #[arg(
        short,
        long,
        env = "SKILL_DATA_DIR",
        value_name = "DIR",
        default_value = "crates/skill/content/data"
    )]
    data_dir: PathBuf,
}

impl ContentArgs {
    pub fn load(&self) -> Result<ContentCatalog> {
        ContentFactory::new(&self.data_dir)
            .load_catalog()
            .with_context(|| format!("Failed to load content from {}", self.data_dir.display()))
    }
}

/// Looks up a skill and the patches of the named supports, in order.
pub fn resolve(
    catalog: &ContentCatalog,
    skill: &str,
    supports: &[String],
) -> Result<(Arc<SkillDefinition>, Vec<Patch>)> {
    let definition = catalog
        .skill(skill)
        .with_context(|| format!("Unknown skill: {skill}"))?;
    let patches = supports
        .iter()
        .map(|id| {
            catalog
                .support(id)
                .map(|s| s.patch.clone())
                .with_context(|| format!("Unknown support: {id}"))
        })
        .collect::<Result<Vec<_>>>()?;
    Ok((Arc::clone(definition), patches))
}
