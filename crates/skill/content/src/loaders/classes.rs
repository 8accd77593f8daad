//! Class catalogue loader.

use std::path::Path;

use serde::{Deserialize, Serialize};
use skill_core::{ClassId, ClassKind, ClassRegistry, SkillConfig};

use crate::loaders::{LoadResult, read_file};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassEntry {
    pub id: ClassId,
    pub kind: ClassKind,
}

/// Class catalogue structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassCatalog {
    pub classes: Vec<ClassEntry>,
}

/// Loader for the class registry.
///
/// Handler entries must name a handler compiled into the registry; all other
/// kinds are registered as listed.
pub struct ClassLoader;

impl ClassLoader {
    pub fn load(path: &Path, config: &SkillConfig) -> LoadResult<ClassRegistry> {
        let content = read_file(path)?;
        Self::parse_with(&content, config)
    }

    pub fn parse(content: &str) -> LoadResult<ClassRegistry> {
        Self::parse_with(content, &SkillConfig::default())
    }

    /// Parses a catalogue on top of built-in handlers configured by `config`.
    pub fn parse_with(content: &str, config: &SkillConfig) -> LoadResult<ClassRegistry> {
        let catalog: ClassCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse class catalog RON: {}", e))?;

        let mut registry = ClassRegistry::with_configured_handlers(config);
        for entry in catalog.classes {
            match entry.kind {
                ClassKind::Handler => {
                    if !registry.is_kind(&entry.id, ClassKind::Handler) {
                        anyhow::bail!("Handler class '{}' has no built-in implementation", entry.id);
                    }
                }
                kind => {
                    if let Some(existing) = registry.kind_of(&entry.id) {
                        anyhow::bail!("Class '{}' declared twice ({} and {})", entry.id, existing, kind);
                    }
                    registry.register(entry.id, kind);
                }
            }
        }

        Ok(registry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registers_listed_kinds() {
        let registry = ClassLoader::parse(
            r#"(classes: [
                (id: "Projectile.Bolt", kind: projectile),
                (id: "Area.Burn", kind: area_effect),
                (id: "Mechanic.Pierce", kind: handler),
            ])"#,
        )
        .unwrap();

        assert!(registry.is_kind(&ClassId::new("Projectile.Bolt"), ClassKind::Projectile));
        assert!(registry.is_kind(&ClassId::new("Area.Burn"), ClassKind::AreaEffect));
        assert!(registry.instantiate_handler(&ClassId::new("Mechanic.Pierce")).is_some());
    }

    #[test]
    fn rejects_unimplemented_handlers() {
        let err = ClassLoader::parse(r#"(classes: [(id: "Mechanic.Chain", kind: handler)])"#)
            .unwrap_err();
        assert!(err.to_string().contains("Mechanic.Chain"));
    }
}
