//! Content factory for building a skill catalogue from data files.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use skill_core::{ClassRegistry, SkillConfig, SkillDefinition, SupportDefinition};
use tracing::info;

use crate::catalog::ContentCatalog;
use crate::loaders::{ClassLoader, ConfigLoader, LoadResult, SkillLoader, SupportLoader};

/// Content factory that loads all skill content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── classes.ron
/// ├── skills.ron
/// └── supports.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Load framework configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<SkillConfig> {
        ConfigLoader::load(&self.data_dir.join("config.toml"))
    }

    /// Load the class registry from `classes.ron`.
    pub fn load_classes(&self, config: &SkillConfig) -> LoadResult<ClassRegistry> {
        ClassLoader::load(&self.data_dir.join("classes.ron"), config)
    }

    /// Load skill definitions from `skills.ron`.
    pub fn load_skills(&self) -> LoadResult<Vec<SkillDefinition>> {
        SkillLoader::load(&self.data_dir.join("skills.ron"))
    }

    /// Load support definitions from `supports.ron`.
    pub fn load_supports(&self, config: &SkillConfig) -> LoadResult<Vec<SupportDefinition>> {
        SupportLoader::load(
            &self.data_dir.join("supports.ron"),
            config.unknown_patch_fields,
        )
    }

    /// Loads everything and cross-checks skill class references.
    pub fn load_catalog(&self) -> LoadResult<ContentCatalog> {
        let config = self.load_config()?;
        let classes = self.load_classes(&config)?;
        let skills = self.load_skills()?;
        let supports = self.load_supports(&config)?;

        for skill in &skills {
            SkillLoader::validate(skill, &classes)?;
        }

        info!(
            data_dir = %self.data_dir.display(),
            classes = classes.len(),
            skills = skills.len(),
            supports = supports.len(),
            "skill content loaded"
        );

        Ok(ContentCatalog::new(
            config,
            Arc::new(classes),
            skills,
            supports,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bundled() -> ContentFactory {
        ContentFactory::new(concat!(env!("CARGO_MANIFEST_DIR"), "/data"))
    }

    #[test]
    fn bundled_content_loads() {
        let catalog = bundled().load_catalog().unwrap();

        assert!(catalog.skill("Fireball").is_some());
        assert!(catalog.support("AddedFireDamage").is_some());
        assert!(!catalog.classes().is_empty());
    }

    #[test]
    fn bundled_presentation_cues_survive_loading() {
        let catalog = bundled().load_catalog().unwrap();

        let fireball = catalog.skill("Fireball").unwrap();
        assert_eq!(
            fireball.cues.on_impact.as_ref().map(|t| t.as_str()),
            Some("GameplayCue.Skill.Fireball.Impact")
        );
        assert_eq!(
            fireball.damage_type.as_ref().map(|t| t.as_str()),
            Some("Damage.Type.Fire")
        );

        let flame_wall = catalog.skill("FlameWall").unwrap();
        let points: Vec<_> = flame_wall.cues.authored().map(|(point, _)| point).collect();
        assert!(points.contains(&"on_aura"));
    }

    #[test]
    fn missing_directory_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let err = ContentFactory::new(dir.path()).load_config().unwrap_err();
        assert!(err.to_string().contains("config.toml"));
    }

    #[test]
    fn config_enables_base_handler_tracing() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("config.toml"), "debug_mechanics = true").unwrap();
        std::fs::write(dir.path().join("classes.ron"), "(classes: [])").unwrap();
        std::fs::write(dir.path().join("skills.ron"), "(skills: [])").unwrap();
        std::fs::write(dir.path().join("supports.ron"), "(supports: [])").unwrap();

        let catalog = ContentFactory::new(dir.path()).load_catalog().unwrap();
        let base = catalog
            .classes()
            .instantiate_handler(&skill_core::ClassId::new(ClassRegistry::BASE_HANDLER))
            .unwrap();
        assert!(format!("{base:?}").contains("debug_logging: true"));
    }

    #[test]
    fn catalog_rejects_unregistered_carriers() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("config.toml"), "").unwrap();
        std::fs::write(dir.path().join("classes.ron"), "(classes: [])").unwrap();
        std::fs::write(
            dir.path().join("skills.ron"),
            r#"(skills: [(skill_id: "Bolt", projectile_class: Some("Projectile.Bolt"))])"#,
        )
        .unwrap();
        std::fs::write(dir.path().join("supports.ron"), "(supports: [])").unwrap();

        let err = ContentFactory::new(dir.path()).load_catalog().unwrap_err();
        assert!(err.to_string().contains("Projectile.Bolt"));
    }
}
