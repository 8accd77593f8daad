//! Skill definition loader.

use std::collections::BTreeSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use skill_core::{ClassKind, ClassRegistry, SkillDefinition};

use crate::loaders::{LoadResult, read_file};

/// Skill catalogue structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillCatalog {
    pub skills: Vec<SkillDefinition>,
}

/// Loader for skill definitions from RON files.
pub struct SkillLoader;

impl SkillLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<SkillDefinition>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parses a catalogue, rejecting unnamed or duplicate skills.
    pub fn parse(content: &str) -> LoadResult<Vec<SkillDefinition>> {
        let catalog: SkillCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse skill catalog RON: {}", e))?;

        let mut seen = BTreeSet::new();
        for skill in &catalog.skills {
            if skill.skill_id.is_none() {
                anyhow::bail!("Skill '{}' has no skill_id", skill.display_name);
            }
            if !seen.insert(skill.skill_id.clone()) {
                anyhow::bail!("Duplicate skill id '{}'", skill.skill_id);
            }
        }

        Ok(catalog.skills)
    }

    /// Checks every class a skill references against the registry.
    pub fn validate(skill: &SkillDefinition, registry: &ClassRegistry) -> LoadResult<()> {
        let slots = [
            (&skill.ability_class, ClassKind::Ability),
            (&skill.projectile_class, ClassKind::Projectile),
            (&skill.area_class, ClassKind::AreaEffect),
            (&skill.minion_class, ClassKind::Minion),
            (&skill.damage_effect, ClassKind::Effect),
        ];
        let lists = skill
            .default_effects
            .iter()
            .map(|class| (class, ClassKind::Effect))
            .chain(
                skill
                    .default_handlers
                    .iter()
                    .map(|class| (class, ClassKind::Handler)),
            );

        for (class, expected) in slots
            .into_iter()
            .filter_map(|(class, kind)| class.as_ref().map(|c| (c, kind)))
            .chain(lists)
        {
            if !registry.is_kind(class, expected) {
                anyhow::bail!(
                    "Skill '{}' references '{}' which is not a registered {} class",
                    skill.skill_id,
                    class,
                    expected
                );
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use skill_core::{ClassId, ParameterSource, SkillId};

    use super::*;

    const CATALOG: &str = r#"(skills: [
        (
            skill_id: "Fireball",
            display_name: "Fireball",
            tags: ["Skill.Fire", "Skill.Projectile"],
            base_damage: 20.0,
            speed: 1200.0,
            projectile_class: Some("Projectile.Fireball"),
            default_handlers: ["Mechanic.Pierce"],
            parameters: [Pierce(count: 1)],
        ),
    ])"#;

    #[test]
    fn parses_definitions_with_defaults() {
        let skills = SkillLoader::parse(CATALOG).unwrap();
        assert_eq!(skills.len(), 1);

        let fireball = &skills[0];
        assert_eq!(fireball.skill_id, SkillId::new("Fireball"));
        assert_eq!(fireball.summon_count, 1);
        assert_eq!(fireball.parameters, vec![ParameterSource::Pierce { count: 1 }]);
        assert_eq!(fireball.projectile_class, Some(ClassId::new("Projectile.Fireball")));
    }

    #[test]
    fn rejects_duplicates() {
        let err = SkillLoader::parse(
            r#"(skills: [(skill_id: "Spark"), (skill_id: "Spark")])"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("Duplicate"));
    }

    #[test]
    fn validate_checks_class_kinds() {
        let skills = SkillLoader::parse(CATALOG).unwrap();
        let mut registry = ClassRegistry::with_builtin_handlers();
        assert!(SkillLoader::validate(&skills[0], &registry).is_err());

        registry.register(ClassId::new("Projectile.Fireball"), ClassKind::Projectile);
        assert!(SkillLoader::validate(&skills[0], &registry).is_ok());
    }
}
