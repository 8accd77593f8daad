//! Loaded content, indexed by id.

use std::collections::BTreeMap;
use std::sync::Arc;

use skill_core::{ClassRegistry, SkillConfig, SkillDefinition, SkillId, SupportDefinition};

/// Everything a simulation needs from the data directory.
#[derive(Debug, Clone)]
pub struct ContentCatalog {
    config: SkillConfig,
    classes: Arc<ClassRegistry>,
    skills: BTreeMap<SkillId, Arc<SkillDefinition>>,
    supports: BTreeMap<String, Arc<SupportDefinition>>,
}

impl ContentCatalog {
    pub fn new(
        config: SkillConfig,
        classes: Arc<ClassRegistry>,
        skills: Vec<SkillDefinition>,
        supports: Vec<SupportDefinition>,
    ) -> Self {
        Self {
            config,
            classes,
            skills: skills
                .into_iter()
                .map(|s| (s.skill_id.clone(), Arc::new(s)))
                .collect(),
            supports: supports
                .into_iter()
                .map(|s| (s.support_id.clone(), Arc::new(s)))
                .collect(),
        }
    }

    pub fn config(&self) -> &SkillConfig {
        &self.config
    }

    pub fn classes(&self) -> &Arc<ClassRegistry> {
        &self.classes
    }

    pub fn skill(&self, id: &str) -> Option<&Arc<SkillDefinition>> {
        self.skills.get(&SkillId::new(id))
    }

    pub fn support(&self, id: &str) -> Option<&Arc<SupportDefinition>> {
        self.supports.get(id)
    }

    pub fn skills(&self) -> impl Iterator<Item = &Arc<SkillDefinition>> {
        self.skills.values()
    }

    pub fn supports(&self) -> impl Iterator<Item = &Arc<SupportDefinition>> {
        self.supports.values()
    }
}
