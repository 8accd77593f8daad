//! Support definition loader.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use skill_core::{
    CarrierOverrides, ClassId, Patch, SpecField, SupportDefinition, TagSet, UnknownFieldPolicy,
};
use tracing::warn;

use crate::loaders::{LoadResult, read_file};

/// Authored form of a support: modifier maps keyed by field name.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SupportSpec {
    pub support_id: String,
    pub display_name: String,
    pub additive: BTreeMap<String, f32>,
    pub multiplicative: BTreeMap<String, f32>,
    pub tags_to_add: TagSet,
    pub tags_to_remove: TagSet,
    pub effects_to_add: Vec<ClassId>,
    pub handlers_to_add: Vec<ClassId>,
    pub carrier_overrides: CarrierOverrides,
}

impl SupportSpec {
    /// Resolves field names into a typed patch.
    pub fn into_definition(self, policy: UnknownFieldPolicy) -> LoadResult<SupportDefinition> {
        let additive = resolve_fields(&self.support_id, "additive", self.additive, policy)?;
        let multiplicative =
            resolve_fields(&self.support_id, "multiplicative", self.multiplicative, policy)?;

        Ok(SupportDefinition {
            support_id: self.support_id,
            display_name: self.display_name,
            patch: Patch {
                additive,
                multiplicative,
                tags_to_add: self.tags_to_add,
                tags_to_remove: self.tags_to_remove,
                effects_to_add: self.effects_to_add,
                handlers_to_add: self.handlers_to_add,
                carrier_overrides: self.carrier_overrides,
            },
        })
    }
}

fn resolve_fields(
    support: &str,
    phase: &str,
    modifiers: BTreeMap<String, f32>,
    policy: UnknownFieldPolicy,
) -> LoadResult<BTreeMap<SpecField, f32>> {
    let mut resolved = BTreeMap::new();
    for (name, value) in modifiers {
        match name.parse::<SpecField>() {
            Ok(field) => {
                resolved.insert(field, value);
            }
            Err(_) => match policy {
                UnknownFieldPolicy::Ignore => {}
                UnknownFieldPolicy::Warn => {
                    warn!(support, phase, field = %name, "unknown patch field ignored");
                }
                UnknownFieldPolicy::Reject => {
                    anyhow::bail!("Support '{}' has unknown {} field '{}'", support, phase, name);
                }
            },
        }
    }
    Ok(resolved)
}

/// Support catalogue structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupportCatalog {
    pub supports: Vec<SupportSpec>,
}

/// Loader for support definitions from RON files.
pub struct SupportLoader;

impl SupportLoader {
    pub fn load(path: &Path, policy: UnknownFieldPolicy) -> LoadResult<Vec<SupportDefinition>> {
        let content = read_file(path)?;
        Self::parse(&content, policy)
    }

    pub fn parse(content: &str, policy: UnknownFieldPolicy) -> LoadResult<Vec<SupportDefinition>> {
        let catalog: SupportCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse support catalog RON: {}", e))?;

        let mut supports: Vec<SupportDefinition> = Vec::with_capacity(catalog.supports.len());
        for spec in catalog.supports {
            if spec.support_id.is_empty() {
                anyhow::bail!("Support '{}' has no support_id", spec.display_name);
            }
            if supports.iter().any(|s| s.support_id == spec.support_id) {
                anyhow::bail!("Duplicate support id '{}'", spec.support_id);
            }
            supports.push(spec.into_definition(policy)?);
        }

        Ok(supports)
    }
}
