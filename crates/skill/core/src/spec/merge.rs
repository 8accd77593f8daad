use tracing::debug;

use super::{Patch, SkillDefinition, SkillSpec};

/// Builds the final spec: base values from `definition`, then each patch in order.
///
/// Deterministic: the same definition and patch sequence always yields an
/// identical spec. A definition without identity yields a spec whose
/// identity is none; activation rejects such specs.
pub fn build_spec(definition: &SkillDefinition, patches: &[Patch]) -> SkillSpec {
    let mut spec = definition.create_base_spec();

    for (index, patch) in patches.iter().enumerate() {
        patch.apply_to(&mut spec);
        debug!(
            skill = %spec.skill_id,
            patch = index,
            final_damage = spec.final_damage,
            handlers = spec.handlers.len(),
            "applied patch"
        );
    }

    spec
}
