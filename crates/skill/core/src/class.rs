//! Class registry: resolves authored class identifiers to their kind and,
//! for mechanic handlers, to a factory producing fresh prototypes.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::config::SkillConfig;
use crate::handler::{BaseHandler, MechanicHandler, PierceHandler};
use crate::types::ClassId;

/// What an authored class is. Every class reference in a spec is checked
/// against the kind its slot expects.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ClassKind {
    Ability,
    Projectile,
    AreaEffect,
    Minion,
    Effect,
    Handler,
}

/// Produces a fresh handler prototype.
pub type HandlerFactory = Arc<dyn Fn() -> Box<dyn MechanicHandler> + Send + Sync>;

#[derive(Clone)]
struct ClassEntry {
    kind: ClassKind,
    factory: Option<HandlerFactory>,
}

/// Lookup table of known classes.
#[derive(Clone, Default)]
pub struct ClassRegistry {
    entries: BTreeMap<ClassId, ClassEntry>,
}

impl ClassRegistry {
    pub const PIERCE_HANDLER: &'static str = "Mechanic.Pierce";
    pub const BASE_HANDLER: &'static str = "Mechanic.Base";

    pub fn new() -> Self {
        Self::default()
    }

    /// Registry pre-populated with the handlers shipped in this crate.
    pub fn with_builtin_handlers() -> Self {
        Self::with_configured_handlers(&SkillConfig::default())
    }

    /// Like [`with_builtin_handlers`](Self::with_builtin_handlers), with
    /// handler options taken from `config`.
    pub fn with_configured_handlers(config: &SkillConfig) -> Self {
        let debug_logging = config.debug_mechanics;
        let mut registry = Self::new();
        registry.register_handler(ClassId::new(Self::PIERCE_HANDLER), || {
            Box::new(PierceHandler::new())
        });
        registry.register_handler(ClassId::new(Self::BASE_HANDLER), move || {
            Box::new(BaseHandler::new(Self::BASE_HANDLER).with_debug_logging(debug_logging))
        });
        registry
    }

    /// Registers a non-handler class. Re-registering replaces the entry.
    pub fn register(&mut self, id: ClassId, kind: ClassKind) {
        self.entries.insert(id, ClassEntry { kind, factory: None });
    }

    pub fn register_handler<F>(&mut self, id: ClassId, factory: F)
    where
        F: Fn() -> Box<dyn MechanicHandler> + Send + Sync + 'static,
    {
        self.entries.insert(
            id,
            ClassEntry {
                kind: ClassKind::Handler,
                factory: Some(Arc::new(factory)),
            },
        );
    }

    pub fn kind_of(&self, id: &ClassId) -> Option<ClassKind> {
        self.entries.get(id).map(|entry| entry.kind)
    }

    pub fn contains(&self, id: &ClassId) -> bool {
        self.entries.contains_key(id)
    }

    /// True if `id` is registered with exactly `kind`.
    pub fn is_kind(&self, id: &ClassId, kind: ClassKind) -> bool {
        self.kind_of(id) == Some(kind)
    }

    /// Builds a fresh handler instance, or `None` if `id` is not a registered handler.
    pub fn instantiate_handler(&self, id: &ClassId) -> Option<Box<dyn MechanicHandler>> {
        self.entries
            .get(id)
            .and_then(|entry| entry.factory.as_ref())
            .map(|factory| factory())
    }

    /// Iterates over all registered classes of one kind in id order.
    pub fn classes_of(&self, kind: ClassKind) -> impl Iterator<Item = &ClassId> {
        self.entries
            .iter()
            .filter(move |(_, entry)| entry.kind == kind)
            .map(|(id, _)| id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for ClassRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.entries.iter().map(|(id, entry)| (id, entry.kind)))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_handlers_instantiate_fresh_instances() {
        let registry = ClassRegistry::with_builtin_handlers();
        let pierce = ClassId::new(ClassRegistry::PIERCE_HANDLER);

        assert_eq!(registry.kind_of(&pierce), Some(ClassKind::Handler));
        let handler = registry.instantiate_handler(&pierce).expect("pierce handler");
        assert_eq!(handler.name(), "PierceHandler");
    }

    #[test]
    fn base_handler_debug_logging_follows_config() {
        let base = ClassId::new(ClassRegistry::BASE_HANDLER);
        let config = SkillConfig {
            debug_mechanics: true,
            ..SkillConfig::default()
        };

        let traced = ClassRegistry::with_configured_handlers(&config)
            .instantiate_handler(&base)
            .expect("base handler");
        assert!(format!("{traced:?}").contains("debug_logging: true"));

        let quiet = ClassRegistry::with_builtin_handlers()
            .instantiate_handler(&base)
            .expect("base handler");
        assert!(format!("{quiet:?}").contains("debug_logging: false"));
    }

    #[test]
    fn non_handler_classes_have_no_factory() {
        let mut registry = ClassRegistry::new();
        let bolt = ClassId::new("Projectile.Bolt");
        registry.register(bolt.clone(), ClassKind::Projectile);

        assert!(registry.is_kind(&bolt, ClassKind::Projectile));
        assert!(!registry.is_kind(&bolt, ClassKind::Minion));
        assert!(registry.instantiate_handler(&bolt).is_none());
        assert!(registry.instantiate_handler(&ClassId::new("Unknown")).is_none());
    }

    #[test]
    fn class_kind_parses_case_insensitively() {
        assert_eq!("area_effect".parse::<ClassKind>().ok(), Some(ClassKind::AreaEffect));
        assert_eq!("PROJECTILE".parse::<ClassKind>().ok(), Some(ClassKind::Projectile));
    }
}
