//! # Type Registry
//!
//! Process-global table mapping fully qualified type names to their
//! descriptors, for create-by-name instantiation (content loading, save
//! games, editor reflection). Registration is explicit at startup; Rust
//! has no pre-main initializer ordering to lean on, and that is a feature
//! here, not a gap.

use std::collections::HashMap;
use std::sync::OnceLock;

use parking_lot::RwLock;

use crate::error::{ObjectError, ObjectResult};
use crate::object::Managed;
use crate::pointer::Pointer;
use crate::type_info::TypeDescriptor;

/// Name → descriptor table. Descriptors are `'static`, so the registry
/// only stores references; it owns nothing.
pub struct TypeRegistry {
    /// Registered descriptors keyed by fully qualified name.
    entries: RwLock<HashMap<&'static str, &'static TypeDescriptor>>,
}

static GLOBAL: OnceLock<TypeRegistry> = OnceLock::new();

impl TypeRegistry {
    /// Creates an empty registry. Prefer [`TypeRegistry::global`] outside
    /// of tests.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// The process-global registry.
    pub fn global() -> &'static TypeRegistry {
        GLOBAL.get_or_init(TypeRegistry::new)
    }

    /// Registers `T`'s descriptor under its fully qualified name.
    ///
    /// Idempotent for the same type. A *different* descriptor under an
    /// already-registered name is refused (first registration wins) and
    /// reported; name equality deliberately ignores factories, so this is
    /// the only place such a collision becomes visible.
    pub fn register<T: Managed>(&self) -> bool {
        let descriptor = T::descriptor();
        let mut entries = self.entries.write();
        match entries.get(descriptor.name()) {
            Some(existing) if existing.same_as(descriptor) => true,
            Some(_) => {
                tracing::warn!(
                    name = descriptor.name(),
                    "duplicate type-name registration refused"
                );
                false
            }
            None => {
                entries.insert(descriptor.name(), descriptor);
                tracing::debug!(name = descriptor.name(), "type registered");
                true
            }
        }
    }

    /// Looks up a descriptor by fully qualified name.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&'static TypeDescriptor> {
        self.entries.read().get(name).copied()
    }

    /// Instantiates a registered type by name.
    ///
    /// # Errors
    ///
    /// [`ObjectError::UnknownType`] when no descriptor is registered under
    /// `name`; [`ObjectError::AllocationFailure`] from the factory.
    pub fn create(&self, name: &str) -> ObjectResult<Pointer<dyn Managed>> {
        self.lookup(name)
            .ok_or_else(|| ObjectError::UnknownType(name.to_owned()))?
            .create()
    }

    /// Number of registered types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns `true` when nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Sorted names of all registered types.
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.entries.read().keys().copied().collect();
        names.sort_unstable();
        names
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::managed_object;
    use crate::object::ObjectCore;

    #[derive(Default)]
    struct Prefab {
        core: ObjectCore,
    }
    managed_object!(Prefab);

    #[derive(Default)]
    struct Decal {
        core: ObjectCore,
    }
    managed_object!(Decal: Prefab);

    #[test]
    fn test_register_and_lookup() {
        let registry = TypeRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.register::<Prefab>());
        assert!(registry.register::<Decal>());
        assert_eq!(registry.len(), 2);

        let found = registry
            .lookup(Prefab::descriptor().name())
            .expect("registered");
        assert!(found.same_as(Prefab::descriptor()));
    }

    #[test]
    fn test_register_is_idempotent() {
        let registry = TypeRegistry::new();
        assert!(registry.register::<Prefab>());
        assert!(registry.register::<Prefab>());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_create_by_name() {
        let registry = TypeRegistry::new();
        registry.register::<Decal>();

        let created = registry
            .create(Decal::descriptor().name())
            .expect("registered type");
        assert!(created
            .get()
            .expect("valid")
            .type_descriptor()
            .same_as(Decal::descriptor()));
    }

    #[test]
    fn test_create_unknown_name() {
        let registry = TypeRegistry::new();
        let result = registry.create("no::such::Type");
        assert!(matches!(result, Err(ObjectError::UnknownType(_))));
    }

    #[test]
    fn test_names_are_sorted() {
        let registry = TypeRegistry::new();
        registry.register::<Prefab>();
        registry.register::<Decal>();
        let names = registry.names();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        assert_eq!(names, sorted);
    }
}
