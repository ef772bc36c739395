//! # Runtime Type Descriptors
//!
//! One [`TypeDescriptor`] exists per managed type, as a `static` generated
//! by [`crate::managed_object!`]. Descriptors form a single-inheritance
//! chain through their parent links and carry a default-constructing
//! factory, which together give the engine cheap ancestry queries and
//! generic instantiation from runtime type data.

use std::fmt;
use std::ptr;

use crate::error::ObjectResult;
use crate::object::Managed;
use crate::pointer::Pointer;

/// Lazily resolved link to another type's descriptor.
///
/// Stored as a function pointer because a `static` initializer cannot call
/// into another type's accessor; the chain is resolved on first walk.
pub type DescriptorFn = fn() -> &'static TypeDescriptor;

/// Factory signature: default-constructs a fresh pointer-owned instance.
pub type CreateFn = fn() -> ObjectResult<Pointer<dyn Managed>>;

/// Runtime class descriptor: name, size, parent link and factory.
///
/// Descriptor identity (the address of the per-type `static`) is the
/// witness used by downcasts; name equality is a weaker relation kept for
/// registry semantics.
pub struct TypeDescriptor {
    /// Fully qualified type name, `module::path::Type`.
    name: &'static str,
    /// Size of the described type in bytes.
    size: usize,
    /// Parent descriptor accessor; `None` only at a hierarchy root.
    parent: Option<DescriptorFn>,
    /// Default-constructing factory.
    factory: CreateFn,
}

impl TypeDescriptor {
    /// Creates a descriptor. Called by [`crate::managed_object!`]; there is
    /// no validation that `size` matches the described type, the macro is
    /// the single source of both.
    #[must_use]
    pub const fn new(
        name: &'static str,
        size: usize,
        parent: Option<DescriptorFn>,
        factory: CreateFn,
    ) -> Self {
        Self {
            name,
            size,
            parent,
            factory,
        }
    }

    /// Fully qualified name of the described type.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Size of the described type in bytes.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// The parent descriptor, or `None` at the hierarchy root.
    #[must_use]
    pub fn parent(&self) -> Option<&'static TypeDescriptor> {
        self.parent.map(|resolve| resolve())
    }

    /// Returns `true` iff this type has no parent.
    #[must_use]
    pub const fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Descriptor identity: both references name the same `static`.
    #[must_use]
    pub fn same_as(&self, other: &TypeDescriptor) -> bool {
        ptr::eq(self, other)
    }

    /// Name equality.
    ///
    /// Factories are deliberately not compared: two registrations under the
    /// same name are considered equal even if their factories differ. Use
    /// [`TypeDescriptor::same_as`] when identity matters.
    #[must_use]
    pub fn is_equal_to(&self, other: &TypeDescriptor) -> bool {
        self.name == other.name
    }

    /// Returns `true` iff `self` is the direct parent of `other`.
    #[must_use]
    pub fn is_parent_class_of(&self, other: &TypeDescriptor) -> bool {
        other.parent().is_some_and(|parent| parent.same_as(self))
    }

    /// Returns `true` iff `other` is the direct parent of `self`.
    #[must_use]
    pub fn is_child_class_of(&self, other: &TypeDescriptor) -> bool {
        self.parent().is_some_and(|parent| parent.same_as(other))
    }

    /// Walks the parent chain from `self` looking for `other`.
    ///
    /// A type counts as derived from itself. O(depth of the hierarchy).
    #[must_use]
    pub fn is_derived_from(&self, other: &TypeDescriptor) -> bool {
        let mut current = Some(self);
        while let Some(descriptor) = current {
            if descriptor.same_as(other) {
                return true;
            }
            current = descriptor.parent();
        }
        false
    }

    /// Returns `true` iff `other` is `self` or descends from it.
    #[must_use]
    pub fn is_base_of(&self, other: &TypeDescriptor) -> bool {
        other.is_derived_from(self)
    }

    /// Instantiates a fresh pointer-owned default instance of the
    /// described type.
    ///
    /// This is the only sanctioned way to construct a managed type from
    /// runtime type data alone.
    ///
    /// # Errors
    ///
    /// [`crate::ObjectError::AllocationFailure`] when the managed heap is
    /// exhausted.
    pub fn create(&self) -> ObjectResult<Pointer<dyn Managed>> {
        (self.factory)()
    }
}

impl fmt::Debug for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDescriptor")
            .field("name", &self.name)
            .field("size", &self.size)
            .field("parent", &self.parent().map(TypeDescriptor::name))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::managed_object;
    use crate::object::ObjectCore;

    #[derive(Default)]
    struct Root {
        core: ObjectCore,
    }
    managed_object!(Root);

    #[derive(Default)]
    struct Branch {
        core: ObjectCore,
    }
    managed_object!(Branch: Root);

    #[derive(Default)]
    struct Leaf {
        core: ObjectCore,
    }
    managed_object!(Leaf: Branch);

    #[test]
    fn test_root_and_parent_links() {
        assert!(Root::descriptor().is_root());
        assert!(!Branch::descriptor().is_root());
        assert!(!Leaf::descriptor().is_root());
        assert!(Branch::descriptor()
            .parent()
            .is_some_and(|parent| parent.same_as(Root::descriptor())));
    }

    #[test]
    fn test_direct_parent_child_queries() {
        assert!(Branch::descriptor().is_parent_class_of(Leaf::descriptor()));
        assert!(Leaf::descriptor().is_child_class_of(Branch::descriptor()));
        assert!(!Root::descriptor().is_parent_class_of(Leaf::descriptor()));
        assert!(!Leaf::descriptor().is_child_class_of(Root::descriptor()));
    }

    #[test]
    fn test_ancestry_walk() {
        assert!(Leaf::descriptor().is_derived_from(Root::descriptor()));
        assert!(Leaf::descriptor().is_derived_from(Branch::descriptor()));
        assert!(!Root::descriptor().is_derived_from(Leaf::descriptor()));
        assert!(Root::descriptor().is_base_of(Leaf::descriptor()));
        assert!(!Leaf::descriptor().is_base_of(Root::descriptor()));
    }

    #[test]
    fn test_name_and_size() {
        let descriptor = Leaf::descriptor();
        assert!(descriptor.name().ends_with("::Leaf"));
        assert_eq!(descriptor.size(), std::mem::size_of::<Leaf>());
    }

    #[test]
    fn test_identity_vs_name_equality() {
        assert!(Leaf::descriptor().same_as(Leaf::descriptor()));
        assert!(Leaf::descriptor().is_equal_to(Leaf::descriptor()));
        assert!(!Leaf::descriptor().is_equal_to(Branch::descriptor()));
    }

    #[test]
    fn test_factory_creates_pointer_owned_instance() {
        let created = Leaf::descriptor().create().expect("allocation");
        assert!(created.is_valid());
        assert_eq!(created.reference_count(), Some(1));
        assert!(created
            .get()
            .expect("valid")
            .type_descriptor()
            .same_as(Leaf::descriptor()));
    }
}
