//! # Managed Object Core
//!
//! Every managed type embeds an [`ObjectCore`] (in a field named `core`)
//! and implements [`Managed`], normally through [`crate::managed_object!`].
//! The core carries the intrusive reference count and decides, at
//! installation time, which ownership regime the object lives in:
//!
//! - **Scope-owned** (count starts at 1): stack variables, embedded
//!   members, collection elements. References may attach and detach, but
//!   the count never returns to zero through normal reference traffic, so
//!   the owning scope remains responsible for destruction.
//! - **Pointer-owned** (count reset to 0 at installation): objects placed
//!   by the managed heap. The first [`crate::Pointer`] attach takes the
//!   count to 1 and the last detach releases the block.
//!
//! The regime is decided by consuming the pending entry in the
//! [`crate::alloc_table`]: only an object installed at an address the
//! managed heap just produced can claim it.
//!
//! # Thread Safety
//!
//! The count is a `Cell`; cores and everything embedding them are
//! `!Sync`, and pointers to them are `!Send`. The single-threaded design
//! is a compile-time fact, not a convention.

use std::cell::Cell;

use crate::alloc_table;
use crate::pointer::Pointer;
use crate::type_info::TypeDescriptor;

/// Intrusive reference count plus ownership-regime bookkeeping.
///
/// The count is mutated only by [`crate::Pointer`] (crate-private
/// accessors; the module boundary plays the role of a C++ `friend`
/// declaration).
#[derive(Debug)]
pub struct ObjectCore {
    /// Live reference count. 1 at construction; reset to 0 when a managed
    /// heap block is claimed.
    references: Cell<u32>,
}

impl ObjectCore {
    /// Creates a core in the scope-owned regime (count 1).
    #[must_use]
    pub fn new() -> Self {
        Self {
            references: Cell::new(1),
        }
    }

    /// Current reference count.
    #[must_use]
    pub fn reference_count(&self) -> u32 {
        self.references.get()
    }

    /// Attaches one reference.
    pub(crate) fn add_reference(&self) {
        let count = self.references.get();
        debug_assert!(count < u32::MAX, "reference count overflow");
        self.references.set(count + 1);
    }

    /// Detaches one reference, returning the remaining count.
    pub(crate) fn drop_reference(&self) -> u32 {
        let count = self.references.get();
        debug_assert!(count > 0, "reference count underflow");
        let remaining = count.saturating_sub(1);
        self.references.set(remaining);
        remaining
    }

    /// Consumes the pending-allocation entry for `address`, if any.
    ///
    /// On a match the object enters the pointer-owned regime (count 0).
    /// Absence of a match means the object was not installed by the
    /// managed heap and stays scope-owned; that is the expected outcome
    /// for every construction site except [`crate::Pointer::try_new`].
    pub(crate) fn claim(&self, address: usize) -> bool {
        if alloc_table::claim(address) {
            self.references.set(0);
            true
        } else {
            false
        }
    }
}

impl Default for ObjectCore {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for ObjectCore {
    /// Cloning a managed object produces a *new* object, which starts its
    /// own life scope-owned; the count is never copied.
    fn clone(&self) -> Self {
        Self::new()
    }
}

/// Contract for every type participating in the managed object system.
///
/// Implemented by [`crate::managed_object!`]; hand-written impls must
/// uphold the same invariants: `core` returns the embedded [`ObjectCore`],
/// and `descriptor`/`type_descriptor` return the one per-type `static`
/// descriptor.
pub trait Managed: 'static {
    /// The type's descriptor `static`.
    fn descriptor() -> &'static TypeDescriptor
    where
        Self: Sized;

    /// The embedded object core.
    fn core(&self) -> &ObjectCore;

    /// The descriptor for this object's dynamic type.
    fn type_descriptor(&self) -> &'static TypeDescriptor;

    /// Current reference count of this object.
    fn reference_count(&self) -> u32 {
        self.core().reference_count()
    }

    /// Returns a new counted reference to this object.
    ///
    /// # Safety
    ///
    /// The caller must guarantee the object outlives every pointer
    /// produced from it. For a scope-owned object the count never reaches
    /// zero through pointer traffic, so the pointer will not free it, but
    /// nothing stops the pointer from dangling past the owning scope.
    unsafe fn to_pointer(&self) -> Pointer<Self>
    where
        Self: Sized,
    {
        // SAFETY: forwarded contract.
        unsafe { Pointer::from_ref(self) }
    }
}

/// Declares a type as a managed object.
///
/// The type must embed an [`ObjectCore`] in a field named `core` and
/// implement `Default` (the descriptor factory default-constructs; a type
/// without a usable default constructor fails to compile, keeping
/// type-system misuse a compile-time error).
///
/// ```rust,ignore
/// #[derive(Default)]
/// struct Widget {
///     core: ObjectCore,
///     label: String,
/// }
/// managed_object!(Widget);
///
/// #[derive(Default)]
/// struct Button {
///     core: ObjectCore,
/// }
/// managed_object!(Button: Widget);   // parent type in the hierarchy
/// ```
#[macro_export]
macro_rules! managed_object {
    ($ty:ident) => {
        $crate::managed_object!(@impl $ty, ::core::option::Option::None);
    };
    ($ty:ident: $parent:path) => {
        $crate::managed_object!(
            @impl $ty,
            ::core::option::Option::Some(
                <$parent as $crate::object::Managed>::descriptor as $crate::type_info::DescriptorFn
            )
        );
    };
    (@impl $ty:ident, $parent:expr) => {
        impl $crate::object::Managed for $ty {
            fn descriptor() -> &'static $crate::type_info::TypeDescriptor {
                fn factory() -> $crate::error::ObjectResult<
                    $crate::pointer::Pointer<dyn $crate::object::Managed>,
                > {
                    ::core::result::Result::Ok(
                        $crate::pointer::Pointer::try_new(
                            <$ty as ::core::default::Default>::default(),
                        )?
                        .into_dyn(),
                    )
                }
                static DESCRIPTOR: $crate::type_info::TypeDescriptor =
                    $crate::type_info::TypeDescriptor::new(
                        concat!(module_path!(), "::", stringify!($ty)),
                        ::core::mem::size_of::<$ty>(),
                        $parent,
                        factory,
                    );
                &DESCRIPTOR
            }

            fn core(&self) -> &$crate::object::ObjectCore {
                &self.core
            }

            fn type_descriptor(&self) -> &'static $crate::type_info::TypeDescriptor {
                <$ty as $crate::object::Managed>::descriptor()
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Probe {
        core: ObjectCore,
        value: u32,
    }
    managed_object!(Probe);

    #[test]
    fn test_stack_construction_is_scope_owned() {
        let probe = Probe::default();
        assert_eq!(probe.reference_count(), 1);
        assert_eq!(probe.value, 0);
    }

    #[test]
    fn test_embedded_member_is_scope_owned() {
        struct Outer {
            inner: Probe,
        }
        let outer = Outer {
            inner: Probe::default(),
        };
        assert_eq!(outer.inner.reference_count(), 1);
    }

    #[test]
    fn test_collection_elements_are_scope_owned() {
        let probes: Vec<Probe> = (0..4).map(|_| Probe::default()).collect();
        for probe in &probes {
            assert_eq!(probe.reference_count(), 1);
        }
    }

    #[test]
    fn test_clone_starts_a_fresh_life() {
        let original = Probe {
            core: ObjectCore::new(),
            value: 7,
        };
        let pointer = unsafe { original.to_pointer() };
        assert_eq!(original.reference_count(), 2);

        let cloned = Probe {
            core: original.core.clone(),
            value: original.value,
        };
        assert_eq!(cloned.reference_count(), 1);
        assert_eq!(cloned.value, 7);
        drop(pointer);
    }

    #[test]
    fn test_claim_without_pending_entry_is_noop() {
        let probe = Probe::default();
        let address = &probe as *const Probe as usize;
        assert!(!probe.core().claim(address));
        assert_eq!(probe.reference_count(), 1);
    }
}
