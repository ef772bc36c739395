//! # Counted References
//!
//! [`Pointer`] is the engine's smart reference to a managed object: a
//! possibly-null raw pointer whose attach/detach traffic drives the
//! object's intrusive count. The last detach from a pointer-owned object
//! releases its heap block; scope-owned objects survive any amount of
//! pointer traffic because their count never returns to zero.
//!
//! Dereference is checked: [`Pointer::get`] returns a result and the
//! `Deref` impl panics with the same error rather than touching a null
//! pointer.
//!
//! # Thread Safety
//!
//! `Pointer` is `!Send + !Sync` (raw pointer to a `Cell`-counted core).
//! Sharing a managed object across threads is a compile error.

use std::fmt;
use std::ops::Deref;
use std::ptr::NonNull;

use crate::error::{ObjectError, ObjectResult};
use crate::heap;
use crate::object::Managed;

/// Counted reference to a managed object, possibly null.
///
/// Every live `Pointer` holds exactly one count on its target; clone,
/// assignment and drop keep that invariant without exception.
pub struct Pointer<T: Managed + ?Sized> {
    /// The referenced object, or `None` for a null reference.
    target: Option<NonNull<T>>,
}

impl<T: Managed + ?Sized> Pointer<T> {
    /// A null reference. Attaches to nothing.
    #[must_use]
    pub const fn null() -> Self {
        Self { target: None }
    }

    /// Returns `true` when this reference has a target.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.target.is_some()
    }

    /// Wraps `block` and attaches one reference to it.
    ///
    /// # Safety
    ///
    /// `block` must point at a live managed object.
    pub(crate) unsafe fn attach(block: NonNull<T>) -> Self {
        // SAFETY: forwarded contract.
        unsafe { block.as_ref() }.core().add_reference();
        Self {
            target: Some(block),
        }
    }

    /// Creates a counted reference to an existing object.
    ///
    /// This is the borrowed-object constructor: the scope-owned count
    /// convention guarantees the returned pointer will never free the
    /// object, but nothing ties the pointer's lifetime to the object's.
    ///
    /// # Safety
    ///
    /// The caller must guarantee `object` outlives the returned pointer
    /// and every pointer cloned from it.
    #[must_use]
    pub unsafe fn from_ref(object: &T) -> Self {
        object.core().add_reference();
        Self {
            target: Some(NonNull::from(object)),
        }
    }

    /// Borrows the target.
    ///
    /// # Errors
    ///
    /// [`ObjectError::InvalidReference`] when the reference is null.
    pub fn get(&self) -> ObjectResult<&T> {
        match self.target {
            // SAFETY: an attached target stays alive at least as long as
            // this reference holds its count.
            Some(block) => Ok(unsafe { &*block.as_ptr() }),
            None => Err(ObjectError::InvalidReference),
        }
    }

    /// Borrows the target, or `None` for a null reference.
    #[must_use]
    pub fn as_object(&self) -> Option<&T> {
        self.get().ok()
    }

    /// Reference count of the target, or `None` for a null reference.
    #[must_use]
    pub fn reference_count(&self) -> Option<u32> {
        self.as_object().map(|object| object.core().reference_count())
    }

    /// Address identity: two references are the same object iff their
    /// raw addresses are equal. Two null references compare equal.
    #[must_use]
    pub fn is_same_object(&self, other: &Self) -> bool {
        self.address() == other.address()
    }

    /// Detaches from the current target, making this reference null.
    ///
    /// Equivalent to assigning a null pointer: if this was the last
    /// reference to a pointer-owned object, the object is destroyed here.
    pub fn clear(&mut self) {
        *self = Self::null();
    }

    /// Thin address of the target for identity comparisons.
    fn address(&self) -> Option<usize> {
        self.target.map(|block| block.as_ptr().cast::<u8>() as usize)
    }
}

impl<T: Managed> Pointer<T> {
    /// Moves `value` onto the managed heap and attaches the first
    /// reference. The object enters the pointer-owned regime: its count
    /// goes 0 → 1 here, and the last detach will destroy it.
    ///
    /// # Errors
    ///
    /// [`ObjectError::AllocationFailure`] when the global allocator
    /// rejects the request; the value is dropped in place in that case.
    pub fn try_new(value: T) -> ObjectResult<Self> {
        let block = heap::construct(value)?;
        // SAFETY: freshly constructed pointer-owned block.
        Ok(unsafe { Self::attach(block) })
    }

    /// Like [`Pointer::try_new`], aborting on allocation failure the way
    /// the global allocator does.
    #[must_use]
    pub fn new(value: T) -> Self {
        match Self::try_new(value) {
            Ok(pointer) => pointer,
            Err(_) => std::alloc::handle_alloc_error(std::alloc::Layout::new::<T>()),
        }
    }

    /// Raw pointer to the target; null for a null reference. No side
    /// effects on the count.
    #[must_use]
    pub fn as_ptr(&self) -> *const T {
        self.target
            .map_or(std::ptr::null(), |block| block.as_ptr().cast_const())
    }

    /// Returns a new type-erased reference to the same object.
    ///
    /// This is the upcast: the descriptor chain still answers ancestry
    /// queries for the erased object. The count increases by one, exactly
    /// as for any other new reference.
    #[must_use]
    pub fn upcast(&self) -> Pointer<dyn Managed> {
        match self.target {
            Some(block) => {
                let wide: NonNull<dyn Managed> = block;
                // SAFETY: same live object, new reference.
                unsafe { Pointer::attach(wide) }
            }
            None => Pointer::null(),
        }
    }

    /// Converts into a type-erased reference, transferring the held count
    /// rather than attaching a new one.
    #[must_use]
    pub fn into_dyn(self) -> Pointer<dyn Managed> {
        let target = self.target;
        std::mem::forget(self);
        match target {
            Some(block) => {
                let wide: NonNull<dyn Managed> = block;
                Pointer { target: Some(wide) }
            }
            None => Pointer::null(),
        }
    }
}

impl Pointer<dyn Managed> {
    /// Returns a new typed reference to the same object if its dynamic
    /// type is exactly `U`.
    ///
    /// Ancestry is a descriptor-chain question, not a memory cast: a
    /// downcast to anything but the exact dynamic type is refused.
    ///
    /// # Errors
    ///
    /// [`ObjectError::InvalidReference`] on a null reference,
    /// [`ObjectError::TypeMismatch`] when the dynamic type differs.
    pub fn downcast<U: Managed>(&self) -> ObjectResult<Pointer<U>> {
        let Some(block) = self.target else {
            return Err(ObjectError::InvalidReference);
        };
        // SAFETY: attached target is alive.
        let object = unsafe { block.as_ref() };
        let actual = object.type_descriptor();
        let expected = U::descriptor();
        if actual.same_as(expected) {
            // SAFETY: dynamic type verified; the data pointer is a valid U.
            Ok(unsafe { Pointer::attach(block.cast::<U>()) })
        } else {
            Err(ObjectError::TypeMismatch {
                expected: expected.name(),
                actual: actual.name(),
            })
        }
    }
}

impl<T: Managed + ?Sized> Clone for Pointer<T> {
    fn clone(&self) -> Self {
        match self.target {
            // SAFETY: our own count keeps the target alive across attach.
            Some(block) => unsafe { Self::attach(block) },
            None => Self::null(),
        }
    }
}

impl<T: Managed + ?Sized> Drop for Pointer<T> {
    fn drop(&mut self) {
        if let Some(block) = self.target.take() {
            // SAFETY: the target is alive until the count reaches zero,
            // and only one reference can observe the 1 → 0 transition.
            let remaining = unsafe { block.as_ref() }.core().drop_reference();
            if remaining == 0 {
                heap::release(block);
            }
        }
    }
}

impl<T: Managed + ?Sized> Default for Pointer<T> {
    fn default() -> Self {
        Self::null()
    }
}

impl<T: Managed + ?Sized> Deref for Pointer<T> {
    type Target = T;

    /// Checked dereference; panics on a null reference with the
    /// [`ObjectError::InvalidReference`] message. Use [`Pointer::get`]
    /// where a recoverable result is wanted.
    fn deref(&self) -> &T {
        match self.get() {
            Ok(object) => object,
            Err(error) => panic!("{error}"),
        }
    }
}

impl<T: Managed + ?Sized> PartialEq for Pointer<T> {
    fn eq(&self, other: &Self) -> bool {
        self.is_same_object(other)
    }
}

impl<T: Managed + ?Sized> Eq for Pointer<T> {}

impl<T: Managed + ?Sized> fmt::Debug for Pointer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_object() {
            Some(object) => f
                .debug_struct("Pointer")
                .field("type", &object.type_descriptor().name())
                .field("address", &self.address())
                .field("references", &object.core().reference_count())
                .finish(),
            None => f.debug_struct("Pointer").field("target", &"null").finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::managed_object;
    use crate::object::ObjectCore;

    #[derive(Default)]
    struct Widget {
        core: ObjectCore,
        label: u32,
    }
    managed_object!(Widget);

    #[derive(Default)]
    struct Gadget {
        core: ObjectCore,
    }
    managed_object!(Gadget: Widget);

    #[test]
    fn test_null_pointer() {
        let pointer: Pointer<Widget> = Pointer::null();
        assert!(!pointer.is_valid());
        assert!(pointer.as_ptr().is_null());
        assert!(matches!(pointer.get(), Err(ObjectError::InvalidReference)));
        assert_eq!(pointer.reference_count(), None);
    }

    #[test]
    fn test_new_attaches_first_reference() {
        let pointer = Pointer::new(Widget {
            core: ObjectCore::new(),
            label: 9,
        });
        assert!(pointer.is_valid());
        assert_eq!(pointer.reference_count(), Some(1));
        assert_eq!(pointer.get().expect("valid").label, 9);
    }

    #[test]
    fn test_clone_and_drop_symmetry() {
        let first = Pointer::new(Widget::default());
        let second = first.clone();
        assert_eq!(first.reference_count(), Some(2));
        assert!(first.is_same_object(&second));

        drop(second);
        assert_eq!(first.reference_count(), Some(1));
    }

    #[test]
    fn test_reassignment_detaches_old_target() {
        let keeper = Pointer::new(Widget::default());
        let mut roving = keeper.clone();
        assert_eq!(roving.reference_count(), Some(2));

        roving = Pointer::new(Widget::default());
        assert_eq!(keeper.reference_count(), Some(1));
        assert_eq!(roving.reference_count(), Some(1));
        assert!(!keeper.is_same_object(&roving));
    }

    #[test]
    fn test_clear_is_null_assignment() {
        let mut pointer = Pointer::new(Widget::default());
        pointer.clear();
        assert!(!pointer.is_valid());
    }

    #[test]
    fn test_scope_owned_object_survives_pointer_traffic() {
        let widget = Widget::default();
        assert_eq!(widget.core().reference_count(), 1);
        {
            // SAFETY: `widget` outlives the pointer scope below.
            let pointer = unsafe { Pointer::from_ref(&widget) };
            assert_eq!(pointer.reference_count(), Some(2));
        }
        assert_eq!(widget.core().reference_count(), 1);
    }

    #[test]
    fn test_upcast_is_a_second_reference() {
        let typed = Pointer::new(Widget::default());
        let erased = typed.upcast();
        assert_eq!(typed.reference_count(), Some(2));
        assert!(erased
            .get()
            .expect("valid")
            .type_descriptor()
            .same_as(Widget::descriptor()));
    }

    #[test]
    fn test_into_dyn_transfers_the_count() {
        let typed = Pointer::new(Widget::default());
        let erased = typed.into_dyn();
        assert_eq!(erased.reference_count(), Some(1));
    }

    #[test]
    fn test_downcast_exact_type() {
        let erased = Pointer::new(Widget::default()).into_dyn();
        let typed = erased.downcast::<Widget>().expect("exact dynamic type");
        assert_eq!(erased.reference_count(), Some(2));
        assert_eq!(typed.get().expect("valid").label, 0);
    }

    #[test]
    fn test_downcast_wrong_type_is_refused() {
        let erased = Pointer::new(Gadget::default()).into_dyn();
        let result = erased.downcast::<Widget>();
        assert!(matches!(result, Err(ObjectError::TypeMismatch { .. })));
        assert_eq!(erased.reference_count(), Some(1));
    }

    #[test]
    fn test_downcast_null_reference() {
        let erased: Pointer<dyn Managed> = Pointer::null();
        assert_eq!(
            erased.downcast::<Widget>().err(),
            Some(ObjectError::InvalidReference)
        );
    }

    #[test]
    fn test_equality_is_address_identity() {
        let first = Pointer::new(Widget::default());
        let alias = first.clone();
        let other = Pointer::new(Widget::default());
        assert_eq!(first, alias);
        assert_ne!(first, other);

        let null_a: Pointer<Widget> = Pointer::null();
        let null_b: Pointer<Widget> = Pointer::null();
        assert_eq!(null_a, null_b);
    }

    #[test]
    fn test_deref_reads_through() {
        let pointer = Pointer::new(Widget {
            core: ObjectCore::new(),
            label: 3,
        });
        assert_eq!(pointer.label, 3);
    }
}
