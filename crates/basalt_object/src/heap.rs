//! # Managed Heap
//!
//! Entry and exit points of the managed heap: the counterparts of the
//! overridden allocation operators in the original object system. Every
//! block is recorded in the calling thread's allocation table *before* any
//! value exists at the address; installing the value then claims the entry,
//! which is what flips the object into the pointer-owned regime.
//!
//! The record → install → claim sequence is sound because the table is a
//! per-thread shard and the whole sequence runs inside one function call;
//! no other allocation can interleave.

use std::alloc::{alloc, dealloc, Layout};
use std::ptr::{self, NonNull};

use crate::alloc_table;
use crate::error::{ObjectError, ObjectResult};
use crate::object::Managed;

/// Allocates a raw block for `T` and records its address as pending.
///
/// A null return from the global allocator surfaces as
/// [`ObjectError::AllocationFailure`] before any table mutation: a failed
/// allocation is never recorded.
fn allocate_raw<T>() -> ObjectResult<NonNull<T>> {
    let layout = Layout::new::<T>();
    debug_assert!(layout.size() > 0, "managed types embed an ObjectCore");
    // SAFETY: layout has non-zero size (every managed type embeds a core).
    let raw = unsafe { alloc(layout) };
    let Some(block) = NonNull::new(raw.cast::<T>()) else {
        return Err(ObjectError::AllocationFailure {
            size: layout.size(),
        });
    };
    alloc_table::record(block.as_ptr() as usize);
    Ok(block)
}

/// Allocates, records, installs `value`, and claims the entry.
///
/// The returned object is pointer-owned with a reference count of zero:
/// the state an object is in immediately after managed-heap construction
/// and before the first reference attaches.
pub(crate) fn construct<T: Managed>(value: T) -> ObjectResult<NonNull<T>> {
    let block = allocate_raw::<T>()?;
    // SAFETY: freshly allocated block, properly sized and aligned for T.
    unsafe { ptr::write(block.as_ptr(), value) };
    // SAFETY: the value was just installed at this address.
    let object = unsafe { block.as_ref() };
    let claimed = object.core().claim(block.as_ptr() as usize);
    debug_assert!(claimed, "the entry recorded above must still be pending");
    tracing::trace!(
        address = block.as_ptr() as usize,
        type_name = object.type_descriptor().name(),
        "managed construct"
    );
    Ok(block)
}

/// Destroys the object and returns its block to the global allocator.
///
/// Called exactly once per pointer-owned object, by the reference that
/// took the count from 1 to 0.
pub(crate) fn release<T: Managed + ?Sized>(block: NonNull<T>) {
    // SAFETY: the caller owns the last reference; no other live reference
    // can observe the object during or after this call.
    unsafe {
        let object = block.as_ref();
        let layout = Layout::for_value(object);
        tracing::trace!(
            address = block.as_ptr().cast::<u8>() as usize,
            type_name = object.type_descriptor().name(),
            "managed release"
        );
        ptr::drop_in_place(block.as_ptr());
        dealloc(block.as_ptr().cast::<u8>(), layout);
    }
}
