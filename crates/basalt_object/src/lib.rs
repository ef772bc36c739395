//! # Basalt Object System
//!
//! Intrusive reference-counted object ownership for the Basalt engine:
//! lightweight runtime type descriptors, counted smart references, and
//! the pending-allocation table that decides each object's ownership
//! regime at construction.
//!
//! ## Architecture Rules
//!
//! 1. **One thread owns the object graph** - counts are `Cell`s and the
//!    allocation table is a per-thread shard; handles are `!Send + !Sync`
//! 2. **Runtime failures are checked results** - allocation failure and
//!    null dereference surface as [`ObjectError`], never as UB
//! 3. **Ownership is decided at the allocation site** - managed-heap
//!    blocks claim their table entry and become pointer-owned; every
//!    other construction site is scope-owned
//!
//! ## Example
//!
//! ```rust,ignore
//! use basalt_object::{managed_object, ObjectCore, Pointer};
//!
//! #[derive(Default)]
//! struct Widget {
//!     core: ObjectCore,
//!     frame: u64,
//! }
//! managed_object!(Widget);
//!
//! let widget = Pointer::new(Widget::default());
//! let alias = widget.clone();          // count: 2
//! drop(widget);                        // count: 1
//! drop(alias);                         // count: 0, Widget destroyed
//! ```

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]
// `unsafe` is confined to pointer attach/deref and the managed heap;
// every block states the invariant it relies on.

pub mod alloc_table;
pub mod error;
mod heap;
pub mod object;
pub mod pointer;
pub mod registry;
pub mod type_info;

pub use alloc_table::AllocationTable;
pub use error::{ObjectError, ObjectResult};
pub use object::{Managed, ObjectCore};
pub use pointer::Pointer;
pub use registry::TypeRegistry;
pub use type_info::TypeDescriptor;
