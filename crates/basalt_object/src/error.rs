//! # Object System Error Types
//!
//! All runtime failures of the managed object system surface here as
//! checked results. Type-level misuse (a managed type without a default
//! constructor, a handle crossing threads) stays a compile error and never
//! reaches this enum.

use thiserror::Error;

/// Errors that can occur in the managed object system.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ObjectError {
    /// The managed heap could not satisfy an allocation request.
    #[error("managed heap allocation failed: {size} bytes requested")]
    AllocationFailure {
        /// Size of the rejected request in bytes.
        size: usize,
    },

    /// A null reference was dereferenced or adopted.
    #[error("invalid reference: the pointer does not refer to an object")]
    InvalidReference,

    /// A downcast found a different dynamic type than requested.
    #[error("type mismatch: expected {expected}, found {actual}")]
    TypeMismatch {
        /// Fully qualified name of the requested type.
        expected: &'static str,
        /// Fully qualified name of the object's dynamic type.
        actual: &'static str,
    },

    /// A registry lookup found no descriptor under the given name.
    #[error("unknown type: {0}")]
    UnknownType(String),
}

/// Result type for managed object operations.
pub type ObjectResult<T> = Result<T, ObjectError>;
