//! Duplicate-free entity collections.
//!
//! # Responsibility
//! - Hold one ordered list per entity kind.
//! - Reject any mutation that would leave two same-kind elements behind.
//!
//! # Invariants
//! - No two elements satisfy `Identity::is_same`.
//! - A failed mutation leaves the list unchanged.
//! - Order is insertion order unless `sort_by` was called.

use crate::model::EntityKind;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod unique_list;

pub use unique_list::UniqueList;

pub type CollectionResult<T> = Result<T, CollectionError>;

/// Uniqueness and lookup failures raised by collection mutations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionError {
    /// An element with the same identity key already exists.
    DuplicateEntity(EntityKind),
    /// No element with the target's identity key exists.
    EntityNotFound(EntityKind),
    /// Incoming bulk data contains two elements with the same identity key.
    InconsistentSnapshot(EntityKind),
}

impl CollectionError {
    pub fn kind(&self) -> EntityKind {
        match self {
            Self::DuplicateEntity(kind)
            | Self::EntityNotFound(kind)
            | Self::InconsistentSnapshot(kind) => *kind,
        }
    }
}

impl Display for CollectionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateEntity(kind) => write!(f, "this {kind} already exists"),
            Self::EntityNotFound(kind) => write!(f, "this {kind} does not exist"),
            Self::InconsistentSnapshot(kind) => {
                write!(f, "data contains duplicate {kind} entries")
            }
        }
    }
}

impl Error for CollectionError {}
