//! Domain model for contacts, modules, lessons and tasks.
//!
//! # Responsibility
//! - Define the immutable entity records stored in the Track.
//! - Separate same-kind identity from full value equality.
//!
//! # Invariants
//! - Entities are never mutated after construction; edits build a new value.
//! - `PartialEq` is full value equality, `Identity::is_same` is the weaker
//!   key used for uniqueness and lookup.

use std::fmt::{Display, Formatter};

pub mod contact;
pub mod fields;
pub mod lesson;
pub mod module;
pub mod task;

/// Entity kind tag carried by collection errors and log events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Contact,
    Module,
    Lesson,
    Task,
}

impl EntityKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Contact => "contact",
            Self::Module => "module",
            Self::Lesson => "lesson",
            Self::Task => "task",
        }
    }
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Same-kind identity used for de-duplication.
///
/// Two values that are `is_same` may still differ in full value; a collection
/// never holds two elements that are `is_same`.
pub trait Identity {
    const KIND: EntityKind;

    fn is_same(&self, other: &Self) -> bool;
}
