//! Module (course) entity.

use super::fields::{Code, Name};
use super::{EntityKind, Identity};
use std::fmt::{Display, Formatter};

/// A university module, identified by its code.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Module {
    code: Code,
    name: Name,
    description: String,
}

impl Module {
    pub fn new(code: Code, name: Name, description: impl Into<String>) -> Self {
        Self {
            code,
            name,
            description: description.into().trim().to_string(),
        }
    }

    pub fn code(&self) -> &Code {
        &self.code
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

impl Identity for Module {
    const KIND: EntityKind = EntityKind::Module;

    fn is_same(&self, other: &Self) -> bool {
        self.code == other.code
    }
}

impl Display for Module {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.code, self.name)?;
        if !self.description.is_empty() {
            write!(f, " ({})", self.description)?;
        }
        Ok(())
    }
}
