//! Task entity.
//!
//! Tasks have no identity key of their own: two tasks are duplicates only when
//! every field matches.

use super::fields::{Code, FieldError, FieldResult, Name};
use super::{EntityKind, Identity};
use chrono::NaiveDate;
use std::fmt::{Display, Formatter};

/// Text form of task due dates, e.g. `20/11/2020`.
pub const DATE_FORMAT: &str = "%d/%m/%Y";
pub const DATE_CONSTRAINTS: &str = "Dates should be of the format dd/mm/yyyy, e.g. 20/11/2020";

/// Parses a `dd/mm/yyyy` date.
pub fn parse_date(value: &str) -> FieldResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .map_err(|_| FieldError::InvalidDate(value.to_string()))
}

/// Formats a date as `dd/mm/yyyy`.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// A deadline, optionally attached to a module.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Task {
    name: Name,
    date: NaiveDate,
    code: Option<Code>,
    remark: Option<String>,
}

impl Task {
    /// Creates a task. A blank remark is stored as no remark.
    pub fn new(name: Name, date: NaiveDate, code: Option<Code>, remark: Option<String>) -> Self {
        let remark = remark
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty());
        Self {
            name,
            date,
            code,
            remark,
        }
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn code(&self) -> Option<&Code> {
        self.code.as_ref()
    }

    pub fn remark(&self) -> Option<&str> {
        self.remark.as_deref()
    }
}

impl Identity for Task {
    const KIND: EntityKind = EntityKind::Task;

    fn is_same(&self, other: &Self) -> bool {
        self == other
    }
}

impl Display for Task {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} due {}", self.name, format_date(self.date))?;
        if let Some(code) = &self.code {
            write!(f, " [{code}]")?;
        }
        if let Some(remark) = &self.remark {
            write!(f, " Remark: {remark}")?;
        }
        Ok(())
    }
}
