//! JSON persistence for the Track.
//!
//! # Responsibility
//! - Convert between the Track and its on-disk JSON shape.
//! - Surface corrupt or inconsistent files as errors instead of dropping data.
//!
//! # Invariants
//! - Every loaded entity passes the same field validation as typed input.
//! - Files with same-kind duplicates are rejected as a whole.

use crate::collection::CollectionError;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod adapted;
mod json_track;

pub use json_track::JsonTrackStorage;

pub type StorageResult<T> = Result<T, StorageError>;

/// Errors from reading or writing persisted Track data.
#[derive(Debug)]
pub enum StorageError {
    /// File-system failure.
    Io(std::io::Error),
    /// File is not valid JSON for the expected shape.
    Json(serde_json::Error),
    /// A persisted field is missing or violates its constraints.
    InvalidData(String),
    /// Persisted data holds same-kind duplicates.
    Inconsistent(CollectionError),
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "{err}"),
            Self::Json(err) => write!(f, "malformed data file: {err}"),
            Self::InvalidData(message) => write!(f, "invalid data file: {message}"),
            Self::Inconsistent(err) => write!(f, "data file corrupted: {err}"),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Json(err) => Some(err),
            Self::InvalidData(_) => None,
            Self::Inconsistent(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for StorageError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl From<CollectionError> for StorageError {
    fn from(value: CollectionError) -> Self {
        Self::Inconsistent(value)
    }
}
