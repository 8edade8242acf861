//! Core domain logic for TrackIt.
//! This crate is the single source of truth for Track invariants.

pub mod clock;
pub mod collection;
pub mod config;
pub mod logging;
pub mod logic;
pub mod model;
pub mod predicate;
pub mod service;
pub mod storage;
pub mod track;
pub mod view;

pub use clock::{Clock, FixedClock, SystemClock};
pub use collection::{CollectionError, CollectionResult, UniqueList};
pub use config::{ConfigError, UserPrefs, DEFAULT_PREFS_PATH};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use logic::command::{Command, CommandError, CommandOutcome, CommandResult};
pub use logic::Logic;
pub use model::contact::Contact;
pub use model::fields::{Address, Code, Email, FieldError, Name, Phone, Tag};
pub use model::lesson::{Lesson, LessonDateTime, LessonType, LessonWeekday};
pub use model::module::Module;
pub use model::task::Task;
pub use model::{EntityKind, Identity};
pub use predicate::Predicate;
pub use service::track_service::{TrackService, MAX_MODULES};
pub use storage::{JsonTrackStorage, StorageError, StorageResult};
pub use track::{Track, TrackSnapshot};
pub use view::FilteredView;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
