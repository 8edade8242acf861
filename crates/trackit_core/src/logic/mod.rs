//! Command pipeline: parse a line, run it against the service, persist.
//!
//! # Responsibility
//! - Turn one line of user input into feedback.
//! - Save the Track after every successful mutating command.
//!
//! # Invariants
//! - A command that fails leaves the Track as it was and writes nothing.
//! - Reads and view updates never touch the storage file.
//!
//! # See also
//! - `parser` for the command grammar.
//! - `command` for the policy checks.

pub mod command;
pub mod parser;

use crate::service::track_service::TrackService;
use crate::storage::JsonTrackStorage;
use command::{CommandOutcome, CommandResult};
use log::{info, warn};
use std::time::Instant;

/// Front door of the core: owns the service and the storage it saves to.
pub struct Logic {
    service: TrackService,
    storage: JsonTrackStorage,
}

impl Logic {
    pub fn new(service: TrackService, storage: JsonTrackStorage) -> Self {
        Self { service, storage }
    }

    pub fn service(&self) -> &TrackService {
        &self.service
    }

    pub fn service_mut(&mut self) -> &mut TrackService {
        &mut self.service
    }

    pub fn storage(&self) -> &JsonTrackStorage {
        &self.storage
    }

    /// Parses and runs `input`.
    ///
    /// # Errors
    /// - `Parse` for malformed input.
    /// - `InvalidIndex`, `ModuleNotFound`, `LessonNotFound` or
    ///   `ModuleLimitReached` when a policy check rejects the command.
    /// - `Collection` when the Track rejects the change.
    /// - `Storage` when the change succeeded but could not be saved.
    pub fn execute(&mut self, input: &str) -> CommandResult<CommandOutcome> {
        let started_at = Instant::now();
        let command = match parser::parse_command(input) {
            Ok(command) => command,
            Err(err) => {
                info!("event=command module=logic status=rejected stage=parse");
                return Err(err.into());
            }
        };

        let word = command.word();
        let mutating = command.is_mutating();
        let outcome = match command.execute(&mut self.service) {
            Ok(outcome) => outcome,
            Err(err) => {
                info!(
                    "event=command module=logic status=rejected command={} duration_ms={}",
                    word,
                    started_at.elapsed().as_millis()
                );
                return Err(err);
            }
        };

        if mutating {
            if let Err(err) = self.storage.save_track(self.service.track()) {
                warn!("event=command module=logic status=unsaved command={word}");
                return Err(err.into());
            }
        }

        info!(
            "event=command module=logic status=ok command={} mutating={} duration_ms={}",
            word,
            mutating,
            started_at.elapsed().as_millis()
        );
        Ok(outcome)
    }
}
