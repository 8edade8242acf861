//! File-backed Track storage.

use super::adapted::SerializableTrack;
use super::StorageResult;
use crate::track::Track;
use log::{error, info};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Reads and writes one Track JSON file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonTrackStorage {
    path: PathBuf,
}

impl JsonTrackStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the Track, or `None` when the file does not exist yet.
    ///
    /// # Errors
    /// - `Json` when the file is not valid JSON.
    /// - `InvalidData` when an entry is missing a field or fails validation.
    /// - `Inconsistent` when the file holds same-kind duplicates.
    pub fn read_track(&self) -> StorageResult<Option<Track>> {
        let started_at = Instant::now();
        if !self.path.exists() {
            info!("event=track_read module=storage status=missing");
            return Ok(None);
        }

        match self.load() {
            Ok(track) => {
                info!(
                    "event=track_read module=storage status=ok duration_ms={} contacts={} modules={} lessons={} tasks={}",
                    started_at.elapsed().as_millis(),
                    track.contacts().len(),
                    track.modules().len(),
                    track.lessons().len(),
                    track.tasks().len()
                );
                Ok(Some(track))
            }
            Err(err) => {
                error!(
                    "event=track_read module=storage status=error duration_ms={} error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err)
            }
        }
    }

    /// Writes the Track as pretty JSON, creating parent directories.
    pub fn save_track(&self, track: &Track) -> StorageResult<()> {
        let started_at = Instant::now();
        let result = self.write(track);
        match &result {
            Ok(()) => info!(
                "event=track_save module=storage status=ok duration_ms={}",
                started_at.elapsed().as_millis()
            ),
            Err(err) => error!(
                "event=track_save module=storage status=error duration_ms={} error={}",
                started_at.elapsed().as_millis(),
                err
            ),
        }
        result
    }

    fn load(&self) -> StorageResult<Track> {
        let text = fs::read_to_string(&self.path)?;
        let document: SerializableTrack = serde_json::from_str(&text)?;
        document.to_model()
    }

    fn write(&self, track: &Track) -> StorageResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let text = serde_json::to_string_pretty(&SerializableTrack::from(track))?;
        fs::write(&self.path, text)?;
        Ok(())
    }
}
