//! JSON checkpoints of the world.
//!
//! A checkpoint is a [`WorldRecord`] written as pretty-printed JSON to
//! `checkpoint_<day>.json`. Memory and daily state are not persisted, so a
//! resumed world starts every agent with an empty memory.

use std::fs;
use std::path::{Path, PathBuf};

use foragers_core::World;
use foragers_core::runner::{CallbackError, DayCallback};
use foragers_core::tick::DaySummary;
use foragers_types::WorldRecord;
use tracing::info;

use crate::error::EngineError;

/// Path of the checkpoint for `day` inside `directory`.
pub fn checkpoint_path(directory: &Path, day: u64) -> PathBuf {
    directory.join(format!("checkpoint_{day}.json"))
}

/// Write `record` as the checkpoint for `day`, creating `directory` if
/// needed. Returns the written path.
///
/// # Errors
///
/// Returns [`EngineError::CheckpointIo`] if the directory or file cannot be
/// written, or [`EngineError::CheckpointJson`] if encoding fails.
pub fn write(directory: &Path, day: u64, record: &WorldRecord) -> Result<PathBuf, EngineError> {
    fs::create_dir_all(directory).map_err(|source| EngineError::CheckpointIo {
        path: directory.to_path_buf(),
        source,
    })?;
    let path = checkpoint_path(directory, day);
    let json = serde_json::to_string_pretty(record).map_err(|source| EngineError::CheckpointJson {
        path: path.clone(),
        source,
    })?;
    fs::write(&path, json).map_err(|source| EngineError::CheckpointIo {
        path: path.clone(),
        source,
    })?;
    info!(
        day,
        path = %path.display(),
        agents = record.agents.len(),
        "Checkpoint written"
    );
    Ok(path)
}

/// Read a checkpoint record from `path`.
///
/// # Errors
///
/// Returns [`EngineError::CheckpointIo`] if the file cannot be read, or
/// [`EngineError::CheckpointJson`] if it is not a valid record.
pub fn read(path: &Path) -> Result<WorldRecord, EngineError> {
    let contents = fs::read_to_string(path).map_err(|source| EngineError::CheckpointIo {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| EngineError::CheckpointJson {
        path: path.to_path_buf(),
        source,
    })
}

// ---------------------------------------------------------------------------
// Day callback
// ---------------------------------------------------------------------------

/// Day callback that writes a checkpoint every `days_per_checkpoint` days
/// and logs one line per day.
pub struct CheckpointWriter {
    directory: PathBuf,
    days_per_checkpoint: u64,
}

impl CheckpointWriter {
    /// Create a writer. A period of zero disables periodic checkpoints.
    pub const fn new(directory: PathBuf, days_per_checkpoint: u64) -> Self {
        Self {
            directory,
            days_per_checkpoint,
        }
    }

    /// Whether the day that just ended gets a checkpoint.
    pub const fn is_due(&self, day: u64) -> bool {
        matches!(day.checked_rem(self.days_per_checkpoint), Some(0))
    }
}

impl DayCallback for CheckpointWriter {
    fn on_day_end(&mut self, summary: &DaySummary, world: &World) -> Result<(), CallbackError> {
        info!(
            day = summary.day,
            population = summary.population,
            deaths = summary.deaths,
            births = summary.births,
            aggressiveness = summary.mean_aggressiveness,
            harvest_percent = summary.mean_harvest_percent,
            max_memory = summary.mean_max_memory,
            "Day summary"
        );
        if self.is_due(summary.day) {
            write(&self.directory, summary.day, &world.snapshot())?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use foragers_types::{AgentRecord, ShelterRecord, SiteRecord};

    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "foragers-checkpoint-{name}-{}",
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    fn sample_record() -> WorldRecord {
        WorldRecord {
            shelters: vec![ShelterRecord {
                x: 1.0,
                y: 2.0,
                max_capacity: 4,
            }],
            resource_sites: vec![SiteRecord {
                x: 10.0,
                y: 20.0,
                max_calories: 600,
            }],
            agents: vec![AgentRecord {
                x: 5.5,
                y: 6.5,
                aggressiveness: 0.25,
                harvest_percent: 0.75,
                max_memory: 3,
            }],
        }
    }

    #[test]
    fn path_uses_day_number() {
        let path = checkpoint_path(Path::new("out"), 25);
        assert_eq!(path, Path::new("out").join("checkpoint_25.json"));
    }

    #[test]
    fn written_checkpoint_reads_back() {
        let dir = scratch_dir("roundtrip");
        let record = sample_record();
        let path = write(&dir, 0, &record).unwrap();
        assert!(path.ends_with("checkpoint_0.json"));
        assert_eq!(read(&path).unwrap(), record);
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn reading_missing_file_is_io_error() {
        let dir = scratch_dir("missing");
        let result = read(&dir.join("checkpoint_7.json"));
        assert!(matches!(result, Err(EngineError::CheckpointIo { .. })));
    }

    #[test]
    fn reading_garbage_is_json_error() {
        let dir = scratch_dir("garbage");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("checkpoint_1.json");
        fs::write(&path, "{ not json").unwrap();
        let result = read(&path);
        assert!(matches!(result, Err(EngineError::CheckpointJson { .. })));
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn writer_schedule_follows_period() {
        let writer = CheckpointWriter::new(PathBuf::from("unused"), 25);
        assert!(!writer.is_due(1));
        assert!(!writer.is_due(24));
        assert!(writer.is_due(25));
        assert!(writer.is_due(50));

        let disabled = CheckpointWriter::new(PathBuf::from("unused"), 0);
        assert!(!disabled.is_due(25));
    }
}
