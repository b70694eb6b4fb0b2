// backup.rs — Full-snapshot export for round-trip restore.
//
// A backup is a single JSON document holding every goal plus a SHA-256
// checksum of the serialized goal array (lowercase hex). Reading a backup
// back into a store is the caller's job; this module only produces and
// checks documents.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::GoalError;
use crate::goal::Goal;

/// Current backup document layout.
pub const BACKUP_VERSION: u32 = 1;

/// Serialized snapshot of the whole goal collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupDocument {
    pub version: u32,
    pub exported_at: DateTime<Utc>,
    /// SHA-256 of the compact JSON encoding of `goals`.
    pub checksum: String,
    pub goals: Vec<Goal>,
}

impl BackupDocument {
    pub fn new(goals: &[Goal]) -> Result<Self, GoalError> {
        Ok(Self {
            version: BACKUP_VERSION,
            exported_at: Utc::now(),
            checksum: goals_checksum(goals)?,
            goals: goals.to_vec(),
        })
    }

    /// Recompute the checksum and compare it to the stored one.
    pub fn verify(&self) -> Result<(), GoalError> {
        let found = goals_checksum(&self.goals)?;
        if found != self.checksum {
            return Err(GoalError::ChecksumMismatch {
                expected: self.checksum.clone(),
                found,
            });
        }
        Ok(())
    }
}

/// Hex-encoded SHA-256 over the compact JSON of `goals`.
pub fn goals_checksum(goals: &[Goal]) -> Result<String, GoalError> {
    let bytes = serde_json::to_vec(goals)?;
    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    Ok(format!("{:x}", hasher.finalize()))
}

/// Destination for full goal snapshots.
pub trait BackupSink {
    /// Write the snapshot. Returns the document that was written.
    fn write_backup(&self, goals: &[Goal]) -> Result<BackupDocument, GoalError>;
}

/// Writes backups as pretty-printed JSON to a fixed path (overwriting).
pub struct JsonFileBackup {
    path: PathBuf,
}

impl JsonFileBackup {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl BackupSink for JsonFileBackup {
    fn write_backup(&self, goals: &[Goal]) -> Result<BackupDocument, GoalError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| GoalError::IoError {
                path: parent.display().to_string(),
                source,
            })?;
        }

        let document = BackupDocument::new(goals)?;
        let json = serde_json::to_string_pretty(&document)?;
        fs::write(&self.path, json).map_err(|source| GoalError::IoError {
            path: self.path.display().to_string(),
            source,
        })?;

        tracing::debug!(path = %self.path.display(), goals = goals.len(), "backup written");
        Ok(document)
    }
}
