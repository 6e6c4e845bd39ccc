//! File-backed audit trail of relay operations.
//!
//! Each relay outcome becomes one JSON line. The file can be read back as
//! `AuditEntry` values and queried for rejected requests or for the history
//! of one (resource, role) pair.

use acl_relay_core::{AuditEntry, AuditSink, Resource, Role};
use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

#[derive(Error, Debug)]
pub enum AuditTrailError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Corrupt audit record on line {line}: {source}")]
    Corrupt {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

pub struct AuditTrail {
    path: PathBuf,
    writer: Mutex<File>,
}

impl AuditTrail {
    /// Opens `path` for appending, creating it and its parent directories.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, AuditTrailError> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let writer = OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(Self {
            path,
            writer: Mutex::new(writer),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append(&self, entry: &AuditEntry) -> Result<(), AuditTrailError> {
        let line = serde_json::to_string(entry)?;
        let mut writer = self.writer.lock();
        writeln!(writer, "{}", line)?;
        writer.sync_data()?;
        Ok(())
    }

    /// Every recorded entry, oldest first.
    pub fn entries(&self) -> Result<Vec<AuditEntry>, AuditTrailError> {
        // Holding the writer lock keeps a concurrent append from showing up
        // as a half-written line.
        let _writer = self.writer.lock();
        let reader = BufReader::new(File::open(&self.path)?);

        let mut entries = Vec::new();
        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let entry = serde_json::from_str(&line).map_err(|source| AuditTrailError::Corrupt {
                line: index + 1,
                source,
            })?;
            entries.push(entry);
        }
        Ok(entries)
    }

    /// Entries whose request never reached the oracle or was refused by it.
    pub fn rejections(&self) -> Result<Vec<AuditEntry>, AuditTrailError> {
        Ok(self
            .entries()?
            .into_iter()
            .filter(|entry| !entry.outcome.is_forwarded())
            .collect())
    }

    /// Entries that targeted `role` on `resource`.
    pub fn history(
        &self,
        resource: Resource,
        role: Role,
    ) -> Result<Vec<AuditEntry>, AuditTrailError> {
        Ok(self
            .entries()?
            .into_iter()
            .filter(|entry| entry.resource == resource && entry.role == role)
            .collect())
    }
}

impl AuditSink for AuditTrail {
    fn record(&self, entry: &AuditEntry) {
        if let Err(e) = self.append(entry) {
            warn!(
                "Dropped audit entry for {:?} by {} on {}: {}",
                entry.operation,
                entry.caller,
                self.path.display(),
                e
            );
        }
    }
}
