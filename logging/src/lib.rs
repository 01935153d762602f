#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]

//! Structured JSONL logging shared across the screening crates.

use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use anyhow::Result;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

/// Log severity.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    /// Diagnostic detail.
    Debug,
    /// Normal pipeline progress.
    Info,
    /// Recovered degradation (e.g. translation fallback).
    Warn,
    /// Submission-fatal failure.
    Error,
}

/// One structured log line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    /// Event time.
    pub timestamp: DateTime<Utc>,
    /// Pipeline stage emitting the entry (e.g. `encode`, `score.depression`).
    pub stage: String,
    /// Severity.
    pub level: LogLevel,
    /// Human-readable message.
    pub message: String,
    /// Structured payload.
    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub fields: serde_json::Map<String, serde_json::Value>,
}

impl LogEntry {
    /// Creates an entry stamped with the current time.
    #[must_use]
    pub fn new(stage: impl Into<String>, level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            stage: stage.into(),
            level,
            message: message.into(),
            fields: serde_json::Map::new(),
        }
    }

    /// Attaches the object fields of `payload` to the entry.
    #[must_use]
    pub fn with_fields(mut self, payload: &serde_json::Value) -> Self {
        if let Some(obj) = payload.as_object() {
            self.fields = obj.clone();
        }
        self
    }
}

/// Append-only JSONL logger, safe to share across threads.
#[derive(Debug)]
pub struct JsonlLogger {
    path: PathBuf,
    writer: Mutex<File>,
}

impl JsonlLogger {
    /// Opens (or creates) a log file at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)?;
        Ok(Self {
            path,
            writer: Mutex::new(file),
        })
    }

    /// Appends one entry as a JSON line and flushes it.
    pub fn append(&self, entry: &LogEntry) -> Result<()> {
        let mut writer = self.writer.lock();
        serde_json::to_writer(&mut *writer, entry)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(())
    }

    /// Path of the underlying file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    #[test]
    fn appends_json_lines() {
        let dir = tempdir().unwrap();
        let logger = JsonlLogger::open(dir.path().join("screen.log")).unwrap();
        logger
            .append(
                &LogEntry::new("encode", LogLevel::Info, "batch encoded")
                    .with_fields(&json!({ "pairs": 6 })),
            )
            .unwrap();
        logger
            .append(&LogEntry::new("fuse", LogLevel::Info, "diagnosis ready"))
            .unwrap();
        let content = fs::read_to_string(logger.path()).unwrap();
        assert_eq!(content.lines().count(), 2);
        assert!(content.contains("\"stage\":\"encode\""));
        assert!(content.contains("\"pairs\":6"));
    }

    #[test]
    fn entry_ignores_non_object_fields() {
        let entry = LogEntry::new("fuse", LogLevel::Debug, "x").with_fields(&json!(42));
        assert!(entry.fields.is_empty());
    }
}
