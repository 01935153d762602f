use std::path::Path;

use anyhow::Result;

use tammeni_logging::{JsonlLogger, LogEntry, LogLevel};

/// Structured logging handle shared by the pipeline stages.
///
/// Logging is observability, not control flow: callers discard the result of
/// [`log`](Self::log) rather than let a disk error abort a submission.
#[derive(Debug)]
pub struct ScreeningTelemetry {
    logger: JsonlLogger,
}

impl ScreeningTelemetry {
    /// Opens a JSONL log at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self {
            logger: JsonlLogger::open(path)?,
        })
    }

    /// Appends one structured entry.
    pub fn log(
        &self,
        level: LogLevel,
        stage: &str,
        message: &str,
        fields: &serde_json::Value,
    ) -> Result<()> {
        self.logger
            .append(&LogEntry::new(stage, level, message).with_fields(fields))
    }

    /// Path of the underlying log file.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.logger.path()
    }
}
