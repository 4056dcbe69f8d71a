use crate::rss_utils::time::log_timestamp;
use crate::types::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEvent {
    pub timestamp: String,
    pub event: String,
}

/// Append-only newline-delimited JSON log of pipeline milestones.
///
/// Recording is best-effort: a failed write is reported and otherwise ignored.
#[derive(Debug, Clone)]
pub struct EventLog {
    path: PathBuf,
}

impl EventLog {
    pub fn new(dir: &Path, file_name: &str) -> Self {
        Self {
            path: dir.join(file_name),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn record(&self, event: &str) {
        if let Err(e) = self.append(event, Utc::now()) {
            warn!("Could not record event '{}' in {}: {}", event, self.path.display(), e);
        }
    }

    fn append(&self, event: &str, at: DateTime<Utc>) -> Result<()> {
        let line = serde_json::to_string(&LogEvent {
            timestamp: log_timestamp(at),
            event: event.to_string(),
        })?;

        let mut file = OpenOptions::new().create(true).append(true).open(&self.path)?;
        writeln!(file, "{}", line)?;

        debug!("Recorded event: {}", event);
        Ok(())
    }
}
