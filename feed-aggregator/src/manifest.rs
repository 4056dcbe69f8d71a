use crate::types::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::info;

pub const GLOBAL_KEY: &str = "global";

/// Index of generated feed files, keyed by category label (plus `global`).
/// Paths are relative to the output directory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Manifest {
    entries: BTreeMap<String, Vec<String>>,
}

impl Manifest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, key: &str, relative_path: impl Into<String>) {
        self.entries
            .entry(key.to_string())
            .or_default()
            .push(relative_path.into());
    }

    pub fn files(&self, key: &str) -> &[String] {
        self.entries.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Write as pretty JSON to `dir/file_name`, replacing any previous file.
    pub fn write(&self, dir: &Path, file_name: &str) -> Result<PathBuf> {
        let path = dir.join(file_name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, json)?;

        info!("Wrote manifest with {} files to {}", self.len(), path.display());
        Ok(path)
    }
}
