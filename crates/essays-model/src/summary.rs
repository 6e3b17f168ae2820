use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Outcome of one complete run.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RunSummary {
    /// Entries that passed the listing filter.
    pub listed: usize,
    /// Output files in processing order. These are the manifest lines.
    pub written: Vec<PathBuf>,
    /// Titles skipped because no date was found.
    pub skipped: Vec<String>,
    pub manifest_path: PathBuf,
    pub finished_at: String,
}

impl RunSummary {
    /// Manifest contents: one path per line, each line newline-terminated.
    pub fn manifest_text(&self) -> String {
        self.written
            .iter()
            .map(|p| format!("{}\n", p.display()))
            .collect()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn stamp(mut self) -> Self {
        self.finished_at = chrono::Utc::now().to_rfc3339();
        self
    }
}
