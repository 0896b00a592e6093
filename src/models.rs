use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Result of one audit run.
#[derive(Debug, Clone, Serialize)]
pub struct AuditReport {
    pub root: PathBuf,
    pub extension: String,
    /// Number of candidate files whose contents were checked.
    pub scanned: usize,
    /// Candidates missing the template, in discovery order.
    pub violations: Vec<PathBuf>,
    /// Entries that could not be read under [`UnreadablePolicy::Skip`].
    pub skipped: Vec<SkippedEntry>,
}

impl AuditReport {
    pub fn new(root: PathBuf, extension: String) -> Self {
        AuditReport {
            root,
            extension,
            scanned: 0,
            violations: Vec::new(),
            skipped: Vec::new(),
        }
    }

    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }

    /// Candidates that were read and contained the template.
    pub fn conforming(&self) -> usize {
        self.scanned - self.violations.len()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedEntry {
    pub path: PathBuf,
    pub reason: String,
}

/// What to do with a candidate file or directory that cannot be read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnreadablePolicy {
    /// Abort the whole audit with a filesystem error.
    #[default]
    Fail,
    /// Record the entry in [`AuditReport::skipped`] and keep scanning.
    Skip,
}
