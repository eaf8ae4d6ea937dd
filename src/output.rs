//! Result types: per-file outcomes and the batch summary.

use crate::error::FileError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// How one job ended.
#[derive(Debug)]
pub enum JobOutcome {
    /// The source matched an ignore pattern; nothing was touched.
    Ignored,
    /// Hash check found the source unchanged since the last run.
    Unchanged,
    /// Text was written. Metadata and hook failures do not demote a file
    /// from this state; they are logged and reflected in the flags.
    Converted {
        output: PathBuf,
        pages: usize,
        metadata_written: bool,
        hook_succeeded: Option<bool>,
    },
    /// Extraction or the text write failed; nothing further happened.
    Failed(FileError),
}

impl JobOutcome {
    pub fn is_converted(&self) -> bool {
        matches!(self, JobOutcome::Converted { .. })
    }

    /// Short lowercase label for progress lines and logs.
    pub fn label(&self) -> &'static str {
        match self {
            JobOutcome::Ignored => "ignored",
            JobOutcome::Unchanged => "unchanged",
            JobOutcome::Converted { .. } => "converted",
            JobOutcome::Failed(_) => "failed",
        }
    }
}

/// A file that failed, for the run summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailedFile {
    pub path: PathBuf,
    pub error: String,
}

/// Aggregate statistics for one batch run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchStats {
    /// PDFs found under the input root.
    pub discovered: usize,
    pub converted: usize,
    pub ignored: usize,
    pub unchanged: usize,
    pub failed: usize,
    /// True when the run only counted files.
    pub dry_run: bool,
    /// Wall-clock time for the whole run in milliseconds.
    pub duration_ms: u64,
    pub failures: Vec<FailedFile>,
}

impl BatchStats {
    /// Fold one job outcome into the totals.
    pub fn record(&mut self, source: &Path, outcome: &JobOutcome) {
        match outcome {
            JobOutcome::Ignored => self.ignored += 1,
            JobOutcome::Unchanged => self.unchanged += 1,
            JobOutcome::Converted { .. } => self.converted += 1,
            JobOutcome::Failed(e) => {
                self.failed += 1;
                self.failures.push(FailedFile {
                    path: source.to_path_buf(),
                    error: e.to_string(),
                });
            }
        }
    }

    /// Number of jobs that reached a terminal state.
    pub fn completed(&self) -> usize {
        self.converted + self.ignored + self.unchanged + self.failed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_tallies_each_outcome() {
        let mut stats = BatchStats {
            discovered: 4,
            ..Default::default()
        };
        stats.record(Path::new("a.pdf"), &JobOutcome::Ignored);
        stats.record(Path::new("b.pdf"), &JobOutcome::Unchanged);
        stats.record(
            Path::new("c.pdf"),
            &JobOutcome::Converted {
                output: PathBuf::from("out/c.txt"),
                pages: 2,
                metadata_written: false,
                hook_succeeded: None,
            },
        );
        stats.record(
            Path::new("d.pdf"),
            &JobOutcome::Failed(FileError::EmptyDocument {
                path: PathBuf::from("d.pdf"),
            }),
        );

        assert_eq!(
            (stats.ignored, stats.unchanged, stats.converted, stats.failed),
            (1, 1, 1, 1)
        );
        assert_eq!(stats.completed(), stats.discovered);
        assert_eq!(stats.failures[0].path, PathBuf::from("d.pdf"));
    }

    #[test]
    fn stats_serialise_to_json() {
        let stats = BatchStats {
            discovered: 3,
            converted: 3,
            ..Default::default()
        };
        let json = serde_json::to_string(&stats).unwrap();
        assert!(json.contains("\"converted\":3"), "got: {json}");
    }

    #[test]
    fn labels() {
        assert_eq!(JobOutcome::Ignored.label(), "ignored");
        assert_eq!(JobOutcome::Unchanged.label(), "unchanged");
        assert!(!JobOutcome::Unchanged.is_converted());
    }
}
