//! Run statistics and the structured result of a deployment run.

use std::fmt;

use serde::Serialize;

use crate::domain::{EntryKind, RelativePath};
use crate::error::InitError;

/// A recoverable error recorded against one entry.
#[derive(Debug, Clone)]
pub struct EntryError {
    pub path: RelativePath,
    pub kind: EntryKind,
    pub error: InitError,
}

impl fmt::Display for EntryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.error)
    }
}

/// Counters and accumulated errors for a single run.
///
/// Owned by exactly one run; two disjoint partial runs can be combined
/// with [`RunStatistics::merge`].
#[derive(Debug, Clone, Default)]
pub struct RunStatistics {
    pub files_created: usize,
    pub files_skipped: usize,
    pub dirs_created: usize,
    pub dirs_skipped: usize,
    pub errors: Vec<EntryError>,
}

impl RunStatistics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_created(&mut self, kind: EntryKind) {
        match kind {
            EntryKind::File => self.files_created += 1,
            EntryKind::Directory => self.dirs_created += 1,
        }
    }

    pub fn record_skipped(&mut self, kind: EntryKind) {
        match kind {
            EntryKind::File => self.files_skipped += 1,
            EntryKind::Directory => self.dirs_skipped += 1,
        }
    }

    pub fn record_error(&mut self, path: RelativePath, kind: EntryKind, error: InitError) {
        self.errors.push(EntryError { path, kind, error });
    }

    pub fn total_created(&self) -> usize {
        self.files_created + self.dirs_created
    }

    pub fn total_skipped(&self) -> usize {
        self.files_skipped + self.dirs_skipped
    }

    /// Entries of `kind` that reached a created/skipped/error decision.
    pub fn visited(&self, kind: EntryKind) -> usize {
        let failed = self.errors.iter().filter(|e| e.kind == kind).count();
        match kind {
            EntryKind::File => self.files_created + self.files_skipped + failed,
            EntryKind::Directory => self.dirs_created + self.dirs_skipped + failed,
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Fold another run's statistics into this one. Errors keep their order,
    /// `self` first.
    pub fn merge(&mut self, other: RunStatistics) {
        self.files_created += other.files_created;
        self.files_skipped += other.files_skipped;
        self.dirs_created += other.dirs_created;
        self.dirs_skipped += other.dirs_skipped;
        self.errors.extend(other.errors);
    }

    pub fn outcome(&self) -> RunOutcome {
        if self.has_errors() {
            RunOutcome::CompletedWithErrors
        } else {
            RunOutcome::Success
        }
    }

    /// Freeze into the caller-facing report.
    pub fn into_report(self, dry_run: bool) -> RunReport {
        RunReport {
            outcome: self.outcome(),
            dry_run,
            files_created: self.files_created,
            files_skipped: self.files_skipped,
            directories_created: self.dirs_created,
            directories_skipped: self.dirs_skipped,
            errors: self.errors.iter().map(ToString::to_string).collect(),
        }
    }
}

/// How a run that was not aborted ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RunOutcome {
    Success,
    CompletedWithErrors,
}

/// Structured result of a run, for embedding and JSON output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub outcome: RunOutcome,
    pub dry_run: bool,
    pub files_created: usize,
    pub files_skipped: usize,
    pub directories_created: usize,
    pub directories_skipped: usize,
    pub errors: Vec<String>,
}

impl RunReport {
    pub fn is_success(&self) -> bool {
        self.outcome == RunOutcome::Success
    }

    pub fn created(&self) -> usize {
        self.files_created + self.directories_created
    }

    pub fn skipped(&self) -> usize {
        self.files_skipped + self.directories_skipped
    }
}

/// `file` → `files`, `directory` → `directories`.
pub(crate) fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        return word.to_string();
    }
    match word {
        "directory" => "directories".to_string(),
        _ => format!("{word}s"),
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::application::ApplicationError;

    fn conflict(path: &str) -> InitError {
        ApplicationError::IsADirectory {
            path: PathBuf::from(path),
        }
        .into()
    }

    #[test]
    fn counts_per_kind() {
        let mut stats = RunStatistics::new();
        stats.record_created(EntryKind::File);
        stats.record_created(EntryKind::Directory);
        stats.record_skipped(EntryKind::File);
        stats.record_error(
            RelativePath::new("settings.json"),
            EntryKind::File,
            conflict("/t/.claude/settings.json"),
        );

        assert_eq!(stats.total_created(), 2);
        assert_eq!(stats.total_skipped(), 1);
        assert_eq!(stats.visited(EntryKind::File), 3);
        assert_eq!(stats.visited(EntryKind::Directory), 1);
        assert_eq!(stats.outcome(), RunOutcome::CompletedWithErrors);
    }

    #[test]
    fn merge_is_a_plain_sum() {
        let mut a = RunStatistics::new();
        a.record_created(EntryKind::File);
        let mut b = RunStatistics::new();
        b.record_created(EntryKind::File);
        b.record_skipped(EntryKind::Directory);
        b.record_error(RelativePath::new("x"), EntryKind::File, conflict("/t/x"));

        a.merge(b);
        assert_eq!(a.files_created, 2);
        assert_eq!(a.dirs_skipped, 1);
        assert_eq!(a.errors.len(), 1);
    }

    #[test]
    fn report_carries_error_messages() {
        let mut stats = RunStatistics::new();
        stats.record_error(
            RelativePath::new("settings.json"),
            EntryKind::File,
            conflict("/t/.claude/settings.json"),
        );
        let report = stats.into_report(false);
        assert!(!report.is_success());
        assert!(report.errors[0].starts_with("settings.json: "));
        assert!(report.errors[0].contains("is a directory"));
    }

    #[test]
    fn empty_run_is_success() {
        let report = RunStatistics::new().into_report(true);
        assert!(report.is_success());
        assert!(report.dry_run);
        assert_eq!(report.created(), 0);
    }

    #[test]
    fn pluralize_handles_directory() {
        assert_eq!(pluralize("file", 1), "file");
        assert_eq!(pluralize("file", 2), "files");
        assert_eq!(pluralize("directory", 0), "directories");
    }
}
