//! Deployment Engine - main application orchestrator.
//!
//! This service coordinates one deployment run:
//! 1. Validate that the bundle has templates
//! 2. Walk every entry, parent-first
//! 3. Create what is missing, skip what already exists
//! 4. Narrate a summary and hand back a [`RunReport`]
//!
//! Entry-level failures are recorded and the walk carries on. Only
//! structural problems (empty bundle, unsafe or escaping paths) abort.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::{
    TEMPLATE_ROOT,
    application::{
        ApplicationError,
        ports::{Filesystem, Reporter, WriteOutcome},
        report::{RunReport, RunStatistics, pluralize},
        services::TemplateManager,
    },
    domain::{AssetEntry, DeploymentLayout, DomainValidator as validator, EntryKind, RelativePath},
    error::InitResult,
};

/// Caller-supplied settings for a run.
///
/// `target_dir` is expected to be absolute and already validated; the CLI
/// takes care of that before building an engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployOptions {
    pub target_dir: PathBuf,
    pub dry_run: bool,
    pub verbose: bool,
    pub subtree: RelativePath,
}

impl DeployOptions {
    pub fn new(target_dir: impl Into<PathBuf>) -> Self {
        Self {
            target_dir: target_dir.into(),
            dry_run: false,
            verbose: false,
            subtree: RelativePath::new(TEMPLATE_ROOT),
        }
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}

/// Where a run currently is. Phases only move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    NotStarted,
    Validating,
    Walking,
    Reporting,
    Done,
}

impl RunPhase {
    /// The phase after this one. `Done` is terminal.
    pub fn next(self) -> Self {
        match self {
            Self::NotStarted => Self::Validating,
            Self::Validating => Self::Walking,
            Self::Walking => Self::Reporting,
            Self::Reporting | Self::Done => Self::Done,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotStarted => "not-started",
            Self::Validating => "validating",
            Self::Walking => "walking",
            Self::Reporting => "reporting",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for RunPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Deploys the template bundle into a target directory.
///
/// The engine holds no per-run state, so `run` can be called repeatedly;
/// each call gets its own [`RunStatistics`].
pub struct DeploymentEngine {
    templates: TemplateManager,
    filesystem: Box<dyn Filesystem>,
    reporter: Arc<dyn Reporter>,
    options: DeployOptions,
    layout: DeploymentLayout,
}

impl DeploymentEngine {
    /// Create an engine over the given adapters.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use cc_init_core::prelude::*;
    ///
    /// let engine = DeploymentEngine::new(
    ///     templates,  // TemplateManager
    ///     filesystem, // Box<dyn Filesystem>
    ///     reporter,   // Arc<dyn Reporter>
    ///     DeployOptions::new("/abs/project"),
    /// );
    /// ```
    pub fn new(
        templates: TemplateManager,
        filesystem: Box<dyn Filesystem>,
        reporter: Arc<dyn Reporter>,
        options: DeployOptions,
    ) -> Self {
        let layout = DeploymentLayout::new(options.target_dir.clone(), options.subtree.clone());
        Self {
            templates,
            filesystem,
            reporter,
            options,
            layout,
        }
    }

    pub fn options(&self) -> &DeployOptions {
        &self.options
    }

    /// Run one deployment.
    ///
    /// Returns `Err` only for fatal errors. A run that hit entry-level
    /// errors still returns `Ok`, with `RunOutcome::CompletedWithErrors`.
    #[instrument(
        skip_all,
        fields(
            target = %self.options.target_dir.display(),
            dry_run = self.options.dry_run
        )
    )]
    pub fn run(&self) -> InitResult<RunReport> {
        let mut phase = RunPhase::NotStarted;
        self.reporter.debug(&format!(
            "Starting cc-init with target directory: {}",
            self.options.target_dir.display()
        ));

        advance(&mut phase);
        if !self.templates.has_templates() {
            return Err(ApplicationError::NoTemplates {
                root: self.templates.prefix().to_string(),
            }
            .into());
        }
        if self.options.verbose {
            self.list_templates();
        }

        advance(&mut phase);
        let mut stats = RunStatistics::new();
        for item in self.templates.entries() {
            let entry = item?;
            let dest = validator::validate_destination(&self.layout, entry.path())?;
            match entry.kind() {
                EntryKind::Directory => self.process_directory(&entry, &dest, &mut stats)?,
                EntryKind::File => self.process_file(&entry, &dest, &mut stats)?,
            }
        }

        advance(&mut phase);
        self.report_summary(&stats);

        advance(&mut phase);
        Ok(stats.into_report(self.options.dry_run))
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    fn list_templates(&self) {
        // The walk reports unsafe paths itself; nothing to list if it fails here.
        let Ok(templates) = self.templates.list_templates() else {
            return;
        };
        self.reporter.debug(&format!(
            "Found {} template {}",
            templates.len(),
            pluralize("file", templates.len())
        ));
        for template in &templates {
            self.reporter.debug(&format!("  - {}", template));
        }
    }

    fn process_directory(
        &self,
        entry: &AssetEntry,
        dest: &Path,
        stats: &mut RunStatistics,
    ) -> InitResult<()> {
        debug!(path = %dest.display(), "Processing directory");
        let outcome = self.ensure_directory(entry, dest);
        self.record(entry, dest, outcome, stats)
    }

    fn process_file(
        &self,
        entry: &AssetEntry,
        dest: &Path,
        stats: &mut RunStatistics,
    ) -> InitResult<()> {
        debug!(source = %entry.path(), path = %dest.display(), "Processing file");
        let outcome = self.ensure_file(entry, dest);
        self.record(entry, dest, outcome, stats)
    }

    fn ensure_directory(&self, entry: &AssetEntry, dest: &Path) -> InitResult<WriteOutcome> {
        if self.filesystem.exists(dest) {
            if !self.filesystem.stat(dest)?.is_dir() {
                return Err(ApplicationError::NotADirectory {
                    path: dest.to_path_buf(),
                }
                .into());
            }
            return Ok(WriteOutcome::Skipped);
        }

        let mode = self.templates.default_mode(entry.path(), EntryKind::Directory);
        self.filesystem.create_directory(dest, mode)
    }

    fn ensure_file(&self, entry: &AssetEntry, dest: &Path) -> InitResult<WriteOutcome> {
        if self.filesystem.exists(dest) {
            if self.filesystem.stat(dest)?.is_dir() {
                return Err(ApplicationError::IsADirectory {
                    path: dest.to_path_buf(),
                }
                .into());
            }
            return Ok(WriteOutcome::Skipped);
        }

        // The port has the last word: the entry may appear after the check.
        let content = self.templates.read_file(entry.path())?;
        let mode = self.templates.default_mode(entry.path(), EntryKind::File);
        self.filesystem.create_file(dest, &content, mode)
    }

    /// Fold one entry's outcome into `stats` and narrate it. Fatal errors
    /// are passed back up untouched.
    fn record(
        &self,
        entry: &AssetEntry,
        dest: &Path,
        outcome: InitResult<WriteOutcome>,
        stats: &mut RunStatistics,
    ) -> InitResult<()> {
        let kind = entry.kind();
        let shown = self.layout.display_path(dest);

        match outcome {
            Ok(WriteOutcome::Created) => {
                self.reporter
                    .success(&format!("Created {}: {}", kind, shown));
                stats.record_created(kind);
            }
            Ok(WriteOutcome::Skipped) => {
                self.reporter
                    .info(&format!("Skipped existing {}: {}", kind, shown));
                stats.record_skipped(kind);
            }
            Err(e) if e.is_fatal() => return Err(e),
            Err(e) => {
                warn!(path = %shown, error = %e, "Entry failed");
                self.reporter
                    .error(&format!("Failed to process {} {}: {}", kind, shown, e));
                stats.record_error(entry.path().clone(), kind, e);
            }
        }
        Ok(())
    }

    fn report_summary(&self, stats: &RunStatistics) {
        let created = stats.total_created();
        let skipped = stats.total_skipped();

        if self.options.dry_run {
            self.reporter.info("DRY RUN - No changes were made");
        }

        if created > 0 {
            self.reporter.success(&format!(
                "Created {}",
                describe(stats.files_created, stats.dirs_created)
            ));
        }

        if skipped > 0 {
            self.reporter.info(&format!(
                "Skipped {} (already exist)",
                describe(stats.files_skipped, stats.dirs_skipped)
            ));
        }

        if stats.has_errors() {
            let count = stats.errors.len();
            self.reporter.error(&format!(
                "Encountered {} {} during initialization",
                count,
                pluralize("error", count)
            ));
            if self.options.verbose {
                for error in &stats.errors {
                    self.reporter.error(&format!("  - {}", error));
                }
            }
        }

        if created == 0 && skipped > 0 {
            self.reporter.info("All Claude configuration files already exist");
        } else if !stats.has_errors() {
            self.reporter
                .success("Claude configuration initialized successfully");
        }

        info!(
            created,
            skipped,
            errors = stats.errors.len(),
            "Deployment finished"
        );
    }
}

fn advance(phase: &mut RunPhase) {
    *phase = phase.next();
    debug!(phase = %phase, "Run phase");
}

/// `"2 files and 1 directory"`, leaving out zero counts.
fn describe(files: usize, dirs: usize) -> String {
    let mut parts = Vec::with_capacity(2);
    if files > 0 {
        parts.push(format!("{} {}", files, pluralize("file", files)));
    }
    if dirs > 0 {
        parts.push(format!("{} {}", dirs, pluralize("directory", dirs)));
    }
    parts.join(" and ")
}
