//! Default action: deploy the bundled `.claude` tree into a target directory.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, instrument};

use cc_init_adapters::{DryRunFilesystem, LocalFilesystem};
use cc_init_core::prelude::*;

use crate::{
    cli::{DeployArgs, OutputFormat},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Validate the target, run the engine and map its report to a result.
#[instrument(skip_all)]
pub fn execute(args: DeployArgs, config: &AppConfig, output: Arc<OutputManager>) -> CliResult<()> {
    let dry_run = args.dry_run || config.deploy.dry_run;
    let requested = args
        .target
        .unwrap_or_else(|| config.deploy.target_dir.clone());
    let target = resolve_target(&requested, dry_run)?;
    debug!(target = %target.display(), dry_run, "Target validated");

    let templates = TemplateManager::new(Box::new(super::builtin_templates()?), TEMPLATE_ROOT);

    let reporter: Arc<dyn Reporter> = output.clone();
    let filesystem: Box<dyn Filesystem> = if dry_run {
        Box::new(DryRunFilesystem::new(
            Box::new(LocalFilesystem::new()),
            reporter.clone(),
        ))
    } else {
        Box::new(LocalFilesystem::new())
    };

    let options = DeployOptions::new(target)
        .with_dry_run(dry_run)
        .with_verbose(output.is_verbose());
    let report = DeploymentEngine::new(templates, filesystem, reporter, options).run()?;

    if output.format() == OutputFormat::Json {
        output.data(&serde_json::to_string_pretty(&report)?)?;
    }

    match report.outcome {
        RunOutcome::Success => Ok(()),
        RunOutcome::CompletedWithErrors => Err(CliError::CompletedWithErrors {
            count: report.errors.len(),
        }),
    }
}

/// Make `requested` absolute and check it is an existing directory.
///
/// Unless `dry_run` is set the directory must also accept new files, which
/// is checked by creating an anonymous temporary file that vanishes on drop.
pub fn resolve_target(requested: &Path, dry_run: bool) -> CliResult<PathBuf> {
    let path = std::path::absolute(requested).map_err(|source| CliError::InvalidTarget {
        path: requested.to_path_buf(),
        source,
    })?;

    let meta = match fs::metadata(&path) {
        Ok(meta) => meta,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(CliError::TargetNotFound { path });
        }
        Err(source) => return Err(CliError::InvalidTarget { path, source }),
    };

    if !meta.is_dir() {
        return Err(CliError::TargetNotDirectory { path });
    }

    if !dry_run {
        tempfile::tempfile_in(&path)
            .map_err(|source| CliError::TargetNotWritable {
                path: path.clone(),
                source,
            })?;
    }

    Ok(path)
}
