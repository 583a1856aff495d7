//! Implementation of the `cc-init list` command.

use serde::Serialize;

use cc_init_core::prelude::*;

use crate::{
    cli::{ListArgs, ListFormat},
    error::CliResult,
    output::OutputManager,
};

/// One bundled file as shown by `list`.
#[derive(Debug, Serialize)]
struct TemplateRow {
    path: String,
    mode: String,
    size: usize,
}

pub fn execute(args: ListArgs, output: &OutputManager) -> CliResult<()> {
    let templates = TemplateManager::new(Box::new(super::builtin_templates()?), TEMPLATE_ROOT);
    let rows = rows(&templates)?;

    match args.format {
        ListFormat::Table => {
            output.header(&format!("Bundled templates ({}):", rows.len()))?;
            let width = rows.iter().map(|r| r.path.len()).max().unwrap_or(0);
            for row in &rows {
                output.print(&format!(
                    "  {:<width$}  {}  {:>6} bytes",
                    row.path, row.mode, row.size
                ))?;
            }
        }
        // Bypasses quiet mode: the listing is the payload.
        ListFormat::List => {
            for row in &rows {
                output.data(&row.path)?;
            }
        }
        ListFormat::Json => {
            output.data(&serde_json::to_string_pretty(&rows)?)?;
        }
    }

    Ok(())
}

/// File templates with the mode they would be deployed with, in walk order.
fn rows(templates: &TemplateManager) -> CliResult<Vec<TemplateRow>> {
    templates
        .list_templates()?
        .into_iter()
        .map(|path| {
            let size = templates.read_file(&path)?.len();
            let mode = templates.default_mode(&path, EntryKind::File);
            Ok(TemplateRow {
                path: format!("{}/{}", TEMPLATE_ROOT, path),
                mode: mode.to_string(),
                size,
            })
        })
        .collect()
}
