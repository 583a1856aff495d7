//! Flags accepted by the default deploy action and by every subcommand.

use std::path::PathBuf;

use clap::{ArgAction, Args, ValueEnum};

#[derive(Debug, Clone, Args)]
pub struct GlobalArgs {
    /// Show more detail; repeat for more.
    #[arg(
        short,
        long,
        action = ArgAction::Count,
        global = true,
        long_help = "Show more detail. Repeatable:
    -v    list bundled templates, print each failed entry, INFO logs
    -vv   DEBUG logs (one line per processed entry)
    -vvv  TRACE logs (one span per filesystem write)"
    )]
    pub verbose: u8,

    /// Only print errors.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Print without colors. Also set by `NO_COLOR` or `output.no_color`.
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Read settings from FILE instead of the per-user config file.
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// How results are rendered.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Auto)]
    pub output_format: OutputFormat,
}

/// Rendering of narration and results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// `human` on a terminal, `plain` when piped.
    #[default]
    Auto,
    /// Colored status lines.
    Human,
    /// Status lines without escape codes.
    Plain,
    /// Report as JSON on stdout, status lines on stderr.
    Json,
}
