//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
///
/// Without a subcommand `cc-init` deploys the bundled `.claude` templates.
#[derive(Debug, Parser)]
#[command(
    name     = "cc-init",
    bin_name = "cc-init",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Initialize Claude Code configuration",
    long_about = "cc-init copies a bundled .claude configuration tree (settings, \
                  commands, hooks and agents) into a project. Existing files \
                  are never modified, so it is safe to run again.",
    after_help = "EXAMPLES:\n\
        \x20 cc-init                  # Initialize in current directory\n\
        \x20 cc-init -t ./myproject   # Initialize in ./myproject\n\
        \x20 cc-init --dry-run        # Preview what would be created\n\
        \x20 cc-init -v               # Show detailed output",
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Deployment flags. Ignored when a subcommand is given.
    #[command(flatten)]
    pub deploy: DeployArgs,

    /// Optional subcommand.
    #[command(subcommand)]
    pub command: Option<Commands>,
}

// ── deploy ────────────────────────────────────────────────────────────────────

/// Arguments for the default deploy action.
#[derive(Debug, Clone, Default, Args)]
pub struct DeployArgs {
    /// Directory to initialize. Falls back to `deploy.target_dir` from the
    /// configuration, then to the current directory.
    #[arg(
        short = 't',
        long = "target",
        value_name = "DIR",
        help = "Target directory for initialization"
    )]
    pub target: Option<PathBuf>,

    /// Report what would be created without writing anything.
    #[arg(long = "dry-run", help = "Preview operations without making changes")]
    pub dry_run: bool,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List the bundled templates.
    #[command(
        visible_alias = "ls",
        about = "List bundled templates",
        after_help = "EXAMPLES:\n\
            \x20 cc-init list\n\
            \x20 cc-init list --format json"
    )]
    List(ListArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 cc-init completions bash > ~/.local/share/bash-completion/completions/cc-init\n\
            \x20 cc-init completions zsh  > ~/.zfunc/_cc-init\n\
            \x20 cc-init completions fish > ~/.config/fish/completions/cc-init.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the cc-init configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 cc-init config get deploy.dry_run\n\
            \x20 cc-init config list\n\
            \x20 cc-init config path"
    )]
    Config(ConfigCommands),
}

// ── list ──────────────────────────────────────────────────────────────────────

/// Arguments for `cc-init list`.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Output format.
    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: ListFormat,
}

/// Output format for the `list` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
    /// Path, mode and size per template.
    Table,
    /// One path per line.
    List,
    /// JSON array.
    Json,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `cc-init completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `cc-init config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `deploy.dry_run`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the default configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────
