//! Tracing subscriber for the `cc-init` binary.
//!
//! The core and adapter crates only emit events; this is the one place a
//! subscriber is installed. Diagnostics always go to stderr so they never
//! mix with deployment narration or a `--output-format json` report.
//!
//! | Flag(s)  | Filter level |
//! |----------|--------------|
//! | (none)   | WARN         |
//! | `-v`     | INFO         |
//! | `-vv`    | DEBUG        |
//! | `-vvv`   | TRACE        |
//! | `--quiet`| ERROR        |
//!
//! `RUST_LOG` replaces the computed filter when set.

use std::io::IsTerminal as _;

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{GlobalArgs, OutputFormat};

/// Crates whose events `cc-init` shows by default.
const LOG_TARGETS: [&str; 3] = ["cc_init", "cc_init_core", "cc_init_adapters"];

/// How diagnostics are filtered and rendered for one invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct LogSettings {
    level: LevelFilter,
    ansi: bool,
}

impl LogSettings {
    fn from_args(args: &GlobalArgs, stderr_is_terminal: bool) -> Self {
        let level = if args.quiet {
            LevelFilter::ERROR
        } else {
            match args.verbose {
                0 => LevelFilter::WARN,
                1 => LevelFilter::INFO,
                2 => LevelFilter::DEBUG,
                _ => LevelFilter::TRACE,
            }
        };

        // JSON runs are read by tools, so keep stderr free of escape codes too.
        let ansi = stderr_is_terminal
            && !args.no_color
            && args.output_format != OutputFormat::Json
            && args.output_format != OutputFormat::Plain;

        Self { level, ansi }
    }

    /// One directive per workspace crate, all at the chosen level.
    fn directives(&self) -> String {
        LOG_TARGETS
            .iter()
            .map(|target| format!("{target}={}", self.level))
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Install the global subscriber. Call once, before anything is logged.
pub fn init_logging(args: &GlobalArgs) -> anyhow::Result<()> {
    let settings = LogSettings::from_args(args, std::io::stderr().is_terminal());
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(settings.directives()));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_ansi(settings.ansi)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install log subscriber: {e}"))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args_with(verbose: u8, quiet: bool, output_format: OutputFormat) -> GlobalArgs {
        GlobalArgs {
            verbose,
            quiet,
            no_color: false,
            config: None,
            output_format,
        }
    }

    fn level(verbose: u8, quiet: bool) -> LevelFilter {
        LogSettings::from_args(&args_with(verbose, quiet, OutputFormat::Human), true).level
    }

    #[test]
    fn verbosity_maps_to_levels() {
        assert_eq!(level(0, false), LevelFilter::WARN);
        assert_eq!(level(1, false), LevelFilter::INFO);
        assert_eq!(level(2, false), LevelFilter::DEBUG);
        assert_eq!(level(3, false), LevelFilter::TRACE);
        assert_eq!(level(10, false), LevelFilter::TRACE);
    }

    #[test]
    fn quiet_wins() {
        assert_eq!(level(0, true), LevelFilter::ERROR);
        assert_eq!(level(3, true), LevelFilter::ERROR);
    }

    #[test]
    fn ansi_only_for_human_output_on_a_terminal() {
        let human = args_with(0, false, OutputFormat::Human);
        assert!(LogSettings::from_args(&human, true).ansi);
        assert!(!LogSettings::from_args(&human, false).ansi);

        let json = args_with(0, false, OutputFormat::Json);
        assert!(!LogSettings::from_args(&json, true).ansi);

        let mut no_color = human.clone();
        no_color.no_color = true;
        assert!(!LogSettings::from_args(&no_color, true).ansi);
    }

    #[test]
    fn directives_cover_every_crate_and_parse() {
        let settings = LogSettings {
            level: LevelFilter::DEBUG,
            ansi: false,
        };
        let directives = settings.directives();
        for target in LOG_TARGETS {
            assert!(directives.contains(&format!("{target}=")), "missing {target}");
        }
        assert!(EnvFilter::try_new(directives).is_ok());
    }
}
