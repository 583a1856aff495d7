//! Output management and formatting.
//!
//! [`OutputManager`] is the terminal side of the core `Reporter` port: the
//! engine narrates through it, and commands use the same methods directly.

use std::io::{self, IsTerminal};

use console::Term;
use owo_colors::OwoColorize;

use cc_init_core::application::ports::Reporter;

use crate::cli::global::{GlobalArgs, OutputFormat};
use crate::config::AppConfig;

/// Manages CLI output based on configuration.
pub struct OutputManager {
    resolved_format: OutputFormat,
    quiet: bool,
    no_color: bool,
    verbose: bool,
    /// Narration. Stderr in JSON mode so stdout stays parseable.
    term: Term,
    errors: Term,
}

impl OutputManager {
    /// Build an `OutputManager` from parsed CLI flags and loaded config.
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        // Resolve Auto → Human (TTY) or Plain (piped/redirected).
        let resolved_format = if args.output_format == OutputFormat::Auto {
            if io::stdout().is_terminal() {
                OutputFormat::Human
            } else {
                OutputFormat::Plain
            }
        } else {
            args.output_format
        };

        let term = if resolved_format == OutputFormat::Json {
            Term::stderr()
        } else {
            Term::stdout()
        };

        Self {
            resolved_format,
            quiet: args.quiet,
            no_color: args.no_color
                || config.output.no_color
                || resolved_format == OutputFormat::Plain,
            verbose: !args.quiet && (args.verbose > 0 || config.output.verbose),
            term,
            errors: Term::stderr(),
        }
    }

    // ── Public write methods ───────────────────────────────────────────────

    /// Generic message; suppressed in quiet mode.
    pub fn print(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.term.write_line(msg)
    }

    /// Success indicator: `✓ <msg>`.
    pub fn success(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{2713} {msg}") // ✓
        } else {
            format!("{} {}", "\u{2713}".green().bold(), msg.green())
        };
        self.term.write_line(&line)
    }

    /// Error indicator: `✗ <msg>`.  *Not* suppressed in quiet mode, and
    /// always written to stderr.
    pub fn error(&self, msg: &str) -> io::Result<()> {
        let line = if self.no_color {
            format!("\u{2717} {msg}") // ✗
        } else {
            format!("{} {}", "\u{2717}".red().bold(), msg.red())
        };
        self.errors.write_line(&line)
    }

    /// Warning indicator: `⚠ <msg>`.
    pub fn warning(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{26a0} {msg}") // ⚠
        } else {
            format!("{} {}", "\u{26a0}".yellow().bold(), msg.yellow())
        };
        self.term.write_line(&line)
    }

    /// Informational indicator: `ℹ <msg>`.
    pub fn info(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{2139} {msg}") // ℹ
        } else {
            format!("{} {}", "\u{2139}".blue().bold(), msg.blue())
        };
        self.term.write_line(&line)
    }

    /// `[DEBUG] <msg>`, only with `-v`.
    pub fn debug(&self, msg: &str) -> io::Result<()> {
        if !self.verbose {
            return Ok(());
        }
        let line = if self.no_color {
            format!("[DEBUG] {msg}")
        } else {
            format!("{} {}", "[DEBUG]".dimmed(), msg)
        };
        self.term.write_line(&line)
    }

    /// Bold cyan header line.
    pub fn header(&self, text: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            text.to_owned()
        } else {
            text.cyan().bold().to_string()
        };
        self.term.write_line(&line)
    }

    /// Machine-readable payload; always stdout, never suppressed.
    pub fn data(&self, payload: &str) -> io::Result<()> {
        Term::stdout().write_line(payload)
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    /// `true` if ANSI colours are enabled.
    pub fn supports_color(&self) -> bool {
        !self.no_color
    }

    /// `true` if `-v` or `output.verbose` is in effect.
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// The resolved (non-Auto) output format.
    pub fn format(&self) -> OutputFormat {
        self.resolved_format
    }
}

/// Terminal write failures are not worth aborting a deployment over.
impl Reporter for OutputManager {
    fn success(&self, msg: &str) {
        let _ = OutputManager::success(self, msg);
    }

    fn info(&self, msg: &str) {
        let _ = OutputManager::info(self, msg);
    }

    fn warning(&self, msg: &str) {
        let _ = OutputManager::warning(self, msg);
    }

    fn error(&self, msg: &str) {
        let _ = OutputManager::error(self, msg);
    }

    fn debug(&self, msg: &str) {
        let _ = OutputManager::debug(self, msg);
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn args(verbose: u8, quiet: bool, no_color: bool, format: OutputFormat) -> GlobalArgs {
        GlobalArgs {
            verbose,
            quiet,
            no_color,
            config: None,
            output_format: format,
        }
    }

    fn make_manager(quiet: bool, no_color: bool) -> OutputManager {
        // Human avoids TTY detection in tests
        OutputManager::new(
            &args(0, quiet, no_color, OutputFormat::Human),
            &AppConfig::default(),
        )
    }

    #[test]
    fn quiet_suppresses_print() {
        let out = make_manager(true, true);
        assert!(out.print("hello").is_ok());
    }

    #[test]
    fn error_not_suppressed_in_quiet_mode() {
        let out = make_manager(true, true);
        assert!(out.error("something went wrong").is_ok());
    }

    #[test]
    fn no_color_flag_reported() {
        assert!(make_manager(false, false).supports_color());
        assert!(!make_manager(false, true).supports_color());
    }

    #[test]
    fn plain_format_disables_color() {
        let out = OutputManager::new(
            &args(0, false, false, OutputFormat::Plain),
            &AppConfig::default(),
        );
        assert!(!out.supports_color());
        assert_eq!(out.format(), OutputFormat::Plain);
    }

    #[test]
    fn config_can_disable_color_and_enable_verbose() {
        let mut config = AppConfig::default();
        config.output.no_color = true;
        config.output.verbose = true;
        let out = OutputManager::new(&args(0, false, false, OutputFormat::Human), &config);
        assert!(!out.supports_color());
        assert!(out.is_verbose());
    }

    #[test]
    fn quiet_wins_over_configured_verbose() {
        let mut config = AppConfig::default();
        config.output.verbose = true;
        let out = OutputManager::new(&args(0, true, true, OutputFormat::Human), &config);
        assert!(!out.is_verbose());
    }

    #[test]
    fn usable_as_a_reporter() {
        let out = make_manager(true, true);
        let reporter: &dyn Reporter = &out;
        reporter.info("ignored in quiet mode");
        reporter.debug("ignored without -v");
    }
}
