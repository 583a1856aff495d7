//! Shell completion generation.

use std::io;

use clap::CommandFactory;
use clap_complete::{Generator, generate, shells};

use crate::cli::{Cli, CompletionsArgs, Shell};
use crate::error::CliResult;

pub fn execute(args: CompletionsArgs) -> CliResult<()> {
    let mut out = io::stdout();
    match args.shell {
        Shell::Bash => write_to(shells::Bash, &mut out),
        Shell::Zsh => write_to(shells::Zsh, &mut out),
        Shell::Fish => write_to(shells::Fish, &mut out),
        Shell::PowerShell => write_to(shells::PowerShell, &mut out),
        Shell::Elvish => write_to(shells::Elvish, &mut out),
    }
    Ok(())
}

fn write_to(shell: impl Generator, out: &mut dyn io::Write) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, out);
}
