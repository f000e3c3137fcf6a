//! `fm completion` -- generate shell completions.
//!
//! The script is written to stdout, e.g.
//! `fm completion bash > /etc/bash_completion.d/fm`. Subcommands, their
//! aliases (`ls`, `cost`) and the global flags all complete.

use anyhow::Result;
use clap::CommandFactory;
use clap_complete::{Shell, generate};

use crate::cli::{Cli, CompletionArgs, CompletionCommands};
use crate::context::RuntimeContext;

/// Execute the `fm completion` command.
pub fn run(_ctx: &RuntimeContext, args: &CompletionArgs) -> Result<()> {
    let shell = match &args.command {
        CompletionCommands::Bash => Shell::Bash,
        CompletionCommands::Zsh => Shell::Zsh,
        CompletionCommands::Fish => Shell::Fish,
        CompletionCommands::Powershell => Shell::PowerShell,
    };

    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "fm", &mut std::io::stdout());

    Ok(())
}
