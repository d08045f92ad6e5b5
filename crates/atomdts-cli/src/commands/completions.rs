//! Shell completion generation command.
//!
//! Generates completion scripts for bash, zsh, fish, elvish, and `PowerShell`.

use anyhow::Result;
use atomdts_core::cli::ExitCode;
use clap::Command;
use clap_complete::{Shell, generate};
use std::io::{self, Write};
use tracing::info;

/// Writes the completion script for `shell` to `out`.
///
/// # Examples
///
/// ```
/// use atomdts_cli::commands::completions;
/// use clap::Command;
/// use clap_complete::Shell;
///
/// let mut cmd = Command::new("atomdts").subcommand(Command::new("generate"));
/// let mut script = Vec::new();
/// completions::write_completions(Shell::Bash, &mut cmd, &mut script);
/// assert!(String::from_utf8(script).unwrap().contains("generate"));
/// ```
pub fn write_completions(shell: Shell, cmd: &mut Command, out: &mut dyn Write) {
    let name = cmd.get_name().to_string();
    generate(shell, cmd, name, out);
}

/// Runs the completions command, printing the script to stdout.
pub fn run(shell: Shell, cmd: &mut Command) -> Result<ExitCode> {
    info!("Generating {shell} completions");
    write_completions(shell, cmd, &mut io::stdout());
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command() -> Command {
        Command::new("atomdts")
            .subcommand(Command::new("generate"))
            .subcommand(Command::new("patches"))
    }

    fn script(shell: Shell) -> String {
        let mut out = Vec::new();
        write_completions(shell, &mut command(), &mut out);
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_bash_mentions_subcommands() {
        let script = script(Shell::Bash);
        assert!(script.contains("generate"));
        assert!(script.contains("patches"));
    }

    #[test]
    fn test_zsh() {
        assert!(script(Shell::Zsh).contains("#compdef atomdts"));
    }

    #[test]
    fn test_fish_and_powershell() {
        assert!(!script(Shell::Fish).is_empty());
        assert!(!script(Shell::PowerShell).is_empty());
    }

    #[test]
    fn test_run() {
        let result = run(Shell::Bash, &mut command());
        assert_eq!(result.unwrap(), ExitCode::SUCCESS);
    }
}
