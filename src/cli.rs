use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::view::Theme;

#[derive(Debug, Parser)]
#[command(name = "spam-scan", version, about = "Email spam classification from the terminal")]
pub struct Cli {
    /// Disable ANSI colours.
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Opens the interactive shell when omitted.
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// A single line typed at the shell prompt.
#[derive(Debug, Parser)]
#[command(no_binary_name = true, disable_version_flag = true)]
pub struct ShellLine {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Subcommand)]
pub enum Command {
    /// Classify one email.
    Scan {
        /// Classify built-in sample N instead of the given text.
        #[arg(long, value_name = "N")]
        sample: Option<u32>,
        /// Also write the result as JSON.
        #[arg(long, value_name = "PATH")]
        json: Option<PathBuf>,
        /// Also write a printable HTML report.
        #[arg(long, value_name = "PATH")]
        report: Option<PathBuf>,
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        text: Vec<String>,
    },
    /// Classify every email in a CSV file.
    Batch {
        csv: PathBuf,
        #[arg(long, value_name = "PATH")]
        csv_out: Option<PathBuf>,
        #[arg(long, value_name = "PATH")]
        json_out: Option<PathBuf>,
    },
    /// Write the CSV template used by `batch`.
    Template { path: Option<PathBuf> },
    /// Show or edit the scan history.
    History {
        #[command(subcommand)]
        action: Option<HistoryAction>,
    },
    /// Probe the classification service now.
    Health,
    /// Save a draft and show its statistics.
    Draft {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        text: Vec<String>,
    },
    /// List the built-in sample emails.
    Samples,
    /// Switch theme, or toggle when no value is given.
    Theme { theme: Option<ThemeChoice> },
    /// Export session data.
    Export {
        kind: ExportKind,
        path: Option<PathBuf>,
    },
    /// Interactive session.
    Shell,
    /// Leave the shell.
    #[command(alias = "exit")]
    Quit,
}

#[derive(Debug, Clone, PartialEq, Subcommand)]
pub enum HistoryAction {
    List,
    Stats,
    Delete { id: i64 },
    Clear {
        /// Confirm the wipe.
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ThemeChoice {
    Light,
    Dark,
}

impl From<ThemeChoice> for Theme {
    fn from(choice: ThemeChoice) -> Self {
        match choice {
            ThemeChoice::Light => Theme::Light,
            ThemeChoice::Dark => Theme::Dark,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportKind {
    ResultJson,
    Report,
    BatchCsv,
    BatchJson,
}

/// Whitespace tokenizer that keeps double-quoted runs together.
pub fn split_line(line: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut quoted = false;
    let mut pending = false;

    for ch in line.chars() {
        match ch {
            '"' => {
                quoted = !quoted;
                pending = true;
            }
            c if c.is_whitespace() && !quoted => {
                if pending {
                    words.push(std::mem::take(&mut current));
                    pending = false;
                }
            }
            c => {
                current.push(c);
                pending = true;
            }
        }
    }
    if pending {
        words.push(current);
    }
    words
}

pub fn parse_shell_line(line: &str) -> Result<Command, clap::Error> {
    ShellLine::try_parse_from(split_line(line)).map(|parsed| parsed.command)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_whitespace_and_keeps_quotes() {
        assert_eq!(
            split_line(r#"scan --json "my out.json" WIN  big"#),
            vec!["scan", "--json", "my out.json", "WIN", "big"]
        );
        assert_eq!(split_line(r#"draft """#), vec!["draft", ""]);
        assert!(split_line("   ").is_empty());
    }

    #[test]
    fn scan_collects_trailing_text() {
        let cmd = parse_shell_line("scan --report r.html Claim -your- prize").unwrap();
        assert_eq!(
            cmd,
            Command::Scan {
                sample: None,
                json: None,
                report: Some(PathBuf::from("r.html")),
                text: vec!["Claim".into(), "-your-".into(), "prize".into()],
            }
        );
    }

    #[test]
    fn history_and_export_subcommands() {
        assert_eq!(
            parse_shell_line("history clear --yes").unwrap(),
            Command::History {
                action: Some(HistoryAction::Clear { yes: true })
            }
        );
        assert_eq!(
            parse_shell_line("export batch-csv").unwrap(),
            Command::Export {
                kind: ExportKind::BatchCsv,
                path: None
            }
        );
        assert_eq!(parse_shell_line("exit").unwrap(), Command::Quit);
        assert!(parse_shell_line("export pdf").is_err());
    }

    #[test]
    fn one_shot_defaults_to_shell() {
        let cli = Cli::try_parse_from(["spam-scan"]).unwrap();
        assert!(cli.command.is_none());
        let cli = Cli::try_parse_from(["spam-scan", "--no-color", "theme", "light"]).unwrap();
        assert!(cli.no_color);
        assert_eq!(
            cli.command,
            Some(Command::Theme {
                theme: Some(ThemeChoice::Light)
            })
        );
    }
}
