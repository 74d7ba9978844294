// SPDX-License-Identifier: Apache-2.0

//! Command-line interface definition for IssueLens.
//!
//! Uses clap's derive API for declarative CLI parsing.

use std::io::IsTerminal;

use clap::{Parser, Subcommand, ValueEnum};

/// Output format for CLI results.
#[derive(Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text with colors (default)
    #[default]
    Text,
    /// JSON output for programmatic consumption
    Json,
    /// YAML output for programmatic consumption
    Yaml,
}

/// Global output configuration passed to commands.
#[derive(Clone)]
pub struct OutputContext {
    /// Output format (text, json, yaml)
    pub format: OutputFormat,
    /// Suppress non-essential output (spinners)
    pub quiet: bool,
    /// Whether stdout is a terminal (TTY)
    pub is_tty: bool,
}

impl OutputContext {
    /// Creates an `OutputContext` from CLI arguments.
    pub fn from_cli(format: OutputFormat, quiet: bool) -> Self {
        Self {
            format,
            quiet,
            is_tty: std::io::stdout().is_terminal(),
        }
    }

    /// Returns true if interactive elements (spinners, colors) should be shown.
    pub fn is_interactive(&self) -> bool {
        self.is_tty && !self.quiet && matches!(self.format, OutputFormat::Text)
    }
}

/// IssueLens - AI-assisted GitHub issue analysis.
///
/// Fetches a GitHub issue, asks Gemini to classify and summarize it, and
/// prints the structured result.
#[derive(Parser)]
#[command(name = "issuelens")]
#[command(version, about, long_about = None)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Output format (text, json, yaml)
    #[arg(long, short = 'o', global = true, default_value = "text", value_enum)]
    pub output: OutputFormat,

    /// Suppress non-essential output (spinners)
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Enable debug-level logging for IssueLens
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Override configured Gemini model (e.g., gemini-2.5-flash)
    #[arg(long, global = true)]
    pub model: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a GitHub issue with AI assistance
    Analyze {
        /// Repository URL (e.g., `https://github.com/owner/repo`)
        repo_url: String,

        /// Issue number
        issue_number: u64,
    },

    /// Run the HTTP analysis service
    Serve {
        /// Interface to bind (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (overrides config)
        #[arg(long)]
        port: Option<u16>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_analyze_with_global_flags() {
        let cli = Cli::try_parse_from([
            "issuelens",
            "analyze",
            "https://github.com/foo/bar",
            "42",
            "-o",
            "json",
            "--model",
            "gemini-2.5-flash",
        ])
        .unwrap();

        assert!(matches!(cli.output, OutputFormat::Json));
        assert_eq!(cli.model.as_deref(), Some("gemini-2.5-flash"));
        match cli.command {
            Commands::Analyze {
                repo_url,
                issue_number,
            } => {
                assert_eq!(repo_url, "https://github.com/foo/bar");
                assert_eq!(issue_number, 42);
            }
            Commands::Serve { .. } => panic!("expected analyze"),
        }
    }

    #[test]
    fn rejects_non_numeric_issue_number() {
        let result =
            Cli::try_parse_from(["issuelens", "analyze", "https://github.com/foo/bar", "abc"]);
        assert!(result.is_err());
    }

    #[test]
    fn non_text_output_is_not_interactive() {
        let ctx = OutputContext {
            format: OutputFormat::Json,
            quiet: false,
            is_tty: true,
        };
        assert!(!ctx.is_interactive());
    }
}
