//! CLI definitions for bnf-hl.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "bnf-hl",
    version,
    about = "Line-by-line BNF highlighter and checker",
    after_help = "Examples:\n  bnf-hl highlight grammar.bnf\n  bnf-hl complete grammar.bnf --prefix dig\n  bnf-hl check grammar.bnf --verbose"
)]
pub struct Cli {
    /// Configuration file (defaults to bnf-hl.toml in the current directory).
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
    /// Log parser fallbacks and hunk processing.
    #[arg(long, short, global = true)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the highlight ranges and parse errors of every line.
    Highlight {
        /// Grammar file.
        file: PathBuf,
    },
    /// Print rule names ranked by how often the grammar uses them.
    Complete {
        /// Grammar file.
        file: PathBuf,
        /// Only names starting with this prefix.
        #[arg(long, default_value = "")]
        prefix: String,
    },
    /// Report lines that fail strict parsing; exits non-zero if any do.
    Check {
        /// Grammar file.
        file: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "bnf-hl",
            "complete",
            "g.bnf",
            "--prefix",
            "dig",
            "-v",
            "--config",
            "alt.toml",
        ])
        .unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("alt.toml")));
        match cli.command {
            Command::Complete { file, prefix } => {
                assert_eq!(file, PathBuf::from("g.bnf"));
                assert_eq!(prefix, "dig");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn requires_a_subcommand() {
        assert!(Cli::try_parse_from(["bnf-hl"]).is_err());
    }
}
