//! `bnf-hl` - Command-line highlighter and checker for BNF grammars.
//!
//! Every line of the input file is parsed on its own, exactly as an editor
//! integration would see it.

mod cli;
mod config;
mod render;

use std::path::Path;

use anyhow::{bail, Context};
use clap::Parser;
use tracing::{debug, info};

use bnf_ide::{CompletionIndex, Document};

use crate::cli::{Cli, Command};
use crate::config::Config;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match &cli.config {
        Some(path) => Config::load_file(path),
        None => Config::load(Path::new(".")),
    };
    debug!(config = ?config.config_path, "loaded configuration");

    let index = CompletionIndex::new();
    match cli.command {
        Command::Highlight { file } => {
            let doc = read_document(&file)?;
            let report = doc.highlight(&index);
            print!("{}", render::highlights(&report, &config.highlight));
        }
        Command::Complete { file, prefix } => {
            let doc = read_document(&file)?;
            doc.highlight(&index);
            let items = index.complete_with_options(&prefix, config.completion);
            print!("{}", render::completions(&items));
        }
        Command::Check { file } => {
            let doc = read_document(&file)?;
            let report = doc.highlight(&index);
            print!("{}", render::diagnostics(&report));
            if !report.is_clean() {
                bail!(
                    "{}: {} of {} lines failed to parse",
                    file.display(),
                    report.diagnostics.len(),
                    doc.line_count()
                );
            }
            info!(lines = doc.line_count(), "{} is well-formed", file.display());
        }
    }
    Ok(())
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn read_document(path: &Path) -> anyhow::Result<Document> {
    let bytes = std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    let doc = Document::from_bytes(&bytes);
    debug!(lines = doc.line_count(), "read {}", path.display());
    Ok(doc)
}
