//! Configuration loaded from `bnf-hl.toml`.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::warn;

use bnf_ide::{CompletionOptions, HighlightGroup};

pub(crate) const CONFIG_FILES: &[&str] = &["bnf-hl.toml", ".bnf-hl.toml"];

/// Resolved configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Config file path (if found).
    pub config_path: Option<PathBuf>,
    /// Display names of the highlight groups.
    pub highlight: HighlightNames,
    /// Completion filtering.
    pub completion: CompletionOptions,
}

/// Display name per highlight group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightNames {
    pub operator: String,
    pub string: String,
    pub identifier: String,
    pub comment: String,
}

impl Default for HighlightNames {
    fn default() -> Self {
        Self {
            operator: HighlightGroup::Operator.name().to_string(),
            string: HighlightGroup::String.name().to_string(),
            identifier: HighlightGroup::Identifier.name().to_string(),
            comment: HighlightGroup::Comment.name().to_string(),
        }
    }
}

impl HighlightNames {
    pub fn name(&self, group: HighlightGroup) -> &str {
        match group {
            HighlightGroup::Operator => &self.operator,
            HighlightGroup::String => &self.string,
            HighlightGroup::Identifier => &self.identifier,
            HighlightGroup::Comment => &self.comment,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    highlight: HighlightSection,
    completion: CompletionSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct HighlightSection {
    operator: Option<String>,
    string: Option<String>,
    identifier: Option<String>,
    comment: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct CompletionSection {
    min_prefix: Option<usize>,
    limit: Option<usize>,
}

impl Config {
    /// Load configuration from the first config file found in `root`.
    pub fn load(root: &Path) -> Self {
        match find_config_file(root) {
            Some(path) => Self::load_file(&path),
            None => Self::base(None),
        }
    }

    /// Load configuration from an explicit path.
    pub fn load_file(path: &Path) -> Self {
        let config_path = Some(path.to_path_buf());
        let Ok(contents) = std::fs::read_to_string(path) else {
            warn!("Failed to read bnf-hl config at {}", path.display());
            return Self::base(config_path);
        };
        Self::from_contents(config_path, &contents)
    }

    pub fn from_contents(config_path: Option<PathBuf>, contents: &str) -> Self {
        let mut config = Self::base(config_path);
        let parsed: ConfigFile = match toml::from_str(contents) {
            Ok(parsed) => parsed,
            Err(err) => {
                if let Some(path) = &config.config_path {
                    warn!("Failed to parse bnf-hl config at {}: {err}", path.display());
                } else {
                    warn!("Failed to parse bnf-hl config: {err}");
                }
                return config;
            }
        };

        let names = &mut config.highlight;
        let section = parsed.highlight;
        for (slot, value) in [
            (&mut names.operator, section.operator),
            (&mut names.string, section.string),
            (&mut names.identifier, section.identifier),
            (&mut names.comment, section.comment),
        ] {
            if let Some(value) = value {
                *slot = value;
            }
        }

        config.completion = CompletionOptions {
            min_prefix: parsed.completion.min_prefix.unwrap_or(0),
            limit: parsed.completion.limit,
        };
        config
    }

    fn base(config_path: Option<PathBuf>) -> Self {
        Self {
            config_path,
            highlight: HighlightNames::default(),
            completion: CompletionOptions::default(),
        }
    }
}

pub(crate) fn find_config_file(root: &Path) -> Option<PathBuf> {
    CONFIG_FILES
        .iter()
        .map(|name| root.join(name))
        .find(|path| path.is_file())
}
