//! Command line argument parsing for the Thesaurize CLI using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::config::FilterConfig;
use crate::error::{Result, ThesaurizeError};

/// Thesaurize - make statements sound ridiculous with a thesaurus
#[derive(Parser, Debug, Clone)]
#[command(name = "thesaurize")]
#[command(about = "Replace every word of a message with a synonym")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct ThesaurizeArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Configuration file (JSON)
    #[arg(short, long, value_name = "CONFIG_FILE", env = "THESAURIZE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl ThesaurizeArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Load a thesaurus archive and report what was stored
    Load(LoadArgs),

    /// Load a thesaurus archive, then transform text with it
    Transform(TransformArgs),
}

/// Arguments for loading a thesaurus
#[derive(Parser, Debug, Clone)]
pub struct LoadArgs {
    /// URI of the thesaurus zip archive (file://, http:// or https://)
    #[arg(short, long, value_name = "URI", env = "THESAURIZE_DATA")]
    pub data: String,

    /// Set unions per committed transaction
    #[arg(short, long)]
    pub batch_size: Option<usize>,

    #[command(flatten)]
    pub filter: FilterArgs,
}

/// Arguments for transforming text
#[derive(Parser, Debug, Clone)]
pub struct TransformArgs {
    /// URI of the thesaurus zip archive (file://, http:// or https://)
    #[arg(short, long, value_name = "URI", env = "THESAURIZE_DATA")]
    pub data: String,

    /// Leave common words such as "the" and "and" untouched
    #[arg(short, long)]
    pub skip_common_words: bool,

    /// Seconds to wait for the thesaurus to finish loading. 0 skips the wait
    #[arg(short, long, default_value = "30")]
    pub timeout: u64,

    /// Maximum length of a transformed message
    #[arg(long)]
    pub max_length: Option<usize>,

    #[command(flatten)]
    pub filter: FilterArgs,

    /// Text to transform. Lines are read from stdin when omitted
    #[arg(value_name = "TEXT")]
    pub text: Vec<String>,
}

/// Profanity filter flags shared by every command that loads data
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Drop profane headwords and synonyms while loading
    #[arg(long)]
    pub skip_profane_words: bool,

    /// Rule tags to filter on (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub profane_word_categories: Vec<String>,

    /// URI of the JSON profanity rule index
    #[arg(long, value_name = "URI")]
    pub profane_word_index_url: Option<String>,
}

impl FilterArgs {
    /// Merge the flags over the configured filter. Returns `None` when filtering
    /// is disabled.
    pub fn resolve(&self, configured: Option<&FilterConfig>) -> Result<Option<FilterConfig>> {
        if !self.skip_profane_words {
            return Ok(configured.cloned());
        }

        let mut filter = configured.cloned().unwrap_or_default();
        if !self.profane_word_categories.is_empty() {
            filter.categories = self.profane_word_categories.clone();
        }
        if let Some(url) = &self.profane_word_index_url {
            filter.index_url = url.clone();
        }

        if filter.index_url.is_empty() {
            return Err(ThesaurizeError::invalid_config(
                "--skip-profane-words needs --profane-word-index-url",
            ));
        }
        Ok(Some(filter))
    }
}

/// Output formats available in CLI
#[derive(ValueEnum, Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}
