//! Command-line interface for ipa-reader
//!
//! Provides argument parsing using clap derive macros.

use crate::phonetics::options::StressMode;
use crate::phonetics::render::MarkupFormat;
use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// Annotate English text with IPA transcriptions
#[derive(Parser, Debug)]
#[command(
    name = "ipa-reader",
    version,
    about = "Annotate English text with IPA transcriptions"
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Suppress diagnostics (quiet mode)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose output (-v: load status + report, -vv: list missing words)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert text files (or stdin) to annotated IPA
    Convert(ConvertArgs),

    /// Print the transcription of individual words
    Lookup {
        /// Words to look up
        #[arg(required = true)]
        words: Vec<String>,

        /// Pronunciation dictionary (overrides config)
        #[arg(long, short = 'd', value_name = "PATH")]
        dictionary: Option<PathBuf>,
    },

    /// View configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

/// Options for `convert`. Each flag overrides the matching config value.
#[derive(Args, Debug, Default)]
pub struct ConvertArgs {
    /// Text files, one chapter each (reads stdin when empty)
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// Pronunciation dictionary (JSON, words.js or text)
    #[arg(long, short = 'd', value_name = "PATH")]
    pub dictionary: Option<PathBuf>,

    /// Stress presentation: marks, bold or off
    #[arg(long, value_name = "MODE")]
    pub stress: Option<StressMode>,

    /// Mark aspirated p/t/k
    #[arg(long)]
    pub aspiration: bool,

    /// Render flapped /t/ as ɾ
    #[arg(long)]
    pub flapping: bool,

    /// Render glottalized /t/ as ʔ
    #[arg(long)]
    pub glottal_stop: bool,

    /// Output format: html, ansi or plain
    #[arg(long, short = 'f', value_name = "FORMAT")]
    pub format: Option<MarkupFormat>,

    /// Print the text unchanged, without IPA
    #[arg(long)]
    pub plain: bool,
}

/// Configuration actions
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Get a configuration value by key (e.g., display.stress_mode)
    Get {
        /// Dotted key path (e.g., display.stress_mode, markup.format)
        key: String,
    },
    /// List the effective configuration
    List,
    /// Dump a commented configuration template
    Dump,
    /// Print the default configuration file path
    Path,
}
