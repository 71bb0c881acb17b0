//! ipa-reader - English text to IPA annotation
//!
//! Replaces words with dictionary transcriptions and marks stress,
//! aspiration, flapping and glottal stops in HTML or terminal markup.

#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
#![warn(clippy::let_underscore_must_use)]

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod defaults;
pub mod dictionary;
pub mod engine;
pub mod error;
#[cfg(feature = "cli")]
pub mod output;
pub mod phonetics;

// Engine
pub use engine::{Chapter, ConvertedChapter, Converter, convert_chapters};

// Dictionary
pub use dictionary::{DictionaryFormat, DictionaryHandle, DictionaryState, PronunciationDictionary};

// Options and markup back-ends
pub use phonetics::options::{ConversionOptions, StressMode};
pub use phonetics::render::{AnsiMarkup, HtmlMarkup, Markup, MarkupFormat, PlainMarkup};
pub use phonetics::resolver::{Lexicon, ResolveReport};

// Error handling
pub use error::{IpaError, Result};

// Config
pub use config::Config;

/// Build version string with optional git commit hash.
///
/// Returns `"0.1.0+abc1234"` when git hash is available, `"0.1.0"` otherwise.
pub fn version_string() -> String {
    let version = env!("CARGO_PKG_VERSION");
    match option_env!("GIT_HASH") {
        Some(hash) if !hash.is_empty() => format!("{}+{}", version, hash),
        _ => version.to_string(),
    }
}
