use crate::defaults::{
    APP_DIR, CONFIG_FILE, ENV_DICTIONARY, ENV_STRESS_MODE, STRESS_STYLE, STRONG_ASPIRATION_COLOR,
    WEAK_ASPIRATION_COLOR,
};
use crate::error::{IpaError, Result};
use crate::phonetics::options::{ConversionOptions, StressMode};
use crate::phonetics::render::{AnsiMarkup, HtmlMarkup, Markup, MarkupFormat, PlainMarkup};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    pub display: DisplayConfig,
    pub dictionary: DictionaryConfig,
    pub markup: MarkupConfig,
}

/// Which annotations the reader shows
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DisplayConfig {
    /// When false, text is shown as-is and the engine is not invoked.
    pub show_ipa: bool,
    pub stress_mode: StressMode,
    pub show_aspiration: bool,
    pub show_flapping: bool,
    pub show_glottal_stop: bool,
}

/// Pronunciation dictionary location
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct DictionaryConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

/// Output format and styling
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MarkupConfig {
    pub format: MarkupFormat,
    pub stress_style: String,
    pub strong_aspiration_color: String,
    pub weak_aspiration_color: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            show_ipa: true,
            stress_mode: StressMode::Marks,
            show_aspiration: false,
            show_flapping: false,
            show_glottal_stop: false,
        }
    }
}

impl Default for MarkupConfig {
    fn default() -> Self {
        Self {
            format: MarkupFormat::Html,
            stress_style: STRESS_STYLE.to_string(),
            strong_aspiration_color: STRONG_ASPIRATION_COLOR.to_string(),
            weak_aspiration_color: WEAK_ASPIRATION_COLOR.to_string(),
        }
    }
}

const TEMPLATE: &str = r##"# ipa-reader configuration

[display]
# false: show the text unchanged, without IPA
show_ipa = true
# "marks" (ˈ before stressed syllables), "bold" (emphasis span) or "off"
stress_mode = "marks"
# underline aspirated p/t/k (strong and weak get different colors)
show_aspiration = false
# render intervocalic /t/ before an unstressed vowel as ɾ
show_flapping = false
# render /t/ as ʔ in glottalizing contexts
show_glottal_stop = false

[dictionary]
# JSON object, words.js script, or "WORD transcription" lines
# path = "/usr/share/ipa-reader/words.json"

[markup]
# "html", "ansi" or "plain"
format = "html"
stress_style = "color: #2563eb; font-weight: 600;"
strong_aspiration_color = "#dc2626"
weak_aspiration_color = "#eab308"
"##;

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Missing fields use default values.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                IpaError::ConfigFileNotFound {
                    path: path.display().to_string(),
                }
            } else {
                IpaError::Io(e)
            }
        })?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration from a file or return defaults if it doesn't exist
    ///
    /// Invalid TOML is still an error.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        match Self::load(path) {
            Err(IpaError::ConfigFileNotFound { .. }) => Ok(Self::default()),
            other => other,
        }
    }

    /// Apply environment variable overrides
    ///
    /// Supported environment variables:
    /// - IPA_READER_DICTIONARY → dictionary.path
    /// - IPA_READER_STRESS_MODE → display.stress_mode
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(path) = std::env::var(ENV_DICTIONARY)
            && !path.is_empty()
        {
            self.dictionary.path = Some(PathBuf::from(path));
        }

        if let Ok(mode) = std::env::var(ENV_STRESS_MODE)
            && let Ok(mode) = mode.parse::<StressMode>()
        {
            self.display.stress_mode = mode;
        }

        self
    }

    /// Get the default configuration file path
    ///
    /// Returns ~/.config/ipa-reader/config.toml on Linux
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
    }

    /// The dictionary file to convert against.
    pub fn dictionary_path(&self) -> Result<&Path> {
        self.dictionary
            .path
            .as_deref()
            .ok_or_else(|| IpaError::ConfigInvalidValue {
                key: "dictionary.path".to_string(),
                message: "not set (use --dictionary or dictionary.path)".to_string(),
            })
    }

    pub fn conversion_options(&self) -> ConversionOptions {
        ConversionOptions {
            stress_mode: self.display.stress_mode,
            show_aspiration: self.display.show_aspiration,
            show_flapping: self.display.show_flapping,
            show_glottal_stop: self.display.show_glottal_stop,
        }
    }

    /// Markup back-end for the configured format.
    pub fn build_markup(&self) -> Box<dyn Markup> {
        match self.markup.format {
            MarkupFormat::Html => Box::new(HtmlMarkup {
                stress_style: self.markup.stress_style.clone(),
                strong_aspiration_color: self.markup.strong_aspiration_color.clone(),
                weak_aspiration_color: self.markup.weak_aspiration_color.clone(),
            }),
            MarkupFormat::Ansi => Box::new(AnsiMarkup),
            MarkupFormat::Plain => Box::new(PlainMarkup),
        }
    }

    /// Look up a value by dotted key, e.g. `display.stress_mode`.
    pub fn get_value_by_path(&self, key: &str) -> Result<String> {
        let serialized = toml::to_string(self).map_err(|e| IpaError::ConfigParse {
            message: e.to_string(),
        })?;
        let mut value = toml::Value::Table(toml::from_str::<toml::Table>(&serialized)?);
        for part in key.split('.') {
            value = match value {
                toml::Value::Table(mut table) => {
                    table
                        .remove(part)
                        .ok_or_else(|| IpaError::ConfigInvalidValue {
                            key: key.to_string(),
                            message: "unknown or unset key".to_string(),
                        })?
                }
                _ => {
                    return Err(IpaError::ConfigInvalidValue {
                        key: key.to_string(),
                        message: format!("'{}' is not a section", part),
                    });
                }
            };
        }
        Ok(match value {
            toml::Value::String(s) => s,
            toml::Value::Table(table) => toml::to_string(&table).map_err(|e| {
                IpaError::ConfigParse {
                    message: e.to_string(),
                }
            })?,
            other => other.to_string(),
        })
    }

    /// Commented configuration template.
    pub fn dump_template() -> &'static str {
        TEMPLATE
    }
}
