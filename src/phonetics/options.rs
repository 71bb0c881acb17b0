//! Engine options selected by the reading UI.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How stressed syllables are shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StressMode {
    /// A stress glyph before each stressed syllable.
    #[default]
    Marks,
    /// The stressed syllable wrapped in an emphasis span.
    Bold,
    /// No stress display.
    Off,
}

impl FromStr for StressMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "marks" | "mark" => Ok(Self::Marks),
            "bold" => Ok(Self::Bold),
            "off" | "none" => Ok(Self::Off),
            other => Err(format!(
                "unknown stress mode '{other}' (expected marks, bold or off)"
            )),
        }
    }
}

impl fmt::Display for StressMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Marks => write!(f, "marks"),
            Self::Bold => write!(f, "bold"),
            Self::Off => write!(f, "off"),
        }
    }
}

/// Which annotations a conversion produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ConversionOptions {
    pub stress_mode: StressMode,
    pub show_aspiration: bool,
    pub show_flapping: bool,
    pub show_glottal_stop: bool,
}

impl ConversionOptions {
    /// Every annotation switched off.
    pub fn plain() -> Self {
        Self {
            stress_mode: StressMode::Off,
            show_aspiration: false,
            show_flapping: false,
            show_glottal_stop: false,
        }
    }

    /// Every annotation switched on, stress shown in bold.
    pub fn all() -> Self {
        Self {
            stress_mode: StressMode::Bold,
            show_aspiration: true,
            show_flapping: true,
            show_glottal_stop: true,
        }
    }
}
