//! Default constants for ipa-reader.
//!
//! Symbols shared between the analysis passes and the renderer, plus the
//! presentation defaults that seed the configuration.

/// Combining acute accent. Dictionary transcriptions carry it immediately
/// after the character it stresses.
pub const STRESS_DIACRITIC: char = '\u{0301}';

/// Primary-stress glyph inserted before a stressed syllable in marks mode.
pub const STRESS_GLYPH: char = 'ˈ';

/// Alveolar tap, substituted for a flapped /t/.
pub const FLAP_SYMBOL: char = 'ɾ';

/// Glottal stop, substituted for a glottalized /t/.
pub const GLOTTAL_STOP_SYMBOL: char = 'ʔ';

/// Application directory name under the XDG config dir.
pub const APP_DIR: &str = "ipa-reader";

/// Configuration file name.
pub const CONFIG_FILE: &str = "config.toml";

/// Environment variable overriding `dictionary.path`.
pub const ENV_DICTIONARY: &str = "IPA_READER_DICTIONARY";

/// Environment variable overriding `display.stress_mode`.
pub const ENV_STRESS_MODE: &str = "IPA_READER_STRESS_MODE";

/// Inline style for the stress-emphasis span.
pub const STRESS_STYLE: &str = "color: #2563eb; font-weight: 600;";

/// Underline color for strongly aspirated plosives.
pub const STRONG_ASPIRATION_COLOR: &str = "#dc2626";

/// Underline color for weakly aspirated plosives.
pub const WEAK_ASPIRATION_COLOR: &str = "#eab308";

/// How many distinct missing words `-vv` lists after a conversion.
pub const MISSING_WORDS_SHOWN: usize = 20;
