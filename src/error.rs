//! Error types for ipa-reader.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum IpaError {
    // Configuration errors
    #[error("Configuration file not found at {path}")]
    ConfigFileNotFound { path: String },

    #[error("Failed to parse configuration: {message}")]
    ConfigParse { message: String },

    #[error("Invalid configuration value for {key}: {message}")]
    ConfigInvalidValue { key: String, message: String },

    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    // Dictionary errors
    #[error("Pronunciation dictionary is not ready (state: {state})")]
    DictionaryNotReady { state: String },

    #[error("Failed to load pronunciation dictionary from {path}: {message}")]
    DictionaryLoad { path: String, message: String },

    #[error("Malformed pronunciation dictionary: {message}")]
    DictionaryFormat { message: String },

    // General I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Generic error for cases not covered above
    #[error("{0}")]
    Other(String),
}

// Type alias for convenience
pub type Result<T> = std::result::Result<T, IpaError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_config_file_not_found_display() {
        let error = IpaError::ConfigFileNotFound {
            path: "/path/to/config.toml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found at /path/to/config.toml"
        );
    }

    #[test]
    fn test_config_invalid_value_display() {
        let error = IpaError::ConfigInvalidValue {
            key: "display.stress_mode".to_string(),
            message: "expected marks, bold or off".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid configuration value for display.stress_mode: expected marks, bold or off"
        );
    }

    #[test]
    fn test_dictionary_not_ready_display() {
        let error = IpaError::DictionaryNotReady {
            state: "loading".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Pronunciation dictionary is not ready (state: loading)"
        );
    }

    #[test]
    fn test_dictionary_load_display() {
        let error = IpaError::DictionaryLoad {
            path: "/data/words.js".to_string(),
            message: "permission denied".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to load pronunciation dictionary from /data/words.js: permission denied"
        );
    }

    #[test]
    fn test_dictionary_format_display() {
        let error = IpaError::DictionaryFormat {
            message: "no object literal found".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Malformed pronunciation dictionary: no object literal found"
        );
    }

    #[test]
    fn test_other_display() {
        let error = IpaError::Other("unexpected error".to_string());
        assert_eq!(error.to_string(), "unexpected error");
    }

    #[test]
    fn test_from_io_error() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let error: IpaError = io_error.into();
        assert!(error.to_string().contains("file not found"));
    }

    #[test]
    fn test_from_toml_error() {
        let toml_error = toml::from_str::<toml::Value>("invalid = toml = syntax").unwrap_err();
        let error: IpaError = toml_error.into();
        assert!(error.to_string().contains("Configuration error"));
    }

    #[test]
    fn test_error_source_chain_io() {
        let io_error = io::Error::new(io::ErrorKind::PermissionDenied, "access denied");
        let error: IpaError = io_error.into();

        let error_trait: &dyn std::error::Error = &error;
        assert!(error_trait.source().is_some());
    }

    #[test]
    fn test_error_is_send_and_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}

        assert_send::<IpaError>();
        assert_sync::<IpaError>();
    }

    #[test]
    fn test_error_debug_format() {
        let error = IpaError::DictionaryNotReady {
            state: "unloaded".to_string(),
        };
        let debug_str = format!("{:?}", error);
        assert!(debug_str.contains("DictionaryNotReady"));
        assert!(debug_str.contains("unloaded"));
    }
}
