//! Configuration validation.

use crate::config::schema::PausepointConfig;
use crate::error::{PausepointError, Result};
use crate::snapshot::MAX_COMPRESSION_LEVEL;
use crate::store::validate_segment;

/// Collect every problem with `config`.
pub fn validate_config(config: &PausepointConfig) -> Vec<String> {
    let mut errors = Vec::new();

    if let Err(e) = validate_segment(&config.storage.marker) {
        errors.push(format!("storage.marker: {}", e));
    }

    if config.export.compression_level > MAX_COMPRESSION_LEVEL {
        errors.push(format!(
            "export.compression_level must be between 0 and {}, got {}",
            MAX_COMPRESSION_LEVEL, config.export.compression_level
        ));
    }

    if config.export.archive_name.trim().is_empty() {
        errors.push("export.archive_name must not be empty".to_string());
    }

    errors
}

/// Validate `config`, failing with every problem joined into one message.
pub fn validate(config: &PausepointConfig) -> Result<()> {
    let errors = validate_config(config);
    if errors.is_empty() {
        Ok(())
    } else {
        Err(PausepointError::ConfigValidationError {
            message: errors.join("; "),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(validate(&PausepointConfig::default()).is_ok());
    }

    #[test]
    fn rejects_marker_with_separator() {
        let mut config = PausepointConfig::default();
        config.storage.marker = "a/b".into();

        let errors = validate_config(&config);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].starts_with("storage.marker"));
    }

    #[test]
    fn rejects_compression_above_maximum() {
        let mut config = PausepointConfig::default();
        config.export.compression_level = 12;

        let err = validate(&config).unwrap_err();
        assert!(err.to_string().contains("compression_level"));
    }

    #[test]
    fn reports_all_problems_at_once() {
        let mut config = PausepointConfig::default();
        config.storage.marker = String::new();
        config.export.compression_level = 10;
        config.export.archive_name = "  ".into();

        assert_eq!(validate_config(&config).len(), 3);
    }
}
