//! Selection settings.
//!
//! Loaded from TOML, e.g.
//!
//! ```toml
//! retry_factor = 5
//! log_profile = "production"
//! ```

use serde::Deserialize;
use std::path::Path;

use crate::errors::{Result, RevselError};
use crate::logging_facility::Profile;
use crate::sampler::DEFAULT_RETRY_FACTOR;

/// Tunables for a selection run
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SelectionSettings {
    /// Per-pick collision budget is `retry_factor * required_count`
    pub retry_factor: usize,

    /// Logging profile for binaries built on this crate
    pub log_profile: Profile,
}

impl Default for SelectionSettings {
    fn default() -> Self {
        Self {
            retry_factor: DEFAULT_RETRY_FACTOR,
            log_profile: Profile::default(),
        }
    }
}

impl SelectionSettings {
    /// Parse and validate settings from TOML text
    ///
    /// # Errors
    ///
    /// - `RevselError::Serialization` if the text is not valid settings TOML.
    /// - `RevselError::InvalidSettings` if a value is out of range.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let settings: Self = toml::from_str(text).map_err(|e| RevselError::Serialization {
            message: e.to_string(),
        })?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read, parse and validate a settings file
    ///
    /// # Errors
    ///
    /// - `RevselError::Io` if the file cannot be read.
    /// - Any error from [`SelectionSettings::from_toml_str`].
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| RevselError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&text)
    }

    /// # Errors
    ///
    /// `RevselError::InvalidSettings` if `retry_factor` is zero.
    pub fn validate(&self) -> Result<()> {
        if self.retry_factor == 0 {
            return Err(RevselError::InvalidSettings {
                reason: "retry_factor must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_gives_defaults() {
        let settings = SelectionSettings::from_toml_str("").unwrap();
        assert_eq!(settings, SelectionSettings::default());
        assert_eq!(settings.retry_factor, 5);
    }

    #[test]
    fn test_parses_all_fields() {
        let settings =
            SelectionSettings::from_toml_str("retry_factor = 8\nlog_profile = \"production\"\n")
                .unwrap();

        assert_eq!(settings.retry_factor, 8);
        assert_eq!(settings.log_profile, Profile::Production);
    }

    #[test]
    fn test_zero_retry_factor_rejected() {
        let err = SelectionSettings::from_toml_str("retry_factor = 0").unwrap_err();
        assert!(matches!(err, RevselError::InvalidSettings { .. }));
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = SelectionSettings::from_toml_str("retries = 3").unwrap_err();
        assert!(matches!(err, RevselError::Serialization { .. }));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = SelectionSettings::load(Path::new("/nonexistent/revsel.toml")).unwrap_err();
        assert!(matches!(err, RevselError::Io { .. }));
    }
}
