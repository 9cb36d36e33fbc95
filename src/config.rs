use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::classifier::PriorMode;
use crate::errors::ConfigError;
use crate::vocabulary::MIN_WORD_FREQ;

/// Tunables of training and classification.
///
/// Loaded from a JSON file; missing keys fall back to their defaults.
///
/// ```json
/// { "min_word_freq": 100, "prior_mode": "raw" }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClassifierConfig {
    /// Words seen fewer times are left out of totals and scores.
    pub min_word_freq: u64,
    pub prior_mode: PriorMode,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            min_word_freq: MIN_WORD_FREQ,
            prior_mode: PriorMode::default(),
        }
    }
}

impl ClassifierConfig {
    /// Load a config from a JSON file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let mut string = String::new();
        File::open(path)?.read_to_string(&mut string)?;
        Self::from_json(&string)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClassifierConfig::from_json("{}").unwrap();
        assert_eq!(config, ClassifierConfig::default());
        assert_eq!(config.min_word_freq, 100);
        assert_eq!(config.prior_mode, PriorMode::Raw);
    }

    #[test]
    fn test_overrides() {
        let config = ClassifierConfig::from_json(r#"{"min_word_freq": 5, "prior_mode": "log"}"#).unwrap();
        assert_eq!(config.min_word_freq, 5);
        assert_eq!(config.prior_mode, PriorMode::Log);
    }

    #[test]
    fn test_malformed() {
        assert!(matches!(
            ClassifierConfig::from_json(r#"{"min_word_freq": "lots"}"#),
            Err(ConfigError::Deserialize(_))
        ));
        assert!(ClassifierConfig::from_json(r#"{"smoothing": 1}"#).is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"prior_mode": "log"}"#).unwrap();

        let config = ClassifierConfig::load_from_file(&path).unwrap();
        assert_eq!(config.prior_mode, PriorMode::Log);
        assert_eq!(config.min_word_freq, MIN_WORD_FREQ);

        assert!(matches!(
            ClassifierConfig::load_from_file(dir.path().join("missing.json")),
            Err(ConfigError::ReadFile(_))
        ));
    }
}
