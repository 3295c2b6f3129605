//! Composer configuration

use crate::error::{ComboError, ComboResult};
use serde::{Deserialize, Serialize};

/// Environment variable overriding [`ComposerConfig::undo_depth`]
pub const UNDO_DEPTH_ENV: &str = "COMBO_UNDO_DEPTH";

/// Options controlling a composer session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComposerConfig {
    /// Number of prior sequences kept for undo; 0 disables undo
    pub undo_depth: usize,
}

impl Default for ComposerConfig {
    fn default() -> Self {
        Self { undo_depth: 50 }
    }
}

impl ComposerConfig {
    /// Parse from a JSON document; missing fields take their defaults
    pub fn from_json_str(json: &str) -> ComboResult<Self> {
        serde_json::from_str(json).map_err(|e| ComboError::MalformedInput(format!("config: {e}")))
    }

    /// Defaults overridden by the environment
    pub fn from_env() -> ComboResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> ComboResult<Self> {
        let mut config = Self::default();
        if let Some(raw) = lookup(UNDO_DEPTH_ENV) {
            config.undo_depth = raw.trim().parse().map_err(|_| {
                ComboError::MalformedInput(format!("{UNDO_DEPTH_ENV} is not a number: {raw}"))
            })?;
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        assert_eq!(ComposerConfig::default().undo_depth, 50);
        assert_eq!(
            ComposerConfig::from_json_str("{}").unwrap(),
            ComposerConfig::default()
        );
    }

    #[test]
    fn test_from_json() {
        let config = ComposerConfig::from_json_str(r#"{"undo_depth": 5}"#).unwrap();
        assert_eq!(config.undo_depth, 5);
        assert!(ComposerConfig::from_json_str(r#"{"undo_depth": -1}"#).is_err());
    }

    #[test]
    fn test_from_lookup() {
        let config = ComposerConfig::from_lookup(|_| Some(" 3 ".to_string())).unwrap();
        assert_eq!(config.undo_depth, 3);

        let config = ComposerConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, ComposerConfig::default());

        assert!(matches!(
            ComposerConfig::from_lookup(|_| Some("lots".to_string())),
            Err(ComboError::MalformedInput(_))
        ));
    }
}
