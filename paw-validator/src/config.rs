//! Keyword tables and thresholds for connection analysis.

use serde::{Deserialize, Serialize};

use crate::types::{ConnectionType, PawError, Result};

/// Configuration for the connection analyzer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PawConfig {
    /// Commercial / extraction keywords
    pub red_flags: Vec<String>,
    /// Commons / collaboration keywords
    pub green_flags: Vec<String>,
    /// Terms that indicate public exposure
    pub exposure_terms: Vec<String>,
    /// Connection types checked for identity exposure
    pub exposure_types: Vec<ConnectionType>,
    /// Threat thresholds
    pub thresholds: ThreatThresholds,
}

impl Default for PawConfig {
    fn default() -> Self {
        Self {
            red_flags: to_strings(&[
                "monetize", "viral", "platform", "scale", "growth hack",
                "audience", "followers", "engagement", "brand", "influence",
                "exclusive", "proprietary", "ownership", "rights",
                "investment", "equity", "stake", "valuation",
            ]),
            green_flags: to_strings(&[
                "open source", "commons", "gift", "share", "community",
                "stewardship", "regenerative", "collaborative", "mutual",
                "academic", "research", "learning", "wisdom",
            ]),
            exposure_terms: to_strings(&["public", "audience"]),
            exposure_types: vec![ConnectionType::Exposure, ConnectionType::Publication],
            thresholds: ThreatThresholds::default(),
        }
    }
}

impl PawConfig {
    /// Load config from YAML.
    pub fn from_yaml(yaml: &str) -> std::result::Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    /// Serialize to YAML.
    pub fn to_yaml(&self) -> std::result::Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }

    /// Check that the tables are usable.
    pub fn validate(&self) -> Result<()> {
        if self.red_flags.is_empty() {
            return Err(PawError::ConfigError("red flag list is empty".to_string()));
        }
        if self.green_flags.is_empty() {
            return Err(PawError::ConfigError("green flag list is empty".to_string()));
        }
        if let Some(blank) = self
            .red_flags
            .iter()
            .chain(&self.green_flags)
            .chain(&self.exposure_terms)
            .find(|k| k.trim().is_empty())
        {
            return Err(PawError::ConfigError(format!("blank keyword '{}'", blank)));
        }
        if !(0.0..=1.0).contains(&self.thresholds.safe_score) {
            return Err(PawError::ConfigError(format!(
                "safe score must be within [0, 1], got {}",
                self.thresholds.safe_score
            )));
        }
        Ok(())
    }
}

/// Thresholds for threat levels.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ThreatThresholds {
    /// More red flags than this is `Danger`
    pub danger_red_flags: usize,
    /// Pass ratio must exceed this for `Safe`
    pub safe_score: f64,
}

impl Default for ThreatThresholds {
    fn default() -> Self {
        Self {
            danger_red_flags: 2,
            safe_score: 0.7,
        }
    }
}

fn to_strings(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PawConfig::default();
        assert_eq!(config.red_flags.len(), 18);
        assert_eq!(config.green_flags.len(), 13);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_blank_keyword() {
        let mut config = PawConfig::default();
        config.green_flags.push("  ".to_string());
        assert!(matches!(config.validate(), Err(PawError::ConfigError(_))));
    }

    #[test]
    fn test_yaml_override() {
        let config = PawConfig::from_yaml("red_flags: [crypto, token]\n").unwrap();
        assert_eq!(config.red_flags, vec!["crypto", "token"]);
        assert_eq!(config.green_flags.len(), 13);
        assert_eq!(config.thresholds.danger_red_flags, 2);
    }
}
