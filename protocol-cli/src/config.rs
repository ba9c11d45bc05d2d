//! Combined configuration for the command line tool.

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use interviewed::InterviewConfig;
use paw_validator::PawConfig;
use trust_protocol::TrustConfig;

/// Top-level config file layout.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProtocolConfig {
    pub logging: LoggingConfig,
    pub trust: TrustConfig,
    pub paw: PawConfig,
    pub interview: InterviewConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive when RUST_LOG is unset
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl ProtocolConfig {
    pub fn from_yaml(yaml: &str) -> anyhow::Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn to_yaml(&self) -> anyhow::Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Load from a file, falling back to defaults when it does not exist.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config = Self::from_yaml(&content)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        self.trust.validate().context("invalid trust config")?;
        self.paw.validate().context("invalid paw config")?;
        self.interview.validate().context("invalid interview config")?;
        Ok(())
    }
}
