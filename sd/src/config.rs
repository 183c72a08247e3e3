//! specdriver configuration types and loading

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::plan::{PlanError, SECTION_UNIVERSE, SectionGroup, SectionPlan};

/// Main specdriver configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Generation backend connection
    pub backend: BackendConfig,

    /// Generation run behavior
    pub generation: GenerationConfig,
}

impl Config {
    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path)
                .context(format!("Failed to load config from {}", path.display()));
        }

        // Try project-local config: .specdriver.yml
        let local_config = PathBuf::from(".specdriver.yml");
        if local_config.exists() {
            match Self::load_from_file(&local_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    tracing::warn!("Failed to load config from {}: {}", local_config.display(), e);
                }
            }
        }

        // Try user config: ~/.config/specdriver/specdriver.yml
        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("specdriver").join("specdriver.yml");
            if user_config.exists() {
                match Self::load_from_file(&user_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        tracing::warn!("Failed to load config from {}: {}", user_config.display(), e);
                    }
                }
            }
        }

        // No config file found, use defaults
        tracing::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        tracing::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }
}

/// Generation backend connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Backend base URL
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Per-request timeout in milliseconds
    #[serde(rename = "timeout-ms")]
    pub timeout_ms: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            timeout_ms: 600_000,
        }
    }
}

/// Generation run settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Backend marker for "this section was not generated"
    ///
    /// Locale-specific backend text, so it is configuration rather than a
    /// hard-coded literal.
    #[serde(rename = "placeholder-marker")]
    pub placeholder_marker: String,

    /// Section groups, one generation request each, in order
    ///
    /// Absent means the built-in one-section-per-request plan.
    #[serde(rename = "groups")]
    pub groups: Option<Vec<SectionGroup>>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            placeholder_marker: "section not generated by model".to_string(),
            groups: None,
        }
    }
}

impl GenerationConfig {
    /// Resolve the configured plan, validating the partition
    pub fn plan(&self) -> Result<SectionPlan, PlanError> {
        match &self.groups {
            Some(groups) => SectionPlan::new(groups.clone(), &SECTION_UNIVERSE),
            None => Ok(SectionPlan::default()),
        }
    }
}
