use bc_core::{LabelStyle, Locale};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration for narrative redaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub locale: Locale,

    #[serde(default)]
    pub redaction: RedactionConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RedactionConfig {
    /// Mask officer names as well as persons
    #[serde(default = "default_redact_officers")]
    pub redact_officers_from_text: bool,

    #[serde(default)]
    pub label_style: LabelStyle,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: Locale::default(),
            redaction: RedactionConfig::default(),
        }
    }
}

impl Default for RedactionConfig {
    fn default() -> Self {
        Self {
            redact_officers_from_text: default_redact_officers(),
            label_style: LabelStyle::default(),
        }
    }
}

fn default_redact_officers() -> bool {
    true
}

impl Config {
    /// Load config from default location or create default if not found
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load config from `path`, writing defaults there if it does not exist
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            let config = Config::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get config file path
    pub fn config_path() -> PathBuf {
        if let Some(dirs) = directories::ProjectDirs::from("org", "blind-charging", "bcr") {
            dirs.config_dir().join("config.toml")
        } else {
            PathBuf::from("~/.bcr/config.toml")
        }
    }
}
