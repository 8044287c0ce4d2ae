use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    /// Override the per-lesson feedback display delay.
    #[serde(default)]
    pub feedback_delay_ms: Option<u64>,
    /// Override the per-lesson model "thinking" delay.
    #[serde(default)]
    pub thinking_delay_ms: Option<u64>,
    /// Length of one simulated-training increment.
    #[serde(default = "default_training_tick_ms")]
    pub training_tick_ms: u64,
    /// Fixed seed for the simulated models; unset means a fresh run each time.
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_training_tick_ms() -> u64 {
    200
}

impl Default for Config {
    fn default() -> Self {
        Self {
            feedback_delay_ms: None,
            thinking_delay_ms: None,
            training_tick_ms: default_training_tick_ms(),
            seed: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if path.exists() {
            let content = fs::read_to_string(&path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    #[allow(dead_code)]
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("robolab")
            .join("config.toml")
    }
}
