use std::path::PathBuf;
use std::time::Duration;
use serde::{Deserialize, Serialize};
use anyhow::{Result, Context};

use crate::ai_provider::{AIConfig, DEFAULT_GEMINI_MODEL, DEFAULT_GEMINI_URL};
use crate::core::SimulatorSettings;

/// Key used when neither the config file nor the environment provides one.
pub const BUNDLED_MAPS_API_KEY: &str = match option_env!("HEALTHWATCH_MAPS_KEY") {
    Some(key) => key,
    None => "YOUR_GOOGLE_MAPS_API_KEY",
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(skip)]
    pub data_dir: PathBuf,
    pub ai: AiSettings,
    #[serde(default)]
    pub maps: MapsSettings,
    #[serde(default)]
    pub simulator: SimulatorTimings,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiSettings {
    pub model: String,
    pub base_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MapsSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulatorTimings {
    pub tick_interval_secs: u64,
    pub report_latency_ms: u64,
    pub typing_delay_ms: u64,
    pub voice_delay_ms: u64,
}

impl Default for SimulatorTimings {
    fn default() -> Self {
        SimulatorTimings {
            tick_interval_secs: 15,
            report_latency_ms: 1500,
            typing_delay_ms: 1500,
            voice_delay_ms: 2000,
        }
    }
}

impl Config {
    pub fn new(data_dir: Option<PathBuf>) -> Result<Self> {
        let data_dir = data_dir.unwrap_or_else(|| {
            dirs::config_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("healthwatch")
        });

        std::fs::create_dir_all(&data_dir)
            .context("Failed to create data directory")?;

        let config_path = data_dir.join("config.json");

        if config_path.exists() {
            let config_str = std::fs::read_to_string(&config_path)
                .context("Failed to read config.json")?;

            if config_str.trim().is_empty() {
                tracing::warn!(path = %config_path.display(), "config file is empty, recreating defaults");
            } else {
                let mut config: Config = serde_json::from_str(&config_str)
                    .with_context(|| format!("Failed to parse {}", config_path.display()))?;
                config.data_dir = data_dir;
                return Ok(config);
            }
        }

        let mut config = Self::default_config(data_dir);
        config.save()?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_path = self.config_file();
        let json_str = serde_json::to_string_pretty(self)
            .context("Failed to serialize config")?;
        std::fs::write(&config_path, json_str)
            .context("Failed to write config.json")?;
        Ok(())
    }

    fn default_config(data_dir: PathBuf) -> Self {
        Config {
            data_dir,
            ai: AiSettings {
                model: DEFAULT_GEMINI_MODEL.to_string(),
                base_url: DEFAULT_GEMINI_URL.to_string(),
                api_key: None,
                timeout_secs: 30,
            },
            maps: MapsSettings::default(),
            simulator: SimulatorTimings::default(),
            catalog_path: None,
        }
    }

    pub fn config_file(&self) -> PathBuf {
        self.data_dir.join("config.json")
    }

    /// Stored key, then `GEMINI_API_KEY`. Never written back to the file.
    pub fn gemini_api_key(&self) -> Option<String> {
        first_key(self.ai.api_key.as_deref(), std::env::var("GEMINI_API_KEY").ok())
    }

    /// Stored key, then `GOOGLE_MAPS_API_KEY`, then the bundled default
    pub fn maps_api_key(&self) -> String {
        first_key(self.maps.api_key.as_deref(), std::env::var("GOOGLE_MAPS_API_KEY").ok())
            .unwrap_or_else(|| BUNDLED_MAPS_API_KEY.to_string())
    }

    pub fn set_maps_api_key(&mut self, key: &str) -> Result<()> {
        self.maps.api_key = Some(key.trim().to_string());
        self.save()
    }

    pub fn get_ai_config(&self, model: Option<String>) -> AIConfig {
        AIConfig {
            model: model.unwrap_or_else(|| self.ai.model.clone()),
            api_key: self.gemini_api_key(),
            base_url: self.ai.base_url.clone(),
            timeout: Duration::from_secs(self.ai.timeout_secs),
            ..AIConfig::default()
        }
    }

    pub fn simulator_settings(&self) -> SimulatorSettings {
        SimulatorSettings {
            tick_interval: Duration::from_secs(self.simulator.tick_interval_secs.max(1)),
            report_latency: Duration::from_millis(self.simulator.report_latency_ms),
            ..SimulatorSettings::default()
        }
    }

    pub fn typing_delay(&self) -> Duration {
        Duration::from_millis(self.simulator.typing_delay_ms)
    }

    pub fn voice_delay(&self) -> Duration {
        Duration::from_millis(self.simulator.voice_delay_ms)
    }
}

// Empty strings count as unset
fn first_key(stored: Option<&str>, env: Option<String>) -> Option<String> {
    stored
        .filter(|key| !key.is_empty())
        .map(str::to_string)
        .or_else(|| env.filter(|key| !key.is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_creates_default_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::new(Some(dir.path().to_path_buf())).unwrap();

        assert!(dir.path().join("config.json").exists());
        assert_eq!(config.ai.model, DEFAULT_GEMINI_MODEL);
        assert_eq!(config.simulator.tick_interval_secs, 15);
        assert_eq!(config.simulator_settings().report_latency, Duration::from_millis(1500));
    }

    #[test]
    fn test_loads_existing_config() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("config.json"),
            r#"{
                "ai": { "model": "gemini-pro-vision", "base_url": "http://localhost:8080", "api_key": "abc", "timeout_secs": 5 },
                "simulator": { "tick_interval_secs": 2, "report_latency_ms": 0, "typing_delay_ms": 0, "voice_delay_ms": 0 }
            }"#,
        )
        .unwrap();

        let config = Config::new(Some(dir.path().to_path_buf())).unwrap();
        let ai = config.get_ai_config(None);
        assert_eq!(ai.model, "gemini-pro-vision");
        assert_eq!(ai.api_key.as_deref(), Some("abc"));
        assert_eq!(ai.timeout, Duration::from_secs(5));
        assert_eq!(config.simulator_settings().tick_interval, Duration::from_secs(2));
        assert_eq!(config.get_ai_config(Some("other".to_string())).model, "other");
    }

    #[test]
    fn test_maps_key_is_persisted() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::new(Some(dir.path().to_path_buf())).unwrap();
        config.set_maps_api_key("  stored-key ").unwrap();

        let reloaded = Config::new(Some(dir.path().to_path_buf())).unwrap();
        assert_eq!(reloaded.maps_api_key(), "stored-key");
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("config.json"), "{ not json").unwrap();
        assert!(Config::new(Some(dir.path().to_path_buf())).is_err());
    }

    #[test]
    fn test_first_key_order() {
        assert_eq!(first_key(Some("file"), Some("env".to_string())).as_deref(), Some("file"));
        assert_eq!(first_key(Some(""), Some("env".to_string())).as_deref(), Some("env"));
        assert_eq!(first_key(None, Some("env".to_string())).as_deref(), Some("env"));
        assert_eq!(first_key(None, Some(String::new())), None);
        assert_eq!(first_key(Some(""), None), None);
    }

    #[test]
    fn test_env_keys_are_not_persisted() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::new(Some(dir.path().to_path_buf())).unwrap();
        assert!(config.ai.api_key.is_none());

        std::env::set_var("GEMINI_API_KEY", "ENV-GEMINI-SECRET");
        std::env::set_var("GOOGLE_MAPS_API_KEY", "");
        assert_eq!(config.get_ai_config(None).api_key.as_deref(), Some("ENV-GEMINI-SECRET"));
        assert_eq!(config.maps_api_key(), BUNDLED_MAPS_API_KEY);

        std::env::set_var("GOOGLE_MAPS_API_KEY", "ENV-MAPS-KEY");
        assert_eq!(config.maps_api_key(), "ENV-MAPS-KEY");

        config.set_maps_api_key("stored-maps").unwrap();
        assert_eq!(config.maps_api_key(), "stored-maps");

        let written = std::fs::read_to_string(config.config_file()).unwrap();
        std::env::remove_var("GEMINI_API_KEY");
        std::env::remove_var("GOOGLE_MAPS_API_KEY");
        assert!(!written.contains("ENV-GEMINI-SECRET"));
        assert!(!written.contains("ENV-MAPS-KEY"));
        assert!(written.contains("stored-maps"));
    }
}
