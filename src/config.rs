//! Application configuration
//!
//! A small TOML file covering the speech backend, the scripted utterances,
//! and the simulated thinking delay. Every field has a default; the app
//! runs without any file present.
//!
//! Resolution order: `ETLIGHT_CONFIG` env var, then
//! `<config dir>/etlight/config.toml`, then built-in defaults.

use crate::speech::{RecognizerConfig, SpeechBackend};
use crate::{assistant::AssistantConfig, EtLightError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub speech: SpeechSettings,
    pub assistant: AssistantSettings,
    pub window: WindowSettings,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct SpeechSettings {
    /// Recognition backend to probe
    pub backend: SpeechBackend,
    /// Recognition locale
    pub language: String,
    /// Utterances for the scripted backend
    pub utterances: Vec<String>,
    /// Interval between scripted partials, in milliseconds
    pub partial_interval_ms: u64,
}

impl Default for SpeechSettings {
    fn default() -> Self {
        let defaults = RecognizerConfig::default();
        Self {
            backend: defaults.backend,
            language: defaults.language,
            utterances: defaults.utterances,
            partial_interval_ms: defaults.partial_interval.as_millis() as u64,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct AssistantSettings {
    /// Artificial thinking delay, in milliseconds
    pub thinking_delay_ms: u64,
}

impl Default for AssistantSettings {
    fn default() -> Self {
        Self {
            thinking_delay_ms: 1500,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct WindowSettings {
    pub width: f32,
    pub height: f32,
}

impl Default for WindowSettings {
    fn default() -> Self {
        // Mobile-style portrait window
        Self {
            width: 420.0,
            height: 860.0,
        }
    }
}

impl AppConfig {
    /// Load a configuration from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            EtLightError::ConfigError(format!("failed to read {}: {}", path.display(), e))
        })?;
        let config: AppConfig = toml::from_str(&content).map_err(|e| {
            EtLightError::ConfigError(format!("failed to parse {}: {}", path.display(), e))
        })?;
        info!("loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Resolve the configuration for this run
    pub fn resolve() -> Result<Self> {
        if let Ok(path) = std::env::var("ETLIGHT_CONFIG") {
            return Self::load(path);
        }
        if let Some(path) = Self::default_path() {
            if path.exists() {
                return Self::load(path);
            }
        }
        debug!("no configuration file, using defaults");
        Ok(Self::default())
    }

    /// Platform default config path
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("etlight").join("config.toml"))
    }

    /// Recognizer configuration derived from these settings
    pub fn recognizer_config(&self) -> RecognizerConfig {
        RecognizerConfig {
            backend: self.speech.backend,
            language: self.speech.language.clone(),
            utterances: self.speech.utterances.clone(),
            partial_interval: Duration::from_millis(self.speech.partial_interval_ms),
        }
    }

    /// Assistant configuration derived from these settings
    pub fn assistant_config(&self) -> AssistantConfig {
        AssistantConfig::default()
            .with_thinking_delay(Duration::from_millis(self.assistant.thinking_delay_ms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.speech.backend, SpeechBackend::System);
        assert_eq!(config.speech.language, "zh-HK");
        assert_eq!(config.assistant.thinking_delay_ms, 1500);
        assert!(config.window.height > config.window.width);
    }

    #[test]
    fn test_parse_partial_file() {
        let config: AppConfig = toml::from_str(
            r#"
            [speech]
            backend = "scripted"
            utterances = ["今日大市點睇？"]

            [assistant]
            thinking_delay_ms = 100
            "#,
        )
        .unwrap();

        assert_eq!(config.speech.backend, SpeechBackend::Scripted);
        assert_eq!(config.speech.utterances, vec!["今日大市點睇？"]);
        // Unset fields keep their defaults
        assert_eq!(config.speech.language, "zh-HK");
        assert_eq!(config.assistant.thinking_delay_ms, 100);
    }

    #[test]
    fn test_derived_configs() {
        let mut config = AppConfig::default();
        config.assistant.thinking_delay_ms = 250;
        config.speech.partial_interval_ms = 40;

        assert_eq!(
            config.assistant_config().thinking_delay,
            Duration::from_millis(250)
        );
        assert_eq!(
            config.recognizer_config().partial_interval,
            Duration::from_millis(40)
        );
    }

    #[test]
    fn test_load_missing_file_is_an_error() {
        assert!(AppConfig::load("/nonexistent/etlight.toml").is_err());
    }
}
