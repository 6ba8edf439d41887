use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default = "default_locale")]
    pub locale: String,
    #[serde(default = "default_sentence_endpoint")]
    pub sentence_endpoint: String,
    #[serde(default)]
    pub words_endpoint: Option<String>,
    #[serde(default)]
    pub words_file: Option<String>,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_success_delay_ms")]
    pub success_delay_ms: u64,
    #[serde(default)]
    pub offline: bool,
    #[serde(default)]
    pub speech: SpeechConfig,
    #[serde(default = "default_log_file")]
    pub log_file: String,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SpeechBackendKind {
    None,
    #[default]
    Keyboard,
    Command,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SpeechConfig {
    #[serde(default)]
    pub backend: SpeechBackendKind,
    /// Program that records one utterance and prints its transcript on stdout.
    #[serde(default)]
    pub command: Option<String>,
    #[serde(default)]
    pub args: Vec<String>,
    #[serde(default = "default_speech_locale")]
    pub locale: String,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            backend: SpeechBackendKind::default(),
            command: None,
            args: Vec::new(),
            locale: default_speech_locale(),
        }
    }
}

fn default_theme() -> String {
    "catppuccin-mocha".to_string()
}
fn default_locale() -> String {
    "es".to_string()
}
fn default_sentence_endpoint() -> String {
    "http://127.0.0.1:8000/api/oracion/".to_string()
}
fn default_request_timeout_secs() -> u64 {
    10
}
fn default_success_delay_ms() -> u64 {
    2000
}
fn default_speech_locale() -> String {
    "es-ES".to_string()
}
fn default_log_file() -> String {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("silabas")
        .join("silabas.log")
        .to_string_lossy()
        .to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            locale: default_locale(),
            sentence_endpoint: default_sentence_endpoint(),
            words_endpoint: None,
            words_file: None,
            request_timeout_secs: default_request_timeout_secs(),
            success_delay_ms: default_success_delay_ms(),
            offline: false,
            speech: SpeechConfig::default(),
            log_file: default_log_file(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if path.exists() {
            let content = fs::read_to_string(&path)?;
            let mut config: Config = toml::from_str(&content)?;
            config.normalize(&crate::available_locales());
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

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
            .join("silabas")
            .join("config.toml")
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    pub fn success_delay(&self) -> Duration {
        Duration::from_millis(self.success_delay_ms)
    }

    /// Reset values that would leave the game unusable back to their defaults.
    pub fn normalize(&mut self, locales: &[&str]) {
        if !locales.contains(&self.locale.as_str()) {
            self.locale = default_locale();
        }
        if self.speech.locale.trim().is_empty() {
            self.speech.locale = default_speech_locale();
        }
        if self.sentence_endpoint.trim().is_empty() {
            self.sentence_endpoint = default_sentence_endpoint();
        }
        if self
            .words_endpoint
            .as_deref()
            .is_some_and(|url| url.trim().is_empty())
        {
            self.words_endpoint = None;
        }
    }
}
