use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Result, TarjamaError};
use crate::transcribe::ModelSize;

fn default_timeout_secs() -> u64 {
    300
}

fn default_max_retries() -> u32 {
    3
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    pub transcriber: TranscriberConfig,
    pub translate: TranslateConfig,
    pub media: MediaConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriberConfig {
    /// Path to the whisper binary
    pub binary_path: String,
    /// Default model size when not given on the command line
    pub model: ModelSize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslateConfig {
    /// MarianMT inference server endpoint URL
    pub endpoint: String,
    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Maximum attempts for a failed translation request
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaConfig {
    /// Path to ffmpeg binary
    pub binary_path: String,
    /// Audio bitrate for the extracted track, in kbps
    pub bitrate_kbps: u32,
    /// Audio sample rate in Hz
    pub sample_rate: u32,
}

impl Default for TranscriberConfig {
    fn default() -> Self {
        Self {
            binary_path: "whisper".to_string(),
            model: ModelSize::Base,
        }
    }
}

impl Default for TranslateConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:8760".to_string(),
            timeout_secs: default_timeout_secs(),
            max_retries: default_max_retries(),
        }
    }
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            binary_path: "ffmpeg".to_string(),
            bitrate_kbps: 192,
            sample_rate: 44100,
        }
    }
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| TarjamaError::Config(format!("Failed to read config file: {}", e)))?;

        toml::from_str(&content)
            .map_err(|e| TarjamaError::Config(format!("Failed to parse config file: {}", e)))
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| TarjamaError::Config(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)
            .map_err(|e| TarjamaError::Config(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_media_profile() {
        let config = Config::default();
        assert_eq!(config.media.bitrate_kbps, 192);
        assert_eq!(config.media.sample_rate, 44100);
        assert_eq!(config.transcriber.model, ModelSize::Base);
    }

    #[test]
    fn test_config_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.transcriber.model = ModelSize::Medium;
        config.translate.max_retries = 5;
        config.save_to_file(&path).unwrap();

        let loaded = Config::from_file(&path).unwrap();
        assert_eq!(loaded.transcriber.model, ModelSize::Medium);
        assert_eq!(loaded.translate.max_retries, 5);
        assert_eq!(loaded.media.binary_path, "ffmpeg");
    }

    #[test]
    fn test_partial_translate_section_uses_defaults() {
        let toml_str = r#"
            [transcriber]
            binary_path = "whisper"
            model = "small"

            [translate]
            endpoint = "http://localhost:9999"

            [media]
            binary_path = "ffmpeg"
            bitrate_kbps = 192
            sample_rate = 44100
        "#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.translate.timeout_secs, 300);
        assert_eq!(config.translate.max_retries, 3);
        assert_eq!(config.transcriber.model, ModelSize::Small);
    }
}
