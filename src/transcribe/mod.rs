// Modular transcription architecture
//
// This module wraps the speech-to-text engine behind a trait so the workflow
// never depends on a concrete model runner:
// - Whisper: OpenAI Whisper CLI implementation (JSON output)
//
// To add a new transcription service, implement TranscriberTrait, add the
// service to TranscriberImplementation, and extend the factory.

pub mod whisper;

use async_trait::async_trait;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::config::TranscriberConfig;
use crate::error::{Result, TarjamaError};
use crate::media::MediaProcessorTrait;
use crate::transcript::Transcription;

/// Quality/resource tier of the speech-to-text model. Larger models trade
/// latency and memory for accuracy; selection is pass-through configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelSize {
    Tiny,
    Base,
    Small,
    Medium,
    Large,
}

impl ModelSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelSize::Tiny => "tiny",
            ModelSize::Base => "base",
            ModelSize::Small => "small",
            ModelSize::Medium => "medium",
            ModelSize::Large => "large",
        }
    }
}

impl fmt::Display for ModelSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModelSize {
    type Err = TarjamaError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "tiny" => Ok(ModelSize::Tiny),
            "base" => Ok(ModelSize::Base),
            "small" => Ok(ModelSize::Small),
            "medium" => Ok(ModelSize::Medium),
            "large" => Ok(ModelSize::Large),
            _ => Err(TarjamaError::Config(format!(
                "Invalid model size '{}'. Valid sizes: tiny, base, small, medium, large",
                s
            ))),
        }
    }
}

/// Main trait for transcription operations
#[async_trait]
pub trait TranscriberTrait: Send + Sync {
    /// Transcribe an audio file to text with language detection
    async fn transcribe(&self, audio_path: &Path, model: ModelSize) -> Result<Transcription>;
}

/// Transcriber implementation type
#[derive(Debug, Clone)]
pub enum TranscriberImplementation {
    Whisper,
    // Future implementations can be added here:
    // WhisperCpp,
    // Azure,
}

/// Factory for creating transcriber instances
pub struct TranscriberFactory;

impl TranscriberFactory {
    /// Create a transcriber based on implementation type
    pub fn create_transcriber(
        implementation: TranscriberImplementation,
        config: TranscriberConfig,
    ) -> Box<dyn TranscriberTrait> {
        match implementation {
            TranscriberImplementation::Whisper => {
                Box::new(whisper::WhisperTranscriber::new(config))
            }
        }
    }

    /// Create with the default implementation
    pub fn create_default(config: TranscriberConfig) -> Box<dyn TranscriberTrait> {
        Self::create_transcriber(TranscriberImplementation::Whisper, config)
    }
}

/// Transcribe a video file end to end: extract the audio track into a scoped
/// temporary directory, run the transcriber on it, and delete the audio on
/// every exit path (the temp dir guard drops on success and on error alike).
pub async fn transcribe_video(
    media: &dyn MediaProcessorTrait,
    transcriber: &dyn TranscriberTrait,
    video_path: &Path,
    model: ModelSize,
) -> Result<Transcription> {
    if !video_path.exists() {
        return Err(TarjamaError::MissingInput(video_path.display().to_string()));
    }

    let scratch = tempfile::tempdir()
        .map_err(|e| TarjamaError::Transcription(format!("Failed to create temp directory: {}", e)))?;
    let audio_path = scratch.path().join("audio.mp3");

    media.extract_audio(video_path, &audio_path).await?;
    let transcription = transcriber.transcribe(&audio_path, model).await?;

    Ok(transcription)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_size_round_trip() {
        for name in ["tiny", "base", "small", "medium", "large"] {
            let size: ModelSize = name.parse().unwrap();
            assert_eq!(size.as_str(), name);
        }
        assert!("huge".parse::<ModelSize>().is_err());
    }

    #[test]
    fn test_model_size_case_insensitive() {
        assert_eq!("Medium".parse::<ModelSize>().unwrap(), ModelSize::Medium);
    }
}
