use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::process::Command;
use tracing::{debug, info};

use super::{ModelSize, TranscriberTrait};
use crate::config::TranscriberConfig;
use crate::error::{Result, TarjamaError};
use crate::transcript::{TranscriptSegment, Transcription};

/// Whisper CLI JSON output format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WhisperOutput {
    pub text: String,
    pub segments: Vec<WhisperSegment>,
    pub language: Option<String>,
}

/// Whisper CLI segment format. Token-level fields the CLI emits are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WhisperSegment {
    pub start: f64,
    pub end: f64,
    pub text: String,
}

impl From<WhisperOutput> for Transcription {
    fn from(output: WhisperOutput) -> Self {
        let segments = output
            .segments
            .into_iter()
            .map(|seg| TranscriptSegment {
                start: seg.start,
                end: seg.end,
                text: seg.text,
            })
            .collect();

        Transcription {
            text: output.text.trim().to_string(),
            segments,
            language: output.language.unwrap_or_else(|| "unknown".to_string()),
        }
    }
}

/// Transcriber backed by the Whisper CLI (JSON output mode)
pub struct WhisperTranscriber {
    config: TranscriberConfig,
}

impl WhisperTranscriber {
    pub fn new(config: TranscriberConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl TranscriberTrait for WhisperTranscriber {
    async fn transcribe(&self, audio_path: &Path, model: ModelSize) -> Result<Transcription> {
        info!(
            "Transcribing {} with whisper model '{}'",
            audio_path.display(),
            model
        );

        let output_dir = tempfile::tempdir()
            .map_err(|e| TarjamaError::Transcription(format!("Failed to create temp directory: {}", e)))?;

        let mut cmd = Command::new(&self.config.binary_path);
        cmd.arg(audio_path)
            .arg("--model").arg(model.as_str())
            .arg("--output_dir").arg(output_dir.path())
            .arg("--output_format").arg("json")
            .arg("--verbose").arg("False");

        debug!("Executing whisper command: {:?}", cmd);

        let output = cmd.output()
            .map_err(|e| TarjamaError::Transcription(format!("Failed to execute whisper: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(TarjamaError::Transcription(format!(
                "Whisper failed: {}",
                stderr
            )));
        }

        let audio_stem = audio_path
            .file_stem()
            .ok_or_else(|| TarjamaError::Transcription("Invalid audio filename".to_string()))?;
        let json_file = output_dir
            .path()
            .join(format!("{}.json", audio_stem.to_string_lossy()));

        let json_content = std::fs::read_to_string(&json_file)
            .map_err(|e| TarjamaError::Transcription(format!("Failed to read whisper output: {}", e)))?;

        let whisper_output: WhisperOutput = serde_json::from_str(&json_content)
            .map_err(|e| TarjamaError::Transcription(format!("Failed to parse whisper JSON: {}", e)))?;

        let transcription: Transcription = whisper_output.into();
        info!(
            "Transcription completed: {} segments, detected language '{}'",
            transcription.segments.len(),
            transcription.language
        );

        Ok(transcription)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whisper_output_mapping() {
        let json = r#"{
            "text": " Hello world. ",
            "segments": [
                {"start": 0.0, "end": 2.5, "text": " Hello"},
                {"start": 2.5, "end": 5.0, "text": " world."}
            ],
            "language": "en"
        }"#;

        let output: WhisperOutput = serde_json::from_str(json).unwrap();
        let transcription: Transcription = output.into();

        assert_eq!(transcription.text, "Hello world.");
        assert_eq!(transcription.segments.len(), 2);
        assert_eq!(transcription.segments[0].start, 0.0);
        assert_eq!(transcription.segments[1].end, 5.0);
        assert_eq!(transcription.language, "en");
        assert!(transcription.language_detected());
    }

    #[test]
    fn test_whisper_output_missing_language() {
        let json = r#"{"text": "", "segments": [], "language": null}"#;
        let output: WhisperOutput = serde_json::from_str(json).unwrap();
        let transcription: Transcription = output.into();

        assert_eq!(transcription.language, "unknown");
        assert!(!transcription.language_detected());
    }
}
