use async_trait::async_trait;
use std::path::Path;
use std::process::Command;
use tracing::{debug, info};

use super::{MediaCommandBuilder, MediaProcessorTrait};
use crate::config::MediaConfig;
use crate::error::{Result, TarjamaError};

/// Concrete implementation of the media processor (FFmpeg-based)
pub struct MediaProcessorImpl {
    config: MediaConfig,
    command_builder: MediaCommandBuilder,
}

impl MediaProcessorImpl {
    /// Create a new media processor implementation
    pub fn new(config: MediaConfig) -> Self {
        let command_builder = MediaCommandBuilder::new(&config.binary_path);

        Self {
            config,
            command_builder,
        }
    }
}

#[async_trait]
impl MediaProcessorTrait for MediaProcessorImpl {
    /// Extract audio from video
    async fn extract_audio(&self, video_path: &Path, audio_path: &Path) -> Result<()> {
        if !video_path.exists() {
            return Err(TarjamaError::MissingInput(video_path.display().to_string()));
        }

        info!(
            "Extracting audio from {} to {}",
            video_path.display(),
            audio_path.display()
        );

        let command = self.command_builder.extract_audio(
            video_path,
            audio_path,
            self.config.bitrate_kbps,
            self.config.sample_rate,
        );
        command.execute().await?;

        info!("Audio extraction completed");
        Ok(())
    }

    /// Check if the media tool is available
    fn check_availability(&self) -> Result<()> {
        let output = Command::new(&self.config.binary_path)
            .arg("-version")
            .output()
            .map_err(|e| TarjamaError::Extraction(format!("Media tool not found: {}", e)))?;

        if output.status.success() {
            info!("Media tool is available");
            Ok(())
        } else {
            Err(TarjamaError::Extraction(
                "Media tool version check failed".to_string(),
            ))
        }
    }

    /// Get media tool version information
    async fn get_version_info(&self) -> Result<String> {
        debug!("Getting media tool version information");

        let output = self.command_builder.version_check();
        let result = Command::new(&output.binary_path)
            .args(&output.args)
            .output()
            .map_err(|e| TarjamaError::Extraction(format!("Failed to execute media tool: {}", e)))?;

        if result.status.success() {
            let version_info = String::from_utf8_lossy(&result.stdout);
            let first_line = version_info.lines().next().unwrap_or("Unknown version");
            Ok(first_line.to_string())
        } else {
            let stderr = String::from_utf8_lossy(&result.stderr);
            Err(TarjamaError::Extraction(format!(
                "Media tool version check failed: {}",
                stderr
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MediaConfig;

    #[tokio::test]
    async fn test_extract_audio_missing_input() {
        let processor = MediaProcessorImpl::new(MediaConfig::default());
        let result = processor
            .extract_audio(
                Path::new("/no/such/video.mp4"),
                Path::new("/tmp/ignored.mp3"),
            )
            .await;
        assert!(matches!(result, Err(TarjamaError::MissingInput(_))));
    }
}
