use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{info, warn};
use walkdir::WalkDir;

use crate::config::Config;
use crate::error::{Result, TarjamaError};
use crate::media::{MediaProcessorFactory, MediaProcessorTrait};
use crate::subtitle::{generate_srt, parse_srt};
use crate::transcribe::{transcribe_video, ModelSize, TranscriberFactory, TranscriberTrait};
use crate::translate::{language_pairs, TranslationEngine, TranslationEngineFactory};
use crate::transcript::{TranscriptSegment, TranslatedSegment};

/// Observer invoked after each translated segment. Observability only; the
/// pipeline's output does not depend on it.
pub trait ProgressObserver: Send + Sync {
    fn on_segment(&self, done: usize, total: usize);
}

/// Observer that ignores all progress reports
pub struct NoopObserver;

impl ProgressObserver for NoopObserver {
    fn on_segment(&self, _done: usize, _total: usize) {}
}

/// Result of one subtitle request
#[derive(Debug)]
pub enum Outcome {
    /// Subtitle file written to the given path
    Completed { subtitle_path: PathBuf },
    /// Language gate rejected the request; no artifact produced
    Skipped {
        detected_language: String,
        target_language: String,
    },
}

/// Translate transcript segments in original order.
///
/// Gate: when the detected language is unknown or the pair has no model,
/// returns an empty list without a single engine call. Past the gate the
/// output is 1:1 with the input: empty-text segments become empty pairs with
/// timing preserved, and a segment whose translation fails keeps its original
/// text with a failure marker appended. One segment's failure never aborts
/// the loop.
pub async fn translate_segments(
    segments: &[TranscriptSegment],
    detected_language: &str,
    target_language: &str,
    engine: &dyn TranslationEngine,
    observer: &dyn ProgressObserver,
) -> Vec<TranslatedSegment> {
    if detected_language == "unknown"
        || !language_pairs::is_supported(detected_language, target_language)
    {
        warn!(
            "No translation model for {} -> {}; skipping translation",
            detected_language, target_language
        );
        return Vec::new();
    }

    info!(
        "Translating {} segments from {} to {}",
        segments.len(),
        detected_language,
        target_language
    );

    let total = segments.len();
    let mut translated = Vec::with_capacity(total);

    for (idx, segment) in segments.iter().enumerate() {
        let original_text = segment.text.trim();

        if original_text.is_empty() {
            translated.push(TranslatedSegment {
                start: segment.start,
                end: segment.end,
                original_text: String::new(),
                translated_text: String::new(),
            });
        } else {
            let translated_text = match engine
                .translate(original_text, detected_language, target_language)
                .await
            {
                Ok(text) => text,
                Err(e) => {
                    warn!("Segment {}/{} translation failed: {}", idx + 1, total, e);
                    format!("{} (translation failed)", original_text)
                }
            };

            translated.push(TranslatedSegment {
                start: segment.start,
                end: segment.end,
                original_text: original_text.to_string(),
                translated_text,
            });
        }

        observer.on_segment(idx + 1, total);
    }

    translated
}

pub struct Workflow {
    config: Config,
    media: Box<dyn MediaProcessorTrait>,
    transcriber: Box<dyn TranscriberTrait>,
    engine: Box<dyn TranslationEngine>,
}

impl Workflow {
    pub fn new(config: Config) -> Result<Self> {
        let media = MediaProcessorFactory::create_processor(config.media.clone());
        let transcriber = TranscriberFactory::create_default(config.transcriber.clone());
        let engine = TranslationEngineFactory::create_engine(config.translate.clone())?;

        // Check dependencies
        media.check_availability()?;

        Ok(Self::with_components(config, media, transcriber, engine))
    }

    /// Assemble a workflow from explicit components. Used by `new` and by
    /// tests that substitute doubles for the external tools.
    pub fn with_components(
        config: Config,
        media: Box<dyn MediaProcessorTrait>,
        transcriber: Box<dyn TranscriberTrait>,
        engine: Box<dyn TranslationEngine>,
    ) -> Self {
        Self {
            config,
            media,
            transcriber,
            engine,
        }
    }

    /// Version string of the media tool backing this workflow.
    pub async fn media_version(&self) -> Result<String> {
        self.media.get_version_info().await
    }

    /// Process one video file into a translated subtitle file.
    ///
    /// The request owns a scoped temporary directory for the draft subtitle;
    /// the intermediate audio lives in its own scoped directory inside the
    /// transcription step. Both are removed on every exit path. The final
    /// subtitle is persisted by copy out of the draft location, so a failed
    /// write never leaves a partial file at the destination.
    pub async fn process_video<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input_path: P,
        target_language: &str,
        model: ModelSize,
        output_dir: Option<Q>,
        observer: &dyn ProgressObserver,
    ) -> Result<Outcome> {
        let input_path = input_path.as_ref();
        info!("Processing video file: {}", input_path.display());

        if !input_path.exists() {
            return Err(TarjamaError::MissingInput(input_path.display().to_string()));
        }

        let output_dir = match output_dir {
            Some(dir) => dir.as_ref().to_path_buf(),
            None => input_path
                .parent()
                .ok_or_else(|| TarjamaError::Config("Cannot determine output directory".to_string()))?
                .to_path_buf(),
        };
        fs::create_dir_all(&output_dir).await?;

        let video_stem = input_path
            .file_stem()
            .ok_or_else(|| TarjamaError::Config("Invalid video filename".to_string()))?
            .to_string_lossy()
            .to_string();

        // Step 1 + 2: extract audio and transcribe (audio is scoped inside)
        let transcription =
            transcribe_video(self.media.as_ref(), self.transcriber.as_ref(), input_path, model)
                .await?;

        info!(
            "Detected language: {}",
            transcription.language.to_uppercase()
        );

        // Step 3: translate segment by segment behind the language gate
        let translated = translate_segments(
            &transcription.segments,
            &transcription.language,
            target_language,
            self.engine.as_ref(),
            observer,
        )
        .await;

        if translated.is_empty() {
            warn!("No translated segments; no subtitle file will be generated");
            return Ok(Outcome::Skipped {
                detected_language: transcription.language,
                target_language: target_language.to_string(),
            });
        }

        // Step 4: serialize to a draft inside the request scratch dir, then
        // persist to the destination
        let scratch = tempfile::tempdir()
            .map_err(|e| TarjamaError::Serialization(format!("Failed to create temp directory: {}", e)))?;
        let draft_path = scratch.path().join("draft.srt");
        generate_srt(&translated, &draft_path).await?;

        let subtitle_path = output_dir.join(format!("{}_{}.srt", video_stem, target_language));
        fs::copy(&draft_path, &subtitle_path).await.map_err(|e| {
            TarjamaError::Serialization(format!(
                "Failed to persist {}: {}",
                subtitle_path.display(),
                e
            ))
        })?;

        info!("Subtitle file written: {}", subtitle_path.display());
        Ok(Outcome::Completed { subtitle_path })
    }

    /// Process all video files in a directory. One file's failure is logged
    /// and the batch continues.
    pub async fn process_directory<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input_dir: P,
        target_language: &str,
        model: ModelSize,
        output_dir: Option<Q>,
    ) -> Result<()> {
        let input_dir = input_dir.as_ref();
        info!("Processing directory: {}", input_dir.display());

        if !input_dir.is_dir() {
            return Err(TarjamaError::Config("Input path is not a directory".to_string()));
        }

        let output_dir = match output_dir {
            Some(dir) => dir.as_ref().to_path_buf(),
            None => input_dir.to_path_buf(),
        };
        fs::create_dir_all(&output_dir).await?;

        let video_extensions = ["mp4", "avi", "mov", "mkv", "wmv", "flv", "webm"];
        let mut video_files = Vec::new();

        for entry in WalkDir::new(input_dir).into_iter().filter_map(|e| e.ok()) {
            if let Some(extension) = entry.path().extension() {
                if let Some(ext_str) = extension.to_str() {
                    if video_extensions.contains(&ext_str.to_lowercase().as_str()) {
                        video_files.push(entry.path().to_path_buf());
                    }
                }
            }
        }

        info!("Found {} video files to process", video_files.len());

        for video_path in video_files {
            match self
                .process_video(&video_path, target_language, model, Some(&output_dir), &NoopObserver)
                .await
            {
                Ok(Outcome::Completed { subtitle_path }) => {
                    info!(
                        "Successfully processed {} -> {}",
                        video_path.display(),
                        subtitle_path.display()
                    )
                }
                Ok(Outcome::Skipped { detected_language, .. }) => warn!(
                    "Skipped {} (detected language: {})",
                    video_path.display(),
                    detected_language
                ),
                Err(e) => warn!("Failed to process {}: {}", video_path.display(), e),
            }
        }

        Ok(())
    }

    /// Extract a video's audio track to a caller-chosen path
    pub async fn extract_audio<P: AsRef<Path>>(&self, video_path: P, audio_path: P) -> Result<()> {
        self.media
            .extract_audio(video_path.as_ref(), audio_path.as_ref())
            .await
    }

    /// Transcribe a video to an untranslated SRT file
    pub async fn transcribe_to_srt<P: AsRef<Path>>(
        &self,
        video_path: P,
        model: ModelSize,
        output_path: P,
    ) -> Result<()> {
        let transcription =
            transcribe_video(self.media.as_ref(), self.transcriber.as_ref(), video_path.as_ref(), model)
                .await?;

        let segments: Vec<TranslatedSegment> = transcription
            .segments
            .iter()
            .map(|seg| TranslatedSegment {
                start: seg.start,
                end: seg.end,
                original_text: seg.text.trim().to_string(),
                translated_text: seg.text.trim().to_string(),
            })
            .collect();

        generate_srt(&segments, output_path.as_ref()).await
    }

    /// Translate an existing SRT file to another language
    pub async fn translate_srt<P: AsRef<Path>>(
        &self,
        input_path: P,
        output_path: P,
        source_language: &str,
        target_language: &str,
        observer: &dyn ProgressObserver,
    ) -> Result<Outcome> {
        let input_path = input_path.as_ref();
        if !input_path.exists() {
            return Err(TarjamaError::MissingInput(input_path.display().to_string()));
        }

        let blocks = parse_srt(input_path).await?;
        let segments: Vec<TranscriptSegment> = blocks
            .into_iter()
            .map(|block| TranscriptSegment {
                start: block.start,
                end: block.end,
                text: block.text,
            })
            .collect();

        let translated = translate_segments(
            &segments,
            source_language,
            target_language,
            self.engine.as_ref(),
            observer,
        )
        .await;

        if translated.is_empty() {
            return Ok(Outcome::Skipped {
                detected_language: source_language.to_string(),
                target_language: target_language.to_string(),
            });
        }

        generate_srt(&translated, output_path.as_ref()).await?;
        Ok(Outcome::Completed {
            subtitle_path: output_path.as_ref().to_path_buf(),
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}
