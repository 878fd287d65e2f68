use serde::{Deserialize, Serialize};

/// One time-bounded span of recognized speech.
///
/// Segments arrive ordered by `start` from the transcription engine and are
/// never re-sorted here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptSegment {
    pub start: f64,
    pub end: f64,
    pub text: String,
}

/// Full transcription result for one media file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transcription {
    pub text: String,
    pub segments: Vec<TranscriptSegment>,
    /// Language code detected from the audio, or "unknown" when detection failed.
    pub language: String,
}

impl Transcription {
    pub fn language_detected(&self) -> bool {
        self.language != "unknown" && !self.language.is_empty()
    }
}

/// A transcript segment paired with its translation, timing preserved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslatedSegment {
    pub start: f64,
    pub end: f64,
    pub original_text: String,
    pub translated_text: String,
}
