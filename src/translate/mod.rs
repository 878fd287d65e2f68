// Modular translation architecture
//
// This module wraps the machine-translation engine behind a trait:
// - Marian: MarianMT (Helsinki-NLP opus-mt) models served over a local
//   inference HTTP endpoint
//
// Translation is stateless per call; no cross-segment context is carried.

pub mod language_pairs;
pub mod marian;

use async_trait::async_trait;

pub use language_pairs::{is_supported, model_for_pair};

use crate::config::TranslateConfig;
use crate::error::Result;

/// Main trait for translation operations
#[async_trait]
pub trait TranslationEngine: Send + Sync {
    /// Translate a single text span from source to target language.
    ///
    /// Returns `UnsupportedPair` without invoking any model when the pair is
    /// not in the allow-list.
    async fn translate(&self, text: &str, source_lang: &str, target_lang: &str)
        -> Result<String>;
}

/// Factory for creating translation engine instances
pub struct TranslationEngineFactory;

impl TranslationEngineFactory {
    /// Create the default engine implementation (Marian HTTP-based)
    pub fn create_engine(config: TranslateConfig) -> Result<Box<dyn TranslationEngine>> {
        Ok(Box::new(marian::MarianEngine::new(config)?))
    }
}
