//! Fixed allow-list of supported translation pairs.
//!
//! Membership here is the sole gate for attempting translation. Each entry
//! names the pretrained Helsinki-NLP opus-mt model explicitly so the
//! supported set is visible in one place rather than assembled from strings
//! at call sites.

/// (source, target) -> pretrained model identifier
pub const SUPPORTED_PAIRS: &[(&str, &str, &str)] = &[
    ("en", "ar", "Helsinki-NLP/opus-mt-en-ar"),
    ("ar", "en", "Helsinki-NLP/opus-mt-ar-en"),
    ("en", "fr", "Helsinki-NLP/opus-mt-en-fr"),
    ("fr", "en", "Helsinki-NLP/opus-mt-fr-en"),
    ("en", "es", "Helsinki-NLP/opus-mt-en-es"),
    ("es", "en", "Helsinki-NLP/opus-mt-es-en"),
    ("he", "ar", "Helsinki-NLP/opus-mt-he-ar"),
    ("ar", "he", "Helsinki-NLP/opus-mt-ar-he"),
    ("en", "de", "Helsinki-NLP/opus-mt-en-de"),
    ("de", "en", "Helsinki-NLP/opus-mt-de-en"),
];

/// Resolve the model identifier for a language pair, if supported
pub fn model_for_pair(source: &str, target: &str) -> Option<&'static str> {
    SUPPORTED_PAIRS
        .iter()
        .find(|(s, t, _)| *s == source && *t == target)
        .map(|(_, _, model)| *model)
}

/// Check whether a (source, target) pair has a translation model
pub fn is_supported(source: &str, target: &str) -> bool {
    model_for_pair(source, target).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_lookup() {
        assert_eq!(model_for_pair("en", "ar"), Some("Helsinki-NLP/opus-mt-en-ar"));
        assert_eq!(model_for_pair("de", "en"), Some("Helsinki-NLP/opus-mt-de-en"));
        assert_eq!(model_for_pair("en", "ja"), None);
        assert_eq!(model_for_pair("ar", "fr"), None);
    }

    #[test]
    fn test_pair_symmetry() {
        // Every listed pair is present in both directions
        for (source, target, _) in SUPPORTED_PAIRS {
            assert!(
                is_supported(target, source),
                "missing reverse pair {}-{}",
                target,
                source
            );
        }
    }

    #[test]
    fn test_identity_pair_not_supported() {
        assert!(!is_supported("en", "en"));
    }
}
