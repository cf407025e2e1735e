use log::warn;

/// Written when no language could be determined
pub const UNKNOWN_LANGUAGE: &str = "Unknown";

/// Best-effort natural language identification
pub trait LanguageDetector {
    /// English name of the language of `text` ("German", "English", ...)
    fn detect(&self, text: &str) -> Option<String>;
}

/// Trigram-based detection backed by `whatlang`
#[derive(Debug, Default, Clone, Copy)]
pub struct WhatlangDetector;

impl LanguageDetector for WhatlangDetector {
    fn detect(&self, text: &str) -> Option<String> {
        whatlang::detect(text).map(|info| info.lang().eng_name().to_string())
    }
}

/// Language name of `title`, or [`UNKNOWN_LANGUAGE`]
pub fn detect_language(detector: &dyn LanguageDetector, title: &str) -> String {
    match detector.detect(title) {
        Some(language) => language,
        None => {
            warn!("Language detection failed for '{}'", title);
            UNKNOWN_LANGUAGE.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_long_titles() {
        let detector = WhatlangDetector;
        assert_eq!(
            detector.detect("Eine empirische Untersuchung der Lehrerbildung an niedersächsischen Schulen und Hochschulen").as_deref(),
            Some("German")
        );
        assert_eq!(
            detector.detect("An empirical study of nursing education in the hospitals and universities of the region").as_deref(),
            Some("English")
        );
    }

    #[test]
    fn test_empty_title_is_unknown() {
        assert_eq!(detect_language(&WhatlangDetector, ""), UNKNOWN_LANGUAGE);
        assert_eq!(detect_language(&WhatlangDetector, "1234 5678"), UNKNOWN_LANGUAGE);
    }
}
