//! Length and language gate for normalized text.

use lingua::{Language, LanguageDetector, LanguageDetectorBuilder};

/// Minimum normalized length, in characters, for a record to be kept.
pub const MIN_TEXT_CHARS: usize = 10;

/// Candidate languages the detector chooses between. Anything that is not
/// confidently English, including text the detector cannot place, is rejected.
const CANDIDATES: [Language; 12] = [
    Language::English,
    Language::French,
    Language::German,
    Language::Spanish,
    Language::Italian,
    Language::Portuguese,
    Language::Dutch,
    Language::Swedish,
    Language::Polish,
    Language::Turkish,
    Language::Indonesian,
    Language::Russian,
];

/// Why [`LanguageFilter::check`] rejected a text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    Empty,
    TooShort,
    NotEnglish,
}

/// Deterministic English classifier plus the minimum-length rule.
///
/// The detector is statistical but has no random state, so identical input
/// always yields the identical verdict. Build once per run; construction
/// loads language models.
pub struct LanguageFilter {
    detector: LanguageDetector,
}

impl LanguageFilter {
    #[must_use]
    pub fn new() -> Self {
        let detector = LanguageDetectorBuilder::from_languages(&CANDIDATES).build();
        Self { detector }
    }

    /// `true` if `text` is classified as English. Unclassifiable text is not English.
    #[must_use]
    pub fn is_english(&self, text: &str) -> bool {
        if text.trim().is_empty() {
            return false;
        }
        matches!(
            self.detector.detect_language_of(text),
            Some(Language::English)
        )
    }

    /// Accept or reject already-normalized text.
    ///
    /// # Errors
    ///
    /// Returns the [`Rejection`] reason when the text is empty, shorter than
    /// [`MIN_TEXT_CHARS`], or not classified as English.
    pub fn check(&self, text: &str) -> Result<(), Rejection> {
        if text.is_empty() {
            return Err(Rejection::Empty);
        }
        if text.chars().count() < MIN_TEXT_CHARS {
            return Err(Rejection::TooShort);
        }
        if !self.is_english(text) {
            return Err(Rejection::NotEnglish);
        }
        Ok(())
    }

    #[must_use]
    pub fn accept(&self, text: &str) -> bool {
        self.check(text).is_ok()
    }
}

impl Default for LanguageFilter {
    fn default() -> Self {
        Self::new()
    }
}
