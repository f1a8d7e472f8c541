//! Phrase segmentation
//!
//! Splits normalized document text into phrase-sized strings: first into
//! sections on paragraph breaks, then on a language-specific delimiter set,
//! then over-long parts into fixed-size word windows. Sections are the unit
//! of topical coherence; the word-window bound exists because embedding
//! quality degrades on overly long inputs.

use crate::config::{LanguageProfile, SegmentationConfig};
use crate::error::{BitextError, Result};
use crate::text::normalize::normalize;
use regex::Regex;

/// Splits text into an ordered sequence of phrases for one language
pub struct PhraseSegmenter {
    delimiters: Vec<char>,
    max_words: usize,
    window_words: usize,
    section_regex: Regex,
}

impl PhraseSegmenter {
    /// Create a segmenter from a language profile and the shared thresholds
    pub fn new(profile: &LanguageProfile, config: &SegmentationConfig) -> Result<Self> {
        let section_regex = Regex::new(r"\n{2,}")
            .map_err(|e| BitextError::Config(format!("Failed to compile section regex: {}", e)))?;

        Ok(Self {
            delimiters: profile.delimiters.chars().collect(),
            max_words: config.max_words,
            window_words: config.window_words,
            section_regex,
        })
    }

    /// Segment text into phrases, in document order.
    ///
    /// Deterministic: the same input always yields the same output.
    pub fn segment(&self, text: &str) -> Vec<String> {
        let text = normalize(text);
        let mut phrases = Vec::new();

        for section in self.section_regex.split(&text) {
            let section = section.trim();
            if section.is_empty() {
                continue;
            }

            for part in section.split(|c: char| c == '\n' || self.delimiters.contains(&c)) {
                let part = part.trim();
                if part.is_empty() {
                    continue;
                }

                let words: Vec<&str> = part.split_whitespace().collect();
                if words.len() > self.max_words {
                    for window in words.chunks(self.window_words) {
                        phrases.push(window.join(" "));
                    }
                } else {
                    phrases.push(part.to_string());
                }
            }
        }

        phrases
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arabic_segmenter() -> PhraseSegmenter {
        let config = SegmentationConfig::default();
        let profile = config.languages.get("ar").unwrap().clone();
        PhraseSegmenter::new(&profile, &config).unwrap()
    }

    fn french_segmenter() -> PhraseSegmenter {
        let config = SegmentationConfig::default();
        let profile = config.languages.get("fr").unwrap().clone();
        PhraseSegmenter::new(&profile, &config).unwrap()
    }

    #[test]
    fn test_empty_text() {
        assert!(arabic_segmenter().segment("").is_empty());
        assert!(arabic_segmenter().segment("   \n\n  ").is_empty());
    }

    #[test]
    fn test_splits_on_french_delimiters() {
        let phrases = french_segmenter().segment("Première phrase. Deuxième phrase! Troisième?");
        assert_eq!(
            phrases,
            vec!["Première phrase", "Deuxième phrase", "Troisième"]
        );
    }

    #[test]
    fn test_splits_on_arabic_delimiters() {
        let phrases = arabic_segmenter().segment("الحمد لله وحده، تزوّج الشاب؛ والده صالح");
        assert_eq!(phrases, vec!["الحمد لله وحده", "تزوّج الشاب", "والده صالح"]);
    }

    #[test]
    fn test_sections_then_delimiters() {
        let text = "Header line\n\nBody part one. Body part two.";
        let phrases = french_segmenter().segment(text);
        assert_eq!(phrases, vec!["Header line", "Body part one", "Body part two"]);
    }

    #[test]
    fn test_newline_is_always_a_delimiter() {
        let phrases = french_segmenter().segment("line one\nline two");
        assert_eq!(phrases, vec!["line one", "line two"]);
    }

    #[test]
    fn test_windowing_65_words() {
        let text = (1..=65)
            .map(|i| format!("w{}", i))
            .collect::<Vec<_>>()
            .join(" ");
        let phrases = french_segmenter().segment(&text);

        assert_eq!(phrases.len(), 3);
        assert_eq!(phrases[0].split_whitespace().count(), 30);
        assert_eq!(phrases[1].split_whitespace().count(), 30);
        assert_eq!(phrases[2].split_whitespace().count(), 5);

        // Word order is preserved across window boundaries
        assert!(phrases[0].starts_with("w1 "));
        assert!(phrases[1].starts_with("w31 "));
        assert_eq!(phrases[2], "w61 w62 w63 w64 w65");
    }

    #[test]
    fn test_exactly_sixty_words_stays_whole() {
        let text = (1..=60)
            .map(|i| format!("w{}", i))
            .collect::<Vec<_>>()
            .join(" ");
        let phrases = french_segmenter().segment(&text);
        assert_eq!(phrases.len(), 1);
        assert_eq!(phrases[0].split_whitespace().count(), 60);
    }

    #[test]
    fn test_duplicates_are_kept() {
        let phrases = french_segmenter().segment("Oui. Oui. Oui.");
        assert_eq!(phrases, vec!["Oui", "Oui", "Oui"]);
    }

    #[test]
    fn test_deterministic() {
        let text = "Un. Deux! Trois?\n\nQuatre; cinq: six.";
        let a = french_segmenter().segment(text);
        let b = french_segmenter().segment(text);
        assert_eq!(a, b);
    }
}
