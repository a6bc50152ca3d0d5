//! Text normalization shared by the extraction pipeline

use regex::Regex;
use unicode_segmentation::UnicodeSegmentation;

/// Normalizes free text into the canonical form skill matching runs on:
/// lowercase, ASCII punctuation, separators folded to single spaces.
pub struct TextNormalizer {
    whitespace: Regex,
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextNormalizer {
    pub fn new() -> Self {
        let whitespace = Regex::new(r"\s+").expect("Invalid whitespace regex");
        Self { whitespace }
    }

    /// Normalize text for matching. Hyphens and slashes fold to spaces so
    /// "bias-variance tradeoff" and "A/B testing" match their spaced and
    /// slashed spellings alike.
    pub fn normalize(&self, text: &str) -> String {
        let mapped: String = text
            .chars()
            .map(|c| match c {
                '\u{2018}' | '\u{2019}' => '\'',
                '\u{201C}' | '\u{201D}' => '"',
                '\u{2013}' | '\u{2014}' => '-',
                '\u{2026}' => '.',
                _ => c,
            })
            .collect();

        let lowered = mapped.to_lowercase();

        let folded: String = lowered
            .chars()
            .map(|c| match c {
                '-' | '/' | '_' => ' ',
                _ => c,
            })
            .collect();

        self.whitespace.replace_all(&folded, " ").trim().to_string()
    }

    /// Split text into lowercase word tokens.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        text.unicode_words().map(|w| w.to_lowercase()).collect()
    }

    /// Characters that can form part of a skill token. '+' and '#' cover
    /// names like "C++" and "C#".
    pub fn is_word_char(c: char) -> bool {
        c.is_alphanumeric() || c == '+' || c == '#'
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_case_and_separators() {
        let normalizer = TextNormalizer::new();
        assert_eq!(
            normalizer.normalize("Bias-Variance   Tradeoff"),
            "bias variance tradeoff"
        );
        assert_eq!(normalizer.normalize("A/B Testing"), "a b testing");
        assert_eq!(normalizer.normalize("  CI/CD\npipelines "), "ci cd pipelines");
    }

    #[test]
    fn test_normalize_smart_punctuation() {
        let normalizer = TextNormalizer::new();
        assert_eq!(
            normalizer.normalize("ML\u{2014}engineer\u{2019}s toolkit\u{2026}"),
            "ml engineer's toolkit."
        );
    }

    #[test]
    fn test_normalize_keeps_plus_and_hash() {
        let normalizer = TextNormalizer::new();
        assert_eq!(normalizer.normalize("C++ and C#"), "c++ and c#");
    }

    #[test]
    fn test_tokenize() {
        let normalizer = TextNormalizer::new();
        let tokens = normalizer.tokenize("PyTorch, distributed training!");
        assert_eq!(tokens, vec!["pytorch", "distributed", "training"]);
    }

    #[test]
    fn test_empty_input() {
        let normalizer = TextNormalizer::new();
        assert_eq!(normalizer.normalize(""), "");
        assert!(normalizer.tokenize("").is_empty());
    }
}
