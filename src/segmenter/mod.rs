// WHY: every stage re-derives its sentence list from the current text, so
// segmentation sits behind a trait the transformers receive explicitly

use regex_automata::{meta::Regex, Input};
use thiserror::Error;
use tracing::debug;

pub mod lexicon;
pub mod normalization;

pub use lexicon::{extract_connectors, sentence_lengths, tokenize, word_count};
pub use normalization::{is_blank, normalize_whitespace, normalize_whitespace_into};

/// Boundary after sentence-final punctuation, or after a Korean sentence-final
/// ending when the next sentence opens with a capital, a Hangul syllable or a quote
const BOUNDARY_PATTERN: &str = r#"[.?!]\s+|[다요죠네까]\s+[A-Z가-힣"]"#;

/// Punctuation-only boundary used as the long-text fallback
const PUNCTUATION_PATTERN: &str = r"[.?!]\s+";

/// Texts longer than this (in characters) retry with punctuation-only splitting
/// when the primary pattern finds no boundary
const FALLBACK_MIN_CHARS: usize = 100;

#[derive(Debug, Error)]
pub enum SegmenterError {
    #[error("failed to compile sentence boundary pattern: {0}")]
    Pattern(#[from] Box<regex_automata::meta::BuildError>),
}

/// Splits a text into its ordered sentence list
pub trait Segmenter: Send + Sync {
    /// Whitespace-normalized sentences in reading order. Never empty for a
    /// text with at least one non-whitespace character.
    fn segment(&self, text: &str) -> Vec<String>;
}

/// Punctuation and ending-morpheme heuristics for Korean (and mixed Latin) prose
pub struct KoreanSegmenter {
    boundary: Regex,
    punctuation: Regex,
}

impl KoreanSegmenter {
    pub fn new() -> Result<Self, SegmenterError> {
        let boundary = Regex::new(BOUNDARY_PATTERN).map_err(Box::new)?;
        let punctuation = Regex::new(PUNCTUATION_PATTERN).map_err(Box::new)?;
        Ok(Self { boundary, punctuation })
    }

    /// Cut `text` at every match of `pattern`. The terminal character of a
    /// match stays with the sentence it closes, the separating whitespace is
    /// dropped, and anything after the whitespace opens the next piece.
    fn split_at_boundaries<'t>(pattern: &Regex, text: &'t str) -> Vec<&'t str> {
        let mut pieces = Vec::new();
        let mut start = 0;

        while start < text.len() {
            let Some(found) = pattern.find(Input::new(text).range(start..)) else {
                break;
            };
            let Some(terminal) = text[found.start()..].chars().next() else {
                break;
            };
            let end = found.start() + terminal.len_utf8();
            let rest = &text[end..];
            let resume = end + (rest.len() - rest.trim_start().len());

            pieces.push(&text[start..end]);
            start = resume;
        }

        if start < text.len() {
            pieces.push(&text[start..]);
        }
        pieces
    }
}

impl Segmenter for KoreanSegmenter {
    fn segment(&self, text: &str) -> Vec<String> {
        if is_blank(text) {
            return Vec::new();
        }

        let normalized = normalize_whitespace(text);

        let mut sentences: Vec<String> = Self::split_at_boundaries(&self.boundary, &normalized)
            .into_iter()
            .map(str::trim)
            .filter(|s| s.chars().count() > 1)
            .map(str::to_string)
            .collect();

        if sentences.len() <= 1 && normalized.chars().count() > FALLBACK_MIN_CHARS {
            debug!("Primary boundary pattern found no split, retrying with punctuation only");
            sentences = Self::split_at_boundaries(&self.punctuation, &normalized)
                .into_iter()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect();
        }

        if sentences.is_empty() {
            sentences.push(normalized);
        }

        debug!("Segmented {} characters into {} sentences", text.len(), sentences.len());
        sentences
    }
}
