// WHY: the three stages share one contract (text and intensity in, text out)
// and the same sentence-splicing helpers, so both live here

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

pub mod noise;
pub mod structural;
pub mod vocabulary;

pub use noise::NoiseInjector;
pub use structural::{decide_action, Action, StructuralTransformer};
pub use vocabulary::{SynonymTier, VocabularyTransformer};

/// One transformation pass. Stages always run in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Structural,
    Vocabulary,
    Noise,
}

impl Stage {
    pub const ORDER: [Stage; 3] = [Stage::Structural, Stage::Vocabulary, Stage::Noise];

    pub fn name(self) -> &'static str {
        match self {
            Stage::Structural => "structural",
            Stage::Vocabulary => "vocabulary",
            Stage::Noise => "noise",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Lower-case the first character when it is a letter. Digits, punctuation
/// and scripts without case come back unchanged.
pub fn lowercase_first(sentence: &str) -> String {
    let mut chars = sentence.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() => first.to_lowercase().chain(chars).collect(),
        _ => sentence.to_string(),
    }
}

/// `"{marker}, {sentence}"` with the sentence's first letter lowered to fit mid-clause
pub fn prepend_marker(sentence: &str, marker: &str) -> String {
    if sentence.is_empty() {
        return String::new();
    }
    format!("{marker}, {}", lowercase_first(sentence))
}

pub fn join_sentences<S: AsRef<str>>(sentences: &[S]) -> String {
    sentences.iter().map(AsRef::as_ref).collect::<Vec<_>>().join(" ")
}

/// Up to `wanted` distinct indices from `range`, in random order
pub(crate) fn sample_positions<R: Rng + ?Sized>(
    rng: &mut R,
    range: std::ops::Range<usize>,
    wanted: usize,
) -> Vec<usize> {
    let available = range.len();
    let amount = wanted.min(available);
    rand::seq::index::sample(rng, available, amount)
        .into_iter()
        .map(|offset| range.start + offset)
        .collect()
}
