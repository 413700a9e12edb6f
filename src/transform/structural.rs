//! Structural stage: changes sentence boundaries and order, not wording.
//!
//! Each sentence gets one of four actions from [`decide_action`]. Splits and
//! merges change how many input sentences are consumed, so the loop keeps a
//! read cursor over the original list and appends to a separate output list.

use rand::Rng;
use tracing::{debug, info};

use super::join_sentences;
use crate::rewriter::{prompts, RewriteResult, Rewriter};
use crate::segmenter::{word_count, Segmenter};

/// Split requires strictly more words than this
pub const SPLIT_MIN_WORDS: usize = 20;
/// Merge requires strictly fewer words than this
pub const MERGE_MAX_WORDS: usize = 10;
/// A lone sentence longer than this is split even at intensity 0
pub const LONE_SENTENCE_SPLIT_WORDS: usize = 15;
/// Both neighbours must be shorter than this for `combine_short_sentences`
pub const COMBINE_MAX_WORDS: usize = 8;
/// Partial reorder only kicks in above this intensity
pub const REORDER_MIN_INTENSITY: f64 = 0.6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Split,
    Merge,
    Paraphrase,
    Keep,
}

/// Pick the action for one sentence. `draw` is a uniform value in `[0, 1)`.
///
/// Thresholds grow with intensity and are checked in priority order; the
/// first rule that matches wins. Merge only matches when a following
/// sentence exists.
pub fn decide_action(word_count: usize, intensity: f64, draw: f64, has_next: bool) -> Action {
    let split_threshold = 0.3 * intensity;
    let merge_threshold = split_threshold + 0.2 * intensity;
    let paraphrase_threshold = merge_threshold + 0.3 * intensity;

    if word_count > SPLIT_MIN_WORDS && draw < split_threshold {
        Action::Split
    } else if word_count < MERGE_MAX_WORDS && draw < merge_threshold && has_next {
        Action::Merge
    } else if draw < paraphrase_threshold {
        Action::Paraphrase
    } else {
        Action::Keep
    }
}

/// Number of interior swaps performed by [`partial_reorder`] for `len` sentences
pub fn reorder_swap_count(len: usize, intensity: f64) -> usize {
    if len < 2 {
        return 0;
    }
    ((len - 2) as f64 * intensity * 0.5).floor() as usize
}

/// Swap random pairs of interior sentences, keeping the first and last in
/// place. A draw of the same index twice is a no-op swap.
pub fn partial_reorder<R: Rng + ?Sized>(sentences: &mut [String], intensity: f64, rng: &mut R) {
    let len = sentences.len();
    if len <= 3 {
        return;
    }

    let swaps = reorder_swap_count(len, intensity);
    let interior = &mut sentences[1..len - 1];
    for _ in 0..swaps {
        let a = rng.random_range(0..interior.len());
        let b = rng.random_range(0..interior.len());
        interior.swap(a, b);
    }
    debug!(swaps, "Partially reordered interior sentences");
}

pub struct StructuralTransformer<'a> {
    rewriter: &'a dyn Rewriter,
    segmenter: &'a dyn Segmenter,
}

impl<'a> StructuralTransformer<'a> {
    pub fn new(rewriter: &'a dyn Rewriter, segmenter: &'a dyn Segmenter) -> Self {
        Self { rewriter, segmenter }
    }

    pub async fn transform<R: Rng + ?Sized>(
        &self,
        text: &str,
        intensity: f64,
        rng: &mut R,
    ) -> RewriteResult<String> {
        let sentences = self.segmenter.segment(text);

        if sentences.len() <= 1 {
            if word_count(text) > LONE_SENTENCE_SPLIT_WORDS {
                debug!("Single long sentence, delegating split");
                let parts = self.rewriter.split_one(text).await?;
                if parts.is_empty() {
                    return Ok(text.to_string());
                }
                return Ok(join_sentences(&parts));
            }
            return Ok(text.to_string());
        }

        let mut output: Vec<String> = Vec::with_capacity(sentences.len());
        let mut cursor = 0;

        while cursor < sentences.len() {
            let sentence = &sentences[cursor];
            let words = word_count(sentence);
            let has_next = cursor + 1 < sentences.len();
            let draw: f64 = rng.random();
            let action = decide_action(words, intensity, draw, has_next);
            debug!(cursor, words, draw, ?action, "Structural decision");

            match action {
                Action::Split => {
                    let parts = self.rewriter.split_one(sentence).await?;
                    if parts.is_empty() {
                        output.push(sentence.clone());
                    } else {
                        output.extend(parts);
                    }
                    cursor += 1;
                }
                Action::Merge => {
                    let merged = self.rewriter.merge_two(sentence, &sentences[cursor + 1]).await?;
                    output.push(merged);
                    cursor += 2;
                }
                Action::Paraphrase => {
                    let rewritten = self
                        .rewriter
                        .rewrite(sentence, prompts::STRUCTURAL_PARAPHRASE, 0.7)
                        .await?;
                    output.push(rewritten);
                    cursor += 1;
                }
                Action::Keep => {
                    output.push(sentence.clone());
                    cursor += 1;
                }
            }
        }

        if intensity > REORDER_MIN_INTENSITY && output.len() > 3 {
            partial_reorder(&mut output, intensity, rng);
        }

        info!(before = sentences.len(), after = output.len(), "Structural stage complete");
        Ok(join_sentences(&output))
    }

    /// Rewrite the text into clause-sized independent sentences
    pub async fn split_by_clauses(&self, text: &str) -> RewriteResult<String> {
        self.rewriter.rewrite(text, prompts::CLAUSE_SPLIT, 0.6).await
    }

    /// Merge each pair of consecutive sentences when both are short
    pub async fn combine_short_sentences(&self, sentences: &[String]) -> RewriteResult<Vec<String>> {
        let mut result = Vec::with_capacity(sentences.len());
        let mut cursor = 0;

        while cursor < sentences.len() {
            let current = &sentences[cursor];
            if let Some(next) = sentences.get(cursor + 1) {
                if word_count(current) < COMBINE_MAX_WORDS && word_count(next) < COMBINE_MAX_WORDS {
                    result.push(self.rewriter.merge_two(current, next).await?);
                    cursor += 2;
                    continue;
                }
            }
            result.push(current.clone());
            cursor += 1;
        }

        Ok(result)
    }
}
