//! Noise stage: perturbs the sentence-length distribution and injects local
//! unpredictability signals (transition phrases, parenthetical asides, a
//! delegated rare-vocabulary rewrite).

use futures::future::try_join_all;
use rand::seq::IndexedRandom;
use rand::Rng;
use tracing::{debug, info};

use super::{join_sentences, prepend_marker, sample_positions};
use crate::rewriter::{prompts, RewriteResult, Rewriter};
use crate::segmenter::{word_count, Segmenter};

pub const UNEXPECTED_TRANSITIONS: &[&str] = &[
    "흥미롭게도",
    "생각해보면",
    "한 가지 덧붙이자면",
    "여기서 잠깐",
    "다른 관점에서 보면",
    "사족을 붙이자면",
    "덧붙여 말하자면",
    "개인적으로는",
    "솔직히 말해서",
    "어쩌면",
];

/// Common predicate → less predictable alternatives
pub const RARE_EXPRESSIONS: &[(&str, &[&str])] = &[
    ("중요하다", &["긴요하다", "핵심적이다", "지대하다"]),
    ("생각하다", &["사료하다", "헤아리다", "가늠하다"]),
    ("많다", &["다수이다", "비일비재하다", "허다하다"]),
    ("좋다", &["양호하다", "긍정적이다", "바람직하다"]),
    ("나쁘다", &["부정적이다", "미흡하다", "난점이 있다"]),
    ("어렵다", &["난해하다", "용이하지 않다", "만만치 않다"]),
    ("쉽다", &["수월하다", "용이하다", "간편하다"]),
];

pub const PARENTHETICAL_ASIDES: &[&str] = &[
    "(물론 이건 한 가지 관점일 뿐이지만)",
    "(정확히 말하자면)",
    "(다소 과장된 표현이긴 하지만)",
    "(이 부분은 논쟁의 여지가 있으나)",
    "(일반화하기는 어렵지만)",
];

pub const LENGTH_VARIATION_MIN_SENTENCES: usize = 3;
pub const SHORTEN_MIN_WORDS: usize = 8;
pub const LENGTHEN_MAX_WORDS: usize = 15;
pub const TRANSITION_MIN_INTENSITY: f64 = 0.4;
pub const UNPREDICTABILITY_MIN_INTENSITY: f64 = 0.5;
pub const PARENTHETICAL_MIN_INTENSITY: f64 = 0.6;
pub const PARENTHETICAL_MIN_SENTENCES: usize = 4;

/// What happens to one sentence during length variation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthEdit {
    Keep,
    Shorten,
    Lengthen,
}

/// `modify_draw < intensity` selects the sentence, then `coin_draw < 0.5`
/// picks shorten over lengthen. A sentence outside the chosen edit's word
/// gate is kept.
pub fn decide_length_edit(word_count: usize, intensity: f64, modify_draw: f64, coin_draw: f64) -> LengthEdit {
    if modify_draw >= intensity {
        return LengthEdit::Keep;
    }
    if coin_draw < 0.5 {
        if word_count > SHORTEN_MIN_WORDS {
            LengthEdit::Shorten
        } else {
            LengthEdit::Keep
        }
    } else if word_count < LENGTHEN_MAX_WORDS {
        LengthEdit::Lengthen
    } else {
        LengthEdit::Keep
    }
}

pub fn transition_count(sentence_count: usize, intensity: f64) -> usize {
    ((sentence_count as f64 * intensity * 0.2).floor() as usize).max(1)
}

/// Less common alternatives for a predicate in dictionary form
pub fn rare_expression_variants(word: &str) -> Option<&'static [&'static str]> {
    RARE_EXPRESSIONS
        .iter()
        .find(|(key, _)| *key == word)
        .map(|(_, variants)| *variants)
}

/// `"word → alt, alt"` lines for every table entry whose stem occurs in the text
pub fn rare_expression_hints(text: &str) -> Vec<String> {
    RARE_EXPRESSIONS
        .iter()
        .filter(|(word, _)| {
            let stem = word.strip_suffix('다').unwrap_or(word);
            !stem.is_empty() && text.contains(stem)
        })
        .map(|(word, variants)| format!("{word} → {}", variants.join(", ")))
        .collect()
}

pub struct NoiseInjector<'a> {
    rewriter: &'a dyn Rewriter,
    segmenter: &'a dyn Segmenter,
}

impl<'a> NoiseInjector<'a> {
    pub fn new(rewriter: &'a dyn Rewriter, segmenter: &'a dyn Segmenter) -> Self {
        Self { rewriter, segmenter }
    }

    pub async fn transform<R: Rng + ?Sized>(
        &self,
        text: &str,
        intensity: f64,
        rng: &mut R,
    ) -> RewriteResult<String> {
        let mut text = self.vary_sentence_lengths(text, intensity, rng).await?;

        if intensity > TRANSITION_MIN_INTENSITY {
            text = self.insert_transitions(&text, intensity, rng);
        }

        if intensity > UNPREDICTABILITY_MIN_INTENSITY {
            let instruction = prompts::unpredictability(&rare_expression_hints(&text));
            text = self.rewriter.rewrite(&text, &instruction, 0.9).await?;
        }

        if intensity > PARENTHETICAL_MIN_INTENSITY {
            text = self.insert_parenthetical(&text, rng);
        }

        info!(output_chars = text.chars().count(), "Noise stage complete");
        Ok(text)
    }

    /// Shorten or lengthen a random subset of sentences. All draws happen up
    /// front; the delegated edits then run concurrently and are reassembled
    /// in sentence order.
    pub async fn vary_sentence_lengths<R: Rng + ?Sized>(
        &self,
        text: &str,
        intensity: f64,
        rng: &mut R,
    ) -> RewriteResult<String> {
        let sentences = self.segmenter.segment(text);
        if sentences.len() < LENGTH_VARIATION_MIN_SENTENCES {
            return Ok(text.to_string());
        }

        let edits: Vec<LengthEdit> = sentences
            .iter()
            .map(|sentence| {
                let modify_draw = rng.random::<f64>();
                let coin_draw = rng.random::<f64>();
                decide_length_edit(word_count(sentence), intensity, modify_draw, coin_draw)
            })
            .collect();

        let delegated = edits.iter().filter(|e| **e != LengthEdit::Keep).count();
        debug!(sentences = sentences.len(), delegated, "Varying sentence lengths");

        let rewrites = sentences.iter().zip(&edits).map(|(sentence, edit)| async move {
            match edit {
                LengthEdit::Keep => Ok(sentence.clone()),
                LengthEdit::Shorten => self.rewriter.rewrite(sentence, prompts::SHORTEN, 0.6).await,
                LengthEdit::Lengthen => self.rewriter.rewrite(sentence, prompts::LENGTHEN, 0.7).await,
            }
        });

        let modified = try_join_all(rewrites).await?;
        Ok(join_sentences(&modified))
    }

    /// Prefix transition phrases to random interior sentences
    pub fn insert_transitions<R: Rng + ?Sized>(&self, text: &str, intensity: f64, rng: &mut R) -> String {
        let mut sentences = self.segmenter.segment(text);
        if sentences.len() < 3 {
            return text.to_string();
        }

        let wanted = transition_count(sentences.len(), intensity);
        let mut positions = sample_positions(rng, 1..sentences.len() - 1, wanted);
        positions.sort_unstable_by(|a, b| b.cmp(a));

        for pos in positions {
            if let Some(transition) = UNEXPECTED_TRANSITIONS.choose(rng) {
                debug!(pos, transition, "Inserting transition");
                sentences[pos] = prepend_marker(&sentences[pos], transition);
            }
        }

        join_sentences(&sentences)
    }

    /// With probability one half, append an aside to one interior sentence
    pub fn insert_parenthetical<R: Rng + ?Sized>(&self, text: &str, rng: &mut R) -> String {
        let mut sentences = self.segmenter.segment(text);
        if sentences.len() < PARENTHETICAL_MIN_SENTENCES || !rng.random_bool(0.5) {
            return text.to_string();
        }

        let pos = rng.random_range(1..sentences.len() - 1);
        if let Some(aside) = PARENTHETICAL_ASIDES.choose(rng) {
            debug!(pos, aside, "Inserting parenthetical");
            sentences[pos] = format!("{} {aside}", sentences[pos]);
        }

        join_sentences(&sentences)
    }

    /// Add one or two rhetorical questions
    pub async fn add_rhetorical_elements(&self, text: &str) -> RewriteResult<String> {
        self.rewriter.rewrite(text, prompts::RHETORICAL, 0.8).await
    }

    pub async fn inject_personal_touches(&self, text: &str) -> RewriteResult<String> {
        self.rewriter.rewrite(text, prompts::PERSONAL_VOICE, 0.7).await
    }

    /// Rewrite toward clustered word usage. `target_level` is on the
    /// burstiness scale, -1 to 1.
    pub async fn create_burstiness(&self, text: &str, target_level: f64) -> RewriteResult<String> {
        let target_level = target_level.clamp(-1.0, 1.0);
        self.rewriter.rewrite(text, &prompts::burstiness(target_level), 0.8).await
    }
}
