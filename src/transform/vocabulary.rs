//! Vocabulary stage: word choice and register, sentence boundaries untouched.
//!
//! Runs four steps in order, each gated by intensity: local connector
//! substitution, delegated synonym diversification, delegated formality
//! mixing, and local colloquial-marker insertion.

use rand::seq::IndexedRandom;
use rand::Rng;
use tracing::{debug, info};

use super::{join_sentences, prepend_marker, sample_positions};
use crate::rewriter::{prompts, RewriteResult, Rewriter};
use crate::segmenter::Segmenter;

/// Connector → alternatives. Only the first occurrence of each connector is
/// replaced per pass.
pub const CONNECTOR_VARIATIONS: &[(&str, &[&str])] = &[
    ("그러나", &["하지만", "그렇지만", "그런데", "반면에", "한편"]),
    ("하지만", &["그러나", "그렇지만", "근데", "다만"]),
    ("그리고", &["또한", "게다가", "더불어", "아울러", "그뿐만 아니라"]),
    ("또한", &["그리고", "게다가", "뿐만 아니라", "더불어"]),
    ("따라서", &["그래서", "그러므로", "결국", "이로 인해", "이에 따라"]),
    ("그래서", &["따라서", "그러므로", "결과적으로", "그 결과"]),
    ("왜냐하면", &["그 이유는", "이유는", "~때문에"]),
    ("예를 들어", &["예컨대", "가령", "이를테면", "구체적으로"]),
    ("즉", &["다시 말해", "바꿔 말하면", "달리 말하면", "요컨대"]),
    ("물론", &["당연히", "분명히", "확실히", "사실"]),
];

/// Formal expression → register variants.
/// `~이다` carries the informal set only.
pub const FORMALITY_VARIANTS: &[(&str, &[&str])] = &[
    ("~이다", &["~야", "~이야"]),
    ("~였다", &["~였어요", "~이었습니다"]),
    ("~한다", &["~해요", "~합니다", "~하는 거예요"]),
    ("매우", &["정말", "아주", "굉장히", "엄청"]),
    ("중요하다", &["핵심이다", "필수적이다", "빼놓을 수 없다"]),
    ("필요하다", &["요구된다", "있어야 한다", "갖춰야 한다"]),
    ("생각하다", &["여기다", "판단하다", "보다", "느끼다"]),
    ("알다", &["파악하다", "인지하다", "이해하다", "깨닫다"]),
];

/// Discourse markers prepended by colloquial insertion
pub const COLLOQUIAL_MARKERS: &[&str] = &[
    "사실", "물론", "솔직히", "확실히", "분명히", "아무래도", "어쨌든", "결국", "실제로", "정말로",
];

pub const SYNONYM_MIN_INTENSITY: f64 = 0.3;
pub const FORMALITY_MIN_INTENSITY: f64 = 0.5;
pub const COLLOQUIAL_MIN_INTENSITY: f64 = 0.6;

/// Aggressiveness of delegated synonym replacement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SynonymTier {
    Light,
    Moderate,
    Aggressive,
}

impl SynonymTier {
    pub fn for_intensity(intensity: f64) -> Self {
        if intensity < 0.5 {
            SynonymTier::Light
        } else if intensity < 0.7 {
            SynonymTier::Moderate
        } else {
            SynonymTier::Aggressive
        }
    }

    pub fn level(self) -> &'static str {
        match self {
            SynonymTier::Light => "약간의",
            SynonymTier::Moderate => "적절한",
            SynonymTier::Aggressive => "적극적인",
        }
    }

    /// Target share of words to replace
    pub fn share(self) -> &'static str {
        match self {
            SynonymTier::Light => "20-30%",
            SynonymTier::Moderate => "40-50%",
            SynonymTier::Aggressive => "60-70%",
        }
    }
}

/// Target register for [`VocabularyTransformer::apply_style_transfer`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Style {
    Academic,
    #[default]
    Casual,
    Journalistic,
    Narrative,
}

impl Style {
    fn description(self) -> &'static str {
        match self {
            Style::Academic => "학술적이고 객관적인 문체로, 전문 용어를 적절히 사용하며",
            Style::Casual => "편안하고 친근한 구어체로, 일상 대화처럼",
            Style::Journalistic => "간결하고 명확한 기사체로, 핵심을 먼저 전달하며",
            Style::Narrative => "서술적이고 묘사적인 문체로, 이야기하듯이",
        }
    }
}

/// Register variants for a formal expression, if the table knows it
pub fn formality_variants(expression: &str) -> Option<&'static [&'static str]> {
    FORMALITY_VARIANTS
        .iter()
        .find(|(key, _)| *key == expression)
        .map(|(_, variants)| *variants)
}

/// For each known connector present in the text, with probability
/// `intensity`, replace its first occurrence with a random alternative
pub fn vary_connectors<R: Rng + ?Sized>(text: &str, intensity: f64, rng: &mut R) -> String {
    let mut result = text.to_string();

    for (connector, alternatives) in CONNECTOR_VARIATIONS {
        if !result.contains(connector) {
            continue;
        }
        if rng.random::<f64>() < intensity {
            if let Some(replacement) = alternatives.choose(rng) {
                debug!(connector, replacement, "Connector substituted");
                result = result.replacen(connector, replacement, 1);
            }
        }
    }

    result
}

/// How many sentences receive a colloquial marker
pub fn colloquial_insertion_count(sentence_count: usize, intensity: f64) -> usize {
    ((sentence_count as f64 * intensity * 0.3).floor() as usize).max(1)
}

pub struct VocabularyTransformer<'a> {
    rewriter: &'a dyn Rewriter,
    segmenter: &'a dyn Segmenter,
}

impl<'a> VocabularyTransformer<'a> {
    pub fn new(rewriter: &'a dyn Rewriter, segmenter: &'a dyn Segmenter) -> Self {
        Self { rewriter, segmenter }
    }

    pub async fn transform<R: Rng + ?Sized>(
        &self,
        text: &str,
        intensity: f64,
        rng: &mut R,
    ) -> RewriteResult<String> {
        let mut text = vary_connectors(text, intensity, rng);

        if intensity > SYNONYM_MIN_INTENSITY {
            let tier = SynonymTier::for_intensity(intensity);
            debug!(?tier, "Delegating synonym diversification");
            let instruction = prompts::synonym_diversification(tier.level(), tier.share());
            text = self.rewriter.rewrite(&text, &instruction, 0.8).await?;
        }

        if intensity > FORMALITY_MIN_INTENSITY {
            text = self.rewriter.rewrite(&text, prompts::FORMALITY_MIX, 0.7).await?;
        }

        if intensity > COLLOQUIAL_MIN_INTENSITY {
            text = self.add_colloquial_touches(&text, intensity, rng);
        }

        info!(output_chars = text.chars().count(), "Vocabulary stage complete");
        Ok(text)
    }

    /// Prepend discourse markers to random non-initial sentences that do not
    /// already start with one
    pub fn add_colloquial_touches<R: Rng + ?Sized>(&self, text: &str, intensity: f64, rng: &mut R) -> String {
        let mut sentences = self.segmenter.segment(text);
        if sentences.len() < 2 {
            return text.to_string();
        }

        let wanted = colloquial_insertion_count(sentences.len(), intensity);
        let positions = sample_positions(rng, 1..sentences.len(), wanted);
        debug!(?positions, "Colloquial insertion positions");

        for pos in positions {
            let Some(marker) = COLLOQUIAL_MARKERS.choose(rng) else {
                continue;
            };
            let sentence = &sentences[pos];
            if COLLOQUIAL_MARKERS.iter().any(|m| sentence.starts_with(m)) {
                continue;
            }
            sentences[pos] = prepend_marker(sentence, marker);
        }

        join_sentences(&sentences)
    }

    /// Vary repeated expressions and repetitive sentence openers
    pub async fn diversify_expressions(&self, text: &str) -> RewriteResult<String> {
        self.rewriter.rewrite(text, prompts::DIVERSIFY_EXPRESSIONS, 0.8).await
    }

    pub async fn apply_style_transfer(&self, text: &str, style: Style) -> RewriteResult<String> {
        self.rewriter.rewrite(text, &prompts::style_transfer(style.description()), 0.8).await
    }

    /// Soften assertive statements
    pub async fn add_hedging_language(&self, text: &str) -> RewriteResult<String> {
        self.rewriter.rewrite(text, prompts::HEDGING, 0.7).await
    }
}
