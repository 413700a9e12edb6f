//! Text metrics: sentence-length distribution and vocabulary usage statistics.
//!
//! Every function here is total. Empty texts, empty sentence lists and
//! zero-variance inputs resolve to defined zero values instead of failing.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Uniformity score above which a text's sentence lengths look machine-like
pub const SUSPICIOUS_UNIFORMITY: f64 = 0.7;

/// Statistics for one text, computed once and never mutated
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub word_count: usize,
    pub sentence_count: usize,
    pub avg_sentence_length: f64,
    pub sentence_length_std: f64,
    pub sentence_length_variance: f64,
    pub sentence_length_range: usize,
    pub vocabulary_diversity: f64,
    pub burstiness: f64,
    pub sentence_lengths: Vec<usize>,
}

/// After-minus-before differences between two snapshots
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsDelta {
    pub sentence_count_change: i64,
    pub avg_length_change: f64,
    pub length_std_change: f64,
    pub vocabulary_diversity_change: f64,
    pub burstiness_change: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Percentiles {
    pub p25: usize,
    pub p50: usize,
    pub p75: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UniformityAnalysis {
    pub coefficient_of_variation: f64,
    pub uniformity_score: f64,
    pub is_suspicious: bool,
}

/// Compute the full snapshot for `text` and its pre-split `sentences`
pub fn compute_metrics<S: AsRef<str>>(text: &str, sentences: &[S]) -> MetricsSnapshot {
    let word_count = text.split_whitespace().count();

    let sentence_lengths: Vec<usize> = sentences
        .iter()
        .map(|s| s.as_ref().split_whitespace().count())
        .collect();
    let lengths = as_floats(&sentence_lengths);

    let sentence_length_range = match (sentence_lengths.iter().max(), sentence_lengths.iter().min()) {
        (Some(max), Some(min)) => max - min,
        _ => 0,
    };

    let words: Vec<String> = text.to_lowercase().split_whitespace().map(str::to_string).collect();

    MetricsSnapshot {
        word_count,
        sentence_count: sentences.len(),
        avg_sentence_length: mean(&lengths),
        sentence_length_std: std_dev(&lengths),
        sentence_length_variance: variance(&lengths),
        sentence_length_range,
        vocabulary_diversity: vocabulary_diversity(&words),
        burstiness: burstiness(&words),
        sentence_lengths,
    }
}

impl MetricsSnapshot {
    /// Differences from `self` (before) to `after`
    pub fn compare(&self, after: &MetricsSnapshot) -> MetricsDelta {
        compare(self, after)
    }

    pub fn uniformity(&self) -> UniformityAnalysis {
        analyze_uniformity(&self.sentence_lengths)
    }

    pub fn percentiles(&self) -> Percentiles {
        percentile_lengths(&self.sentence_lengths)
    }
}

pub fn compare(before: &MetricsSnapshot, after: &MetricsSnapshot) -> MetricsDelta {
    MetricsDelta {
        sentence_count_change: after.sentence_count as i64 - before.sentence_count as i64,
        avg_length_change: after.avg_sentence_length - before.avg_sentence_length,
        length_std_change: after.sentence_length_std - before.sentence_length_std,
        vocabulary_diversity_change: after.vocabulary_diversity - before.vocabulary_diversity,
        burstiness_change: after.burstiness - before.burstiness,
    }
}

/// Unique words over total words; 0 for an empty list
pub fn vocabulary_diversity(words: &[String]) -> f64 {
    if words.is_empty() {
        return 0.0;
    }
    let unique: std::collections::HashSet<&str> = words.iter().map(String::as_str).collect();
    unique.len() as f64 / words.len() as f64
}

/// `(σ − μ) / (σ + μ)` over the frequency of each distinct word.
///
/// 0 when fewer than two distinct words exist or when σ + μ is 0.
pub fn burstiness(words: &[String]) -> f64 {
    // BTreeMap keeps the summation order stable across runs
    let mut frequencies: BTreeMap<&str, usize> = BTreeMap::new();
    for word in words {
        *frequencies.entry(word.as_str()).or_insert(0) += 1;
    }

    if frequencies.len() < 2 {
        return 0.0;
    }

    let counts: Vec<f64> = frequencies.values().map(|&c| c as f64).collect();
    let mu = mean(&counts);
    let sigma = std_dev(&counts);

    if sigma + mu == 0.0 {
        return 0.0;
    }
    (sigma - mu) / (sigma + mu)
}

/// Sorted-array percentiles by direct index `floor(n * q)`, no interpolation
pub fn percentile_lengths(sentence_lengths: &[usize]) -> Percentiles {
    if sentence_lengths.is_empty() {
        return Percentiles { p25: 0, p50: 0, p75: 0 };
    }

    let mut sorted = sentence_lengths.to_vec();
    sorted.sort_unstable();
    let n = sorted.len();
    let at = |q: f64| sorted[((n as f64 * q).floor() as usize).min(n - 1)];

    Percentiles {
        p25: at(0.25),
        p50: at(0.50),
        p75: if n > 1 { at(0.75) } else { sorted[0] },
    }
}

/// Coefficient of variation of sentence lengths and the derived uniformity score.
///
/// Fewer than two lengths carry no spread to judge: score 1, not suspicious.
pub fn analyze_uniformity(sentence_lengths: &[usize]) -> UniformityAnalysis {
    if sentence_lengths.len() < 2 {
        return UniformityAnalysis {
            coefficient_of_variation: 0.0,
            uniformity_score: 1.0,
            is_suspicious: false,
        };
    }

    let lengths = as_floats(sentence_lengths);
    let mu = mean(&lengths);
    let sigma = std_dev(&lengths);

    let coefficient_of_variation = if mu > 0.0 { sigma / mu } else { 0.0 };
    let uniformity_score = (1.0 - coefficient_of_variation).max(0.0);

    UniformityAnalysis {
        coefficient_of_variation,
        uniformity_score,
        is_suspicious: uniformity_score > SUSPICIOUS_UNIFORMITY,
    }
}

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population variance; 0 for fewer than two values
pub fn variance(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let mu = mean(values);
    values.iter().map(|x| (x - mu).powi(2)).sum::<f64>() / values.len() as f64
}

pub fn std_dev(values: &[f64]) -> f64 {
    variance(values).sqrt()
}

fn as_floats(values: &[usize]) -> Vec<f64> {
    values.iter().map(|&v| v as f64).collect()
}
