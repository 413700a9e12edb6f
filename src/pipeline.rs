use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::metrics::{compute_metrics, MetricsDelta, MetricsSnapshot, Percentiles, UniformityAnalysis};
use crate::rewriter::{RewriteError, Rewriter};
use crate::segmenter::{is_blank, Segmenter};
use crate::transform::{NoiseInjector, Stage, StructuralTransformer, VocabularyTransformer};

/// Longest input accepted, in characters
pub const DEFAULT_MAX_TEXT_CHARS: usize = 10_000;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("intensity must be within 0.0..=1.0, got {0}")]
    InvalidIntensity(f64),

    #[error("text is {len} characters, limit is {max}")]
    TextTooLong { len: usize, max: usize },

    #[error("{stage} stage failed: {source}")]
    Stage {
        stage: Stage,
        #[source]
        source: RewriteError,
    },
}

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub max_text_chars: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self { max_text_chars: DEFAULT_MAX_TEXT_CHARS }
    }
}

/// Which stages a run may apply. Enabled stages still run in [`Stage::ORDER`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnabledStages {
    pub structural: bool,
    pub vocabulary: bool,
    pub noise: bool,
}

impl Default for EnabledStages {
    fn default() -> Self {
        Self::all()
    }
}

impl EnabledStages {
    pub fn all() -> Self {
        Self { structural: true, vocabulary: true, noise: true }
    }

    pub fn none() -> Self {
        Self { structural: false, vocabulary: false, noise: false }
    }

    pub fn contains(&self, stage: Stage) -> bool {
        match stage {
            Stage::Structural => self.structural,
            Stage::Vocabulary => self.vocabulary,
            Stage::Noise => self.noise,
        }
    }

    /// Enabled stages in execution order
    pub fn ordered(&self) -> Vec<Stage> {
        Stage::ORDER.into_iter().filter(|s| self.contains(*s)).collect()
    }
}

/// Final text plus the stages actually applied, in order
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOutput {
    pub text: String,
    pub applied: Vec<Stage>,
}

/// Headline numbers of a before/after comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsSummary {
    pub original_sentence_count: usize,
    pub transformed_sentence_count: usize,
    pub original_avg_length: f64,
    pub transformed_avg_length: f64,
    pub original_length_std: f64,
    pub transformed_length_std: f64,
    pub vocabulary_diversity_change: f64,
}

impl MetricsSummary {
    pub fn between(before: &MetricsSnapshot, after: &MetricsSnapshot) -> Self {
        Self {
            original_sentence_count: before.sentence_count,
            transformed_sentence_count: after.sentence_count,
            original_avg_length: before.avg_sentence_length,
            transformed_avg_length: after.avg_sentence_length,
            original_length_std: before.sentence_length_std,
            transformed_length_std: after.sentence_length_std,
            vocabulary_diversity_change: after.vocabulary_diversity - before.vocabulary_diversity,
        }
    }
}

/// Diagnostics for one side of a comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextAnalysis {
    pub metrics: MetricsSnapshot,
    pub uniformity: UniformityAnalysis,
    pub percentiles: Percentiles,
}

impl TextAnalysis {
    pub fn from_snapshot(metrics: MetricsSnapshot) -> Self {
        let uniformity = metrics.uniformity();
        let percentiles = metrics.percentiles();
        Self { metrics, uniformity, percentiles }
    }
}

/// Everything a caller needs to show what a run changed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransformReport {
    pub original: String,
    pub transformed: String,
    pub intensity: f64,
    pub summary: MetricsSummary,
    pub before: TextAnalysis,
    pub after: TextAnalysis,
    pub delta: MetricsDelta,
    pub applied_transforms: Vec<Stage>,
}

type StageHook<'a> = Box<dyn Fn(Stage) + Send + Sync + 'a>;

/// Runs the enabled stages over one text, each consuming the previous
/// stage's full output.
/// WHY: collaborators are borrowed, so one rewriter and segmenter can serve many runs
pub struct Pipeline<'a> {
    rewriter: &'a dyn Rewriter,
    segmenter: &'a dyn Segmenter,
    config: PipelineConfig,
    on_stage: Option<StageHook<'a>>,
}

impl<'a> Pipeline<'a> {
    pub fn new(rewriter: &'a dyn Rewriter, segmenter: &'a dyn Segmenter) -> Self {
        Self::with_config(rewriter, segmenter, PipelineConfig::default())
    }

    pub fn with_config(rewriter: &'a dyn Rewriter, segmenter: &'a dyn Segmenter, config: PipelineConfig) -> Self {
        Self { rewriter, segmenter, config, on_stage: None }
    }

    /// Called with each stage just before it starts
    pub fn on_stage(mut self, hook: impl Fn(Stage) + Send + Sync + 'a) -> Self {
        self.on_stage = Some(Box::new(hook));
        self
    }

    /// Reject inputs no stage should see
    pub fn validate(&self, text: &str, intensity: f64) -> Result<(), PipelineError> {
        if !(0.0..=1.0).contains(&intensity) {
            return Err(PipelineError::InvalidIntensity(intensity));
        }
        let len = text.chars().count();
        if len > self.config.max_text_chars {
            return Err(PipelineError::TextTooLong { len, max: self.config.max_text_chars });
        }
        Ok(())
    }

    /// Segment and measure `text` without transforming it
    pub fn measure(&self, text: &str) -> MetricsSnapshot {
        let sentences = self.segmenter.segment(text);
        compute_metrics(text, &sentences)
    }

    pub async fn run<R: Rng + ?Sized>(
        &self,
        text: &str,
        intensity: f64,
        stages: EnabledStages,
        rng: &mut R,
    ) -> Result<PipelineOutput, PipelineError> {
        self.validate(text, intensity)?;

        if is_blank(text) {
            debug!("Blank input, nothing to transform");
            return Ok(PipelineOutput { text: String::new(), applied: Vec::new() });
        }

        let mut current = text.to_string();
        let mut applied = Vec::new();

        for stage in stages.ordered() {
            if let Some(hook) = &self.on_stage {
                hook(stage);
            }
            info!(%stage, intensity, input_chars = current.chars().count(), "Stage starting");

            current = self
                .run_stage(stage, &current, intensity, rng)
                .await
                .map_err(|source| PipelineError::Stage { stage, source })?;
            applied.push(stage);
        }

        info!(applied = applied.len(), output_chars = current.chars().count(), "Pipeline complete");
        Ok(PipelineOutput { text: current, applied })
    }

    async fn run_stage<R: Rng + ?Sized>(
        &self,
        stage: Stage,
        text: &str,
        intensity: f64,
        rng: &mut R,
    ) -> Result<String, RewriteError> {
        match stage {
            Stage::Structural => {
                StructuralTransformer::new(self.rewriter, self.segmenter)
                    .transform(text, intensity, rng)
                    .await
            }
            Stage::Vocabulary => {
                VocabularyTransformer::new(self.rewriter, self.segmenter)
                    .transform(text, intensity, rng)
                    .await
            }
            Stage::Noise => {
                NoiseInjector::new(self.rewriter, self.segmenter)
                    .transform(text, intensity, rng)
                    .await
            }
        }
    }

    /// [`Pipeline::run`] with the input and output measured for comparison
    pub async fn run_with_report<R: Rng + ?Sized>(
        &self,
        text: &str,
        intensity: f64,
        stages: EnabledStages,
        rng: &mut R,
    ) -> Result<TransformReport, PipelineError> {
        let output = self.run(text, intensity, stages, rng).await?;

        let before = self.measure(text);
        let after = self.measure(&output.text);

        Ok(TransformReport {
            original: text.to_string(),
            transformed: output.text,
            intensity,
            summary: MetricsSummary::between(&before, &after),
            delta: before.compare(&after),
            before: TextAnalysis::from_snapshot(before),
            after: TextAnalysis::from_snapshot(after),
            applied_transforms: output.applied,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rewriter::testing::{Call, FailingRewriter, RecordingRewriter};
    use crate::segmenter::KoreanSegmenter;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::sync::Mutex;

    const PARAGRAPH: &str = "기후 변화는 전 세계적인 문제다. 각국 정부는 탄소 배출을 줄이기 위해 노력하고 있다. \
        그러나 실질적인 성과는 아직 미미하다. 전문가들은 더 과감한 정책이 필요하다고 말한다. \
        시민들의 참여 또한 중요한 역할을 한다.";

    #[test]
    fn test_enabled_stages_keep_fixed_order() {
        let stages = EnabledStages { structural: false, vocabulary: true, noise: true };
        assert_eq!(stages.ordered(), vec![Stage::Vocabulary, Stage::Noise]);
        assert_eq!(EnabledStages::all().ordered(), Stage::ORDER.to_vec());
        assert!(EnabledStages::none().ordered().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_intensity_rejected() {
        let rewriter = RecordingRewriter::default();
        let segmenter = KoreanSegmenter::new().unwrap();
        let pipeline = Pipeline::new(&rewriter, &segmenter);
        let mut rng = StdRng::seed_from_u64(0);

        for bad in [-0.1, 1.5, f64::NAN] {
            let result = pipeline.run(PARAGRAPH, bad, EnabledStages::all(), &mut rng).await;
            assert!(matches!(result, Err(PipelineError::InvalidIntensity(_))));
        }
        assert!(rewriter.calls().is_empty());
    }

    #[tokio::test]
    async fn test_text_length_limit() {
        let rewriter = RecordingRewriter::default();
        let segmenter = KoreanSegmenter::new().unwrap();
        let pipeline = Pipeline::with_config(&rewriter, &segmenter, PipelineConfig { max_text_chars: 10 });
        let mut rng = StdRng::seed_from_u64(0);

        let result = pipeline.run("열 글자를 넘는 입력 문장입니다.", 0.5, EnabledStages::all(), &mut rng).await;
        assert!(matches!(result, Err(PipelineError::TextTooLong { max: 10, .. })));
    }

    #[tokio::test]
    async fn test_blank_input_yields_empty_output() {
        let rewriter = RecordingRewriter::default();
        let segmenter = KoreanSegmenter::new().unwrap();
        let pipeline = Pipeline::new(&rewriter, &segmenter);
        let mut rng = StdRng::seed_from_u64(0);

        let output = pipeline.run("  \n\t ", 1.0, EnabledStages::all(), &mut rng).await.unwrap();
        assert_eq!(output.text, "");
        assert!(output.applied.is_empty());
    }

    #[tokio::test]
    async fn test_applied_stages_recorded_in_order() {
        let rewriter = RecordingRewriter::default();
        let segmenter = KoreanSegmenter::new().unwrap();
        let seen = Mutex::new(Vec::new());
        let pipeline = Pipeline::new(&rewriter, &segmenter).on_stage(|stage| seen.lock().unwrap().push(stage));
        let mut rng = StdRng::seed_from_u64(21);

        let stages = EnabledStages { structural: true, vocabulary: false, noise: true };
        let output = pipeline.run(PARAGRAPH, 0.5, stages, &mut rng).await.unwrap();

        assert_eq!(output.applied, vec![Stage::Structural, Stage::Noise]);
        drop(pipeline);
        assert_eq!(seen.into_inner().unwrap(), vec![Stage::Structural, Stage::Noise]);
    }

    #[tokio::test]
    async fn test_no_stages_returns_input() {
        let rewriter = RecordingRewriter::default();
        let segmenter = KoreanSegmenter::new().unwrap();
        let pipeline = Pipeline::new(&rewriter, &segmenter);
        let mut rng = StdRng::seed_from_u64(0);

        let output = pipeline.run(PARAGRAPH, 1.0, EnabledStages::none(), &mut rng).await.unwrap();
        assert_eq!(output.text, PARAGRAPH);
        assert!(output.applied.is_empty());
        assert!(rewriter.calls().is_empty());
    }

    #[tokio::test]
    async fn test_stage_failure_names_stage() {
        let segmenter = KoreanSegmenter::new().unwrap();
        let pipeline = Pipeline::new(&FailingRewriter, &segmenter);
        let mut rng = StdRng::seed_from_u64(0);

        // vocabulary alone at 0.9 always delegates synonym diversification
        let stages = EnabledStages { structural: false, vocabulary: true, noise: true };
        let err = pipeline.run(PARAGRAPH, 0.9, stages, &mut rng).await.unwrap_err();

        assert!(matches!(err, PipelineError::Stage { stage: Stage::Vocabulary, .. }));
        assert!(err.to_string().starts_with("vocabulary stage failed"));
    }

    #[tokio::test]
    async fn test_report_measures_both_sides() {
        let rewriter = RecordingRewriter::default();
        let segmenter = KoreanSegmenter::new().unwrap();
        let pipeline = Pipeline::new(&rewriter, &segmenter);
        let mut rng = StdRng::seed_from_u64(3);

        let report = pipeline.run_with_report(PARAGRAPH, 0.2, EnabledStages::all(), &mut rng).await.unwrap();

        assert_eq!(report.original, PARAGRAPH);
        assert_eq!(report.summary.original_sentence_count, 5);
        assert_eq!(report.before.metrics, pipeline.measure(PARAGRAPH));
        assert_eq!(report.after.metrics, pipeline.measure(&report.transformed));
        assert_eq!(report.applied_transforms, Stage::ORDER.to_vec());

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["applied_transforms"][0], "structural");
        assert!(json["before"]["uniformity"]["is_suspicious"].is_boolean());
    }

    #[tokio::test]
    async fn test_high_intensity_run_keeps_text() {
        let rewriter = RecordingRewriter::default();
        let segmenter = KoreanSegmenter::new().unwrap();
        let pipeline = Pipeline::new(&rewriter, &segmenter);

        for seed in 0..4 {
            let mut rng = StdRng::seed_from_u64(seed);
            let output = pipeline.run(PARAGRAPH, 1.0, EnabledStages::all(), &mut rng).await.unwrap();
            assert!(!output.text.trim().is_empty());
            assert!(!segmenter.segment(&output.text).is_empty());
        }
        assert!(rewriter.calls().iter().any(|c| matches!(c, Call::Rewrite { .. })));
    }
}
