pub mod metrics;
pub mod pipeline;
pub mod reader;
pub mod rewriter;
pub mod segmenter;
pub mod transform;

// Re-export the types most callers need
pub use metrics::{compute_metrics, MetricsDelta, MetricsSnapshot, Percentiles, UniformityAnalysis};
pub use pipeline::{
    EnabledStages, MetricsSummary, Pipeline, PipelineConfig, PipelineError, PipelineOutput,
    TextAnalysis, TransformReport,
};
pub use rewriter::{OpenAiRewriter, ParaphraseStyle, RewriteError, RewriteResult, Rewriter, RewriterConfig};
pub use segmenter::{KoreanSegmenter, Segmenter, SegmenterError};

// Re-export the stages for callers that drive them individually
pub use transform::{NoiseInjector, Stage, StructuralTransformer, VocabularyTransformer};
