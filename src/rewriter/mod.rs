//! Text-rewriting collaborator.
//!
//! The transformers never talk to a model directly. They hold a
//! [`Rewriter`], whose one required operation is a free-form
//! `rewrite(text, instruction, creativity)`. Merging, splitting and the other
//! helpers are default methods layered on top of it, so a backend only has to
//! implement the single call.
//!
//! Every call may fail. Only [`Rewriter::split_one`] recovers locally (it
//! degrades to the unsplit sentence when the structured output is unusable);
//! every other failure is returned to the calling stage.

use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

pub mod openai;
pub mod prompts;

pub use openai::{OpenAiRewriter, RewriterConfig};

#[derive(Error, Debug)]
pub enum RewriteError {
    #[error("missing API key: {env_var} is not set")]
    MissingApiKey { env_var: String },

    #[error("rewrite request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("rewrite service returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("rewrite service returned no usable text")]
    EmptyResponse,

    #[error("failed to parse rewrite response: {0}")]
    Parse(String),
}

pub type RewriteResult<T> = Result<T, RewriteError>;

/// Register used by [`Rewriter::paraphrase`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParaphraseStyle {
    #[default]
    Neutral,
    Colloquial,
    Formal,
    Academic,
}

impl ParaphraseStyle {
    fn description(self) -> &'static str {
        match self {
            ParaphraseStyle::Neutral => "자연스럽고 중립적인 문체로",
            ParaphraseStyle::Colloquial => "구어체로 자연스럽게",
            ParaphraseStyle::Formal => "격식체로 정중하게",
            ParaphraseStyle::Academic => "학술적이고 객관적인 문체로",
        }
    }
}

#[async_trait]
pub trait Rewriter: Send + Sync {
    /// Rewrite `text` according to `instruction`. `creativity` is the
    /// sampling temperature handed to the model.
    async fn rewrite(&self, text: &str, instruction: &str, creativity: f32) -> RewriteResult<String>;

    /// Merge two consecutive sentences into one
    async fn merge_two(&self, first: &str, second: &str) -> RewriteResult<String> {
        let input = format!("문장1: {first}\n문장2: {second}");
        self.rewrite(&input, prompts::MERGE_TWO, 0.7).await
    }

    /// Split one sentence into shorter ones. Always returns at least one
    /// element; malformed structured output yields the original sentence.
    async fn split_one(&self, sentence: &str) -> RewriteResult<Vec<String>> {
        let raw = self.rewrite(sentence, prompts::SPLIT_ONE, 0.5).await?;
        Ok(parse_sentence_list(&raw, sentence))
    }

    async fn paraphrase(&self, text: &str, style: ParaphraseStyle) -> RewriteResult<String> {
        self.rewrite(text, &prompts::paraphrase(style.description()), 0.9).await
    }

    /// Ask for a coherent new order. Falls back to the given order when the
    /// response is not a JSON array.
    async fn reorder(&self, sentences: &[String]) -> RewriteResult<Vec<String>> {
        let numbered = sentences
            .iter()
            .enumerate()
            .map(|(i, s)| format!("{}. {}", i + 1, s))
            .collect::<Vec<_>>()
            .join("\n");
        let raw = self.rewrite(&numbered, prompts::REORDER, 0.6).await?;
        match parse_json_list(&raw) {
            Some(list) if !list.is_empty() => Ok(list),
            _ => Ok(sentences.to_vec()),
        }
    }

    async fn add_filler_expressions(&self, text: &str) -> RewriteResult<String> {
        self.rewrite(text, prompts::FILLER_EXPRESSIONS, 0.8).await
    }

    async fn vary_connectors(&self, text: &str) -> RewriteResult<String> {
        self.rewrite(text, prompts::CONNECTOR_VARIATION, 0.7).await
    }
}

/// Interpret a split response: a JSON string array (optionally inside a
/// Markdown code fence), or one sentence per line. An unparsable array, any
/// fenced body that is not an array, or an empty result degrades to `[original]`.
pub fn parse_sentence_list(raw: &str, original: &str) -> Vec<String> {
    let trimmed = raw.trim();
    let fenced = trimmed.starts_with("```");
    let body = strip_code_fence(trimmed);

    let parsed = if fenced || body.starts_with('[') {
        parse_json_list(body).unwrap_or_default()
    } else {
        trimmed
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect()
    };

    if parsed.is_empty() {
        debug!("Split response unusable, keeping original sentence");
        return vec![original.to_string()];
    }
    parsed
}

/// Body of a ```` ``` ```` fenced block, dropping the language tag on the
/// opening line. Unfenced input is returned trimmed.
fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let body = rest.split_once('\n').map_or("", |(_, body)| body).trim_end();
    body.strip_suffix("```").unwrap_or(body).trim()
}

fn parse_json_list(raw: &str) -> Option<Vec<String>> {
    let items: Vec<String> = serde_json::from_str(strip_code_fence(raw)).ok()?;
    Some(
        items
            .into_iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect(),
    )
}


#[cfg(test)]
mod tests {
    use super::*;

    /// Answers every call with a fixed response
    struct Canned(&'static str);

    #[async_trait]
    impl Rewriter for Canned {
        async fn rewrite(&self, _text: &str, _instruction: &str, _creativity: f32) -> RewriteResult<String> {
            Ok(self.0.to_string())
        }
    }

    #[test]
    fn test_parse_json_array() {
        let parsed = parse_sentence_list(r#"["첫 문장.", " 둘째 문장. "]"#, "원문");
        assert_eq!(parsed, vec!["첫 문장.", "둘째 문장."]);
    }

    #[test]
    fn test_parse_line_separated() {
        let parsed = parse_sentence_list("첫 문장.\n\n  둘째 문장.\n", "원문");
        assert_eq!(parsed, vec!["첫 문장.", "둘째 문장."]);
    }

    #[test]
    fn test_parse_malformed_json_keeps_original() {
        assert_eq!(parse_sentence_list(r#"["깨진 배열"#, "원문"), vec!["원문"]);
    }

    #[test]
    fn test_parse_fenced_json_array() {
        let raw = "```json\n[\"첫 문장.\", \"둘째 문장.\"]\n```";
        assert_eq!(parse_sentence_list(raw, "원문 문장."), vec!["첫 문장.", "둘째 문장."]);

        let untagged = "```\n[\"하나.\"]\n```\n";
        assert_eq!(parse_sentence_list(untagged, "원문 문장."), vec!["하나."]);
    }

    #[test]
    fn test_parse_fenced_garbage_keeps_original() {
        let broken = "```json\n[\"깨진 배열\n```";
        assert_eq!(parse_sentence_list(broken, "원문 문장."), vec!["원문 문장."]);

        let prose = "```\n첫 문장.\n둘째 문장.\n```";
        assert_eq!(parse_sentence_list(prose, "원문 문장."), vec!["원문 문장."]);
    }

    #[tokio::test]
    async fn test_reorder_accepts_fenced_json() {
        let rewriter = Canned("```json\n[\"나.\", \"가.\"]\n```");
        let sentences = vec!["가.".to_string(), "나.".to_string()];
        assert_eq!(rewriter.reorder(&sentences).await.unwrap(), vec!["나.", "가."]);
    }

    #[test]
    fn test_parse_empty_keeps_original() {
        assert_eq!(parse_sentence_list("   ", "원문"), vec!["원문"]);
        assert_eq!(parse_sentence_list("[]", "원문"), vec!["원문"]);
    }

    #[tokio::test]
    async fn test_default_split_uses_parser() {
        let rewriter = Canned(r#"["하나.", "둘."]"#);
        let parts = rewriter.split_one("하나, 둘.").await.unwrap();
        assert_eq!(parts, vec!["하나.", "둘."]);
    }

    #[tokio::test]
    async fn test_reorder_falls_back_on_prose() {
        let rewriter = Canned("순서를 바꿀 수 없습니다");
        let sentences = vec!["가.".to_string(), "나.".to_string()];
        assert_eq!(rewriter.reorder(&sentences).await.unwrap(), sentences);

        let rewriter = Canned(r#"["나.", "가."]"#);
        assert_eq!(rewriter.reorder(&sentences).await.unwrap(), vec!["나.", "가."]);
    }

    #[tokio::test]
    async fn test_merge_and_paraphrase_delegate_to_rewrite() {
        let rewriter = Canned("합쳐진 문장.");
        assert_eq!(rewriter.merge_two("가.", "나.").await.unwrap(), "합쳐진 문장.");
        assert_eq!(
            rewriter.paraphrase("원문", ParaphraseStyle::Academic).await.unwrap(),
            "합쳐진 문장."
        );
        assert_eq!(rewriter.add_filler_expressions("원문").await.unwrap(), "합쳐진 문장.");
        assert_eq!(rewriter.vary_connectors("원문").await.unwrap(), "합쳐진 문장.");
    }

    #[tokio::test]
    async fn test_failure_propagates_from_split() {
        let result = testing::FailingRewriter.split_one("문장").await;
        assert!(matches!(result, Err(RewriteError::Api { status: 429, .. })));
    }
}
