// Integration test utilities and common code
// WHY: Centralized utilities avoid duplication across integration tests
#![allow(dead_code)]

use async_trait::async_trait;
use smudge::rewriter::prompts;
use smudge::{RewriteError, RewriteResult, Rewriter};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::TempDir;

/// One call seen by [`FakeRewriter`]
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub text: String,
    pub instruction: String,
    pub creativity: f32,
}

/// Scripted stand-in for the rewriting service. Only `rewrite` is
/// implemented, so merge, split and reorder go through the trait's default
/// methods and the shared response parsing.
///
/// - split requests answer with a JSON array split on ", "
/// - merge requests join the two sentences with "그리고"
/// - everything else echoes the text back
#[derive(Default)]
pub struct FakeRewriter {
    calls: Mutex<Vec<RecordedCall>>,
}

impl FakeRewriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().expect("call log poisoned").clone()
    }

    pub fn count_instruction(&self, instruction: &str) -> usize {
        self.calls().iter().filter(|c| c.instruction == instruction).count()
    }
}

#[async_trait]
impl Rewriter for FakeRewriter {
    async fn rewrite(&self, text: &str, instruction: &str, creativity: f32) -> RewriteResult<String> {
        self.calls.lock().expect("call log poisoned").push(RecordedCall {
            text: text.to_string(),
            instruction: instruction.to_string(),
            creativity,
        });

        if instruction == prompts::SPLIT_ONE {
            let parts: Vec<&str> = text.split(", ").collect();
            return Ok(serde_json::to_string(&parts).expect("string list serializes"));
        }

        if instruction == prompts::MERGE_TWO {
            let mut lines = text.lines();
            let first = lines.next().and_then(|l| l.strip_prefix("문장1: ")).unwrap_or_default();
            let second = lines.next().and_then(|l| l.strip_prefix("문장2: ")).unwrap_or_default();
            return Ok(format!("{} 그리고 {}", first.trim_end_matches('.'), second));
        }

        Ok(text.to_string())
    }
}

/// Fails every call, as an unreachable or rate-limited service would
pub struct UnavailableRewriter;

#[async_trait]
impl Rewriter for UnavailableRewriter {
    async fn rewrite(&self, _text: &str, _instruction: &str, _creativity: f32) -> RewriteResult<String> {
        Err(RewriteError::Api { status: 503, message: "service unavailable".to_string() })
    }
}

/// Temporary directory holding input documents for a test
pub struct TestFixture {
    pub temp_dir: TempDir,
    pub root_path: PathBuf,
}

impl TestFixture {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root_path = temp_dir.path().to_path_buf();
        Self { temp_dir, root_path }
    }

    /// Write a document relative to the fixture root
    pub fn create_document<P: AsRef<Path>>(&self, relative_path: P, content: &str) -> PathBuf {
        let file_path = self.root_path.join(relative_path);
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        fs::write(&file_path, content).expect("Failed to write test file");
        file_path
    }
}
