use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;
use std::time::Instant;
use tokio::fs::{self, File};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info, warn};

/// Configuration for document reading
#[derive(Debug, Clone)]
pub struct ReaderConfig {
    /// Buffer size for async reading (default: 8KB)
    pub buffer_size: usize,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self { buffer_size: 8192 }
    }
}

/// Statistics for one document read
#[derive(Debug, Clone, Serialize)]
pub struct ReadStats {
    pub file_path: String,
    pub lines_read: u64,
    pub bytes_read: u64,
    pub chars_read: u64,
    pub duration_ms: u64,
}

/// Reads an input document line by line with buffered async I/O
pub struct AsyncDocumentReader {
    config: ReaderConfig,
}

impl AsyncDocumentReader {
    pub fn new(config: ReaderConfig) -> Self {
        Self { config }
    }

    /// Read the whole document. Line breaks are normalized to `\n` and a
    /// trailing newline is dropped.
    /// WHY: invalid UTF-8 fails the read with the offending line number instead of returning partial text
    pub async fn read_document<P: AsRef<Path>>(&self, file_path: P) -> Result<(String, ReadStats)> {
        let path = file_path.as_ref();
        let start_time = Instant::now();

        debug!("Starting async read of document: {}", path.display());

        let file = File::open(path)
            .await
            .with_context(|| format!("Failed to open input document {}", path.display()))?;

        let reader = BufReader::with_capacity(self.config.buffer_size, file);
        let mut lines = reader.lines();
        let mut text = String::new();
        let mut line_count = 0u64;
        let mut byte_count = 0u64;

        loop {
            match lines.next_line().await {
                Ok(Some(line)) => {
                    byte_count += line.len() as u64 + 1;
                    if line_count > 0 {
                        text.push('\n');
                    }
                    text.push_str(line.trim_end_matches('\r'));
                    line_count += 1;
                }
                Ok(None) => break,
                Err(e) => {
                    let message = format!(
                        "UTF-8 decoding error in {} at line {}: {}",
                        path.display(),
                        line_count + 1,
                        e
                    );
                    warn!("{}", message);
                    anyhow::bail!(message);
                }
            }
        }

        let stats = ReadStats {
            file_path: path.display().to_string(),
            lines_read: line_count,
            bytes_read: byte_count,
            chars_read: text.chars().count() as u64,
            duration_ms: start_time.elapsed().as_millis() as u64,
        };

        info!(
            file = %stats.file_path,
            lines = stats.lines_read,
            bytes = stats.bytes_read,
            chars = stats.chars_read,
            duration_ms = stats.duration_ms,
            "Read input document"
        );

        Ok((text, stats))
    }
}

/// Read a document with the default configuration
pub async fn read_document_async<P: AsRef<Path>>(file_path: P) -> Result<String> {
    let reader = AsyncDocumentReader::new(ReaderConfig::default());
    let (text, _stats) = reader.read_document(file_path).await?;
    Ok(text)
}

/// Write text to `path`, creating parent directories as needed
pub async fn write_document<P: AsRef<Path>>(path: P, text: &str) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).await?;
    }
    fs::write(path, text)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))?;
    debug!(path = %path.display(), chars = text.chars().count(), "Wrote document");
    Ok(())
}

/// Write `value` as pretty-printed JSON
pub async fn write_json<P: AsRef<Path>, T: Serialize>(path: P, value: &T) -> Result<()> {
    let content = serde_json::to_string_pretty(value)?;
    write_document(path, &content).await
}
