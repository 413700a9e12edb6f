use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

use smudge::pipeline::{EnabledStages, Pipeline, TextAnalysis};
use smudge::reader::{self, AsyncDocumentReader, ReaderConfig};
use smudge::rewriter::openai::{API_KEY_ENV, API_URL_ENV, DEFAULT_API_URL, DEFAULT_MODEL, MODEL_ENV};
use smudge::{compute_metrics, KoreanSegmenter, OpenAiRewriter, RewriterConfig, Segmenter};

#[derive(Parser, Debug)]
#[command(name = "smudge")]
#[command(about = "Rewrite Korean text to break up machine-like sentence and vocabulary patterns")]
#[command(version)]
struct Args {
    /// Input text file
    input_file: PathBuf,

    /// Where to write the transformed text
    #[arg(short, long, default_value = "output.txt")]
    output: PathBuf,

    /// Transformation intensity (0.0-1.0)
    #[arg(long, default_value_t = 0.5)]
    intensity: f64,

    /// Disable the structural stage
    #[arg(long)]
    no_structure: bool,

    /// Disable the vocabulary stage
    #[arg(long)]
    no_vocab: bool,

    /// Disable the noise stage
    #[arg(long)]
    no_noise: bool,

    /// Seed for reproducible random decisions
    #[arg(long)]
    seed: Option<u64>,

    /// Write a JSON before/after report to this path
    #[arg(long)]
    report: Option<PathBuf>,

    /// Print metrics for the input and exit without rewriting
    #[arg(long)]
    analyze_only: bool,

    /// Suppress the progress spinner
    #[arg(long)]
    no_progress: bool,

    /// API key for the rewriting service
    #[arg(long, env = API_KEY_ENV, hide_env_values = true)]
    api_key: Option<String>,

    /// Chat model used for rewrites
    #[arg(long, env = MODEL_ENV, default_value = DEFAULT_MODEL)]
    model: String,

    /// OpenAI-compatible chat-completions endpoint
    #[arg(long, env = API_URL_ENV, default_value = DEFAULT_API_URL)]
    base_url: String,
}

impl Args {
    fn enabled_stages(&self) -> EnabledStages {
        EnabledStages {
            structural: !self.no_structure,
            vocabulary: !self.no_vocab,
            noise: !self.no_noise,
        }
    }
}

fn create_spinner(hidden: bool) -> Result<ProgressBar> {
    if hidden {
        return Ok(ProgressBar::hidden());
    }
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
            .template("{spinner:.green} {msg}")?,
    );
    spinner.enable_steady_tick(Duration::from_millis(100));
    Ok(spinner)
}

#[tokio::main]
async fn main() -> Result<()> {
    // WHY: .env is read before parsing so clap's env fallbacks see its values
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .json()
        .init();

    let args = Args::parse();

    info!(
        input = %args.input_file.display(),
        output = %args.output.display(),
        intensity = args.intensity,
        seed = ?args.seed,
        analyze_only = args.analyze_only,
        "Parsed CLI arguments"
    );

    // WHY: validate input path early to fail fast with clear error
    if !args.input_file.is_file() {
        anyhow::bail!("Input file does not exist: {}", args.input_file.display());
    }

    let document_reader = AsyncDocumentReader::new(ReaderConfig::default());
    let (text, read_stats) = document_reader.read_document(&args.input_file).await?;
    let segmenter = KoreanSegmenter::new()?;

    if args.analyze_only {
        let sentences = segmenter.segment(&text);
        let analysis = TextAnalysis::from_snapshot(compute_metrics(&text, &sentences));
        println!("{}", serde_json::to_string_pretty(&analysis)?);
        if let Some(report_path) = &args.report {
            reader::write_json(report_path, &analysis).await?;
        }
        return Ok(());
    }

    let api_key = args
        .api_key
        .clone()
        .with_context(|| format!("{API_KEY_ENV} not found. Set it in .env or the environment"))?;
    let config = RewriterConfig {
        api_url: args.base_url.clone(),
        model: args.model.clone(),
        ..RewriterConfig::default()
    };
    let rewriter = OpenAiRewriter::new(config, api_key)?;
    info!(model = rewriter.model(), stages = ?args.enabled_stages().ordered(), "Rewriter ready");

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    println!("Processing text ({} chars)...", read_stats.chars_read);

    let spinner = create_spinner(args.no_progress)?;
    let pipeline = Pipeline::new(&rewriter, &segmenter)
        .on_stage(|stage| spinner.set_message(format!("Applying {stage} stage...")));

    let report = match pipeline
        .run_with_report(&text, args.intensity, args.enabled_stages(), &mut rng)
        .await
    {
        Ok(report) => {
            spinner.finish_and_clear();
            report
        }
        Err(e) => {
            spinner.abandon_with_message("Transformation failed");
            return Err(e).context("Transformation failed");
        }
    };

    reader::write_document(&args.output, &report.transformed).await?;
    if let Some(report_path) = &args.report {
        reader::write_json(report_path, &report).await?;
    }

    let summary = &report.summary;
    let applied: Vec<_> = report.applied_transforms.iter().map(|s| s.name()).collect();
    println!("Applied stages: {}", if applied.is_empty() { "none".to_string() } else { applied.join(", ") });
    println!(
        "Sentences: {} -> {}",
        summary.original_sentence_count, summary.transformed_sentence_count
    );
    println!(
        "Average length: {:.2} -> {:.2} words (std {:.2} -> {:.2})",
        summary.original_avg_length,
        summary.transformed_avg_length,
        summary.original_length_std,
        summary.transformed_length_std
    );
    println!("Vocabulary diversity change: {:+.4}", summary.vocabulary_diversity_change);
    println!("\nSuccess! Transformed text saved to: {}", args.output.display());

    Ok(())
}
