use std::io::Read;
use std::time::Duration;

use chrono::Utc;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::EnvFilter;

use sentiscope::models::{AnalysisRequest, AnalysisResult};
use sentiscope::report::{completion_message, format_markdown, format_text};
use sentiscope::samples::{find_sample, SAMPLES};
use sentiscope::{
    AnalysisPipeline, ChatCompletionProvider, Config, FirecrawlFetcher, PipelineConfig,
};

#[derive(Parser, Debug)]
#[command(name = "sentiscope")]
#[command(version = "0.1.0")]
#[command(about = "Analyze the sentiment of text or of a web page's main content")]
struct Args {
    /// Text to analyze, or a URL to fetch and analyze
    input: Option<String>,

    /// Read the input from a file
    #[arg(long, conflicts_with = "input")]
    file: Option<String>,

    /// Analyze one of the bundled sample texts
    #[arg(long, conflicts_with_all = ["input", "file"])]
    sample: Option<String>,

    /// List the bundled sample texts and exit
    #[arg(long)]
    list_samples: bool,

    /// Output format (json, text, markdown)
    #[arg(short, long, default_value = "text")]
    format: String,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    output: Option<String>,

    /// Override the model identifier from LLM_MODEL
    #[arg(long)]
    model: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("sentiscope=info".parse()?)
                .add_directive("reqwest=warn".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if args.list_samples {
        for sample in &SAMPLES {
            println!("{:<16} {}", sample.name, sample.label);
        }
        return Ok(());
    }

    let raw_input = read_input(&args)?;
    let config = Config::from_env()?;

    let fetcher = FirecrawlFetcher::new(
        config.firecrawl_api_key.clone(),
        config.firecrawl_api_url.clone(),
        config.scrape_wait_ms,
    )?;
    let llm = ChatCompletionProvider::new(
        config.llm_api_key.clone(),
        config.llm_api_url.clone(),
        args.model.clone().unwrap_or_else(|| config.llm_model.clone()),
        config.llm_temperature,
    )?;
    let pipeline = AnalysisPipeline::new(fetcher, llm, PipelineConfig::from(&config));

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    spinner.set_message("Analyzing...");
    spinner.enable_steady_tick(Duration::from_millis(100));

    let request = AnalysisRequest::new(raw_input);
    let outcome = pipeline.run_request(&request).await;
    spinner.finish_and_clear();

    match outcome {
        Ok(result) => {
            tracing::info!("{}", completion_message(&result));
            output_result(&result, &args)?;
            Ok(())
        }
        Err(e) => {
            eprintln!("Analysis failed: {}", e);
            if e.is_retryable() {
                eprintln!("This is usually temporary; try again shortly.");
            }
            std::process::exit(1);
        }
    }
}

fn read_input(args: &Args) -> anyhow::Result<String> {
    if let Some(ref input) = args.input {
        return Ok(input.clone());
    }

    if let Some(ref path) = args.file {
        return Ok(std::fs::read_to_string(path)?);
    }

    if let Some(ref name) = args.sample {
        let sample = find_sample(name).ok_or_else(|| {
            anyhow::anyhow!("Unknown sample '{}'. Use --list-samples to see the options.", name)
        })?;
        tracing::info!("Using sample: {}", sample.label);
        return Ok(sample.text.to_string());
    }

    let mut buffer = String::new();
    std::io::stdin().read_to_string(&mut buffer)?;
    Ok(buffer)
}

fn output_result(result: &AnalysisResult, args: &Args) -> anyhow::Result<()> {
    let analyzed_at = Utc::now();
    let output = match args.format.as_str() {
        "json" => serde_json::to_string_pretty(result)?,
        "markdown" => format_markdown(result, analyzed_at),
        _ => format_text(result, analyzed_at),
    };

    if let Some(ref path) = args.output {
        std::fs::write(path, &output)?;
        tracing::info!("Output written to: {}", path);
    } else {
        println!("{}", output);
    }

    Ok(())
}
