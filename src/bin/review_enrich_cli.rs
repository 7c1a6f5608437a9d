//! review-enrich CLI — 手动运行评论增强管线的命令行工具
//!
//! Usage:
//!   review-enrich-cli enrich <rating> [text...]                   Enrich one review, print JSON
//!   review-enrich-cli submit --rating <n> [--name <s>] [--text <s>] Run the full service in memory
//!   review-enrich-cli config                                      Show resolved configuration

use std::sync::Arc;

use anyhow::{anyhow, bail, Context, Result};
use review_enrich::config::GeneratorConfig;
use review_enrich::{
    Enricher, ListQuery, MemoryReviewStore, Rating, RawSubmission, ReviewService,
    ReviewSubmission, TextGenClientBuilder,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    init_tracing();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        print_usage();
        std::process::exit(1);
    }

    let outcome = match args[1].as_str() {
        "enrich" => cmd_enrich(&args[2..]).await,
        "submit" => cmd_submit(&args[2..]).await,
        "config" => cmd_config(),
        "version" | "--version" | "-V" => {
            cmd_version();
            Ok(())
        }
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        other => {
            eprintln!("Unknown command: {other}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    };

    if let Err(e) = outcome {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("review_enrich=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_usage() {
    println!(
        r#"review-enrich-cli — review enrichment pipeline

USAGE:
    review-enrich-cli <COMMAND> [OPTIONS]

COMMANDS:
    enrich <rating> [text...]                   Enrich one review and print the result as JSON
    submit --rating <n> [--name <s>] [--text <s>]
                                                Validate, enrich and store in memory, then print
                                                the receipt and the admin listing
    config                                      Show resolved configuration (key redacted)
    version                                     Show version information
    help                                        Show this help message

ENVIRONMENT:
    REVIEW_AI_API_KEY           Backend credential; without it only fallback content is produced
    REVIEW_AI_ENDPOINT          Completion endpoint URL
    REVIEW_AI_MODEL             Model identifier
    REVIEW_AI_TIMEOUT_SECS      Per-attempt deadline
    REVIEW_AI_MAX_RETRIES       Retry budget per generation
    RUST_LOG                    Log filter (default review_enrich=info)"#
    );
}

fn cmd_version() {
    println!("review-enrich-cli {}", env!("CARGO_PKG_VERSION"));
}

fn build_enricher() -> Result<Enricher> {
    let config = GeneratorConfig::from_env().context("reading configuration")?;
    if !config.has_credential() {
        eprintln!("note: REVIEW_AI_API_KEY is not set, using fallback content only");
    }
    let client = TextGenClientBuilder::from_config(config)
        .build()
        .context("building text-generation client")?;
    Ok(Enricher::new(Arc::new(client)))
}

async fn cmd_enrich(args: &[String]) -> Result<()> {
    let rating_arg = args
        .first()
        .ok_or_else(|| anyhow!("enrich requires a rating (1-5)"))?;
    let rating = rating_arg
        .parse::<u8>()
        .ok()
        .and_then(Rating::new)
        .ok_or_else(|| anyhow!("rating must be an integer between 1 and 5, got {rating_arg}"))?;
    let text = args[1..].join(" ");

    let enricher = build_enricher()?;
    let result = enricher.enrich(&ReviewSubmission::new(rating, text)).await;
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .map(|s| s.as_str())
}

async fn cmd_submit(args: &[String]) -> Result<()> {
    let Some(rating) = flag_value(args, "--rating") else {
        bail!("submit requires --rating <n>");
    };
    let rating: i64 = rating
        .parse()
        .map_err(|_| anyhow!("--rating must be an integer, got {rating}"))?;

    let mut raw = RawSubmission::new(rating);
    if let Some(name) = flag_value(args, "--name") {
        raw = raw.name(name);
    }
    if let Some(text) = flag_value(args, "--text") {
        raw = raw.review_text(text);
    }

    let service = ReviewService::new(build_enricher()?, Arc::new(MemoryReviewStore::new()));
    let receipt = service.submit(raw).await?;
    println!("{}", serde_json::to_string_pretty(&receipt)?);

    let listing = service.list(ListQuery::default()).await?;
    println!("{}", serde_json::to_string_pretty(&listing)?);
    Ok(())
}

fn cmd_config() -> Result<()> {
    let config = GeneratorConfig::from_env()?;
    println!("{:#?}", config);
    Ok(())
}
