//! Preview binary - runs one retrieval and prints the texts
//!
//! Usage:
//!   cargo run --bin preview                      # English, EASY
//!   cargo run --bin preview -- cs GRIND          # Czech, GRIND
//!   cargo run --bin preview -- Czech medium --json
//!
//! Optional environment variables:
//! - GEMINI_API_KEY (without it the sample corpus is used)
//! - GEMINI_MODEL (defaults to gemini-1.5-flash)
//! - GENERATION_TEMPERATURE (defaults to 1.0)

use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;
use wordfuel::config::Config;
use wordfuel::gemini::GeminiClient;
use wordfuel::mode::word_count_for;
use wordfuel::pipeline::{ContentTables, Pipeline, Retrieval};

/// Render a retrieval the way a reader would see it
fn format_retrieval(retrieval: &Retrieval) -> String {
    let mut out = String::new();

    for (i, text) in retrieval.texts.iter().enumerate() {
        out.push_str(&format!(
            "{}. {} - {}\n   {} | {} | {} words\n\n{}\n\n   Themes: {}\n   Motifs: {}\n   {}\n\n",
            i + 1,
            text.title,
            text.source,
            text.text_type,
            text.style,
            text.word_count,
            text.content,
            text.themes,
            text.motifs,
            text.interpretation
        ));
    }

    out
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment from .env file
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("wordfuel=info".parse()?),
        )
        .init();

    // Parse CLI arguments
    let args: Vec<String> = std::env::args().skip(1).collect();
    let as_json = args.iter().any(|arg| arg == "--json");
    let positional: Vec<&str> = args
        .iter()
        .filter(|arg| !arg.starts_with("--"))
        .map(String::as_str)
        .collect();
    let language = positional.first().copied().unwrap_or("en");
    let mode = positional.get(1).copied().unwrap_or("EASY");

    info!("Loading configuration...");
    let config = Config::from_env()?;
    let tables = Arc::new(ContentTables::builtin()?);
    let pipeline = Pipeline::new(GeminiClient::new(&config)?, tables)
        .with_temperature(config.generation_temperature);

    let retrieval = pipeline.retrieve_raw(language, mode).await;

    if as_json {
        let json = serde_json::to_string_pretty(&retrieval).context("Failed to serialize texts")?;
        println!("{}", json);
        return Ok(());
    }

    println!();
    println!("╔══════════════════════════════════════════════════════════════════╗");
    println!("║                        TEXT SELECTION PREVIEW                    ║");
    println!("╠══════════════════════════════════════════════════════════════════╣");
    println!(
        "║ Request: {:56} ║",
        format!("{} / {} ({} words)", language, mode, word_count_for(mode))
    );
    println!("║ Origin: {:57} ║", format!("{:?}", retrieval.origin));
    println!(
        "║ Texts: {:>3}   Total words: {:>4}                                  ║",
        retrieval.texts.len(),
        retrieval.total_word_count
    );
    println!("╚══════════════════════════════════════════════════════════════════╝");
    println!();
    print!("{}", format_retrieval(&retrieval));

    Ok(())
}
