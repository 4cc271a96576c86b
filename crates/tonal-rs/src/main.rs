//! Analyze the sentiment of a piece of text with a local model and print
//! the result.
//!
//! Talks to a text-generation-inference server (default
//! `http://127.0.0.1:8080`, or `$TONAL_ENDPOINT`).
//!
//! # Examples
//!
//! ```sh
//! # Basic request
//! tonal --text "I love this!"
//!
//! # Pipe content from stdin, print the JSON envelope
//! cat review.txt | tonal --stdin --json
//!
//! # Also show the best-effort parsed label
//! tonal --text "The delivery was late again." --parse
//!
//! # Inspect the prompt without calling the model
//! tonal --text "meh" --print-prompt
//! ```

use std::io::{self, Read};
use std::process;
use std::sync::Arc;

use clap::Parser;
use tonal_rs::client::DEFAULT_MAX_NEW_TOKENS;
use tonal_rs::logging::init_tracing;
use tonal_rs::{SentimentAnalyzer, ServiceConfig, parse_sentiment};
use tracing::info;

/// Analyze the sentiment of a piece of text with a local model.
#[derive(Parser)]
#[command(name = "tonal")]
struct Cli {
    // ── Input ──────────────────────────────────────────────────
    /// Text to analyze
    #[arg(long)]
    text: Option<String>,

    /// Read text from stdin
    #[arg(long)]
    stdin: bool,

    // ── Model server ───────────────────────────────────────────
    /// Model server base URL (defaults to $TONAL_ENDPOINT, then http://127.0.0.1:8080)
    #[arg(long)]
    endpoint: Option<String>,

    /// Maximum tokens to generate
    #[arg(long, default_value_t = DEFAULT_MAX_NEW_TOKENS)]
    max_new_tokens: u32,

    // ── Output mode ────────────────────────────────────────────
    /// Print the response envelope as JSON
    #[arg(long)]
    json: bool,

    /// Also print the best-effort parsed label and explanation
    #[arg(long)]
    parse: bool,

    /// Print the formatted prompt and exit without calling the model
    #[arg(long)]
    print_prompt: bool,

    /// Enable debug logging
    #[arg(long, short)]
    verbose: bool,
}

fn read_stdin_content() -> Result<String, String> {
    let mut buf = String::new();
    io::stdin()
        .read_to_string(&mut buf)
        .map_err(|e| format!("failed to read stdin: {e}"))?;
    Ok(buf)
}

fn build_text(cli: &Cli) -> Result<String, String> {
    let stdin_text = if cli.stdin {
        Some(read_stdin_content()?)
    } else {
        None
    };

    match (&cli.text, stdin_text) {
        (Some(text), Some(piped)) => Ok(format!("{text}\n\n{piped}")),
        (Some(text), None) => Ok(text.clone()),
        (None, Some(piped)) => Ok(piped),
        (None, None) => Err("provide --text, --stdin, or both".to_string()),
    }
}

async fn run(cli: Cli) -> Result<(), String> {
    let text = build_text(&cli)?;

    let config = ServiceConfig {
        max_new_tokens: cli.max_new_tokens,
        ..ServiceConfig::from_env()
    }
    .with_endpoint_override(cli.endpoint.clone());

    let client = config.build_client()?;
    let analyzer = SentimentAnalyzer::new(Arc::new(client));

    if cli.print_prompt {
        print!("{}", analyzer.prompt_for(&text));
        return Ok(());
    }

    info!("Using model {} at {}", config.model, config.endpoint);
    let envelope = analyzer.analyze(&text).await?;

    if cli.json {
        let json = serde_json::to_string_pretty(&envelope)
            .map_err(|e| format!("failed to serialize result: {e}"))?;
        println!("{json}");
    } else {
        println!("{}", envelope.result.raw_output);
    }

    if cli.parse {
        match parse_sentiment(&envelope.result.raw_output) {
            Some(parsed) => {
                println!("\n--- parsed (best effort) ---");
                println!("label: {}", parsed.label);
                if let Some(explanation) = parsed.explanation {
                    println!("explanation: {explanation}");
                }
            }
            None => println!("\n--- parsed (best effort) ---\noutput did not contain a recognised label"),
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
