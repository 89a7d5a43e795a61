//! moodlog — journal CLI
//!
//! Analyze notes, record them, and review history and the weekly summary.
//!
//! Build: `cargo build --bin moodlog --features cli`

use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use moodlog::{
    AnalysisResult, Config, Journal, JournalRecord, JsonFileStore, Secrets, SentimentAnalyzer,
    SentimentLabel, WeeklySummary,
};

/// moodlog journal CLI
#[derive(Parser)]
#[command(name = "moodlog")]
#[command(version = moodlog::PKG_VERSION)]
#[command(about = "Journal with sentiment analysis")]
struct Args {
    /// Path to configuration file.
    #[arg(short, long, env = "MOODLOG_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Analyze a note without recording it
    Analyze {
        /// Note text (or omit to read from stdin)
        text: Option<String>,
    },

    /// Analyze a note and add it to the journal
    Add {
        /// Note text (or omit to read from stdin)
        text: Option<String>,
    },

    /// List recorded entries, newest first
    History {
        /// Show at most this many entries
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Show per-sentiment counts for the last seven days
    Weekly,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialise tracing (default: warn for CLI; override with RUST_LOG).
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    tracing::debug!(
        version = %moodlog::version_string(),
        git = moodlog::built_from_checkout(),
        "moodlog starting"
    );

    let config = Config::load(args.config.as_deref())?;
    let secrets = Secrets::load()?;
    let analyzer = SentimentAnalyzer::from_config(&config, &secrets)?;

    match args.command {
        Command::Analyze { text } => {
            let text = resolve_text(text, "analyze")?;
            let result = analyzer.analyze(&text).await?;
            print_result(&result);
        }

        Command::Add { text } => {
            let text = resolve_text(text, "add")?;
            let record = open_journal(&config, analyzer)?.submit(&text).await?;
            print_record(&record);
        }

        Command::History { limit } => {
            let records = open_journal(&config, analyzer)?.history().await?;
            if records.is_empty() {
                println!("no entries yet");
            }
            for record in records.iter().take(limit.unwrap_or(usize::MAX)) {
                print_record(record);
                println!();
            }
        }

        Command::Weekly => {
            let summary = open_journal(&config, analyzer)?
                .weekly_summary(chrono::Utc::now())
                .await?;
            print_weekly(&summary);
        }
    }

    Ok(())
}

/// Journal over the configured entries file.
fn open_journal(
    config: &Config,
    analyzer: SentimentAnalyzer,
) -> moodlog::Result<Journal<JsonFileStore>> {
    let store = JsonFileStore::new(config.storage.entries_path()?);
    Ok(Journal::new(analyzer, store))
}

/// Resolve text input from an optional CLI argument and/or stdin.
///
/// Combination rules:
/// - arg only → arg
/// - stdin only → stdin
/// - both → `"{arg}\n\n{stdin}"`
/// - neither → error
fn resolve_text(arg: Option<String>, command: &str) -> Result<String, Box<dyn std::error::Error>> {
    let stdin_is_pipe = !io::stdin().is_terminal();
    let stdin_text = if stdin_is_pipe {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        let trimmed = buf.trim().to_string();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed)
        }
    } else {
        None
    };

    match (arg, stdin_text) {
        (Some(a), Some(s)) => Ok(format!("{a}\n\n{s}")),
        (Some(a), None) => Ok(a),
        (None, Some(s)) => Ok(s),
        (None, None) => {
            Err(format!("{command}: no input provided (pass text as argument or via stdin)").into())
        }
    }
}

fn print_result(result: &AnalysisResult) {
    println!(
        "sentiment:  {} {}",
        result.sentiment.emoji(),
        result.sentiment.display_name()
    );
    println!("summary:    {}", result.summary);
    println!("suggestion: {}", result.suggestion);
}

fn print_record(record: &JournalRecord) {
    println!(
        "{} {} [{}]",
        record.sentiment.emoji(),
        record.created_at.format("%Y-%m-%d %H:%M"),
        record.id
    );
    println!("  {}", record.text);
    println!("  summary:    {}", record.summary);
    println!("  suggestion: {}", record.suggestion);
}

fn print_weekly(summary: &WeeklySummary) {
    if summary.is_empty() {
        println!("no entries in the last 7 days");
        return;
    }
    println!("last 7 days: {} entries", summary.total);
    for label in SentimentLabel::ALL {
        println!(
            "  {} {:<8} {}",
            label.emoji(),
            label.display_name(),
            summary.count(label)
        );
    }
}
