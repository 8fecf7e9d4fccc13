use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use captain_acquire::fetch::{DEFAULT_BASE_URL, DEFAULT_DELAY, DEFAULT_TIMEOUT, DEFAULT_USER_AGENT};
use captain_acquire::{FetchConfig, Fetcher};
use captain_model::PlayerId;
use captain_parse::NameRules;
use clap::Parser;

mod report;

#[derive(Parser)]
#[command(name = "captain-gang")]
#[command(about = "Find the teams a league player captains and count who played on them")]
#[command(version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("BUILD_HASH"), ")"))]
struct Cli {
    /// Player ID of the captain to analyze (e.g., 302463)
    #[arg(short, long)]
    captain: PlayerId,

    /// Report format
    #[arg(short, long, default_value = "text", value_enum)]
    format: OutputFormat,

    /// League site root the page templates are joined onto
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Pause after each request, in milliseconds
    #[arg(long, default_value_t = DEFAULT_DELAY.as_millis() as u64)]
    delay_ms: u64,

    /// Per-request timeout, in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT.as_secs())]
    timeout_secs: u64,

    /// JSON file overriding the name discard rules (min_len, skip_words, stop_words, reject_all_caps)
    #[arg(long)]
    name_rules: Option<PathBuf>,

    /// Log level: error, warn, info, debug, trace
    #[arg(long, default_value = "info", value_enum)]
    log_level: LogLevel,

    /// Use UTC timestamps instead of local time
    #[arg(long)]
    utc: bool,
}

#[derive(Clone, clap::ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Clone, clap::ValueEnum)]
enum OutputFormat {
    /// Human-readable summary
    Text,
    /// The full report as pretty-printed JSON
    Json,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level, cli.utc);

    let rules = match &cli.name_rules {
        Some(path) => load_rules(path)?,
        None => NameRules::default(),
    };

    let config = FetchConfig {
        base_url: cli.base_url.clone(),
        user_agent: DEFAULT_USER_AGENT.to_string(),
        timeout: Duration::from_secs(cli.timeout_secs),
        delay: Duration::from_millis(cli.delay_ms),
    };
    let fetcher = Fetcher::new(&config)?;

    let report = captain_acquire::analyze(&fetcher, &config, &rules, &cli.captain).await;

    match cli.format {
        OutputFormat::Text => print!("{}", report::TextReport(&report)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    Ok(())
}

fn init_logging(level: &LogLevel, utc: bool) {
    // Map log level, suppressing noisy HTML-parsing crates at debug/trace
    let level = match level {
        LogLevel::Error => "error",
        LogLevel::Warn  => "warn",
        LogLevel::Info  => "info",
        LogLevel::Debug => "debug,selectors=warn,html5ever=warn",
        LogLevel::Trace => "trace,selectors=warn,html5ever=warn",
    };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    // Timestamp format: 2026-02-14 19:44:09.123 -08:00
    let time_format = "%Y-%m-%d %H:%M:%S%.3f %:z";

    // Logs go to stderr so the report on stdout can be piped
    if utc {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .with_timer(tracing_subscriber::fmt::time::ChronoUtc::new(time_format.to_string()))
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .with_timer(tracing_subscriber::fmt::time::ChronoLocal::new(time_format.to_string()))
            .init();
    }
}

fn load_rules(path: &Path) -> Result<NameRules> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read name rules from {}", path.display()))?;
    let rules = NameRules::from_json(&contents)
        .with_context(|| format!("Failed to parse name rules in {}", path.display()))?;
    tracing::info!(
        path = %path.display(),
        skip_words = rules.skip_words.len(),
        stop_words = rules.stop_words.len(),
        "Loaded name rules"
    );
    Ok(rules)
}
