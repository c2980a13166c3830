//! plugindex - build a ranked plugin registry from a markdown catalog
//!
//! Usage: `plugindex <catalog.md> <output.json> [overrides.json]`

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use plugindex_core::enrich::{MetadataSource, StaticSource};
use plugindex_core::{Pipeline, PipelineConfig};

/// Log levels
#[derive(Debug, Clone, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_filter_directive(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

/// Log output format
#[derive(Debug, Clone, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[clap(
    name = "plugindex",
    about = "Build an enriched, ranked plugin registry from a curated markdown catalog",
    version
)]
struct Cli {
    /// Markdown catalog to parse
    catalog: PathBuf,

    /// Where to write the registry JSON (overwritten)
    output: PathBuf,

    /// JSON array of override records; these replace catalog records with the same repository
    overrides: Option<PathBuf>,

    /// YAML configuration file
    #[clap(long)]
    config: Option<PathBuf>,

    /// Set log level (RUST_LOG takes precedence when set)
    #[clap(long, default_value = "info")]
    log_level: LogLevel,

    /// Log output format
    #[clap(long, default_value = "text")]
    log_format: LogFormat,

    /// Metadata API base URL
    #[clap(long)]
    api_base: Option<String>,

    /// Environment variable holding the API token
    #[clap(long)]
    token_env: Option<String>,

    /// Per-request timeout in seconds
    #[clap(long)]
    timeout: Option<u64>,

    /// Pause after every metadata request, in milliseconds
    #[clap(long)]
    delay_ms: Option<u64>,

    /// Also enrich override records before merging
    #[clap(long)]
    enrich_overrides: bool,

    /// Skip metadata lookups; every record gets manual-install defaults
    #[clap(long)]
    offline: bool,
}

impl Cli {
    /// Layer CLI flags over file/default config
    fn apply_to(&self, config: &mut PipelineConfig) {
        if let Some(api_base) = &self.api_base {
            config.api_base = api_base.clone();
        }
        if let Some(token_env) = &self.token_env {
            config.token_env = token_env.clone();
        }
        if let Some(timeout) = self.timeout {
            config.timeout_seconds = timeout;
        }
        if let Some(delay_ms) = self.delay_ms {
            config.request_delay_ms = delay_ms;
        }
        if self.enrich_overrides {
            config.enrich_overrides = true;
        }
        if self.offline {
            config.request_delay_ms = 0;
        }
    }
}

/// Initialize tracing with CLI flags. Logs always go to stderr.
fn initialize_tracing(log_level: &LogLevel, log_format: &LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level.to_filter_directive()));

    match log_format {
        LogFormat::Json => {
            tracing_subscriber::fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_writer(std::io::stderr)
                .init();
        }
        LogFormat::Text => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

/// Pick the metadata source for this run
fn build_source(config: &PipelineConfig, offline: bool) -> Result<Box<dyn MetadataSource>> {
    if offline {
        info!("Offline run: skipping metadata lookups");
        return Ok(Box::new(StaticSource::new()));
    }

    #[cfg(feature = "github")]
    {
        let token = config.api_token();
        if token.is_none() {
            warn!(
                "{} is not set; metadata requests use the unauthenticated rate limit",
                config.token_env
            );
        }
        let source = plugindex_core::enrich::GitHubSource::new(&config.api_base, token, config.timeout())
            .context("Failed to set up the GitHub client")?;
        Ok(Box::new(source))
    }

    #[cfg(not(feature = "github"))]
    {
        let _ = config;
        anyhow::bail!("Built without the 'github' feature. Rebuild with --features github or pass --offline")
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version are not errors
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            std::process::exit(code);
        }
    };

    initialize_tracing(&cli.log_level, &cli.log_format);

    let mut config = PipelineConfig::load_or_default(cli.config.as_deref())
        .context("Error loading configuration")?;
    cli.apply_to(&mut config);

    let source = build_source(&config, cli.offline)?;
    let pipeline = Pipeline::new(config, source);

    let report = pipeline
        .run(&cli.catalog, cli.overrides.as_deref(), &cli.output)
        .await
        .context("Error building registry")?;

    if report.overrides > 0 {
        info!("Merged {} override records", report.overrides);
    }
    println!(
        "Successfully generated {} with {} plugins",
        cli.output.display(),
        report.records.len()
    );

    Ok(())
}
