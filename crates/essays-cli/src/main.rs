use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use essays_model::{OutputConfig, SiteConfig};

#[derive(Parser, Debug)]
#[command(name = "essays")]
#[command(about = "Fetch an author's essays and convert them to Markdown for typesetting")]
#[command(version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("BUILD_HASH"), ")"))]
struct Cli {
    /// Log level: error, warn, info, debug, trace
    #[arg(long, default_value = "info", value_enum)]
    log_level: LogLevel,

    /// Use UTC timestamps instead of local time
    #[arg(long)]
    utc: bool,

    /// Site to fetch from (scheme and host)
    #[arg(long, default_value = essays_model::DEFAULT_ORIGIN)]
    origin: String,

    /// Listing page path, relative to the origin
    #[arg(long, default_value = essays_model::DEFAULT_LISTING_PATH)]
    listing_path: String,

    /// Directory for the converted essays
    #[arg(short = 'O', long, default_value = essays_model::DEFAULT_OUTPUT_DIR)]
    output_dir: PathBuf,

    /// Manifest listing every written essay, one path per line
    #[arg(short, long, default_value = essays_model::DEFAULT_MANIFEST)]
    manifest: PathBuf,

    /// Title to leave out; repeat for several. Replaces the built-in list.
    #[arg(long = "exclude", value_name = "TITLE")]
    excluded: Vec<String>,

    /// Process only the first N listing entries
    #[arg(long, value_name = "N")]
    limit: Option<usize>,

    /// Also write the run summary as JSON
    #[arg(long, value_name = "PATH")]
    summary_json: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl Cli {
    fn site_config(&self) -> SiteConfig {
        let defaults = SiteConfig::default();
        SiteConfig {
            origin: self.origin.clone(),
            listing_path: self.listing_path.clone(),
            excluded_titles: if self.excluded.is_empty() {
                defaults.excluded_titles.clone()
            } else {
                self.excluded.clone()
            },
            ..defaults
        }
    }

    fn output_config(&self) -> OutputConfig {
        OutputConfig {
            output_dir: self.output_dir.clone(),
            manifest_path: self.manifest.clone(),
            limit: self.limit,
        }
    }
}

fn init_tracing(log_level: LogLevel, utc: bool) {
    // Map log level, suppressing noisy HTML-parsing crates at debug/trace
    let level = match log_level {
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

    if utc {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_timer(tracing_subscriber::fmt::time::ChronoUtc::new(time_format.to_string()))
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_timer(tracing_subscriber::fmt::time::ChronoLocal::new(time_format.to_string()))
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_level, cli.utc);

    let site = cli.site_config();
    let output = cli.output_config();
    tracing::info!(
        origin = %site.origin,
        output_dir = %output.output_dir.display(),
        manifest = %output.manifest_path.display(),
        "Archiving essays"
    );

    let summary = essays_acquire::run(&site, &output).await?;

    if let Some(path) = &cli.summary_json {
        let json = summary.to_json()?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write summary {}", path.display()))?;
        tracing::info!(path = %path.display(), "Wrote run summary");
    }

    if !summary.skipped.is_empty() {
        tracing::warn!(
            count = summary.skipped.len(),
            titles = ?summary.skipped,
            "Some essays were skipped"
        );
    }

    Ok(())
}
