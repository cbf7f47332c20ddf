//! CLI entry point for the sidewalk barrier risk ranker.
//!
//! Provides subcommands for ranking neighborhoods from a barrier survey and
//! for summarizing the survey's barrier composition.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use sidewalk_risk::clean::clean;
use sidewalk_risk::config::{MissingNeighborhoodPolicy, PipelineConfig};
use sidewalk_risk::fetch::load_source;
use sidewalk_risk::normalize::normalize;
use sidewalk_risk::output::{
    log_composition, log_insights, print_json, print_pretty, print_top_table, write_hotspots,
    write_ranked_csv,
};
use sidewalk_risk::parser::parse_csv;
use sidewalk_risk::pipeline::run_source;
use sidewalk_risk::stats::BarrierComposition;
use std::ffi::OsStr;
use std::path::Path;
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "sidewalk_risk")]
#[command(about = "Rank neighborhoods by sidewalk accessibility barriers", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Clean the survey, rank neighborhoods and export the results
    Analyze {
        /// Path to CSV (optionally .gz) or URL to fetch
        #[arg(value_name = "FILE_OR_URL")]
        source: String,

        /// CSV file to write the full ranked table to
        #[arg(short, long, default_value = "neighborhood_barrier_stats.csv")]
        output: String,

        /// Optional: GeoJSON file to write severe-barrier hotspots to
        #[arg(long)]
        hotspots: Option<String>,

        /// Optional: JSON config file
        #[arg(short, long)]
        config: Option<String>,

        /// Number of neighborhoods in the headline table
        #[arg(short = 'n', long)]
        top: Option<usize>,

        /// What to do with barriers that have no neighborhood
        #[arg(long, value_enum)]
        missing_neighborhood: Option<MissingNeighborhoodPolicy>,

        /// Also print the full ranking as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Report the permanence split and most common barrier types
    Summary {
        /// Path to CSV (optionally .gz) or URL to fetch
        #[arg(value_name = "FILE_OR_URL")]
        source: String,

        /// Optional: JSON config file
        #[arg(short, long)]
        config: Option<String>,

        /// Number of barrier types to list
        #[arg(short = 'k', long)]
        top_label_types: Option<usize>,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/sidewalk_risk.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("sidewalk_risk.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            source,
            output,
            hotspots,
            config,
            top,
            missing_neighborhood,
            json,
        } => {
            let mut config = PipelineConfig::load_or_default(config.as_deref())?;
            if let Some(top) = top {
                config.top_n = top;
            }
            if let Some(policy) = missing_neighborhood {
                config.missing_neighborhood = policy;
            }

            let run = run_source(&source, &config)
                .with_context(|| format!("pipeline failed for '{source}'"))?;

            info!(
                loaded = run.loaded,
                imputed = run.cleaning.imputed,
                cleaned = run.cleaning.remaining(),
                without_neighborhood = run.without_neighborhood,
                neighborhoods = run.report.len(),
                "Pipeline complete"
            );

            print_pretty(&run.report);
            print_top_table(&run.report);
            log_insights(&run.report);
            log_composition(&BarrierComposition::from_records(
                &run.cleaning.records,
                config.top_label_types,
            ));

            write_ranked_csv(&output, &run.report)
                .with_context(|| format!("failed to write '{output}'"))?;

            if let Some(path) = hotspots {
                write_hotspots(
                    &path,
                    &run.cleaning.records,
                    config.severe_threshold,
                    config.max_hotspots,
                )
                .with_context(|| format!("failed to write '{path}'"))?;
            }

            if json {
                print_json(&run.report)?;
            }
        }
        Commands::Summary {
            source,
            config,
            top_label_types,
        } => {
            let config = PipelineConfig::load_or_default(config.as_deref())?;
            let top_k = top_label_types.unwrap_or(config.top_label_types);

            let bytes = load_source(&source)?;
            let records = normalize(&parse_csv(&bytes)?)?;
            let cleaning = clean(&records)?;

            log_composition(&BarrierComposition::from_records(&cleaning.records, top_k));
        }
    }

    Ok(())
}
