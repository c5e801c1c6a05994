//! stay-search - rank accommodation listings against free-text queries
//!
//! Development harness around `staybook-search`: reads a JSON corpus and
//! prints ranked results, score breakdowns or filtered listings.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use staybook_cli::output::Status;
use staybook_core::config::Config;
use staybook_core::error::exit_codes;
use staybook_search::{AccommodationType, SearchEngine, SearchError, SearchFilter};
use staybook_telemetry::TelemetryConfig;
use std::path::PathBuf;
use std::process::ExitCode;

mod commands;
mod corpus;

#[derive(Parser)]
#[command(name = "stay-search")]
#[command(about = "Rank accommodation listings against free-text queries")]
#[command(version)]
struct Cli {
    /// Path to a staybook.toml configuration file
    #[arg(short, long, global = true, env = "STAYBOOK_CONFIG")]
    config: Option<String>,

    /// Print machine-readable JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Print collected timing metrics to stderr when done
    #[arg(long, global = true)]
    metrics: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank the corpus against a query
    Rank {
        /// Free-text query, e.g. "khách sạn 3 sao Đà Nẵng"
        query: String,

        /// JSON array of listings ("-" for stdin)
        #[arg(long)]
        corpus: PathBuf,

        /// Maximum number of results to print (0 for all)
        #[arg(short = 'n', long, default_value = "10")]
        limit: usize,

        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Show the per-signal score of one listing
    Explain {
        /// Free-text query
        query: String,

        /// Listing id
        id: u64,

        /// JSON array of listings ("-" for stdin)
        #[arg(long)]
        corpus: PathBuf,
    },

    /// Show the property type and star rating read from a query
    Parse {
        /// Free-text query
        query: String,
    },

    /// List listings matching structured filters, without ranking
    Filter {
        /// JSON array of listings ("-" for stdin)
        #[arg(long)]
        corpus: PathBuf,

        /// Maximum number of listings to print (0 for all)
        #[arg(short = 'n', long, default_value = "20")]
        limit: usize,

        #[command(flatten)]
        filter: FilterArgs,
    },
}

/// Structured filter flags shared by `rank` and `filter`
#[derive(Args, Debug, Default)]
struct FilterArgs {
    /// Property type (hotel, homestay, villa or 0/1/2)
    #[arg(long = "type")]
    kind: Option<AccommodationType>,

    /// Listing status code
    #[arg(long)]
    status: Option<i32>,

    /// Province contains this text (accents ignored)
    #[arg(long)]
    province: Option<String>,

    /// District contains this text (accents ignored)
    #[arg(long)]
    district: Option<String>,

    /// Approximate listing name
    #[arg(long)]
    name: Option<String>,

    /// Star category
    #[arg(long)]
    stars: Option<u32>,

    /// Number of beds
    #[arg(long)]
    beds: Option<u32>,

    /// Number of bathrooms
    #[arg(long)]
    bathrooms: Option<u32>,

    /// Guest capacity
    #[arg(long)]
    people: Option<u32>,

    /// Benefit id; repeat to accept any of several
    #[arg(long = "benefit")]
    benefit_ids: Vec<u64>,
}

impl From<FilterArgs> for SearchFilter {
    fn from(args: FilterArgs) -> Self {
        SearchFilter {
            kind: args.kind,
            status: args.status,
            province: args.province,
            district: args.district,
            name: args.name,
            star_category: args.stars,
            num_bed: args.beds,
            num_tolet: args.bathrooms,
            people: args.people,
            benefit_ids: args.benefit_ids,
        }
    }
}

/// Output options shared by every command
struct Output {
    json: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            Status::error(&format!("{:#}", e));
            ExitCode::from(exit_code(&e) as u8)
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref())?;

    let logging = &config.schema.logging;
    staybook_telemetry::init_with_config(TelemetryConfig {
        log_level: if cli.verbose { "debug".to_string() } else { logging.level.clone() },
        json: logging.json,
        ..Default::default()
    })?;

    if let Some(path) = &config.path {
        tracing::debug!(path = %path, "Using configuration file");
    }

    let engine = SearchEngine::new(config.schema.search.clone())?;
    let out = Output { json: cli.json };

    let result = match cli.command {
        Commands::Rank { query, corpus, limit, filter } => {
            commands::rank(&engine, &query, &corpus, filter.into(), limit, &out)
        }
        Commands::Explain { query, id, corpus } => commands::explain(&engine, &query, id, &corpus, &out),
        Commands::Parse { query } => commands::parse(&engine, &query, &out),
        Commands::Filter { corpus, limit, filter } => {
            commands::filter(&engine, &corpus, &filter.into(), limit, &out)
        }
    };

    if cli.metrics {
        eprintln!("{}", serde_json::to_string_pretty(&staybook_telemetry::metrics().export_json())?);
    }

    result
}

/// Map an error to the process exit code of its category.
fn exit_code(err: &anyhow::Error) -> i32 {
    if let Some(core) = err.downcast_ref::<staybook_core::Error>() {
        return i32::from(core);
    }
    if let Some(SearchError::Config(core)) = err.downcast_ref::<SearchError>() {
        return i32::from(core);
    }
    exit_codes::FAILURE
}
