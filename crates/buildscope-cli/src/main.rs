mod logging;

use std::path::{Path, PathBuf};

use buildscope_core::fuzzy::{approximately_equals, fuzzy_score, MetricOptionSet, Tolerance};
use buildscope_core::list::{Partition, RecordList};
use buildscope_core::metrics::MetricTag;
use buildscope_core::records::{AssetEntry, AuxTable};
use buildscope_core::search::SearchMode;
use buildscope_core::sort::{SortField, SortOrder, SortSpec};
use buildscope_core::{AssetView, BrowserConfig};
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, info};

#[derive(Parser, Debug)]
#[command(name = "buildscope")]
#[command(about = "Search, sort and score the assets of a build report")]
#[command(version)]
struct Args {
    /// JSON records file: {"all": [...], "categories": [[...], ...], "labels": [...]}
    #[arg(long, global = true)]
    records: Option<PathBuf>,

    /// JSON configuration file (missing keys keep their defaults)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fuzzy score between two strings
    Score {
        source: String,
        target: String,
        /// Metric to include (repeatable or comma separated)
        #[arg(long = "metric", value_delimiter = ',')]
        metrics: Vec<MetricTag>,
        #[arg(long)]
        tolerance: Option<Tolerance>,
        #[arg(long)]
        case_sensitive: bool,
    },
    /// Search records by name
    Search {
        query: String,
        #[arg(long)]
        mode: Option<SearchMode>,
        #[arg(long)]
        filename_only: bool,
        #[arg(long)]
        case_sensitive: bool,
        /// Category index, -1 for all records
        #[arg(long, default_value_t = -1, allow_negative_numbers = true)]
        partition: i64,
    },
    /// Sort records by a field
    Sort {
        field: SortField,
        #[arg(long, default_value = "desc")]
        order: SortOrder,
        #[arg(long, default_value_t = -1, allow_negative_numbers = true)]
        partition: i64,
    },
    /// Largest records with size percentages
    Top {
        #[arg(long)]
        count: Option<usize>,
    },
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid JSON in {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("--records is required for this command")]
    MissingRecords,

    #[error(transparent)]
    Core(#[from] buildscope_core::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Deserialize)]
struct RecordsFile {
    all: Vec<AssetEntry>,
    #[serde(default)]
    categories: Vec<Vec<AssetEntry>>,
    #[serde(default)]
    labels: Vec<String>,
}

#[derive(Debug, Serialize)]
struct Listing<'a> {
    partition: Partition,
    total: usize,
    records: &'a [AssetEntry],
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, CliError> {
    let text = std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| CliError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Config file, then `BUILDSCOPE_*` environment overrides
fn load_config(path: Option<&Path>) -> Result<BrowserConfig, CliError> {
    let mut config = match path {
        Some(path) => read_json(path)?,
        None => BrowserConfig::default(),
    };

    if let Some(mode) = std::env::var("BUILDSCOPE_SEARCH_MODE")
        .ok()
        .and_then(|s| s.parse().ok())
    {
        config.search.mode = mode;
    }
    if let Some(count) = std::env::var("BUILDSCOPE_TOP_LARGEST")
        .ok()
        .and_then(|s| s.parse().ok())
    {
        config.list.number_of_top_largest = count;
    }

    debug!(?config, "configuration loaded");
    Ok(config)
}

fn load_list(
    path: Option<&Path>,
    config: &BrowserConfig,
    partition: Partition,
) -> Result<RecordList<AssetEntry>, CliError> {
    let path = path.ok_or(CliError::MissingRecords)?;
    let file: RecordsFile = read_json(path)?;
    info!(
        records = file.all.len(),
        categories = file.categories.len(),
        "records loaded"
    );

    let mut list = RecordList::new(file.all, file.categories, &config.list, partition)?;
    list.recalculate_percentages();
    if !file.labels.is_empty() {
        list.refresh_filter_labels(&file.labels);
    }
    Ok(list)
}

fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn run(args: Args) -> Result<(), CliError> {
    let mut config = load_config(args.config.as_deref())?;
    let records = args.records.as_deref();

    match args.command {
        Command::Score {
            source,
            target,
            metrics,
            tolerance,
            case_sensitive,
        } => {
            let options = if metrics.is_empty() {
                config.search.metrics
            } else {
                MetricOptionSet::from_tags(metrics)
            }
            .case_sensitive(case_sensitive);
            let tolerance = tolerance.unwrap_or(config.search.tolerance);

            let score = fuzzy_score(&source, &target, &options)?;
            print_json(&json!({
                "source": source,
                "target": target,
                "options": options,
                "tolerance": tolerance,
                "score": score,
                "matches": approximately_equals(&source, &target, tolerance, &options),
            }))
        }

        Command::Search {
            query,
            mode,
            filename_only,
            case_sensitive,
            partition,
        } => {
            if let Some(mode) = mode {
                config.search.mode = mode;
            }
            config.search.filename_only |= filename_only;
            config.search.case_sensitive |= case_sensitive;

            let partition = Partition::from(partition);
            let mut view = AssetView::new(load_list(records, &config, partition)?);
            view.update_search(&query, partition, &config.search)?;
            let results = view.displayed(partition)?;

            print_json(&json!({
                "query": query,
                "mode": config.search.mode,
                "total": results.len(),
                "results": results,
            }))
        }

        Command::Sort {
            field,
            order,
            partition,
        } => {
            let partition = Partition::from(partition);
            let mut list = load_list(records, &config, partition)?;
            list.sort(SortSpec::new(field, order), partition, &AuxTable::new())?;
            let sorted = list.records(partition)?;

            print_json(&Listing {
                partition,
                total: sorted.len(),
                records: sorted,
            })
        }

        Command::Top { count } => {
            if let Some(count) = count {
                config.list.number_of_top_largest = count;
            }
            let list = load_list(records, &config, Partition::All)?;

            print_json(&json!({
                "total_size": list.total_size(),
                "labels": list.filter_labels(),
                "top": list.top_largest(),
            }))
        }
    }
}

fn main() {
    let args = Args::parse();
    logging::init_with_filter(&args.log_level);

    if let Err(e) = run(args) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
