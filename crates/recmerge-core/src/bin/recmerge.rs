//! recmerge CLI
//!
//! Runs duplicate detection and merge planning over JSON record files
//! exported by the caller, printing results as JSON on stdout.

use std::path::{Path, PathBuf};

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use recmerge_core::config::check_threshold;
use recmerge_core::{
    cluster, pair_consecutive, plan_merge, Contact, DuplicateGroup, Mergeable, Order, Product,
    RecmergeConfig, RecmergeError, Scorer,
};

#[derive(Parser)]
#[command(name = "recmerge", version, about = "Find and merge duplicate business records")]
struct Cli {
    /// TOML file with threshold and field rules
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Group duplicate records
    Find {
        kind: Kind,
        /// JSON array of records
        file: PathBuf,
        /// Override the configured threshold (0-100)
        #[arg(long)]
        threshold: Option<u32>,
    },
    /// Pair a selection two by two, ignoring the threshold
    Pairs { kind: Kind, file: PathBuf },
    /// Plan the merge of a group of records
    Merge {
        kind: Kind,
        /// JSON array of the group's members
        file: PathBuf,
        /// Index of the record to keep
        #[arg(long, default_value_t = 0)]
        primary: usize,
    },
    /// Score the first two records of a file
    Score { kind: Kind, file: PathBuf },
}

impl Command {
    fn kind(&self) -> Kind {
        match self {
            Self::Find { kind, .. }
            | Self::Pairs { kind, .. }
            | Self::Merge { kind, .. }
            | Self::Score { kind, .. } => *kind,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum Kind {
    Contacts,
    Orders,
    Products,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match &cli.config {
        Some(path) => RecmergeConfig::load(path)?,
        None => RecmergeConfig::default(),
    };

    let output = match cli.command.kind() {
        Kind::Contacts => execute::<Contact, _>(&cli.command, &config.contact_scorer(), &config)?,
        Kind::Orders => execute::<Order, _>(&cli.command, &config.order_scorer(), &config)?,
        Kind::Products => execute::<Product, _>(&cli.command, &config.product_scorer(), &config)?,
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn read_records<T: DeserializeOwned>(path: &Path) -> recmerge_core::Result<Vec<T>> {
    let text = std::fs::read_to_string(path)?;
    let records: Vec<T> = serde_json::from_str(&text)?;
    info!(path = %path.display(), records = records.len(), "loaded records");
    Ok(records)
}

fn execute<T, S>(
    command: &Command,
    scorer: &S,
    config: &RecmergeConfig,
) -> recmerge_core::Result<serde_json::Value>
where
    T: Mergeable + Serialize + DeserializeOwned,
    T::Merged: Serialize,
    S: Scorer<T>,
{
    let value = match command {
        Command::Find {
            file, threshold, ..
        } => {
            let records: Vec<T> = read_records(file)?;
            let threshold = match threshold {
                Some(t) => check_threshold(*t)?,
                None => config.threshold,
            };
            let groups = cluster(&records, scorer, threshold);
            info!(groups = groups.len(), threshold, "found duplicate groups");
            serde_json::to_value(groups)?
        }
        Command::Pairs { file, .. } => {
            let records: Vec<T> = read_records(file)?;
            serde_json::to_value(pair_consecutive(&records, scorer))?
        }
        Command::Merge { file, primary, .. } => {
            let members: Vec<T> = read_records(file)?;
            let found = members.len();
            let group = DuplicateGroup::manual(members, scorer)
                .ok_or(RecmergeError::NotEnoughRecords { needed: 2, found })?;
            serde_json::to_value(plan_merge(&group, *primary)?)?
        }
        Command::Score { file, .. } => {
            let records: Vec<T> = read_records(file)?;
            let [left, right, ..] = records.as_slice() else {
                return Err(RecmergeError::NotEnoughRecords {
                    needed: 2,
                    found: records.len(),
                });
            };
            serde_json::to_value(scorer.compare(left, right))?
        }
    };
    Ok(value)
}
