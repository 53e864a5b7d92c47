//! impress-unify CLI
//!
//! Reads one value per line (from a file or stdin), unifies them, and prints
//! one unified value per line in input order.

use std::io::{self, Read, Write};
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use impress_unify::{
    unify_report, unify_values, ClusterLinkage, DistanceMetric, RepresentativeStrategy,
    UnifyOptions,
};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// One unified value per line
    Lines,
    /// Values and groups as JSON
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "impress-unify", version, about = "Unify near-duplicate text values")]
struct Cli {
    /// Input file with one value per line (stdin if omitted)
    input: Option<PathBuf>,

    /// TOML options file
    #[arg(long, env = "IMPRESS_UNIFY_CONFIG")]
    config: Option<PathBuf>,

    /// Maximum linkage distance for merging clusters
    #[arg(long)]
    threshold: Option<f64>,

    /// levenshtein, jaro_winkler, or token_set_ratio
    #[arg(long)]
    metric: Option<DistanceMetric>,

    /// average, single, or complete
    #[arg(long)]
    linkage: Option<ClusterLinkage>,

    /// medoid, shortest, longest, or first_alphabetical
    #[arg(long)]
    strategy: Option<RepresentativeStrategy>,

    /// Compare values case-sensitively
    #[arg(long)]
    no_lowercase: bool,

    /// Characters stripped from both ends of each value
    #[arg(long)]
    strip_chars: Option<String>,

    /// Characters removed anywhere in each value
    #[arg(long)]
    remove_chars: Option<String>,

    /// Clusters smaller than this keep their values unchanged
    #[arg(long)]
    min_cluster_size: Option<usize>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Lines)]
    format: OutputFormat,
}

impl Cli {
    fn options(&self) -> impress_unify::Result<UnifyOptions> {
        let mut options = match &self.config {
            Some(path) => UnifyOptions::load(path)?,
            None => UnifyOptions::default(),
        };

        if let Some(threshold) = self.threshold {
            options.distance_threshold = threshold;
        }
        if let Some(metric) = self.metric {
            options.distance_metric = metric;
        }
        if let Some(linkage) = self.linkage {
            options.cluster_linkage = linkage;
        }
        if let Some(strategy) = self.strategy {
            options.representative_strategy = strategy;
        }
        if self.no_lowercase {
            options.lowercase = false;
        }
        if let Some(strip_chars) = &self.strip_chars {
            options.strip_chars = strip_chars.clone();
        }
        if let Some(remove_chars) = &self.remove_chars {
            options.remove_internal_chars = remove_chars.clone();
        }
        if let Some(min_size) = self.min_cluster_size {
            options.min_cluster_size_for_representation_change = min_size;
        }

        Ok(options)
    }

    fn read_input(&self) -> io::Result<String> {
        match &self.input {
            Some(path) => std::fs::read_to_string(path),
            None => {
                let mut buf = String::new();
                io::stdin().read_to_string(&mut buf)?;
                Ok(buf)
            }
        }
    }
}

/// One trimmed value per line; a trailing newline adds no value
fn split_values(content: &str) -> Vec<&str> {
    content.lines().map(str::trim).collect()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr so stdout stays clean for piping
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let options = cli.options()?;
    let content = cli.read_input()?;
    let values = split_values(&content);

    tracing::info!("Unifying {} values", values.len());

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match cli.format {
        OutputFormat::Lines => {
            for value in unify_values(&values, &options)? {
                writeln!(out, "{}", value)?;
            }
        }
        OutputFormat::Json => {
            let report = unify_report(&values, &options)?;
            serde_json::to_writer_pretty(&mut out, &report)?;
            writeln!(out)?;
        }
    }

    Ok(())
}
