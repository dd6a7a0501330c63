//! Encode and query runs.
//!
//! The two entry points take an explicit [`EngineConfig`]; nothing is read
//! from process-wide state. An encode run produces a new artifact that fully
//! replaces the previous one; a query run loads what its mode needs, answers
//! one query and, for prefix matches, writes the results file.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use tracing::info;

use crate::column::read_column_file;
use crate::config::EngineConfig;
use crate::dictionary::build_dictionary;
use crate::encoder::encode;
use crate::error::Result;
use crate::query::{
    write_results, ColumnQuery, EncodedColumnQuery, QueryOutcome, QueryReport, ScanStrategy,
    VanillaColumnQuery,
};
use crate::store;

/// Summary of an encode run.
#[derive(Debug, Clone)]
pub struct EncodeSummary {
    /// Rows encoded.
    pub rows: usize,
    /// Distinct values in the dictionary.
    pub unique_values: usize,
    /// Workers used by the encoder.
    pub workers: usize,
    /// Time spent in the parallel encode phase.
    pub elapsed: Duration,
    /// Where the artifact was written.
    pub artifact_path: PathBuf,
}

/// Reads the raw column, encodes it and saves the artifact.
///
/// # Errors
///
/// Returns an error if the configuration is invalid, the column cannot be
/// read, encoding fails or the artifact cannot be written.
pub fn run_encode(config: &EngineConfig) -> Result<EncodeSummary> {
    config.validate()?;

    let raw = read_column_file(&config.storage.column_path)?;
    let dictionary = build_dictionary(&raw);

    let workers = config.encoder.workers;
    let start = Instant::now();
    let encoded = encode(&raw, &dictionary, workers)?;
    let elapsed = start.elapsed();

    store::save(&dictionary, &encoded, &config.storage.artifact_path)?;

    info!(
        rows = raw.len(),
        unique_values = dictionary.len(),
        workers,
        elapsed_ms = elapsed.as_millis() as u64,
        "Column encoded"
    );

    Ok(EncodeSummary {
        rows: raw.len(),
        unique_values: dictionary.len(),
        workers,
        elapsed,
        artifact_path: config.storage.artifact_path.clone(),
    })
}

/// Runs the query selected by `config.query.mode`.
///
/// Encoded modes load only the artifact; vanilla modes load only the raw
/// column.
///
/// # Errors
///
/// Returns an error if the configuration is invalid, the artifact or column
/// cannot be loaded, or the results file cannot be written. "Not found" and
/// "no matches" are reported through [`QueryOutcome`], not as errors.
pub fn run_query(config: &EngineConfig) -> Result<QueryReport> {
    config.validate()?;

    let mode = config.query.mode;
    let report = if mode.uses_artifact() {
        let (dictionary, encoded) = store::load(&config.storage.artifact_path)?;
        let strategy = ScanStrategy::from_flag(config.query.vectorized);
        let query = EncodedColumnQuery::new(&dictionary, &encoded, strategy);
        execute(&query, config)?
    } else {
        let raw = read_column_file(&config.storage.column_path)?;
        let query = VanillaColumnQuery::new(&raw);
        execute(&query, config)?
    };

    info!(
        mode = ?mode,
        vectorized = config.query.vectorized,
        elapsed_us = report.elapsed.as_micros() as u64,
        "Query finished"
    );
    Ok(report)
}

/// Runs the configured item or prefix lookup against `query`.
///
/// # Errors
///
/// Returns an error if the results file of a prefix match cannot be written.
pub fn execute<Q: ColumnQuery + ?Sized>(query: &Q, config: &EngineConfig) -> Result<QueryReport> {
    if config.query.mode.is_prefix() {
        lookup_prefix(query, &config.query.prefix, &config.storage.results_path)
    } else {
        Ok(lookup_item(query, &config.query.item))
    }
}

fn lookup_item<Q: ColumnQuery + ?Sized>(query: &Q, item: &str) -> QueryReport {
    let start = Instant::now();
    let found = query.find_item(item);
    let elapsed = start.elapsed();

    let outcome = match found {
        Some(indices) => QueryOutcome::ItemFound {
            item: item.to_owned(),
            indices,
        },
        None => QueryOutcome::ItemNotFound {
            item: item.to_owned(),
        },
    };
    QueryReport { outcome, elapsed }
}

fn lookup_prefix<Q: ColumnQuery + ?Sized>(
    query: &Q,
    prefix: &str,
    results_path: &Path,
) -> Result<QueryReport> {
    let start = Instant::now();
    let matches = query.find_prefix(prefix);
    let elapsed = start.elapsed();

    if matches.is_empty() {
        return Ok(QueryReport {
            outcome: QueryOutcome::NoPrefixMatches {
                prefix: prefix.to_owned(),
            },
            elapsed,
        });
    }

    write_results(&matches, results_path)?;
    Ok(QueryReport {
        outcome: QueryOutcome::PrefixMatched {
            prefix: prefix.to_owned(),
            matches,
            results_path: results_path.to_path_buf(),
        },
        elapsed,
    })
}
