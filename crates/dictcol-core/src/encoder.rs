//! Parallel column encoder.
//!
//! The raw column is split into `workers` contiguous chunks. Each chunk is
//! encoded on a dedicated rayon pool and the per-chunk results are
//! concatenated in chunk order, so `encoded[i]` is always the code of
//! `raw[i]` regardless of which worker finished first.
//!
//! # Partitioning
//!
//! ```text
//! len = 5, workers = 3  =>  chunk = 5 / 3 = 1, remainder = 2
//! [0..1) [1..2) [2..5)      remainder goes to the last chunk
//! ```

use std::ops::Range;

use rayon::prelude::*;
use rayon::ThreadPoolBuilder;
use tracing::{debug, warn};

use crate::dictionary::{Code, Dictionary};
use crate::error::{Error, Result};

/// Splits `len` rows into `workers` contiguous ranges.
///
/// Every chunk gets `len / workers` rows; the `len % workers` leftover rows
/// are appended to the last chunk. Returns no ranges for `workers == 0` or
/// `len == 0`.
#[must_use]
pub fn partition(len: usize, workers: usize) -> Vec<Range<usize>> {
    if workers == 0 || len == 0 {
        return Vec::new();
    }

    let chunk_size = len / workers;
    let mut ranges: Vec<Range<usize>> = (0..workers)
        .map(|i| i * chunk_size..(i + 1) * chunk_size)
        .collect();

    if let Some(last) = ranges.last_mut() {
        last.end = len;
    }
    ranges
}

/// Encodes one chunk starting at row `offset`.
fn encode_chunk(chunk: &[String], offset: usize, dictionary: &Dictionary) -> Result<Vec<Code>> {
    chunk
        .iter()
        .enumerate()
        .map(|(i, value)| {
            dictionary.code(value).ok_or_else(|| Error::UnknownValue {
                row: offset + i,
                value: value.clone(),
            })
        })
        .collect()
}

/// Encodes `raw` with `dictionary` using `workers` parallel workers.
///
/// Returns an empty column for `workers == 0` or an empty `raw`.
///
/// # Errors
///
/// Returns [`Error::UnknownValue`] if a value has no dictionary entry (the
/// whole encode fails, no partial column is returned) and
/// [`Error::Internal`] if the worker pool cannot be created.
pub fn encode(raw: &[String], dictionary: &Dictionary, workers: usize) -> Result<Vec<Code>> {
    let ranges = partition(raw.len(), workers);
    if ranges.is_empty() {
        return Ok(Vec::new());
    }

    if workers > raw.len() {
        warn!(
            workers,
            rows = raw.len(),
            "More workers than rows; leading chunks are empty"
        );
    }
    debug!(
        workers,
        rows = raw.len(),
        chunk_size = raw.len() / workers,
        last_chunk = ranges.last().map_or(0, |r| r.len()),
        "Partitioned column"
    );

    let pool = ThreadPoolBuilder::new()
        .num_threads(workers)
        .thread_name(|i| format!("dictcol-encode-{i}"))
        .build()
        .map_err(|e| Error::Internal(format!("failed to build encoder pool: {e}")))?;

    let chunks: Vec<Vec<Code>> = pool.install(|| {
        ranges
            .par_iter()
            .map(|range| encode_chunk(&raw[range.clone()], range.start, dictionary))
            .collect::<Result<Vec<_>>>()
    })?;

    let mut encoded = Vec::with_capacity(raw.len());
    for chunk in chunks {
        encoded.extend(chunk);
    }
    Ok(encoded)
}

/// Encodes `raw` on the calling thread.
///
/// Reference for the parallel path: `encode(raw, d, k)` must equal
/// `encode_sequential(raw, d)` for every `k >= 1`.
///
/// # Errors
///
/// Returns [`Error::UnknownValue`] if a value has no dictionary entry.
pub fn encode_sequential(raw: &[String], dictionary: &Dictionary) -> Result<Vec<Code>> {
    encode_chunk(raw, 0, dictionary)
}
