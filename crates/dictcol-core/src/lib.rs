//! # `DictCol` Core
//!
//! Dictionary-encoding engine for string columns.
//!
//! A raw column of repeated strings is turned into a dictionary (distinct
//! value -> `u32` code) plus an encoded column (one code per row). Encoding
//! runs on a fork-join worker pool; the pair is persisted as a single
//! artifact; lookups run against either the encoded column (SIMD or scalar
//! scan) or the raw column as a baseline.
//!
//! ## Quick Start
//!
//! ```rust
//! use dictcol_core::query::{ColumnQuery, EncodedColumnQuery, ScanStrategy};
//! use dictcol_core::{build_dictionary, encode};
//!
//! let raw: Vec<String> = ["ab", "ac", "bd", "ab"].iter().map(|s| s.to_string()).collect();
//! let dictionary = build_dictionary(&raw);
//! let encoded = encode(&raw, &dictionary, 2)?;
//!
//! let query = EncodedColumnQuery::new(&dictionary, &encoded, ScanStrategy::Vectorized);
//! assert_eq!(query.find_item("ab"), Some(vec![0, 3]));
//! assert_eq!(query.find_item("zz"), None);
//! # Ok::<(), dictcol_core::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
// Codes are u32 reinterpreted as i32 SIMD lanes; row counts are reported as u64.
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::uninlined_format_args)]

pub mod column;
pub mod config;
pub mod dictionary;
#[cfg(test)]
mod dictionary_tests;
pub mod encoder;
pub mod error;
pub mod pipeline;
pub mod query;
#[cfg(test)]
mod query_tests;
pub mod store;
pub mod util;

pub use column::read_column_file;
pub use config::{ConfigError, EngineConfig, QueryMode};
pub use dictionary::{build_dictionary, Code, Dictionary};
pub use encoder::{encode, partition};
pub use error::{Error, Result};
pub use pipeline::{run_encode, run_query, EncodeSummary};
pub use query::{ColumnQuery, QueryOutcome, QueryReport, ScanStrategy};
pub use store::{load, save, Artifact, ArtifactStats};
