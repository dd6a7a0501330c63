//! Query engine.
//!
//! Exact-match and prefix lookups run against one of two representations
//! behind the [`ColumnQuery`] trait:
//!
//! - [`EncodedColumnQuery`]: dictionary + encoded column, scanned with a
//!   configurable [`ScanStrategy`].
//! - [`VanillaColumnQuery`]: the raw column, used as the correctness
//!   baseline. It never touches a dictionary.
//!
//! Both must return the same row positions for the same item or prefix.

mod encoded;
mod results;
mod scan;
mod vanilla;

use std::path::PathBuf;
use std::time::Duration;

use indexmap::IndexMap;

pub use encoded::EncodedColumnQuery;
pub use results::{format_result_line, write_results};
pub use scan::{scan_eq_scalar, scan_eq_vectorized, ScanStrategy};
pub use vanilla::VanillaColumnQuery;

/// Matched distinct value -> ascending row positions, in discovery order.
pub type PrefixMatches = IndexMap<String, Vec<usize>>;

/// Lookup interface shared by both column representations.
pub trait ColumnQuery {
    /// Returns the rows equal to `item`, or `None` if no row matches.
    fn find_item(&self, item: &str) -> Option<Vec<usize>>;

    /// Groups the rows whose value starts with `prefix` by value.
    ///
    /// An empty map means nothing matched.
    fn find_prefix(&self, prefix: &str) -> PrefixMatches;
}

/// Outcome of one query run. Negative outcomes are not errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryOutcome {
    /// The item occurs at `indices`.
    ItemFound {
        /// Queried item.
        item: String,
        /// Matching rows, ascending.
        indices: Vec<usize>,
    },
    /// The item does not occur in the column.
    ItemNotFound {
        /// Queried item.
        item: String,
    },
    /// At least one value matched; the grouping was written to `results_path`.
    PrefixMatched {
        /// Queried prefix.
        prefix: String,
        /// Matched values and their rows.
        matches: PrefixMatches,
        /// File the grouping was written to.
        results_path: PathBuf,
    },
    /// No value starts with the prefix; nothing was written.
    NoPrefixMatches {
        /// Queried prefix.
        prefix: String,
    },
}

/// A query outcome with the time spent in the lookup phase.
#[derive(Debug, Clone)]
pub struct QueryReport {
    /// What the query found.
    pub outcome: QueryOutcome,
    /// Lookup time, excluding artifact/column loading.
    pub elapsed: Duration,
}
