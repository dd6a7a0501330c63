//! Queries over a dictionary-encoded column.

use crate::dictionary::{Code, Dictionary};

use super::{ColumnQuery, PrefixMatches, ScanStrategy};

/// Read-only view over a loaded dictionary and encoded column.
#[derive(Debug, Clone, Copy)]
pub struct EncodedColumnQuery<'a> {
    dictionary: &'a Dictionary,
    encoded: &'a [Code],
    strategy: ScanStrategy,
}

impl<'a> EncodedColumnQuery<'a> {
    /// Creates a query view using `strategy` for equality scans.
    #[must_use]
    pub fn new(dictionary: &'a Dictionary, encoded: &'a [Code], strategy: ScanStrategy) -> Self {
        Self {
            dictionary,
            encoded,
            strategy,
        }
    }

    /// Scan strategy in use.
    #[must_use]
    pub fn strategy(&self) -> ScanStrategy {
        self.strategy
    }
}

impl ColumnQuery for EncodedColumnQuery<'_> {
    fn find_item(&self, item: &str) -> Option<Vec<usize>> {
        let code = self.dictionary.code(item)?;
        Some(self.strategy.scan_eq(self.encoded, code))
    }

    fn find_prefix(&self, prefix: &str) -> PrefixMatches {
        self.dictionary
            .keys_with_prefix(prefix)
            .into_iter()
            .map(|(value, code)| (value.to_owned(), self.strategy.scan_eq(self.encoded, code)))
            .collect()
    }
}
