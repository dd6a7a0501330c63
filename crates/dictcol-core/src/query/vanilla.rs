//! Queries over the raw, unencoded column.

use super::{ColumnQuery, PrefixMatches};

/// Read-only view over a raw column.
#[derive(Debug, Clone, Copy)]
pub struct VanillaColumnQuery<'a> {
    raw: &'a [String],
}

impl<'a> VanillaColumnQuery<'a> {
    /// Creates a query view over `raw`.
    #[must_use]
    pub fn new(raw: &'a [String]) -> Self {
        Self { raw }
    }
}

impl ColumnQuery for VanillaColumnQuery<'_> {
    fn find_item(&self, item: &str) -> Option<Vec<usize>> {
        let indices: Vec<usize> = self
            .raw
            .iter()
            .enumerate()
            .filter_map(|(idx, value)| (value == item).then_some(idx))
            .collect();

        if indices.is_empty() {
            None
        } else {
            Some(indices)
        }
    }

    fn find_prefix(&self, prefix: &str) -> PrefixMatches {
        let mut matches = PrefixMatches::new();
        for (idx, value) in self.raw.iter().enumerate() {
            if !value.starts_with(prefix) {
                continue;
            }
            match matches.get_mut(value.as_str()) {
                Some(indices) => indices.push(idx),
                None => {
                    matches.insert(value.clone(), vec![idx]);
                }
            }
        }
        matches
    }
}
