//! Dictionary construction for string columns.
//!
//! Replaces repeated values with compact integer codes. Codes are dense
//! (`0..len`) and handed out in first-occurrence order, so the same column
//! always yields the same dictionary. Callers must still treat codes as
//! opaque identities: nothing in the engine orders rows by code.

use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;
use serde::{Deserialize, Serialize};

use crate::checked_u32;

/// Integer code standing in for one distinct value.
pub type Code = u32;

/// Mapping from distinct string value to its code.
///
/// Backed by an insertion-ordered map: the entry at position `i` carries code
/// `i`, which gives O(1) lookups in both directions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dictionary {
    codes: IndexMap<String, Code, FxBuildHasher>,
}

/// Builds the dictionary of a raw column.
///
/// Empty input yields an empty dictionary.
#[must_use]
pub fn build_dictionary(raw: &[String]) -> Dictionary {
    Dictionary::from_values(raw)
}

impl Dictionary {
    /// Creates an empty dictionary.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a dictionary from any sequence of values.
    ///
    /// # Panics
    ///
    /// Panics if there are more than `u32::MAX` distinct values.
    #[must_use]
    pub fn from_values<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut dictionary = Self::new();
        for value in values {
            dictionary.intern(value.as_ref());
        }
        dictionary
    }

    fn intern(&mut self, value: &str) -> Code {
        if let Some(&code) = self.codes.get(value) {
            return code;
        }
        let code = checked_u32!(self.codes.len(), "dictionary code");
        self.codes.insert(value.to_owned(), code);
        code
    }

    /// Returns the code of `value`, if present.
    #[must_use]
    pub fn code(&self, value: &str) -> Option<Code> {
        self.codes.get(value).copied()
    }

    /// Decodes a code back to its value.
    #[must_use]
    pub fn value(&self, code: Code) -> Option<&str> {
        self.codes
            .get_index(code as usize)
            .map(|(value, _)| value.as_str())
    }

    /// Decodes a batch of codes. Returns `None` if any code is unknown.
    #[must_use]
    pub fn decode_batch(&self, codes: &[Code]) -> Option<Vec<&str>> {
        codes.iter().map(|&code| self.value(code)).collect()
    }

    /// Number of distinct values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// Returns true if the dictionary has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Iterates `(value, code)` pairs in code order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Code)> + '_ {
        self.codes.iter().map(|(value, &code)| (value.as_str(), code))
    }

    /// Returns every entry whose value starts with `prefix`, in code order.
    ///
    /// The test is a case-sensitive byte prefix; an empty prefix matches all.
    #[must_use]
    pub fn keys_with_prefix(&self, prefix: &str) -> Vec<(&str, Code)> {
        self.iter()
            .filter(|(value, _)| value.starts_with(prefix))
            .collect()
    }

    /// Checks that codes are exactly `0..len` in position order.
    ///
    /// Holds for every dictionary built by this module; a deserialized one
    /// may violate it.
    pub(crate) fn check_dense(&self) -> std::result::Result<(), String> {
        for (position, (value, &code)) in self.codes.iter().enumerate() {
            if code as usize != position {
                return Err(format!(
                    "dictionary entry '{value}' has code {code}, expected {position}"
                ));
            }
        }
        Ok(())
    }

    /// Total bytes of the distinct values.
    #[must_use]
    pub fn value_bytes(&self) -> usize {
        self.codes.keys().map(String::len).sum()
    }
}
