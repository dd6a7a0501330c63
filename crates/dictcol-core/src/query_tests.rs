//! Tests for `query` module

use super::dictionary::{build_dictionary, Code, Dictionary};
use super::encoder::encode;
use super::query::*;
use tempfile::TempDir;

fn column(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| (*s).to_string()).collect()
}

fn encoded_fixture(raw: &[String]) -> (Dictionary, Vec<Code>) {
    let dictionary = build_dictionary(raw);
    let encoded = encode(raw, &dictionary, 2).expect("encode");
    (dictionary, encoded)
}

// =========================================================================
// Scan strategies
// =========================================================================

#[test]
fn test_scan_scalar_basic() {
    assert_eq!(scan_eq_scalar(&[1, 2, 1, 3, 1], 1), vec![0, 2, 4]);
    assert!(scan_eq_scalar(&[1, 2, 3], 9).is_empty());
    assert!(scan_eq_scalar(&[], 0).is_empty());
}

#[test]
fn test_scan_vectorized_spans_blocks_and_tail() {
    // Arrange - 8-lane blocks plus a 3-element tail
    let mut encoded: Vec<Code> = (0..19).map(|i| i % 4).collect();
    encoded[17] = 7;

    // Act
    let positions = scan_eq_vectorized(&encoded, 3);

    // Assert
    assert_eq!(positions, vec![3, 7, 11, 15]);
    assert_eq!(scan_eq_vectorized(&encoded, 7), vec![17]);
}

#[test]
fn test_scan_vectorized_all_lanes_match() {
    let encoded = vec![5u32; 16];

    assert_eq!(scan_eq_vectorized(&encoded, 5), (0..16).collect::<Vec<_>>());
}

#[test]
fn test_scan_vectorized_high_codes() {
    // Codes above i32::MAX must still compare correctly after the bit cast
    let encoded = vec![u32::MAX, 0, u32::MAX - 1, u32::MAX, 1, 2, 3, 4, u32::MAX];

    assert_eq!(scan_eq_vectorized(&encoded, u32::MAX), vec![0, 3, 8]);
    assert_eq!(scan_eq_vectorized(&encoded, u32::MAX - 1), vec![2]);
}

#[test]
fn test_scan_strategy_from_flag() {
    assert_eq!(ScanStrategy::from_flag(true), ScanStrategy::Vectorized);
    assert_eq!(ScanStrategy::from_flag(false), ScanStrategy::Scalar);
    assert_eq!(ScanStrategy::default(), ScanStrategy::Vectorized);
}

// =========================================================================
// Encoded and vanilla queries
// =========================================================================

#[test]
fn test_encoded_item_scenario() {
    // Arrange
    let raw = column(&["ab", "ac", "bd", "ab"]);
    let (dictionary, encoded) = encoded_fixture(&raw);

    for strategy in [ScanStrategy::Vectorized, ScanStrategy::Scalar] {
        let query = EncodedColumnQuery::new(&dictionary, &encoded, strategy);

        // Act & Assert
        assert_eq!(query.find_item("ab"), Some(vec![0, 3]));
        assert_eq!(query.find_item("zz"), None);
    }
}

#[test]
fn test_encoded_prefix_scenario() {
    // Arrange
    let raw = column(&["ab", "ac", "bd", "ab"]);
    let (dictionary, encoded) = encoded_fixture(&raw);
    let query = EncodedColumnQuery::new(&dictionary, &encoded, ScanStrategy::Vectorized);

    // Act
    let matches = query.find_prefix("a");

    // Assert
    assert_eq!(matches.len(), 2);
    assert_eq!(matches["ab"], vec![0, 3]);
    assert_eq!(matches["ac"], vec![1]);
    assert!(query.find_prefix("z").is_empty());
}

#[test]
fn test_vanilla_item_scenario() {
    let raw = column(&["ab", "ac", "bd", "ab"]);
    let query = VanillaColumnQuery::new(&raw);

    assert_eq!(query.find_item("ab"), Some(vec![0, 3]));
    assert_eq!(query.find_item("zz"), None);
}

#[test]
fn test_vanilla_prefix_first_seen_order() {
    // Arrange
    let raw = column(&["knb", "x", "kna", "knb", "kna"]);
    let query = VanillaColumnQuery::new(&raw);

    // Act
    let matches = query.find_prefix("kn");

    // Assert
    let keys: Vec<&str> = matches.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["knb", "kna"]);
    assert_eq!(matches["knb"], vec![0, 3]);
    assert_eq!(matches["kna"], vec![2, 4]);
}

#[test]
fn test_prefix_is_case_sensitive() {
    let raw = column(&["Ab", "ab"]);
    let (dictionary, encoded) = encoded_fixture(&raw);

    let encoded_query = EncodedColumnQuery::new(&dictionary, &encoded, ScanStrategy::Scalar);
    let vanilla_query = VanillaColumnQuery::new(&raw);

    assert_eq!(encoded_query.find_prefix("a").len(), 1);
    assert_eq!(vanilla_query.find_prefix("a").len(), 1);
}

#[test]
fn test_queries_through_trait_object() {
    let raw = column(&["ab", "ac"]);
    let (dictionary, encoded) = encoded_fixture(&raw);

    let encoded_query = EncodedColumnQuery::new(&dictionary, &encoded, ScanStrategy::Scalar);
    let vanilla_query = VanillaColumnQuery::new(&raw);
    let queries: [&dyn ColumnQuery; 2] = [&encoded_query, &vanilla_query];

    for query in queries {
        assert_eq!(query.find_item("ac"), Some(vec![1]));
    }
}

// =========================================================================
// Results file
// =========================================================================

#[test]
fn test_format_result_line() {
    assert_eq!(
        format_result_line("ab", &[0, 3]),
        "Item 'ab' found at indices: [0, 3]"
    );
}

#[test]
fn test_write_results_overwrites() {
    // Arrange
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("result.txt");
    std::fs::write(&path, "stale line\nstale line\nstale line\n").expect("seed");

    let mut matches = PrefixMatches::new();
    matches.insert("ab".to_string(), vec![0, 3]);
    matches.insert("ac".to_string(), vec![1]);

    // Act
    write_results(&matches, &path).expect("write");

    // Assert
    let contents = std::fs::read_to_string(&path).expect("read");
    assert_eq!(
        contents,
        "Item 'ab' found at indices: [0, 3]\nItem 'ac' found at indices: [1]\n"
    );
}

// =========================================================================
// Property-Based Tests with proptest
// =========================================================================

mod proptest_tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::BTreeSet;

    fn column_strategy() -> impl Strategy<Value = Vec<String>> {
        proptest::collection::vec("[a-c]{1,3}", 0..150)
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        /// Property: vectorized and scalar scans agree, including empty results
        #[test]
        fn prop_vectorized_matches_scalar(
            encoded in proptest::collection::vec(0u32..6, 0..100),
            code in 0u32..8,
        ) {
            prop_assert_eq!(
                scan_eq_vectorized(&encoded, code),
                scan_eq_scalar(&encoded, code)
            );
        }

        /// Property: encoded and vanilla exact matches return the same rows
        #[test]
        fn prop_encoded_item_matches_vanilla(raw in column_strategy(), item in "[a-c]{1,3}") {
            let (dictionary, encoded) = encoded_fixture(&raw);
            let vanilla = VanillaColumnQuery::new(&raw);
            for strategy in [ScanStrategy::Vectorized, ScanStrategy::Scalar] {
                let query = EncodedColumnQuery::new(&dictionary, &encoded, strategy);
                prop_assert_eq!(query.find_item(&item), vanilla.find_item(&item));
            }
        }

        /// Property: encoded and vanilla prefix matches cover the same rows
        #[test]
        fn prop_encoded_prefix_matches_vanilla(raw in column_strategy(), prefix in "[a-c]{0,2}") {
            let (dictionary, encoded) = encoded_fixture(&raw);
            let query = EncodedColumnQuery::new(&dictionary, &encoded, ScanStrategy::Vectorized);
            let vanilla = VanillaColumnQuery::new(&raw);

            let encoded_matches = query.find_prefix(&prefix);
            let vanilla_matches = vanilla.find_prefix(&prefix);

            let rows = |m: &PrefixMatches| -> BTreeSet<usize> {
                m.values().flatten().copied().collect()
            };
            prop_assert_eq!(rows(&encoded_matches), rows(&vanilla_matches));
            prop_assert_eq!(encoded_matches.len(), vanilla_matches.len());
            for (value, indices) in &vanilla_matches {
                prop_assert_eq!(encoded_matches.get(value), Some(indices));
            }
        }
    }
}
