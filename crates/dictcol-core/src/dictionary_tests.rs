//! Tests for `dictionary` module

use super::dictionary::*;

fn column(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| (*s).to_string()).collect()
}

// ========== Construction ==========

#[test]
fn test_build_dictionary_empty() {
    let dictionary = build_dictionary(&[]);

    assert!(dictionary.is_empty());
    assert_eq!(dictionary.len(), 0);
}

#[test]
fn test_build_dictionary_distinct_codes() {
    // Arrange
    let raw = column(&["ab", "ac", "bd", "ab"]);

    // Act
    let dictionary = build_dictionary(&raw);

    // Assert
    assert_eq!(dictionary.len(), 3);
    let ab = dictionary.code("ab").expect("ab");
    let ac = dictionary.code("ac").expect("ac");
    let bd = dictionary.code("bd").expect("bd");
    assert_ne!(ab, ac);
    assert_ne!(ab, bd);
    assert_ne!(ac, bd);
}

#[test]
fn test_build_dictionary_is_deterministic() {
    let raw = column(&["France", "Spain", "France", "Italy", "France"]);

    assert_eq!(build_dictionary(&raw), build_dictionary(&raw));
}

#[test]
fn test_build_dictionary_codes_are_dense() {
    let raw = column(&["x", "y", "z", "y", "x"]);

    let dictionary = build_dictionary(&raw);

    let mut codes: Vec<Code> = dictionary.iter().map(|(_, code)| code).collect();
    codes.sort_unstable();
    assert_eq!(codes, vec![0, 1, 2]);
}

#[test]
fn test_empty_string_is_a_value() {
    let raw = column(&["", "a", ""]);

    let dictionary = build_dictionary(&raw);

    assert_eq!(dictionary.len(), 2);
    assert!(dictionary.code("").is_some());
}

// ========== Lookup ==========

#[test]
fn test_code_missing_value() {
    let dictionary = build_dictionary(&column(&["a"]));

    assert_eq!(dictionary.code("b"), None);
}

#[test]
fn test_value_is_inverse_of_code() {
    let raw = column(&["red", "green", "blue", "green"]);
    let dictionary = build_dictionary(&raw);

    for value in &raw {
        let code = dictionary.code(value).expect("present");
        assert_eq!(dictionary.value(code), Some(value.as_str()));
    }
}

#[test]
fn test_value_invalid_code() {
    let dictionary = build_dictionary(&column(&["a"]));

    assert_eq!(dictionary.value(999), None);
}

#[test]
fn test_decode_batch() {
    let dictionary = build_dictionary(&column(&["a", "b"]));
    let a = dictionary.code("a").expect("a");
    let b = dictionary.code("b").expect("b");

    assert_eq!(dictionary.decode_batch(&[b, a, b]), Some(vec!["b", "a", "b"]));
    assert_eq!(dictionary.decode_batch(&[a, 77]), None);
}

// ========== Prefix ==========

#[test]
fn test_keys_with_prefix() {
    // Arrange
    let dictionary = build_dictionary(&column(&["ab", "ac", "bd", "ab", "Ab"]));

    // Act
    let keys: Vec<&str> = dictionary
        .keys_with_prefix("a")
        .into_iter()
        .map(|(value, _)| value)
        .collect();

    // Assert - case-sensitive, each key once
    assert_eq!(keys, vec!["ab", "ac"]);
}

#[test]
fn test_keys_with_prefix_no_match() {
    let dictionary = build_dictionary(&column(&["ab", "ac"]));

    assert!(dictionary.keys_with_prefix("z").is_empty());
}

#[test]
fn test_keys_with_empty_prefix_matches_all() {
    let dictionary = build_dictionary(&column(&["ab", "ac", "bd"]));

    assert_eq!(dictionary.keys_with_prefix("").len(), 3);
}

#[test]
fn test_keys_with_multibyte_prefix() {
    let dictionary = build_dictionary(&column(&["été", "étage", "eté"]));

    assert_eq!(dictionary.keys_with_prefix("ét").len(), 2);
}

// ========== Serialization ==========

#[test]
fn test_dictionary_serializes_as_map() {
    let dictionary = build_dictionary(&column(&["ab", "ac"]));

    let json = serde_json::to_value(&dictionary).expect("serialize");

    assert!(json.is_object());
    assert_eq!(json["ab"], serde_json::json!(dictionary.code("ab")));
}

#[test]
fn test_check_dense_rejects_gaps() {
    let dictionary: Dictionary =
        serde_json::from_str(r#"{"ab": 0, "ac": 5}"#).expect("deserialize");

    assert!(dictionary.check_dense().is_err());
}

#[test]
fn test_value_bytes() {
    let dictionary = build_dictionary(&column(&["ab", "ccc", "ab"]));

    assert_eq!(dictionary.value_bytes(), 5);
}
