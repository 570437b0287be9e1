use openapi_objects::{decode, AppError};
use pretty_assertions::assert_eq;
use serde_json::Value;

#[test]
fn test_matches_reference_parser_without_duplicates() {
    let documents = [
        "null",
        "true",
        "-12.5e3",
        "18446744073709551615",
        r#""café 😀""#,
        "[]",
        "{}",
        r#"[1, [2, [3, {"k": [4]}]]]"#,
        r#"{"metadata": {"name": "flow", "labels": {"tier": "web"}}, "spec": {"replicas": 2}}"#,
        r#"  {"a": [ {"id": 1}, {"id": 1} ], "b": null }  "#,
    ];

    for doc in documents {
        let reference: Value = serde_json::from_str(doc).expect(doc);
        let strict = decode(doc).expect(doc);
        assert_eq!(strict, reference, "document: {}", doc);
    }
}

#[test]
fn test_duplicate_keys_name_the_key() {
    let cases = [
        (r#"{"name": "a", "name": "b"}"#, "name"),
        (r#"{"spec": {"env": [], "env": []}}"#, "env"),
        (r#"[0, {"x": {"cluster_id": 1, "other": 2, "cluster_id": 3}}]"#, "cluster_id"),
        (r#"{"": 1, "": 2}"#, "duplicate key  detected"),
        (r#"{"a": 1, "b": 2, "a": 1}"#, "duplicate key a detected"),
    ];

    for (doc, key) in cases {
        match decode(doc) {
            Err(AppError::Parse(msg)) => {
                assert!(msg.contains(key), "{} should mention {}: {}", doc, key, msg)
            }
            other => panic!("{} should fail with Parse, got {:?}", doc, other),
        }
    }
}

#[test]
fn test_escaped_keys_compare_after_unescaping() {
    let err = decode(r#"{"a": 1, "\u0061": 2}"#).unwrap_err();
    assert!(err.to_string().contains("duplicate key a"));
}

#[test]
fn test_malformed_input_is_parse_error() {
    let documents = [
        "",
        "   ",
        "{",
        "}",
        "[1, 2",
        r#"{"a" 1}"#,
        r#"{"a": 1,}"#,
        "[1,]",
        "{'a': 1}",
        "nul",
        "01",
        "1 2",
        r#"{"a": 1} trailing"#,
        r#""unterminated"#,
        "NaN",
    ];

    for doc in documents {
        match decode(doc) {
            Err(AppError::Parse(msg)) => assert!(!msg.is_empty()),
            other => panic!("{:?} should fail with Parse, got {:?}", doc, other),
        }
    }
}

#[test]
fn test_deep_nesting_fails_cleanly() {
    let doc = format!("{}{}", "[".repeat(10_000), "]".repeat(10_000));
    assert!(matches!(decode(doc), Err(AppError::Parse(_))));
}

#[test]
fn test_error_display_prefix() {
    let err = decode(r#"{"k": 1, "k": 1}"#).unwrap_err();
    let text = err.to_string();
    assert!(text.starts_with("Unable to load JSON: "), "{}", text);
    assert!(text.contains("JSON objects must have unique keys"), "{}", text);
}
