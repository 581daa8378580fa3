//! Option parsing for `layout configure`.

use crate::commands::layout::parse_option;
use serde_json::{json, Value};

#[test]
fn test_parse_option_reads_json_numbers() {
    assert_eq!(parse_option("maxNotes=3"), ("maxNotes".to_string(), json!(3)));
}

#[test]
fn test_parse_option_reads_json_booleans() {
    assert_eq!(
        parse_option("showLegend=false"),
        ("showLegend".to_string(), json!(false))
    );
}

#[test]
fn test_parse_option_keeps_plain_text() {
    assert_eq!(
        parse_option("chartType=line"),
        ("chartType".to_string(), Value::String("line".to_string()))
    );
}

#[test]
fn test_parse_option_splits_on_first_equals() {
    assert_eq!(
        parse_option("title=a=b"),
        ("title".to_string(), Value::String("a=b".to_string()))
    );
}

#[test]
fn test_parse_option_bare_key_is_true() {
    assert_eq!(parse_option("showLegend"), ("showLegend".to_string(), json!(true)));
}
