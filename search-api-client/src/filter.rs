//! Qdrant filter input handling.
//!
//! [`validate_filter`] checks that user-typed filter text is well-formed JSON
//! and hands back the parsed value. Filter semantics are owned by the server;
//! nothing here looks inside the value.
//!
//! # Examples
//!
//! ```
//! use search_api_client::filter::{FilterValidation, validate_filter};
//!
//! assert_eq!(validate_filter("  "), FilterValidation::Valid { parsed: None });
//! assert!(validate_filter(r#"{"must":["#).is_invalid());
//! ```

use serde_json::{Value, json};

/// Outcome of [`validate_filter`].
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValidation {
    /// Input is usable. `parsed` is `None` for blank input (no filter).
    Valid { parsed: Option<Value> },
    /// Input is not JSON; `error` is the parser message, unchanged.
    Invalid { error: String },
}

impl FilterValidation {
    pub fn is_valid(&self) -> bool {
        matches!(self, FilterValidation::Valid { .. })
    }

    pub fn is_invalid(&self) -> bool {
        !self.is_valid()
    }

    /// Value for `QdrantConfig::query_filter`.
    ///
    /// Empty scalars (`null`, `false`, `0`, `""`) also mean "no filter".
    /// Empty objects and arrays are sent as typed.
    ///
    /// # Errors
    /// The parser message when the input was invalid.
    pub fn into_query_filter(self) -> Result<Option<Value>, String> {
        match self {
            FilterValidation::Valid { parsed } => Ok(parsed.filter(|v| !is_empty_scalar(v))),
            FilterValidation::Invalid { error } => Err(error),
        }
    }
}

fn is_empty_scalar(v: &Value) -> bool {
    match v {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

/// Validates filter text typed by a user.
///
/// Blank input is valid and means "no filter". Anything else must parse as
/// JSON; any JSON value is accepted. Never panics, so it is fine to call on
/// every keystroke.
pub fn validate_filter(input: &str) -> FilterValidation {
    if input.trim().is_empty() {
        return FilterValidation::Valid { parsed: None };
    }
    match serde_json::from_str::<Value>(input) {
        Ok(parsed) => FilterValidation::Valid {
            parsed: Some(parsed),
        },
        Err(e) => FilterValidation::Invalid {
            error: e.to_string(),
        },
    }
}

/// Ready-made filter a user can start from.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterPreset {
    /// Lookup key, e.g. `date_range`.
    pub key: &'static str,
    /// Display name.
    pub name: &'static str,
    pub filter: Value,
}

impl FilterPreset {
    /// Pretty-printed JSON, the form placed in the filter input.
    pub fn json_text(&self) -> String {
        serde_json::to_string_pretty(&self.filter).unwrap_or_else(|_| self.filter.to_string())
    }
}

/// Built-in filter presets, in display order.
pub fn presets() -> Vec<FilterPreset> {
    vec![
        FilterPreset {
            key: "category",
            name: "Category filter",
            filter: json!({
                "must": [
                    { "key": "category", "match": { "value": "기술" } }
                ]
            }),
        },
        FilterPreset {
            key: "date_range",
            name: "Date range",
            filter: json!({
                "must": [
                    { "key": "created_at", "range": { "gte": "2024-01-01T00:00:00Z" } }
                ]
            }),
        },
        FilterPreset {
            key: "multi_condition",
            name: "Multiple conditions",
            filter: json!({
                "must": [
                    { "key": "category", "match": { "value": "AI" } },
                    { "key": "year", "range": { "gte": 2024 } }
                ],
                "must_not": [
                    { "key": "status", "match": { "value": "draft" } }
                ]
            }),
        },
        FilterPreset {
            key: "tags",
            name: "Tag filter",
            filter: json!({
                "must": [
                    { "key": "tags", "match": { "any": ["AI", "머신러닝", "딥러닝"] } }
                ]
            }),
        },
    ]
}

/// Looks up a built-in preset by key.
pub fn preset(key: &str) -> Option<FilterPreset> {
    presets().into_iter().find(|p| p.key == key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_input_means_no_filter() {
        assert_eq!(validate_filter(""), FilterValidation::Valid { parsed: None });
        assert_eq!(validate_filter("   "), FilterValidation::Valid { parsed: None });
        assert_eq!(validate_filter("\n\t"), FilterValidation::Valid { parsed: None });
    }

    #[test]
    fn object_filter_is_parsed() {
        let out = validate_filter(r#"{"must":[{"key":"a","match":{"value":"b"}}]}"#);
        let FilterValidation::Valid { parsed: Some(v) } = &out else {
            panic!("expected a parsed filter, got {out:?}");
        };
        assert_eq!(v["must"].as_array().map(Vec::len), Some(1));
        assert_eq!(v["must"][0]["match"]["value"], "b");
    }

    #[test]
    fn truncated_json_reports_parser_error() {
        let out = validate_filter(r#"{"must":["#);
        let FilterValidation::Invalid { error } = &out else {
            panic!("expected invalid, got {out:?}");
        };
        assert!(!error.is_empty());
        // serde_json message is passed through unchanged
        assert_eq!(
            *error,
            serde_json::from_str::<Value>(r#"{"must":["#)
                .unwrap_err()
                .to_string()
        );
    }

    #[test]
    fn any_json_value_is_accepted() {
        assert_eq!(
            validate_filter("[1,2]"),
            FilterValidation::Valid {
                parsed: Some(json!([1, 2]))
            }
        );
        assert_eq!(
            validate_filter(" 42 "),
            FilterValidation::Valid {
                parsed: Some(json!(42))
            }
        );
    }

    #[test]
    fn into_query_filter_drops_empty_scalars() {
        for text in ["false", "0", "0.0", "-0", r#""""#] {
            assert_eq!(validate_filter(text).into_query_filter(), Ok(None), "{text}");
        }
        let kept = [
            ("true", json!(true)),
            ("1", json!(1)),
            (r#""x""#, json!("x")),
            ("[]", json!([])),
        ];
        for (text, kept) in kept {
            assert_eq!(validate_filter(text).into_query_filter(), Ok(Some(kept)), "{text}");
        }
    }

    #[test]
    fn into_query_filter_drops_null() {
        assert_eq!(validate_filter("null").into_query_filter(), Ok(None));
        assert_eq!(validate_filter("").into_query_filter(), Ok(None));
        assert_eq!(
            validate_filter(r#"{"must":[]}"#).into_query_filter(),
            Ok(Some(json!({ "must": [] })))
        );
        assert!(validate_filter("{").into_query_filter().is_err());
    }

    #[test]
    fn presets_round_trip_through_validator() {
        let all = presets();
        assert_eq!(all.len(), 4);
        for p in &all {
            assert_eq!(
                validate_filter(&p.json_text()),
                FilterValidation::Valid {
                    parsed: Some(p.filter.clone())
                },
                "preset {} must validate",
                p.key
            );
        }
        assert!(preset("tags").is_some());
        assert!(preset("nope").is_none());
    }
}
