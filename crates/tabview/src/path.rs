//! Dotted field paths and value coercion.
//!
//! A [`FieldPath`] locates a value inside an arbitrarily nested record. Records
//! are plain [`serde_json::Value`]s, so resolution is a walk over objects and
//! arrays that stops at the first missing segment. It never panics.
//!
//! The same resolver feeds the filter stage, the sort stage and the column
//! formatter, so `user.profile.age` behaves identically everywhere.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A parsed, dot-delimited field path such as `"address.city"`.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use tabview::FieldPath;
///
/// let record = json!({ "address": { "city": "Lisbon" } });
/// let path = FieldPath::parse("address.city");
/// assert_eq!(path.resolve(&record), Some(&json!("Lisbon")));
/// assert_eq!(FieldPath::parse("address.zip").resolve(&record), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct FieldPath {
    raw: String,
    segments: Vec<String>,
}

impl FieldPath {
    /// Parses a dotted path. An empty string yields an empty path.
    pub fn parse(path: impl Into<String>) -> Self {
        let raw = path.into();
        let segments = if raw.is_empty() {
            Vec::new()
        } else {
            raw.split('.').map(str::to_string).collect()
        };
        FieldPath { raw, segments }
    }

    /// Returns the path exactly as it was written.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Returns the individual path segments.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Returns `true` if the path has no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Resolves this path against a record. See [`resolve`].
    pub fn resolve<'a>(&self, record: &'a Value) -> Option<&'a Value> {
        resolve(record, self)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl From<&str> for FieldPath {
    fn from(path: &str) -> Self {
        FieldPath::parse(path)
    }
}

impl From<String> for FieldPath {
    fn from(path: String) -> Self {
        FieldPath::parse(path)
    }
}

impl From<&String> for FieldPath {
    fn from(path: &String) -> Self {
        FieldPath::parse(path.as_str())
    }
}

impl From<FieldPath> for String {
    fn from(path: FieldPath) -> Self {
        path.raw
    }
}

/// Resolves a field path against a record.
///
/// Object segments are looked up by key; a segment that parses as an index
/// also reaches into arrays (`"tags.0"`). Resolution stops with `None` as soon
/// as an intermediate value is missing, `null`, or a scalar. A terminal `null`
/// is returned as `Some(&Value::Null)`; use [`resolve_present`] to fold it away.
pub fn resolve<'a>(record: &'a Value, path: &FieldPath) -> Option<&'a Value> {
    if path.is_empty() {
        return None;
    }

    let mut current = record;
    for segment in path.segments() {
        current = match current {
            Value::Object(map) => map.get(segment)?,
            Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(current)
}

/// Like [`resolve`], but treats a `null` value as absent.
pub fn resolve_present<'a>(record: &'a Value, path: &FieldPath) -> Option<&'a Value> {
    resolve(record, path).filter(|value| !value.is_null())
}

/// Coerces a value to its display string.
///
/// Returns `None` for `null`. Numbers with an integral value print without a
/// fractional part, arrays join their elements with `,` (nulls become empty),
/// and objects print as compact JSON.
pub fn coerce_to_string(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(format_number(n)),
        Value::Array(items) => Some(
            items
                .iter()
                .map(|item| coerce_to_string(item).unwrap_or_default())
                .collect::<Vec<_>>()
                .join(","),
        ),
        Value::Object(_) => Some(value.to_string()),
    }
}

/// Coerces a value to a number for relational comparison.
///
/// Numbers convert directly, booleans become `0`/`1`, and strings are parsed
/// after trimming (a blank string is `0`). Anything else has no numeric form.
pub fn coerce_to_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                Some(0.0)
            } else {
                trimmed.parse::<f64>().ok().filter(|n| !n.is_nan())
            }
        }
        _ => None,
    }
}

fn format_number(n: &serde_json::Number) -> String {
    if n.is_i64() || n.is_u64() {
        return n.to_string();
    }
    match n.as_f64() {
        Some(f) if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e21 => format!("{:.0}", f),
        Some(f) => f.to_string(),
        None => n.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_splits_on_dots() {
        let path = FieldPath::parse("user.profile.age");
        assert_eq!(path.segments(), ["user", "profile", "age"]);
        assert_eq!(path.as_str(), "user.profile.age");
        assert!(!path.is_empty());
        assert!(FieldPath::parse("").is_empty());
    }

    #[test]
    fn resolves_nested_objects() {
        let record = json!({ "user": { "profile": { "age": 42 } } });
        assert_eq!(
            resolve(&record, &"user.profile.age".into()),
            Some(&json!(42))
        );
        assert_eq!(
            resolve(&record, &"user.profile".into()),
            Some(&json!({ "age": 42 }))
        );
    }

    #[test]
    fn missing_segment_is_none() {
        let record = json!({ "user": { "name": "Ada" } });
        assert_eq!(resolve(&record, &"user.email".into()), None);
        assert_eq!(resolve(&record, &"account.id".into()), None);
        assert_eq!(resolve(&record, &"user.name.first".into()), None);
    }

    #[test]
    fn null_intermediate_is_none() {
        let record = json!({ "user": null });
        assert_eq!(resolve(&record, &"user.name".into()), None);
        assert_eq!(resolve(&Value::Null, &"anything".into()), None);
    }

    #[test]
    fn terminal_null_is_kept_but_not_present() {
        let record = json!({ "deleted_at": null });
        let path = FieldPath::parse("deleted_at");
        assert_eq!(resolve(&record, &path), Some(&Value::Null));
        assert_eq!(resolve_present(&record, &path), None);
    }

    #[test]
    fn numeric_segments_index_arrays() {
        let record = json!({ "tags": ["red", "green"] });
        assert_eq!(resolve(&record, &"tags.1".into()), Some(&json!("green")));
        assert_eq!(resolve(&record, &"tags.5".into()), None);
        assert_eq!(resolve(&record, &"tags.first".into()), None);
    }

    #[test]
    fn empty_path_resolves_to_nothing() {
        let record = json!({ "": 1 });
        assert_eq!(resolve(&record, &FieldPath::default()), None);
    }

    #[test]
    fn coerce_scalars() {
        assert_eq!(coerce_to_string(&json!("x")), Some("x".to_string()));
        assert_eq!(coerce_to_string(&json!(5)), Some("5".to_string()));
        assert_eq!(coerce_to_string(&json!(-3)), Some("-3".to_string()));
        assert_eq!(coerce_to_string(&json!(5.0)), Some("5".to_string()));
        assert_eq!(coerce_to_string(&json!(2.5)), Some("2.5".to_string()));
        assert_eq!(coerce_to_string(&json!(true)), Some("true".to_string()));
        assert_eq!(coerce_to_string(&Value::Null), None);
    }

    #[test]
    fn coerce_compound_values() {
        assert_eq!(
            coerce_to_string(&json!(["a", 1, null, true])),
            Some("a,1,,true".to_string())
        );
        assert_eq!(
            coerce_to_string(&json!({ "k": 1 })),
            Some(r#"{"k":1}"#.to_string())
        );
    }

    #[test]
    fn numeric_coercion() {
        assert_eq!(coerce_to_number(&json!(3)), Some(3.0));
        assert_eq!(coerce_to_number(&json!(true)), Some(1.0));
        assert_eq!(coerce_to_number(&json!(" 12.5 ")), Some(12.5));
        assert_eq!(coerce_to_number(&json!("")), Some(0.0));
        assert_eq!(coerce_to_number(&json!("abc")), None);
        assert_eq!(coerce_to_number(&json!([1])), None);
        assert_eq!(coerce_to_number(&Value::Null), None);
    }

    #[test]
    fn serde_round_trips_as_string() {
        let path: FieldPath = serde_json::from_str(r#""a.b""#).unwrap();
        assert_eq!(path.segments(), ["a", "b"]);
        assert_eq!(serde_json::to_string(&path).unwrap(), r#""a.b""#);
    }
}
