//! String match modes for the filter stage.
//!
//! The [`MatchMode`] enum selects how a filter query is compared against a
//! field value. All modes compare case-insensitively after string coercion.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ViewError;

/// Comparison strategy applied by the filter stage.
///
/// - `Contains`: substring match (the default)
/// - `StartsWith` / `EndsWith`: prefix and suffix match
/// - `Equals`: exact match after coercion
/// - `NotEquals`: inverted membership; a record is kept when *no* scoped
///   field equals the query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MatchMode {
    /// Field contains the query.
    #[default]
    Contains,
    /// Field starts with the query.
    StartsWith,
    /// Field ends with the query.
    EndsWith,
    /// Field equals the query.
    Equals,
    /// No scoped field equals the query.
    NotEquals,
}

impl MatchMode {
    /// All match modes, in declaration order.
    pub const ALL: [MatchMode; 5] = [
        MatchMode::Contains,
        MatchMode::StartsWith,
        MatchMode::EndsWith,
        MatchMode::Equals,
        MatchMode::NotEquals,
    ];

    /// Returns `true` for the inverted mode, where a record survives only if
    /// none of its fields match.
    pub fn is_negated(self) -> bool {
        matches!(self, MatchMode::NotEquals)
    }

    /// Tests an already lower-cased field against an already lower-cased
    /// query.
    ///
    /// For `NotEquals` this reports whether the field *equals* the query; the
    /// inversion happens across all scoped fields in the filter stage.
    pub fn test(self, field: &str, query: &str) -> bool {
        match self {
            MatchMode::Contains => field.contains(query),
            MatchMode::StartsWith => field.starts_with(query),
            MatchMode::EndsWith => field.ends_with(query),
            MatchMode::Equals | MatchMode::NotEquals => field == query,
        }
    }

    /// Returns the name of this mode.
    pub fn as_str(self) -> &'static str {
        match self {
            MatchMode::Contains => "contains",
            MatchMode::StartsWith => "startsWith",
            MatchMode::EndsWith => "endsWith",
            MatchMode::Equals => "equals",
            MatchMode::NotEquals => "notEquals",
        }
    }
}

impl std::fmt::Display for MatchMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for MatchMode {
    type Err = ViewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MatchMode::ALL
            .into_iter()
            .find(|mode| mode.as_str() == s)
            .ok_or_else(|| ViewError::UnknownMatchMode(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_contains() {
        assert_eq!(MatchMode::default(), MatchMode::Contains);
    }

    #[test]
    fn test_each_mode() {
        assert!(MatchMode::Contains.test("jane smith", "smi"));
        assert!(!MatchMode::Contains.test("jane smith", "bob"));

        assert!(MatchMode::StartsWith.test("jane smith", "jane"));
        assert!(!MatchMode::StartsWith.test("jane smith", "smith"));

        assert!(MatchMode::EndsWith.test("jane smith", "smith"));
        assert!(!MatchMode::EndsWith.test("jane smith", "jane"));

        assert!(MatchMode::Equals.test("admin", "admin"));
        assert!(!MatchMode::Equals.test("admins", "admin"));

        // NotEquals reports equality; the stage inverts it.
        assert!(MatchMode::NotEquals.test("admin", "admin"));
        assert!(MatchMode::NotEquals.is_negated());
        assert!(!MatchMode::Equals.is_negated());
    }

    #[test]
    fn names_round_trip() {
        for mode in MatchMode::ALL {
            assert_eq!(mode.as_str().parse::<MatchMode>().unwrap(), mode);
        }
        assert_eq!(MatchMode::StartsWith.to_string(), "startsWith");
    }

    #[test]
    fn unknown_name_is_an_error() {
        let err = "regex".parse::<MatchMode>().unwrap_err();
        assert!(matches!(err, ViewError::UnknownMatchMode(name) if name == "regex"));
    }

    #[test]
    fn serde_uses_camel_case() {
        assert_eq!(
            serde_json::to_string(&MatchMode::NotEquals).unwrap(),
            r#""notEquals""#
        );
        let mode: MatchMode = serde_json::from_str(r#""endsWith""#).unwrap();
        assert_eq!(mode, MatchMode::EndsWith);
    }
}
