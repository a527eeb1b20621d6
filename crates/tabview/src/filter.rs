//! Filter stage.
//!
//! Reduces a record collection to the records matching a free-text query. The
//! query is compared case-insensitively, after string coercion, against every
//! field in scope; a record is kept if **any** scoped field matches (or, for
//! [`MatchMode::NotEquals`], if **no** scoped field equals the query).

use log::trace;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::column::{filterable_fields, Column};
use crate::op::MatchMode;
use crate::path::{coerce_to_string, resolve_present, FieldPath};

/// Free-text filter settings.
///
/// An empty `query` disables filtering. An empty `scope` searches every
/// filterable column.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FilterState {
    /// Text to search for.
    pub query: String,
    /// How the query is compared against field values.
    pub match_mode: MatchMode,
    /// Fields to search. Empty means all filterable columns.
    pub scope: Vec<FieldPath>,
}

impl FilterState {
    /// Creates a `contains` filter over all filterable columns.
    pub fn new(query: impl Into<String>) -> Self {
        FilterState {
            query: query.into(),
            ..Default::default()
        }
    }

    /// Sets the match mode.
    pub fn match_mode(mut self, mode: MatchMode) -> Self {
        self.match_mode = mode;
        self
    }

    /// Restricts the search to the given fields.
    pub fn scope<I, P>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<FieldPath>,
    {
        self.scope = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Returns `true` when the filter actually filters (non-empty query).
    pub fn is_active(&self) -> bool {
        !self.query.is_empty()
    }

    /// Empties the query, turning the stage into a pass-through.
    pub fn clear(&mut self) {
        self.query.clear();
    }

    /// Resolves the fields this filter searches for the given columns.
    pub fn scoped_fields<'c>(&'c self, columns: &'c [Column]) -> Vec<&'c FieldPath> {
        if self.scope.is_empty() {
            filterable_fields(columns)
        } else {
            self.scope.iter().collect()
        }
    }

    /// Tests a single record against this filter.
    pub fn matches(&self, record: &Value, columns: &[Column]) -> bool {
        if !self.is_active() {
            return true;
        }
        let fields = self.scoped_fields(columns);
        self.matcher().matches(record, &fields)
    }

    pub(crate) fn matcher(&self) -> Matcher {
        Matcher {
            needle: self.query.to_lowercase(),
            mode: self.match_mode,
        }
    }
}

/// A lower-cased query bound to its match mode.
pub(crate) struct Matcher {
    needle: String,
    mode: MatchMode,
}

impl Matcher {
    /// Tests one resolved field value. Missing values never match.
    fn field_matches(&self, value: Option<&Value>) -> bool {
        match value.and_then(coerce_to_string) {
            Some(text) => self.mode.test(&text.to_lowercase(), &self.needle),
            None => false,
        }
    }

    /// Applies the any-field rule, inverted for `NotEquals`.
    pub(crate) fn matches(&self, record: &Value, fields: &[&FieldPath]) -> bool {
        let any = fields
            .iter()
            .any(|field| self.field_matches(resolve_present(record, field)));
        if self.mode.is_negated() {
            !any
        } else {
            any
        }
    }
}

/// Runs the filter stage.
///
/// Returns the matching records in their original order. With an empty query
/// every record is returned unchanged.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use tabview::{filter, Column, FilterState};
///
/// let records = vec![json!({ "name": "Jane" }), json!({ "name": "Bob" })];
/// let columns = vec![Column::new("name").filterable()];
///
/// let hits = filter(&records, &columns, &FilterState::new("JA"));
/// assert_eq!(hits, vec![&records[0]]);
/// ```
pub fn filter<'a, I>(records: I, columns: &[Column], state: &FilterState) -> Vec<&'a Value>
where
    I: IntoIterator<Item = &'a Value>,
{
    if !state.is_active() {
        return records.into_iter().collect();
    }

    let fields = state.scoped_fields(columns);
    let matcher = state.matcher();
    let kept: Vec<&'a Value> = records
        .into_iter()
        .filter(|record| matcher.matches(record, &fields))
        .collect();

    trace!(
        "filter: query={:?} mode={} fields={} kept={}",
        state.query,
        state.match_mode,
        fields.len(),
        kept.len()
    );
    kept
}
