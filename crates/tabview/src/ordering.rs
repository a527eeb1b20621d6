//! Sort stage.
//!
//! Provides [`Dir`] for sort direction, [`SortState`] for the active sort key
//! and its toggle policy, and [`sort`] which orders records by a single field.
//!
//! Ordering rules:
//!
//! - values rank by kind: missing or `null`, then numbers and booleans, then
//!   strings, then arrays and objects
//! - missing values come first ascending and last descending
//! - numbers compare numerically (`true` is 1, `false` is 0)
//! - strings compare with [`collate`], a locale-aware ordering
//! - arrays and objects all tie with each other
//! - the sort is stable, so equal keys keep their input order
//!
//! The comparison is a total order for any mix of JSON values.

use std::cmp::Ordering;
use std::str::FromStr;

use deunicode::deunicode;
use log::trace;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ViewError;
use crate::path::{resolve_present, FieldPath};

/// Direction of the active sort key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dir {
    /// Missing values first.
    #[default]
    Asc,
    /// Missing values last.
    Desc,
}

impl Dir {
    /// Returns `true` for [`Dir::Asc`].
    pub fn is_asc(self) -> bool {
        self == Dir::Asc
    }

    /// Flips the direction, as a second click on the same header does.
    pub fn toggled(self) -> Dir {
        match self {
            Dir::Asc => Dir::Desc,
            Dir::Desc => Dir::Asc,
        }
    }

    /// Orients an ascending comparison result.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Dir::Asc => ordering,
            Dir::Desc => ordering.reverse(),
        }
    }

    /// Returns the serialized name, `asc` or `desc`.
    pub fn as_str(self) -> &'static str {
        match self {
            Dir::Asc => "asc",
            Dir::Desc => "desc",
        }
    }
}

impl std::fmt::Display for Dir {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Dir {
    type Err = ViewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(Dir::Asc),
            "desc" => Ok(Dir::Desc),
            other => Err(ViewError::UnknownDirection(other.to_string())),
        }
    }
}

/// The active sort key.
///
/// An empty `field` disables sorting.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SortState {
    /// The field to sort by.
    pub field: FieldPath,
    /// The sort direction.
    pub direction: Dir,
}

impl SortState {
    /// Creates an ascending sort on the given field.
    pub fn asc(field: impl Into<FieldPath>) -> Self {
        SortState::new(field, Dir::Asc)
    }

    /// Creates a descending sort on the given field.
    pub fn desc(field: impl Into<FieldPath>) -> Self {
        SortState::new(field, Dir::Desc)
    }

    /// Creates a sort with the given direction.
    pub fn new(field: impl Into<FieldPath>, direction: Dir) -> Self {
        SortState {
            field: field.into(),
            direction,
        }
    }

    /// Returns `true` when a sort field is set.
    pub fn is_active(&self) -> bool {
        !self.field.is_empty()
    }

    /// Applies a user request to sort by `field`.
    ///
    /// Requesting the field that is already sorted flips the direction.
    /// Requesting any other field makes it active, ascending.
    ///
    /// ```
    /// use tabview::{Dir, SortState};
    ///
    /// let s = SortState::default().toggle("name");
    /// assert_eq!(s.direction, Dir::Asc);
    /// let s = s.toggle("name");
    /// assert_eq!(s.direction, Dir::Desc);
    /// let s = s.toggle("age");
    /// assert_eq!((s.field.as_str(), s.direction), ("age", Dir::Asc));
    /// ```
    pub fn toggle(self, field: impl Into<FieldPath>) -> SortState {
        let field = field.into();
        if self.is_active() && field == self.field {
            SortState {
                direction: self.direction.toggled(),
                ..self
            }
        } else {
            SortState::asc(field)
        }
    }

    /// Disables sorting.
    pub fn clear(&mut self) {
        self.field = FieldPath::default();
        self.direction = Dir::Asc;
    }

    /// Compares two records by this sort key, direction applied.
    pub fn compare(&self, a: &Value, b: &Value) -> Ordering {
        let val_a = resolve_present(a, &self.field);
        let val_b = resolve_present(b, &self.field);
        self.direction.apply(compare_values(val_a, val_b))
    }
}

/// Compares two resolved field values in ascending order.
///
/// `None` stands for a missing or `null` value and is smaller than anything
/// else. Values of different kinds order by kind (numbers and booleans, then
/// strings, then arrays and objects); values of the same kind compare
/// numerically, with [`collate`], or as equal for arrays and objects.
pub fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    SortKey::of(a).compare(&SortKey::of(b))
}

/// A field value reduced to what the sort compares.
enum SortKey<'a> {
    Missing,
    Number(f64),
    Text(&'a str),
    Composite,
}

impl<'a> SortKey<'a> {
    fn of(value: Option<&'a Value>) -> Self {
        match value {
            None | Some(Value::Null) => SortKey::Missing,
            Some(Value::Bool(b)) => SortKey::Number(if *b { 1.0 } else { 0.0 }),
            Some(Value::Number(n)) => n.as_f64().map_or(SortKey::Composite, SortKey::Number),
            Some(Value::String(s)) => SortKey::Text(s),
            Some(Value::Array(_)) | Some(Value::Object(_)) => SortKey::Composite,
        }
    }

    fn rank(&self) -> u8 {
        match self {
            SortKey::Missing => 0,
            SortKey::Number(_) => 1,
            SortKey::Text(_) => 2,
            SortKey::Composite => 3,
        }
    }

    fn compare(&self, other: &SortKey<'_>) -> Ordering {
        match (self, other) {
            (SortKey::Number(a), SortKey::Number(b)) => a.total_cmp(b),
            (SortKey::Text(a), SortKey::Text(b)) => collate(a, b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

/// Locale-aware string ordering.
///
/// Strings are compared in successive levels, each consulted only when the
/// previous one ties:
///
/// 1. base letters: transliterated to ASCII and lower-cased, so `"é"` sorts
///    with `"e"` and `"B"` with `"b"`
/// 2. accents: the lower-cased original text
/// 3. case: lower case before upper case
/// 4. code points, so distinct strings never compare equal
pub fn collate(a: &str, b: &str) -> Ordering {
    if a == b {
        return Ordering::Equal;
    }
    deunicode(a)
        .to_lowercase()
        .cmp(&deunicode(b).to_lowercase())
        .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
        .then_with(|| swap_case(a).cmp(&swap_case(b)))
        .then_with(|| a.cmp(b))
}

fn swap_case(s: &str) -> String {
    s.chars()
        .flat_map(|c| -> Vec<char> {
            if c.is_uppercase() {
                c.to_lowercase().collect()
            } else {
                c.to_uppercase().collect()
            }
        })
        .collect()
}

/// Runs the sort stage.
///
/// Returns a new, stably ordered collection; the input is never reordered.
/// With an empty sort field the records come back in input order.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use tabview::{sort, SortState};
///
/// let records = vec![json!({ "k": 5 }), json!({ "k": null }), json!({ "k": 1 })];
/// let sorted = sort(&records, &SortState::asc("k"));
/// assert_eq!(sorted, vec![&records[1], &records[2], &records[0]]);
/// ```
pub fn sort<'a, I>(records: I, state: &SortState) -> Vec<&'a Value>
where
    I: IntoIterator<Item = &'a Value>,
{
    let mut sorted: Vec<&'a Value> = records.into_iter().collect();
    if state.is_active() {
        sorted.sort_by(|a, b| state.compare(a, b));
        trace!(
            "sort: field={} dir={} records={}",
            state.field,
            state.direction,
            sorted.len()
        );
    }
    sorted
}
