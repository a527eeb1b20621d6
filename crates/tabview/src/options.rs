//! Searchable select options.
//!
//! A select control holds a list of options, optionally grouped (each group
//! carries a label and a list of child options). Filtering works on the leaf
//! options: a group survives iff at least one child matches, and only the
//! matching children are kept.
//!
//! Which fields hold an option's label, value and disabled flag, and which
//! fields hold a group's label and children, is configured with
//! [`OptionPaths`].

use log::trace;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::filter::FilterState;
use crate::path::{coerce_to_string, resolve, resolve_present, FieldPath};

/// Field paths used to read options and groups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OptionPaths {
    /// Path of an option's display label.
    pub label: FieldPath,
    /// Path of an option's value.
    pub value: FieldPath,
    /// Path of an option's disabled flag.
    pub disabled: FieldPath,
    /// Path of a group's label.
    pub group_label: FieldPath,
    /// Path of a group's child options.
    pub group_children: FieldPath,
    /// Whether top-level entries may be groups.
    pub grouped: bool,
}

impl Default for OptionPaths {
    fn default() -> Self {
        OptionPaths {
            label: "label".into(),
            value: "value".into(),
            disabled: "disabled".into(),
            group_label: "label".into(),
            group_children: "items".into(),
            grouped: false,
        }
    }
}

impl OptionPaths {
    /// Default paths with grouping enabled.
    pub fn grouped() -> Self {
        OptionPaths {
            grouped: true,
            ..Default::default()
        }
    }

    /// Returns the children of `entry` if it is a group.
    ///
    /// An entry is a group only when grouping is enabled and its children
    /// path resolves to an array.
    pub fn group_children<'a>(&self, entry: &'a Value) -> Option<&'a [Value]> {
        if !self.grouped {
            return None;
        }
        match resolve(entry, &self.group_children) {
            Some(Value::Array(children)) => Some(children),
            _ => None,
        }
    }

    /// Returns an option's label, or an empty string.
    pub fn label(&self, option: &Value) -> String {
        resolve_present(option, &self.label)
            .and_then(coerce_to_string)
            .unwrap_or_default()
    }

    /// Returns a group's label, or an empty string.
    pub fn group_label(&self, group: &Value) -> String {
        resolve_present(group, &self.group_label)
            .and_then(coerce_to_string)
            .unwrap_or_default()
    }

    /// Returns an option's value.
    ///
    /// With an empty value path the option itself is the value.
    pub fn value<'a>(&self, option: &'a Value) -> Option<&'a Value> {
        if self.value.is_empty() {
            return Some(option);
        }
        resolve(option, &self.value)
    }

    /// Returns `true` if the option's disabled flag is truthy.
    pub fn is_disabled(&self, option: &Value) -> bool {
        resolve_present(option, &self.disabled).is_some_and(is_truthy)
    }
}

/// One entry of a filtered option list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum OptionEntry<'a> {
    /// A plain option.
    Item(&'a Value),
    /// A group with its surviving children.
    Group {
        /// The group record.
        group: &'a Value,
        /// Children that matched the filter.
        items: Vec<&'a Value>,
    },
}

impl<'a> OptionEntry<'a> {
    /// Returns the leaf options in this entry.
    pub fn options(&self) -> Vec<&'a Value> {
        match self {
            OptionEntry::Item(option) => vec![*option],
            OptionEntry::Group { items, .. } => items.clone(),
        }
    }
}

/// Filters select options.
///
/// The filter's scope names the option fields to search; an empty scope
/// searches the label path. With an empty query every entry is returned, and
/// groups keep all of their children.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use tabview::{filter_options, FilterState, OptionPaths};
///
/// let options = vec![
///     json!({ "label": "Fruit", "items": [{ "label": "Apple" }, { "label": "Banana" }] }),
///     json!({ "label": "Veg", "items": [{ "label": "Carrot" }] }),
/// ];
/// let entries = filter_options(&options, &FilterState::new("an"), &OptionPaths::grouped());
/// assert_eq!(entries.len(), 1);
/// assert_eq!(entries[0].options(), vec![&json!({ "label": "Banana" })]);
/// ```
pub fn filter_options<'a>(
    options: &'a [Value],
    filter: &FilterState,
    paths: &OptionPaths,
) -> Vec<OptionEntry<'a>> {
    let fields: Vec<&FieldPath> = if filter.scope.is_empty() {
        vec![&paths.label]
    } else {
        filter.scope.iter().collect()
    };
    let active = filter.is_active();
    let matcher = filter.matcher();
    let keep = |option: &Value| !active || matcher.matches(option, &fields);

    let entries: Vec<OptionEntry<'a>> = options
        .iter()
        .filter_map(|entry| match paths.group_children(entry) {
            Some(children) => {
                let items: Vec<&'a Value> = children.iter().filter(|c| keep(*c)).collect();
                if items.is_empty() && active {
                    None
                } else {
                    Some(OptionEntry::Group {
                        group: entry,
                        items,
                    })
                }
            }
            None => keep(entry).then_some(OptionEntry::Item(entry)),
        })
        .collect();

    trace!(
        "filter_options: query={:?} entries={} kept={}",
        filter.query,
        options.len(),
        entries.len()
    );
    entries
}

/// Finds the option whose value equals `value`, searching inside groups.
pub fn find_option_by_value<'a>(
    options: &'a [Value],
    value: &Value,
    paths: &OptionPaths,
) -> Option<&'a Value> {
    let is_match = |option: &&'a Value| {
        paths
            .value(option)
            .is_some_and(|candidate| values_equal(candidate, value))
    };

    options.iter().find_map(|entry| match paths.group_children(entry) {
        Some(children) => children.iter().find(is_match),
        None => Some(entry).filter(is_match),
    })
}

/// Compares option values: identical, or equal once both are coerced to
/// strings (so `1` matches `"1"`). `null` only equals `null`.
pub fn values_equal(a: &Value, b: &Value) -> bool {
    if a == b {
        return true;
    }
    match (coerce_to_string(a), coerce_to_string(b)) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

/// Returns `true` when nothing is selected: `null`, an empty array, or a
/// blank string.
pub fn is_empty_selection(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::Array(items)) => items.is_empty(),
        Some(Value::String(s)) => s.trim().is_empty(),
        Some(_) => false,
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
