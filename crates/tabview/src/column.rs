//! Column descriptors.
//!
//! A [`Column`] names the field it displays and declares whether it takes part
//! in sorting and free-text filtering. Columns are declared once and treated as
//! immutable for the lifetime of a view.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::error::{Result, ViewError};
use crate::path::{coerce_to_string, resolve, FieldPath};

/// Formats a cell from its resolved value (if any) and the whole record.
pub type Formatter = Arc<dyn Fn(Option<&Value>, &Value) -> String + Send + Sync>;

/// A column of a tabular view.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use tabview::Column;
///
/// let col = Column::new("user.name").header("Name").sortable().filterable();
/// let record = json!({ "user": { "name": "Ada" } });
/// assert_eq!(col.cell_text(&record), "Ada");
/// assert_eq!(col.header_text(), "Name");
/// ```
#[derive(Clone, Default)]
pub struct Column {
    /// Path of the value shown in this column.
    pub field: FieldPath,
    /// Optional header title. Falls back to the field path.
    pub header: Option<String>,
    /// Whether clicking the header sorts by this column.
    pub sortable: bool,
    /// Whether free-text filtering searches this column.
    pub filterable: bool,
    /// Optional custom cell formatter.
    pub formatter: Option<Formatter>,
    /// Text shown when the field has no value and no formatter is set.
    pub null_repr: String,
}

impl Column {
    /// Creates a column for the given field path.
    pub fn new(field: impl Into<FieldPath>) -> Self {
        Column {
            field: field.into(),
            ..Default::default()
        }
    }

    /// Set the header title.
    pub fn header(mut self, header: impl Into<String>) -> Self {
        self.header = Some(header.into());
        self
    }

    /// Mark the column as sortable.
    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    /// Mark the column as searchable by the free-text filter.
    pub fn filterable(mut self) -> Self {
        self.filterable = true;
        self
    }

    /// Set a custom formatter.
    pub fn format<F>(mut self, formatter: F) -> Self
    where
        F: Fn(Option<&Value>, &Value) -> String + Send + Sync + 'static,
    {
        self.formatter = Some(Arc::new(formatter));
        self
    }

    /// Set the representation for missing values.
    pub fn null_repr(mut self, null_repr: impl Into<String>) -> Self {
        self.null_repr = null_repr.into();
        self
    }

    /// Returns the header title, or the field path if none was set.
    pub fn header_text(&self) -> &str {
        self.header.as_deref().unwrap_or(self.field.as_str())
    }

    /// Resolves this column's raw value on a record.
    pub fn value<'a>(&self, record: &'a Value) -> Option<&'a Value> {
        resolve(record, &self.field)
    }

    /// Returns the display text for this column on a record.
    ///
    /// The formatter wins when set. Otherwise the resolved value is coerced
    /// to a string, and missing or `null` values show `null_repr`.
    pub fn cell_text(&self, record: &Value) -> String {
        let value = self.value(record);
        if let Some(formatter) = &self.formatter {
            return formatter(value, record);
        }
        value
            .and_then(coerce_to_string)
            .unwrap_or_else(|| self.null_repr.clone())
    }

    /// Checks the non-empty field invariant for sortable and filterable
    /// columns.
    pub fn validate(&self, index: usize) -> Result<()> {
        if self.field.is_empty() {
            if self.sortable {
                return Err(ViewError::EmptyColumnField {
                    index,
                    capability: "sortable",
                });
            }
            if self.filterable {
                return Err(ViewError::EmptyColumnField {
                    index,
                    capability: "filterable",
                });
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("field", &self.field)
            .field("header", &self.header)
            .field("sortable", &self.sortable)
            .field("filterable", &self.filterable)
            .field("formatter", &self.formatter.as_ref().map(|_| "<fn>"))
            .field("null_repr", &self.null_repr)
            .finish()
    }
}

/// Validates a whole column set.
pub fn validate_columns(columns: &[Column]) -> Result<()> {
    columns
        .iter()
        .enumerate()
        .try_for_each(|(index, column)| column.validate(index))
}

/// Returns the paths of every filterable column with a non-empty field.
pub fn filterable_fields(columns: &[Column]) -> Vec<&FieldPath> {
    columns
        .iter()
        .filter(|column| column.filterable && !column.field.is_empty())
        .map(|column| &column.field)
        .collect()
}

/// Finds the column declared for a field path.
pub fn find_column<'c>(columns: &'c [Column], field: &FieldPath) -> Option<&'c Column> {
    columns.iter().find(|column| &column.field == field)
}

/// Renders the header row.
pub fn header_row(columns: &[Column]) -> Vec<String> {
    columns
        .iter()
        .map(|column| column.header_text().to_string())
        .collect()
}

/// Renders one record as a row of cell texts.
pub fn row_cells(columns: &[Column], record: &Value) -> Vec<String> {
    columns.iter().map(|column| column.cell_text(record)).collect()
}
