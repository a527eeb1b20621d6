//! Error types for the tabview crate.
//!
//! The pipeline stages themselves never fail: bad paths resolve to "no value"
//! and page numbers are clamped. Errors only surface at the boundary, when
//! columns, configuration, or user-supplied names are validated.

use thiserror::Error;

/// Errors that can occur when building or configuring a view.
#[derive(Debug, Error)]
pub enum ViewError {
    /// A sortable or filterable column was declared without a field path.
    #[error("column {index} is {capability} but has an empty field path")]
    EmptyColumnField {
        index: usize,
        capability: &'static str,
    },

    /// Configuration values violate an invariant.
    #[error("invalid view configuration: {0}")]
    InvalidConfig(String),

    /// Unknown match mode name.
    #[error("unknown match mode '{0}'")]
    UnknownMatchMode(String),

    /// Unknown sort direction name.
    #[error("unknown sort direction '{0}'")]
    UnknownDirection(String),

    /// YAML configuration could not be parsed.
    #[error("failed to parse YAML configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON configuration could not be parsed.
    #[error("failed to parse JSON configuration: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for tabview operations.
pub type Result<T> = std::result::Result<T, ViewError>;
