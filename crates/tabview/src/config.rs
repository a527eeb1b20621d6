//! View configuration.
//!
//! A [`ViewConfig`] captures the declarative settings of a table or paginator:
//! default page size, the page sizes offered, how many page links to show, and
//! which stages are switched on. It can be written in YAML or JSON; every
//! field is optional.
//!
//! ```yaml
//! page_size: 25
//! page_size_options: [10, 25, 100]
//! max_visible_pages: 7
//! default_sort:
//!   field: lastLogin
//!   direction: desc
//! ```

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ViewError};
use crate::filter::FilterState;
use crate::op::MatchMode;
use crate::ordering::SortState;
use crate::page::{PageState, DEFAULT_PAGE_SIZE, DEFAULT_PAGE_SIZE_OPTIONS};
use crate::view::ViewState;
use crate::window::DEFAULT_MAX_VISIBLE;

/// Settings shared by every render of a view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Initial records per page.
    pub page_size: usize,
    /// Page sizes offered to the user.
    pub page_size_options: Vec<usize>,
    /// Maximum number of page links in the page window.
    pub max_visible_pages: usize,
    /// When false, every record is shown on a single page.
    pub paginated: bool,
    /// When false, the filter stage is skipped.
    pub filterable: bool,
    /// When false, the sort stage is skipped.
    pub sortable: bool,
    /// Initial filter query.
    pub default_query: String,
    /// Initial match mode.
    pub default_match_mode: MatchMode,
    /// Initial sort key.
    pub default_sort: SortState,
}

impl Default for ViewConfig {
    fn default() -> Self {
        ViewConfig {
            page_size: DEFAULT_PAGE_SIZE,
            page_size_options: DEFAULT_PAGE_SIZE_OPTIONS.to_vec(),
            max_visible_pages: DEFAULT_MAX_VISIBLE,
            paginated: true,
            filterable: true,
            sortable: true,
            default_query: String::new(),
            default_match_mode: MatchMode::default(),
            default_sort: SortState::default(),
        }
    }
}

impl ViewConfig {
    /// Parses and validates a YAML configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::Yaml`] on malformed input and
    /// [`ViewError::InvalidConfig`] when a value is out of range.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: ViewConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        debug!("loaded view config from YAML: {:?}", config);
        Ok(config)
    }

    /// Parses and validates a JSON configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::Json`] on malformed input and
    /// [`ViewError::InvalidConfig`] when a value is out of range.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: ViewConfig = serde_json::from_str(json)?;
        config.validate()?;
        debug!("loaded view config from JSON: {:?}", config);
        Ok(config)
    }

    /// Checks value ranges.
    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(ViewError::InvalidConfig(
                "page_size must be at least 1".to_string(),
            ));
        }
        if let Some(bad) = self.page_size_options.iter().find(|&&size| size == 0) {
            return Err(ViewError::InvalidConfig(format!(
                "page_size_options must all be at least 1, got {}",
                bad
            )));
        }
        if self.max_visible_pages < 3 {
            return Err(ViewError::InvalidConfig(format!(
                "max_visible_pages must be at least 3, got {}",
                self.max_visible_pages
            )));
        }
        Ok(())
    }

    /// Builds the state a fresh view starts from.
    pub fn initial_state(&self) -> ViewState {
        ViewState {
            filter: FilterState::new(self.default_query.clone())
                .match_mode(self.default_match_mode),
            sort: self.default_sort.clone(),
            page: PageState::new(self.page_size),
        }
    }

    /// Returns the page size choices, including the current size if it is
    /// not already offered, in ascending order.
    pub fn page_size_choices(&self, current: usize) -> Vec<usize> {
        let mut choices = self.page_size_options.clone();
        if current > 0 && !choices.contains(&current) {
            choices.push(current);
        }
        choices.sort_unstable();
        choices.dedup();
        choices
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ordering::Dir;

    #[test]
    fn defaults() {
        let config = ViewConfig::default();
        assert_eq!(config.page_size, 10);
        assert_eq!(config.page_size_options, vec![5, 10, 25, 50]);
        assert_eq!(config.max_visible_pages, 5);
        assert!(config.paginated && config.filterable && config.sortable);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn from_yaml_partial() {
        let config = ViewConfig::from_yaml(
            r#"
page_size: 3
max_visible_pages: 7
default_sort:
  field: lastLogin
  direction: desc
"#,
        )
        .unwrap();
        assert_eq!(config.page_size, 3);
        assert_eq!(config.max_visible_pages, 7);
        assert_eq!(config.default_sort.field.as_str(), "lastLogin");
        assert_eq!(config.default_sort.direction, Dir::Desc);
        assert_eq!(config.page_size_options, vec![5, 10, 25, 50]);
    }

    #[test]
    fn from_json_with_match_mode() {
        let config = ViewConfig::from_json(
            r#"{ "default_query": "ann", "default_match_mode": "startsWith", "paginated": false }"#,
        )
        .unwrap();
        assert!(!config.paginated);

        let state = config.initial_state();
        assert_eq!(state.filter.query, "ann");
        assert_eq!(state.filter.match_mode, MatchMode::StartsWith);
        assert_eq!(state.page, PageState::new(10));
    }

    #[test]
    fn rejects_zero_page_size() {
        let err = ViewConfig::from_yaml("page_size: 0").unwrap_err();
        assert!(matches!(err, ViewError::InvalidConfig(_)));
        assert_eq!(
            err.to_string(),
            "invalid view configuration: page_size must be at least 1"
        );
    }

    #[test]
    fn rejects_zero_option() {
        let err = ViewConfig::from_json(r#"{ "page_size_options": [5, 0] }"#).unwrap_err();
        assert!(matches!(err, ViewError::InvalidConfig(_)));
    }

    #[test]
    fn rejects_narrow_window() {
        let err = ViewConfig::from_yaml("max_visible_pages: 2").unwrap_err();
        assert!(err.to_string().contains("max_visible_pages"));
    }

    #[test]
    fn malformed_input() {
        assert!(matches!(
            ViewConfig::from_yaml("page_size: [oops"),
            Err(ViewError::Yaml(_))
        ));
        assert!(matches!(
            ViewConfig::from_json("{ not json"),
            Err(ViewError::Json(_))
        ));
        assert!(matches!(
            ViewConfig::from_json(r#"{ "default_match_mode": "fuzzy" }"#),
            Err(ViewError::Json(_))
        ));
    }

    #[test]
    fn page_size_choices_include_current() {
        let config = ViewConfig::default();
        assert_eq!(config.page_size_choices(10), vec![5, 10, 25, 50]);
        assert_eq!(config.page_size_choices(3), vec![3, 5, 10, 25, 50]);
        assert_eq!(config.page_size_choices(0), vec![5, 10, 25, 50]);
    }
}
