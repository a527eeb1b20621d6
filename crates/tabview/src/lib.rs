//! Tabview - Data-view engine for tables, paginators and searchable selects.
//!
//! Tabview turns a collection of JSON records into the slice a user should
//! see. It supports:
//!
//! - Dotted field paths into nested records (`user.address.city`, `tags.0`)
//! - Case-insensitive free-text filtering with five match modes
//! - Single-key stable sorting with locale-aware string collation
//! - Page slicing with automatic clamping and a bounded page window
//! - Filtering of flat or grouped option lists for select controls
//!
//! # Quick Start
//!
//! ```rust
//! use serde_json::json;
//! use tabview::{process, Column, ViewState};
//!
//! let users = vec![
//!     json!({ "name": "Ann", "role": "admin" }),
//!     json!({ "name": "Bob", "role": "user" }),
//!     json!({ "name": "Cara", "role": "user" }),
//! ];
//! let columns = vec![
//!     Column::new("name").sortable().filterable(),
//!     Column::new("role").filterable(),
//! ];
//!
//! let mut state = ViewState::default();
//! state.set_query("a");
//! state.sort_by(&columns, "name");
//!
//! let view = process(&users, &columns, state);
//! let names: Vec<_> = view.visible.iter().map(|u| &u["name"]).collect();
//! assert_eq!(names, ["Ann", "Cara"]);
//! assert_eq!(view.window.pages(), &[1]);
//! ```
//!
//! # Pipeline
//!
//! Every call runs the same stages in the same order:
//!
//! ```text
//! records ──filter──▶ matched ──sort──▶ ordered ──paginate──▶ visible
//!                                                     │
//!                                                     └──▶ page window
//! ```
//!
//! - **Filter**: keeps records where some scoped field matches the query.
//!   With `notEquals`, keeps records where no scoped field equals it.
//! - **Sort**: stable; missing and null values come first ascending and last
//!   descending.
//! - **Paginate**: the current page is clamped into `[1, total_pages]` and
//!   there is always at least one page.
//!
//! The engine holds no per-view state. Callers keep a [`ViewState`], update it
//! from user input, and pass it to [`process`] again.
//!
//! # Stages on their own
//!
//! Each stage is also a standalone function over `&Value` iterators:
//!
//! ```rust
//! use serde_json::json;
//! use tabview::{filter, paginate, sort, Column, FilterState, SortState};
//!
//! let rows = vec![json!({ "n": 3 }), json!({ "n": 1 }), json!({ "n": 2 })];
//! let columns = vec![Column::new("n").filterable()];
//!
//! let kept = filter(&rows, &columns, &FilterState::default());
//! let sorted = sort(kept, &SortState::desc("n"));
//! let page = paginate(&sorted, 2, 1);
//! assert_eq!(page.items, &[&rows[0], &rows[2]]);
//! ```

mod column;
mod config;
mod error;
mod filter;
mod op;
mod options;
mod ordering;
mod page;
mod path;
mod view;
mod window;

// Re-export public API
pub use column::{
    filterable_fields, find_column, header_row, row_cells, validate_columns, Column, Formatter,
};
pub use config::ViewConfig;
pub use error::{Result, ViewError};
pub use filter::{filter, FilterState};
pub use op::MatchMode;
pub use options::{
    filter_options, find_option_by_value, is_empty_selection, values_equal, OptionEntry,
    OptionPaths,
};
pub use ordering::{collate, compare_values, sort, Dir, SortState};
pub use page::{
    clamp_page, page_count, paginate, Page, PageEvent, PageRange, PageState, DEFAULT_PAGE_SIZE,
    DEFAULT_PAGE_SIZE_OPTIONS,
};
pub use path::{coerce_to_number, coerce_to_string, resolve, resolve_present, FieldPath};
pub use view::{process, ViewEngine, ViewOutput, ViewState};
pub use window::{page_window, PageWindow, WindowItem, DEFAULT_MAX_VISIBLE};
