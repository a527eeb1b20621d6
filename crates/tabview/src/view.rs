//! View pipeline.
//!
//! [`ViewEngine::process`] runs the stages strictly in order, filter, then
//! sort, then paginate, and computes the page window for the result. It keeps
//! no state between calls: the caller owns a [`ViewState`], mutates it through
//! the methods below in response to user input, passes it in by value, and
//! receives the next state (with the page clamped) alongside the computed
//! view.
//!
//! ```
//! use serde_json::json;
//! use tabview::{Column, ViewEngine, ViewState};
//!
//! let records: Vec<_> = (1..=12).map(|n| json!({ "n": n })).collect();
//! let columns = vec![Column::new("n").sortable().filterable()];
//! let engine = ViewEngine::default();
//!
//! let mut state = ViewState::default();
//! state.set_page_size(5);
//! state.sort_by(&columns, "n");
//! state.sort_by(&columns, "n"); // second click: descending
//!
//! let view = engine.process(&records, &columns, state);
//! assert_eq!(view.visible[0]["n"], 12);
//! assert_eq!(view.window.pages(), &[1, 2, 3]);
//! assert_eq!(view.range.to_string(), "Showing 1 to 5 of 12 entries");
//! ```

use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::column::{find_column, row_cells, Column};
use crate::config::ViewConfig;
use crate::filter::{filter, FilterState};
use crate::op::MatchMode;
use crate::ordering::{sort, SortState};
use crate::page::{paginate, PageEvent, PageRange, PageState};
use crate::path::FieldPath;
use crate::window::{page_window, PageWindow};

/// Caller-owned state of a view: filter, sort key, and page position.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewState {
    /// Free-text filter.
    pub filter: FilterState,
    /// Active sort key.
    pub sort: SortState,
    /// Page size and current page.
    pub page: PageState,
}

impl ViewState {
    /// Replaces the filter query and returns to the first page.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.filter.query = query.into();
        self.page.current_page = 1;
    }

    /// Clears the filter query and returns to the first page.
    pub fn clear_filter(&mut self) {
        self.set_query(String::new());
    }

    /// Changes the match mode and returns to the first page.
    pub fn set_match_mode(&mut self, mode: MatchMode) {
        self.filter.match_mode = mode;
        self.page.current_page = 1;
    }

    /// Handles a click on the header of `field`.
    ///
    /// Only sortable columns react. Returns `true` if the sort changed.
    pub fn sort_by(&mut self, columns: &[Column], field: impl Into<FieldPath>) -> bool {
        let field = field.into();
        match find_column(columns, &field) {
            Some(column) if column.sortable && !field.is_empty() => {
                self.sort = std::mem::take(&mut self.sort).toggle(field);
                true
            }
            _ => false,
        }
    }

    /// Changes the page size and returns to the first page.
    pub fn set_page_size(&mut self, page_size: usize) {
        self.page.set_page_size(page_size);
    }

    /// Jumps to `page` if it exists. See [`PageState::go_to`].
    pub fn go_to_page(&mut self, page: usize, total_pages: usize) -> bool {
        self.page.go_to(page, total_pages)
    }
}

/// The computed view handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewOutput<'a> {
    /// The state to keep for the next call.
    ///
    /// When paginated, its page is clamped to `current_page`. Unpaginated
    /// views leave the caller's page untouched so it survives turning
    /// pagination back on.
    pub state: ViewState,
    /// Records on the current page, filtered and sorted.
    pub visible: Vec<&'a Value>,
    /// Page numbers to show in the pagination control.
    pub window: PageWindow,
    /// Total number of pages (at least 1).
    pub total_pages: usize,
    /// Current page after clamping.
    pub current_page: usize,
    /// Number of records that passed the filter.
    pub total_records: usize,
    /// The "showing X to Y of Z" span.
    pub range: PageRange,
}

impl ViewOutput<'_> {
    /// Returns `true` if there is a page before the current one.
    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    /// Returns `true` if there is a page after the current one.
    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    /// Builds the page-change notification for this view.
    pub fn event(&self) -> PageEvent {
        let page = PageState {
            current_page: self.current_page,
            ..self.state.page
        };
        page.event(self.total_records)
    }

    /// Renders the visible records as rows of cell text.
    pub fn rows(&self, columns: &[Column]) -> Vec<Vec<String>> {
        self.visible
            .iter()
            .map(|record| row_cells(columns, record))
            .collect()
    }
}

/// Runs the view pipeline under a fixed configuration.
#[derive(Debug, Clone, Default)]
pub struct ViewEngine {
    config: ViewConfig,
}

impl ViewEngine {
    /// Creates an engine with the given configuration.
    pub fn new(config: ViewConfig) -> Self {
        ViewEngine { config }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    /// Builds the state a fresh view starts from.
    pub fn initial_state(&self) -> ViewState {
        self.config.initial_state()
    }

    /// Runs filter, sort and paginate, then computes the page window.
    ///
    /// Every call recomputes everything from `records`; identical inputs
    /// always give identical output.
    pub fn process<'a>(
        &self,
        records: &'a [Value],
        columns: &[Column],
        state: ViewState,
    ) -> ViewOutput<'a> {
        let filtered = if self.config.filterable {
            filter(records, columns, &state.filter)
        } else {
            records.iter().collect()
        };

        let sorted = if self.config.sortable {
            sort(filtered, &state.sort)
        } else {
            filtered
        };

        let total_records = sorted.len();
        let (visible, current_page, total_pages, range) = if self.config.paginated {
            let page = paginate(&sorted, state.page.page_size, state.page.current_page);
            (
                page.items.to_vec(),
                page.current_page,
                page.total_pages,
                page.range(),
            )
        } else {
            let range = PageRange::new(0, total_records, total_records);
            (sorted, 1, 1, range)
        };

        let window = page_window(current_page, total_pages, self.config.max_visible_pages);

        let mut state = state;
        if self.config.paginated {
            state.page.current_page = current_page;
        }

        debug!(
            "process: records={} matched={} page={}/{} visible={}",
            records.len(),
            total_records,
            current_page,
            total_pages,
            visible.len()
        );

        ViewOutput {
            state,
            visible,
            window,
            total_pages,
            current_page,
            total_records,
            range,
        }
    }
}

/// Runs the view pipeline with the default configuration.
pub fn process<'a>(records: &'a [Value], columns: &[Column], state: ViewState) -> ViewOutput<'a> {
    ViewEngine::default().process(records, columns, state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ordering::Dir;
    use serde_json::json;

    fn records(n: usize) -> Vec<Value> {
        (1..=n)
            .map(|i| json!({ "id": i, "name": format!("item {}", i) }))
            .collect()
    }

    fn columns() -> Vec<Column> {
        vec![
            Column::new("id").sortable(),
            Column::new("name").filterable(),
            Column::new("note"),
        ]
    }

    fn ids(view: &ViewOutput<'_>) -> Vec<u64> {
        view.visible
            .iter()
            .map(|r| r["id"].as_u64().unwrap())
            .collect()
    }

    #[test]
    fn default_state_shows_first_page() {
        let data = records(25);
        let view = process(&data, &columns(), ViewState::default());
        assert_eq!(ids(&view), (1..=10).collect::<Vec<_>>());
        assert_eq!(view.total_pages, 3);
        assert_eq!(view.current_page, 1);
        assert_eq!(view.total_records, 25);
        assert_eq!(view.window.pages(), &[1, 2, 3]);
        assert!(!view.has_previous());
        assert!(view.has_next());
    }

    #[test]
    fn stages_run_in_order() {
        let data = records(12);
        let mut state = ViewState::default();
        state.set_page_size(2);
        state.set_query("1");
        state.sort_by(&columns(), "id");
        state.sort_by(&columns(), "id");

        // "1" matches ids 1, 10, 11, 12; sorted descending; first page of 2.
        let view = process(&data, &columns(), state);
        assert_eq!(view.total_records, 4);
        assert_eq!(ids(&view), vec![12, 11]);
        assert_eq!(view.total_pages, 2);
    }

    #[test]
    fn filter_shrink_clamps_page() {
        let data: Vec<Value> = (1..=12)
            .map(|i| {
                let team = if i % 4 == 0 { "red" } else { "blue" };
                json!({ "id": i, "name": team })
            })
            .collect();
        let mut state = ViewState::default();
        state.set_page_size(5);
        state.page.current_page = 3;

        let view = process(&data, &columns(), state.clone());
        assert_eq!(view.current_page, 3);

        // Set directly so the page is not reset before processing.
        state.filter.query = "red".to_string();
        let view = process(&data, &columns(), state);
        assert_eq!(view.total_records, 3);
        assert_eq!(view.current_page, 1);
        assert_eq!(view.state.page.current_page, 1);
        assert_eq!(view.window.pages(), &[1]);
        assert_eq!(ids(&view), vec![4, 8, 12]);
    }

    #[test]
    fn set_query_resets_page() {
        let mut state = ViewState::default();
        state.page.current_page = 4;
        state.set_query("x");
        assert_eq!(state.page.current_page, 1);

        state.page.current_page = 2;
        state.clear_filter();
        assert_eq!(state.page.current_page, 1);
        assert!(!state.filter.is_active());

        state.page.current_page = 2;
        state.set_match_mode(MatchMode::Equals);
        assert_eq!(state.page.current_page, 1);
    }

    #[test]
    fn sort_by_ignores_unsortable_columns() {
        let mut state = ViewState::default();
        assert!(!state.sort_by(&columns(), "name"));
        assert!(!state.sort_by(&columns(), "missing"));
        assert!(!state.sort.is_active());

        assert!(state.sort_by(&columns(), "id"));
        assert_eq!(state.sort, SortState::asc("id"));
        assert!(state.sort_by(&columns(), "id"));
        assert_eq!(state.sort.direction, Dir::Desc);
    }

    #[test]
    fn sort_keeps_current_page() {
        let mut state = ViewState::default();
        state.page.current_page = 2;
        state.sort_by(&columns(), "id");
        assert_eq!(state.page.current_page, 2);
    }

    #[test]
    fn go_to_page_uses_total() {
        let data = records(25);
        let mut state = ViewState::default();
        let view = process(&data, &columns(), state.clone());
        assert!(state.go_to_page(3, view.total_pages));
        assert!(!state.go_to_page(4, view.total_pages));

        let view = process(&data, &columns(), state);
        assert_eq!(ids(&view), (21..=25).collect::<Vec<_>>());
        assert_eq!(view.event().page_index, 2);
        assert_eq!(view.range.to_string(), "Showing 21 to 25 of 25 entries");
    }

    #[test]
    fn unpaginated_shows_everything() {
        let engine = ViewEngine::new(ViewConfig {
            paginated: false,
            ..Default::default()
        });
        let data = records(25);
        let mut state = ViewState::default();
        state.page.current_page = 2;
        let view = engine.process(&data, &columns(), state);
        assert_eq!(view.visible.len(), 25);
        assert_eq!(view.total_pages, 1);
        assert_eq!(view.current_page, 1);
        assert_eq!(view.state.page.current_page, 2);
        assert_eq!(view.event().page_index, 0);
        assert_eq!(view.window.pages(), &[1]);
        assert_eq!(view.range.to_string(), "Showing 1 to 25 of 25 entries");
    }

    #[test]
    fn disabled_stages_pass_through() {
        let engine = ViewEngine::new(ViewConfig {
            filterable: false,
            sortable: false,
            ..Default::default()
        });
        let data = records(3);
        let state = ViewState {
            filter: FilterState::new("zzz"),
            sort: SortState::desc("id"),
            page: PageState::default(),
        };
        let view = engine.process(&data, &columns(), state);
        assert_eq!(ids(&view), vec![1, 2, 3]);
    }

    #[test]
    fn empty_collection() {
        let data: Vec<Value> = Vec::new();
        let view = process(&data, &columns(), ViewState::default());
        assert!(view.visible.is_empty());
        assert_eq!(view.total_pages, 1);
        assert_eq!(view.current_page, 1);
        assert_eq!(view.window.pages(), &[1]);
        assert_eq!(view.range.to_string(), "Showing 0 to 0 of 0 entries");
    }

    #[test]
    fn process_is_pure() {
        let data = records(40);
        let mut state = ViewState::default();
        state.set_query("item");
        state.sort_by(&columns(), "id");
        state.page.current_page = 3;

        let first = process(&data, &columns(), state.clone());
        let second = process(&data, &columns(), state);
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn rows_render_cells() {
        let data = records(2);
        let view = process(&data, &columns(), ViewState::default());
        assert_eq!(
            view.rows(&columns()),
            vec![
                vec!["1".to_string(), "item 1".to_string(), String::new()],
                vec!["2".to_string(), "item 2".to_string(), String::new()],
            ]
        );
    }

    #[test]
    fn engine_uses_config_window_and_initial_state() {
        let config = ViewConfig {
            page_size: 1,
            max_visible_pages: 3,
            default_sort: SortState::desc("id"),
            ..Default::default()
        };
        let engine = ViewEngine::new(config);
        let data = records(10);
        let view = engine.process(&data, &columns(), engine.initial_state());
        assert_eq!(ids(&view), vec![10]);
        assert_eq!(view.window.pages(), &[1, 2, 10]);
        assert_eq!(engine.config().page_size, 1);
    }

    #[test]
    fn state_round_trips_through_json() {
        let mut state = ViewState::default();
        state.set_query("abc");
        state.sort_by(&columns(), "id");
        state.set_page_size(25);

        let json = serde_json::to_string(&state).unwrap();
        let back: ViewState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state);
    }
}
