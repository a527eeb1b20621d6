//! Pagination stage.
//!
//! Slices a collection into one page and keeps the current page valid as the
//! collection grows and shrinks. Page numbers are 1-based throughout; only
//! [`PageEvent::page_index`] is 0-based, for consumers that expect an index.
//!
//! A `page_size` of 0 is a caller error. Instead of dividing by zero, every
//! function here treats it as a page size of 1.

use std::fmt;

use log::debug;
use serde::{Deserialize, Serialize};

/// Default number of records per page.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Default page sizes offered to the user.
pub const DEFAULT_PAGE_SIZE_OPTIONS: [usize; 4] = [5, 10, 25, 50];

fn effective_size(page_size: usize) -> usize {
    page_size.max(1)
}

/// Number of pages needed for `total_records`. Always at least 1.
pub fn page_count(total_records: usize, page_size: usize) -> usize {
    total_records.div_ceil(effective_size(page_size)).max(1)
}

/// Clamps a requested page into `[1, total_pages]`.
pub fn clamp_page(current_page: usize, total_pages: usize) -> usize {
    current_page.clamp(1, total_pages.max(1))
}

/// One page of a collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<'a, T> {
    /// Records on this page.
    pub items: &'a [T],
    /// The page shown, after clamping.
    pub current_page: usize,
    /// Total number of pages (at least 1).
    pub total_pages: usize,
    /// Number of records across all pages.
    pub total_records: usize,
    /// Offset of the first record on this page.
    pub start: usize,
    /// Offset one past the last record on this page.
    pub end: usize,
}

impl<T> Page<'_, T> {
    /// Returns the "showing X to Y of Z" range for this page.
    pub fn range(&self) -> PageRange {
        PageRange::new(self.start, self.end, self.total_records)
    }

    /// Returns `true` if there is a page before this one.
    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    /// Returns `true` if there is a page after this one.
    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }
}

/// Runs the pagination stage.
///
/// `current_page` is clamped into `[1, total_pages]`, so a page that no longer
/// exists after a filter shrank the collection falls back to the last one.
///
/// # Example
///
/// ```
/// use tabview::paginate;
///
/// let items: Vec<u32> = (1..=12).collect();
/// let page = paginate(&items, 5, 3);
/// assert_eq!(page.items, &[11, 12]);
///
/// let page = paginate(&items[..3], 5, 3);
/// assert_eq!(page.current_page, 1);
/// assert_eq!(page.items, &[1, 2, 3]);
/// ```
pub fn paginate<T>(records: &[T], page_size: usize, current_page: usize) -> Page<'_, T> {
    let size = effective_size(page_size);
    let total_records = records.len();
    let total_pages = page_count(total_records, size);
    let clamped = clamp_page(current_page, total_pages);

    if clamped != current_page {
        debug!(
            "paginate: page {} clamped to {} (total_pages={})",
            current_page, clamped, total_pages
        );
    }

    let start = ((clamped - 1) * size).min(total_records);
    let end = (start + size).min(total_records);

    Page {
        items: &records[start..end],
        current_page: clamped,
        total_pages,
        total_records,
        start,
        end,
    }
}

/// Caller-owned pagination settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PageState {
    /// Records per page.
    pub page_size: usize,
    /// Current 1-based page.
    pub current_page: usize,
}

impl Default for PageState {
    fn default() -> Self {
        PageState {
            page_size: DEFAULT_PAGE_SIZE,
            current_page: 1,
        }
    }
}

impl PageState {
    /// Creates a state on the first page.
    pub fn new(page_size: usize) -> Self {
        PageState {
            page_size,
            current_page: 1,
        }
    }

    /// Changes the page size and returns to the first page.
    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size;
        self.current_page = 1;
    }

    /// Jumps to `page` if it lies in `[1, total_pages]`.
    ///
    /// Out-of-range targets are ignored. Returns `true` if the page changed.
    pub fn go_to(&mut self, page: usize, total_pages: usize) -> bool {
        if page == self.current_page || page < 1 || page > total_pages {
            return false;
        }
        self.current_page = page;
        true
    }

    /// Jumps to the first page.
    pub fn first(&mut self, total_pages: usize) -> bool {
        self.go_to(1, total_pages)
    }

    /// Jumps to the last page.
    pub fn last(&mut self, total_pages: usize) -> bool {
        self.go_to(total_pages, total_pages)
    }

    /// Moves one page forward.
    pub fn next(&mut self, total_pages: usize) -> bool {
        self.go_to(self.current_page + 1, total_pages)
    }

    /// Moves one page back.
    pub fn previous(&mut self, total_pages: usize) -> bool {
        match self.current_page.checked_sub(1) {
            Some(page) => self.go_to(page, total_pages),
            None => false,
        }
    }

    /// Re-clamps the current page after the collection changed size.
    pub fn clamp(&mut self, total_records: usize) {
        let total_pages = page_count(total_records, self.page_size);
        self.current_page = clamp_page(self.current_page, total_pages);
    }

    /// Builds the notification payload for the current position.
    pub fn event(&self, length: usize) -> PageEvent {
        PageEvent {
            page_index: self.current_page.saturating_sub(1),
            page_size: self.page_size,
            length,
        }
    }
}

/// Payload emitted after the user changes page or page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageEvent {
    /// 0-based index of the current page.
    pub page_index: usize,
    /// Records per page.
    pub page_size: usize,
    /// Total number of records being paged.
    pub length: usize,
}

/// The 1-based, inclusive span of records shown on a page.
///
/// An empty collection shows `0 to 0 of 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageRange {
    /// First record shown (1-based), or 0 when nothing is shown.
    pub first: usize,
    /// Last record shown (1-based), or 0 when nothing is shown.
    pub last: usize,
    /// Total number of records.
    pub total: usize,
}

impl PageRange {
    /// Builds a range from 0-based `[start, end)` offsets.
    pub fn new(start: usize, end: usize, total: usize) -> Self {
        if end <= start {
            return PageRange {
                first: 0,
                last: 0,
                total,
            };
        }
        PageRange {
            first: start + 1,
            last: end,
            total,
        }
    }
}

impl fmt::Display for PageRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Showing {} to {} of {} entries",
            self.first, self.last, self.total
        )
    }
}
