//! Page-window calculator.
//!
//! A pagination control never shows an unbounded list of page links. Given the
//! current page and the page count, [`page_window`] picks which page numbers
//! to show; gaps are implied wherever consecutive numbers are not adjacent.
//!
//! With the default `max_visible` of 5 and more than 5 pages:
//!
//! ```text
//! near start  (current <= 3):          1 2 3 4 … N
//! near end    (current >= N - 2):      1 … N-3 N-2 N-1 N
//! middle:                              1 … c-1 c c+1 … N
//! ```
//!
//! Other widths keep the same shape with a middle band of `max_visible - 2`
//! pages. Widths below 3 are raised to 3.

use serde::Serialize;

/// Default number of page links.
pub const DEFAULT_MAX_VISIBLE: usize = 5;

const MIN_VISIBLE: usize = 3;

/// The page numbers a pagination control should show, in ascending order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PageWindow {
    pages: Vec<usize>,
}

/// One slot of a rendered page window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase", tag = "kind", content = "page")]
pub enum WindowItem {
    /// A link to a page.
    Page(usize),
    /// Skipped pages between two non-adjacent links.
    Gap,
}

impl PageWindow {
    /// Returns the page numbers.
    pub fn pages(&self) -> &[usize] {
        &self.pages
    }

    /// Returns the number of page links.
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Returns `true` if the window has no pages.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Returns `true` if `page` is shown.
    pub fn contains(&self, page: usize) -> bool {
        self.pages.binary_search(&page).is_ok()
    }

    /// Returns the pages with a [`WindowItem::Gap`] between non-adjacent
    /// numbers.
    ///
    /// ```
    /// use tabview::{page_window, WindowItem};
    ///
    /// let items = page_window(1, 10, 5).items();
    /// assert_eq!(items[4], WindowItem::Gap);
    /// assert_eq!(items[5], WindowItem::Page(10));
    /// ```
    pub fn items(&self) -> Vec<WindowItem> {
        let mut items = Vec::with_capacity(self.pages.len() + 2);
        let mut previous: Option<usize> = None;
        for &page in &self.pages {
            if let Some(prev) = previous {
                if page > prev + 1 {
                    items.push(WindowItem::Gap);
                }
            }
            items.push(WindowItem::Page(page));
            previous = Some(page);
        }
        items
    }

    /// Consumes the window, returning the page numbers.
    pub fn into_pages(self) -> Vec<usize> {
        self.pages
    }
}

/// Computes the page window.
///
/// `current_page` is clamped into `[1, total_pages]` first and a
/// `total_pages` of 0 counts as 1, so the result is always non-empty, sorted,
/// and free of duplicates.
///
/// # Example
///
/// ```
/// use tabview::page_window;
///
/// assert_eq!(page_window(1, 10, 5).pages(), &[1, 2, 3, 4, 10]);
/// assert_eq!(page_window(5, 10, 5).pages(), &[1, 4, 5, 6, 10]);
/// assert_eq!(page_window(10, 10, 5).pages(), &[1, 7, 8, 9, 10]);
/// assert_eq!(page_window(2, 4, 5).pages(), &[1, 2, 3, 4]);
/// ```
pub fn page_window(current_page: usize, total_pages: usize, max_visible: usize) -> PageWindow {
    let total = total_pages.max(1);
    let max_visible = max_visible.max(MIN_VISIBLE);
    let current = current_page.clamp(1, total);

    if total <= max_visible {
        return PageWindow {
            pages: (1..=total).collect(),
        };
    }

    // Pages shown between the first and last link.
    let band = max_visible - 2;

    let pages = if current <= band {
        (1..=band + 1).chain(std::iter::once(total)).collect()
    } else if current + (band - 1) >= total {
        std::iter::once(1).chain(total - band..=total).collect()
    } else {
        let low = current - (band - 1) / 2;
        let high = current + band / 2;
        std::iter::once(1)
            .chain(low..=high)
            .chain(std::iter::once(total))
            .collect()
    };

    PageWindow { pages }
}
