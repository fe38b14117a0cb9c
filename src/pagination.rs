//! Compact page-number sequences for pagination controls.
//!
//! A pagination bar always shows the first and last page, the pages adjacent
//! to the current one, and an ellipsis wherever a run of pages is skipped:
//!
//! ```text
//! current 1 of 10  ->  1 2 ... 10
//! current 6 of 10  ->  1 ... 5 6 7 ... 10
//! current 5 of 5   ->  1 ... 4 5
//! ```
//!
//! # Examples
//!
//! ```rust
//! use pustaka::pagination::{generate_page_numbers, is_valid_page_change, PageItem};
//!
//! let items = generate_page_numbers(1, 10);
//! assert_eq!(
//!     items,
//!     vec![PageItem::Page(1), PageItem::Page(2), PageItem::Ellipsis, PageItem::Page(10)]
//! );
//!
//! assert!(is_valid_page_change(2, 1, 10));
//! assert!(!is_valid_page_change(1, 1, 10));
//! ```

use std::fmt;

use crate::types::PaginationInfo;

/// One slot of a pagination bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    Page(u32),
    Ellipsis,
}

impl fmt::Display for PageItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageItem::Page(n) => write!(f, "{n}"),
            PageItem::Ellipsis => f.write_str("..."),
        }
    }
}

/// Builds the page sequence for `current_page` out of `total_pages`.
///
/// Page 1 always comes first and `total_pages` last (when there is more than
/// one page). The neighbours of the current page are included, and an
/// ellipsis marks the gap after page 1 when `current_page > 4` and before the
/// last page when `current_page < total_pages - 3`.
///
/// Callers hide pagination entirely when `total_pages <= 1`; the function
/// still returns a well-formed sequence for such input.
pub fn generate_page_numbers(current_page: u32, total_pages: u32) -> Vec<PageItem> {
    let current = i64::from(current_page);
    let total = i64::from(total_pages);

    let mut pages = vec![PageItem::Page(1)];

    if current > 4 {
        pages.push(PageItem::Ellipsis);
    }

    let start = (current - 1).max(2);
    let end = (current + 1).min(total - 1);
    pages.extend(
        (start..=end)
            .filter(|&page| page != 1 && page != total)
            .map(|page| PageItem::Page(page as u32)),
    );

    if current < total - 3 {
        pages.push(PageItem::Ellipsis);
    }

    if total_pages > 1 {
        pages.push(PageItem::Page(total_pages));
    }

    pages
}

/// Whether moving from `current_page` to `new_page` is a real page change.
///
/// True iff the page differs and lies within `1..=total_pages`. Only a
/// `true` result should commit the transition (and scroll the view).
pub fn is_valid_page_change(new_page: u32, current_page: u32, total_pages: u32) -> bool {
    new_page != current_page && (1..=total_pages).contains(&new_page)
}

impl PaginationInfo {
    /// Whether a pagination bar should be rendered at all.
    pub fn should_paginate(&self) -> bool {
        self.total_pages > 1
    }

    /// The page sequence for this listing, or nothing when there is a single page.
    pub fn page_numbers(&self) -> Vec<PageItem> {
        if !self.should_paginate() {
            return Vec::new();
        }
        generate_page_numbers(self.current_page, self.total_pages)
    }

    /// Whether `new_page` is a valid move from this listing's page.
    pub fn accepts_page(&self, new_page: u32) -> bool {
        is_valid_page_change(new_page, self.current_page, self.total_pages)
    }
}
