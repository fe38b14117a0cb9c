//! Search, filter, and page state with pure transitions.
//!
//! [`SearchState`] is an immutable value: every transition returns a new
//! state and leaves the previous one untouched. Changing the search term or
//! the genre always returns to the first page; changing the page keeps both
//! filters.
//!
//! # Examples
//!
//! ```rust
//! use pustaka::state::SearchState;
//!
//! let state = SearchState::default()
//!     .update_page(3)
//!     .update_search_term("harry")
//!     .update_genre("fiksi");
//!
//! assert_eq!(state.current_page, 1);
//! assert_eq!(state.filter_description(), r#"pencarian "harry" dan genre "fiksi""#);
//! ```

use serde::{Deserialize, Serialize};

use crate::types::{BookQuery, SortOrder};

/// The user's current search term, genre filter and page.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchState {
    pub search_term: String,
    pub selected_genre: String,
    /// Always at least 1
    pub current_page: u32,
}

impl Default for SearchState {
    fn default() -> Self {
        Self {
            search_term: String::new(),
            selected_genre: String::new(),
            current_page: 1,
        }
    }
}

impl SearchState {
    /// The state a fresh session starts from: no filters, first page.
    pub fn reset_to_default() -> Self {
        Self::default()
    }

    /// New state with `term` as the search term, back on page 1.
    pub fn update_search_term(&self, term: impl Into<String>) -> Self {
        Self {
            search_term: term.into(),
            current_page: 1,
            ..self.clone()
        }
    }

    /// New state with `genre` as the genre filter, back on page 1.
    pub fn update_genre(&self, genre: impl Into<String>) -> Self {
        Self {
            selected_genre: genre.into(),
            current_page: 1,
            ..self.clone()
        }
    }

    /// New state on `page`, filters unchanged.
    ///
    /// Validate the move with
    /// [`is_valid_page_change`](crate::pagination::is_valid_page_change)
    /// first. Page `0` is clamped to `1`.
    pub fn update_page(&self, page: u32) -> Self {
        Self {
            current_page: page.max(1),
            ..self.clone()
        }
    }

    /// Whether a search term or genre is set.
    pub fn has_active_filters(&self) -> bool {
        !self.search_term.is_empty() || !self.selected_genre.is_empty()
    }

    /// A readable summary of the active filters, e.g.
    /// `pencarian "harry" dan genre "fiksi"`. Empty when no filter is active.
    pub fn filter_description(&self) -> String {
        let mut parts = Vec::new();

        if !self.search_term.is_empty() {
            parts.push(format!("pencarian \"{}\"", self.search_term));
        }

        if !self.selected_genre.is_empty() {
            parts.push(format!("genre \"{}\"", self.selected_genre));
        }

        parts.join(" dan ")
    }

    /// The catalog query for this state: newest first, blank filters left out.
    pub fn to_query(&self) -> BookQuery {
        let non_blank = |value: &str| {
            let trimmed = value.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        };

        BookQuery {
            page: self.current_page,
            keyword: non_blank(&self.search_term),
            genre: non_blank(&self.selected_genre),
            sort: SortOrder::Desc,
            ..Default::default()
        }
    }
}
