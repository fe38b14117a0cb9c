//! Book search orchestration.
//!
//! This module ties the pieces together: a [`SearchState`] becomes a catalog
//! query, the raw response is sanitized, and failures are classified into a
//! message for the user.
//!
//! - [`fetch_books`] - One stateless search: exactly one catalog call, no retries
//! - [`BookSearch`] - A search session holding the current state and the
//!   visible results, with request sequencing so a slow, superseded response
//!   can never overwrite newer results
//! - [`popular_books`] - The newest books for a "popular" shelf
//!
//! # Examples
//!
//! ```rust
//! use pustaka::prelude::*;
//! use pustaka::sources::BukuAcakCatalog;
//! use std::sync::Arc;
//!
//! # async fn example() -> pustaka::Result<()> {
//! let session = BookSearch::new(Arc::new(BukuAcakCatalog::new()?));
//!
//! session.start().await;
//! session.set_search_term("harry").await;
//! session.set_genre("fiksi").await;
//!
//! let view = session.view();
//! match &view.error {
//!     Some(message) => println!("{message}"),
//!     None => println!("{} books", view.books.len()),
//! }
//!
//! if let Some(pagination) = view.pagination {
//!     for item in pagination.page_numbers() {
//!         print!("{item} ");
//!     }
//! }
//! # Ok(())
//! # }
//! ```

use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{debug, error, warn};

use crate::{
    catalog::BookCatalog,
    error::{Result, classify},
    pagination::is_valid_page_change,
    sanitize::sanitize_all,
    state::SearchState,
    types::{BookRecord, GenreStatistic, PaginationInfo},
};

/// Number of genres offered as filters.
pub const DEFAULT_GENRE_LIMIT: usize = 20;

/// Number of books on the popular shelf.
pub const DEFAULT_POPULAR_COUNT: usize = 8;

/// One page of sanitized search results.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchPage {
    pub books: Vec<BookRecord>,
    pub pagination: PaginationInfo,
}

/// Runs one search for `state`.
///
/// Invalid entries in the response are dropped, so a page with some
/// malformed books yields a shorter list instead of failing. Any error is
/// returned as a user-facing message.
pub async fn fetch_books(
    catalog: &dyn BookCatalog,
    state: &SearchState,
) -> std::result::Result<SearchPage, String> {
    match catalog.get_books(&state.to_query()).await {
        Ok(response) => {
            let books = sanitize_all(&response.books);
            if books.len() < response.books.len() {
                debug!(
                    received = response.books.len(),
                    kept = books.len(),
                    "Dropped invalid book entries"
                );
            }
            Ok(SearchPage {
                books,
                pagination: response.pagination,
            })
        }
        Err(e) => {
            error!(catalog = catalog.id(), error = %e, "Error fetching books");
            Err(classify(&e))
        }
    }
}

/// What the UI shows for the current search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchView {
    pub books: Vec<BookRecord>,
    /// `None` before the first response and after a failed one
    pub pagination: Option<PaginationInfo>,
    pub loading: bool,
    /// Classified message of the last failure; cleared when a search starts
    pub error: Option<String>,
}

impl Default for SearchView {
    fn default() -> Self {
        Self {
            books: Vec::new(),
            pagination: None,
            loading: true,
            error: None,
        }
    }
}

/// Whether a finished search updated the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchApplied {
    /// The response belonged to the latest search and is now visible
    Applied,
    /// A newer search started meanwhile; the response was discarded
    Superseded,
}

struct Session {
    state: SearchState,
    view: SearchView,
    latest_ticket: u64,
    genres: Vec<GenreStatistic>,
}

/// A search session: current state, visible results and genre filters.
///
/// Every search takes a ticket from a monotonically increasing counter. Only
/// the response holding the latest ticket updates the view, so concurrent
/// searches resolve to the most recently *started* one regardless of the
/// order their responses arrive in.
///
/// The session is `Send + Sync`; share it behind an `Arc` to drive it from
/// several tasks.
pub struct BookSearch {
    catalog: Arc<dyn BookCatalog>,
    session: Mutex<Session>,
}

impl BookSearch {
    pub fn new(catalog: Arc<dyn BookCatalog>) -> Self {
        Self {
            catalog,
            session: Mutex::new(Session {
                state: SearchState::default(),
                view: SearchView::default(),
                latest_ticket: 0,
                genres: Vec::new(),
            }),
        }
    }

    /// The state of the most recently started search.
    pub fn state(&self) -> SearchState {
        self.session.lock().state.clone()
    }

    pub fn view(&self) -> SearchView {
        self.session.lock().view.clone()
    }

    /// Genres loaded by [`refresh_genres`](BookSearch::refresh_genres).
    pub fn genres(&self) -> Vec<GenreStatistic> {
        self.session.lock().genres.clone()
    }

    pub fn has_active_filters(&self) -> bool {
        self.session.lock().state.has_active_filters()
    }

    pub fn filter_description(&self) -> String {
        self.session.lock().state.filter_description()
    }

    /// Initial load: genre filters and the first page, concurrently.
    pub async fn start(&self) -> SearchApplied {
        let state = self.state();
        let (_, applied) =
            futures::join!(self.refresh_genres(DEFAULT_GENRE_LIMIT), self.run(state));
        applied
    }

    /// Searches for `state` and makes it the current state.
    pub async fn run(&self, state: SearchState) -> SearchApplied {
        let ticket = {
            let mut session = self.session.lock();
            session.latest_ticket += 1;
            session.state = state.clone();
            session.view.loading = true;
            session.view.error = None;
            session.latest_ticket
        };

        let outcome = fetch_books(self.catalog.as_ref(), &state).await;

        let mut session = self.session.lock();
        if session.latest_ticket != ticket {
            debug!(
                ticket,
                latest = session.latest_ticket,
                "Discarding superseded search response"
            );
            return SearchApplied::Superseded;
        }

        session.view = match outcome {
            Ok(page) => SearchView {
                books: page.books,
                pagination: Some(page.pagination),
                loading: false,
                error: None,
            },
            Err(message) => SearchView {
                books: Vec::new(),
                pagination: None,
                loading: false,
                error: Some(message),
            },
        };
        SearchApplied::Applied
    }

    /// Sets the search term, returns to page 1 and searches.
    pub async fn set_search_term(&self, term: impl Into<String>) -> SearchApplied {
        let next = self.state().update_search_term(term);
        self.run(next).await
    }

    /// Sets the genre filter, returns to page 1 and searches.
    pub async fn set_genre(&self, genre: impl Into<String>) -> SearchApplied {
        let next = self.state().update_genre(genre);
        self.run(next).await
    }

    /// Moves to `page` if that is a valid change for the visible results.
    ///
    /// Returns `None` without searching when the page is the current one,
    /// out of range, or there is no pagination to move within. A `Some`
    /// result is the caller's cue to scroll back to the top.
    ///
    /// While a search is in flight the visible pagination belongs to an
    /// older search than the current state, so page changes are refused
    /// until it settles.
    pub async fn go_to_page(&self, page: u32) -> Option<SearchApplied> {
        let (state, total_pages) = {
            let session = self.session.lock();
            if session.view.loading {
                debug!(page, "Ignoring page change while a search is in flight");
                return None;
            }
            let total = session.view.pagination.map_or(0, |p| p.total_pages);
            (session.state.clone(), total)
        };

        if !is_valid_page_change(page, state.current_page, total_pages) {
            debug!(page, current = state.current_page, total_pages, "Ignoring page change");
            return None;
        }

        Some(self.run(state.update_page(page)).await)
    }

    /// Clears search term and genre and searches from page 1.
    pub async fn reset_filters(&self) -> SearchApplied {
        self.run(SearchState::reset_to_default()).await
    }

    /// Re-issues the last search unchanged.
    pub async fn retry(&self) -> SearchApplied {
        let state = self.state();
        self.run(state).await
    }

    /// Reloads the genre filter list, most popular first.
    ///
    /// On failure the previous list is kept and the error is only logged.
    pub async fn refresh_genres(&self, limit: usize) -> Vec<GenreStatistic> {
        match self.catalog.popular_genres(limit).await {
            Ok(genres) => {
                self.session.lock().genres = genres.clone();
                genres
            }
            Err(e) => {
                warn!(catalog = self.catalog.id(), error = %e, "Error fetching genres");
                self.genres()
            }
        }
    }
}

/// The newest books, for a "popular" shelf.
#[derive(Debug, Clone, PartialEq)]
pub struct PopularBooks {
    pub books: Vec<BookRecord>,
    /// Size of the whole catalog, as reported by the listing
    pub total_items: u64,
}

/// Fetches the first page of newest books and keeps at most `limit` of them.
pub async fn popular_books(catalog: &dyn BookCatalog, limit: usize) -> Result<PopularBooks> {
    let response = catalog.latest_books(1).await?;
    let mut books = sanitize_all(&response.books);
    books.truncate(limit);

    Ok(PopularBooks {
        books,
        total_items: response.pagination.total_items,
    })
}
