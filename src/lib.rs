//! # Pustaka - headless book catalog client
//!
//! Pustaka is an async client library for browsing a remote book catalog. It
//! lists, searches, filters, paginates and favorites books, and leaves all
//! rendering to the embedding application.
//!
//! ## Features
//!
//! - **Sanitized Records**: Heterogeneous catalog entries normalized into complete [`BookRecord`]s
//! - **Pure Search State**: Immutable search/genre/page transitions
//! - **Compact Pagination**: Page sequences with ellipses for pagination bars
//! - **Sequenced Searches**: Superseded responses never overwrite newer results
//! - **Readable Errors**: Every failure classified into a user-facing message
//! - **Pluggable Favorites**: Injected persistence with change notification
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pustaka::prelude::*;
//! use pustaka::sources::BukuAcakCatalog;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> pustaka::Result<()> {
//!     let session = BookSearch::new(Arc::new(BukuAcakCatalog::new()?));
//!     session.start().await;
//!
//!     session.set_search_term("laskar pelangi").await;
//!     let view = session.view();
//!
//!     if let Some(message) = &view.error {
//!         eprintln!("{message}");
//!         session.retry().await;
//!     }
//!
//!     for book in &view.books {
//!         println!("{} - {}", book.title, book.author.name);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! - [`sanitize`]: Raw catalog entry to [`BookRecord`]
//! - [`pagination`]: Page-number sequences and page-change validation
//! - [`state`]: [`SearchState`] and its transitions
//! - [`error`]: Error types and [`classify`](error::classify)
//! - [`catalog`]: The [`BookCatalog`] trait
//! - [`sources`]: Bundled catalog implementations
//! - [`search`]: Search orchestration and the [`BookSearch`] session
//! - [`favorites`]: Favorites stores and operations
//! - [`net`]: HTTP client, configuration and JSON lookup helpers
//! - [`freshness`]: "Last updated" labels

pub mod catalog;
pub mod error;
pub mod favorites;
pub mod freshness;
pub mod net;
pub mod pagination;
pub mod sanitize;
pub mod search;
pub mod sources;
pub mod state;
pub mod types;

/// Prelude module for convenient imports.
///
/// ```rust
/// use pustaka::prelude::*;
///
/// let state = SearchState::default().update_search_term("bumi");
/// assert!(state.has_active_filters());
/// ```
pub mod prelude {
    pub use crate::{
        catalog::BookCatalog,
        error::classify,
        favorites::{Favorites, FavoritesStore, FileFavorites, MemoryFavorites},
        pagination::{PageItem, generate_page_numbers, is_valid_page_change},
        sanitize::{sanitize, sanitize_all},
        search::{BookSearch, SearchApplied, SearchView, fetch_books},
        state::SearchState,
        types::{BookQuery, BookRecord, PaginationInfo, SortOrder},
    };
}

// Re-export main types at crate root for direct access
pub use catalog::BookCatalog;
pub use error::{Error, Result, classify};
pub use pagination::{PageItem, generate_page_numbers, is_valid_page_change};
pub use sanitize::sanitize;
pub use search::{BookSearch, SearchApplied, SearchView};
pub use state::SearchState;
pub use types::{BookQuery, BookRecord, PaginationInfo, SortOrder};
