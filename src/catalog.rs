//! The remote book catalog interface.
//!
//! [`BookCatalog`] is the seam between the search orchestrator and the remote
//! REST service. The HTTP implementation lives in
//! [`sources`](crate::sources); tests and embedders can supply their own.
//!
//! # Examples
//!
//! ```rust
//! use pustaka::prelude::*;
//! use pustaka::types::{BooksResponse, GenreStats};
//! use async_trait::async_trait;
//! use serde_json::Value;
//!
//! struct EmptyCatalog;
//!
//! #[async_trait]
//! impl BookCatalog for EmptyCatalog {
//!     fn id(&self) -> &'static str { "empty" }
//!
//!     async fn get_books(&self, _query: &BookQuery) -> pustaka::Result<BooksResponse> {
//!         Ok(BooksResponse { books: vec![], pagination: Default::default() })
//!     }
//!
//!     async fn get_book(&self, id: &str) -> pustaka::Result<Value> {
//!         Err(pustaka::Error::Other(format!("no book {id}")))
//!     }
//!
//!     async fn get_genres(&self) -> pustaka::Result<GenreStats> {
//!         Ok(GenreStats::default())
//!     }
//! }
//! ```

use async_trait::async_trait;
use serde_json::Value;

use crate::{
    error::Result,
    types::{BookQuery, BooksResponse, GenreStatistic, GenreStats, SortOrder},
};

/// Operations the remote catalog offers.
///
/// # Required Methods
///
/// * [`id()`](BookCatalog::id) - Identifier used in logs
/// * [`get_books()`](BookCatalog::get_books) - `GET /book` listing with filters
/// * [`get_book()`](BookCatalog::get_book) - `GET /book/{id}`
/// * [`get_genres()`](BookCatalog::get_genres) - `GET /stats/genre`
///
/// Book entries are returned raw; run them through
/// [`sanitize`](crate::sanitize::sanitize) before display.
#[async_trait]
pub trait BookCatalog: Send + Sync {
    fn id(&self) -> &'static str;

    /// Fetches one page of books matching `query`.
    async fn get_books(&self, query: &BookQuery) -> Result<BooksResponse>;

    /// Fetches a single raw book entry.
    ///
    /// # Errors
    ///
    /// * [`Error::InvalidArgument`](crate::Error::InvalidArgument) - If `id` is empty
    async fn get_book(&self, id: &str) -> Result<Value>;

    /// Fetches per-genre book counts.
    async fn get_genres(&self) -> Result<GenreStats>;

    /// Genres ordered by book count, most popular first.
    ///
    /// The `null` genre is dropped. A `limit` of 0 keeps every genre.
    async fn popular_genres(&self, limit: usize) -> Result<Vec<GenreStatistic>> {
        let mut genres: Vec<GenreStatistic> = self
            .get_genres()
            .await?
            .genre_statistics
            .into_iter()
            .filter(|stat| stat.genre.is_some())
            .collect();

        genres.sort_by(|a, b| b.count.cmp(&a.count));

        if limit > 0 {
            genres.truncate(limit);
        }

        Ok(genres)
    }

    /// The newest books, one page at a time.
    async fn latest_books(&self, page: u32) -> Result<BooksResponse> {
        self.get_books(&BookQuery {
            page,
            sort: SortOrder::Desc,
            ..Default::default()
        })
        .await
    }
}
