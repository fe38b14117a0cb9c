//! Core data types for books, pagination, genres and catalog queries.
//!
//! This module defines the fundamental data structures used throughout pustaka:
//!
//! - [`BookRecord`] - A sanitized, fully populated book, the only form the UI consumes
//! - [`PaginationInfo`] - Page metadata returned by the catalog alongside a page of books
//! - [`GenreStatistic`] / [`GenreStats`] - Genre counts used to populate genre filters
//! - [`BookQuery`] - Parameters of a `/book` listing request
//! - [`SortOrder`] - Sorting direction for listings
//!
//! Serialized field names follow the remote catalog (`_id`, `cover_image`,
//! `buy_links`, `pageCount`, ...) so records written to the favorites store
//! keep the shape the catalog itself produces.

use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A named link, used for authors, categories and tags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub name: String,
    #[serde(default)]
    pub url: String,
}

impl Link {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

/// A place where the book can be bought.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuyLink {
    pub store: String,
    #[serde(default)]
    pub url: String,
}

/// Publication details of a book. All values are display strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookDetails {
    /// Publisher catalog number
    #[serde(rename = "no_gm", default)]
    pub catalog_number: String,
    #[serde(default)]
    pub isbn: String,
    /// Price as shown by the catalog, e.g. `"Rp 75.000"`; `"0"` when unknown
    pub price: String,
    /// Page count as `"<N> pages"`
    pub total_pages: String,
    #[serde(default)]
    pub size: String,
    pub published_date: String,
    #[serde(default)]
    pub format: String,
}

/// Fields recomputed from the canonical ones for older consumers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyMirror {
    pub description: String,
    pub cover_image: String,
    pub published_year: i32,
    pub isbn: String,
    pub page_count: u32,
    pub language: String,
    pub rating: f64,
    pub review_count: u32,
    pub price: f64,
    pub availability: bool,
    pub created_at: String,
    pub updated_at: String,
}

/// A book after sanitization.
///
/// Every field is populated. Records are produced by
/// [`sanitize`](crate::sanitize::sanitize) and never partially filled.
///
/// # Examples
///
/// ```rust
/// use pustaka::sanitize::sanitize;
/// use serde_json::json;
///
/// let book = sanitize(&json!({ "_id": "1", "title": "Laskar Pelangi" })).unwrap();
/// assert_eq!(book.id, "1");
/// assert_eq!(book.author.name, "Penulis tidak diketahui");
/// assert!(book.tags.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookRecord {
    /// Opaque catalog identifier, never empty
    #[serde(rename = "_id")]
    pub id: String,

    pub title: String,

    pub author: Link,

    pub category: Link,

    /// Cover URL; empty when the catalog has none
    pub cover_image: String,

    pub details: BookDetails,

    #[serde(default)]
    pub tags: Vec<Link>,

    pub summary: String,

    #[serde(default)]
    pub buy_links: Vec<BuyLink>,

    pub publisher: String,

    #[serde(flatten)]
    pub legacy: LegacyMirror,
}

/// Page metadata returned by the catalog with each listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationInfo {
    pub current_page: u32,
    pub total_pages: u32,
    pub total_items: u64,
    pub items_per_page: u32,
    pub has_next_page: bool,
    pub has_prev_page: bool,
}

/// Raw `/book` listing response. Books stay untyped until sanitized.
#[derive(Debug, Clone, Deserialize)]
pub struct BooksResponse {
    #[serde(default)]
    pub books: Vec<Value>,
    pub pagination: PaginationInfo,
}

/// Number of books in one genre. The catalog reports uncategorised books
/// under a `null` genre.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenreStatistic {
    pub genre: Option<String>,
    pub count: u64,
}

/// Raw `/stats/genre` response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenreStats {
    #[serde(default)]
    pub genre_statistics: Vec<GenreStatistic>,
    #[serde(default)]
    pub total_genres: u64,
}

/// Sort direction for book listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

/// Parameters of a `/book` listing request.
///
/// Built with the generated `BookQueryBuilder`:
///
/// ```rust
/// use pustaka::types::{BookQueryBuilder, SortOrder};
///
/// let query = BookQueryBuilder::default()
///     .page(2u32)
///     .keyword("harry")
///     .sort(SortOrder::Asc)
///     .build()
///     .unwrap();
///
/// assert_eq!(query.page, 2);
/// assert_eq!(query.keyword.as_deref(), Some("harry"));
/// assert!(query.genre.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Builder)]
#[builder(setter(into), default)]
pub struct BookQuery {
    pub page: u32,
    #[builder(setter(into, strip_option))]
    pub keyword: Option<String>,
    pub sort: SortOrder,
    #[builder(setter(into, strip_option))]
    pub category: Option<String>,
    #[builder(setter(into, strip_option))]
    pub author: Option<String>,
    #[builder(setter(into, strip_option))]
    pub genre: Option<String>,
}

impl Default for BookQuery {
    fn default() -> Self {
        Self {
            page: 1,
            keyword: None,
            sort: SortOrder::Desc,
            category: None,
            author: None,
            genre: None,
        }
    }
}

impl BookQuery {
    /// Query-string pairs in the order the catalog expects.
    ///
    /// `sort` and `page` are always present (page `0` is sent as `1`);
    /// filters are trimmed and omitted when blank.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("sort", self.sort.as_str().to_string()),
            ("page", self.page.max(1).to_string()),
        ];

        let filters = [
            ("keyword", &self.keyword),
            ("category", &self.category),
            ("author", &self.author),
            ("genre", &self.genre),
        ];
        for (name, value) in filters {
            if let Some(value) = value.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
                pairs.push((name, value.to_string()));
            }
        }

        pairs
    }
}

impl From<&str> for BookQuery {
    /// A first-page keyword search.
    fn from(keyword: &str) -> Self {
        BookQuery {
            keyword: Some(keyword.to_string()),
            ..Default::default()
        }
    }
}
