use crate::{
    catalog::BookCatalog,
    error::{Error, Result},
    net::{ClientConfig, HttpClient},
    types::{BookQuery, BooksResponse, GenreStats},
};
use async_trait::async_trait;
use serde_json::Value;
use tracing::error;

/// BukuAcak catalog over HTTP.
///
/// Endpoints:
///
/// - `GET /book?sort=&page=&keyword=&category=&author=&genre=` - paged listing
/// - `GET /book/{id}` - one book
/// - `GET /stats/genre` - genre counts
///
/// # Examples
///
/// ```rust
/// use pustaka::prelude::*;
/// use pustaka::sources::BukuAcakCatalog;
///
/// # async fn example() -> pustaka::Result<()> {
/// let catalog = BukuAcakCatalog::new()?;
/// let page = catalog.get_books(&BookQuery::from("laskar pelangi")).await?;
/// println!("{} raw books", page.books.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct BukuAcakCatalog {
    client: HttpClient,
}

impl BukuAcakCatalog {
    /// A catalog client against the public BukuAcak API with default settings.
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    pub fn with_config(config: ClientConfig) -> Result<Self> {
        Ok(Self {
            client: HttpClient::new(config)?,
        })
    }

    pub fn base_url(&self) -> &str {
        self.client.base_url()
    }
}

#[async_trait]
impl BookCatalog for BukuAcakCatalog {
    fn id(&self) -> &'static str {
        "bukuacak"
    }

    async fn get_books(&self, query: &BookQuery) -> Result<BooksResponse> {
        self.client
            .get_json("/book", &query.query_pairs())
            .await
            .inspect_err(|e| error!(source = self.id(), error = %e, "Error in get_books"))
    }

    async fn get_book(&self, id: &str) -> Result<Value> {
        if id.trim().is_empty() {
            return Err(Error::invalid_argument("Book ID diperlukan"));
        }

        let path = format!("/book/{}", urlencoding::encode(id));
        self.client
            .get_json(&path, &[])
            .await
            .inspect_err(|e| error!(source = self.id(), error = %e, "Error in get_book"))
    }

    async fn get_genres(&self) -> Result<GenreStats> {
        self.client
            .get_json("/stats/genre", &[])
            .await
            .inspect_err(|e| error!(source = self.id(), error = %e, "Error in get_genres"))
    }
}
