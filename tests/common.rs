//! Common test utilities and fixtures
//!
//! Shared functionality used across all test modules: tracing setup, an
//! in-memory catalog with scriptable failures and latency, and a one-shot
//! HTTP responder for exercising the real client without the network.

use async_trait::async_trait;
use parking_lot::Mutex;
use pustaka::error::{Error, Result, TransportKind};
use pustaka::prelude::*;
use pustaka::types::{BooksResponse, GenreStatistic, GenreStats};
use serde_json::{Value, json};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

#[allow(dead_code)]
pub const TEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Keyword whose searches the fake catalog answers slowly.
#[allow(dead_code)]
pub const SLOW_KEYWORD: &str = "slow";

/// Installs a test-writer tracing subscriber once per test binary.
#[allow(dead_code)]
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("pustaka=debug")),
        )
        .with_test_writer()
        .try_init();
}

/// In-memory catalog.
///
/// Every listing returns three raw entries for the requested keyword and
/// page, one of them invalid (empty id), so two survive sanitization:
/// `<keyword>-<page>-a` and `<keyword>-<page>-b` (keyword `all` when unset).
#[allow(dead_code)]
pub struct FakeCatalog {
    pub total_pages: u32,
    pub calls: Mutex<Vec<BookQuery>>,
    failure: Mutex<Option<TransportKind>>,
    genre_failure: Mutex<bool>,
    slow_delay: Duration,
}

#[allow(dead_code)]
impl FakeCatalog {
    pub fn new(total_pages: u32) -> Self {
        Self {
            total_pages,
            calls: Mutex::new(Vec::new()),
            failure: Mutex::new(None),
            genre_failure: Mutex::new(false),
            slow_delay: Duration::from_millis(100),
        }
    }

    /// Makes subsequent listings fail with `kind` (or succeed again with `None`).
    pub fn fail_with(&self, kind: Option<TransportKind>) {
        *self.failure.lock() = kind;
    }

    pub fn fail_genres(&self, fail: bool) {
        *self.genre_failure.lock() = fail;
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    pub fn last_call(&self) -> Option<BookQuery> {
        self.calls.lock().last().cloned()
    }

    pub fn raw_books(query: &BookQuery) -> Vec<Value> {
        let tag = query.keyword.clone().unwrap_or_else(|| "all".to_string());
        let page = query.page;
        vec![
            json!({ "_id": format!("{tag}-{page}-a"), "title": format!("{tag} a") }),
            json!({ "_id": "", "title": "broken entry" }),
            json!({ "_id": format!("{tag}-{page}-b"), "title": format!("{tag} b"), "tags": ["Fiksi"] }),
        ]
    }
}

#[async_trait]
impl BookCatalog for FakeCatalog {
    fn id(&self) -> &'static str {
        "fake"
    }

    async fn get_books(&self, query: &BookQuery) -> Result<BooksResponse> {
        self.calls.lock().push(query.clone());
        // outcome is decided when the request is issued, not when it resolves
        let failure = *self.failure.lock();

        if query.keyword.as_deref() == Some(SLOW_KEYWORD) {
            tokio::time::sleep(self.slow_delay).await;
        }

        if let Some(kind) = failure {
            return Err(Error::transport(kind));
        }

        Ok(BooksResponse {
            books: Self::raw_books(query),
            pagination: PaginationInfo {
                current_page: query.page,
                total_pages: self.total_pages,
                total_items: u64::from(self.total_pages) * 2,
                items_per_page: 2,
                has_next_page: query.page < self.total_pages,
                has_prev_page: query.page > 1,
            },
        })
    }

    async fn get_book(&self, id: &str) -> Result<Value> {
        Ok(json!({ "_id": id, "title": format!("Book {id}") }))
    }

    async fn get_genres(&self) -> Result<GenreStats> {
        if *self.genre_failure.lock() {
            return Err(Error::transport(TransportKind::Server));
        }
        Ok(GenreStats {
            genre_statistics: vec![
                GenreStatistic { genre: Some("Sejarah".into()), count: 4 },
                GenreStatistic { genre: None, count: 50 },
                GenreStatistic { genre: Some("Fiksi".into()), count: 12 },
                GenreStatistic { genre: Some("Komik".into()), count: 7 },
            ],
            total_genres: 4,
        })
    }
}

/// Serves exactly one HTTP response on a local port.
///
/// Returns the base URL to point a client at and a handle resolving to the
/// request head the client sent.
#[allow(dead_code)]
pub async fn serve_once(status: &'static str, body: String) -> (String, JoinHandle<String>) {
    let length = body.len();
    serve_with_length(status, body, length).await
}

/// Like [`serve_once`], but announces `content_length` bytes and closes the
/// connection after `body`, so a longer announced length truncates the body.
#[allow(dead_code)]
pub async fn serve_with_length(
    status: &'static str,
    body: String,
    content_length: usize,
) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();

        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
        }

        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {content_length}\r\nConnection: close\r\n\r\n{body}"
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        let _ = socket.shutdown().await;

        String::from_utf8_lossy(&request).into_owned()
    });

    (format!("http://{addr}/api/v1"), handle)
}

/// Accepts one connection and never answers it.
#[allow(dead_code)]
pub async fn serve_silent() -> (String, JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let (_socket, _) = listener.accept().await.unwrap();
        tokio::time::sleep(Duration::from_secs(5)).await;
    });

    (format!("http://{addr}/api/v1"), handle)
}
