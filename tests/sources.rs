//! Catalog source tests
//!
//! Runs `BukuAcakCatalog` and the HTTP client against a local one-shot
//! responder: request shape, success decoding, and failure classification.

use pustaka::error::{Error, TransportKind, classify};
use pustaka::net::ClientConfigBuilder;
use pustaka::prelude::*;
use pustaka::sources::BukuAcakCatalog;
use pustaka::types::BookQueryBuilder;
use serde_json::json;
use std::time::Duration;
use tokio::time::timeout;

mod common;
use common::{TEST_TIMEOUT, init_tracing, serve_once, serve_silent, serve_with_length};

fn catalog_at(base_url: &str, request_timeout: Duration) -> BukuAcakCatalog {
    init_tracing();
    BukuAcakCatalog::with_config(
        ClientConfigBuilder::default()
            .base_url(base_url)
            .timeout(request_timeout)
            .build()
            .unwrap(),
    )
    .unwrap()
}

fn request_line(head: &str) -> &str {
    head.lines().next().unwrap_or_default()
}

#[cfg(test)]
mod source_tests {
    use super::*;

    #[tokio::test]
    async fn test_get_books_sends_filters_and_decodes() {
        let body = json!({
            "books": [
                { "_id": "1", "title": "Laskar Pelangi", "details": { "price": "Rp 89.000" } },
                { "title": "missing id" }
            ],
            "pagination": {
                "currentPage": 2, "totalPages": 7, "totalItems": 56,
                "itemsPerPage": 8, "hasNextPage": true, "hasPrevPage": true
            }
        })
        .to_string();
        let (base, server) = serve_once("200 OK", body).await;
        let catalog = catalog_at(&base, TEST_TIMEOUT);

        let query = BookQueryBuilder::default()
            .page(2u32)
            .keyword(" laskar pelangi ")
            .genre("Novel")
            .build()
            .unwrap();
        let response = timeout(TEST_TIMEOUT, catalog.get_books(&query))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(response.books.len(), 2);
        assert_eq!(response.pagination.total_pages, 7);
        assert_eq!(sanitize_all(&response.books).len(), 1);

        let head = server.await.unwrap();
        assert_eq!(
            request_line(&head),
            "GET /api/v1/book?sort=desc&page=2&keyword=laskar+pelangi&genre=Novel HTTP/1.1"
        );
        assert!(head.to_lowercase().contains("accept: application/json"));
    }

    #[tokio::test]
    async fn test_get_book_encodes_id() {
        let (base, server) =
            serve_once("200 OK", json!({ "_id": "a b", "title": "T" }).to_string()).await;
        let catalog = catalog_at(&base, TEST_TIMEOUT);

        let raw = catalog.get_book("a b").await.unwrap();
        assert_eq!(sanitize(&raw).unwrap().id, "a b");

        let head = server.await.unwrap();
        assert_eq!(request_line(&head), "GET /api/v1/book/a%20b HTTP/1.1");
    }

    #[tokio::test]
    async fn test_get_book_requires_id() {
        let catalog = catalog_at("http://127.0.0.1:9/api/v1", TEST_TIMEOUT);
        let err = catalog.get_book("  ").await.unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
        assert_eq!(classify(&err), "Book ID diperlukan");
    }

    #[tokio::test]
    async fn test_popular_genres_over_http() {
        let body = json!({
            "genre_statistics": [
                { "genre": "Fiksi", "count": 3 },
                { "genre": null, "count": 40 },
                { "genre": "Sejarah", "count": 9 }
            ],
            "total_genres": 3
        })
        .to_string();
        let (base, server) = serve_once("200 OK", body).await;
        let catalog = catalog_at(&base, TEST_TIMEOUT);

        let genres = catalog.popular_genres(0).await.unwrap();
        let names: Vec<_> = genres.iter().map(|g| g.genre.as_deref().unwrap()).collect();
        assert_eq!(names, vec!["Sejarah", "Fiksi"]);

        let head = server.await.unwrap();
        assert_eq!(request_line(&head), "GET /api/v1/stats/genre HTTP/1.1");
    }

    #[tokio::test]
    async fn test_not_found_is_prerendered() {
        let (base, _server) = serve_once("404 Not Found", "{}".to_string()).await;
        let catalog = catalog_at(&base, TEST_TIMEOUT);

        let err = catalog.get_book("missing").await.unwrap_err();
        assert!(matches!(
            err,
            Error::Transport { kind: TransportKind::NotFound, .. }
        ));
        assert_eq!(classify(&err), "Data tidak ditemukan");
    }

    #[tokio::test]
    async fn test_server_errors_are_prerendered() {
        let (base, _server) =
            serve_once("503 Service Unavailable", String::new()).await;
        let catalog = catalog_at(&base, TEST_TIMEOUT);

        let err = catalog.get_genres().await.unwrap_err();
        assert_eq!(
            classify(&err),
            "Server sedang bermasalah. Silakan coba lagi nanti"
        );
    }

    #[tokio::test]
    async fn test_other_status_keeps_body_message() {
        let body = json!({ "message": "Parameter page tidak valid" }).to_string();
        let (base, _server) = serve_once("400 Bad Request", body).await;
        let catalog = catalog_at(&base, TEST_TIMEOUT);

        let err = catalog.get_books(&BookQuery::default()).await.unwrap_err();
        assert!(matches!(err, Error::Status { status: 400, .. }));
        assert_eq!(classify(&err), "Parameter page tidak valid");
    }

    #[tokio::test]
    async fn test_other_status_without_message_is_a_failed_fetch() {
        let (base, _server) =
            serve_once("429 Too Many Requests", "<html>slow down</html>".to_string()).await;
        let catalog = catalog_at(&base, TEST_TIMEOUT);

        let err = catalog.get_books(&BookQuery::default()).await.unwrap_err();
        assert!(matches!(
            err,
            Error::Transport { kind: TransportKind::Connection, .. }
        ));
        assert_eq!(classify(&err), "Terjadi kesalahan saat mengambil data");
    }

    #[tokio::test]
    async fn test_truncated_error_body_keeps_status_message() {
        let (base, _server) =
            serve_with_length("404 Not Found", "{\"mess".to_string(), 64).await;
        let catalog = catalog_at(&base, TEST_TIMEOUT);

        let err = timeout(TEST_TIMEOUT, catalog.get_book("missing"))
            .await
            .unwrap()
            .unwrap_err();
        assert_eq!(classify(&err), "Data tidak ditemukan");

        let (base, _server) =
            serve_with_length("502 Bad Gateway", "upstr".to_string(), 64).await;
        let catalog = catalog_at(&base, TEST_TIMEOUT);

        let err = timeout(TEST_TIMEOUT, catalog.get_genres())
            .await
            .unwrap()
            .unwrap_err();
        assert_eq!(
            classify(&err),
            "Server sedang bermasalah. Silakan coba lagi nanti"
        );
    }

    #[tokio::test]
    async fn test_malformed_body_is_a_json_error() {
        let (base, _server) = serve_once("200 OK", "{\"books\": 5}".to_string()).await;
        let catalog = catalog_at(&base, TEST_TIMEOUT);

        let err = catalog.get_books(&BookQuery::default()).await.unwrap_err();
        assert!(matches!(err, Error::Json(_)));
        assert!(!classify(&err).is_empty());
    }

    #[tokio::test]
    async fn test_timeout_is_prerendered() {
        let (base, _server) = serve_silent().await;
        let catalog = catalog_at(&base, Duration::from_millis(200));

        let err = timeout(TEST_TIMEOUT, catalog.get_genres())
            .await
            .unwrap()
            .unwrap_err();
        assert_eq!(
            classify(&err),
            "Request timeout. Periksa koneksi internet Anda"
        );
    }

    #[tokio::test]
    async fn test_refused_connection_is_prerendered() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let catalog = catalog_at(&format!("http://{addr}/api/v1"), TEST_TIMEOUT);
        let err = catalog.get_genres().await.unwrap_err();
        assert!(matches!(
            err,
            Error::Transport { kind: TransportKind::Connection, .. }
        ));
        assert_eq!(classify(&err), "Terjadi kesalahan saat mengambil data");
    }
}
