//! Normalization of raw catalog entries into [`BookRecord`]s.
//!
//! Catalog entries are heterogeneous: older records use different field
//! names, numbers show up where strings are expected, tags may be plain
//! strings or `{name, url}` objects, and most fields can be missing. The
//! sanitizer resolves every field through an explicit precedence list
//! (first non-empty value wins) and fills the rest with placeholders, so the
//! UI never sees a partially populated record.
//!
//! Entries without an identifier or a title are rejected with `None`. That is
//! an expected outcome for malformed entries and is only logged.
//!
//! # Examples
//!
//! ```rust
//! use pustaka::sanitize::{sanitize, sanitize_all};
//! use serde_json::json;
//!
//! let raw = json!({
//!     "_id": "b-1",
//!     "title": "Bumi",
//!     "coverImage": "https://img.example/bumi.jpg",
//!     "tags": ["Fantasi", { "name": "Remaja", "url": "/tag/remaja" }],
//!     "pageCount": 440
//! });
//!
//! let book = sanitize(&raw).unwrap();
//! assert_eq!(book.cover_image, "https://img.example/bumi.jpg");
//! assert_eq!(book.details.total_pages, "440 pages");
//! assert_eq!(book.tags[0].url, "");
//!
//! let books = sanitize_all(&[raw, json!({ "title": "no id" })]);
//! assert_eq!(books.len(), 1);
//! ```

use chrono::{DateTime, Datelike, SecondsFormat, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use tracing::warn;

use crate::{
    net::json::{array_at, first_text, positive_number_at, text_at},
    types::{BookDetails, BookRecord, BuyLink, LegacyMirror, Link},
};

pub const UNKNOWN_AUTHOR: &str = "Penulis tidak diketahui";
pub const UNKNOWN_CATEGORY: &str = "Kategori tidak tersedia";
pub const UNKNOWN_PUBLISHER: &str = "Penerbit tidak diketahui";
pub const MISSING_SUMMARY: &str = "Deskripsi tidak tersedia";
pub const DEFAULT_STORE: &str = "Toko Online";
pub const DEFAULT_LANGUAGE: &str = "Indonesia";

const ID_PATHS: &[&str] = &["_id", "id"];
const COVER_PATHS: &[&str] = &["cover_image", "coverImage"];
const LEGACY_COVER_PATHS: &[&str] = &["coverImage", "cover_image"];
const CATALOG_NUMBER_PATHS: &[&str] = &["details.no_gm", "no_gm"];
const ISBN_PATHS: &[&str] = &["details.isbn", "isbn"];
const LEGACY_ISBN_PATHS: &[&str] = &["isbn", "details.isbn"];
const PRICE_PATHS: &[&str] = &["details.price", "price"];
const SUMMARY_PATHS: &[&str] = &["summary", "description"];
const DESCRIPTION_PATHS: &[&str] = &["description", "summary"];

static NON_DIGIT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\d]").expect("Failed to compile non-digit pattern"));

/// Sanitizes one raw catalog entry using the current time for date defaults.
///
/// Returns `None` when `raw` is not an object or lacks a non-empty id
/// (`_id`, then `id`) or title.
pub fn sanitize(raw: &Value) -> Option<BookRecord> {
    sanitize_at(raw, Utc::now())
}

/// Sanitizes one raw catalog entry, taking `now` as the clock for the
/// published-year and timestamp defaults.
pub fn sanitize_at(raw: &Value, now: DateTime<Utc>) -> Option<BookRecord> {
    if !raw.is_object() {
        warn!(raw = %raw, "Invalid book data: not an object");
        return None;
    }

    let (Some(id), Some(title)) = (first_text(raw, ID_PATHS), text_at(raw, "title")) else {
        warn!(raw = %raw, "Invalid book data: missing id or title");
        return None;
    };

    let current_year = now.year();
    let timestamp = now.to_rfc3339_opts(SecondsFormat::Millis, true);

    let summary = first_text(raw, SUMMARY_PATHS).unwrap_or_else(|| MISSING_SUMMARY.to_string());

    let details = BookDetails {
        catalog_number: first_text(raw, CATALOG_NUMBER_PATHS).unwrap_or_default(),
        isbn: first_text(raw, ISBN_PATHS).unwrap_or_default(),
        price: first_text(raw, PRICE_PATHS).unwrap_or_else(|| "0".to_string()),
        total_pages: text_at(raw, "details.total_pages")
            .or_else(|| positive_number_at(raw, "pageCount").map(|n| format!("{n} pages")))
            .unwrap_or_else(|| "0 pages".to_string()),
        size: text_at(raw, "details.size").unwrap_or_default(),
        published_date: text_at(raw, "details.published_date")
            .or_else(|| positive_number_at(raw, "publishedYear").map(|n| n.to_string()))
            .unwrap_or_else(|| current_year.to_string()),
        format: text_at(raw, "details.format").unwrap_or_default(),
    };

    let legacy = LegacyMirror {
        description: first_text(raw, DESCRIPTION_PATHS)
            .unwrap_or_else(|| MISSING_SUMMARY.to_string()),
        cover_image: first_text(raw, LEGACY_COVER_PATHS).unwrap_or_default(),
        published_year: positive_number_at(raw, "publishedYear")
            .map(|n| n as i32)
            .unwrap_or(current_year),
        isbn: first_text(raw, LEGACY_ISBN_PATHS).unwrap_or_default(),
        page_count: positive_number_at(raw, "pageCount")
            .map(|n| n as u32)
            .or_else(|| text_at(raw, "details.total_pages").map(|pages| parse_page_count(&pages)))
            .unwrap_or(0),
        language: text_at(raw, "language").unwrap_or_else(|| DEFAULT_LANGUAGE.to_string()),
        rating: positive_number_at(raw, "rating").unwrap_or(0.0),
        review_count: positive_number_at(raw, "reviewCount")
            .map(|n| n as u32)
            .unwrap_or(0),
        price: numeric_price(raw),
        availability: raw
            .get("availability")
            .and_then(Value::as_bool)
            .unwrap_or(true),
        created_at: text_at(raw, "createdAt").unwrap_or_else(|| timestamp.clone()),
        updated_at: text_at(raw, "updatedAt").unwrap_or(timestamp),
    };

    Some(BookRecord {
        id,
        title,
        author: link_or(raw, "author", UNKNOWN_AUTHOR),
        category: link_or(raw, "category", UNKNOWN_CATEGORY),
        cover_image: first_text(raw, COVER_PATHS).unwrap_or_default(),
        details,
        tags: array_at(raw, "tags")
            .map(|tags| tags.iter().map(|tag| TagInput::from(tag).into_link()).collect())
            .unwrap_or_default(),
        summary,
        buy_links: array_at(raw, "buy_links")
            .map(|links| links.iter().map(buy_link).collect())
            .unwrap_or_default(),
        publisher: text_at(raw, "publisher").unwrap_or_else(|| UNKNOWN_PUBLISHER.to_string()),
        legacy,
    })
}

/// Sanitizes a batch, silently dropping entries that are rejected.
pub fn sanitize_all(raws: &[Value]) -> Vec<BookRecord> {
    let now = Utc::now();
    raws.iter().filter_map(|raw| sanitize_at(raw, now)).collect()
}

/// Parses a page count such as `"320 pages"` into `320`.
///
/// Leading digits are read after trimming; anything unparseable is `0`.
pub fn parse_page_count(text: &str) -> u32 {
    let trimmed = text.trim();
    let digits_end = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(trimmed.len());
    trimmed[..digits_end].parse().unwrap_or(0)
}

/// Parses a display price such as `"Rp 75.000"` into `75000` by dropping every
/// non-digit character. Unparseable input is `0`.
pub fn parse_price(text: &str) -> u64 {
    NON_DIGIT.replace_all(text, "").parse().unwrap_or(0)
}

/// A tag as it appears in the catalog.
enum TagInput<'a> {
    Plain(&'a str),
    Linked(&'a Value),
}

impl<'a> From<&'a Value> for TagInput<'a> {
    fn from(value: &'a Value) -> Self {
        match value {
            Value::String(name) => TagInput::Plain(name.as_str()),
            other => TagInput::Linked(other),
        }
    }
}

impl TagInput<'_> {
    fn into_link(self) -> Link {
        match self {
            TagInput::Plain(name) => Link::new(name, ""),
            TagInput::Linked(value) => Link::new(
                text_at(value, "name").unwrap_or_default(),
                text_at(value, "url").unwrap_or_default(),
            ),
        }
    }
}

fn link_or(raw: &Value, field: &str, placeholder: &str) -> Link {
    let name = text_at(raw, &format!("{field}.name")).unwrap_or_else(|| placeholder.to_string());
    let url = text_at(raw, &format!("{field}.url")).unwrap_or_default();
    Link { name, url }
}

fn buy_link(value: &Value) -> BuyLink {
    BuyLink {
        store: text_at(value, "store").unwrap_or_else(|| DEFAULT_STORE.to_string()),
        url: text_at(value, "url").unwrap_or_default(),
    }
}

/// A numeric `price` wins; otherwise the digits of `details.price`.
fn numeric_price(raw: &Value) -> f64 {
    if let Some(price) = raw.get("price").and_then(Value::as_f64) {
        return price;
    }
    text_at(raw, "details.price")
        .as_deref()
        .map(parse_price)
        .unwrap_or(0) as f64
}
