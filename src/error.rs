//! Error types, result handling and user-facing error classification.
//!
//! All fallible operations return a [`Result<T>`] which is a type alias for
//! `std::result::Result<T, Error>`.
//!
//! # Error Categories
//!
//! - **Transport Errors**: 404, 5xx, timeouts and connection failures, already
//!   rendered into a user-facing message by the HTTP layer
//! - **Status Errors**: any other HTTP failure, with the response body kept
//! - **Parse / JSON Errors**: malformed response payloads
//! - **IO Errors**: favorites persistence
//!
//! Nothing in this crate is fatal to the caller: the search orchestrator turns
//! every error into a message through [`classify`] and degrades to an empty
//! result.
//!
//! # Examples
//!
//! ```rust
//! use pustaka::error::{classify, Error, TransportKind};
//!
//! let error = Error::transport(TransportKind::NotFound);
//! assert_eq!(classify(&error), "Data tidak ditemukan");
//! ```

use serde_json::Value;
use thiserror::Error;

/// Message used when an error carries nothing a user can read.
pub const UNKNOWN_ERROR_MESSAGE: &str = "Terjadi kesalahan yang tidak diketahui";

/// Type alias for Results with pustaka errors.
///
/// ```rust
/// use pustaka::{Error, Result};
///
/// fn example_with_error() -> Result<()> {
///     Err(Error::parse("Something went wrong"))
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// Transport conditions the HTTP layer recognises and pre-renders.
///
/// Each kind maps to a fixed, user-facing message (see
/// [`TransportKind::message`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportKind {
    /// HTTP 404
    NotFound,
    /// HTTP 5xx
    Server,
    /// The request did not complete within the client timeout
    Timeout,
    /// Anything else that kept the request from producing a response
    Connection,
}

impl TransportKind {
    /// The user-facing message for this transport condition.
    pub fn message(self) -> &'static str {
        match self {
            TransportKind::NotFound => "Data tidak ditemukan",
            TransportKind::Server => "Server sedang bermasalah. Silakan coba lagi nanti",
            TransportKind::Timeout => "Request timeout. Periksa koneksi internet Anda",
            TransportKind::Connection => "Terjadi kesalahan saat mengambil data",
        }
    }
}

/// Error type for all pustaka operations.
///
/// # Variants
///
/// * [`Network`](Error::Network) - Raw HTTP client errors
/// * [`Transport`](Error::Transport) - Classified transport failures with a ready message
/// * [`Status`](Error::Status) - Unclassified HTTP failures with their body
/// * [`Parse`](Error::Parse) - Data format errors
/// * [`Json`](Error::Json) - JSON serialization errors
/// * [`Io`](Error::Io) - File system errors
/// * [`InvalidArgument`](Error::InvalidArgument) - Rejected caller input
/// * [`Other`](Error::Other) - Generic error messages
#[derive(Error, Debug)]
pub enum Error {
    /// Errors from the underlying HTTP client (reqwest) that were not
    /// classified into a [`TransportKind`], such as a body that could not be
    /// read after a successful status line.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// A transport failure the HTTP layer has already turned into a
    /// user-facing message.
    ///
    /// ```rust
    /// use pustaka::error::{Error, TransportKind};
    ///
    /// let error = Error::transport(TransportKind::Timeout);
    /// assert!(error.to_string().contains("timeout"));
    /// ```
    #[error("{message}")]
    Transport { kind: TransportKind, message: String },

    /// An HTTP response with a non-success status that has no fixed message.
    ///
    /// The body is kept as JSON (when it parses) so that a server-provided
    /// `message` field can be surfaced to the user.
    #[error("HTTP {status}")]
    Status { status: u16, body: Option<Value> },

    /// Data parsing and format errors.
    #[error("Parse error: {0}")]
    Parse(String),

    /// JSON serialization and deserialization errors.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// File system errors from favorites persistence.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The caller passed something the operation cannot work with.
    #[error("{0}")]
    InvalidArgument(String),

    /// Generic error messages.
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Creates a parse error with the given message.
    pub fn parse(msg: impl Into<String>) -> Self {
        Error::Parse(msg.into())
    }

    /// Creates a transport error carrying the fixed message of `kind`.
    pub fn transport(kind: TransportKind) -> Self {
        Error::Transport {
            kind,
            message: kind.message().to_string(),
        }
    }

    /// Creates a status error from an HTTP status code and optional JSON body.
    pub fn status(status: u16, body: Option<Value>) -> Self {
        Error::Status { status, body }
    }

    /// Creates an invalid-argument error.
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Error::InvalidArgument(msg.into())
    }

    /// The message this error carries directly, if any.
    ///
    /// [`Error::Status`] carries no direct message; its text lives in the
    /// response body (see [`Error::response_message`]).
    pub fn message(&self) -> Option<String> {
        match self {
            Error::Transport { message, .. } => Some(message.clone()),
            Error::Status { .. } => None,
            other => Some(other.to_string()),
        }
    }

    /// The `message` field of the wrapped HTTP response body, if present.
    pub fn response_message(&self) -> Option<String> {
        match self {
            Error::Status {
                body: Some(body), ..
            } => body
                .get("message")
                .and_then(Value::as_str)
                .filter(|msg| !msg.is_empty())
                .map(str::to_string),
            _ => None,
        }
    }
}

/// Maps any error from the catalog layer to a user-facing message.
///
/// Precedence: the error's own message, then the `message` field of the HTTP
/// response body it wraps, then [`UNKNOWN_ERROR_MESSAGE`]. Never panics and
/// always returns a string.
///
/// ```rust
/// use pustaka::error::{classify, Error, UNKNOWN_ERROR_MESSAGE};
/// use serde_json::json;
///
/// let error = Error::status(400, Some(json!({ "message": "Halaman tidak valid" })));
/// assert_eq!(classify(&error), "Halaman tidak valid");
///
/// let error = Error::status(418, None);
/// assert_eq!(classify(&error), UNKNOWN_ERROR_MESSAGE);
/// ```
pub fn classify(error: &Error) -> String {
    error
        .message()
        .filter(|msg| !msg.is_empty())
        .or_else(|| error.response_message())
        .unwrap_or_else(|| UNKNOWN_ERROR_MESSAGE.to_string())
}
