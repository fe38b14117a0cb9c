//! Remote catalog implementations with conditional compilation support.
//!
//! # Feature Flags
//!
//! - `source-bukuacak` - Enables the BukuAcak catalog
//! - `all-sources` - Enables all catalogs (default)
//!
//! Build without any bundled catalog (bring your own [`BookCatalog`](crate::catalog::BookCatalog)):
//! ```bash
//! cargo build --no-default-features
//! ```

#[cfg(feature = "source-bukuacak")]
pub mod bukuacak;

#[cfg(feature = "source-bukuacak")]
pub use bukuacak::BukuAcakCatalog;
