//! Favorite books, persisted through an injected store.
//!
//! [`FavoritesStore`] is the persistence seam: a whole-list `get`/`set` plus
//! change notification. Two stores ship with the crate:
//!
//! - [`MemoryFavorites`] - in-process, for tests and short-lived sessions
//! - [`FileFavorites`] - a JSON array on disk
//!
//! [`Favorites`] implements the operations the UI needs on top of any store.
//! Updates are read-modify-write without a lock spanning the read and the
//! write; concurrent togglers should share one [`Favorites`] instance from a
//! single task.
//!
//! # Examples
//!
//! ```rust
//! use pustaka::favorites::{Favorites, MemoryFavorites};
//! use pustaka::sanitize::sanitize;
//! use serde_json::json;
//!
//! # fn main() -> pustaka::Result<()> {
//! let favorites = Favorites::new(MemoryFavorites::new());
//! let book = sanitize(&json!({ "_id": "1", "title": "Bumi" })).unwrap();
//!
//! assert!(favorites.toggle(&book)?);
//! assert!(favorites.contains("1"));
//! assert!(!favorites.toggle(&book)?);
//! assert!(favorites.list().is_empty());
//! # Ok(())
//! # }
//! ```

use parking_lot::Mutex;
use serde_json::Value;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};

use crate::{error::Result, sanitize::sanitize, types::BookRecord};

/// Name used for favorites whose category is empty.
pub const UNCATEGORIZED: &str = "Tidak Berkategori";

/// Callback invoked with the new list after every successful write.
pub type Listener = Arc<dyn Fn(&[BookRecord]) + Send + Sync>;

/// Handle returned by [`FavoritesStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Persistence for the favorites list.
pub trait FavoritesStore: Send + Sync {
    /// The stored list. Unreadable or malformed storage reads as empty.
    fn get(&self) -> Vec<BookRecord>;

    /// Replaces the stored list and notifies subscribers.
    fn set(&self, books: Vec<BookRecord>) -> Result<()>;

    fn subscribe(&self, listener: Listener) -> SubscriptionId;

    /// Returns `false` if `id` was not subscribed.
    fn unsubscribe(&self, id: SubscriptionId) -> bool;
}

/// Subscriber registry shared by the bundled stores.
#[derive(Default)]
struct Listeners {
    next_id: u64,
    entries: Vec<(SubscriptionId, Listener)>,
}

impl Listeners {
    fn add(&mut self, listener: Listener) -> SubscriptionId {
        self.next_id += 1;
        let id = SubscriptionId(self.next_id);
        self.entries.push((id, listener));
        id
    }

    fn remove(&mut self, id: SubscriptionId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry, _)| *entry != id);
        self.entries.len() != before
    }

    fn snapshot(&self) -> Vec<Listener> {
        self.entries.iter().map(|(_, l)| Arc::clone(l)).collect()
    }
}

// Listeners run outside the registry lock so they may call back into the store.
fn notify(listeners: &Mutex<Listeners>, books: &[BookRecord]) {
    let snapshot = listeners.lock().snapshot();
    for listener in snapshot {
        listener(books);
    }
}

/// In-process favorites store.
#[derive(Default)]
pub struct MemoryFavorites {
    books: Mutex<Vec<BookRecord>>,
    listeners: Mutex<Listeners>,
}

impl MemoryFavorites {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FavoritesStore for MemoryFavorites {
    fn get(&self) -> Vec<BookRecord> {
        self.books.lock().clone()
    }

    fn set(&self, books: Vec<BookRecord>) -> Result<()> {
        *self.books.lock() = books.clone();
        notify(&self.listeners, &books);
        Ok(())
    }

    fn subscribe(&self, listener: Listener) -> SubscriptionId {
        self.listeners.lock().add(listener)
    }

    fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.listeners.lock().remove(id)
    }
}

/// Favorites stored as a JSON array in a single file.
pub struct FileFavorites {
    path: PathBuf,
    listeners: Mutex<Listeners>,
}

impl FileFavorites {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            listeners: Mutex::new(Listeners::default()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl FavoritesStore for FileFavorites {
    fn get(&self) -> Vec<BookRecord> {
        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Unreadable favorites file");
                return Vec::new();
            }
        };

        let entries: Vec<Value> = match serde_json::from_slice(&bytes) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Malformed favorites file");
                return Vec::new();
            }
        };

        let books: Vec<BookRecord> = entries.iter().filter_map(restore_favorite).collect();
        if books.len() < entries.len() {
            warn!(
                path = %self.path.display(),
                stored = entries.len(),
                kept = books.len(),
                "Dropped unreadable favorites"
            );
        }
        books
    }

    fn set(&self, books: Vec<BookRecord>) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, serde_json::to_vec(&books)?)?;
        notify(&self.listeners, &books);
        Ok(())
    }

    fn subscribe(&self, listener: Listener) -> SubscriptionId {
        self.listeners.lock().add(listener)
    }

    fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.listeners.lock().remove(id)
    }
}

/// One stored favorite. Complete records load as written; partial ones go
/// back through [`sanitize`], and entries without an id or title are lost.
fn restore_favorite(entry: &Value) -> Option<BookRecord> {
    serde_json::from_value(entry.clone())
        .ok()
        .or_else(|| sanitize(entry))
}

/// Number of favorites in one category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryCount {
    pub name: String,
    pub count: usize,
}

/// Favorites operations over a [`FavoritesStore`].
pub struct Favorites<S> {
    store: S,
}

impl<S: FavoritesStore> Favorites<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn list(&self) -> Vec<BookRecord> {
        self.store.get()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.store.get().iter().any(|book| book.id == id)
    }

    /// Adds `book` if absent, removes it if present.
    ///
    /// Returns whether the book is a favorite afterwards.
    pub fn toggle(&self, book: &BookRecord) -> Result<bool> {
        let mut books = self.store.get();
        let was_favorite = books.iter().any(|fav| fav.id == book.id);

        if was_favorite {
            books.retain(|fav| fav.id != book.id);
        } else {
            books.push(book.clone());
        }

        self.store.set(books)?;
        if was_favorite {
            info!(id = %book.id, "Buku dihapus dari favorit");
        } else {
            info!(id = %book.id, "Buku ditambahkan ke favorit");
        }
        Ok(!was_favorite)
    }

    /// Removes the book with `id`. Returns whether it was a favorite.
    pub fn remove(&self, id: &str) -> Result<bool> {
        let mut books = self.store.get();
        let before = books.len();
        books.retain(|fav| fav.id != id);

        if books.len() == before {
            return Ok(false);
        }
        self.store.set(books)?;
        Ok(true)
    }

    /// Favorites per category, largest first; ties keep first-seen order.
    pub fn category_stats(&self) -> Vec<CategoryCount> {
        let mut stats: Vec<CategoryCount> = Vec::new();

        for book in self.store.get() {
            let name = if book.category.name.is_empty() {
                UNCATEGORIZED.to_string()
            } else {
                book.category.name
            };

            match stats.iter_mut().find(|stat| stat.name == name) {
                Some(stat) => stat.count += 1,
                None => stats.push(CategoryCount { name, count: 1 }),
            }
        }

        stats.sort_by(|a, b| b.count.cmp(&a.count));
        stats
    }

    pub fn subscribe(&self, listener: Listener) -> SubscriptionId {
        self.store.subscribe(listener)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.store.unsubscribe(id)
    }
}
