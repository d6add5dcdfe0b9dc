//! # Session State
//!
//! The in-memory cart/wishlist shared across tasks, plus their on-disk
//! persistence between runs.
//!
//! ## Layout
//! ```text
//! SharedCart / SharedWishlist          Arc<Mutex<..>> handles
//!        │ with_cart / with_cart_mut   (closure-scoped lock access)
//!        ▼
//! SessionStore                         JSON files under the platform
//!   cart.v1.json                       config dir (or an explicit path
//!   wishlist.v1.json                   in tests)
//! ```
//!
//! File names carry a schema version. A file that fails to parse is
//! treated as absent rather than fatal: losing a saved cart beats refusing
//! to start.

use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use directories::ProjectDirs;
use tracing::{debug, warn};

use storefront_core::{Cart, Wishlist};

use crate::error::SessionError;

const CART_FILE: &str = "cart.v1.json";
const WISHLIST_FILE: &str = "wishlist.v1.json";

// =============================================================================
// Shared Handles
// =============================================================================

/// Thread-safe handle to the session cart.
///
/// Callers never hold the guard across an await point: access goes through
/// closures, so the lock scope is exactly the closure body.
#[derive(Debug, Clone, Default)]
pub struct SharedCart {
    inner: Arc<Mutex<Cart>>,
}

impl SharedCart {
    /// An empty shared cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an existing cart (e.g., one loaded from disk).
    pub fn from_cart(cart: Cart) -> Self {
        SharedCart {
            inner: Arc::new(Mutex::new(cart)),
        }
    }

    /// Runs `f` with shared read-style access to the cart.
    pub fn with_cart<T>(&self, f: impl FnOnce(&Cart) -> T) -> T {
        let guard = self.inner.lock().expect("cart mutex poisoned");
        f(&guard)
    }

    /// Runs `f` with exclusive access to the cart.
    pub fn with_cart_mut<T>(&self, f: impl FnOnce(&mut Cart) -> T) -> T {
        let mut guard = self.inner.lock().expect("cart mutex poisoned");
        f(&mut guard)
    }
}

/// Thread-safe handle to the session wishlist.
#[derive(Debug, Clone, Default)]
pub struct SharedWishlist {
    inner: Arc<Mutex<Wishlist>>,
}

impl SharedWishlist {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_wishlist(wishlist: Wishlist) -> Self {
        SharedWishlist {
            inner: Arc::new(Mutex::new(wishlist)),
        }
    }

    pub fn with_wishlist<T>(&self, f: impl FnOnce(&Wishlist) -> T) -> T {
        let guard = self.inner.lock().expect("wishlist mutex poisoned");
        f(&guard)
    }

    pub fn with_wishlist_mut<T>(&self, f: impl FnOnce(&mut Wishlist) -> T) -> T {
        let mut guard = self.inner.lock().expect("wishlist mutex poisoned");
        f(&mut guard)
    }
}

// =============================================================================
// Session Store
// =============================================================================

/// Persists cart and wishlist as versioned JSON files.
#[derive(Debug, Clone)]
pub struct SessionStore {
    dir: PathBuf,
}

impl SessionStore {
    /// Store rooted at the platform config directory.
    pub fn new() -> Result<Self, SessionError> {
        let dirs =
            ProjectDirs::from("com", "storefront", "storefront").ok_or(SessionError::NoSessionDir)?;
        Self::at(dirs.config_dir().to_path_buf())
    }

    /// Store rooted at an explicit directory. Used by tests.
    pub fn at(dir: PathBuf) -> Result<Self, SessionError> {
        fs::create_dir_all(&dir)?;
        Ok(SessionStore { dir })
    }

    /// Loads the saved cart, or an empty one if no usable file exists.
    pub fn load_cart(&self) -> Cart {
        self.load_or_default(CART_FILE)
    }

    /// Loads the saved wishlist, or an empty one if no usable file exists.
    pub fn load_wishlist(&self) -> Wishlist {
        self.load_or_default(WISHLIST_FILE)
    }

    /// Writes the cart to disk.
    pub fn save_cart(&self, cart: &Cart) -> Result<(), SessionError> {
        self.save(CART_FILE, cart)
    }

    /// Writes the wishlist to disk.
    pub fn save_wishlist(&self, wishlist: &Wishlist) -> Result<(), SessionError> {
        self.save(WISHLIST_FILE, wishlist)
    }

    fn load_or_default<T: serde::de::DeserializeOwned + Default>(&self, file: &str) -> T {
        let path = self.dir.join(file);
        let contents = match fs::read_to_string(&path) {
            Ok(c) => c,
            Err(_) => {
                debug!(path = %path.display(), "No saved session file, starting empty");
                return T::default();
            }
        };
        match serde_json::from_str(&contents) {
            Ok(value) => value,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Session file corrupt, starting empty");
                T::default()
            }
        }
    }

    fn save<T: serde::Serialize>(&self, file: &str, value: &T) -> Result<(), SessionError> {
        let path = self.dir.join(file);
        let json = serde_json::to_string_pretty(value)?;
        fs::write(&path, json)?;
        debug!(path = %path.display(), "Session file saved");
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_core::Product;

    #[test]
    fn test_shared_cart_closures() {
        let shared = SharedCart::new();

        shared.with_cart_mut(|cart| {
            cart.add(&Product::sample("1", "Wireless Headphones", "499"))
                .unwrap();
        });

        let items = shared.with_cart(|cart| cart.total_items());
        assert_eq!(items, 1);

        // Clones share the same cart
        let other = shared.clone();
        other.with_cart_mut(|cart| cart.clear());
        assert!(shared.with_cart(|cart| cart.is_empty()));
    }

    #[test]
    fn test_shared_wishlist_closures() {
        let shared = SharedWishlist::new();
        let p = Product::sample("1", "Wireless Headphones", "499");

        assert!(shared.with_wishlist_mut(|w| w.toggle(&p)));
        assert!(shared.with_wishlist(|w| w.contains("1")));
    }

    #[test]
    fn test_cart_roundtrips_through_store() {
        let tmp = tempfile::tempdir().unwrap();
        let store = SessionStore::at(tmp.path().to_path_buf()).unwrap();

        let mut cart = Cart::new();
        cart.add(&Product::sample("1", "Wireless Headphones", "499"))
            .unwrap();
        cart.add(&Product::sample("2", "Mechanical Keyboard", "1299.50"))
            .unwrap();
        store.save_cart(&cart).unwrap();

        let loaded = store.load_cart();
        assert_eq!(loaded.total_items(), 2);
        assert_eq!(loaded.total_amount(), cart.total_amount());
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let tmp = tempfile::tempdir().unwrap();
        let store = SessionStore::at(tmp.path().to_path_buf()).unwrap();

        assert!(store.load_cart().is_empty());
        assert!(store.load_wishlist().is_empty());
    }

    #[test]
    fn test_corrupt_file_loads_empty() {
        let tmp = tempfile::tempdir().unwrap();
        let store = SessionStore::at(tmp.path().to_path_buf()).unwrap();

        fs::write(tmp.path().join(CART_FILE), "not json{{{").unwrap();
        assert!(store.load_cart().is_empty());
    }

    #[test]
    fn test_wishlist_roundtrips_through_store() {
        let tmp = tempfile::tempdir().unwrap();
        let store = SessionStore::at(tmp.path().to_path_buf()).unwrap();

        let mut wishlist = Wishlist::new();
        wishlist.toggle(&Product::sample("7", "Desk Lamp", "350"));
        store.save_wishlist(&wishlist).unwrap();

        let loaded = store.load_wishlist();
        assert!(loaded.contains("7"));
    }
}
