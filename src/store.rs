//! The store module
//! Flat JSON files in a data directory: products, users and view activity
//!
//! Every call reads the file it needs from disk and mutations rewrite the
//! whole document. There is no locking, so concurrent writers can lose
//! updates.

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::{
    fs::File,
    io::{BufReader, BufWriter, ErrorKind, Write},
    path::{Path, PathBuf},
};
use tracing::debug;

use crate::catalog::{CatalogProvider, Product, position};
use crate::error::{Error, Result};
use crate::recommender::recommend;

pub const PRODUCTS_FILE: &str = "products.json";
pub const USERS_FILE: &str = "users.json";
pub const ACTIVITY_FILE: &str = "activity.json";

/// The only action the storefront records
pub const VIEW_ACTION: &str = "view";

/// One entry of `activity.json`
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Activity {
    pub user: String,
    pub product_id: u64,
    pub action: String,
}

/// A product page: the product and what to show next to it
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ProductView {
    pub product: Product,
    pub recommendations: Vec<Product>,
}

/// Read a JSON document, or `T::default()` if the file doesn't exist
fn load_json<T: DeserializeOwned + Default>(path: &Path) -> Result<T> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "file missing, using empty document");
            return Ok(T::default());
        }
        Err(source) => return Err(Error::Io { path: path.to_path_buf(), source }),
    };

    let reader = BufReader::new(file);
    let data = serde_json::from_reader(reader)
        .map_err(|source| Error::Json { path: path.to_path_buf(), source })?;

    debug!(path = %path.display(), "loaded");
    Ok(data)
}

/// Rewrite a JSON document, pretty-printed with two-space indent
fn save_json<T: Serialize + ?Sized>(path: &Path, data: &T) -> Result<()> {
    let io_err = |source| Error::Io { path: path.to_path_buf(), source };

    let file = File::create(path).map_err(io_err)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, data)
        .map_err(|source| Error::Json { path: path.to_path_buf(), source })?;
    writer.flush().map_err(io_err)?;

    debug!(path = %path.display(), "saved");
    Ok(())
}

/// Handle on a data directory. Holds paths only; all state lives on disk.
#[derive(Debug, Clone)]
pub struct Store {
    dir: PathBuf,
}

impl Store {
    /// Creates a store over `dir`. The directory isn't touched until the first call.
    ///
    /// # Examples
    ///
    /// ```
    /// use cartiq::Store;
    ///
    /// let dir = tempfile::tempdir().unwrap();
    /// let store = Store::new(dir.path());
    ///
    /// // Missing files read as empty documents
    /// assert!(store.catalog().unwrap().is_empty());
    /// assert!(store.register_user("alice").unwrap());
    /// assert_eq!(store.users().unwrap(), vec!["alice".to_string()]);
    /// ```
    pub fn new(dir: impl Into<PathBuf>) -> Store {
        Store { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, file: &str) -> PathBuf {
        self.dir.join(file)
    }

    // ========== Products ==========

    /// Current contents of `products.json`, in file order
    pub fn catalog(&self) -> Result<Vec<Product>> {
        load_json(&self.path(PRODUCTS_FILE))
    }

    /// Replaces `products.json` with `products`
    pub fn save_catalog(&self, products: &[Product]) -> Result<()> {
        save_json(&self.path(PRODUCTS_FILE), products)
    }

    /// First product with `id`
    pub fn product(&self, id: u64) -> Result<Product> {
        let mut catalog = self.catalog()?;
        match position(&catalog, id) {
            Some(index) => Ok(catalog.swap_remove(index)),
            None => Err(Error::NotFound(format!("product {}", id))),
        }
    }

    /// Product page for `id`.
    ///
    /// When `user` is given a view is logged before recommending, so the
    /// product becomes that user's most recent activity.
    pub fn view_product(&self, user: Option<&str>, id: u64) -> Result<ProductView> {
        let catalog = self.catalog()?;
        let product = match position(&catalog, id) {
            Some(index) => catalog[index].clone(),
            None => return Err(Error::NotFound(format!("product {}", id))),
        };

        if let Some(user) = user {
            self.log_activity(user, id, VIEW_ACTION)?;
        }

        let recommendations = recommend(&catalog, id)?;
        Ok(ProductView { product, recommendations })
    }

    // ========== Users ==========

    /// Registered usernames, in registration order
    pub fn users(&self) -> Result<Vec<String>> {
        load_json(&self.path(USERS_FILE))
    }

    /// Adds `username` to `users.json` unless it is already there.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - The user was new and has been written
    /// * `Ok(false)` - The user already existed, nothing written
    /// * `Err(Error::InvalidInput)` - Blank username
    pub fn register_user(&self, username: &str) -> Result<bool> {
        let username = username.trim();
        if username.is_empty() {
            return Err(Error::InvalidInput("Username cannot be empty".to_string()));
        }

        let mut users = self.users()?;
        if users.iter().any(|u| u == username) {
            return Ok(false);
        }

        users.push(username.to_string());
        save_json(&self.path(USERS_FILE), &users)?;
        Ok(true)
    }

    // ========== Activity ==========

    /// Whole activity log, oldest first
    pub fn activity(&self) -> Result<Vec<Activity>> {
        load_json(&self.path(ACTIVITY_FILE))
    }

    /// Appends one record to `activity.json`
    pub fn log_activity(&self, user: &str, product_id: u64, action: &str) -> Result<()> {
        let mut activity = self.activity()?;
        activity.push(Activity {
            user: user.to_string(),
            product_id,
            action: action.to_string(),
        });

        save_json(&self.path(ACTIVITY_FILE), &activity)
    }

    /// Records belonging to `user`, oldest first
    pub fn activity_for(&self, user: &str) -> Result<Vec<Activity>> {
        Ok(self.activity()?
            .into_iter()
            .filter(|a| a.user == user)
            .collect())
    }

    /// Product id of the user's most recent activity
    pub fn last_viewed(&self, user: &str) -> Result<Option<u64>> {
        Ok(self.activity_for(user)?
            .last()
            .map(|a| a.product_id))
    }

    /// Recommendations seeded by the user's last viewed product.
    /// A user without activity gets an empty list.
    pub fn recommendations_for(&self, user: &str) -> Result<Vec<Product>> {
        match self.last_viewed(user)? {
            Some(id) => recommend(&self.catalog()?, id),
            None => Ok(Vec::new()),
        }
    }
}

impl CatalogProvider for Store {
    fn snapshot(&self) -> Result<Vec<Product>> {
        self.catalog()
    }
}
