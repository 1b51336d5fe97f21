//! # CartIQ - A Small Storefront With Recommendations
//!
//! CartIQ keeps its catalog, users and view history in flat JSON files and
//! recommends products by cosine similarity over four raw features:
//! price, ram, storage and rating. The catalog is read fresh for every
//! recommendation, nothing is cached.
//!
//! ## Example
//!
//! ```
//! use cartiq::{Product, recommend};
//!
//! let catalog = vec![
//!     Product::new(1, 100.0, 4.0, 64.0, 4.0),
//!     Product::new(2, 110.0, 4.0, 70.0, 4.1),
//!     Product::new(3, 900.0, 16.0, 512.0, 4.8),
//! ];
//!
//! // Up to three products, most similar first, never the target itself
//! let recs = recommend(&catalog, 1).unwrap();
//! assert_eq!(recs[0].id, 2);
//! assert_eq!(recs.len(), 2);
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod recommender;
pub mod server;
pub mod store;
pub mod vector;

// Re-export the primary public API
pub use catalog::{CatalogProvider, Product};
pub use config::Config;
pub use error::{Error, Result};
pub use recommender::{recommend, recommend_from};
pub use store::Store;
