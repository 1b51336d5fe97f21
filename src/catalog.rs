//! The catalog module
//! Product records and the provider seam the recommender reads from

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// Number of numeric features per product: price, ram, storage, rating
pub const FEATURE_COUNT: usize = 4;

/// A sellable item as stored in `products.json`.
///
/// The four numeric features are optional at the serde level so that a
/// product with a missing attribute still loads; it only fails once the
/// recommender asks for its [`features`](Product::features).
/// Attributes the storefront doesn't model (brand, image, ...) are kept in
/// `extra` and written back unchanged.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Product {
    pub id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ram: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Product {
    /// Creates a product with all four features set and no extra attributes.
    ///
    /// # Examples
    ///
    /// ```
    /// use cartiq::Product;
    ///
    /// let phone = Product::new(1, 100.0, 4.0, 64.0, 4.0);
    /// assert_eq!(phone.features().unwrap(), [100.0, 4.0, 64.0, 4.0]);
    /// ```
    pub fn new(id: u64, price: f64, ram: f64, storage: f64, rating: f64) -> Product {
        Product {
            id,
            name: None,
            price: Some(price),
            ram: Some(ram),
            storage: Some(storage),
            rating: Some(rating),
            extra: Map::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Product {
        self.name = Some(name.into());
        self
    }

    /// Feature vector `[price, ram, storage, rating]`, unscaled.
    ///
    /// # Returns
    ///
    /// * `Ok([f64; 4])` - The raw feature values
    /// * `Err(Error::InvalidInput)` - A feature is missing or not a finite number
    pub fn features(&self) -> Result<[f64; FEATURE_COUNT]> {
        let fields = [
            ("price", self.price),
            ("ram", self.ram),
            ("storage", self.storage),
            ("rating", self.rating),
        ];

        let mut features = [0.0; FEATURE_COUNT];
        for (slot, (name, value)) in features.iter_mut().zip(fields) {
            match value {
                Some(v) if v.is_finite() => *slot = v,
                Some(_) => {
                    return Err(Error::InvalidInput(format!(
                        "product {} has a non-finite '{}'", self.id, name
                    )));
                }
                None => {
                    return Err(Error::InvalidInput(format!(
                        "product {} is missing '{}'", self.id, name
                    )));
                }
            }
        }

        Ok(features)
    }

    /// Display label, falling back to the id
    pub fn label(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => format!("#{}", self.id),
        }
    }
}

/// Anything that can hand the recommender a catalog snapshot.
///
/// Each call must return the catalog as it is at call time; implementors
/// shouldn't cache across calls.
pub trait CatalogProvider {
    fn snapshot(&self) -> Result<Vec<Product>>;
}

impl CatalogProvider for [Product] {
    fn snapshot(&self) -> Result<Vec<Product>> {
        Ok(self.to_vec())
    }
}

impl CatalogProvider for Vec<Product> {
    fn snapshot(&self) -> Result<Vec<Product>> {
        Ok(self.clone())
    }
}

/// First product with the given id, by linear scan
pub fn position(catalog: &[Product], id: u64) -> Option<usize> {
    catalog.iter().position(|p| p.id == id)
}

#[cfg(test)]
mod catalog_test {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_with_extra_fields() {
        let raw = json!({
            "id": 7,
            "name": "Pixel",
            "brand": "Google",
            "price": 599,
            "ram": 8,
            "storage": 128,
            "rating": 4.5,
            "image": "pixel.png"
        });

        let product: Product = serde_json::from_value(raw).unwrap();
        assert_eq!(product.id, 7);
        assert_eq!(product.features().unwrap(), [599.0, 8.0, 128.0, 4.5]);
        assert_eq!(product.extra["brand"], "Google");
        assert_eq!(product.extra["image"], "pixel.png");
    }

    #[test]
    fn test_serialize_keeps_extra_fields() {
        let raw = json!({"id": 1, "price": 10.0, "ram": 1.0, "storage": 8.0, "rating": 3.0, "brand": "Acme"});
        let product: Product = serde_json::from_value(raw.clone()).unwrap();

        assert_eq!(serde_json::to_value(&product).unwrap(), raw);
    }

    #[test]
    fn test_missing_feature_is_invalid_input() {
        let product: Product = serde_json::from_value(json!({"id": 3, "price": 100, "ram": 4, "rating": 4.0})).unwrap();

        match product.features() {
            Err(Error::InvalidInput(msg)) => assert!(msg.contains("storage")),
            other => panic!("expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_null_feature_is_invalid_input() {
        let product: Product = serde_json::from_value(json!({"id": 3, "price": null, "ram": 4, "storage": 64, "rating": 4.0})).unwrap();
        assert!(matches!(product.features(), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_non_finite_feature_is_invalid_input() {
        let product = Product::new(1, f64::NAN, 4.0, 64.0, 4.0);
        assert!(matches!(product.features(), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_position_returns_first_match() {
        let catalog = vec![
            Product::new(1, 1.0, 1.0, 1.0, 1.0),
            Product::new(2, 2.0, 2.0, 2.0, 2.0),
            Product::new(2, 3.0, 3.0, 3.0, 3.0),
        ];

        assert_eq!(position(&catalog, 2), Some(1));
        assert_eq!(position(&catalog, 9), None);
    }

    #[test]
    fn test_label() {
        assert_eq!(Product::new(4, 1.0, 1.0, 1.0, 1.0).label(), "#4");
        assert_eq!(Product::new(4, 1.0, 1.0, 1.0, 1.0).with_name("Galaxy").label(), "Galaxy");
    }
}
