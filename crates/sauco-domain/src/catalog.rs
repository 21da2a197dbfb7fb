//! Product catalog and packaging factors.

use serde::{Deserialize, Serialize};

/// Packaging factor assumed when a product has none configured.
pub const DEFAULT_UNITS_PER_BUNDLE: f64 = 1.0;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
/// A catalog row. Products are keyed by name; the packaging factor says how
/// many base units one bundle of this product contains.
pub struct Product {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub units_per_bundle: Option<f64>,
}

impl Product {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            units_per_bundle: None,
        }
    }

    pub fn with_units_per_bundle(mut self, factor: f64) -> Self {
        self.units_per_bundle = Some(factor);
        self
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
/// The product list. Replaced wholesale on upload; never holds stock state.
pub struct Catalog {
    pub products: Vec<Product>,
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn product(&self, name: &str) -> Option<&Product> {
        self.products.iter().find(|product| product.name == name)
    }

    /// Packaging factor for `name`. Falls back to 1.0 when the product has
    /// no configured factor or is not in the catalog at all; historical
    /// movements may reference products that a later upload dropped.
    pub fn units_per_bundle(&self, name: &str) -> f64 {
        self.product(name)
            .and_then(|product| product.units_per_bundle)
            .unwrap_or(DEFAULT_UNITS_PER_BUNDLE)
    }

    /// Product names sorted for display.
    pub fn sorted_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .products
            .iter()
            .map(|product| product.name.clone())
            .collect();
        names.sort();
        names.dedup();
        names
    }
}
