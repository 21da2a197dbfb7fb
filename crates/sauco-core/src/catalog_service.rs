//! Catalog replacement.

use sauco_domain::Catalog;

use crate::{
    storage::{CatalogUpload, Dataset},
    ValidationError,
};

/// Column every catalog upload must provide.
pub const PRODUCT_COLUMN: &str = "Producto";

/// Validates and applies wholesale catalog replacements.
pub struct CatalogService;

impl CatalogService {
    /// Replaces the dataset's catalog with the uploaded one. The movement
    /// ledger is never touched; history survives catalog swaps.
    pub fn replace(dataset: &mut Dataset, upload: CatalogUpload) -> Result<(), ValidationError> {
        if !upload.has_column(PRODUCT_COLUMN) {
            return Err(ValidationError::MissingColumn(PRODUCT_COLUMN));
        }
        dataset.catalog = Catalog::new(upload.products);
        tracing::info!(products = dataset.catalog.len(), "catalog replaced");
        Ok(())
    }
}
