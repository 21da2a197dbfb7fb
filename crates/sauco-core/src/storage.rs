use std::path::Path;

use sauco_domain::{Catalog, Ledger, Product};

use crate::StoreError;

/// Catalog and ledger persisted together; every save rewrites both sheets
/// as one logical unit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    pub catalog: Catalog,
    pub ledger: Ledger,
}

impl Dataset {
    pub fn new(catalog: Catalog, ledger: Ledger) -> Self {
        Self { catalog, ledger }
    }
}

/// Raw tabular contents of an uploaded catalog sheet, before validation.
/// Column names are kept verbatim so the catalog service owns the check for
/// the required product column.
#[derive(Debug, Clone, Default)]
pub struct CatalogUpload {
    pub columns: Vec<String>,
    pub products: Vec<Product>,
}

impl CatalogUpload {
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|column| column == name)
    }
}

/// Abstraction over persistence backends holding the two-sheet dataset.
pub trait InventoryStorage: Send + Sync {
    /// Loads the persisted dataset, or an empty one when nothing has been
    /// saved yet. Corrupt or partially missing data is an error the caller
    /// may degrade to an empty dataset with a surfaced warning.
    fn load(&self) -> Result<Dataset, StoreError>;

    /// Atomically rewrites the whole dataset. Readers never observe a
    /// partial write.
    fn save(&self, dataset: &Dataset) -> Result<(), StoreError>;

    /// Reads a replacement catalog sheet from an external workbook.
    fn read_catalog_upload(&self, path: &Path) -> Result<CatalogUpload, StoreError>;
}
