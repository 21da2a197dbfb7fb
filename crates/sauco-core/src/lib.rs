//! sauco-core
//!
//! Business logic and services for the inventory ledger.
//! Depends on sauco-domain. No CLI, no terminal I/O, no direct file access.

pub mod catalog_service;
pub mod error;
pub mod movement_service;
pub mod stock_service;
pub mod storage;
pub mod time;

pub use catalog_service::{CatalogService, PRODUCT_COLUMN};
pub use error::{CoreError, StoreError, ValidationError};
pub use movement_service::{MovementDraft, MovementService};
pub use stock_service::{StockIndex, StockService};
pub use storage::{CatalogUpload, Dataset, InventoryStorage};
pub use time::Clock;

#[cfg(test)]
mod tests;
