//! sauco-domain
//!
//! Pure domain models for the inventory ledger (Catalog, Movement, Sector).
//! No I/O, no CLI, no storage. Only data types and core enums.

pub mod catalog;
pub mod ledger;
pub mod movement;
pub mod sector;

pub use catalog::*;
pub use ledger::*;
pub use movement::*;
pub use sector::*;
