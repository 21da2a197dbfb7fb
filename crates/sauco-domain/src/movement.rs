//! Stock movement records and quantity conversion.

use std::{fmt, str::FromStr};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::sector::Sector;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
/// Whether a movement adds stock to a sector or removes it.
pub enum OperationKind {
    Entry,
    Exit,
}

impl OperationKind {
    pub const ALL: [OperationKind; 2] = [OperationKind::Entry, OperationKind::Exit];

    /// Label used in the persisted dataset and shown to the user.
    pub fn label(&self) -> &'static str {
        match self {
            OperationKind::Entry => "Ingreso",
            OperationKind::Exit => "Egreso",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Raised when a stored operation value is neither entry nor exit.
pub struct UnknownOperation(pub String);

impl fmt::Display for UnknownOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown operation `{}`", self.0)
    }
}

impl std::error::Error for UnknownOperation {}

impl FromStr for OperationKind {
    type Err = UnknownOperation;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "Ingreso" => Ok(OperationKind::Entry),
            "Egreso" => Ok(OperationKind::Exit),
            other => Err(UnknownOperation(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
/// How the user expressed a quantity before conversion to base units.
pub enum QuantityMode {
    Units,
    Bundles,
}

/// Converts user input to base units. `Bundles` multiplies by the product's
/// packaging factor; `Units` passes the value through unchanged.
pub fn to_base_units(raw: f64, mode: QuantityMode, units_per_bundle: f64) -> f64 {
    match mode {
        QuantityMode::Bundles => raw * units_per_bundle,
        QuantityMode::Units => raw,
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
/// One dated stock event. Movements are append-only: once recorded they are
/// never edited or deleted, and current stock is always a fold over them.
pub struct Movement {
    pub recorded_at: NaiveDateTime,
    pub product: String,
    pub kind: OperationKind,
    /// Base units, strictly positive.
    pub quantity: f64,
    pub sector: Sector,
}

impl Movement {
    /// Format of `recorded_at` in the persisted dataset (minute precision).
    pub const TIMESTAMP_FORMAT: &'static str = "%Y-%m-%d %H:%M";
}
