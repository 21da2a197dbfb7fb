//! The fixed set of physical storage sectors.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// A physical storage location. The set is closed: stock only ever lives in
/// one of these three places.
pub enum Sector {
    Mill,
    Dispatch,
    Factory,
}

impl Sector {
    pub const ALL: [Sector; 3] = [Sector::Mill, Sector::Dispatch, Sector::Factory];

    /// Label used in the persisted dataset and shown to the user.
    pub fn label(&self) -> &'static str {
        match self {
            Sector::Mill => "Molino",
            Sector::Dispatch => "Despacho",
            Sector::Factory => "Fábrica",
        }
    }
}

impl fmt::Display for Sector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Raised when a stored sector value is outside the closed set.
pub struct UnknownSector(pub String);

impl fmt::Display for UnknownSector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown sector `{}`", self.0)
    }
}

impl std::error::Error for UnknownSector {}

impl FromStr for Sector {
    type Err = UnknownSector;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "Molino" => Ok(Sector::Mill),
            "Despacho" => Ok(Sector::Dispatch),
            "Fábrica" => Ok(Sector::Factory),
            other => Err(UnknownSector(other.to_string())),
        }
    }
}
