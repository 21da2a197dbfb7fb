//! Sauco keeps a product catalog and an append-only stock movement ledger
//! for a single business, persisted in a two-sheet spreadsheet file.

pub mod cli;
pub mod config;
pub mod errors;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes the global tracing subscriber once per process.
pub fn init() {
    INIT_TRACING.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter = EnvFilter::from_default_env().add_directive("sauco=info".parse().unwrap());

        fmt().with_env_filter(filter).init();
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
    }
}
