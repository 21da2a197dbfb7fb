//! Current-stock aggregation over the movement ledger.

use std::collections::BTreeMap;

use sauco_domain::{Ledger, Movement, OperationKind, Sector};

/// Derives on-hand quantities by folding the full movement history on every
/// call. Nothing is cached; the ledger is the single source of truth.
pub struct StockService;

impl StockService {
    /// Entries minus exits for one (product, sector) pair.
    pub fn current_stock(ledger: &Ledger, product: &str, sector: Sector) -> f64 {
        ledger
            .iter()
            .filter(|movement| movement.sector == sector && movement.product == product)
            .map(signed_quantity)
            .sum()
    }

    /// Balances for every (product, sector) pair observed in the ledger,
    /// computed in one pass. Products no longer in the catalog still show
    /// up here; historical movements outlive catalog replacements.
    pub fn current_stock_all(ledger: &Ledger) -> BTreeMap<(String, Sector), f64> {
        let mut balances = BTreeMap::new();
        for movement in ledger.iter() {
            *balances
                .entry((movement.product.clone(), movement.sector))
                .or_insert(0.0) += signed_quantity(movement);
        }
        balances
    }
}

/// Incremental running balances keyed by (product, sector). `apply` keeps
/// the index in step with appends; the full replay in
/// [`StockService::current_stock_all`] remains the ground truth.
#[derive(Debug, Clone, Default)]
pub struct StockIndex {
    balances: BTreeMap<(String, Sector), f64>,
}

impl StockIndex {
    pub fn build(ledger: &Ledger) -> Self {
        let mut index = Self::default();
        for movement in ledger.iter() {
            index.apply(movement);
        }
        index
    }

    pub fn apply(&mut self, movement: &Movement) {
        *self
            .balances
            .entry((movement.product.clone(), movement.sector))
            .or_insert(0.0) += signed_quantity(movement);
    }

    pub fn balance(&self, product: &str, sector: Sector) -> f64 {
        self.balances
            .get(&(product.to_string(), sector))
            .copied()
            .unwrap_or(0.0)
    }

    pub fn balances(&self) -> &BTreeMap<(String, Sector), f64> {
        &self.balances
    }
}

fn signed_quantity(movement: &Movement) -> f64 {
    match movement.kind {
        OperationKind::Entry => movement.quantity,
        OperationKind::Exit => -movement.quantity,
    }
}
