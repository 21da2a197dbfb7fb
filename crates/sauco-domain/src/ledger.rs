//! The append-only movement ledger.

use serde::{Deserialize, Serialize};

use crate::movement::Movement;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
/// The full movement history, in append order. Append order is the durable
/// order: no reordering, no deduplication, no stored running totals.
pub struct Ledger {
    pub movements: Vec<Movement>,
}

impl Ledger {
    pub fn new(movements: Vec<Movement>) -> Self {
        Self { movements }
    }

    pub fn append(&mut self, movement: Movement) {
        self.movements.push(movement);
    }

    pub fn len(&self) -> usize {
        self.movements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movements.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Movement> {
        self.movements.iter()
    }
}
