//! Movement registration and sector transfers.

use chrono::{DateTime, NaiveDateTime, Timelike, Utc};

use sauco_domain::{Ledger, Movement, OperationKind, Sector};

use crate::{time::Clock, ValidationError};

/// A movement as requested by the user, before the ledger stamps it.
#[derive(Debug, Clone)]
pub struct MovementDraft {
    pub product: String,
    pub kind: OperationKind,
    /// Base units; callers convert bundle counts beforehand.
    pub quantity: f64,
    pub sector: Sector,
}

/// Appends validated movements to the ledger.
pub struct MovementService;

impl MovementService {
    /// Validates and appends a movement, stamping it with the current
    /// minute. The ledger is untouched when validation fails.
    pub fn register(
        ledger: &mut Ledger,
        draft: MovementDraft,
        clock: &dyn Clock,
    ) -> Result<Movement, ValidationError> {
        validate_quantity(draft.quantity)?;
        let movement = Movement {
            recorded_at: truncate_to_minute(clock.now()),
            product: draft.product,
            kind: draft.kind,
            quantity: draft.quantity,
            sector: draft.sector,
        };
        ledger.append(movement.clone());
        tracing::debug!(
            product = %movement.product,
            kind = %movement.kind,
            quantity = movement.quantity,
            sector = %movement.sector,
            "movement recorded"
        );
        Ok(movement)
    }

    /// Moves `quantity` base units of `product` between two sectors as an
    /// exit/entry pair sharing one timestamp.
    pub fn transfer(
        ledger: &mut Ledger,
        product: &str,
        quantity: f64,
        from: Sector,
        to: Sector,
        clock: &dyn Clock,
    ) -> Result<(), ValidationError> {
        if from == to {
            return Err(ValidationError::SameSectorTransfer);
        }
        validate_quantity(quantity)?;
        let recorded_at = truncate_to_minute(clock.now());
        ledger.append(Movement {
            recorded_at,
            product: product.to_string(),
            kind: OperationKind::Exit,
            quantity,
            sector: from,
        });
        ledger.append(Movement {
            recorded_at,
            product: product.to_string(),
            kind: OperationKind::Entry,
            quantity,
            sector: to,
        });
        tracing::debug!(product, quantity, from = %from, to = %to, "transfer recorded");
        Ok(())
    }
}

fn validate_quantity(quantity: f64) -> Result<(), ValidationError> {
    // NaN fails the comparison and is rejected with the rest.
    if quantity > 0.0 && quantity.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::NonPositiveQuantity(quantity))
    }
}

fn truncate_to_minute(now: DateTime<Utc>) -> NaiveDateTime {
    let naive = now.naive_utc();
    naive
        .with_second(0)
        .and_then(|stamp| stamp.with_nanosecond(0))
        .unwrap_or(naive)
}
