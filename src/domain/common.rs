use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use uuid::Uuid;

use crate::errors::{BudgetError, Result};

/// Largest amount, balance or target the domain accepts. Keeps every sum and
/// ratio the summary computes far inside `Decimal` range.
pub const MAX_AMOUNT: Decimal = dec!(1000000000000);

/// Identifies entities that expose a stable unique identifier.
pub trait Identifiable {
    fn id(&self) -> Uuid;
}

/// Supplies a presentation-ready label for UI or logs.
pub trait Displayable {
    fn display_label(&self) -> String;
}

pub(crate) fn ensure_within_limit(field: &str, value: Decimal) -> Result<()> {
    if value > MAX_AMOUNT {
        return Err(BudgetError::validation(format!(
            "{} cannot exceed {} (got {})",
            field, MAX_AMOUNT, value
        )));
    }
    Ok(())
}

// Re-export common dependencies so consumers can rely on this module as a façade.
pub use chrono;
pub use rust_decimal;
pub use uuid;
