use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::domain::common::Displayable;
use crate::errors::BudgetError;

/// One of the three fixed spending categories.
///
/// The persisted label of each variant is its name verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Bucket {
    /// Needs: rent, groceries, utilities, transport.
    Essential,
    /// Wants: subscriptions, lifestyle.
    Discretionary,
    /// Savings and temporary line items.
    Temporary,
}

impl Bucket {
    /// Fixed reporting order.
    pub const ALL: [Bucket; 3] = [Bucket::Essential, Bucket::Discretionary, Bucket::Temporary];

    pub fn label(self) -> &'static str {
        match self {
            Bucket::Essential => "Essential",
            Bucket::Discretionary => "Discretionary",
            Bucket::Temporary => "Temporary",
        }
    }

    pub fn alias(self) -> &'static str {
        match self {
            Bucket::Essential => "Needs",
            Bucket::Discretionary => "Wants",
            Bucket::Temporary => "Savings",
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Bucket::Essential => 0,
            Bucket::Discretionary => 1,
            Bucket::Temporary => 2,
        }
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Displayable for Bucket {
    fn display_label(&self) -> String {
        format!("{} ({})", self.label(), self.alias())
    }
}

impl FromStr for Bucket {
    type Err = BudgetError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "essential" | "needs" | "need" => Ok(Bucket::Essential),
            "discretionary" | "wants" | "want" => Ok(Bucket::Discretionary),
            "temporary" | "temp" | "savings" | "saving" => Ok(Bucket::Temporary),
            other => Err(BudgetError::validation(format!(
                "unknown bucket `{}` (expected essential, discretionary or temporary)",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_labels_and_aliases() {
        assert_eq!("Essential".parse::<Bucket>().unwrap(), Bucket::Essential);
        assert_eq!("wants".parse::<Bucket>().unwrap(), Bucket::Discretionary);
        assert_eq!(" SAVINGS ".parse::<Bucket>().unwrap(), Bucket::Temporary);
        assert!("rent".parse::<Bucket>().unwrap_err().is_validation());
    }

    #[test]
    fn serializes_as_verbatim_label() {
        let json = serde_json::to_string(&Bucket::Discretionary).unwrap();
        assert_eq!(json, "\"Discretionary\"");
    }
}
