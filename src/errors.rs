use std::result::Result as StdResult;

use thiserror::Error;

/// Unified error type for the domain, ledger and storage layers.
#[derive(Debug, Error)]
pub enum BudgetError {
    /// Rejected user input. Never stored.
    #[error("Invalid input: {0}")]
    Validation(String),
    /// Backing store read/write failure. The in-flight mutation was not applied.
    #[error("Persistence error: {0}")]
    Storage(String),
    /// A multi-file update failed and so did undoing its first half. The
    /// in-memory state is unchanged but the files may disagree with it.
    #[error("Storage left inconsistent: {0}")]
    Inconsistent(String),
    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = StdResult<T, BudgetError>;

impl BudgetError {
    pub fn validation(message: impl Into<String>) -> Self {
        BudgetError::Validation(message.into())
    }

    pub fn storage(message: impl Into<String>) -> Self {
        BudgetError::Storage(message.into())
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, BudgetError::Validation(_))
    }
}

impl From<std::io::Error> for BudgetError {
    fn from(err: std::io::Error) -> Self {
        BudgetError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for BudgetError {
    fn from(err: serde_json::Error) -> Self {
        BudgetError::Storage(err.to_string())
    }
}
