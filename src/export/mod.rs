//! Export adapters turning a period's headline figures into a document.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::currency::{format_currency, DEFAULT_SYMBOL};
use crate::errors::{BudgetError, Result};

/// The only fields an exporter receives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementFields {
    pub total_pool: Decimal,
    pub total_spent: Decimal,
    pub leftover: Decimal,
    pub generated_at: DateTime<Utc>,
}

/// Produces a byte stream in some document format.
pub trait ReportExporter {
    fn export(&self, fields: &StatementFields) -> Result<Vec<u8>>;

    /// Suggested file extension, without the dot.
    fn extension(&self) -> &'static str;
}

/// Plain-text audit statement.
#[derive(Debug, Clone)]
pub struct TextStatement {
    currency_symbol: String,
}

impl TextStatement {
    pub fn new(currency_symbol: impl Into<String>) -> Self {
        Self {
            currency_symbol: currency_symbol.into(),
        }
    }
}

impl Default for TextStatement {
    fn default() -> Self {
        Self::new(DEFAULT_SYMBOL)
    }
}

impl ReportExporter for TextStatement {
    fn export(&self, fields: &StatementFields) -> Result<Vec<u8>> {
        let symbol = self.currency_symbol.as_str();
        let lines = [
            "FINANCIAL AUDIT STATEMENT".to_string(),
            format!("Generated: {}", fields.generated_at.format("%Y-%m-%d")),
            String::new(),
            format!("Total Income/Carry: {}", format_currency(fields.total_pool, symbol)),
            format!("Total Expenses: {}", format_currency(fields.total_spent, symbol)),
            format!("Net Balance: {}", format_currency(fields.leftover, symbol)),
        ];
        let mut out = lines.join("\n");
        out.push('\n');
        Ok(out.into_bytes())
    }

    fn extension(&self) -> &'static str {
        "txt"
    }
}

/// Machine-readable statement.
#[derive(Debug, Clone, Default)]
pub struct JsonStatement;

impl ReportExporter for JsonStatement {
    fn export(&self, fields: &StatementFields) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec_pretty(fields)?)
    }

    fn extension(&self) -> &'static str {
        "json"
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Text,
    Json,
}

impl ExportFormat {
    pub fn exporter(self, currency_symbol: &str) -> Box<dyn ReportExporter> {
        match self {
            ExportFormat::Text => Box::new(TextStatement::new(currency_symbol)),
            ExportFormat::Json => Box::new(JsonStatement),
        }
    }
}

impl FromStr for ExportFormat {
    type Err = BudgetError;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "text" | "txt" => Ok(ExportFormat::Text),
            "json" => Ok(ExportFormat::Json),
            other => Err(BudgetError::validation(format!(
                "unknown export format `{}` (expected text or json)",
                other
            ))),
        }
    }
}
