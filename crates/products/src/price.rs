//! Exact price handling.
//!
//! Prices are always `rust_decimal::Decimal`. Text input is accepted at the
//! edges (lookups, deserialization) and converted here.

use core::str::FromStr;

use rust_decimal::Decimal;

use catalog_core::{DataValidationError, ValidationResult};

/// Parse a price from text.
///
/// Surrounding whitespace and `"`/`'` characters are stripped first, so
/// `"\"304.90 \""` parses as `304.90`. Scientific notation is accepted.
pub fn parse_price(raw: &str) -> ValidationResult<Decimal> {
    let trimmed = raw.trim_matches(|c: char| c.is_whitespace() || c == '"' || c == '\'');
    if trimmed.is_empty() {
        return Err(DataValidationError::invalid_price(raw));
    }

    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|_| DataValidationError::invalid_price(raw))
}

/// Price argument of a price lookup: either an exact decimal or its text form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PriceQuery {
    Exact(Decimal),
    Text(String),
}

impl PriceQuery {
    /// Resolve the query into the decimal to compare against.
    pub fn resolve(&self) -> ValidationResult<Decimal> {
        match self {
            PriceQuery::Exact(price) => Ok(*price),
            PriceQuery::Text(raw) => parse_price(raw),
        }
    }
}

impl From<Decimal> for PriceQuery {
    fn from(value: Decimal) -> Self {
        PriceQuery::Exact(value)
    }
}

impl From<&str> for PriceQuery {
    fn from(value: &str) -> Self {
        PriceQuery::Text(value.to_string())
    }
}

impl From<String> for PriceQuery {
    fn from(value: String) -> Self {
        PriceQuery::Text(value)
    }
}
