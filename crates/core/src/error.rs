//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type ValidationResult<T> = Result<T, DataValidationError>;

/// The single validation error kind.
///
/// Covers malformed input on deserialization and precondition failures on
/// persistence operations. Storage failures are not represented here.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DataValidationError {
    /// A required attribute was absent from the input mapping.
    #[error("Invalid product: missing {0}")]
    MissingAttribute(String),

    /// `available` held something other than a JSON boolean.
    #[error("Invalid type for boolean [available]: {0}")]
    InvalidBoolean(String),

    /// A text field held a non-string value.
    #[error("Invalid type for {field}: {found}")]
    InvalidType { field: String, found: String },

    /// The category name is not a member of the enumeration.
    #[error("Invalid attribute: {0}")]
    InvalidCategory(String),

    /// The price could not be parsed as an exact decimal.
    #[error("Invalid price: {0}")]
    InvalidPrice(String),

    #[error("Invalid product: name cannot be empty")]
    EmptyName,

    /// A text field is longer than its column allows.
    #[error("Invalid product: {field} exceeds {max} characters")]
    TooLong { field: String, max: usize },

    /// The price does not fit the stored precision (two decimal places,
    /// magnitude below 10^8).
    #[error("Invalid price: {0} is outside NUMERIC(10,2)")]
    PriceOutOfRange(String),

    /// The input was not a mapping at all.
    #[error("Invalid product: body of request contained bad or no data")]
    BadData,

    /// `update()` was called on an entity without an identifier.
    #[error("update called with empty ID field")]
    MissingId,
}

impl DataValidationError {
    pub fn missing(attribute: impl Into<String>) -> Self {
        Self::MissingAttribute(attribute.into())
    }

    pub fn invalid_type(field: impl Into<String>, found: impl Into<String>) -> Self {
        Self::InvalidType {
            field: field.into(),
            found: found.into(),
        }
    }

    pub fn invalid_price(value: impl Into<String>) -> Self {
        Self::InvalidPrice(value.into())
    }

    pub fn too_long(field: impl Into<String>, max: usize) -> Self {
        Self::TooLong {
            field: field.into(),
            max,
        }
    }
}
