//! Strongly-typed identifiers used across the domain.

use serde::Serialize;

/// Identifier of a stored product.
///
/// Assigned by the storage layer (a serial primary key), never by callers.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ProductId(i32);

impl ProductId {
    pub fn new(raw: i32) -> Self {
        Self(raw)
    }

    pub fn get(&self) -> i32 {
        self.0
    }
}

impl core::fmt::Display for ProductId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl From<i32> for ProductId {
    fn from(value: i32) -> Self {
        Self(value)
    }
}

impl From<ProductId> for i32 {
    fn from(value: ProductId) -> Self {
        value.0
    }
}
