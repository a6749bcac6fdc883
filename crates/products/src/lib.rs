//! Products domain module.
//!
//! This crate contains the product entity and its mapping rules, implemented
//! purely as deterministic domain logic (no IO, no storage).

pub mod price;
pub mod product;

pub use price::{PriceQuery, parse_price};
pub use product::{Category, Product};
