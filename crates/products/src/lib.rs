//! Products domain module.
//!
//! Deterministic catalog rules only: no IO, no HTTP, no storage.

pub mod product;

pub use product::{NewProduct, Product, Sku};
