use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use anvil_core::{DomainError, DomainResult, ProductId};

/// Stock-keeping unit code. Trimmed and uppercased; unique per catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Sku(String);

impl Sku {
    pub fn new(raw: impl AsRef<str>) -> DomainResult<Self> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(DomainError::validation("sku cannot be empty"));
        }
        if trimmed.len() > 50 {
            return Err(DomainError::validation("sku exceeds 50 characters"));
        }
        Ok(Self(trimmed.to_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for Sku {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A catalog product with its on-hand stock level.
///
/// `stock` is deliberately private: the only way to change it is
/// [`Product::apply_stock_delta`], which refuses to go below zero. Callers
/// are expected to write an inventory log row alongside every delta.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub sku: Sku,
    pub name: String,
    stock: i64,
    pub price: Decimal,
    pub cost_price: Decimal,
    pub low_stock_threshold: i64,
    pub unit: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Input for registering a product.
#[derive(Debug, Clone, Deserialize)]
pub struct NewProduct {
    pub sku: String,
    pub name: String,
    #[serde(default)]
    pub opening_stock: i64,
    pub price: Decimal,
    pub cost_price: Decimal,
    #[serde(default)]
    pub low_stock_threshold: i64,
    #[serde(default = "default_unit")]
    pub unit: String,
}

fn default_unit() -> String {
    "pcs".to_string()
}

impl Product {
    pub fn register(input: NewProduct, now: DateTime<Utc>) -> DomainResult<Self> {
        let sku = Sku::new(&input.sku)?;
        let name = input.name.trim().to_string();
        if name.is_empty() {
            return Err(DomainError::validation("product name cannot be empty"));
        }
        if input.opening_stock < 0 {
            return Err(DomainError::validation("opening stock cannot be negative"));
        }
        if input.price < Decimal::ZERO || input.cost_price < Decimal::ZERO {
            return Err(DomainError::validation("prices cannot be negative"));
        }
        if input.low_stock_threshold < 0 {
            return Err(DomainError::validation("low stock threshold cannot be negative"));
        }
        Ok(Self {
            id: ProductId::new(),
            sku,
            name,
            stock: input.opening_stock,
            price: input.price,
            cost_price: input.cost_price,
            low_stock_threshold: input.low_stock_threshold,
            unit: input.unit,
            is_active: true,
            created_at: now,
        })
    }

    pub fn stock(&self) -> i64 {
        self.stock
    }

    /// Apply a signed stock delta, returning the new level.
    ///
    /// Fails with `InsufficientStock` if the result would be negative; the
    /// stock level is untouched on error.
    pub fn apply_stock_delta(&mut self, delta: i64) -> DomainResult<i64> {
        let new_stock = self.stock.checked_add(delta).ok_or_else(|| {
            DomainError::validation(format!("stock delta {delta} overflows for {}", self.sku))
        })?;
        if new_stock < 0 {
            return Err(DomainError::insufficient_stock(
                self.sku.as_str(),
                -delta,
                self.stock,
            ));
        }
        self.stock = new_stock;
        Ok(new_stock)
    }

    pub fn is_low_stock(&self) -> bool {
        self.stock <= self.low_stock_threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn product() -> Product {
        Product::register(
            NewProduct {
                sku: "bolt-m8".to_string(),
                name: "Hex bolt M8".to_string(),
                opening_stock: 10,
                price: dec!(4.50),
                cost_price: dec!(3.00),
                low_stock_threshold: 5,
                unit: "pcs".to_string(),
            },
            Utc::now(),
        )
        .unwrap()
    }

    #[test]
    fn registration_normalizes_sku() {
        let p = product();
        assert_eq!(p.sku.as_str(), "BOLT-M8");
        assert_eq!(p.stock(), 10);
        assert!(p.is_active);
    }

    #[test]
    fn delta_moves_stock_both_ways() {
        let mut p = product();
        assert_eq!(p.apply_stock_delta(5).unwrap(), 15);
        assert_eq!(p.apply_stock_delta(-15).unwrap(), 0);
    }

    #[test]
    fn delta_below_zero_is_rejected_and_leaves_stock_alone() {
        let mut p = product();
        let err = p.apply_stock_delta(-11).unwrap_err();
        assert!(matches!(
            err,
            DomainError::InsufficientStock { required: 11, available: 10, .. }
        ));
        assert_eq!(p.stock(), 10);
    }

    #[test]
    fn low_stock_tracks_threshold() {
        let mut p = product();
        assert!(!p.is_low_stock());
        p.apply_stock_delta(-5).unwrap();
        assert!(p.is_low_stock());
    }

    #[test]
    fn registration_rejects_bad_input() {
        let mut bad = NewProduct {
            sku: "  ".to_string(),
            name: "x".to_string(),
            opening_stock: 0,
            price: dec!(1),
            cost_price: dec!(1),
            low_stock_threshold: 0,
            unit: "pcs".to_string(),
        };
        assert!(Product::register(bad.clone(), Utc::now()).is_err());
        bad.sku = "OK".to_string();
        bad.opening_stock = -1;
        assert!(Product::register(bad, Utc::now()).is_err());
    }
}
