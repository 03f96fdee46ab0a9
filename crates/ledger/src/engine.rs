//! The stock and balance adjustment engines.
//!
//! These are the only code paths allowed to move `Product` stock and party
//! balances. Both run against the staged state inside a store transaction;
//! they never commit anything themselves.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use anvil_core::{CustomerId, DomainResult, ProductId, SupplierId, UserId};
use anvil_inventory::{InventoryLog, StockContext, TransactionType};

use crate::state::LedgerState;

/// Applies one signed stock delta and appends exactly one log row.
pub struct StockAdjustmentEngine;

impl StockAdjustmentEngine {
    /// Adjust a product's stock by `delta`, returning the new level.
    ///
    /// Fails with `InsufficientStock` when the result would be negative and
    /// with `NotFound` for an unknown product; in both cases nothing is
    /// staged. One successful call writes exactly one inventory log row.
    #[allow(clippy::too_many_arguments)]
    pub fn adjust(
        state: &mut LedgerState,
        product_id: ProductId,
        delta: i64,
        transaction_type: TransactionType,
        unit_price: Option<Decimal>,
        context: StockContext,
        notes: Option<String>,
        performed_by: UserId,
        now: DateTime<Utc>,
    ) -> DomainResult<i64> {
        let product = state.product_mut(product_id)?;
        let previous_stock = product.stock();
        let new_stock = product.apply_stock_delta(delta)?;
        let row = InventoryLog::record(
            product_id,
            transaction_type,
            previous_stock,
            new_stock,
            unit_price,
            context,
            notes,
            performed_by,
            now,
        )?;
        state.append_log(row);
        Ok(new_stock)
    }
}

/// Applies signed deltas to party balances. No floor: negative balances are
/// legal and represent credit (advances, overpayments).
pub struct BalanceAdjustmentEngine;

impl BalanceAdjustmentEngine {
    pub fn adjust_supplier(
        state: &mut LedgerState,
        supplier_id: SupplierId,
        delta: Decimal,
    ) -> DomainResult<Decimal> {
        Ok(state.supplier_mut(supplier_id)?.apply_balance_delta(delta))
    }

    pub fn adjust_customer(
        state: &mut LedgerState,
        customer_id: CustomerId,
        delta: Decimal,
    ) -> DomainResult<Decimal> {
        Ok(state.customer_mut(customer_id)?.apply_balance_delta(delta))
    }
}
