//! The append-only inventory audit trail.
//!
//! Every stock mutation writes exactly one row here, carrying the before and
//! after levels so the trail can be replayed and reconciled against current
//! stock.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use anvil_core::{
    DocumentNumber, DomainError, DomainResult, InventoryLogId, ProductId, StockTxnId, UserId,
};
use anvil_parties::PartyKind;

/// Direction of a stock movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Goods coming in (receipts, returns from customers, reversals).
    Inward,
    /// Goods going out (deliveries, reversals of receipts).
    Outward,
    /// Manual correction; quantity may move either way via its sign.
    Manual,
}

/// What kind of document drove a stock movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockSource {
    GoodsReceipt,
    GoodsReceiptReversal,
    SalesOrder,
    SalesOrderCancellation,
    SalesInvoice,
    SalesInvoiceVoid,
    BulkEntry,
    ManualAdjustment,
}

/// Shared metadata for all log rows written by one logical transaction.
///
/// A multi-line GRN or bulk entry groups its rows under one `txn_id` so the
/// trail shows which rows moved together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockContext {
    pub txn_id: StockTxnId,
    pub source: StockSource,
    pub document_number: Option<DocumentNumber>,
    pub party_kind: Option<PartyKind>,
    /// Counterparty name captured at write time; party records may change
    /// later, the trail must not.
    pub counterparty: Option<String>,
    pub reason: Option<String>,
}

impl StockContext {
    pub fn new(source: StockSource) -> Self {
        Self {
            txn_id: StockTxnId::new(),
            source,
            document_number: None,
            party_kind: None,
            counterparty: None,
            reason: None,
        }
    }

    pub fn with_document(mut self, number: DocumentNumber) -> Self {
        self.document_number = Some(number);
        self
    }

    pub fn with_counterparty(mut self, kind: PartyKind, name: impl Into<String>) -> Self {
        self.party_kind = Some(kind);
        self.counterparty = Some(name.into());
        self
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }
}

/// One row of the inventory trail. Never updated, never deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryLog {
    pub id: InventoryLogId,
    pub product_id: ProductId,
    pub transaction_type: TransactionType,
    /// Movement magnitude; always positive. Direction comes from
    /// `transaction_type` plus the stock levels.
    pub quantity: i64,
    pub previous_stock: i64,
    pub new_stock: i64,
    pub unit_price: Option<Decimal>,
    pub context: StockContext,
    pub notes: Option<String>,
    pub performed_by: UserId,
    pub created_at: DateTime<Utc>,
}

impl InventoryLog {
    /// Record a movement. `previous_stock + signed delta` must equal
    /// `new_stock`; the quantity stored is the magnitude.
    pub fn record(
        product_id: ProductId,
        transaction_type: TransactionType,
        previous_stock: i64,
        new_stock: i64,
        unit_price: Option<Decimal>,
        context: StockContext,
        notes: Option<String>,
        performed_by: UserId,
        now: DateTime<Utc>,
    ) -> DomainResult<Self> {
        let delta = new_stock - previous_stock;
        if delta == 0 {
            return Err(DomainError::validation("stock movement cannot be zero"));
        }
        if new_stock < 0 {
            return Err(DomainError::validation("log row would record negative stock"));
        }
        match transaction_type {
            TransactionType::Inward if delta < 0 => {
                return Err(DomainError::validation("inward movement must increase stock"));
            }
            TransactionType::Outward if delta > 0 => {
                return Err(DomainError::validation("outward movement must decrease stock"));
            }
            _ => {}
        }
        Ok(Self {
            id: InventoryLogId::new(),
            product_id,
            transaction_type,
            quantity: delta.abs(),
            previous_stock,
            new_stock,
            unit_price,
            context,
            notes,
            performed_by,
            created_at: now,
        })
    }

    /// Signed stock change this row represents.
    pub fn delta(&self) -> i64 {
        self.new_stock - self.previous_stock
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> StockContext {
        StockContext::new(StockSource::ManualAdjustment)
    }

    #[test]
    fn inward_row_carries_positive_delta() {
        let row = InventoryLog::record(
            ProductId::new(),
            TransactionType::Inward,
            10,
            25,
            None,
            ctx(),
            None,
            UserId::new(),
            Utc::now(),
        )
        .unwrap();
        assert_eq!(row.quantity, 15);
        assert_eq!(row.delta(), 15);
    }

    #[test]
    fn outward_row_carries_negative_delta() {
        let row = InventoryLog::record(
            ProductId::new(),
            TransactionType::Outward,
            25,
            10,
            None,
            ctx(),
            None,
            UserId::new(),
            Utc::now(),
        )
        .unwrap();
        assert_eq!(row.quantity, 15);
        assert_eq!(row.delta(), -15);
    }

    #[test]
    fn direction_mismatches_are_rejected() {
        let inward_that_decreases = InventoryLog::record(
            ProductId::new(),
            TransactionType::Inward,
            10,
            5,
            None,
            ctx(),
            None,
            UserId::new(),
            Utc::now(),
        );
        assert!(inward_that_decreases.is_err());

        let zero_movement = InventoryLog::record(
            ProductId::new(),
            TransactionType::Manual,
            10,
            10,
            None,
            ctx(),
            None,
            UserId::new(),
            Utc::now(),
        );
        assert!(zero_movement.is_err());
    }

    #[test]
    fn manual_rows_move_either_way() {
        let down = InventoryLog::record(
            ProductId::new(),
            TransactionType::Manual,
            10,
            7,
            None,
            ctx().with_reason("damaged in storage"),
            None,
            UserId::new(),
            Utc::now(),
        )
        .unwrap();
        assert_eq!(down.delta(), -3);
    }
}
