//! Purchase orders: a commitment to buy, consumed later by goods receipts.
//!
//! A purchase order never touches stock or balances itself; receiving happens
//! through a GRN, which advances the order's status.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use anvil_core::{
    DocumentNumber, DocumentTotals, DomainError, DomainResult, LineAmounts, ProductId,
    PurchaseOrderId, SupplierId, UserId, WarehouseId,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PurchaseOrderStatus {
    Draft,
    Pending,
    Approved,
    PartiallyReceived,
    Received,
    Cancelled,
}

/// One ordered line with its derived amounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseOrderItem {
    pub product_id: ProductId,
    pub quantity: i64,
    pub unit_price: Decimal,
    pub discount_pct: Decimal,
    pub tax_pct: Decimal,
    pub amounts: LineAmounts,
}

/// Raw line input as supplied by the caller.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderLineInput {
    pub product_id: ProductId,
    pub quantity: i64,
    pub unit_price: Decimal,
    #[serde(default)]
    pub discount_pct: Decimal,
    #[serde(default)]
    pub tax_pct: Decimal,
}

impl PurchaseOrderItem {
    pub fn from_input(input: OrderLineInput) -> DomainResult<Self> {
        let amounts = LineAmounts::compute(
            input.quantity,
            input.unit_price,
            input.discount_pct,
            input.tax_pct,
        )?;
        Ok(Self {
            product_id: input.product_id,
            quantity: input.quantity,
            unit_price: input.unit_price,
            discount_pct: input.discount_pct,
            tax_pct: input.tax_pct,
            amounts,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewPurchaseOrder {
    pub number: String,
    pub supplier_id: SupplierId,
    #[serde(default)]
    pub warehouse_id: Option<WarehouseId>,
    pub order_date: NaiveDate,
    #[serde(default)]
    pub expected_delivery_date: Option<NaiveDate>,
    pub items: Vec<OrderLineInput>,
    #[serde(default)]
    pub discount_pct: Decimal,
    #[serde(default)]
    pub freight_charges: Decimal,
    #[serde(default)]
    pub other_charges: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseOrder {
    pub id: PurchaseOrderId,
    pub number: DocumentNumber,
    pub supplier_id: SupplierId,
    pub warehouse_id: Option<WarehouseId>,
    pub status: PurchaseOrderStatus,
    pub order_date: NaiveDate,
    pub expected_delivery_date: Option<NaiveDate>,
    pub items: Vec<PurchaseOrderItem>,
    pub totals: DocumentTotals,
    pub created_by: UserId,
    pub created_at: DateTime<Utc>,
}

impl PurchaseOrder {
    pub fn create(
        input: NewPurchaseOrder,
        created_by: UserId,
        now: DateTime<Utc>,
    ) -> DomainResult<Self> {
        let number = DocumentNumber::new(&input.number)?;
        let items = input
            .items
            .into_iter()
            .map(PurchaseOrderItem::from_input)
            .collect::<DomainResult<Vec<_>>>()?;
        let amounts: Vec<LineAmounts> = items.iter().map(|i| i.amounts).collect();
        let totals = DocumentTotals::compute(
            &amounts,
            input.discount_pct,
            input.freight_charges,
            input.other_charges,
        )?;
        Ok(Self {
            id: PurchaseOrderId::new(),
            number,
            supplier_id: input.supplier_id,
            warehouse_id: input.warehouse_id,
            status: PurchaseOrderStatus::Draft,
            order_date: input.order_date,
            expected_delivery_date: input.expected_delivery_date,
            items,
            totals,
            created_by,
            created_at: now,
        })
    }

    /// Draft → Pending.
    pub fn submit(&mut self) -> DomainResult<()> {
        match self.status {
            PurchaseOrderStatus::Draft => {
                self.status = PurchaseOrderStatus::Pending;
                Ok(())
            }
            other => Err(DomainError::invalid_transition(format!(
                "purchase order {} cannot be submitted from {other:?}",
                self.number
            ))),
        }
    }

    /// Pending → Approved.
    pub fn approve(&mut self) -> DomainResult<()> {
        match self.status {
            PurchaseOrderStatus::Pending => {
                self.status = PurchaseOrderStatus::Approved;
                Ok(())
            }
            other => Err(DomainError::invalid_transition(format!(
                "purchase order {} cannot be approved from {other:?}",
                self.number
            ))),
        }
    }

    /// Any pre-Received state → Cancelled.
    pub fn cancel(&mut self) -> DomainResult<()> {
        match self.status {
            PurchaseOrderStatus::Draft
            | PurchaseOrderStatus::Pending
            | PurchaseOrderStatus::Approved
            | PurchaseOrderStatus::PartiallyReceived => {
                self.status = PurchaseOrderStatus::Cancelled;
                Ok(())
            }
            other => Err(DomainError::invalid_transition(format!(
                "purchase order {} cannot be cancelled from {other:?}",
                self.number
            ))),
        }
    }

    /// Can a GRN be booked against this order right now?
    pub fn can_receive(&self) -> bool {
        matches!(
            self.status,
            PurchaseOrderStatus::Approved | PurchaseOrderStatus::PartiallyReceived
        )
    }

    /// Advance the status after a goods receipt. `fully_received` reflects
    /// whether cumulative receipts now cover every ordered line.
    pub fn record_receipt(&mut self, fully_received: bool) -> DomainResult<()> {
        if !self.can_receive() {
            return Err(DomainError::invalid_transition(format!(
                "purchase order {} cannot accept receipts from {:?}",
                self.number, self.status
            )));
        }
        self.status = if fully_received {
            PurchaseOrderStatus::Received
        } else {
            PurchaseOrderStatus::PartiallyReceived
        };
        Ok(())
    }

    /// Total ordered quantity of a product across all lines.
    pub fn ordered_quantity(&self, product_id: ProductId) -> i64 {
        self.items
            .iter()
            .filter(|i| i.product_id == product_id)
            .map(|i| i.quantity)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn order() -> PurchaseOrder {
        PurchaseOrder::create(
            NewPurchaseOrder {
                number: "po-2024-001".to_string(),
                supplier_id: SupplierId::new(),
                warehouse_id: None,
                order_date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
                expected_delivery_date: None,
                items: vec![OrderLineInput {
                    product_id: ProductId::new(),
                    quantity: 100,
                    unit_price: dec!(12.50),
                    discount_pct: dec!(0),
                    tax_pct: dec!(18),
                }],
                discount_pct: dec!(0),
                freight_charges: dec!(0),
                other_charges: dec!(0),
            },
            UserId::new(),
            Utc::now(),
        )
        .unwrap()
    }

    #[test]
    fn happy_path_reaches_received() {
        let mut po = order();
        assert_eq!(po.status, PurchaseOrderStatus::Draft);
        po.submit().unwrap();
        po.approve().unwrap();
        po.record_receipt(false).unwrap();
        assert_eq!(po.status, PurchaseOrderStatus::PartiallyReceived);
        po.record_receipt(true).unwrap();
        assert_eq!(po.status, PurchaseOrderStatus::Received);
    }

    #[test]
    fn totals_are_computed_on_create() {
        let po = order();
        assert_eq!(po.totals.subtotal, dec!(1250.00));
        assert_eq!(po.totals.total_tax, dec!(225.00));
        assert_eq!(po.totals.total, dec!(1475.00));
    }

    #[test]
    fn approve_requires_pending() {
        let mut po = order();
        let err = po.approve().unwrap_err();
        assert!(matches!(err, DomainError::InvalidTransition(_)));
    }

    #[test]
    fn received_order_cannot_be_cancelled() {
        let mut po = order();
        po.submit().unwrap();
        po.approve().unwrap();
        po.record_receipt(true).unwrap();
        assert!(po.cancel().is_err());
    }

    #[test]
    fn partially_received_order_can_be_cancelled() {
        let mut po = order();
        po.submit().unwrap();
        po.approve().unwrap();
        po.record_receipt(false).unwrap();
        po.cancel().unwrap();
        assert_eq!(po.status, PurchaseOrderStatus::Cancelled);
    }

    #[test]
    fn receipts_require_approval_first() {
        let mut po = order();
        po.submit().unwrap();
        assert!(!po.can_receive());
        assert!(po.record_receipt(true).is_err());
        assert_eq!(po.status, PurchaseOrderStatus::Pending);
    }
}
