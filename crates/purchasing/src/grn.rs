//! Goods received notes: the record of goods physically arriving.
//!
//! A GRN is booked in one shot and completed immediately; the stock increase
//! happens in the same unit of work that persists it. Cancelling a GRN must
//! reverse that stock, which the calling service owns.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use anvil_core::{
    DocumentNumber, DomainError, DomainResult, GrnId, ProductId, PurchaseOrderId, SupplierId,
    UserId,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrnStatus {
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrnItem {
    pub product_id: ProductId,
    /// Quantity on the linked purchase order line, zero for unlinked receipts.
    pub ordered_quantity: i64,
    pub received_quantity: i64,
    pub unit_price: Decimal,
    pub batch_number: Option<String>,
    pub expiry_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GrnLineInput {
    pub product_id: ProductId,
    #[serde(default)]
    pub ordered_quantity: i64,
    pub received_quantity: i64,
    pub unit_price: Decimal,
    #[serde(default)]
    pub batch_number: Option<String>,
    #[serde(default)]
    pub expiry_date: Option<NaiveDate>,
}

impl GrnItem {
    pub fn from_input(input: GrnLineInput) -> DomainResult<Self> {
        if input.received_quantity <= 0 {
            return Err(DomainError::validation(format!(
                "received quantity must be positive, got {}",
                input.received_quantity
            )));
        }
        if input.ordered_quantity < 0 {
            return Err(DomainError::validation("ordered quantity cannot be negative"));
        }
        if input.unit_price < Decimal::ZERO {
            return Err(DomainError::validation("unit price cannot be negative"));
        }
        Ok(Self {
            product_id: input.product_id,
            ordered_quantity: input.ordered_quantity,
            received_quantity: input.received_quantity,
            unit_price: input.unit_price,
            batch_number: input.batch_number,
            expiry_date: input.expiry_date,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewGrn {
    pub number: String,
    #[serde(default)]
    pub po_id: Option<PurchaseOrderId>,
    pub supplier_id: SupplierId,
    pub received_date: NaiveDate,
    #[serde(default)]
    pub supplier_invoice_number: Option<String>,
    #[serde(default)]
    pub vehicle_number: Option<String>,
    pub items: Vec<GrnLineInput>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoodsReceivedNote {
    pub id: GrnId,
    pub number: DocumentNumber,
    pub po_id: Option<PurchaseOrderId>,
    pub supplier_id: SupplierId,
    pub status: GrnStatus,
    pub received_date: NaiveDate,
    pub supplier_invoice_number: Option<String>,
    pub vehicle_number: Option<String>,
    pub received_by: UserId,
    pub items: Vec<GrnItem>,
    pub created_at: DateTime<Utc>,
}

impl GoodsReceivedNote {
    /// Book a receipt. Completed immediately; there is no draft stage.
    pub fn create(input: NewGrn, received_by: UserId, now: DateTime<Utc>) -> DomainResult<Self> {
        let number = DocumentNumber::new(&input.number)?;
        if input.items.is_empty() {
            return Err(DomainError::validation("GRN must have at least one line item"));
        }
        let items = input
            .items
            .into_iter()
            .map(GrnItem::from_input)
            .collect::<DomainResult<Vec<_>>>()?;
        Ok(Self {
            id: GrnId::new(),
            number,
            po_id: input.po_id,
            supplier_id: input.supplier_id,
            status: GrnStatus::Completed,
            received_date: input.received_date,
            supplier_invoice_number: input.supplier_invoice_number,
            vehicle_number: input.vehicle_number,
            received_by,
            items,
            created_at: now,
        })
    }

    /// Completed → Cancelled. The caller reverses the stock in the same
    /// transaction.
    pub fn cancel(&mut self) -> DomainResult<()> {
        match self.status {
            GrnStatus::Completed => {
                self.status = GrnStatus::Cancelled;
                Ok(())
            }
            GrnStatus::Cancelled => Err(DomainError::invalid_transition(format!(
                "GRN {} is already cancelled",
                self.number
            ))),
        }
    }

    /// Total received quantity of a product across all lines.
    pub fn received_quantity(&self, product_id: ProductId) -> i64 {
        self.items
            .iter()
            .filter(|i| i.product_id == product_id)
            .map(|i| i.received_quantity)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn grn() -> GoodsReceivedNote {
        GoodsReceivedNote::create(
            NewGrn {
                number: "grn-001".to_string(),
                po_id: None,
                supplier_id: SupplierId::new(),
                received_date: NaiveDate::from_ymd_opt(2024, 6, 5).unwrap(),
                supplier_invoice_number: Some("SI-9912".to_string()),
                vehicle_number: None,
                items: vec![GrnLineInput {
                    product_id: ProductId::new(),
                    ordered_quantity: 0,
                    received_quantity: 20,
                    unit_price: dec!(12.50),
                    batch_number: None,
                    expiry_date: None,
                }],
            },
            UserId::new(),
            Utc::now(),
        )
        .unwrap()
    }

    #[test]
    fn created_grn_is_completed() {
        let grn = grn();
        assert_eq!(grn.status, GrnStatus::Completed);
        assert_eq!(grn.number.as_str(), "GRN-001");
    }

    #[test]
    fn cancel_is_single_shot() {
        let mut grn = grn();
        grn.cancel().unwrap();
        assert_eq!(grn.status, GrnStatus::Cancelled);
        assert!(grn.cancel().is_err());
    }

    #[test]
    fn rejects_non_positive_receipts_and_empty_notes() {
        let err = GrnItem::from_input(GrnLineInput {
            product_id: ProductId::new(),
            ordered_quantity: 0,
            received_quantity: 0,
            unit_price: dec!(1),
            batch_number: None,
            expiry_date: None,
        })
        .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        let empty = GoodsReceivedNote::create(
            NewGrn {
                number: "grn-002".to_string(),
                po_id: None,
                supplier_id: SupplierId::new(),
                received_date: NaiveDate::from_ymd_opt(2024, 6, 5).unwrap(),
                supplier_invoice_number: None,
                vehicle_number: None,
                items: vec![],
            },
            UserId::new(),
            Utc::now(),
        );
        assert!(empty.is_err());
    }
}
