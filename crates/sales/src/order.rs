//! Sales orders with deferred stock reservation.
//!
//! Creation only validates; stock is deducted exactly once, at the
//! transition into Confirmed. Cancelling a confirmed-or-later order restores
//! it. The ledger service owns the actual stock movement; this type tracks
//! whether a reservation is outstanding.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use anvil_core::{
    CustomerId, DocumentNumber, DocumentTotals, DomainError, DomainResult, LineAmounts, ProductId,
    QuotationId, SalesOrderId, UserId,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SalesOrderStatus {
    Pending,
    Confirmed,
    PartiallyDelivered,
    Delivered,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesOrderItem {
    pub product_id: ProductId,
    pub quantity: i64,
    pub unit_price: Decimal,
    pub discount_pct: Decimal,
    pub tax_pct: Decimal,
    pub amounts: LineAmounts,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SalesLineInput {
    pub product_id: ProductId,
    pub quantity: i64,
    pub unit_price: Decimal,
    #[serde(default)]
    pub discount_pct: Decimal,
    #[serde(default)]
    pub tax_pct: Decimal,
}

impl SalesOrderItem {
    pub fn from_input(input: SalesLineInput) -> DomainResult<Self> {
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
pub struct NewSalesOrder {
    pub number: String,
    pub customer_id: CustomerId,
    #[serde(default)]
    pub quotation_id: Option<QuotationId>,
    pub order_date: NaiveDate,
    pub items: Vec<SalesLineInput>,
    #[serde(default)]
    pub discount_pct: Decimal,
    #[serde(default)]
    pub freight_charges: Decimal,
    #[serde(default)]
    pub other_charges: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesOrder {
    pub id: SalesOrderId,
    pub number: DocumentNumber,
    pub customer_id: CustomerId,
    pub quotation_id: Option<QuotationId>,
    pub status: SalesOrderStatus,
    pub order_date: NaiveDate,
    pub items: Vec<SalesOrderItem>,
    pub totals: DocumentTotals,
    pub created_by: UserId,
    pub created_at: DateTime<Utc>,
}

impl SalesOrder {
    pub fn create(
        input: NewSalesOrder,
        created_by: UserId,
        now: DateTime<Utc>,
    ) -> DomainResult<Self> {
        let number = DocumentNumber::new(&input.number)?;
        let items = input
            .items
            .into_iter()
            .map(SalesOrderItem::from_input)
            .collect::<DomainResult<Vec<_>>>()?;
        let amounts: Vec<LineAmounts> = items.iter().map(|i| i.amounts).collect();
        let totals = DocumentTotals::compute(
            &amounts,
            input.discount_pct,
            input.freight_charges,
            input.other_charges,
        )?;
        Ok(Self {
            id: SalesOrderId::new(),
            number,
            customer_id: input.customer_id,
            quotation_id: input.quotation_id,
            status: SalesOrderStatus::Pending,
            order_date: input.order_date,
            items,
            totals,
            created_by,
            created_at: now,
        })
    }

    /// Pending → Confirmed. The caller deducts stock for every line in the
    /// same transaction; this is the only point stock is reserved.
    pub fn confirm(&mut self) -> DomainResult<()> {
        match self.status {
            SalesOrderStatus::Pending => {
                self.status = SalesOrderStatus::Confirmed;
                Ok(())
            }
            other => Err(DomainError::invalid_transition(format!(
                "sales order {} cannot be confirmed from {other:?}",
                self.number
            ))),
        }
    }

    pub fn mark_partially_delivered(&mut self) -> DomainResult<()> {
        match self.status {
            SalesOrderStatus::Confirmed => {
                self.status = SalesOrderStatus::PartiallyDelivered;
                Ok(())
            }
            other => Err(DomainError::invalid_transition(format!(
                "sales order {} cannot be partially delivered from {other:?}",
                self.number
            ))),
        }
    }

    pub fn mark_delivered(&mut self) -> DomainResult<()> {
        match self.status {
            SalesOrderStatus::Confirmed | SalesOrderStatus::PartiallyDelivered => {
                self.status = SalesOrderStatus::Delivered;
                Ok(())
            }
            other => Err(DomainError::invalid_transition(format!(
                "sales order {} cannot be delivered from {other:?}",
                self.number
            ))),
        }
    }

    /// Is stock currently reserved against this order? Confirmed-or-later
    /// orders hold a reservation until delivery or cancellation.
    pub fn has_reserved_stock(&self) -> bool {
        matches!(
            self.status,
            SalesOrderStatus::Confirmed | SalesOrderStatus::PartiallyDelivered
        )
    }

    /// Cancel the order. When the previous status held a reservation, the
    /// caller restores stock in the same transaction.
    pub fn cancel(&mut self) -> DomainResult<()> {
        match self.status {
            SalesOrderStatus::Pending
            | SalesOrderStatus::Confirmed
            | SalesOrderStatus::PartiallyDelivered => {
                self.status = SalesOrderStatus::Cancelled;
                Ok(())
            }
            other => Err(DomainError::invalid_transition(format!(
                "sales order {} cannot be cancelled from {other:?}",
                self.number
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn order() -> SalesOrder {
        SalesOrder::create(
            NewSalesOrder {
                number: "so-001".to_string(),
                customer_id: CustomerId::new(),
                quotation_id: None,
                order_date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
                items: vec![SalesLineInput {
                    product_id: ProductId::new(),
                    quantity: 5,
                    unit_price: dec!(100),
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
    fn pending_orders_hold_no_reservation() {
        let o = order();
        assert_eq!(o.status, SalesOrderStatus::Pending);
        assert!(!o.has_reserved_stock());
    }

    #[test]
    fn confirmation_reserves_until_delivery() {
        let mut o = order();
        o.confirm().unwrap();
        assert!(o.has_reserved_stock());
        o.mark_partially_delivered().unwrap();
        assert!(o.has_reserved_stock());
        o.mark_delivered().unwrap();
        assert!(!o.has_reserved_stock());
    }

    #[test]
    fn delivered_orders_are_terminal() {
        let mut o = order();
        o.confirm().unwrap();
        o.mark_delivered().unwrap();
        assert!(o.cancel().is_err());
        assert!(o.confirm().is_err());
    }

    #[test]
    fn double_confirmation_is_rejected() {
        let mut o = order();
        o.confirm().unwrap();
        let err = o.confirm().unwrap_err();
        assert!(matches!(err, DomainError::InvalidTransition(_)));
    }

    #[test]
    fn cancelled_pending_order_reports_no_reservation_to_undo() {
        let mut o = order();
        assert!(!o.has_reserved_stock());
        o.cancel().unwrap();
        assert_eq!(o.status, SalesOrderStatus::Cancelled);
    }
}
