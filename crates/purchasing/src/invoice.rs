//! Purchase invoices: the payable side of the ledger.
//!
//! Booking an invoice raises the supplier balance by its total; payments
//! bring `paid_amount` up and the balance back down. Overdue is a derived
//! view (`is_overdue`), not a stored status.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use anvil_core::{
    DocumentNumber, DocumentTotals, DomainError, DomainResult, GrnId, GstSplit, GstType,
    LineAmounts, PaymentTerms, ProductId, PurchaseInvoiceId, SupplierId, UserId,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PurchaseInvoiceStatus {
    Pending,
    PartiallyPaid,
    Paid,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseInvoiceItem {
    pub product_id: ProductId,
    pub quantity: i64,
    pub unit_price: Decimal,
    pub discount_pct: Decimal,
    pub tax_pct: Decimal,
    pub amounts: LineAmounts,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InvoiceLineInput {
    pub product_id: ProductId,
    pub quantity: i64,
    pub unit_price: Decimal,
    #[serde(default)]
    pub discount_pct: Decimal,
    #[serde(default)]
    pub tax_pct: Decimal,
}

impl PurchaseInvoiceItem {
    pub fn from_input(input: InvoiceLineInput) -> DomainResult<Self> {
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
pub struct NewPurchaseInvoice {
    pub number: String,
    pub supplier_id: SupplierId,
    #[serde(default)]
    pub grn_id: Option<GrnId>,
    pub invoice_date: NaiveDate,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub payment_terms: PaymentTerms,
    pub gst_type: GstType,
    pub items: Vec<InvoiceLineInput>,
    #[serde(default)]
    pub discount_pct: Decimal,
    #[serde(default)]
    pub freight_charges: Decimal,
    #[serde(default)]
    pub other_charges: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseInvoice {
    pub id: PurchaseInvoiceId,
    pub number: DocumentNumber,
    pub supplier_id: SupplierId,
    pub grn_id: Option<GrnId>,
    pub status: PurchaseInvoiceStatus,
    pub invoice_date: NaiveDate,
    pub due_date: Option<NaiveDate>,
    pub payment_terms: PaymentTerms,
    pub gst_type: GstType,
    pub items: Vec<PurchaseInvoiceItem>,
    pub totals: DocumentTotals,
    pub gst_split: GstSplit,
    paid_amount: Decimal,
    pub created_by: UserId,
    pub created_at: DateTime<Utc>,
}

impl PurchaseInvoice {
    pub fn create(
        input: NewPurchaseInvoice,
        created_by: UserId,
        now: DateTime<Utc>,
    ) -> DomainResult<Self> {
        let number = DocumentNumber::new(&input.number)?;
        let items = input
            .items
            .into_iter()
            .map(PurchaseInvoiceItem::from_input)
            .collect::<DomainResult<Vec<_>>>()?;
        let amounts: Vec<LineAmounts> = items.iter().map(|i| i.amounts).collect();
        let totals = DocumentTotals::compute(
            &amounts,
            input.discount_pct,
            input.freight_charges,
            input.other_charges,
        )?;
        let gst_split = GstSplit::of(input.gst_type, totals.total_tax);
        let due_date = input.payment_terms.due_date(input.invoice_date, input.due_date);
        Ok(Self {
            id: PurchaseInvoiceId::new(),
            number,
            supplier_id: input.supplier_id,
            grn_id: input.grn_id,
            status: PurchaseInvoiceStatus::Pending,
            invoice_date: input.invoice_date,
            due_date,
            payment_terms: input.payment_terms,
            gst_type: input.gst_type,
            items,
            totals,
            gst_split,
            paid_amount: Decimal::ZERO,
            created_by,
            created_at: now,
        })
    }

    pub fn paid_amount(&self) -> Decimal {
        self.paid_amount
    }

    /// `total − paid`; zero once cancelled.
    pub fn balance_due(&self) -> Decimal {
        match self.status {
            PurchaseInvoiceStatus::Cancelled => Decimal::ZERO,
            _ => self.totals.total - self.paid_amount,
        }
    }

    pub fn can_accept_payment(&self) -> bool {
        matches!(
            self.status,
            PurchaseInvoiceStatus::Pending | PurchaseInvoiceStatus::PartiallyPaid
        )
    }

    /// Apply a payment, moving status to PartiallyPaid or Paid.
    pub fn apply_payment(&mut self, amount: Decimal) -> DomainResult<()> {
        if amount <= Decimal::ZERO {
            return Err(DomainError::validation("payment amount must be positive"));
        }
        if !self.can_accept_payment() {
            return Err(DomainError::invalid_transition(format!(
                "purchase invoice {} cannot accept payments in {:?}",
                self.number, self.status
            )));
        }
        self.paid_amount += amount;
        self.status = if self.balance_due() <= Decimal::ZERO {
            PurchaseInvoiceStatus::Paid
        } else {
            PurchaseInvoiceStatus::PartiallyPaid
        };
        Ok(())
    }

    /// Cancel an unpaid invoice. The caller reverses the supplier balance in
    /// the same transaction.
    pub fn cancel(&mut self) -> DomainResult<()> {
        if self.paid_amount > Decimal::ZERO {
            return Err(DomainError::invalid_transition(format!(
                "purchase invoice {} has payments applied and cannot be cancelled",
                self.number
            )));
        }
        match self.status {
            PurchaseInvoiceStatus::Pending => {
                self.status = PurchaseInvoiceStatus::Cancelled;
                Ok(())
            }
            other => Err(DomainError::invalid_transition(format!(
                "purchase invoice {} cannot be cancelled from {other:?}",
                self.number
            ))),
        }
    }

    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.due_date.is_some_and(|due| due < today)
            && self.balance_due() > Decimal::ZERO
            && !matches!(self.status, PurchaseInvoiceStatus::Cancelled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn invoice() -> PurchaseInvoice {
        PurchaseInvoice::create(
            NewPurchaseInvoice {
                number: "pi-001".to_string(),
                supplier_id: SupplierId::new(),
                grn_id: None,
                invoice_date: NaiveDate::from_ymd_opt(2024, 6, 10).unwrap(),
                due_date: None,
                payment_terms: PaymentTerms::Credit30,
                gst_type: GstType::CgstSgst,
                items: vec![InvoiceLineInput {
                    product_id: ProductId::new(),
                    quantity: 10,
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
    fn create_derives_totals_split_and_due_date() {
        let inv = invoice();
        assert_eq!(inv.totals.total, dec!(1180.00));
        assert_eq!(inv.gst_split.cgst, dec!(90.00));
        assert_eq!(inv.gst_split.sgst, dec!(90.00));
        assert_eq!(inv.due_date, NaiveDate::from_ymd_opt(2024, 7, 10));
        assert_eq!(inv.balance_due(), dec!(1180.00));
    }

    #[test]
    fn payments_walk_the_status_ladder() {
        let mut inv = invoice();
        inv.apply_payment(dec!(500)).unwrap();
        assert_eq!(inv.status, PurchaseInvoiceStatus::PartiallyPaid);
        assert_eq!(inv.balance_due(), dec!(680.00));
        inv.apply_payment(dec!(680)).unwrap();
        assert_eq!(inv.status, PurchaseInvoiceStatus::Paid);
        assert_eq!(inv.balance_due(), dec!(0.00));
    }

    #[test]
    fn paid_invoice_rejects_further_payments() {
        let mut inv = invoice();
        inv.apply_payment(dec!(1180)).unwrap();
        assert!(inv.apply_payment(dec!(1)).is_err());
    }

    #[test]
    fn cancel_only_before_any_payment() {
        let mut inv = invoice();
        inv.apply_payment(dec!(100)).unwrap();
        assert!(inv.cancel().is_err());

        let mut fresh = invoice();
        fresh.cancel().unwrap();
        assert_eq!(fresh.status, PurchaseInvoiceStatus::Cancelled);
        assert_eq!(fresh.balance_due(), dec!(0));
    }

    #[test]
    fn overdue_is_derived_from_due_date_and_balance() {
        let inv = invoice();
        assert!(!inv.is_overdue(NaiveDate::from_ymd_opt(2024, 7, 10).unwrap()));
        assert!(inv.is_overdue(NaiveDate::from_ymd_opt(2024, 7, 11).unwrap()));

        let mut paid = invoice();
        paid.apply_payment(dec!(1180)).unwrap();
        assert!(!paid.is_overdue(NaiveDate::from_ymd_opt(2024, 8, 1).unwrap()));
    }
}
