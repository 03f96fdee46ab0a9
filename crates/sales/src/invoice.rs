//! Sales invoices: the receivable side of the ledger.
//!
//! The grand total is rounded to a whole rupee, keeping the remainder in
//! `round_off`. A direct invoice (no linked sales order) moves stock itself;
//! an order-linked invoice must not, since the order already reserved it.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use anvil_core::{
    CustomerId, DocumentNumber, DocumentTotals, DomainError, DomainResult, GstSplit, GstType,
    LineAmounts, PaymentTerms, ProductId, SalesInvoiceId, SalesOrderId, UserId,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SalesInvoiceStatus {
    Sent,
    PartiallyPaid,
    Paid,
    Void,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesInvoiceItem {
    pub product_id: ProductId,
    pub quantity: i64,
    pub unit_price: Decimal,
    pub discount_pct: Decimal,
    pub tax_pct: Decimal,
    pub amounts: LineAmounts,
    pub gst_split: GstSplit,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SalesInvoiceLineInput {
    pub product_id: ProductId,
    pub quantity: i64,
    pub unit_price: Decimal,
    #[serde(default)]
    pub discount_pct: Decimal,
    #[serde(default)]
    pub tax_pct: Decimal,
}

impl SalesInvoiceItem {
    pub fn from_input(input: SalesInvoiceLineInput, gst_type: GstType) -> DomainResult<Self> {
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
            gst_split: GstSplit::of(gst_type, amounts.tax),
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewSalesInvoice {
    pub number: String,
    pub customer_id: CustomerId,
    #[serde(default)]
    pub sales_order_id: Option<SalesOrderId>,
    pub invoice_date: NaiveDate,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub payment_terms: PaymentTerms,
    pub gst_type: GstType,
    pub items: Vec<SalesInvoiceLineInput>,
    #[serde(default)]
    pub discount_pct: Decimal,
    #[serde(default)]
    pub freight_charges: Decimal,
    #[serde(default)]
    pub other_charges: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesInvoice {
    pub id: SalesInvoiceId,
    pub number: DocumentNumber,
    pub customer_id: CustomerId,
    pub sales_order_id: Option<SalesOrderId>,
    pub status: SalesInvoiceStatus,
    pub invoice_date: NaiveDate,
    pub due_date: Option<NaiveDate>,
    pub payment_terms: PaymentTerms,
    pub gst_type: GstType,
    pub items: Vec<SalesInvoiceItem>,
    pub totals: DocumentTotals,
    pub gst_split: GstSplit,
    /// Whole-rupee grand total actually charged.
    pub total: Decimal,
    /// `total − exact total`; the rounding remainder.
    pub round_off: Decimal,
    paid_amount: Decimal,
    pub created_by: UserId,
    pub created_at: DateTime<Utc>,
}

impl SalesInvoice {
    pub fn create(
        input: NewSalesInvoice,
        created_by: UserId,
        now: DateTime<Utc>,
    ) -> DomainResult<Self> {
        let number = DocumentNumber::new(&input.number)?;
        let items = input
            .items
            .into_iter()
            .map(|line| SalesInvoiceItem::from_input(line, input.gst_type))
            .collect::<DomainResult<Vec<_>>>()?;
        let amounts: Vec<LineAmounts> = items.iter().map(|i| i.amounts).collect();
        let totals = DocumentTotals::compute(
            &amounts,
            input.discount_pct,
            input.freight_charges,
            input.other_charges,
        )?;
        let gst_split = GstSplit::of(input.gst_type, totals.total_tax);
        let (total, round_off) = totals.round_to_rupee();
        let due_date = input.payment_terms.due_date(input.invoice_date, input.due_date);
        Ok(Self {
            id: SalesInvoiceId::new(),
            number,
            customer_id: input.customer_id,
            sales_order_id: input.sales_order_id,
            status: SalesInvoiceStatus::Sent,
            invoice_date: input.invoice_date,
            due_date,
            payment_terms: input.payment_terms,
            gst_type: input.gst_type,
            items,
            totals,
            gst_split,
            total,
            round_off,
            paid_amount: Decimal::ZERO,
            created_by,
            created_at: now,
        })
    }

    /// A direct invoice moves stock itself; an order-linked one does not.
    pub fn is_direct(&self) -> bool {
        self.sales_order_id.is_none()
    }

    pub fn paid_amount(&self) -> Decimal {
        self.paid_amount
    }

    /// `total − paid`; zero once void.
    pub fn balance_due(&self) -> Decimal {
        match self.status {
            SalesInvoiceStatus::Void => Decimal::ZERO,
            _ => self.total - self.paid_amount,
        }
    }

    pub fn can_accept_payment(&self) -> bool {
        matches!(
            self.status,
            SalesInvoiceStatus::Sent | SalesInvoiceStatus::PartiallyPaid
        )
    }

    pub fn apply_payment(&mut self, amount: Decimal) -> DomainResult<()> {
        if amount <= Decimal::ZERO {
            return Err(DomainError::validation("payment amount must be positive"));
        }
        if !self.can_accept_payment() {
            return Err(DomainError::invalid_transition(format!(
                "sales invoice {} cannot accept payments in {:?}",
                self.number, self.status
            )));
        }
        self.paid_amount += amount;
        self.status = if self.balance_due() <= Decimal::ZERO {
            SalesInvoiceStatus::Paid
        } else {
            SalesInvoiceStatus::PartiallyPaid
        };
        Ok(())
    }

    /// Void an unpaid invoice. The caller reverses the customer balance and,
    /// for direct invoices, restores stock in the same transaction.
    pub fn void(&mut self) -> DomainResult<()> {
        if self.status == SalesInvoiceStatus::Void {
            return Err(DomainError::invalid_transition(format!(
                "sales invoice {} is already void",
                self.number
            )));
        }
        if self.paid_amount > Decimal::ZERO {
            return Err(DomainError::invalid_transition(format!(
                "sales invoice {} has payments applied and cannot be voided",
                self.number
            )));
        }
        self.status = SalesInvoiceStatus::Void;
        Ok(())
    }

    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.due_date.is_some_and(|due| due < today)
            && self.balance_due() > Decimal::ZERO
            && self.status != SalesInvoiceStatus::Void
    }
}
