//! Immutable payment records.
//!
//! A payment is the only way invoice `paid_amount` and party balances move
//! after booking. It is never edited or deleted; corrections are new
//! payments or a pre-payment void of the underlying invoice.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use anvil_core::{
    CustomerId, DocumentNumber, DomainError, DomainResult, PaymentId, PurchaseInvoiceId,
    SalesInvoiceId, SupplierId, UserId,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Cash,
    BankTransfer,
    Cheque,
    Upi,
    Card,
}

/// Which invoice a payment settles, with its counterparty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PaymentTarget {
    Purchase {
        invoice_id: PurchaseInvoiceId,
        supplier_id: SupplierId,
    },
    Sales {
        invoice_id: SalesInvoiceId,
        customer_id: CustomerId,
    },
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewPayment {
    pub number: String,
    pub target: PaymentTarget,
    pub amount: Decimal,
    pub method: PaymentMethod,
    pub payment_date: NaiveDate,
    #[serde(default)]
    pub reference_number: Option<String>,
    #[serde(default)]
    pub bank_name: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// A settled payment. All fields are read-only after construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    pub id: PaymentId,
    pub number: DocumentNumber,
    pub target: PaymentTarget,
    pub amount: Decimal,
    pub method: PaymentMethod,
    pub payment_date: NaiveDate,
    pub reference_number: Option<String>,
    pub bank_name: Option<String>,
    pub notes: Option<String>,
    pub created_by: UserId,
    pub created_at: DateTime<Utc>,
}

impl Payment {
    pub fn record(input: NewPayment, created_by: UserId, now: DateTime<Utc>) -> DomainResult<Self> {
        let number = DocumentNumber::new(&input.number)?;
        if input.amount <= Decimal::ZERO {
            return Err(DomainError::validation(format!(
                "payment amount must be positive, got {}",
                input.amount
            )));
        }
        Ok(Self {
            id: PaymentId::new(),
            number,
            target: input.target,
            amount: input.amount,
            method: input.method,
            payment_date: input.payment_date,
            reference_number: input.reference_number,
            bank_name: input.bank_name,
            notes: input.notes,
            created_by,
            created_at: now,
        })
    }
}
