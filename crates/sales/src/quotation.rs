//! Sales quotations: purely informational, no stock or balance effect.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use anvil_core::{
    CustomerId, DocumentNumber, DocumentTotals, DomainError, DomainResult, LineAmounts, ProductId,
    QuotationId, UserId,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuotationStatus {
    Draft,
    Sent,
    Accepted,
    Rejected,
    Expired,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotationItem {
    pub product_id: ProductId,
    pub quantity: i64,
    pub unit_price: Decimal,
    pub discount_pct: Decimal,
    pub tax_pct: Decimal,
    pub amounts: LineAmounts,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QuotationLineInput {
    pub product_id: ProductId,
    pub quantity: i64,
    pub unit_price: Decimal,
    #[serde(default)]
    pub discount_pct: Decimal,
    #[serde(default)]
    pub tax_pct: Decimal,
}

impl QuotationItem {
    pub fn from_input(input: QuotationLineInput) -> DomainResult<Self> {
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
pub struct NewQuotation {
    pub number: String,
    pub customer_id: CustomerId,
    pub quotation_date: NaiveDate,
    #[serde(default)]
    pub valid_until: Option<NaiveDate>,
    pub items: Vec<QuotationLineInput>,
    #[serde(default)]
    pub discount_pct: Decimal,
    #[serde(default)]
    pub freight_charges: Decimal,
    #[serde(default)]
    pub other_charges: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesQuotation {
    pub id: QuotationId,
    pub number: DocumentNumber,
    pub customer_id: CustomerId,
    pub status: QuotationStatus,
    pub quotation_date: NaiveDate,
    pub valid_until: Option<NaiveDate>,
    pub items: Vec<QuotationItem>,
    pub totals: DocumentTotals,
    pub created_by: UserId,
    pub created_at: DateTime<Utc>,
}

impl SalesQuotation {
    pub fn create(
        input: NewQuotation,
        created_by: UserId,
        now: DateTime<Utc>,
    ) -> DomainResult<Self> {
        let number = DocumentNumber::new(&input.number)?;
        let items = input
            .items
            .into_iter()
            .map(QuotationItem::from_input)
            .collect::<DomainResult<Vec<_>>>()?;
        let amounts: Vec<LineAmounts> = items.iter().map(|i| i.amounts).collect();
        let totals = DocumentTotals::compute(
            &amounts,
            input.discount_pct,
            input.freight_charges,
            input.other_charges,
        )?;
        Ok(Self {
            id: QuotationId::new(),
            number,
            customer_id: input.customer_id,
            status: QuotationStatus::Draft,
            quotation_date: input.quotation_date,
            valid_until: input.valid_until,
            items,
            totals,
            created_by,
            created_at: now,
        })
    }

    pub fn send(&mut self) -> DomainResult<()> {
        self.transition(QuotationStatus::Draft, QuotationStatus::Sent, "sent")
    }

    pub fn accept(&mut self) -> DomainResult<()> {
        self.transition(QuotationStatus::Sent, QuotationStatus::Accepted, "accepted")
    }

    pub fn reject(&mut self) -> DomainResult<()> {
        self.transition(QuotationStatus::Sent, QuotationStatus::Rejected, "rejected")
    }

    pub fn expire(&mut self) -> DomainResult<()> {
        self.transition(QuotationStatus::Sent, QuotationStatus::Expired, "expired")
    }

    fn transition(
        &mut self,
        from: QuotationStatus,
        to: QuotationStatus,
        verb: &str,
    ) -> DomainResult<()> {
        if self.status != from {
            return Err(DomainError::invalid_transition(format!(
                "quotation {} cannot be {verb} from {:?}",
                self.number, self.status
            )));
        }
        self.status = to;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn quotation() -> SalesQuotation {
        SalesQuotation::create(
            NewQuotation {
                number: "qt-001".to_string(),
                customer_id: CustomerId::new(),
                quotation_date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
                valid_until: None,
                items: vec![QuotationLineInput {
                    product_id: ProductId::new(),
                    quantity: 3,
                    unit_price: dec!(200),
                    discount_pct: dec!(5),
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
    fn full_lifecycle_to_accepted() {
        let mut q = quotation();
        q.send().unwrap();
        q.accept().unwrap();
        assert_eq!(q.status, QuotationStatus::Accepted);
    }

    #[test]
    fn only_sent_quotations_resolve() {
        let mut q = quotation();
        assert!(q.accept().is_err());
        assert!(q.reject().is_err());
        assert!(q.expire().is_err());
        q.send().unwrap();
        q.reject().unwrap();
        assert!(q.expire().is_err());
    }
}
