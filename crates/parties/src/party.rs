use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use anvil_core::{CustomerId, DomainError, DomainResult, PaymentTerms, SupplierId};

/// Which side of the ledger a counterparty sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartyKind {
    Supplier,
    Customer,
}

impl core::fmt::Display for PartyKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Supplier => f.write_str("supplier"),
            Self::Customer => f.write_str("customer"),
        }
    }
}

/// Short party code (SUP-001, CUST-042, ...). Trimmed, uppercased, unique
/// within its party kind.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PartyCode(String);

impl PartyCode {
    pub fn new(raw: impl AsRef<str>) -> DomainResult<Self> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(DomainError::validation("party code cannot be empty"));
        }
        if trimmed.len() > 20 {
            return Err(DomainError::validation("party code exceeds 20 characters"));
        }
        Ok(Self(trimmed.to_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for PartyCode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// B2B customer segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CustomerType {
    Retail,
    Wholesale,
    Contractor,
}

/// A vendor we buy from.
///
/// `current_balance` is how much we owe the supplier. It is private: the only
/// mutator is [`Supplier::apply_balance_delta`], called when invoices are
/// booked, paid, or reversed. Balances may go negative (advance payments).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Supplier {
    pub id: SupplierId,
    pub code: PartyCode,
    pub name: String,
    pub gst_number: Option<String>,
    pub payment_terms: PaymentTerms,
    pub credit_limit: Decimal,
    pub opening_balance: Decimal,
    current_balance: Decimal,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// A business customer we sell to.
///
/// `current_balance` is how much the customer owes us. Same mutation rules as
/// [`Supplier`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct B2BCustomer {
    pub id: CustomerId,
    pub code: PartyCode,
    pub name: String,
    pub customer_type: CustomerType,
    pub gst_number: Option<String>,
    pub payment_terms: PaymentTerms,
    pub credit_limit: Decimal,
    pub opening_balance: Decimal,
    current_balance: Decimal,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewSupplier {
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub gst_number: Option<String>,
    #[serde(default)]
    pub payment_terms: PaymentTerms,
    #[serde(default)]
    pub credit_limit: Decimal,
    #[serde(default)]
    pub opening_balance: Decimal,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewCustomer {
    pub code: String,
    pub name: String,
    pub customer_type: CustomerType,
    #[serde(default)]
    pub gst_number: Option<String>,
    #[serde(default)]
    pub payment_terms: PaymentTerms,
    #[serde(default)]
    pub credit_limit: Decimal,
    #[serde(default)]
    pub opening_balance: Decimal,
}

fn validated_name(raw: &str) -> DomainResult<String> {
    let name = raw.trim().to_string();
    if name.is_empty() {
        return Err(DomainError::validation("party name cannot be empty"));
    }
    Ok(name)
}

impl Supplier {
    pub fn register(input: NewSupplier, now: DateTime<Utc>) -> DomainResult<Self> {
        if input.credit_limit < Decimal::ZERO {
            return Err(DomainError::validation("credit limit cannot be negative"));
        }
        Ok(Self {
            id: SupplierId::new(),
            code: PartyCode::new(&input.code)?,
            name: validated_name(&input.name)?,
            gst_number: input.gst_number,
            payment_terms: input.payment_terms,
            credit_limit: input.credit_limit,
            opening_balance: input.opening_balance,
            current_balance: input.opening_balance,
            is_active: true,
            created_at: now,
        })
    }

    pub fn current_balance(&self) -> Decimal {
        self.current_balance
    }

    /// Shift the payable balance. Negative results are allowed.
    pub fn apply_balance_delta(&mut self, delta: Decimal) -> Decimal {
        self.current_balance += delta;
        self.current_balance
    }
}

impl B2BCustomer {
    pub fn register(input: NewCustomer, now: DateTime<Utc>) -> DomainResult<Self> {
        if input.credit_limit < Decimal::ZERO {
            return Err(DomainError::validation("credit limit cannot be negative"));
        }
        Ok(Self {
            id: CustomerId::new(),
            code: PartyCode::new(&input.code)?,
            name: validated_name(&input.name)?,
            customer_type: input.customer_type,
            gst_number: input.gst_number,
            payment_terms: input.payment_terms,
            credit_limit: input.credit_limit,
            opening_balance: input.opening_balance,
            current_balance: input.opening_balance,
            is_active: true,
            created_at: now,
        })
    }

    pub fn current_balance(&self) -> Decimal {
        self.current_balance
    }

    /// Shift the receivable balance. Negative results are allowed.
    pub fn apply_balance_delta(&mut self, delta: Decimal) -> Decimal {
        self.current_balance += delta;
        self.current_balance
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn supplier_starts_at_opening_balance() {
        let supplier = Supplier::register(
            NewSupplier {
                code: "sup-001".to_string(),
                name: "Acme Fasteners".to_string(),
                gst_number: None,
                payment_terms: PaymentTerms::Credit30,
                credit_limit: dec!(100000),
                opening_balance: dec!(2500),
            },
            Utc::now(),
        )
        .unwrap();
        assert_eq!(supplier.code.as_str(), "SUP-001");
        assert_eq!(supplier.current_balance(), dec!(2500));
    }

    #[test]
    fn balance_can_go_negative() {
        let mut customer = B2BCustomer::register(
            NewCustomer {
                code: "cust-001".to_string(),
                name: "BuildRight".to_string(),
                customer_type: CustomerType::Wholesale,
                gst_number: None,
                payment_terms: PaymentTerms::Cash,
                credit_limit: Decimal::ZERO,
                opening_balance: Decimal::ZERO,
            },
            Utc::now(),
        )
        .unwrap();
        // Overpayment leaves a credit on the account.
        assert_eq!(customer.apply_balance_delta(dec!(-150)), dec!(-150));
    }

    #[test]
    fn rejects_blank_code_or_name() {
        let bad = NewSupplier {
            code: " ".to_string(),
            name: "Acme".to_string(),
            gst_number: None,
            payment_terms: PaymentTerms::Cash,
            credit_limit: Decimal::ZERO,
            opening_balance: Decimal::ZERO,
        };
        assert!(Supplier::register(bad.clone(), Utc::now()).is_err());
        let bad = NewSupplier {
            code: "S1".to_string(),
            name: "  ".to_string(),
            ..bad
        };
        assert!(Supplier::register(bad, Utc::now()).is_err());
    }
}
