//! Payment terms and due-date derivation.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// Terms agreed with the counterparty for settling an invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentTerms {
    Cash,
    Credit15,
    Credit30,
    Credit60,
    Credit90,
}

impl PaymentTerms {
    pub fn credit_days(self) -> Option<u64> {
        match self {
            Self::Cash => None,
            Self::Credit15 => Some(15),
            Self::Credit30 => Some(30),
            Self::Credit60 => Some(60),
            Self::Credit90 => Some(90),
        }
    }

    /// Due date for an invoice dated `doc_date`.
    ///
    /// An explicitly supplied due date always wins. Otherwise credit terms
    /// push the document date out by their credit window; cash terms have no
    /// due date at all.
    pub fn due_date(self, doc_date: NaiveDate, explicit: Option<NaiveDate>) -> Option<NaiveDate> {
        explicit.or_else(|| {
            self.credit_days()
                .and_then(|days| doc_date.checked_add_days(Days::new(days)))
        })
    }
}

impl Default for PaymentTerms {
    fn default() -> Self {
        Self::Cash
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn explicit_due_date_wins() {
        let explicit = date(2024, 7, 1);
        let due = PaymentTerms::Credit30.due_date(date(2024, 6, 1), Some(explicit));
        assert_eq!(due, Some(explicit));
    }

    #[test]
    fn credit_terms_derive_from_doc_date() {
        let due = PaymentTerms::Credit30.due_date(date(2024, 6, 1), None);
        assert_eq!(due, Some(date(2024, 7, 1)));

        let due = PaymentTerms::Credit90.due_date(date(2024, 1, 15), None);
        assert_eq!(due, Some(date(2024, 4, 14)));
    }

    #[test]
    fn cash_terms_have_no_due_date() {
        assert_eq!(PaymentTerms::Cash.due_date(date(2024, 6, 1), None), None);
    }
}
