//! Exact-decimal money arithmetic for line items and document totals.
//!
//! Every amount that leaves this module is rounded half-up to two decimal
//! places. Quantities are integers; percentages live in `0..=100`.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// Round to two decimal places, half away from zero.
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// `pct` percent of `amount`, rounded.
pub fn percent_of(amount: Decimal, pct: Decimal) -> Decimal {
    round_money(amount * pct / Decimal::ONE_HUNDRED)
}

fn ensure_percent(label: &str, pct: Decimal) -> DomainResult<()> {
    if pct < Decimal::ZERO || pct > Decimal::ONE_HUNDRED {
        return Err(DomainError::validation(format!(
            "{label} must be between 0 and 100, got {pct}"
        )));
    }
    Ok(())
}

fn ensure_non_negative(label: &str, amount: Decimal) -> DomainResult<()> {
    if amount < Decimal::ZERO {
        return Err(DomainError::validation(format!(
            "{label} cannot be negative, got {amount}"
        )));
    }
    Ok(())
}

/// GST mode: intra-state splits the tax evenly into CGST + SGST,
/// inter-state books the full amount as IGST. No mixing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GstType {
    CgstSgst,
    Igst,
}

/// Tax amount broken down per GST mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GstSplit {
    pub cgst: Decimal,
    pub sgst: Decimal,
    pub igst: Decimal,
}

impl GstSplit {
    /// Split a tax total per the GST mode.
    ///
    /// For the even split, `sgst = tax - cgst` so the halves always sum back
    /// to the original amount even when it has an odd paisa.
    pub fn of(gst_type: GstType, total_tax: Decimal) -> Self {
        match gst_type {
            GstType::CgstSgst => {
                let cgst = round_money(total_tax / Decimal::TWO);
                Self {
                    cgst,
                    sgst: total_tax - cgst,
                    igst: Decimal::ZERO,
                }
            }
            GstType::Igst => Self {
                cgst: Decimal::ZERO,
                sgst: Decimal::ZERO,
                igst: total_tax,
            },
        }
    }
}

/// Derived amounts for one line item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineAmounts {
    /// `quantity * unit_price` before any deduction.
    pub gross: Decimal,
    pub discount: Decimal,
    pub taxable: Decimal,
    pub tax: Decimal,
    /// `taxable + tax`.
    pub total: Decimal,
}

impl LineAmounts {
    pub fn compute(
        quantity: i64,
        unit_price: Decimal,
        discount_pct: Decimal,
        tax_pct: Decimal,
    ) -> DomainResult<Self> {
        if quantity <= 0 {
            return Err(DomainError::validation(format!(
                "quantity must be positive, got {quantity}"
            )));
        }
        ensure_non_negative("unit_price", unit_price)?;
        ensure_percent("discount_percentage", discount_pct)?;
        ensure_percent("tax_percentage", tax_pct)?;

        let gross = round_money(Decimal::from(quantity) * unit_price);
        let discount = percent_of(gross, discount_pct);
        let taxable = gross - discount;
        let tax = percent_of(taxable, tax_pct);
        Ok(Self {
            gross,
            discount,
            taxable,
            tax,
            total: taxable + tax,
        })
    }
}

/// Header-level totals summed over the line items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentTotals {
    pub subtotal: Decimal,
    pub discount_percentage: Decimal,
    pub discount_amount: Decimal,
    pub freight_charges: Decimal,
    pub other_charges: Decimal,
    pub total_tax: Decimal,
    pub total: Decimal,
}

impl DocumentTotals {
    /// `total = subtotal - discount + freight + other + tax`.
    pub fn compute(
        lines: &[LineAmounts],
        discount_pct: Decimal,
        freight_charges: Decimal,
        other_charges: Decimal,
    ) -> DomainResult<Self> {
        if lines.is_empty() {
            return Err(DomainError::validation("document must have at least one line item"));
        }
        ensure_percent("discount_percentage", discount_pct)?;
        ensure_non_negative("freight_charges", freight_charges)?;
        ensure_non_negative("other_charges", other_charges)?;

        let subtotal: Decimal = lines.iter().map(|l| l.gross).sum();
        let total_tax: Decimal = lines.iter().map(|l| l.tax).sum();
        let discount_amount = percent_of(subtotal, discount_pct);
        let total = subtotal - discount_amount + freight_charges + other_charges + total_tax;
        Ok(Self {
            subtotal,
            discount_percentage: discount_pct,
            discount_amount,
            freight_charges,
            other_charges,
            total_tax,
            total,
        })
    }

    /// Round the grand total to the nearest whole rupee.
    ///
    /// Returns `(rounded_total, round_off)` with `round_off = rounded - exact`.
    pub fn round_to_rupee(&self) -> (Decimal, Decimal) {
        let rounded = self
            .total
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
        (rounded, rounded - self.total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn line_amounts_without_discount() {
        // 5 units at 100, 18% GST: taxable 500, tax 90, total 590.
        let line = LineAmounts::compute(5, dec!(100), dec!(0), dec!(18)).unwrap();
        assert_eq!(line.gross, dec!(500.00));
        assert_eq!(line.discount, dec!(0.00));
        assert_eq!(line.taxable, dec!(500.00));
        assert_eq!(line.tax, dec!(90.00));
        assert_eq!(line.total, dec!(590.00));
    }

    #[test]
    fn line_amounts_with_discount() {
        let line = LineAmounts::compute(10, dec!(50), dec!(10), dec!(12)).unwrap();
        assert_eq!(line.gross, dec!(500.00));
        assert_eq!(line.discount, dec!(50.00));
        assert_eq!(line.taxable, dec!(450.00));
        assert_eq!(line.tax, dec!(54.00));
        assert_eq!(line.total, dec!(504.00));
    }

    #[test]
    fn rejects_bad_inputs() {
        assert!(LineAmounts::compute(0, dec!(10), dec!(0), dec!(18)).is_err());
        assert!(LineAmounts::compute(1, dec!(-1), dec!(0), dec!(18)).is_err());
        assert!(LineAmounts::compute(1, dec!(10), dec!(101), dec!(18)).is_err());
        assert!(LineAmounts::compute(1, dec!(10), dec!(0), dec!(-2)).is_err());
    }

    #[test]
    fn gst_even_split_sums_back_exactly() {
        let split = GstSplit::of(GstType::CgstSgst, dec!(90.00));
        assert_eq!(split.cgst, dec!(45.00));
        assert_eq!(split.sgst, dec!(45.00));
        assert_eq!(split.igst, dec!(0));

        // Odd paisa: halves still sum to the original.
        let split = GstSplit::of(GstType::CgstSgst, dec!(0.03));
        assert_eq!(split.cgst + split.sgst, dec!(0.03));
    }

    #[test]
    fn igst_takes_full_amount() {
        let split = GstSplit::of(GstType::Igst, dec!(90.00));
        assert_eq!(split.igst, dec!(90.00));
        assert_eq!(split.cgst, dec!(0));
        assert_eq!(split.sgst, dec!(0));
    }

    #[test]
    fn document_totals() {
        let lines = vec![
            LineAmounts::compute(5, dec!(100), dec!(0), dec!(18)).unwrap(),
            LineAmounts::compute(2, dec!(250), dec!(0), dec!(18)).unwrap(),
        ];
        let totals = DocumentTotals::compute(&lines, dec!(0), dec!(50), dec!(0)).unwrap();
        assert_eq!(totals.subtotal, dec!(1000.00));
        assert_eq!(totals.total_tax, dec!(180.00));
        assert_eq!(totals.total, dec!(1230.00));
    }

    #[test]
    fn empty_documents_rejected() {
        let err = DocumentTotals::compute(&[], dec!(0), dec!(0), dec!(0)).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn rupee_rounding_keeps_remainder() {
        let lines = vec![LineAmounts::compute(3, dec!(33.33), dec!(0), dec!(18)).unwrap()];
        let totals = DocumentTotals::compute(&lines, dec!(0), dec!(0), dec!(0)).unwrap();
        let (rounded, round_off) = totals.round_to_rupee();
        assert_eq!(rounded, rounded.trunc());
        assert_eq!(rounded - round_off, totals.total);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn gst_split_always_sums_to_tax(paise in 0i64..10_000_000) {
                let tax = Decimal::new(paise, 2);
                for gst_type in [GstType::CgstSgst, GstType::Igst] {
                    let split = GstSplit::of(gst_type, tax);
                    prop_assert_eq!(split.cgst + split.sgst + split.igst, tax);
                }
            }

            #[test]
            fn line_total_is_taxable_plus_tax(
                qty in 1i64..10_000,
                price_paise in 0i64..10_000_000,
                discount in 0u32..=100,
                tax in 0u32..=100,
            ) {
                let line = LineAmounts::compute(
                    qty,
                    Decimal::new(price_paise, 2),
                    Decimal::from(discount),
                    Decimal::from(tax),
                ).unwrap();
                prop_assert_eq!(line.total, line.taxable + line.tax);
                prop_assert_eq!(line.taxable, line.gross - line.discount);
                prop_assert!(line.discount <= line.gross);
            }
        }
    }
}
