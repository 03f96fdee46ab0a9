//! Property tests over randomized document interleavings.

mod common;

use common::*;

use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use anvil_core::{GstType, PaymentTerms, SalesInvoiceId};
use anvil_ledger::{LedgerServices, StockAdjustment};
use anvil_payments::{NewPayment, PaymentMethod, PaymentTarget};
use anvil_purchasing::{GrnLineInput, NewGrn, NewPurchaseInvoice, PurchaseInvoiceStatus};
use anvil_sales::{NewSalesInvoice, SalesInvoiceLineInput};

#[derive(Debug, Clone)]
enum Op {
    Receive { product: usize, qty: i64 },
    Adjust { product: usize, delta: i64 },
    Invoice { product: usize, qty: i64 },
    VoidLastInvoice,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0usize..3, 1i64..=30).prop_map(|(product, qty)| Op::Receive { product, qty }),
        (0usize..3, -15i64..=15)
            .prop_filter("zero deltas are rejected up front", |(_, d)| *d != 0)
            .prop_map(|(product, delta)| Op::Adjust { product, delta }),
        (0usize..3, 1i64..=20).prop_map(|(product, qty)| Op::Invoice { product, qty }),
        Just(Op::VoidLastInvoice),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Whatever sequence of receipts, adjustments, invoices, and voids is
    /// thrown at the ledger, stock never goes negative and replaying every
    /// product's trail from zero reproduces its live stock.
    #[test]
    fn random_movements_never_corrupt_the_trail(
        ops in proptest::collection::vec(op_strategy(), 1..40),
    ) {
        let services = LedgerServices::standard();
        let products = [
            seed_product(&services, "P-0", 10),
            seed_product(&services, "P-1", 0),
            seed_product(&services, "P-2", 25),
        ];
        let supplier = seed_supplier(&services, "SUP-1");
        let customer = seed_customer(&services, "CUST-1");

        let mut seq = 0u32;
        let mut open_invoices: Vec<SalesInvoiceId> = Vec::new();
        for op in ops {
            seq += 1;
            match op {
                Op::Receive { product, qty } => {
                    services
                        .purchasing
                        .create_grn(
                            &admin(),
                            NewGrn {
                                number: format!("GRN-{seq:04}"),
                                po_id: None,
                                supplier_id: supplier,
                                received_date: date(2024, 6, 1),
                                supplier_invoice_number: None,
                                vehicle_number: None,
                                items: vec![GrnLineInput {
                                    product_id: products[product],
                                    ordered_quantity: 0,
                                    received_quantity: qty,
                                    unit_price: dec!(60),
                                    batch_number: None,
                                    expiry_date: None,
                                }],
                            },
                        )
                        .map_err(|e| TestCaseError::fail(e.to_string()))?;
                }
                Op::Adjust { product, delta } => {
                    // Negative adjustments may legitimately hit the floor.
                    let _ = services.inventory.adjust_stock(
                        &admin(),
                        StockAdjustment {
                            product_id: products[product],
                            delta,
                            reason: "cycle count".to_string(),
                            unit_price: None,
                        },
                    );
                }
                Op::Invoice { product, qty } => {
                    let result = services.sales.create_sales_invoice(
                        &admin(),
                        NewSalesInvoice {
                            number: format!("INV-{seq:04}"),
                            customer_id: customer,
                            sales_order_id: None,
                            invoice_date: date(2024, 6, 15),
                            due_date: None,
                            payment_terms: PaymentTerms::Cash,
                            gst_type: GstType::CgstSgst,
                            items: vec![SalesInvoiceLineInput {
                                product_id: products[product],
                                quantity: qty,
                                unit_price: dec!(100),
                                discount_pct: dec!(0),
                                tax_pct: dec!(18),
                            }],
                            discount_pct: dec!(0),
                            freight_charges: dec!(0),
                            other_charges: dec!(0),
                        },
                    );
                    if let Ok(invoice) = result {
                        open_invoices.push(invoice.id);
                    }
                }
                Op::VoidLastInvoice => {
                    if let Some(id) = open_invoices.pop() {
                        services
                            .sales
                            .void_sales_invoice(&admin(), id)
                            .map_err(|e| TestCaseError::fail(e.to_string()))?;
                    }
                }
            }
        }

        for product in products {
            let stock = services
                .catalog
                .get_product(&admin(), product)
                .map_err(|e| TestCaseError::fail(e.to_string()))?
                .stock();
            prop_assert!(stock >= 0, "stock went negative: {stock}");
            let recon = services
                .inventory
                .reconcile_product(&admin(), product)
                .map_err(|e| TestCaseError::fail(e.to_string()))?;
            prop_assert!(
                recon.consistent,
                "trail replay {} != live stock {}",
                recon.replayed_stock,
                recon.current_stock
            );
        }
    }

    /// After every attempted payment, `balance_due == total − paid` and the
    /// invoice is Paid exactly when the balance has reached zero. Rejected
    /// payments leave both the invoice and the supplier balance untouched.
    #[test]
    fn payment_sequences_keep_invoice_and_balance_in_lockstep(
        amounts in proptest::collection::vec(1i64..=700, 1..12),
    ) {
        let services = LedgerServices::standard();
        let product = seed_product(&services, "P-1", 0);
        let supplier = seed_supplier(&services, "SUP-1");

        // 10 x 100 @ 18%: total 1180.
        let invoice = services
            .purchasing
            .create_purchase_invoice(
                &admin(),
                NewPurchaseInvoice {
                    number: "PI-001".to_string(),
                    supplier_id: supplier,
                    grn_id: None,
                    invoice_date: date(2024, 6, 10),
                    due_date: None,
                    payment_terms: PaymentTerms::Cash,
                    gst_type: GstType::Igst,
                    items: vec![anvil_purchasing::InvoiceLineInput {
                        product_id: product,
                        quantity: 10,
                        unit_price: dec!(100),
                        discount_pct: dec!(0),
                        tax_pct: dec!(18),
                    }],
                    discount_pct: dec!(0),
                    freight_charges: dec!(0),
                    other_charges: dec!(0),
                },
            )
            .map_err(|e| TestCaseError::fail(e.to_string()))?;
        let total = invoice.totals.total;

        let mut paid = Decimal::ZERO;
        for (i, amount) in amounts.into_iter().enumerate() {
            let amount = Decimal::from(amount);
            let accepted = services
                .payments
                .record_payment(
                    &admin(),
                    NewPayment {
                        number: format!("PAY-{i:03}"),
                        target: PaymentTarget::Purchase {
                            invoice_id: invoice.id,
                            supplier_id: supplier,
                        },
                        amount,
                        method: PaymentMethod::Cash,
                        payment_date: date(2024, 6, 20),
                        reference_number: None,
                        bank_name: None,
                        notes: None,
                    },
                )
                .is_ok();
            if accepted {
                paid += amount;
            }

            let current = services
                .purchasing
                .get_purchase_invoice(&admin(), invoice.id)
                .map_err(|e| TestCaseError::fail(e.to_string()))?;
            prop_assert_eq!(current.paid_amount(), paid);
            prop_assert_eq!(current.balance_due(), total - paid);
            prop_assert_eq!(
                current.status == PurchaseInvoiceStatus::Paid,
                current.balance_due() <= Decimal::ZERO
            );
            let balance = services
                .catalog
                .get_supplier(&admin(), supplier)
                .map_err(|e| TestCaseError::fail(e.to_string()))?
                .current_balance();
            prop_assert_eq!(balance, total - paid);
        }
    }
}
