//! Shared fixtures for ledger integration tests.
#![allow(dead_code)]

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use anvil_auth::{Actor, Role};
use anvil_core::{CustomerId, ProductId, SupplierId, UserId};
use anvil_ledger::LedgerServices;
use anvil_parties::{CustomerType, NewCustomer, NewSupplier};
use anvil_products::NewProduct;

pub fn admin() -> Actor {
    Actor::new(UserId::new(), Role::new("admin"))
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn seed_product(services: &LedgerServices, sku: &str, stock: i64) -> ProductId {
    services
        .catalog
        .create_product(
            &admin(),
            NewProduct {
                sku: sku.to_string(),
                name: format!("Product {sku}"),
                opening_stock: stock,
                price: dec!(100),
                cost_price: dec!(60),
                low_stock_threshold: 0,
                unit: "pcs".to_string(),
            },
        )
        .unwrap()
        .id
}

pub fn seed_supplier(services: &LedgerServices, code: &str) -> SupplierId {
    seed_supplier_with_balance(services, code, Decimal::ZERO)
}

pub fn seed_supplier_with_balance(
    services: &LedgerServices,
    code: &str,
    opening_balance: Decimal,
) -> SupplierId {
    services
        .catalog
        .create_supplier(
            &admin(),
            NewSupplier {
                code: code.to_string(),
                name: format!("Supplier {code}"),
                gst_number: None,
                payment_terms: Default::default(),
                credit_limit: Decimal::ZERO,
                opening_balance,
            },
        )
        .unwrap()
        .id
}

pub fn seed_customer(services: &LedgerServices, code: &str) -> CustomerId {
    services
        .catalog
        .create_customer(
            &admin(),
            NewCustomer {
                code: code.to_string(),
                name: format!("Customer {code}"),
                customer_type: CustomerType::Wholesale,
                gst_number: None,
                payment_terms: Default::default(),
                credit_limit: Decimal::ZERO,
                opening_balance: Decimal::ZERO,
            },
        )
        .unwrap()
        .id
}
