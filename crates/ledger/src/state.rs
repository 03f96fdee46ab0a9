//! The full in-memory ledger state.
//!
//! One value of this type is the whole world: catalog, parties, documents,
//! payments, and the inventory trail. It is cloned wholesale by the store to
//! stage a transaction, so every collection here must stay cheap to clone
//! relative to request rates.

use std::collections::HashMap;

use anvil_core::{
    CustomerId, DomainError, DomainResult, GrnId, PaymentId, ProductId, PurchaseInvoiceId,
    PurchaseOrderId, QuotationId, SalesInvoiceId, SalesOrderId, SupplierId,
};
use anvil_inventory::InventoryLog;
use anvil_parties::{B2BCustomer, Supplier};
use anvil_payments::Payment;
use anvil_products::Product;
use anvil_purchasing::{GoodsReceivedNote, GrnStatus, PurchaseInvoice, PurchaseOrder};
use anvil_sales::{SalesInvoice, SalesOrder, SalesQuotation};

macro_rules! document_collection {
    ($field:ident, $index:ident, $t:ty, $id:ty, $label:literal,
     $insert:ident, $get:ident, $get_mut:ident, $iter:ident) => {
        /// Insert, enforcing number uniqueness within this document type.
        pub fn $insert(&mut self, doc: $t) -> DomainResult<()> {
            let key = doc.number.as_str().to_string();
            if self.$index.contains_key(&key) {
                return Err(DomainError::duplicate(key));
            }
            self.$index.insert(key, doc.id);
            self.$field.insert(doc.id, doc);
            Ok(())
        }

        pub fn $get(&self, id: $id) -> DomainResult<&$t> {
            self.$field
                .get(&id)
                .ok_or_else(|| DomainError::not_found(format!("{} {id}", $label)))
        }

        pub fn $get_mut(&mut self, id: $id) -> DomainResult<&mut $t> {
            self.$field
                .get_mut(&id)
                .ok_or_else(|| DomainError::not_found(format!("{} {id}", $label)))
        }

        pub fn $iter(&self) -> impl Iterator<Item = &$t> {
            self.$field.values()
        }
    };
}

#[derive(Debug, Clone, Default)]
pub struct LedgerState {
    products: HashMap<ProductId, Product>,
    sku_index: HashMap<String, ProductId>,
    suppliers: HashMap<SupplierId, Supplier>,
    supplier_codes: HashMap<String, SupplierId>,
    customers: HashMap<CustomerId, B2BCustomer>,
    customer_codes: HashMap<String, CustomerId>,
    purchase_orders: HashMap<PurchaseOrderId, PurchaseOrder>,
    purchase_order_numbers: HashMap<String, PurchaseOrderId>,
    grns: HashMap<GrnId, GoodsReceivedNote>,
    grn_numbers: HashMap<String, GrnId>,
    purchase_invoices: HashMap<PurchaseInvoiceId, PurchaseInvoice>,
    purchase_invoice_numbers: HashMap<String, PurchaseInvoiceId>,
    quotations: HashMap<QuotationId, SalesQuotation>,
    quotation_numbers: HashMap<String, QuotationId>,
    sales_orders: HashMap<SalesOrderId, SalesOrder>,
    sales_order_numbers: HashMap<String, SalesOrderId>,
    sales_invoices: HashMap<SalesInvoiceId, SalesInvoice>,
    sales_invoice_numbers: HashMap<String, SalesInvoiceId>,
    payments: HashMap<PaymentId, Payment>,
    payment_numbers: HashMap<String, PaymentId>,
    inventory_log: Vec<InventoryLog>,
}

impl LedgerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_product(&mut self, product: Product) -> DomainResult<()> {
        let key = product.sku.as_str().to_string();
        if self.sku_index.contains_key(&key) {
            return Err(DomainError::duplicate(key));
        }
        self.sku_index.insert(key, product.id);
        self.products.insert(product.id, product);
        Ok(())
    }

    pub fn product(&self, id: ProductId) -> DomainResult<&Product> {
        self.products
            .get(&id)
            .ok_or_else(|| DomainError::not_found(format!("product {id}")))
    }

    pub fn product_mut(&mut self, id: ProductId) -> DomainResult<&mut Product> {
        self.products
            .get_mut(&id)
            .ok_or_else(|| DomainError::not_found(format!("product {id}")))
    }

    pub fn products(&self) -> impl Iterator<Item = &Product> {
        self.products.values()
    }

    pub fn insert_supplier(&mut self, supplier: Supplier) -> DomainResult<()> {
        let key = supplier.code.as_str().to_string();
        if self.supplier_codes.contains_key(&key) {
            return Err(DomainError::duplicate(key));
        }
        self.supplier_codes.insert(key, supplier.id);
        self.suppliers.insert(supplier.id, supplier);
        Ok(())
    }

    pub fn supplier(&self, id: SupplierId) -> DomainResult<&Supplier> {
        self.suppliers
            .get(&id)
            .ok_or_else(|| DomainError::not_found(format!("supplier {id}")))
    }

    pub fn supplier_mut(&mut self, id: SupplierId) -> DomainResult<&mut Supplier> {
        self.suppliers
            .get_mut(&id)
            .ok_or_else(|| DomainError::not_found(format!("supplier {id}")))
    }

    pub fn suppliers(&self) -> impl Iterator<Item = &Supplier> {
        self.suppliers.values()
    }

    pub fn insert_customer(&mut self, customer: B2BCustomer) -> DomainResult<()> {
        let key = customer.code.as_str().to_string();
        if self.customer_codes.contains_key(&key) {
            return Err(DomainError::duplicate(key));
        }
        self.customer_codes.insert(key, customer.id);
        self.customers.insert(customer.id, customer);
        Ok(())
    }

    pub fn customer(&self, id: CustomerId) -> DomainResult<&B2BCustomer> {
        self.customers
            .get(&id)
            .ok_or_else(|| DomainError::not_found(format!("customer {id}")))
    }

    pub fn customer_mut(&mut self, id: CustomerId) -> DomainResult<&mut B2BCustomer> {
        self.customers
            .get_mut(&id)
            .ok_or_else(|| DomainError::not_found(format!("customer {id}")))
    }

    pub fn customers(&self) -> impl Iterator<Item = &B2BCustomer> {
        self.customers.values()
    }

    document_collection!(
        purchase_orders,
        purchase_order_numbers,
        PurchaseOrder,
        PurchaseOrderId,
        "purchase order",
        insert_purchase_order,
        purchase_order,
        purchase_order_mut,
        purchase_orders_iter
    );

    document_collection!(
        grns,
        grn_numbers,
        GoodsReceivedNote,
        GrnId,
        "GRN",
        insert_grn,
        grn,
        grn_mut,
        grns_iter
    );

    document_collection!(
        purchase_invoices,
        purchase_invoice_numbers,
        PurchaseInvoice,
        PurchaseInvoiceId,
        "purchase invoice",
        insert_purchase_invoice,
        purchase_invoice,
        purchase_invoice_mut,
        purchase_invoices_iter
    );

    document_collection!(
        quotations,
        quotation_numbers,
        SalesQuotation,
        QuotationId,
        "quotation",
        insert_quotation,
        quotation,
        quotation_mut,
        quotations_iter
    );

    document_collection!(
        sales_orders,
        sales_order_numbers,
        SalesOrder,
        SalesOrderId,
        "sales order",
        insert_sales_order,
        sales_order,
        sales_order_mut,
        sales_orders_iter
    );

    document_collection!(
        sales_invoices,
        sales_invoice_numbers,
        SalesInvoice,
        SalesInvoiceId,
        "sales invoice",
        insert_sales_invoice,
        sales_invoice,
        sales_invoice_mut,
        sales_invoices_iter
    );

    document_collection!(
        payments,
        payment_numbers,
        Payment,
        PaymentId,
        "payment",
        insert_payment,
        payment,
        payment_mut,
        payments_iter
    );

    /// Append-only: rows go in, nothing comes back out.
    pub fn append_log(&mut self, row: InventoryLog) {
        self.inventory_log.push(row);
    }

    pub fn inventory_log(&self) -> &[InventoryLog] {
        &self.inventory_log
    }

    /// Completed GRNs booked against a purchase order.
    pub fn completed_grns_for_po(
        &self,
        po_id: PurchaseOrderId,
    ) -> impl Iterator<Item = &GoodsReceivedNote> {
        self.grns
            .values()
            .filter(move |g| g.po_id == Some(po_id) && g.status == GrnStatus::Completed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anvil_products::NewProduct;
    use chrono::Utc;
    use rust_decimal_macros::dec;

    fn product(sku: &str) -> Product {
        Product::register(
            NewProduct {
                sku: sku.to_string(),
                name: "Widget".to_string(),
                opening_stock: 0,
                price: dec!(10),
                cost_price: dec!(7),
                low_stock_threshold: 0,
                unit: "pcs".to_string(),
            },
            Utc::now(),
        )
        .unwrap()
    }

    #[test]
    fn duplicate_sku_is_rejected() {
        let mut state = LedgerState::new();
        state.insert_product(product("W-1")).unwrap();
        let err = state.insert_product(product("w-1")).unwrap_err();
        assert_eq!(err, DomainError::DuplicateNumber("W-1".to_string()));
    }

    #[test]
    fn missing_entities_are_not_found() {
        let state = LedgerState::new();
        assert!(matches!(
            state.product(ProductId::new()),
            Err(DomainError::NotFound(_))
        ));
        assert!(matches!(
            state.purchase_order(PurchaseOrderId::new()),
            Err(DomainError::NotFound(_))
        ));
    }
}
