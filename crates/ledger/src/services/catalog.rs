//! Product and party registration.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use anvil_auth::{Actor, Permission, PermissionGate};
use anvil_core::{CustomerId, DomainError, DomainResult, ProductId, SupplierId};
use anvil_inventory::{StockContext, StockSource, TransactionType};
use anvil_parties::{B2BCustomer, NewCustomer, NewSupplier, Supplier};
use anvil_products::{NewProduct, Product};

use crate::engine::StockAdjustmentEngine;
use crate::store::LedgerStore;

#[derive(Clone)]
pub struct CatalogService {
    store: Arc<LedgerStore>,
    gate: Arc<PermissionGate>,
}

impl CatalogService {
    pub fn new(store: Arc<LedgerStore>, gate: Arc<PermissionGate>) -> Self {
        Self { store, gate }
    }

    /// Register a product. Opening stock is booked as a manual inventory
    /// movement so replaying the trail from zero reproduces current stock.
    pub fn create_product(&self, actor: &Actor, mut input: NewProduct) -> DomainResult<Product> {
        self.gate.authorize(actor, &Permission::scoped("products", "manage"))?;
        if input.opening_stock < 0 {
            return Err(DomainError::validation("opening stock cannot be negative"));
        }
        let opening_stock = std::mem::take(&mut input.opening_stock);
        let actor_id = actor.id;
        let now = Utc::now();
        let product = self.store.transaction(move |state| {
            let product = Product::register(input, now)?;
            let id = product.id;
            state.insert_product(product)?;
            if opening_stock > 0 {
                StockAdjustmentEngine::adjust(
                    state,
                    id,
                    opening_stock,
                    TransactionType::Manual,
                    None,
                    StockContext::new(StockSource::ManualAdjustment).with_reason("opening stock"),
                    None,
                    actor_id,
                    now,
                )?;
            }
            state.product(id).cloned()
        })?;
        info!(sku = %product.sku, stock = product.stock(), "product registered");
        Ok(product)
    }

    pub fn create_supplier(&self, actor: &Actor, input: NewSupplier) -> DomainResult<Supplier> {
        self.gate.authorize(actor, &Permission::scoped("suppliers", "manage"))?;
        let now = Utc::now();
        let supplier = self.store.transaction(move |state| {
            let supplier = Supplier::register(input, now)?;
            let id = supplier.id;
            state.insert_supplier(supplier)?;
            state.supplier(id).cloned()
        })?;
        info!(code = %supplier.code, "supplier registered");
        Ok(supplier)
    }

    pub fn create_customer(&self, actor: &Actor, input: NewCustomer) -> DomainResult<B2BCustomer> {
        self.gate.authorize(actor, &Permission::scoped("customers", "manage"))?;
        let now = Utc::now();
        let customer = self.store.transaction(move |state| {
            let customer = B2BCustomer::register(input, now)?;
            let id = customer.id;
            state.insert_customer(customer)?;
            state.customer(id).cloned()
        })?;
        info!(code = %customer.code, "customer registered");
        Ok(customer)
    }

    pub fn get_product(&self, actor: &Actor, id: ProductId) -> DomainResult<Product> {
        self.gate.authorize(actor, &Permission::scoped("products", "view"))?;
        self.store.read(|state| state.product(id).cloned())
    }

    pub fn list_products(&self, actor: &Actor) -> DomainResult<Vec<Product>> {
        self.gate.authorize(actor, &Permission::scoped("products", "view"))?;
        Ok(self.store.read(|state| state.products().cloned().collect()))
    }

    pub fn get_supplier(&self, actor: &Actor, id: SupplierId) -> DomainResult<Supplier> {
        self.gate.authorize(actor, &Permission::scoped("suppliers", "view"))?;
        self.store.read(|state| state.supplier(id).cloned())
    }

    pub fn list_suppliers(&self, actor: &Actor) -> DomainResult<Vec<Supplier>> {
        self.gate.authorize(actor, &Permission::scoped("suppliers", "view"))?;
        Ok(self.store.read(|state| state.suppliers().cloned().collect()))
    }

    pub fn get_customer(&self, actor: &Actor, id: CustomerId) -> DomainResult<B2BCustomer> {
        self.gate.authorize(actor, &Permission::scoped("customers", "view"))?;
        self.store.read(|state| state.customer(id).cloned())
    }

    pub fn list_customers(&self, actor: &Actor) -> DomainResult<Vec<B2BCustomer>> {
        self.gate.authorize(actor, &Permission::scoped("customers", "view"))?;
        Ok(self.store.read(|state| state.customers().cloned().collect()))
    }
}
