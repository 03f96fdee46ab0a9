//! Permission-gated document services.
//!
//! Each service authorizes the actor, then runs its whole unit of work in
//! one store transaction: entity validation, state-machine transitions, and
//! every stock/balance engine call commit or roll back together.

mod catalog;
mod inventory;
mod payments;
mod purchasing;
mod sales;

pub use catalog::CatalogService;
pub use inventory::{BulkEntry, BulkEntryDirection, BulkEntryLine, InventoryService, Reconciliation, StockAdjustment};
pub use payments::PaymentService;
pub use purchasing::PurchasingService;
pub use sales::SalesService;

use std::sync::Arc;

use anvil_auth::PermissionGate;

use crate::store::LedgerStore;

/// All services wired over one shared store and gate.
#[derive(Clone)]
pub struct LedgerServices {
    pub catalog: CatalogService,
    pub purchasing: PurchasingService,
    pub sales: SalesService,
    pub payments: PaymentService,
    pub inventory: InventoryService,
}

impl LedgerServices {
    pub fn new(store: Arc<LedgerStore>, gate: Arc<PermissionGate>) -> Self {
        Self {
            catalog: CatalogService::new(store.clone(), gate.clone()),
            purchasing: PurchasingService::new(store.clone(), gate.clone()),
            sales: SalesService::new(store.clone(), gate.clone()),
            payments: PaymentService::new(store.clone(), gate.clone()),
            inventory: InventoryService::new(store, gate),
        }
    }

    /// Fresh empty ledger with the standard permission policy.
    pub fn standard() -> Self {
        Self::new(Arc::new(LedgerStore::new()), Arc::new(PermissionGate::standard()))
    }
}
