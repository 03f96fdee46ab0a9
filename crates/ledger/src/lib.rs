//! `anvil-ledger` — the transactional heart of the system.
//!
//! Owns the ledger state, the stock/balance adjustment engines, and the
//! permission-gated document services. Everything that moves stock or money
//! goes through here, inside one all-or-nothing unit of work.

pub mod engine;
pub mod services;
pub mod state;
pub mod store;

pub use engine::{BalanceAdjustmentEngine, StockAdjustmentEngine};
pub use services::{
    BulkEntry, BulkEntryDirection, BulkEntryLine, CatalogService, InventoryService,
    LedgerServices, PaymentService, PurchasingService, Reconciliation, SalesService,
    StockAdjustment,
};
pub use state::LedgerState;
pub use store::LedgerStore;
