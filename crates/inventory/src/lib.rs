//! Inventory domain module: the audit trail row type and its metadata.

pub mod log;

pub use log::{InventoryLog, StockContext, StockSource, TransactionType};
