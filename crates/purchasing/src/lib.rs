//! Purchasing domain module: purchase orders, goods receipts, and purchase
//! invoices with their state machines and derived totals.
//!
//! Pure business rules only; the transactional wiring (stock, balances,
//! uniqueness) lives in the ledger crate.

pub mod grn;
pub mod invoice;
pub mod order;

pub use grn::{GoodsReceivedNote, GrnItem, GrnLineInput, GrnStatus, NewGrn};
pub use invoice::{
    InvoiceLineInput, NewPurchaseInvoice, PurchaseInvoice, PurchaseInvoiceItem,
    PurchaseInvoiceStatus,
};
pub use order::{
    NewPurchaseOrder, OrderLineInput, PurchaseOrder, PurchaseOrderItem, PurchaseOrderStatus,
};
