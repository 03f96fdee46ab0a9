//! Shared domain primitives: errors, typed ids, money math, document
//! numbers, and payment terms.

pub mod error;
pub mod id;
pub mod money;
pub mod number;
pub mod terms;

pub use error::{DomainError, DomainResult};
pub use id::{
    CustomerId, GrnId, InventoryLogId, PaymentId, ProductId, PurchaseInvoiceId, PurchaseOrderId,
    QuotationId, SalesInvoiceId, SalesOrderId, StockTxnId, SupplierId, UserId, WarehouseId,
};
pub use money::{round_money, percent_of, DocumentTotals, GstSplit, GstType, LineAmounts};
pub use number::DocumentNumber;
pub use terms::PaymentTerms;
