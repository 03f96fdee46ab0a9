//! Sales domain module: quotations, orders, and invoices.
//!
//! Pure business rules only; stock and balance wiring lives in the ledger
//! crate.

pub mod invoice;
pub mod order;
pub mod quotation;

pub use invoice::{
    NewSalesInvoice, SalesInvoice, SalesInvoiceItem, SalesInvoiceLineInput, SalesInvoiceStatus,
};
pub use order::{NewSalesOrder, SalesLineInput, SalesOrder, SalesOrderItem, SalesOrderStatus};
pub use quotation::{
    NewQuotation, QuotationItem, QuotationLineInput, QuotationStatus, SalesQuotation,
};
