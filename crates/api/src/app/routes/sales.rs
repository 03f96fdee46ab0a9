use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    routing::{get, post},
    Json, Router,
};

use anvil_auth::Actor;
use anvil_core::{QuotationId, SalesInvoiceId, SalesOrderId};
use anvil_ledger::LedgerServices;
use anvil_sales::{NewQuotation, NewSalesInvoice, NewSalesOrder};

use crate::app::routes::common::{created, ok};

pub fn router() -> Router {
    Router::new()
        .route("/quotations", post(create_quotation).get(list_quotations))
        .route("/quotations/:id", get(get_quotation))
        .route("/quotations/:id/send", post(send_quotation))
        .route("/quotations/:id/accept", post(accept_quotation))
        .route("/quotations/:id/reject", post(reject_quotation))
        .route("/quotations/:id/expire", post(expire_quotation))
        .route("/orders", post(create_order).get(list_orders))
        .route("/orders/:id", get(get_order))
        .route("/orders/:id/approve", post(approve_order))
        .route("/orders/:id/partially-deliver", post(partially_deliver_order))
        .route("/orders/:id/deliver", post(deliver_order))
        .route("/orders/:id/cancel", post(cancel_order))
        .route("/invoices", post(create_invoice).get(list_invoices))
        .route("/invoices/:id", get(get_invoice))
        .route("/invoices/:id/void", post(void_invoice))
}

pub async fn create_quotation(
    Extension(services): Extension<Arc<LedgerServices>>,
    Extension(actor): Extension<Actor>,
    Json(body): Json<NewQuotation>,
) -> axum::response::Response {
    created(services.sales.create_quotation(&actor, body))
}

pub async fn list_quotations(
    Extension(services): Extension<Arc<LedgerServices>>,
    Extension(actor): Extension<Actor>,
) -> axum::response::Response {
    ok(services.sales.list_quotations(&actor))
}

pub async fn get_quotation(
    Extension(services): Extension<Arc<LedgerServices>>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<QuotationId>,
) -> axum::response::Response {
    ok(services.sales.get_quotation(&actor, id))
}

pub async fn send_quotation(
    Extension(services): Extension<Arc<LedgerServices>>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<QuotationId>,
) -> axum::response::Response {
    ok(services.sales.send_quotation(&actor, id))
}

pub async fn accept_quotation(
    Extension(services): Extension<Arc<LedgerServices>>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<QuotationId>,
) -> axum::response::Response {
    ok(services.sales.accept_quotation(&actor, id))
}

pub async fn reject_quotation(
    Extension(services): Extension<Arc<LedgerServices>>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<QuotationId>,
) -> axum::response::Response {
    ok(services.sales.reject_quotation(&actor, id))
}

pub async fn expire_quotation(
    Extension(services): Extension<Arc<LedgerServices>>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<QuotationId>,
) -> axum::response::Response {
    ok(services.sales.expire_quotation(&actor, id))
}

pub async fn create_order(
    Extension(services): Extension<Arc<LedgerServices>>,
    Extension(actor): Extension<Actor>,
    Json(body): Json<NewSalesOrder>,
) -> axum::response::Response {
    created(services.sales.create_sales_order(&actor, body))
}

pub async fn list_orders(
    Extension(services): Extension<Arc<LedgerServices>>,
    Extension(actor): Extension<Actor>,
) -> axum::response::Response {
    ok(services.sales.list_sales_orders(&actor))
}

pub async fn get_order(
    Extension(services): Extension<Arc<LedgerServices>>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<SalesOrderId>,
) -> axum::response::Response {
    ok(services.sales.get_sales_order(&actor, id))
}

pub async fn approve_order(
    Extension(services): Extension<Arc<LedgerServices>>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<SalesOrderId>,
) -> axum::response::Response {
    ok(services.sales.approve_sales_order(&actor, id))
}

pub async fn partially_deliver_order(
    Extension(services): Extension<Arc<LedgerServices>>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<SalesOrderId>,
) -> axum::response::Response {
    ok(services.sales.mark_sales_order_partially_delivered(&actor, id))
}

pub async fn deliver_order(
    Extension(services): Extension<Arc<LedgerServices>>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<SalesOrderId>,
) -> axum::response::Response {
    ok(services.sales.mark_sales_order_delivered(&actor, id))
}

pub async fn cancel_order(
    Extension(services): Extension<Arc<LedgerServices>>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<SalesOrderId>,
) -> axum::response::Response {
    ok(services.sales.cancel_sales_order(&actor, id))
}

pub async fn create_invoice(
    Extension(services): Extension<Arc<LedgerServices>>,
    Extension(actor): Extension<Actor>,
    Json(body): Json<NewSalesInvoice>,
) -> axum::response::Response {
    created(services.sales.create_sales_invoice(&actor, body))
}

pub async fn list_invoices(
    Extension(services): Extension<Arc<LedgerServices>>,
    Extension(actor): Extension<Actor>,
) -> axum::response::Response {
    ok(services.sales.list_sales_invoices(&actor))
}

pub async fn get_invoice(
    Extension(services): Extension<Arc<LedgerServices>>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<SalesInvoiceId>,
) -> axum::response::Response {
    ok(services.sales.get_sales_invoice(&actor, id))
}

pub async fn void_invoice(
    Extension(services): Extension<Arc<LedgerServices>>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<SalesInvoiceId>,
) -> axum::response::Response {
    ok(services.sales.void_sales_invoice(&actor, id))
}
