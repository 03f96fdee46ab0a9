use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    routing::{get, post},
    Json, Router,
};

use anvil_auth::Actor;
use anvil_core::{GrnId, PurchaseInvoiceId, PurchaseOrderId};
use anvil_ledger::LedgerServices;
use anvil_purchasing::{NewGrn, NewPurchaseInvoice, NewPurchaseOrder};

use crate::app::routes::common::{created, ok};

pub fn router() -> Router {
    Router::new()
        .route("/orders", post(create_order).get(list_orders))
        .route("/orders/:id", get(get_order))
        .route("/orders/:id/submit", post(submit_order))
        .route("/orders/:id/approve", post(approve_order))
        .route("/orders/:id/cancel", post(cancel_order))
        .route("/grns", post(create_grn).get(list_grns))
        .route("/grns/:id", get(get_grn))
        .route("/grns/:id/cancel", post(cancel_grn))
        .route("/invoices", post(create_invoice).get(list_invoices))
        .route("/invoices/:id", get(get_invoice))
        .route("/invoices/:id/cancel", post(cancel_invoice))
}

pub async fn create_order(
    Extension(services): Extension<Arc<LedgerServices>>,
    Extension(actor): Extension<Actor>,
    Json(body): Json<NewPurchaseOrder>,
) -> axum::response::Response {
    created(services.purchasing.create_purchase_order(&actor, body))
}

pub async fn list_orders(
    Extension(services): Extension<Arc<LedgerServices>>,
    Extension(actor): Extension<Actor>,
) -> axum::response::Response {
    ok(services.purchasing.list_purchase_orders(&actor))
}

pub async fn get_order(
    Extension(services): Extension<Arc<LedgerServices>>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<PurchaseOrderId>,
) -> axum::response::Response {
    ok(services.purchasing.get_purchase_order(&actor, id))
}

pub async fn submit_order(
    Extension(services): Extension<Arc<LedgerServices>>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<PurchaseOrderId>,
) -> axum::response::Response {
    ok(services.purchasing.submit_purchase_order(&actor, id))
}

pub async fn approve_order(
    Extension(services): Extension<Arc<LedgerServices>>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<PurchaseOrderId>,
) -> axum::response::Response {
    ok(services.purchasing.approve_purchase_order(&actor, id))
}

pub async fn cancel_order(
    Extension(services): Extension<Arc<LedgerServices>>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<PurchaseOrderId>,
) -> axum::response::Response {
    ok(services.purchasing.cancel_purchase_order(&actor, id))
}

pub async fn create_grn(
    Extension(services): Extension<Arc<LedgerServices>>,
    Extension(actor): Extension<Actor>,
    Json(body): Json<NewGrn>,
) -> axum::response::Response {
    created(services.purchasing.create_grn(&actor, body))
}

pub async fn list_grns(
    Extension(services): Extension<Arc<LedgerServices>>,
    Extension(actor): Extension<Actor>,
) -> axum::response::Response {
    ok(services.purchasing.list_grns(&actor))
}

pub async fn get_grn(
    Extension(services): Extension<Arc<LedgerServices>>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<GrnId>,
) -> axum::response::Response {
    ok(services.purchasing.get_grn(&actor, id))
}

pub async fn cancel_grn(
    Extension(services): Extension<Arc<LedgerServices>>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<GrnId>,
) -> axum::response::Response {
    ok(services.purchasing.cancel_grn(&actor, id))
}

pub async fn create_invoice(
    Extension(services): Extension<Arc<LedgerServices>>,
    Extension(actor): Extension<Actor>,
    Json(body): Json<NewPurchaseInvoice>,
) -> axum::response::Response {
    created(services.purchasing.create_purchase_invoice(&actor, body))
}

pub async fn list_invoices(
    Extension(services): Extension<Arc<LedgerServices>>,
    Extension(actor): Extension<Actor>,
) -> axum::response::Response {
    ok(services.purchasing.list_purchase_invoices(&actor))
}

pub async fn get_invoice(
    Extension(services): Extension<Arc<LedgerServices>>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<PurchaseInvoiceId>,
) -> axum::response::Response {
    ok(services.purchasing.get_purchase_invoice(&actor, id))
}

pub async fn cancel_invoice(
    Extension(services): Extension<Arc<LedgerServices>>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<PurchaseInvoiceId>,
) -> axum::response::Response {
    ok(services.purchasing.cancel_purchase_invoice(&actor, id))
}
