use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;

use anvil_auth::Actor;
use anvil_core::ProductId;
use anvil_ledger::{BulkEntry, LedgerServices, StockAdjustment};

use crate::app::routes::common::{created, ok};

pub fn router() -> Router {
    Router::new()
        .route("/adjustments", post(adjust_stock))
        .route("/bulk-entries", post(record_bulk_entry))
        .route("/logs", get(inventory_logs))
        .route("/reconcile/:product_id", get(reconcile_product))
}

#[derive(Debug, Deserialize)]
pub struct LogsQuery {
    pub product_id: Option<ProductId>,
}

pub async fn adjust_stock(
    Extension(services): Extension<Arc<LedgerServices>>,
    Extension(actor): Extension<Actor>,
    Json(body): Json<StockAdjustment>,
) -> axum::response::Response {
    ok(services.inventory.adjust_stock(&actor, body))
}

pub async fn record_bulk_entry(
    Extension(services): Extension<Arc<LedgerServices>>,
    Extension(actor): Extension<Actor>,
    Json(body): Json<BulkEntry>,
) -> axum::response::Response {
    created(services.inventory.record_bulk_entry(&actor, body))
}

pub async fn inventory_logs(
    Extension(services): Extension<Arc<LedgerServices>>,
    Extension(actor): Extension<Actor>,
    Query(query): Query<LogsQuery>,
) -> axum::response::Response {
    ok(services.inventory.inventory_logs(&actor, query.product_id))
}

pub async fn reconcile_product(
    Extension(services): Extension<Arc<LedgerServices>>,
    Extension(actor): Extension<Actor>,
    Path(product_id): Path<ProductId>,
) -> axum::response::Response {
    ok(services.inventory.reconcile_product(&actor, product_id))
}
