use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    routing::{get, post},
    Json, Router,
};

use anvil_auth::Actor;
use anvil_core::SupplierId;
use anvil_ledger::LedgerServices;
use anvil_parties::NewSupplier;

use crate::app::routes::common::{created, ok};

pub fn router() -> Router {
    Router::new()
        .route("/", post(create_supplier).get(list_suppliers))
        .route("/:id", get(get_supplier))
}

pub async fn create_supplier(
    Extension(services): Extension<Arc<LedgerServices>>,
    Extension(actor): Extension<Actor>,
    Json(body): Json<NewSupplier>,
) -> axum::response::Response {
    created(services.catalog.create_supplier(&actor, body))
}

pub async fn list_suppliers(
    Extension(services): Extension<Arc<LedgerServices>>,
    Extension(actor): Extension<Actor>,
) -> axum::response::Response {
    ok(services.catalog.list_suppliers(&actor))
}

pub async fn get_supplier(
    Extension(services): Extension<Arc<LedgerServices>>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<SupplierId>,
) -> axum::response::Response {
    ok(services.catalog.get_supplier(&actor, id))
}
