use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    routing::{get, post},
    Json, Router,
};

use anvil_auth::Actor;
use anvil_core::ProductId;
use anvil_ledger::LedgerServices;
use anvil_products::NewProduct;

use crate::app::routes::common::{created, ok};

pub fn router() -> Router {
    Router::new()
        .route("/", post(create_product).get(list_products))
        .route("/:id", get(get_product))
}

pub async fn create_product(
    Extension(services): Extension<Arc<LedgerServices>>,
    Extension(actor): Extension<Actor>,
    Json(body): Json<NewProduct>,
) -> axum::response::Response {
    created(services.catalog.create_product(&actor, body))
}

pub async fn list_products(
    Extension(services): Extension<Arc<LedgerServices>>,
    Extension(actor): Extension<Actor>,
) -> axum::response::Response {
    ok(services.catalog.list_products(&actor))
}

pub async fn get_product(
    Extension(services): Extension<Arc<LedgerServices>>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<ProductId>,
) -> axum::response::Response {
    ok(services.catalog.get_product(&actor, id))
}
