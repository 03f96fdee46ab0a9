use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    routing::{get, post},
    Json, Router,
};

use anvil_auth::Actor;
use anvil_core::CustomerId;
use anvil_ledger::LedgerServices;
use anvil_parties::NewCustomer;

use crate::app::routes::common::{created, ok};

pub fn router() -> Router {
    Router::new()
        .route("/", post(create_customer).get(list_customers))
        .route("/:id", get(get_customer))
}

pub async fn create_customer(
    Extension(services): Extension<Arc<LedgerServices>>,
    Extension(actor): Extension<Actor>,
    Json(body): Json<NewCustomer>,
) -> axum::response::Response {
    created(services.catalog.create_customer(&actor, body))
}

pub async fn list_customers(
    Extension(services): Extension<Arc<LedgerServices>>,
    Extension(actor): Extension<Actor>,
) -> axum::response::Response {
    ok(services.catalog.list_customers(&actor))
}

pub async fn get_customer(
    Extension(services): Extension<Arc<LedgerServices>>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<CustomerId>,
) -> axum::response::Response {
    ok(services.catalog.get_customer(&actor, id))
}
