use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    routing::{get, post},
    Json, Router,
};

use anvil_auth::Actor;
use anvil_core::PaymentId;
use anvil_ledger::LedgerServices;
use anvil_payments::NewPayment;

use crate::app::routes::common::{created, ok};

pub fn router() -> Router {
    Router::new()
        .route("/", post(record_payment).get(list_payments))
        .route("/:id", get(get_payment))
}

pub async fn record_payment(
    Extension(services): Extension<Arc<LedgerServices>>,
    Extension(actor): Extension<Actor>,
    Json(body): Json<NewPayment>,
) -> axum::response::Response {
    created(services.payments.record_payment(&actor, body))
}

pub async fn list_payments(
    Extension(services): Extension<Arc<LedgerServices>>,
    Extension(actor): Extension<Actor>,
) -> axum::response::Response {
    ok(services.payments.list_payments(&actor))
}

pub async fn get_payment(
    Extension(services): Extension<Arc<LedgerServices>>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<PaymentId>,
) -> axum::response::Response {
    ok(services.payments.get_payment(&actor, id))
}
