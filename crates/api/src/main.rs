use std::sync::Arc;

use anvil_ledger::LedgerServices;

#[tokio::main]
async fn main() {
    anvil_observability::init();

    let services = Arc::new(LedgerServices::standard());
    let app = anvil_api::app::build_app(services);

    let addr = std::env::var("ANVIL_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind listener");

    tracing::info!("listening on {}", listener.local_addr().unwrap());

    axum::serve(listener, app).await.unwrap();
}
