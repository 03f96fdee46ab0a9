use axum::Router;

pub mod common;
pub mod customers;
pub mod inventory;
pub mod payments;
pub mod products;
pub mod purchases;
pub mod sales;
pub mod suppliers;
pub mod system;

/// Router for all actor-scoped endpoints.
pub fn router() -> Router {
    Router::new()
        .nest("/products", products::router())
        .nest("/suppliers", suppliers::router())
        .nest("/customers", customers::router())
        .nest("/inventory", inventory::router())
        .nest("/purchases", purchases::router())
        .nest("/sales", sales::router())
        .nest("/payments", payments::router())
}
