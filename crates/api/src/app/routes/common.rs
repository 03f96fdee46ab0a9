use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use anvil_core::DomainResult;

use crate::app::errors;

/// Map a service result to JSON, with domain errors translated uniformly.
pub fn respond<T: Serialize>(status: StatusCode, result: DomainResult<T>) -> axum::response::Response {
    match result {
        Ok(value) => (status, Json(value)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub fn ok<T: Serialize>(result: DomainResult<T>) -> axum::response::Response {
    respond(StatusCode::OK, result)
}

pub fn created<T: Serialize>(result: DomainResult<T>) -> axum::response::Response {
    respond(StatusCode::CREATED, result)
}
