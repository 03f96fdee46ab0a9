use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use anvil_core::DomainError;

pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    match err {
        DomainError::Validation(msg) => json_error(StatusCode::BAD_REQUEST, "validation_error", msg),
        DomainError::DuplicateNumber(number) => json_error(
            StatusCode::CONFLICT,
            "duplicate_number",
            format!("number already exists: {number}"),
        ),
        DomainError::NotFound(what) => json_error(StatusCode::NOT_FOUND, "not_found", what),
        e @ DomainError::InsufficientStock { .. } => {
            json_error(StatusCode::UNPROCESSABLE_ENTITY, "insufficient_stock", e.to_string())
        }
        DomainError::InvalidTransition(msg) => {
            json_error(StatusCode::UNPROCESSABLE_ENTITY, "invalid_transition", msg)
        }
        DomainError::PermissionDenied(permission) => json_error(
            StatusCode::FORBIDDEN,
            "forbidden",
            format!("missing permission '{permission}'"),
        ),
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_domain_errors_to_status_codes() {
        let cases = [
            (DomainError::validation("bad"), StatusCode::BAD_REQUEST),
            (DomainError::duplicate("GRN-001"), StatusCode::CONFLICT),
            (DomainError::not_found("product"), StatusCode::NOT_FOUND),
            (DomainError::insufficient_stock("P-1", 10, 8), StatusCode::UNPROCESSABLE_ENTITY),
            (DomainError::invalid_transition("nope"), StatusCode::UNPROCESSABLE_ENTITY),
            (DomainError::permission_denied("grn:manage"), StatusCode::FORBIDDEN),
        ];
        for (err, status) in cases {
            assert_eq!(domain_error_to_response(err).status(), status);
        }
    }
}
