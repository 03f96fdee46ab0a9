//! Actor extraction.
//!
//! Callers identify themselves through `x-actor-id`, `x-actor-role`, and an
//! optional comma-separated `x-actor-permissions`. Authentication proper is
//! expected to sit in front of this service; the gate in the ledger layer
//! makes the actual authorization decisions.

use axum::{
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
};

use anvil_auth::{Actor, Permission, Role};
use anvil_core::UserId;

pub async fn actor_middleware(
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Result<Response, StatusCode> {
    let actor = extract_actor(req.headers())?;
    req.extensions_mut().insert(actor);
    Ok(next.run(req).await)
}

fn extract_actor(headers: &HeaderMap) -> Result<Actor, StatusCode> {
    let id: UserId = header_str(headers, "x-actor-id")?
        .parse()
        .map_err(|_| StatusCode::UNAUTHORIZED)?;
    let role = Role::new(header_str(headers, "x-actor-role")?.to_string());

    let mut actor = Actor::new(id, role);
    if let Some(grants) = headers.get("x-actor-permissions") {
        let grants = grants.to_str().map_err(|_| StatusCode::UNAUTHORIZED)?;
        let permissions = grants
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| Permission::new(s.to_string()))
            .collect();
        actor = actor.with_permissions(permissions);
    }
    Ok(actor)
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Result<&'a str, StatusCode> {
    headers
        .get(name)
        .ok_or(StatusCode::UNAUTHORIZED)?
        .to_str()
        .map_err(|_| StatusCode::UNAUTHORIZED)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_actor_with_explicit_grants() {
        let mut headers = HeaderMap::new();
        headers.insert("x-actor-id", UserId::new().to_string().parse().unwrap());
        headers.insert("x-actor-role", "accountant".parse().unwrap());
        headers.insert("x-actor-permissions", "payments:manage, inventory:view".parse().unwrap());

        let actor = extract_actor(&headers).unwrap();
        assert_eq!(actor.role, Role::new("accountant"));
        assert_eq!(actor.permissions.len(), 2);
        assert_eq!(actor.permissions[0], Permission::new("payments:manage"));
    }

    #[test]
    fn missing_or_malformed_identity_is_unauthorized() {
        let headers = HeaderMap::new();
        assert_eq!(extract_actor(&headers).unwrap_err(), StatusCode::UNAUTHORIZED);

        let mut headers = HeaderMap::new();
        headers.insert("x-actor-id", "not-a-uuid".parse().unwrap());
        headers.insert("x-actor-role", "admin".parse().unwrap());
        assert_eq!(extract_actor(&headers).unwrap_err(), StatusCode::UNAUTHORIZED);
    }
}
