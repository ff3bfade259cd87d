use std::sync::Arc;

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, header, request::Parts},
    middleware::Next,
    response::Response,
};
use schoolmis_core::AppError;
use schoolmis_db::{DocumentStore, StoreSource};

use crate::metrics::track_store_selection;
use crate::state::AppState;

/// The token from an `Authorization: Bearer <token>` header.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Rejects requests that do not carry one of the two known tokens.
///
/// This is a plain equality check. Tokens carry no identity or expiry.
pub async fn require_token(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = bearer_token(req.headers())
        .ok_or_else(|| AppError::unauthorized("No token provided"))?;

    if !state.auth_config.accepts(token) {
        return Err(AppError::unauthorized("Invalid token"));
    }

    Ok(next.run(req).await)
}

/// The store chosen for this request. Handlers take this once and use it
/// for every operation they perform.
#[derive(Debug, Clone)]
pub struct ActiveStore(pub Arc<dyn DocumentStore>);

impl ActiveStore {
    pub fn source(&self) -> StoreSource {
        self.0.source()
    }
}

impl FromRequestParts<AppState> for ActiveStore {
    type Rejection = AppError;

    async fn from_request_parts(
        _parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let store = state.stores.select().await;
        track_store_selection(store.source(), state.stores.has_primary());
        Ok(ActiveStore(store))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_bearer_token_parsing() {
        assert_eq!(bearer_token(&headers("Bearer demo-jwt-token")), Some("demo-jwt-token"));
        assert_eq!(bearer_token(&headers("Basic YWRtaW46YWRtaW4=")), None);
        assert_eq!(bearer_token(&headers("Bearer ")), None);
        assert_eq!(bearer_token(&HeaderMap::new()), None);
    }
}
