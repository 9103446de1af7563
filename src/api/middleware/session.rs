//! Session identification from request headers

use axum::{
    extract::FromRequestParts,
    http::{request::Parts, HeaderMap},
};
use tracing::debug;

use crate::api::types::ApiError;
use crate::domain::SessionId;

/// Header naming the client session
pub const SESSION_HEADER: &str = "x-session-id";

/// Extractor for the caller's session
///
/// Reads `X-Session-Id`; requests without it share the default session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionKey(pub SessionId);

impl<S> FromRequestParts<S> for SessionKey
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let session = session_from_headers(&parts.headers)?;
        debug!(session = %session, "Resolved session");
        Ok(SessionKey(session))
    }
}

fn session_from_headers(headers: &HeaderMap) -> Result<SessionId, ApiError> {
    let Some(value) = headers.get(SESSION_HEADER) else {
        return Ok(SessionId::default());
    };

    let value = value
        .to_str()
        .map_err(|_| ApiError::bad_request("Invalid X-Session-Id header encoding"))?;

    SessionId::new(value.trim()).map_err(ApiError::from)
}
