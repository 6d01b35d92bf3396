//! Caller identity: bearer token → [`Caller`] request extension.
//!
//! Verifying tokens is delegated to a [`TokenValidator`]. Requests without a
//! token pass through anonymously; handlers of owner-scoped routes reject
//! them with 401 via [`owner_for`].

use std::collections::HashMap;
use std::convert::Infallible;
use std::sync::Arc;

use async_trait::async_trait;
use axum::extract::{FromRequestParts, Request, State};
use axum::http::{HeaderMap, header, request::Parts};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use super::problem::{ErrorCode, Problem};
use crate::domain::resource::Resource;

/// Authenticated caller; the value is the user id that owns scoped rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller(pub String);

/// Turns a bearer token into a user id.
#[async_trait]
pub trait TokenValidator: Send + Sync {
    /// Returns `None` when the token is not recognised.
    async fn validate(&self, token: &str) -> Option<String>;
}

/// Fixed token → user id table, loaded from configuration.
#[derive(Debug, Clone, Default)]
pub struct StaticTokenValidator {
    tokens: HashMap<String, String>,
}

impl StaticTokenValidator {
    #[must_use]
    pub fn new(tokens: HashMap<String, String>) -> Self {
        Self { tokens }
    }
}

#[async_trait]
impl TokenValidator for StaticTokenValidator {
    async fn validate(&self, token: &str) -> Option<String> {
        self.tokens.get(token).cloned()
    }
}

/// Middleware resolving the optional caller identity.
///
/// A present but invalid token is rejected with 401.
pub async fn resolve_caller(
    State(validator): State<Arc<dyn TokenValidator>>,
    mut request: Request,
    next: Next,
) -> Response {
    if let Some(token) = extract_bearer_token(request.headers()) {
        let Some(user_id) = validator.validate(token).await else {
            tracing::debug!("rejecting request with unknown bearer token");
            return unauthorized(request.uri().path()).into_response();
        };
        request.extensions_mut().insert(Caller(user_id));
    }
    next.run(request).await
}

/// Extract Bearer token from Authorization header
fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

fn unauthorized(instance: &str) -> Problem {
    ErrorCode::Unauthorized.with_context("Missing or invalid bearer token", instance, None)
}

/// Extractor for the optional caller set by [`resolve_caller`].
#[derive(Debug, Clone)]
pub struct MaybeCaller(pub Option<Caller>);

impl<S> FromRequestParts<S> for MaybeCaller
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> impl Future<Output = Result<Self, Self::Rejection>> + Send {
        std::future::ready(Ok(Self(parts.extensions.get::<Caller>().cloned())))
    }
}

/// Owner to scope a request by: the caller for owner-scoped resources,
/// nobody for public ones.
///
/// # Errors
/// Returns a 401 problem when the resource is owner-scoped and there is no caller.
pub fn owner_for<'a, R: Resource>(
    caller: Option<&'a Caller>,
    instance: &str,
) -> Result<Option<&'a str>, Problem> {
    if R::owner_column().is_none() {
        return Ok(None);
    }
    caller
        .map(|c| Some(c.0.as_str()))
        .ok_or_else(|| unauthorized(instance))
}
