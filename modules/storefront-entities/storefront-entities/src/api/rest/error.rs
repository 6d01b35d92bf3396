use super::problem::{ErrorCode, Problem};
use crate::domain::error::DomainError;

pub type ApiResult<T> = Result<T, Problem>;

/// Map domain error to RFC 9457 Problem
#[must_use]
pub fn domain_error_to_problem(e: &DomainError, instance: &str) -> Problem {
    let trace_id = tracing::Span::current()
        .id()
        .map(|id| id.into_u64().to_string());

    match e {
        DomainError::NotFound { .. } => {
            ErrorCode::NotFound.with_context(e.to_string(), instance, trace_id)
        }
        DomainError::Validation { field, message } => ErrorCode::Validation.with_context(
            format!("Validation error on '{field}': {message}"),
            instance,
            trace_id,
        ),
        DomainError::Database { .. } => {
            // Log the internal error details but don't expose them to the client
            tracing::error!(error = ?e, "Database error occurred");
            ErrorCode::Internal.with_context(
                "An internal database error occurred",
                instance,
                trace_id,
            )
        }
    }
}

impl From<DomainError> for Problem {
    fn from(e: DomainError) -> Self {
        domain_error_to_problem(&e, "/")
    }
}

/// 400 for a request that failed to parse before reaching the domain.
#[must_use]
pub fn bad_request(detail: impl Into<String>, instance: &str) -> Problem {
    ErrorCode::Validation.with_context(detail, instance, None)
}
