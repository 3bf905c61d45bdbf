//! REST error mapping for the Calculator module.

use axum::Json;
use axum::extract::FromRequest;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use super::dto::{ErrorResponse, FailureResponse};
use crate::domain::error::DomainError;
use crate::domain::evaluator::EvalError;

/// Errors returned by the calculator REST handlers.
///
/// Every variant is answered with `400 Bad Request`; the `Display` output is
/// the `error` field of the body.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The request body could not be extracted (malformed JSON, wrong field types).
    #[error("{0}")]
    InvalidRequest(String),

    #[error(transparent)]
    Evaluation(#[from] EvalError),

    /// The id does not name a live instance.
    #[error("Invalid ID")]
    InvalidId,

    /// `/reset` was called with an id that does not name a live instance.
    #[error("Could not find instance associated with ID")]
    ResetTargetMissing,
}

impl From<DomainError> for ApiError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::Eval(e) => Self::Evaluation(e),
            DomainError::InstanceNotFound { .. } => Self::InvalidId,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::debug!(error = %self, "Calculator request rejected");

        let error = self.to_string();
        match self {
            Self::InvalidRequest(_) | Self::Evaluation(_) => (
                StatusCode::BAD_REQUEST,
                Json(FailureResponse {
                    success: false,
                    error,
                }),
            )
                .into_response(),
            Self::InvalidId | Self::ResetTargetMissing => {
                (StatusCode::BAD_REQUEST, Json(ErrorResponse { error })).into_response()
            }
        }
    }
}

/// JSON body extractor whose rejection is an [`ApiError`].
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct JsonBody<T>(pub T);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::InstanceId;

    #[test]
    fn test_error_display() {
        assert_eq!(ApiError::InvalidId.to_string(), "Invalid ID");
        assert_eq!(
            ApiError::ResetTargetMissing.to_string(),
            "Could not find instance associated with ID"
        );
        assert_eq!(
            ApiError::from(EvalError::DivideByZero).to_string(),
            "Cannot divide by zero"
        );
        assert_eq!(
            ApiError::InvalidRequest("missing field `num1`".to_owned()).to_string(),
            "missing field `num1`"
        );
    }

    #[test]
    fn test_domain_error_mapping() {
        assert_eq!(
            ApiError::from(DomainError::instance_not_found(InstanceId::new(9))),
            ApiError::InvalidId
        );
        assert_eq!(
            ApiError::from(DomainError::from(EvalError::invalid_operator("pow"))),
            ApiError::Evaluation(EvalError::invalid_operator("pow"))
        );
    }

    #[test]
    fn test_every_error_is_bad_request() {
        for err in [
            ApiError::InvalidRequest("bad".to_owned()),
            ApiError::Evaluation(EvalError::DivideByZero),
            ApiError::InvalidId,
            ApiError::ResetTargetMissing,
        ] {
            assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
        }
    }
}
