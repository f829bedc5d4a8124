//! RPC error types.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use campaign_enrollment::{Rejection, RejectionKind};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RpcError {
    #[error("missing parameter: {0}")]
    MissingParameter(&'static str),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("subscription not found")]
    SubscriptionNotFound,

    #[error("{0}")]
    Rejected(#[from] Rejection),

    #[error("invalid CORS origin: {0}")]
    InvalidOrigin(String),

    #[error("server error: {0}")]
    Server(String),
}

impl RpcError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            RpcError::MissingParameter(_) | RpcError::BadRequest(_) => StatusCode::BAD_REQUEST,
            RpcError::SubscriptionNotFound => StatusCode::NOT_FOUND,
            RpcError::Rejected(rejection) => rejection_status(rejection),
            RpcError::InvalidOrigin(_) | RpcError::Server(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for RpcError {
    fn from(rejection: JsonRejection) -> Self {
        RpcError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for RpcError {
    fn from(rejection: QueryRejection) -> Self {
        RpcError::BadRequest(rejection.body_text())
    }
}

fn rejection_status(rejection: &Rejection) -> StatusCode {
    match rejection {
        Rejection::CampaignClosed { .. } | Rejection::PrivateContextRequired => {
            StatusCode::FORBIDDEN
        }
        Rejection::NotSubscribed | Rejection::UnknownAddress(_) => StatusCode::NOT_FOUND,
        Rejection::CooldownActive { .. } => StatusCode::TOO_MANY_REQUESTS,
        Rejection::VerificationFailed => StatusCode::UNPROCESSABLE_ENTITY,
        other => match other.kind() {
            RejectionKind::Validation => StatusCode::BAD_REQUEST,
            RejectionKind::Precondition | RejectionKind::Conflict => StatusCode::CONFLICT,
            RejectionKind::ProbeFailure => StatusCode::UNPROCESSABLE_ENTITY,
            RejectionKind::Persistence | RejectionKind::Internal => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        },
    }
}

impl IntoResponse for RpcError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use campaign_types::{Timestamp, ValidationError};

    #[test]
    fn status_codes() {
        let cases = [
            (RpcError::MissingParameter("address"), StatusCode::BAD_REQUEST),
            (RpcError::BadRequest("eof".into()), StatusCode::BAD_REQUEST),
            (RpcError::SubscriptionNotFound, StatusCode::NOT_FOUND),
            (
                Rejection::CampaignClosed {
                    opens_at: Timestamp::new(1),
                }
                .into(),
                StatusCode::FORBIDDEN,
            ),
            (
                Rejection::UnknownAddress("0x1".into()).into(),
                StatusCode::NOT_FOUND,
            ),
            (
                Rejection::CooldownActive { remaining_secs: 9 }.into(),
                StatusCode::TOO_MANY_REQUESTS,
            ),
            (
                Rejection::VerificationFailed.into(),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                Rejection::Invalid(ValidationError::InvalidAddress("x".into())).into(),
                StatusCode::BAD_REQUEST,
            ),
            (Rejection::NoTaskIssued.into(), StatusCode::CONFLICT),
            (
                Rejection::Persistence("disk".into()).into(),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (error, status) in cases {
            assert_eq!(error.status_code(), status, "{error}");
        }
    }
}
