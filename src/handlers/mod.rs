//! HTTP boundary layer
//!
//! Thin axum handlers: decode JSON, call the domain services, map error
//! kinds to status codes. No staking rules live here.

pub mod stakes;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::domain::errors::StakeError;

/// JSON error payload returned for every failed request.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub kind: &'static str,
}

/// Transport-facing wrapper mapping domain errors to status codes.
pub struct ApiError(pub StakeError);

impl From<StakeError> for ApiError {
    fn from(err: StakeError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            StakeError::InvalidLockPeriod { .. } | StakeError::InvalidAmount { .. } => {
                StatusCode::BAD_REQUEST
            }
            StakeError::NotFound { .. } => StatusCode::NOT_FOUND,
            StakeError::Unauthorized { .. } => StatusCode::FORBIDDEN,
            StakeError::NotActive { .. }
            | StakeError::LockNotExpired { .. }
            | StakeError::NothingToClaim { .. } => StatusCode::CONFLICT,
            StakeError::VerificationFailed { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            StakeError::LedgerUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        };

        let body = ErrorBody {
            error: self.0.to_string(),
            kind: self.0.kind(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn status_for(err: StakeError) -> StatusCode {
        ApiError(err).into_response().status()
    }

    #[test]
    fn error_kinds_map_to_expected_status_codes() {
        let id = Uuid::new_v4();
        assert_eq!(
            status_for(StakeError::InvalidLockPeriod { days: 45 }),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_for(StakeError::NotFound { id }),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_for(StakeError::Unauthorized { id }),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            status_for(StakeError::NothingToClaim { id }),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_for(StakeError::LedgerUnavailable("down".into())),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }
}
