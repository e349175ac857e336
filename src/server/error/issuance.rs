use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::{model::api::ErrorDto, server::model::coupon::IssuanceRejection};

/// Hint sent with transient failures.
const RETRY_AFTER_SECONDS: &str = "1";

/// Every non-successful exit of the coupon issuance state machine.
///
/// Each variant maps to exactly one caller-visible response. `LockTimeout` and
/// `PersistenceFailure` are transient and safe to retry; the rest are business
/// outcomes and must not be retried automatically.
#[derive(Error, Debug)]
pub enum IssuanceError {
    /// No coupon definition exists with the requested ID.
    #[error("Coupon {0} not found")]
    CouponNotFound(i32),

    /// The coupon exists but is not issuable right now.
    #[error("Coupon cannot be issued: {0}")]
    ValidationFailed(IssuanceRejection),

    /// The user already holds this coupon. Stock is untouched.
    #[error("Coupon {coupon_id} was already issued to user {user_id}")]
    AlreadyIssued { user_id: i32, coupon_id: i32 },

    /// No stock left for this coupon.
    #[error("Coupon {0} is out of stock")]
    OutOfStock(i32),

    /// The per-coupon lock could not be acquired within the wait time.
    #[error("Coupon {0} is busy, try again")]
    LockTimeout(i32),

    /// Storage failed while reserving stock or recording the issuance.
    ///
    /// Any stock reserved by the attempt has been rolled back.
    #[error("Failed to persist issuance: {0}")]
    PersistenceFailure(#[source] sea_orm::DbErr),
}

impl IssuanceError {
    /// Stable reason code reported in the error body.
    pub fn code(&self) -> &'static str {
        match self {
            Self::CouponNotFound(_) => "COUPON_NOT_FOUND",
            Self::ValidationFailed(rejection) => rejection.code(),
            Self::AlreadyIssued { .. } => "ALREADY_ISSUED",
            Self::OutOfStock(_) => "OUT_OF_STOCK",
            Self::LockTimeout(_) => "LOCK_TIMEOUT",
            Self::PersistenceFailure(_) => "PERSISTENCE_FAILURE",
        }
    }

    /// Whether the caller may retry the same request later.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::LockTimeout(_) | Self::PersistenceFailure(_))
    }

    fn status(&self) -> StatusCode {
        match self {
            Self::CouponNotFound(_) => StatusCode::NOT_FOUND,
            Self::ValidationFailed(_) => StatusCode::BAD_REQUEST,
            Self::AlreadyIssued { .. } | Self::OutOfStock(_) => StatusCode::CONFLICT,
            Self::LockTimeout(_) | Self::PersistenceFailure(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

/// Converts issuance outcomes into HTTP responses.
///
/// - `CouponNotFound` → 404 Not Found
/// - `ValidationFailed` → 400 Bad Request
/// - `AlreadyIssued` / `OutOfStock` → 409 Conflict
/// - `LockTimeout` / `PersistenceFailure` → 503 Service Unavailable
///
/// The body always carries the reason code. Storage details are logged, never returned.
/// Retryable outcomes also carry a `Retry-After` header.
impl IntoResponse for IssuanceError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.code();

        let message = match &self {
            Self::PersistenceFailure(err) => {
                tracing::error!("Coupon issuance persistence failure: {}", err);
                "Coupon could not be issued, try again".to_string()
            }
            other => other.to_string(),
        };

        let body = Json(ErrorDto::with_code(message, code));

        if self.is_retryable() {
            (status, [(header::RETRY_AFTER, RETRY_AFTER_SECONDS)], body).into_response()
        } else {
            (status, body).into_response()
        }
    }
}
