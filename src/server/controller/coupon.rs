use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use tower_sessions::Session;
use utoipa::IntoParams;

use crate::{
    model::{
        api::ErrorDto,
        coupon::{
            CouponDto, CreateCouponDto, IssuedCouponDto, PaginatedCouponsDto, UpdateCouponDto,
        },
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::coupon::{CreateCouponParams, UpdateCouponParams},
        service::{coupon::CouponService, coupon_issuance::CouponIssuanceService},
        state::AppState,
    },
};

/// Tag for grouping coupon endpoints in OpenAPI documentation
pub static COUPON_TAG: &str = "coupon";

#[derive(Deserialize, IntoParams)]
pub struct PaginationParams {
    /// Zero-based page number (default: 0)
    #[serde(default)]
    pub page: u64,
    /// Items per page (default: 3, at most 100)
    #[serde(default = "default_size")]
    pub size: u64,
}

fn default_size() -> u64 {
    3
}

/// Create a new coupon definition.
///
/// # Access Control
/// - `Admin` - Only admins can create coupons
///
/// # Returns
/// - `201 Created` - Coupon created with full stock
/// - `400 Bad Request` - Invalid coupon data
/// - `401 Unauthorized` - Not logged in
/// - `403 Forbidden` - Not an admin
#[utoipa::path(
    post,
    path = "/api/coupons",
    tag = COUPON_TAG,
    request_body = CreateCouponDto,
    responses(
        (status = 201, description = "Successfully created coupon", body = CouponDto),
        (status = 400, description = "Invalid coupon data", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_coupon(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<CreateCouponDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let service = CouponService::new(&state.db, state.coupon_max_stock);

    let coupon = service
        .create(CreateCouponParams::from_dto(payload))
        .await?;

    Ok((StatusCode::CREATED, Json(coupon.into_dto())))
}

/// Get a page of available coupons.
///
/// Lists coupons that have not been deleted, ordered by ID.
///
/// # Access Control
/// - Any logged-in user
#[utoipa::path(
    get,
    path = "/api/coupons",
    tag = COUPON_TAG,
    params(PaginationParams),
    responses(
        (status = 200, description = "Successfully retrieved coupons", body = PaginatedCouponsDto),
        (status = 400, description = "Invalid page or page size", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_coupons(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<PaginationParams>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let service = CouponService::new(&state.db, state.coupon_max_stock);

    let coupons = service.get_paginated(params.page, params.size).await?;

    Ok((StatusCode::OK, Json(coupons.into_dto())))
}

/// Edit a coupon definition.
///
/// Renames the coupon, moves its validity window and/or increases its stock.
/// Stock can never be decreased.
///
/// # Access Control
/// - `Admin` - Only admins can edit coupons
#[utoipa::path(
    patch,
    path = "/api/coupons/{coupon_id}",
    tag = COUPON_TAG,
    params(
        ("coupon_id" = i32, Path, description = "Coupon ID")
    ),
    request_body = UpdateCouponDto,
    responses(
        (status = 200, description = "Successfully updated coupon", body = CouponDto),
        (status = 400, description = "Invalid edit", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 404, description = "Coupon not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_coupon(
    State(state): State<AppState>,
    session: Session,
    Path(coupon_id): Path<i32>,
    Json(payload): Json<UpdateCouponDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let service = CouponService::new(&state.db, state.coupon_max_stock);

    let coupon = service
        .update(UpdateCouponParams::from_dto(coupon_id, payload))
        .await?
        .ok_or_else(|| AppError::NotFound("Coupon not found".to_string()))?;

    Ok((StatusCode::OK, Json(coupon.into_dto())))
}

/// Delete a coupon definition.
///
/// Soft deletes the coupon; coupons already issued stay with their users.
///
/// # Access Control
/// - `Admin` - Only admins can delete coupons
#[utoipa::path(
    delete,
    path = "/api/coupons/{coupon_id}",
    tag = COUPON_TAG,
    params(
        ("coupon_id" = i32, Path, description = "Coupon ID")
    ),
    responses(
        (status = 204, description = "Successfully deleted coupon"),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 404, description = "Coupon not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_coupon(
    State(state): State<AppState>,
    session: Session,
    Path(coupon_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let service = CouponService::new(&state.db, state.coupon_max_stock);

    if !service.delete(coupon_id).await? {
        return Err(AppError::NotFound("Coupon not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}

/// Issue a coupon to the logged-in user.
///
/// Runs the issuance under the coupon's distributed lock. Business rejections carry a
/// reason code; `503` responses are transient and can be retried.
///
/// # Access Control
/// - Any logged-in user
#[utoipa::path(
    post,
    path = "/api/coupons/{coupon_id}/issue",
    tag = COUPON_TAG,
    params(
        ("coupon_id" = i32, Path, description = "Coupon ID")
    ),
    responses(
        (status = 201, description = "Coupon issued", body = IssuedCouponDto),
        (status = 400, description = "Coupon disabled, not started or expired", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 404, description = "Coupon not found", body = ErrorDto),
        (status = 409, description = "Already issued or out of stock", body = ErrorDto),
        (status = 503, description = "Lock timeout or storage failure, retry later", body = ErrorDto)
    ),
)]
pub async fn issue_coupon(
    State(state): State<AppState>,
    session: Session,
    Path(coupon_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let service = CouponIssuanceService::new(&state.db, &state.locks);

    let issued = service.issue(user.id, coupon_id).await?;

    Ok((StatusCode::CREATED, Json(issued.into_dto())))
}
