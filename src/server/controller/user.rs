use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;

use crate::{
    model::{
        api::{ErrorDto, MessageDto},
        coupon::{IssuedCouponDto, UserCouponDto},
        user::{LoginDto, SignupDto, UserDto},
    },
    server::{
        error::AppError,
        middleware::{auth::AuthGuard, session::AuthSession},
        model::{coupon::UserCoupon, user::SignupParams},
        service::{user::UserService, user_coupon::UserCouponService},
        state::AppState,
    },
};

/// Tag for grouping user endpoints in OpenAPI documentation
pub static USER_TAG: &str = "user";

/// Register a new account.
///
/// The first account registered while no admin exists becomes an admin.
#[utoipa::path(
    post,
    path = "/api/users/signup",
    tag = USER_TAG,
    request_body = SignupDto,
    responses(
        (status = 201, description = "Account created", body = UserDto),
        (status = 400, description = "Missing or malformed fields", body = ErrorDto),
        (status = 409, description = "Email already registered", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn signup(
    State(state): State<AppState>,
    Json(payload): Json<SignupDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = UserService::new(&state.db)
        .signup(SignupParams::from_dto(payload))
        .await?;

    Ok((StatusCode::CREATED, Json(user.into_dto())))
}

/// Log in with email and password.
///
/// Stores the user in the session on success.
#[utoipa::path(
    post,
    path = "/api/users/login",
    tag = USER_TAG,
    request_body = LoginDto,
    responses(
        (status = 200, description = "Logged in", body = UserDto),
        (status = 401, description = "Invalid email or password", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<LoginDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = UserService::new(&state.db)
        .login(&payload.email, &payload.password)
        .await?;

    AuthSession::new(&session).set_user_id(user.id).await?;

    tracing::debug!("User {} logged in", user.id);

    Ok((StatusCode::OK, Json(user.into_dto())))
}

/// Log out and clear the session.
#[utoipa::path(
    post,
    path = "/api/users/logout",
    tag = USER_TAG,
    responses(
        (status = 200, description = "Logged out", body = MessageDto)
    ),
)]
pub async fn logout(session: Session) -> Result<impl IntoResponse, AppError> {
    AuthSession::new(&session).clear().await;

    Ok((
        StatusCode::OK,
        Json(MessageDto {
            message: "Logged out".to_string(),
        }),
    ))
}

/// Get the logged-in user.
#[utoipa::path(
    get,
    path = "/api/users/me",
    tag = USER_TAG,
    responses(
        (status = 200, description = "Current user", body = UserDto),
        (status = 401, description = "User not authenticated", body = ErrorDto)
    ),
)]
pub async fn get_me(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    Ok((StatusCode::OK, Json(user.into_dto())))
}

/// List the coupons issued to the logged-in user.
#[utoipa::path(
    get,
    path = "/api/users/me/coupons",
    tag = USER_TAG,
    responses(
        (status = 200, description = "Issued coupons", body = Vec<UserCouponDto>),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_my_coupons(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let coupons: Vec<UserCouponDto> = UserCouponService::new(&state.db)
        .list(user.id)
        .await?
        .into_iter()
        .map(UserCoupon::into_dto)
        .collect();

    Ok((StatusCode::OK, Json(coupons)))
}

/// Use one of the logged-in user's coupons at checkout.
#[utoipa::path(
    post,
    path = "/api/users/me/coupons/{coupon_id}/use",
    tag = USER_TAG,
    params(
        ("coupon_id" = i32, Path, description = "Coupon ID")
    ),
    responses(
        (status = 200, description = "Coupon used", body = IssuedCouponDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 404, description = "Coupon not issued to the user", body = ErrorDto),
        (status = 409, description = "Coupon already used", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn use_my_coupon(
    State(state): State<AppState>,
    session: Session,
    Path(coupon_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let issued = UserCouponService::new(&state.db)
        .use_coupon(user.id, coupon_id)
        .await?;

    Ok((StatusCode::OK, Json(issued.into_dto())))
}
