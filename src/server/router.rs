use axum::{
    routing::{get, patch, post},
    Router,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    model::{
        api::{ErrorDto, MessageDto},
        coupon::{
            CouponDto, CreateCouponDto, IssuedCouponDto, PaginatedCouponsDto, UpdateCouponDto,
            UserCouponDto,
        },
        user::{LoginDto, SignupDto, UserDto},
    },
    server::{
        controller::{coupon, user},
        state::AppState,
    },
};

#[derive(OpenApi)]
#[openapi(
    info(title = "revibe coupon API"),
    paths(
        user::signup,
        user::login,
        user::logout,
        user::get_me,
        user::get_my_coupons,
        user::use_my_coupon,
        coupon::create_coupon,
        coupon::get_coupons,
        coupon::update_coupon,
        coupon::delete_coupon,
        coupon::issue_coupon,
    ),
    components(schemas(
        ErrorDto,
        MessageDto,
        CouponDto,
        CreateCouponDto,
        UpdateCouponDto,
        PaginatedCouponsDto,
        IssuedCouponDto,
        UserCouponDto,
        UserDto,
        SignupDto,
        LoginDto,
    )),
    tags(
        (name = "user", description = "Accounts, sessions and issued coupons"),
        (name = "coupon", description = "Coupon administration, browsing and issuance")
    )
)]
pub struct ApiDoc;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/users/signup", post(user::signup))
        .route("/api/users/login", post(user::login))
        .route("/api/users/logout", post(user::logout))
        .route("/api/users/me", get(user::get_me))
        .route("/api/users/me/coupons", get(user::get_my_coupons))
        .route(
            "/api/users/me/coupons/{coupon_id}/use",
            post(user::use_my_coupon),
        )
        .route(
            "/api/coupons",
            get(coupon::get_coupons).post(coupon::create_coupon),
        )
        .route(
            "/api/coupons/{coupon_id}",
            patch(coupon::update_coupon).delete(coupon::delete_coupon),
        )
        .route("/api/coupons/{coupon_id}/issue", post(coupon::issue_coupon))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
