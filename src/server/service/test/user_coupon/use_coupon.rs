use super::*;

/// Tests consuming a coupon once and then again.
///
/// Expected: Ok then Err(AppError::Conflict) with code ALREADY_USED
#[tokio::test]
async fn consumes_coupon_once() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_coupon_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (user, coupon) = factory::helpers::create_user_and_coupon(db, 5).await?;
    factory::create_issued_coupon(db, user.id, coupon.id).await?;
    let service = UserCouponService::new(db);

    let used = service.use_coupon(user.id, coupon.id).await?;
    assert!(used.is_used());

    let again = service.use_coupon(user.id, coupon.id).await;
    assert!(matches!(
        again,
        Err(AppError::Conflict {
            code: "ALREADY_USED",
            ..
        })
    ));

    Ok(())
}

/// Tests consuming a coupon that was issued to someone else.
///
/// Expected: Err(AppError::NotFound)
#[tokio::test]
async fn other_users_coupon_is_not_found() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_coupon_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (owner, coupon) = factory::helpers::create_user_and_coupon(db, 5).await?;
    let other = factory::create_user(db).await?;
    factory::create_issued_coupon(db, owner.id, coupon.id).await?;

    let result = UserCouponService::new(db).use_coupon(other.id, coupon.id).await;

    assert!(matches!(result, Err(AppError::NotFound(_))));

    Ok(())
}
