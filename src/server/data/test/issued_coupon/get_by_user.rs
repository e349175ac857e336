use super::*;

/// Tests listing a user's coupons with their definitions.
///
/// Expected: only the user's own records, each joined with its coupon
#[tokio::test]
async fn lists_only_users_coupons() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_coupon_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let other = factory::create_user(db).await?;
    let first = factory::create_coupon(db).await?;
    let second = factory::coupon::CouponFactory::new(db)
        .deleted()
        .build()
        .await?;
    factory::create_issued_coupon(db, user.id, first.id).await?;
    factory::issued_coupon::IssuedCouponFactory::new(db, user.id, second.id)
        .used()
        .build()
        .await?;
    factory::create_issued_coupon(db, other.id, first.id).await?;

    let repo = IssuedCouponRepository::new(db);
    let coupons = repo.get_by_user(user.id).await?;

    assert_eq!(coupons.len(), 2);
    let mut ids: Vec<i32> = coupons.iter().map(|c| c.coupon.id).collect();
    ids.sort();
    assert_eq!(ids, vec![first.id, second.id]);

    let used = coupons.iter().find(|c| c.coupon.id == second.id).unwrap();
    assert!(used.used_at.is_some());
    assert!(used.coupon.deleted_at.is_some());

    Ok(())
}

/// Tests listing for a user without coupons.
///
/// Expected: empty list
#[tokio::test]
async fn empty_for_user_without_coupons() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_coupon_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;

    let repo = IssuedCouponRepository::new(db);

    assert!(repo.get_by_user(user.id).await?.is_empty());

    Ok(())
}
