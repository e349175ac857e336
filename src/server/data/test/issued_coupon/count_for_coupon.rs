use super::*;

/// Tests counting issuance records per coupon.
///
/// Expected: only records for the requested coupon are counted
#[tokio::test]
async fn counts_records_for_coupon() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_coupon_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let users = factory::helpers::create_users(db, 3).await?;
    let coupon = factory::create_coupon(db).await?;
    let other = factory::create_coupon(db).await?;
    for user in &users {
        factory::create_issued_coupon(db, user.id, coupon.id).await?;
    }
    factory::create_issued_coupon(db, users[0].id, other.id).await?;

    let repo = IssuedCouponRepository::new(db);

    assert_eq!(repo.count_for_coupon(coupon.id).await?, 3);
    assert_eq!(repo.count_for_coupon(other.id).await?, 1);

    Ok(())
}
