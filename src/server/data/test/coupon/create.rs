use super::*;

/// Tests creating a coupon definition.
///
/// Verifies that the stock counter starts at the full stock and the coupon is
/// not deleted.
///
/// Expected: Ok with remaining == total_stock
#[tokio::test]
async fn creates_coupon_with_full_stock() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Coupon)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let now = Utc::now();
    let repo = CouponRepository::new(db);
    let coupon = repo
        .create(CreateCouponParams {
            name: "Welcome".to_string(),
            discount: 3000,
            total_stock: 50,
            starts_at: now,
            ends_at: now + Duration::days(30),
            brand: Some("revibe".to_string()),
        })
        .await?;

    assert_eq!(coupon.name, "Welcome");
    assert_eq!(coupon.total_stock, 50);
    assert_eq!(coupon.remaining, 50);
    assert_eq!(coupon.brand.as_deref(), Some("revibe"));
    assert!(coupon.deleted_at.is_none());

    let stored = repo.find_by_id(coupon.id).await?;
    assert_eq!(stored, Some(coupon));

    Ok(())
}
