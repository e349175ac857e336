use super::*;

/// Tests renaming a coupon and moving its window.
///
/// Expected: Ok(Some) with the new values, stock untouched
#[tokio::test]
async fn updates_name_and_window() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Coupon)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let coupon = factory::coupon::CouponFactory::new(db)
        .stock(10)
        .remaining(4)
        .build()
        .await?;
    let starts_at = Utc::now() + Duration::days(1);
    let ends_at = starts_at + Duration::days(2);

    let repo = CouponRepository::new(db);
    let updated = repo
        .update_details(&UpdateCouponParams {
            id: coupon.id,
            name: Some("Renamed".to_string()),
            starts_at: Some(starts_at),
            ends_at: Some(ends_at),
            add_stock: None,
        })
        .await?
        .unwrap();

    assert_eq!(updated.name, "Renamed");
    assert_eq!(updated.starts_at, starts_at);
    assert_eq!(updated.ends_at, ends_at);
    assert_eq!(updated.total_stock, 10);
    assert_eq!(updated.remaining, 4);

    Ok(())
}

/// Tests editing a soft-deleted coupon.
///
/// Expected: Ok(None)
#[tokio::test]
async fn skips_deleted_coupon() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Coupon)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let coupon = factory::coupon::CouponFactory::new(db)
        .deleted()
        .build()
        .await?;

    let repo = CouponRepository::new(db);
    let result = repo
        .update_details(&UpdateCouponParams {
            id: coupon.id,
            name: Some("Renamed".to_string()),
            starts_at: None,
            ends_at: None,
            add_stock: None,
        })
        .await?;

    assert!(result.is_none());

    Ok(())
}
