use super::*;

/// Tests paging through coupons in ID order.
///
/// Expected: first page holds the two lowest IDs and the total counts all coupons
#[tokio::test]
async fn returns_pages_in_id_order() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Coupon)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let first = factory::create_coupon(db).await?;
    let second = factory::create_coupon(db).await?;
    let third = factory::create_coupon(db).await?;

    let repo = CouponRepository::new(db);
    let (page0, total) = repo.get_paginated(0, 2).await?;
    let (page1, _) = repo.get_paginated(1, 2).await?;

    assert_eq!(total, 3);
    assert_eq!(
        page0.iter().map(|c| c.id).collect::<Vec<_>>(),
        vec![first.id, second.id]
    );
    assert_eq!(page1.iter().map(|c| c.id).collect::<Vec<_>>(), vec![third.id]);

    Ok(())
}

/// Tests that soft-deleted coupons are hidden from listings.
///
/// Expected: only the live coupon is listed and counted
#[tokio::test]
async fn excludes_deleted_coupons() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Coupon)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let live = factory::create_coupon(db).await?;
    factory::coupon::CouponFactory::new(db)
        .deleted()
        .build()
        .await?;

    let repo = CouponRepository::new(db);
    let (coupons, total) = repo.get_paginated(0, 10).await?;

    assert_eq!(total, 1);
    assert_eq!(coupons.len(), 1);
    assert_eq!(coupons[0].id, live.id);

    Ok(())
}

/// Tests requesting a page past the end.
///
/// Expected: empty page with the real total
#[tokio::test]
async fn page_past_end_is_empty() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Coupon)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_coupon(db).await?;

    let repo = CouponRepository::new(db);
    let (coupons, total) = repo.get_paginated(5, 3).await?;

    assert!(coupons.is_empty());
    assert_eq!(total, 1);

    Ok(())
}
