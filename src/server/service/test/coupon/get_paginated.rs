use super::*;

/// Tests page metadata.
///
/// Expected: total and total_pages computed from live coupons
#[tokio::test]
async fn computes_total_pages() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Coupon)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    for _ in 0..7 {
        factory::create_coupon(db).await?;
    }

    let page = CouponService::new(db, MAX_STOCK)
        .get_paginated(2, 3)
        .await?;

    assert_eq!(page.total, 7);
    assert_eq!(page.total_pages, 3);
    assert_eq!(page.page, 2);
    assert_eq!(page.size, 3);
    assert_eq!(page.coupons.len(), 1);

    Ok(())
}

/// Tests a zero page size.
///
/// Expected: Err(AppError::BadRequest)
#[tokio::test]
async fn rejects_zero_page_size() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Coupon)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let result = CouponService::new(db, MAX_STOCK).get_paginated(0, 0).await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));

    Ok(())
}

/// Tests page sizes above the cap and pages whose row offset overflows.
///
/// Expected: Err(AppError::BadRequest) without touching the database
#[tokio::test]
async fn rejects_oversized_page_and_offset() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Coupon)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let service = CouponService::new(db, MAX_STOCK);

    for (page, size) in [
        (0, MAX_PAGE_SIZE + 1),
        (u64::MAX, 3),
        (i64::MAX as u64, 2),
    ] {
        let result = service.get_paginated(page, size).await;
        assert!(
            matches!(result, Err(AppError::BadRequest(_))),
            "page {} size {} should be rejected",
            page,
            size
        );
    }

    let last_size = service.get_paginated(0, MAX_PAGE_SIZE).await?;
    assert_eq!(last_size.size, MAX_PAGE_SIZE);

    Ok(())
}
