use super::*;

/// Fires one issuance per `(user_id, locks)` pair concurrently and collects results.
async fn issue_concurrently(
    db: &DatabaseConnection,
    coupon_id: i32,
    requests: Vec<(i32, LockManager)>,
) -> Vec<Result<crate::server::model::coupon::IssuedCoupon, IssuanceError>> {
    let handles: Vec<_> = requests
        .into_iter()
        .map(|(user_id, locks)| {
            let db = db.clone();
            tokio::spawn(async move {
                CouponIssuanceService::new(&db, &locks)
                    .issue(user_id, coupon_id)
                    .await
            })
        })
        .collect();

    let mut results = Vec::with_capacity(handles.len());
    for handle in handles {
        results.push(handle.await.unwrap());
    }
    results
}

/// Tests concurrent over-subscription of a limited coupon.
///
/// Twenty distinct users race for five units.
///
/// Expected: exactly five issued, fifteen OutOfStock, stock at zero
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn never_issues_more_than_stock() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_coupon_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let locks = memory_locks();

    let users = factory::helpers::create_users(db, 20).await?;
    let coupon = factory::coupon::CouponFactory::new(db)
        .stock(5)
        .build()
        .await?;

    let results = issue_concurrently(
        db,
        coupon.id,
        users.iter().map(|u| (u.id, locks.clone())).collect(),
    )
    .await;

    let issued = results.iter().filter(|r| r.is_ok()).count();
    let out_of_stock = results
        .iter()
        .filter(|r| matches!(r, Err(IssuanceError::OutOfStock(_))))
        .count();

    assert_eq!(issued, 5);
    assert_eq!(out_of_stock, 15);

    let (level, count) = snapshot(db, coupon.id).await?;
    assert_eq!(level.remaining, 0);
    assert_eq!(count, 5);

    Ok(())
}

/// Tests two users racing for the last unit.
///
/// Expected: one Completed and one OutOfStock
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn single_unit_goes_to_exactly_one_user() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_coupon_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let locks = memory_locks();

    let users = factory::helpers::create_users(db, 2).await?;
    let coupon = factory::coupon::CouponFactory::new(db)
        .stock(1)
        .build()
        .await?;

    let results = issue_concurrently(
        db,
        coupon.id,
        users.iter().map(|u| (u.id, locks.clone())).collect(),
    )
    .await;

    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
    assert_eq!(
        results
            .iter()
            .filter(|r| matches!(r, Err(IssuanceError::OutOfStock(_))))
            .count(),
        1
    );

    Ok(())
}

/// Tests one user sending many concurrent requests for the same coupon.
///
/// Expected: exactly one record and a single unit of stock consumed
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn one_record_per_user_under_concurrency() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_coupon_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let locks = memory_locks();

    let user = factory::create_user(db).await?;
    let coupon = factory::coupon::CouponFactory::new(db)
        .stock(10)
        .build()
        .await?;

    let results = issue_concurrently(
        db,
        coupon.id,
        (0..10).map(|_| (user.id, locks.clone())).collect(),
    )
    .await;

    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
    assert_eq!(
        results
            .iter()
            .filter(|r| matches!(r, Err(IssuanceError::AlreadyIssued { .. })))
            .count(),
        9
    );

    let (level, count) = snapshot(db, coupon.id).await?;
    assert_eq!(level.remaining, 9);
    assert_eq!(count, 1);

    Ok(())
}

/// Tests over-subscription across simulated server instances.
///
/// Each request gets its own lock manager over the shared lease table, the way
/// separate instances would.
///
/// Expected: exactly three issued out of twelve requests
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn never_issues_more_than_stock_across_instances() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_coupon_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let users = factory::helpers::create_users(db, 12).await?;
    let coupon = factory::coupon::CouponFactory::new(db)
        .stock(3)
        .build()
        .await?;

    let results = issue_concurrently(
        db,
        coupon.id,
        users.iter().map(|u| (u.id, database_locks(db))).collect(),
    )
    .await;

    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 3);
    assert!(results
        .iter()
        .all(|r| r.is_ok() || matches!(r, Err(IssuanceError::OutOfStock(_)))));

    let (level, count) = snapshot(db, coupon.id).await?;
    assert_eq!(level.remaining, 0);
    assert_eq!(count, 3);

    Ok(())
}
