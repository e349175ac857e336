use super::*;

/// Tests taking a unit of stock.
///
/// Expected: Ok(Remaining(2)) and the stored counter drops by one
#[tokio::test]
async fn decrements_remaining() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Coupon)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let coupon = factory::coupon::CouponFactory::new(db)
        .stock(3)
        .build()
        .await?;

    let ledger = StockLedger::new(db);
    let result = ledger.try_decrement(coupon.id).await?;

    assert_eq!(result, StockDecrement::Remaining(2));
    assert_eq!(
        ledger.level(coupon.id).await?,
        Some(StockLevel {
            total: 3,
            remaining: 2
        })
    );

    Ok(())
}

/// Tests that the counter never goes below zero.
///
/// Expected: Ok(Remaining(0)) then Ok(OutOfStock) with the counter left at zero
#[tokio::test]
async fn stops_at_zero() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Coupon)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let coupon = factory::coupon::CouponFactory::new(db)
        .stock(1)
        .build()
        .await?;

    let ledger = StockLedger::new(db);
    assert_eq!(
        ledger.try_decrement(coupon.id).await?,
        StockDecrement::Remaining(0)
    );
    assert_eq!(
        ledger.try_decrement(coupon.id).await?,
        StockDecrement::OutOfStock
    );
    assert_eq!(ledger.level(coupon.id).await?.unwrap().remaining, 0);

    Ok(())
}

/// Tests decrementing a coupon that does not exist.
///
/// Expected: Ok(OutOfStock)
#[tokio::test]
async fn missing_coupon_is_out_of_stock() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Coupon)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let ledger = StockLedger::new(db);

    assert_eq!(ledger.try_decrement(42).await?, StockDecrement::OutOfStock);

    Ok(())
}

/// Tests that a rolled back decrement restores the counter.
///
/// Expected: counter unchanged after rollback
#[tokio::test]
async fn rollback_restores_stock() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Coupon)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let coupon = factory::coupon::CouponFactory::new(db)
        .stock(5)
        .build()
        .await?;

    let txn = db.begin().await?;
    assert_eq!(
        StockLedger::new(&txn).try_decrement(coupon.id).await?,
        StockDecrement::Remaining(4)
    );
    txn.rollback().await?;

    let level = StockLedger::new(db).level(coupon.id).await?.unwrap();
    assert_eq!(level.remaining, 5);

    Ok(())
}
