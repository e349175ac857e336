use super::*;

/// Tests inserting a lease for a free key.
///
/// Expected: Ok(true) and the row is stored with the given holder
#[tokio::test]
async fn inserts_lease_for_free_key() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::LockLease)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = LockLeaseRepository::new(db);
    let expires_at = Utc::now() + Duration::seconds(10);
    let inserted = repo.try_insert("coupon:1", "holder-a", expires_at).await?;

    assert!(inserted);
    let lease = repo.find("coupon:1").await?.unwrap();
    assert_eq!(lease.holder, "holder-a");

    Ok(())
}

/// Tests that an existing row blocks a second insert on the same key.
///
/// Expected: Ok(false) and the original holder is kept
#[tokio::test]
async fn refuses_insert_when_key_taken() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::LockLease)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = LockLeaseRepository::new(db);
    let expires_at = Utc::now() + Duration::seconds(10);
    assert!(repo.try_insert("coupon:1", "holder-a", expires_at).await?);

    let second = repo.try_insert("coupon:1", "holder-b", expires_at).await?;

    assert!(!second);
    let lease = repo.find("coupon:1").await?.unwrap();
    assert_eq!(lease.holder, "holder-a");

    Ok(())
}

/// Tests that different keys do not conflict.
///
/// Expected: Ok(true) for both keys
#[tokio::test]
async fn keys_are_independent() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::LockLease)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = LockLeaseRepository::new(db);
    let expires_at = Utc::now() + Duration::seconds(10);

    assert!(repo.try_insert("coupon:1", "holder-a", expires_at).await?);
    assert!(repo.try_insert("coupon:2", "holder-a", expires_at).await?);

    Ok(())
}
