use super::*;

/// Tests claiming admin when no admin exists yet.
///
/// Expected: the first claim wins, a later claim by another user does nothing
#[tokio::test]
async fn only_first_claim_wins() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);
    let first = factory::create_user(db).await?;
    let second = factory::create_user(db).await?;

    assert!(repo.claim_first_admin(first.id).await?);
    assert!(!repo.claim_first_admin(second.id).await?);

    assert!(repo.find_by_id(first.id).await?.unwrap().admin);
    assert!(!repo.find_by_id(second.id).await?.unwrap().admin);

    Ok(())
}

/// Tests claiming admin when an admin was created another way.
///
/// Expected: Ok(false) and the user stays regular
#[tokio::test]
async fn existing_admin_blocks_claim() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);
    factory::user::create_admin(db).await?;
    let user = factory::create_user(db).await?;

    assert!(!repo.claim_first_admin(user.id).await?);
    assert!(!repo.find_by_id(user.id).await?.unwrap().admin);

    Ok(())
}
