use super::*;

fn params(email: &str) -> CreateUserParams {
    CreateUserParams {
        email: email.to_string(),
        nickname: "Shopper".to_string(),
        password_hash: "$argon2id$placeholder".to_string(),
        admin: false,
    }
}

/// Tests creating a user.
///
/// Expected: Ok with the stored user retrievable by ID
#[tokio::test]
async fn creates_user() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);
    let user = repo.create(params("shopper@example.com")).await?;

    assert_eq!(user.email, "shopper@example.com");
    assert!(!user.admin);
    assert_eq!(repo.find_by_id(user.id).await?, Some(user));

    Ok(())
}

/// Tests the unique email constraint.
///
/// Expected: Err(DbErr) for the second insert
#[tokio::test]
async fn rejects_duplicate_email() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::user::UserFactory::new(db)
        .email("taken@example.com")
        .build()
        .await?;

    let repo = UserRepository::new(db);
    let result = repo.create(params("taken@example.com")).await;

    assert!(result.is_err());
    assert!(repo.email_exists("taken@example.com").await?);

    Ok(())
}
