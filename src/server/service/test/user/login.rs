use super::*;

/// Tests logging in with the signup credentials.
///
/// Expected: Ok(User), also with differently cased email
#[tokio::test]
async fn accepts_valid_credentials() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let service = UserService::new(db);

    let created = service.signup(signup_params("login@example.com")).await?;

    let user = service.login("Login@Example.com ", "hunter22").await?;

    assert_eq!(user.id, created.id);

    Ok(())
}

/// Tests wrong password and unknown email.
///
/// Expected: Err(AuthError::InvalidCredentials) for both
#[tokio::test]
async fn rejects_invalid_credentials() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let service = UserService::new(db);

    service.signup(signup_params("login@example.com")).await?;

    let wrong_password = service.login("login@example.com", "nope").await;
    let unknown_email = service.login("ghost@example.com", "hunter22").await;

    assert!(matches!(
        wrong_password,
        Err(AppError::AuthErr(AuthError::InvalidCredentials))
    ));
    assert!(matches!(
        unknown_email,
        Err(AppError::AuthErr(AuthError::InvalidCredentials))
    ));

    Ok(())
}
