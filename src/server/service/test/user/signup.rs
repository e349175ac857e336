use super::*;

/// Tests that the first user becomes admin and later users do not.
///
/// Expected: admin=true for the first signup, false for the second
#[tokio::test]
async fn first_user_becomes_admin() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let service = UserService::new(db);

    let first = service.signup(signup_params("first@example.com")).await?;
    let second = service.signup(signup_params("second@example.com")).await?;

    assert!(first.admin);
    assert!(!second.admin);

    Ok(())
}

/// Tests signing up with an email that is already registered.
///
/// Expected: Err(AppError::Conflict) with code EMAIL_TAKEN
#[tokio::test]
async fn rejects_duplicate_email() -> Result<(), AppError> {
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

    let result = UserService::new(db)
        .signup(signup_params("taken@example.com"))
        .await;

    assert!(matches!(
        result,
        Err(AppError::Conflict {
            code: "EMAIL_TAKEN",
            ..
        })
    ));

    Ok(())
}

/// Tests blank and malformed input.
///
/// Expected: Err(AppError::BadRequest)
#[tokio::test]
async fn rejects_blank_fields() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let service = UserService::new(db);

    let cases = [
        signup_params(""),
        signup_params("no-at-sign"),
        SignupParams {
            nickname: String::new(),
            ..signup_params("a@example.com")
        },
        SignupParams {
            password: "   ".to_string(),
            ..signup_params("b@example.com")
        },
    ];

    for params in cases {
        let result = service.signup(params).await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    Ok(())
}

/// Tests several first signups racing while no admin exists.
///
/// Expected: every signup succeeds and exactly one user is admin
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_first_signups_yield_one_admin() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let handles: Vec<_> = (0..5)
        .map(|i| {
            let db = db.clone();
            tokio::spawn(async move {
                UserService::new(&db)
                    .signup(signup_params(&format!("racer{}@example.com", i)))
                    .await
            })
        })
        .collect();

    let mut admins = 0;
    for handle in handles {
        if handle.await.unwrap()?.admin {
            admins += 1;
        }
    }
    assert_eq!(admins, 1);

    Ok(())
}
