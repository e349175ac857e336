use sea_orm::{DatabaseConnection, SqlErr};

use crate::server::{
    data::user::UserRepository,
    error::{auth::AuthError, AppError},
    model::user::{CreateUserParams, SignupParams, User},
    util::password::{hash_password, verify_password},
};

pub struct UserService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> UserService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Registers a new user.
    ///
    /// The first user to sign up while no admin exists is made an admin. The user
    /// is inserted as a regular user and then claims admin through a guarded update,
    /// so concurrent first signups yield a single admin.
    ///
    /// # Returns
    /// - `Ok(User)` - Created user
    /// - `Err(AppError::BadRequest)` - Blank field or malformed email
    /// - `Err(AppError::Conflict)` - Email already registered (`EMAIL_TAKEN`)
    pub async fn signup(&self, params: SignupParams) -> Result<User, AppError> {
        if params.email.is_empty() || params.nickname.is_empty() || params.password.trim().is_empty()
        {
            return Err(AppError::BadRequest(
                "Email, nickname and password are required".to_string(),
            ));
        }
        if !params.email.contains('@') {
            return Err(AppError::BadRequest("Email address is invalid".to_string()));
        }

        let repo = UserRepository::new(self.db);

        if repo.email_exists(&params.email).await? {
            return Err(email_taken());
        }

        let password_hash = hash_password(&params.password)?;

        let mut user = match repo
            .create(CreateUserParams {
                email: params.email,
                nickname: params.nickname,
                password_hash,
                admin: false,
            })
            .await
        {
            Ok(user) => user,
            Err(err) => {
                return match err.sql_err() {
                    Some(SqlErr::UniqueConstraintViolation(_)) => Err(email_taken()),
                    _ => Err(err.into()),
                }
            }
        };

        if !repo.admin_exists().await? && repo.claim_first_admin(user.id).await? {
            user.admin = true;
            tracing::info!("Granted admin to first user {} ({})", user.id, user.email);
        }

        Ok(user)
    }

    /// Checks an email/password pair.
    ///
    /// # Returns
    /// - `Ok(User)` - Credentials valid
    /// - `Err(AuthError::InvalidCredentials)` - Unknown email or wrong password
    pub async fn login(&self, email: &str, password: &str) -> Result<User, AppError> {
        let email = email.trim().to_lowercase();

        let Some((user, hash)) = UserRepository::new(self.db)
            .find_credentials(&email)
            .await?
        else {
            return Err(AuthError::InvalidCredentials.into());
        };

        if !verify_password(password, &hash) {
            return Err(AuthError::InvalidCredentials.into());
        }

        Ok(user)
    }
}

fn email_taken() -> AppError {
    AppError::Conflict {
        message: "Email is already registered".to_string(),
        code: "EMAIL_TAKEN",
    }
}
