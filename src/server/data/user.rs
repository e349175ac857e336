use sea_orm::{
    sea_query::{Expr, ExprTrait, Query},
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter,
};

use chrono::Utc;

use crate::server::model::user::{CreateUserParams, User};

pub struct UserRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> UserRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts a new user.
    ///
    /// # Returns
    /// - `Ok(User)` - Created user
    /// - `Err(DbErr)` - Database error, including a unique violation on `email`
    pub async fn create(&self, params: CreateUserParams) -> Result<User, DbErr> {
        let user = entity::user::ActiveModel {
            email: ActiveValue::Set(params.email),
            nickname: ActiveValue::Set(params.nickname),
            password_hash: ActiveValue::Set(params.password_hash),
            admin: ActiveValue::Set(params.admin),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(User::from_entity(user))
    }

    pub async fn find_by_id(&self, user_id: i32) -> Result<Option<User>, DbErr> {
        let user = entity::prelude::User::find_by_id(user_id)
            .one(self.db)
            .await?;

        Ok(user.map(User::from_entity))
    }

    /// Finds a user by normalized email together with the stored password hash.
    ///
    /// Only used for login; the hash is not part of the `User` domain model.
    pub async fn find_credentials(&self, email: &str) -> Result<Option<(User, String)>, DbErr> {
        let user = entity::prelude::User::find()
            .filter(entity::user::Column::Email.eq(email))
            .one(self.db)
            .await?;

        Ok(user.map(|u| {
            let hash = u.password_hash.clone();
            (User::from_entity(u), hash)
        }))
    }

    pub async fn email_exists(&self, email: &str) -> Result<bool, DbErr> {
        let user = entity::prelude::User::find()
            .filter(entity::user::Column::Email.eq(email))
            .one(self.db)
            .await?;

        Ok(user.is_some())
    }

    /// Checks whether any admin user exists.
    pub async fn admin_exists(&self) -> Result<bool, DbErr> {
        let admin = entity::prelude::User::find()
            .filter(entity::user::Column::Admin.eq(true))
            .one(self.db)
            .await?;

        Ok(admin.is_some())
    }

    /// Grants admin to `user_id` only if no user is an admin yet.
    ///
    /// The existence check and the grant are one `UPDATE`, so concurrent callers
    /// cannot both win on SQLite, which serializes writers.
    ///
    /// # Returns
    /// - `Ok(true)` - User is now the only admin
    /// - `Ok(false)` - An admin already existed or the user is missing
    pub async fn claim_first_admin(&self, user_id: i32) -> Result<bool, DbErr> {
        let existing_admin = Query::select()
            .expr(Expr::val(1))
            .from(entity::user::Entity)
            .and_where(Expr::col(entity::user::Column::Admin).eq(true))
            .to_owned();

        let result = entity::prelude::User::update_many()
            .col_expr(entity::user::Column::Admin, Expr::value(true))
            .filter(entity::user::Column::Id.eq(user_id))
            .filter(Expr::exists(existing_admin).not())
            .exec(self.db)
            .await?;

        Ok(result.rows_affected == 1)
    }
}
