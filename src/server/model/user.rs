//! User domain models and parameters.

use chrono::{DateTime, Utc};

use crate::model::user::{SignupDto, UserDto};

/// Registered user. The password hash never leaves the data layer.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: i32,
    pub email: String,
    pub nickname: String,
    /// Whether the user has admin privileges.
    pub admin: bool,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn from_entity(entity: entity::user::Model) -> Self {
        Self {
            id: entity.id,
            email: entity.email,
            nickname: entity.nickname,
            admin: entity.admin,
            created_at: entity.created_at,
        }
    }

    pub fn into_dto(self) -> UserDto {
        UserDto {
            id: self.id,
            email: self.email,
            nickname: self.nickname,
            admin: self.admin,
        }
    }
}

/// Parameters for signing up a new user.
#[derive(Debug, Clone)]
pub struct SignupParams {
    /// Normalized (trimmed, lowercase) email.
    pub email: String,
    pub nickname: String,
    pub password: String,
}

impl SignupParams {
    pub fn from_dto(dto: SignupDto) -> Self {
        Self {
            email: dto.email.trim().to_lowercase(),
            nickname: dto.nickname.trim().to_string(),
            password: dto.password,
        }
    }
}

/// Parameters for inserting a user row.
#[derive(Debug, Clone)]
pub struct CreateUserParams {
    pub email: String,
    pub nickname: String,
    pub password_hash: String,
    pub admin: bool,
}
