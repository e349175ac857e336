//! Shared helper utilities for factory methods.

use sea_orm::{DatabaseConnection, DbErr};

/// Counter for generating unique values across factories.
static COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(1);

/// Gets the next unique counter value for test data.
///
/// # Returns
/// - `u64` - Next unique counter value
pub fn next_id() -> u64 {
    COUNTER.fetch_add(1, std::sync::atomic::Ordering::SeqCst)
}

/// Creates `count` users with default values.
///
/// Used by concurrency tests that need many distinct requesters.
///
/// # Arguments
/// - `db` - Database connection
/// - `count` - Number of users to create
///
/// # Returns
/// - `Ok(Vec<entity::user::Model>)` - Created users in creation order
/// - `Err(DbErr)` - Database error during creation
pub async fn create_users(
    db: &DatabaseConnection,
    count: usize,
) -> Result<Vec<entity::user::Model>, DbErr> {
    let mut users = Vec::with_capacity(count);
    for _ in 0..count {
        users.push(crate::factory::user::create_user(db).await?);
    }
    Ok(users)
}

/// Creates a user and a coupon with the given stock.
///
/// # Arguments
/// - `db` - Database connection
/// - `stock` - Total and remaining stock of the coupon
///
/// # Returns
/// - `Ok((user, coupon))` - Created entities
/// - `Err(DbErr)` - Database error during creation
pub async fn create_user_and_coupon(
    db: &DatabaseConnection,
    stock: i32,
) -> Result<(entity::user::Model, entity::coupon::Model), DbErr> {
    let user = crate::factory::user::create_user(db).await?;
    let coupon = crate::factory::coupon::CouponFactory::new(db)
        .stock(stock)
        .build()
        .await?;

    Ok((user, coupon))
}
