use chrono::{DateTime, Utc};
use sea_orm::{
    sea_query::OnConflict, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter,
};

pub struct LockLeaseRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> LockLeaseRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts a lease row for `key` unless one already exists.
    ///
    /// # Returns
    /// - `Ok(true)` - Row inserted, lease granted
    /// - `Ok(false)` - A row for `key` already exists
    /// - `Err(DbErr)` - Database error
    pub async fn try_insert(
        &self,
        key: &str,
        holder: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<bool, DbErr> {
        let lease = entity::lock_lease::ActiveModel {
            key: ActiveValue::Set(key.to_string()),
            holder: ActiveValue::Set(holder.to_string()),
            expires_at: ActiveValue::Set(expires_at),
        };

        let inserted = entity::prelude::LockLease::insert(lease)
            .on_conflict(
                OnConflict::column(entity::lock_lease::Column::Key)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(self.db)
            .await?;

        Ok(inserted == 1)
    }

    /// Removes the lease on `key` if it has expired as of `now`.
    pub async fn delete_expired_for_key(&self, key: &str, now: DateTime<Utc>) -> Result<u64, DbErr> {
        let result = entity::prelude::LockLease::delete_many()
            .filter(entity::lock_lease::Column::Key.eq(key))
            .filter(entity::lock_lease::Column::ExpiresAt.lte(now))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Removes `holder`'s lease on `key`.
    ///
    /// An expired row owned by `holder` is removed too, but reported as `false`
    /// since the lease was no longer held.
    ///
    /// # Returns
    /// - `Ok(true)` - A live lease owned by `holder` was removed
    /// - `Ok(false)` - No live lease owned by `holder`
    pub async fn delete_held(
        &self,
        key: &str,
        holder: &str,
        now: DateTime<Utc>,
    ) -> Result<bool, DbErr> {
        let live = entity::prelude::LockLease::delete_many()
            .filter(entity::lock_lease::Column::Key.eq(key))
            .filter(entity::lock_lease::Column::Holder.eq(holder))
            .filter(entity::lock_lease::Column::ExpiresAt.gt(now))
            .exec(self.db)
            .await?;

        if live.rows_affected == 0 {
            entity::prelude::LockLease::delete_many()
                .filter(entity::lock_lease::Column::Key.eq(key))
                .filter(entity::lock_lease::Column::Holder.eq(holder))
                .exec(self.db)
                .await?;
        }

        Ok(live.rows_affected == 1)
    }

    /// Removes every lease that expired as of `now`.
    ///
    /// # Returns
    /// - `Ok(count)` - Number of stale rows removed
    pub async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, DbErr> {
        let result = entity::prelude::LockLease::delete_many()
            .filter(entity::lock_lease::Column::ExpiresAt.lte(now))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    pub async fn find(&self, key: &str) -> Result<Option<entity::lock_lease::Model>, DbErr> {
        entity::prelude::LockLease::find_by_id(key.to_string())
            .one(self.db)
            .await
    }
}
