use chrono::Utc;
use sea_orm::DatabaseConnection;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::server::{data::lock_lease::LockLeaseRepository, error::AppError};

/// Starts the expired lock lease sweeper.
///
/// Runs every minute and deletes lease rows whose expiry has passed. Acquisition
/// already ignores lapsed leases, so this only keeps the table small.
///
/// # Arguments
/// - `db`: Database connection
pub async fn start_scheduler(db: DatabaseConnection) -> Result<(), AppError> {
    let scheduler = JobScheduler::new().await?;

    let job_db = db.clone();

    let job = Job::new_async("0 * * * * *", move |_uuid, _lock| {
        let db = job_db.clone();

        Box::pin(async move {
            if let Err(e) = sweep_expired_leases(&db).await {
                tracing::error!("Error sweeping expired lock leases: {}", e);
            }
        })
    })?;

    scheduler.add(job).await?;
    scheduler.start().await?;

    tracing::info!("Lock lease sweeper started");

    Ok(())
}

/// Deletes every lease that has expired.
///
/// # Returns
/// - `Ok(count)` - Number of leases removed
pub async fn sweep_expired_leases(db: &DatabaseConnection) -> Result<u64, AppError> {
    let removed = LockLeaseRepository::new(db)
        .delete_expired(Utc::now())
        .await?;

    if removed > 0 {
        tracing::debug!("Swept {} expired lock leases", removed);
    }

    Ok(removed)
}
