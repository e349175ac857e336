use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LockError {
    /// The lock stayed held by another holder for the whole wait time.
    ///
    /// Performs no mutation and is safe to retry.
    #[error("Timed out after {waited:?} waiting for lock '{key}'")]
    Timeout {
        /// Lock key that could not be acquired
        key: String,
        /// How long the caller waited
        waited: Duration,
    },

    /// The shared lock store could not be reached or queried.
    #[error("Lock store failure: {0}")]
    Store(#[from] sea_orm::DbErr),
}
