//! Background cron jobs.

pub mod lock_sweeper;
