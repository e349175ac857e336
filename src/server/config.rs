use std::{str::FromStr, time::Duration};

use crate::server::{
    error::{config::ConfigError, AppError},
    lock::LockOptions,
};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_LOCK_WAIT_SECONDS: u64 = 5;
const DEFAULT_LOCK_LEASE_SECONDS: u64 = 10;
const DEFAULT_COUPON_MAX_STOCK: i32 = 1_000_000;

/// Backing store for coupon locks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockStoreKind {
    /// Shared `lock_lease` table; excludes across every instance on the database.
    Database,
    /// Process-local map; only for a single instance.
    Memory,
}

impl FromStr for LockStoreKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "database" => Ok(Self::Database),
            "memory" => Ok(Self::Memory),
            other => Err(format!("expected 'database' or 'memory', got '{}'", other)),
        }
    }
}

pub struct Config {
    pub database_url: String,
    pub bind_addr: String,
    pub cors_origin: Option<String>,

    pub lock_store: LockStoreKind,
    /// Default time a caller waits for a coupon lock before giving up.
    pub lock_wait: Duration,
    /// Default lease after which an unreleased coupon lock expires.
    pub lock_lease: Duration,

    /// Upper bound for a coupon's total stock.
    pub coupon_max_stock: i32,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self {
            database_url: std::env::var("DATABASE_URL")
                .map_err(|_| ConfigError::MissingEnvVar("DATABASE_URL".to_string()))?,
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string()),
            cors_origin: std::env::var("CORS_ORIGIN").ok(),
            lock_store: parse_or("LOCK_STORE", LockStoreKind::Database)?,
            lock_wait: Duration::from_secs(parse_or("LOCK_WAIT_SECONDS", DEFAULT_LOCK_WAIT_SECONDS)?),
            lock_lease: Duration::from_secs(parse_or(
                "LOCK_LEASE_SECONDS",
                DEFAULT_LOCK_LEASE_SECONDS,
            )?),
            coupon_max_stock: parse_or("COUPON_MAX_STOCK", DEFAULT_COUPON_MAX_STOCK)?,
        })
    }

    /// Lock wait/lease defaults applied when a call site does not override them.
    pub fn lock_options(&self) -> LockOptions {
        LockOptions::new(self.lock_wait, self.lock_lease)
    }
}

/// Reads an optional environment variable, falling back to `default` when unset.
fn parse_or<T>(name: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(name) {
        Ok(value) => value
            .trim()
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                name: name.to_string(),
                value,
                reason: e.to_string(),
            }),
        Err(_) => Ok(default),
    }
}
