//! Database repository layer for all domain entities.
//!
//! This module contains repository structs that handle database operations for each
//! domain in the application. Repositories use SeaORM entity models internally and return
//! domain models to maintain separation between the data layer and business logic layer.
//!
//! Repositories taking a generic `ConnectionTrait` are used inside the issuance
//! transaction and must only ever be handed the transaction, never the pool.

pub mod coupon;
pub mod issued_coupon;
pub mod lock_lease;
pub mod stock_ledger;
pub mod user;

#[cfg(test)]
mod test;
