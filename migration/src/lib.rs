pub use sea_orm_migration::prelude::*;

mod m20250301_000001_create_user_table;
mod m20250301_000002_create_coupon_table;
mod m20250301_000003_create_issued_coupon_table;
mod m20250301_000004_create_lock_lease_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_000001_create_user_table::Migration),
            Box::new(m20250301_000002_create_coupon_table::Migration),
            Box::new(m20250301_000003_create_issued_coupon_table::Migration),
            Box::new(m20250301_000004_create_lock_lease_table::Migration),
        ]
    }
}
