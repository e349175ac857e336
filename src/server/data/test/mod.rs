mod coupon;
mod issued_coupon;
mod lock_lease;
mod stock_ledger;
