use crate::server::{
    data::stock_ledger::StockLedger,
    model::coupon::{StockDecrement, StockLevel},
};
use sea_orm::{DbErr, TransactionTrait};
use test_utils::{builder::TestBuilder, factory};

mod try_decrement;
