#![doc(test(attr(deny(warnings))))]

//! Office Ledger tracks a realty brokerage office's monthly finances:
//! commission incomes, fixed and variable expenses, taxes, and the
//! operational spending around them, persisted as month-keyed JSON.

pub mod cli;
pub mod config;
pub mod core;
pub mod currency;
pub mod domain;
pub mod errors;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Office Ledger tracing initialized.");
    });
}
