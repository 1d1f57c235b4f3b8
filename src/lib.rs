#![doc(test(attr(deny(warnings))))]

//! Subscription Core turns a user's recurring subscriptions into monthly spend totals,
//! projected billing summaries, a synthetic payment history, and upcoming-payment reminders.

pub mod config;
pub mod core;
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
        tracing::info!("Subscription Core tracing initialized.");
    });
}
