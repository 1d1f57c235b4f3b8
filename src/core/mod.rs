//! The recurring-billing engine and the services that guard its inputs.

pub mod aggregation;
pub mod clock;
pub mod ledger;
pub mod listing;
pub mod notifications;
pub mod recurrence;
pub mod services;
pub mod tracker;
pub mod views;

pub use clock::{Clock, FixedClock, SystemClock};
pub use tracker::SubscriptionTracker;
pub use views::{recompute, DerivedViews, RecomputeOptions};
