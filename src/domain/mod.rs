//! Subscription domain models. Pure data types; no I/O.

pub mod billing_cycle;
pub mod category;
pub mod common;
pub mod subscription;
pub mod transaction;
pub mod user;

pub use billing_cycle::BillingCycle;
pub use category::Category;
pub use common::{parse_timestamp, round_cents};
pub use subscription::{Subscription, SubscriptionDraft, SubscriptionPatch};
pub use transaction::Transaction;
pub use user::UserProfile;
