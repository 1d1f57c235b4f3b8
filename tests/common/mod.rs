#![allow(dead_code)]

use std::sync::Mutex;

use chrono::{DateTime, Duration, TimeZone, Utc};
use once_cell::sync::Lazy;
use subscription_core::{
    config::{Config, ConfigManager},
    core::{services::SubscriptionService, FixedClock, SubscriptionTracker},
    domain::{BillingCycle, Category, Subscription, SubscriptionDraft},
    storage::{InMemoryRepository, JsonRepository},
    utils::identity::{PaletteColors, SequentialIds},
};
use tempfile::TempDir;
use uuid::Uuid;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

pub fn owner() -> Uuid {
    Uuid::from_u128(0xA11CE)
}

/// Reference instant shared by the engine tests.
pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 16, 9, 30, 0).unwrap()
}

pub fn subscription(
    name: &str,
    amount: f64,
    cycle: BillingCycle,
    start: DateTime<Utc>,
    next: DateTime<Utc>,
) -> Subscription {
    Subscription {
        id: Uuid::new_v4(),
        owner_id: owner(),
        name: name.into(),
        description: None,
        amount,
        currency: "USD".into(),
        billing_cycle: cycle,
        start_date: start,
        next_billing_date: next,
        category: Category::Entertainment,
        color: "#4F46E5".into(),
        notify_days_before: 3,
        active: true,
        website: None,
    }
}

pub fn netflix_draft() -> SubscriptionDraft {
    SubscriptionDraft {
        name: Some("Netflix".into()),
        amount: Some(15.49),
        currency: Some("USD".into()),
        billing_cycle: Some(BillingCycle::Monthly),
        category: Some("Video".into()),
        start_date: Some((now() - Duration::days(60)).to_rfc3339()),
        next_billing_date: Some((now() + Duration::days(5)).to_rfc3339()),
        notify_days_before: Some(3),
        ..SubscriptionDraft::default()
    }
}

pub fn deterministic_service() -> SubscriptionService {
    SubscriptionService::with_generators(
        Box::new(InMemoryRepository::new()),
        Box::new(SequentialIds::default()),
        Box::new(PaletteColors::seeded(0)),
    )
}

pub fn tracker_at(at: DateTime<Utc>) -> SubscriptionTracker {
    SubscriptionTracker::with_clock(
        owner(),
        deterministic_service(),
        Config::default(),
        Box::new(FixedClock(at)),
    )
    .expect("build tracker")
}

/// Creates an isolated data directory with a JSON repository and config manager.
pub fn setup_test_env() -> (std::path::PathBuf, JsonRepository, ConfigManager) {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);

    let repository = JsonRepository::in_base_dir(&base);
    let config_manager = ConfigManager::with_base_dir(base.clone());
    (base, repository, config_manager)
}
