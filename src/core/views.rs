//! Full recomputation of every derived view from a subscription snapshot.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use crate::{
    config::Config,
    domain::{Subscription, Transaction},
};

use super::{
    aggregation::{self, CategoryTotal, MonthBucket},
    ledger,
    notifications::{self, UpcomingPayment, DEFAULT_UPCOMING_DAYS},
    recurrence::ProjectionWindow,
};

const DEFAULT_REMINDER_DAYS: i64 = 3;

/// Parameters shared by every recomputation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecomputeOptions {
    pub projection: ProjectionWindow,
    /// Window for the dashboard's upcoming payments list.
    pub upcoming_days: i64,
    /// Window for reminder notifications.
    pub reminder_days: i64,
}

impl Default for RecomputeOptions {
    fn default() -> Self {
        Self {
            projection: ProjectionWindow::default(),
            upcoming_days: DEFAULT_UPCOMING_DAYS,
            reminder_days: DEFAULT_REMINDER_DAYS,
        }
    }
}

impl From<&Config> for RecomputeOptions {
    fn from(config: &Config) -> Self {
        Self {
            projection: ProjectionWindow::new(
                config.projection_horizon_days,
                config.projection_max_occurrences,
            ),
            upcoming_days: config.upcoming_window_days,
            reminder_days: i64::from(config.notification_days_before),
        }
    }
}

/// Everything derived from one `(subscriptions, now)` snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerivedViews {
    pub now: DateTime<Utc>,
    pub total_monthly_expense: f64,
    pub yearly_projection: f64,
    pub active_count: usize,
    pub category_totals: Vec<CategoryTotal>,
    pub billing_summary: Vec<MonthBucket>,
    pub upcoming: Vec<Subscription>,
    pub next_payment: Option<Subscription>,
    pub reminders: Vec<UpcomingPayment>,
    pub ledger: Vec<Transaction>,
}

/// Recomputes every view. Pure: identical inputs always give identical output.
pub fn recompute(
    subscriptions: &[Subscription],
    now: DateTime<Utc>,
    options: RecomputeOptions,
) -> DerivedViews {
    let upcoming = notifications::upcoming_payments(subscriptions, now, options.upcoming_days);
    let views = DerivedViews {
        now,
        total_monthly_expense: aggregation::total_monthly_expense(subscriptions),
        yearly_projection: aggregation::yearly_projection(subscriptions),
        active_count: aggregation::active_count(subscriptions),
        category_totals: aggregation::category_totals(subscriptions),
        billing_summary: aggregation::billing_summary(subscriptions, now, options.projection),
        next_payment: upcoming.first().cloned(),
        upcoming,
        reminders: notifications::upcoming_notifications(
            subscriptions,
            now,
            options.reminder_days,
        ),
        ledger: ledger::generate_ledger(subscriptions, now),
    };
    debug!(
        subscriptions = subscriptions.len(),
        ledger_entries = views.ledger.len(),
        upcoming = views.upcoming.len(),
        "recomputed derived views"
    );
    views
}
