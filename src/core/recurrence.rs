//! Cycle arithmetic and forward projection of billing dates.

use chrono::{DateTime, Duration, Utc};

use crate::domain::{BillingCycle, Subscription};

pub const DEFAULT_HORIZON_DAYS: i64 = 180;
pub const DEFAULT_MAX_OCCURRENCES: usize = 6;
/// Largest horizon accepted from configuration, roughly a century.
pub const MAX_HORIZON_DAYS: i64 = 36_500;
/// Largest occurrence cap accepted from configuration.
pub const MAX_OCCURRENCES: usize = 366;

/// Bounds applied when projecting future occurrences.
///
/// Projection stops at whichever limit is reached first. The occurrence cap does not scale with
/// the cycle length, so weekly subscriptions only ever contribute six charges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectionWindow {
    pub horizon_days: i64,
    pub max_count: usize,
}

impl ProjectionWindow {
    pub fn new(horizon_days: i64, max_count: usize) -> Self {
        Self {
            horizon_days,
            max_count,
        }
    }

    /// First instant that falls outside the window, saturating at the largest representable time.
    pub fn limit(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        Duration::try_days(self.horizon_days)
            .and_then(|horizon| now.checked_add_signed(horizon))
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }
}

impl Default for ProjectionWindow {
    fn default() -> Self {
        Self::new(DEFAULT_HORIZON_DAYS, DEFAULT_MAX_OCCURRENCES)
    }
}

pub fn cycle_length(cycle: BillingCycle) -> Duration {
    cycle.interval()
}

pub fn monthly_equivalent(amount: f64, cycle: BillingCycle) -> f64 {
    cycle.monthly_equivalent(amount)
}

/// Projects upcoming charge dates starting at `next_billing_date`.
///
/// Each emitted date is strictly before `now + horizon_days`; the walk stops at the first
/// candidate outside the horizon or once `max_count` dates were produced.
pub fn project_occurrences(
    subscription: &Subscription,
    now: DateTime<Utc>,
    window: ProjectionWindow,
) -> Vec<DateTime<Utc>> {
    let limit = window.limit(now);
    let step = cycle_length(subscription.billing_cycle);
    let mut occurrences = Vec::new();
    let mut candidate = subscription.next_billing_date;

    while occurrences.len() < window.max_count && candidate < limit {
        occurrences.push(candidate);
        let Some(next) = candidate.checked_add_signed(step) else {
            break;
        };
        candidate = next;
    }

    occurrences
}
