//! Due-soon window and reminder dates.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::domain::Subscription;

pub const DEFAULT_UPCOMING_DAYS: i64 = 7;
const NOTIFY_DATE_FORMAT: &str = "%b %d, %Y";

/// When a reminder for an upcoming charge should go out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NotifyAt {
    /// The lead time already exceeds the remaining days.
    DueNow,
    On(DateTime<Utc>),
}

impl NotifyAt {
    pub fn label(&self) -> String {
        match self {
            NotifyAt::DueNow => "Today".into(),
            NotifyAt::On(date) => date.format(NOTIFY_DATE_FORMAT).to_string(),
        }
    }
}

/// An active subscription billed inside the requested window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpcomingPayment {
    pub subscription: Subscription,
    pub days_until_billing: i64,
    pub notify_at: NotifyAt,
}

pub fn notify_at(subscription: &Subscription, now: DateTime<Utc>) -> NotifyAt {
    let days_until = subscription.days_until_billing(now);
    let lead = i64::from(subscription.notify_days_before);
    if lead > days_until {
        NotifyAt::DueNow
    } else {
        NotifyAt::On(now + Duration::days(days_until - lead))
    }
}

fn within_window(subscription: &Subscription, now: DateTime<Utc>, days: i64) -> Option<i64> {
    if !subscription.active {
        return None;
    }
    let days_until = subscription.days_until_billing(now);
    (0..=days).contains(&days_until).then_some(days_until)
}

/// Active subscriptions billed within `days` whole days of `now`, soonest charge first.
pub fn upcoming_payments(
    subscriptions: &[Subscription],
    now: DateTime<Utc>,
    days: i64,
) -> Vec<Subscription> {
    let mut upcoming: Vec<Subscription> = subscriptions
        .iter()
        .filter(|subscription| within_window(subscription, now, days).is_some())
        .cloned()
        .collect();
    upcoming.sort_by_key(|subscription| subscription.next_billing_date);
    upcoming
}

/// Same window as [`upcoming_payments`], annotated with day counts and reminder dates and
/// ordered by days until billing.
pub fn upcoming_notifications(
    subscriptions: &[Subscription],
    now: DateTime<Utc>,
    days: i64,
) -> Vec<UpcomingPayment> {
    let mut upcoming: Vec<UpcomingPayment> = subscriptions
        .iter()
        .filter_map(|subscription| {
            within_window(subscription, now, days).map(|days_until_billing| UpcomingPayment {
                subscription: subscription.clone(),
                days_until_billing,
                notify_at: notify_at(subscription, now),
            })
        })
        .collect();
    upcoming.sort_by_key(|payment| payment.days_until_billing);
    upcoming
}

/// Reminder sweep: subscriptions whose charge falls within the lead time, soonest first.
pub fn reminders_due(
    subscriptions: &[Subscription],
    now: DateTime<Utc>,
    lead_days: i64,
) -> Vec<UpcomingPayment> {
    upcoming_notifications(subscriptions, now, lead_days)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BillingCycle, Category};
    use chrono::TimeZone;
    use uuid::Uuid;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 16, 10, 0, 0).unwrap()
    }

    fn due_in(days: i64, notify_days_before: u32) -> Subscription {
        let next = now() + Duration::days(days);
        Subscription {
            id: Uuid::new_v4(),
            owner_id: Uuid::nil(),
            name: format!("due in {days}"),
            description: None,
            amount: 4.0,
            currency: "GBP".into(),
            billing_cycle: BillingCycle::Monthly,
            start_date: next - Duration::days(30),
            next_billing_date: next,
            category: Category::Gaming,
            color: "#8B5CF6".into(),
            notify_days_before,
            active: true,
            website: None,
        }
    }

    #[test]
    fn window_is_inclusive_on_both_ends() {
        let subs = vec![due_in(3, 1)];
        assert_eq!(upcoming_payments(&subs, now(), 7).len(), 1);
        assert_eq!(upcoming_payments(&subs, now(), 3).len(), 1);
        assert!(upcoming_payments(&subs, now(), 2).is_empty());
    }

    #[test]
    fn past_and_inactive_are_excluded() {
        let mut inactive = due_in(1, 0);
        inactive.active = false;
        let mut overdue = due_in(0, 0);
        overdue.next_billing_date = now() - Duration::hours(2);
        assert!(upcoming_payments(&[inactive, overdue], now(), 7).is_empty());
    }

    #[test]
    fn sorted_by_next_billing_date() {
        let subs = vec![due_in(5, 1), due_in(1, 1), due_in(3, 1)];
        let days: Vec<i64> = upcoming_payments(&subs, now(), 7)
            .iter()
            .map(|sub| sub.days_until_billing(now()))
            .collect();
        assert_eq!(days, vec![1, 3, 5]);
    }

    #[test]
    fn lead_time_beyond_remaining_days_is_due_now() {
        let sub = due_in(3, 5);
        assert_eq!(notify_at(&sub, now()), NotifyAt::DueNow);
        assert_eq!(notify_at(&sub, now()).label(), "Today");
    }

    #[test]
    fn notify_date_is_offset_from_now() {
        let sub = due_in(6, 2);
        assert_eq!(notify_at(&sub, now()), NotifyAt::On(now() + Duration::days(4)));
        assert_eq!(notify_at(&sub, now()).label(), "Oct 20, 2026");
        let same_day = due_in(2, 2);
        assert_eq!(notify_at(&same_day, now()), NotifyAt::On(now()));
    }

    #[test]
    fn notifications_carry_day_counts() {
        let subs = vec![due_in(4, 7), due_in(2, 1)];
        let upcoming = upcoming_notifications(&subs, now(), 7);
        assert_eq!(upcoming[0].days_until_billing, 2);
        assert_eq!(upcoming[1].notify_at, NotifyAt::DueNow);
    }

    #[test]
    fn negative_window_matches_nothing() {
        assert!(upcoming_payments(&[due_in(0, 0)], now(), -1).is_empty());
    }
}
