//! Spend aggregates over the active subscription set.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::domain::{round_cents, Category, Subscription};

use super::recurrence::{project_occurrences, ProjectionWindow};

/// Number of 30-day steps sampled for the cash-outflow summary buckets.
pub const SUMMARY_MONTHS: u32 = 6;
const BUCKET_STEP_DAYS: i64 = 30;
const BUCKET_LABEL_FORMAT: &str = "%b";

/// Monthly-equivalent spend of one category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    pub category: Category,
    pub monthly_amount: f64,
}

/// Projected raw charges falling in a month, keyed by its abbreviation only.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthBucket {
    pub label: String,
    pub amount: f64,
}

fn active(subscriptions: &[Subscription]) -> impl Iterator<Item = &Subscription> {
    subscriptions.iter().filter(|subscription| subscription.active)
}

pub fn active_count(subscriptions: &[Subscription]) -> usize {
    active(subscriptions).count()
}

/// Sum of monthly-equivalent amounts over active subscriptions. Not rounded.
pub fn total_monthly_expense(subscriptions: &[Subscription]) -> f64 {
    active(subscriptions)
        .map(Subscription::monthly_amount)
        .sum()
}

pub fn yearly_projection(subscriptions: &[Subscription]) -> f64 {
    total_monthly_expense(subscriptions) * 12.0
}

/// Monthly-equivalent totals per category, in first-seen order, rounded to cents.
pub fn category_totals(subscriptions: &[Subscription]) -> Vec<CategoryTotal> {
    let mut totals: Vec<CategoryTotal> = Vec::new();
    for subscription in active(subscriptions) {
        let amount = subscription.monthly_amount();
        match totals
            .iter_mut()
            .find(|total| total.category == subscription.category)
        {
            Some(total) => total.monthly_amount += amount,
            None => totals.push(CategoryTotal {
                category: subscription.category,
                monthly_amount: amount,
            }),
        }
    }
    for total in &mut totals {
        total.monthly_amount = round_cents(total.monthly_amount);
    }
    totals
}

/// Month abbreviations of `now + 30 * i` days for `i` in `0..SUMMARY_MONTHS`.
///
/// Names are de-duplicated in first-seen order, so a month can be skipped (`Jan 31` steps to
/// `Mar 2`) and a run may yield fewer than `SUMMARY_MONTHS` buckets.
pub fn bucket_labels(now: DateTime<Utc>) -> Vec<String> {
    let mut labels: Vec<String> = Vec::new();
    for step in 0..i64::from(SUMMARY_MONTHS) {
        let Some(at) = now.checked_add_signed(Duration::days(step * BUCKET_STEP_DAYS)) else {
            break;
        };
        let label = at.format(BUCKET_LABEL_FORMAT).to_string();
        if !labels.contains(&label) {
            labels.push(label);
        }
    }
    labels
}

/// Six-month cash-outflow projection.
///
/// Every projected occurrence of an active subscription adds its raw amount to the bucket with
/// the same month abbreviation. Buckets carry no year, so occurrences from a different year that
/// share a month name land in the same bucket; occurrences whose month has no bucket are dropped.
pub fn billing_summary(
    subscriptions: &[Subscription],
    now: DateTime<Utc>,
    window: ProjectionWindow,
) -> Vec<MonthBucket> {
    let mut buckets: Vec<MonthBucket> = bucket_labels(now)
        .into_iter()
        .map(|label| MonthBucket { label, amount: 0.0 })
        .collect();

    for subscription in active(subscriptions) {
        for occurrence in project_occurrences(subscription, now, window) {
            let label = occurrence.format(BUCKET_LABEL_FORMAT).to_string();
            if let Some(bucket) = buckets.iter_mut().find(|bucket| bucket.label == label) {
                bucket.amount += subscription.amount;
            }
        }
    }

    for bucket in &mut buckets {
        bucket.amount = round_cents(bucket.amount);
    }
    buckets
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::BillingCycle;
    use chrono::{Duration, TimeZone};
    use uuid::Uuid;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 10, 9, 0, 0).unwrap()
    }

    fn subscription(
        amount: f64,
        cycle: BillingCycle,
        category: Category,
        next: DateTime<Utc>,
    ) -> Subscription {
        Subscription {
            id: Uuid::new_v4(),
            owner_id: Uuid::nil(),
            name: format!("{category} {cycle}"),
            description: None,
            amount,
            currency: "USD".into(),
            billing_cycle: cycle,
            start_date: next - Duration::days(400),
            next_billing_date: next,
            category,
            color: "#14B8A6".into(),
            notify_days_before: 3,
            active: true,
            website: None,
        }
    }

    fn amounts(buckets: &[MonthBucket]) -> Vec<f64> {
        buckets.iter().map(|bucket| bucket.amount).collect()
    }

    #[test]
    fn total_ignores_inactive_subscriptions() {
        let next = now() + Duration::days(3);
        let mut paused = subscription(120.0, BillingCycle::Yearly, Category::Cloud, next);
        paused.active = false;
        let subs = vec![
            subscription(15.49, BillingCycle::Monthly, Category::Video, next),
            paused,
        ];
        assert!((total_monthly_expense(&subs) - 15.49).abs() < 1e-9);
        assert!((yearly_projection(&subs) - 185.88).abs() < 1e-9);
        assert_eq!(active_count(&subs), 1);
    }

    #[test]
    fn category_totals_group_and_round() {
        let next = now() + Duration::days(3);
        let subs = vec![
            subscription(10.0, BillingCycle::Quarterly, Category::Music, next),
            subscription(10.0, BillingCycle::Weekly, Category::Fitness, next),
            subscription(10.0, BillingCycle::Quarterly, Category::Music, next),
        ];
        let totals = category_totals(&subs);
        assert_eq!(
            totals,
            vec![
                CategoryTotal {
                    category: Category::Music,
                    monthly_amount: 6.67,
                },
                CategoryTotal {
                    category: Category::Fitness,
                    monthly_amount: 43.3,
                },
            ]
        );
    }

    #[test]
    fn buckets_step_thirty_days() {
        let labels = bucket_labels(now());
        assert_eq!(labels, vec!["Jan", "Feb", "Mar", "Apr", "May", "Jun"]);
    }

    #[test]
    fn month_end_steps_skip_and_merge_names() {
        // Jan 31, Mar 2, Apr 1, May 1, May 31, Jun 30.
        let late = Utc.with_ymd_and_hms(2026, 1, 31, 0, 0, 0).unwrap();
        assert_eq!(bucket_labels(late), vec!["Jan", "Mar", "Apr", "May", "Jun"]);
    }

    #[test]
    fn skipped_month_drops_its_occurrences() {
        let late = Utc.with_ymd_and_hms(2026, 1, 31, 0, 0, 0).unwrap();
        let next = Utc.with_ymd_and_hms(2026, 2, 1, 0, 0, 0).unwrap();
        let subs = vec![subscription(10.0, BillingCycle::Monthly, Category::Video, next)];
        let summary = billing_summary(&subs, late, ProjectionWindow::default());
        // Feb 1 has no bucket; Mar 3, Apr 2, May 2 and Jun 1 do; Jul 1 has none.
        assert_eq!(amounts(&summary), vec![0.0, 10.0, 10.0, 10.0, 10.0]);
    }

    #[test]
    fn monthly_subscription_fills_each_bucket() {
        let next = Utc.with_ymd_and_hms(2026, 1, 20, 9, 0, 0).unwrap();
        let subs = vec![subscription(10.0, BillingCycle::Monthly, Category::Video, next)];
        let summary = billing_summary(&subs, now(), ProjectionWindow::default());
        assert_eq!(amounts(&summary), vec![10.0; 6]);
    }

    #[test]
    fn month_names_merge_across_years() {
        // A stale next billing date a year back still lands in this year's "Jan" bucket.
        let stale = now() - Duration::days(365);
        let subs = vec![subscription(1.0, BillingCycle::Weekly, Category::News, stale)];
        let summary = billing_summary(&subs, now(), ProjectionWindow::default());
        assert_eq!(amounts(&summary), vec![4.0, 2.0, 0.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn occurrences_outside_the_buckets_are_dropped() {
        let december = Utc.with_ymd_and_hms(2025, 12, 1, 9, 0, 0).unwrap();
        let subs = vec![subscription(5.0, BillingCycle::Monthly, Category::Food, december)];
        let summary = billing_summary(&subs, now(), ProjectionWindow::default());
        // Dec 1, Dec 31 have no bucket; Jan 30, Mar 1, Mar 31, Apr 30 do.
        assert_eq!(amounts(&summary), vec![5.0, 0.0, 10.0, 5.0, 0.0, 0.0]);
    }
}
