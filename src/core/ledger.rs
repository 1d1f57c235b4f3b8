//! Synthesized payment history.
//!
//! The ledger replays each active subscription's cycle from its start date up to the reference
//! time. Nothing here is persisted: editing a subscription's amount rewrites every past entry on
//! the next query.

use std::str::FromStr;

use chrono::{DateTime, Months, Utc};

use crate::{
    domain::{Subscription, Transaction},
    errors::SubscriptionError,
};

const MONTH_GROUP_FORMAT: &str = "%B %Y";

/// Replays one subscription's charges from `start_date` up to and including `now`.
pub fn replay_subscription(subscription: &Subscription, now: DateTime<Utc>) -> Vec<Transaction> {
    if !subscription.active {
        return Vec::new();
    }
    let step = subscription.billing_cycle.interval();
    let mut charges = Vec::new();
    let mut date = subscription.start_date;
    while date <= now {
        charges.push(Transaction::charge(subscription, date));
        date += step;
    }
    charges
}

/// Builds the full ledger across all subscriptions, most recent charge first.
pub fn generate_ledger(subscriptions: &[Subscription], now: DateTime<Utc>) -> Vec<Transaction> {
    let mut ledger: Vec<Transaction> = subscriptions
        .iter()
        .flat_map(|subscription| replay_subscription(subscription, now))
        .collect();
    ledger.sort_by(|a, b| b.date.cmp(&a.date));
    ledger
}

/// Transactions sharing a calendar month, labelled like `October 2026`.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthGroup {
    pub label: String,
    pub transactions: Vec<Transaction>,
}

impl MonthGroup {
    pub fn total(&self) -> f64 {
        total_amount(&self.transactions)
    }
}

/// Groups transactions by month label, keeping the order in which months first appear.
pub fn group_by_month(transactions: &[Transaction]) -> Vec<MonthGroup> {
    let mut groups: Vec<MonthGroup> = Vec::new();
    for txn in transactions {
        let label = txn.date.format(MONTH_GROUP_FORMAT).to_string();
        match groups.iter_mut().find(|group| group.label == label) {
            Some(group) => group.transactions.push(txn.clone()),
            None => groups.push(MonthGroup {
                label,
                transactions: vec![txn.clone()],
            }),
        }
    }
    groups
}

pub fn total_amount(transactions: &[Transaction]) -> f64 {
    transactions.iter().map(|txn| txn.amount).sum()
}

/// Sums per currency code, in first-seen order. Amounts are never converted.
pub fn totals_by_currency(transactions: &[Transaction]) -> Vec<(String, f64)> {
    let mut totals: Vec<(String, f64)> = Vec::new();
    for txn in transactions {
        match totals.iter_mut().find(|(code, _)| *code == txn.currency) {
            Some((_, total)) => *total += txn.amount,
            None => totals.push((txn.currency.clone(), txn.amount)),
        }
    }
    totals
}

/// Look-back period applied to a ledger listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LedgerPeriod {
    #[default]
    All,
    LastMonth,
    LastQuarter,
    LastYear,
}

impl LedgerPeriod {
    /// Entries must fall strictly after this instant; `None` keeps everything.
    ///
    /// Calendar months are subtracted with day clamping, so March 31 minus one month is
    /// February 28.
    pub fn cutoff(self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let months = match self {
            LedgerPeriod::All => return None,
            LedgerPeriod::LastMonth => 1,
            LedgerPeriod::LastQuarter => 3,
            LedgerPeriod::LastYear => 12,
        };
        Some(
            now.checked_sub_months(Months::new(months))
                .unwrap_or(DateTime::<Utc>::MIN_UTC),
        )
    }
}

impl FromStr for LedgerPeriod {
    type Err = SubscriptionError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(LedgerPeriod::All),
            "month" => Ok(LedgerPeriod::LastMonth),
            "quarter" => Ok(LedgerPeriod::LastQuarter),
            "year" => Ok(LedgerPeriod::LastYear),
            other => Err(SubscriptionError::validation(
                "period",
                format!("`{other}` is not one of all, month, quarter, year"),
            )),
        }
    }
}

/// Period and free-text filter over ledger entries.
#[derive(Debug, Clone, Default)]
pub struct LedgerFilter {
    pub period: LedgerPeriod,
    pub search: Option<String>,
}

impl LedgerFilter {
    pub fn apply(&self, transactions: &[Transaction], now: DateTime<Utc>) -> Vec<Transaction> {
        let cutoff = self.period.cutoff(now);
        let term = self
            .search
            .as_deref()
            .map(str::trim)
            .filter(|term| !term.is_empty())
            .map(str::to_lowercase);

        transactions
            .iter()
            .filter(|txn| cutoff.map_or(true, |cutoff| txn.date > cutoff))
            .filter(|txn| match &term {
                Some(term) => {
                    txn.subscription_name.to_lowercase().contains(term)
                        || txn.category.label().to_lowercase().contains(term)
                }
                None => true,
            })
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BillingCycle, Category};
    use chrono::{Duration, TimeZone};
    use uuid::Uuid;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 15, 12, 0, 0).unwrap()
    }

    fn subscription(name: &str, cycle: BillingCycle, start_days_ago: i64) -> Subscription {
        let start = now() - Duration::days(start_days_ago);
        Subscription {
            id: Uuid::new_v4(),
            owner_id: Uuid::nil(),
            name: name.into(),
            description: None,
            amount: 5.0,
            currency: "USD".into(),
            billing_cycle: cycle,
            start_date: start,
            next_billing_date: start + cycle.interval(),
            category: Category::News,
            color: "#EC4899".into(),
            notify_days_before: 1,
            active: true,
            website: None,
        }
    }

    #[test]
    fn replay_includes_charge_exactly_at_now() {
        let sub = subscription("Paper", BillingCycle::Weekly, 14);
        let charges = replay_subscription(&sub, now());
        assert_eq!(charges.len(), 3);
        assert_eq!(charges.last().unwrap().date, now());
    }

    #[test]
    fn future_start_produces_no_history() {
        let sub = subscription("Later", BillingCycle::Monthly, -1);
        assert!(replay_subscription(&sub, now()).is_empty());
    }

    #[test]
    fn inactive_subscription_is_omitted() {
        let mut sub = subscription("Paused", BillingCycle::Weekly, 60);
        sub.active = false;
        assert!(generate_ledger(&[sub], now()).is_empty());
    }

    #[test]
    fn ledger_is_sorted_most_recent_first() {
        let subs = vec![
            subscription("Weekly", BillingCycle::Weekly, 20),
            subscription("Monthly", BillingCycle::Monthly, 45),
        ];
        let ledger = generate_ledger(&subs, now());
        assert_eq!(ledger.len(), 3 + 2);
        assert!(ledger.windows(2).all(|pair| pair[0].date >= pair[1].date));
    }

    #[test]
    fn groups_follow_ledger_order() {
        // Feb 23, Mar 2, Mar 9.
        let sub = subscription("Weekly", BillingCycle::Weekly, 20);
        let ledger = generate_ledger(&[sub], now());
        let groups = group_by_month(&ledger);
        let labels: Vec<&str> = groups.iter().map(|g| g.label.as_str()).collect();
        assert_eq!(labels, vec!["March 2026", "February 2026"]);
        assert_eq!(groups[0].transactions.len(), 2);
        assert_eq!(groups[0].total(), 10.0);
    }

    #[test]
    fn filter_applies_period_and_search() {
        let subs = vec![
            subscription("Daily Paper", BillingCycle::Weekly, 70),
            subscription("Cloud Drive", BillingCycle::Monthly, 70),
        ];
        let ledger = generate_ledger(&subs, now());
        let filter = LedgerFilter {
            period: LedgerPeriod::LastMonth,
            search: Some("PAPER".into()),
        };
        let filtered = filter.apply(&ledger, now());
        let cutoff = LedgerPeriod::LastMonth.cutoff(now()).unwrap();
        assert!(!filtered.is_empty());
        assert!(filtered
            .iter()
            .all(|txn| txn.subscription_name == "Daily Paper" && txn.date > cutoff));
        assert_eq!(total_amount(&filtered), 5.0 * filtered.len() as f64);
    }

    #[test]
    fn search_matches_category_label() {
        let sub = subscription("Daily Paper", BillingCycle::Weekly, 7);
        let ledger = generate_ledger(&[sub], now());
        let filter = LedgerFilter {
            period: LedgerPeriod::All,
            search: Some("news".into()),
        };
        assert_eq!(filter.apply(&ledger, now()).len(), ledger.len());
    }

    #[test]
    fn currencies_are_totalled_separately() {
        let mut euro = subscription("Radio", BillingCycle::Weekly, 14);
        euro.currency = "EUR".into();
        euro.amount = 2.0;
        let subs = vec![subscription("Paper", BillingCycle::Weekly, 14), euro];
        let ledger = generate_ledger(&subs, now());
        let totals = totals_by_currency(&ledger);
        assert_eq!(
            totals,
            vec![("USD".to_string(), 15.0), ("EUR".to_string(), 6.0)]
        );
    }

    #[test]
    fn month_end_cutoff_clamps_to_shorter_month() {
        let end_of_march = Utc.with_ymd_and_hms(2026, 3, 31, 12, 0, 0).unwrap();
        assert_eq!(
            LedgerPeriod::LastMonth.cutoff(end_of_march),
            Some(Utc.with_ymd_and_hms(2026, 2, 28, 12, 0, 0).unwrap())
        );
        assert_eq!(
            LedgerPeriod::LastQuarter.cutoff(end_of_march),
            Some(Utc.with_ymd_and_hms(2025, 12, 31, 12, 0, 0).unwrap())
        );
    }

    #[test]
    fn parses_period_names() {
        assert_eq!("quarter".parse::<LedgerPeriod>().unwrap(), LedgerPeriod::LastQuarter);
        assert!("decade".parse::<LedgerPeriod>().is_err());
    }
}
