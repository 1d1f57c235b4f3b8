//! Subscription records and the write-side payloads used to create or edit them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{billing_cycle::BillingCycle, category::Category};

const MILLIS_PER_DAY: i64 = 86_400_000;

/// A recurring payment owned by a single user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    pub id: Uuid,
    #[serde(rename = "userId")]
    pub owner_id: Uuid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub amount: f64,
    pub currency: String,
    pub billing_cycle: BillingCycle,
    pub start_date: DateTime<Utc>,
    pub next_billing_date: DateTime<Utc>,
    pub category: Category,
    pub color: String,
    pub notify_days_before: u32,
    pub active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

impl Subscription {
    /// Cost of this subscription normalized to one month.
    pub fn monthly_amount(&self) -> f64 {
        self.billing_cycle.monthly_equivalent(self.amount)
    }

    /// Whole days until the next charge, floored, so a charge later today is `0` and one
    /// earlier today is `-1`.
    pub fn days_until_billing(&self, now: DateTime<Utc>) -> i64 {
        let delta = self.next_billing_date - now;
        delta.num_milliseconds().div_euclid(MILLIS_PER_DAY)
    }
}

/// Unvalidated fields supplied when creating a subscription.
///
/// Every field is optional so missing input can be reported per field; dates arrive as text
/// and are parsed while the draft is accepted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SubscriptionDraft {
    pub name: Option<String>,
    pub description: Option<String>,
    pub amount: Option<f64>,
    pub currency: Option<String>,
    pub billing_cycle: Option<BillingCycle>,
    pub category: Option<String>,
    pub start_date: Option<String>,
    pub next_billing_date: Option<String>,
    pub notify_days_before: Option<i64>,
    pub active: Option<bool>,
    pub color: Option<String>,
    pub website: Option<String>,
}

/// Partial update merged into an existing subscription; `None` leaves a field untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SubscriptionPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub amount: Option<f64>,
    pub currency: Option<String>,
    pub billing_cycle: Option<BillingCycle>,
    pub category: Option<String>,
    pub start_date: Option<String>,
    pub next_billing_date: Option<String>,
    pub notify_days_before: Option<i64>,
    pub active: Option<bool>,
    pub color: Option<String>,
    pub website: Option<String>,
}

impl SubscriptionPatch {
    pub fn active(active: bool) -> Self {
        Self {
            active: Some(active),
            ..Self::default()
        }
    }

    pub fn amount(amount: f64) -> Self {
        Self {
            amount: Some(amount),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.amount.is_none()
            && self.currency.is_none()
            && self.billing_cycle.is_none()
            && self.category.is_none()
            && self.start_date.is_none()
            && self.next_billing_date.is_none()
            && self.notify_days_before.is_none()
            && self.active.is_none()
            && self.color.is_none()
            && self.website.is_none()
    }
}
