use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{category::Category, subscription::Subscription};

/// A single synthesized charge in a subscription's payment history.
///
/// Transactions are never persisted; they are rebuilt from the current subscription fields on
/// every ledger query.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub subscription_id: Uuid,
    pub subscription_name: String,
    pub date: DateTime<Utc>,
    pub amount: f64,
    pub currency: String,
    pub category: Category,
    pub color: String,
}

impl Transaction {
    pub fn charge(subscription: &Subscription, date: DateTime<Utc>) -> Self {
        Self {
            subscription_id: subscription.id,
            subscription_name: subscription.name.clone(),
            date,
            amount: subscription.amount,
            currency: subscription.currency.clone(),
            category: subscription.category,
            color: subscription.color.clone(),
        }
    }
}
