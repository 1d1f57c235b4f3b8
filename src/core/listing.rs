//! Filtering, search, and ordering of the subscription list.

use std::{cmp::Ordering, str::FromStr};

use crate::{domain::Subscription, errors::SubscriptionError};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    Inactive,
}

impl StatusFilter {
    pub fn matches(self, subscription: &Subscription) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Active => subscription.active,
            StatusFilter::Inactive => !subscription.active,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = SubscriptionError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(StatusFilter::All),
            "active" => Ok(StatusFilter::Active),
            "inactive" => Ok(StatusFilter::Inactive),
            other => Err(SubscriptionError::validation(
                "status",
                format!("unknown status filter `{other}`"),
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    #[default]
    Name,
    Amount,
    /// Next billing date.
    Date,
}

impl FromStr for SortKey {
    type Err = SubscriptionError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "name" => Ok(SortKey::Name),
            "amount" => Ok(SortKey::Amount),
            "date" => Ok(SortKey::Date),
            other => Err(SubscriptionError::validation(
                "sort",
                format!("unknown sort key `{other}`"),
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

/// List view parameters. The default shows everything by name, A to Z.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubscriptionQuery {
    pub status: StatusFilter,
    pub search: Option<String>,
    pub sort: SortKey,
    pub direction: SortDirection,
}

impl SubscriptionQuery {
    pub fn apply(&self, subscriptions: &[Subscription]) -> Vec<Subscription> {
        let needle = self
            .search
            .as_deref()
            .map(|term| term.trim().to_lowercase())
            .filter(|term| !term.is_empty());

        let mut listed: Vec<Subscription> = subscriptions
            .iter()
            .filter(|subscription| self.status.matches(subscription))
            .filter(|subscription| match &needle {
                Some(needle) => matches_search(subscription, needle),
                None => true,
            })
            .cloned()
            .collect();

        listed.sort_by(|a, b| {
            let ordering = compare(self.sort, a, b);
            match self.direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        });
        listed
    }
}

fn matches_search(subscription: &Subscription, needle: &str) -> bool {
    subscription.name.to_lowercase().contains(needle)
        || subscription
            .description
            .as_deref()
            .is_some_and(|description| description.to_lowercase().contains(needle))
        || subscription
            .category
            .label()
            .to_lowercase()
            .contains(needle)
}

fn compare(key: SortKey, a: &Subscription, b: &Subscription) -> Ordering {
    match key {
        SortKey::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
        SortKey::Amount => a.amount.total_cmp(&b.amount),
        SortKey::Date => a.next_billing_date.cmp(&b.next_billing_date),
    }
}
