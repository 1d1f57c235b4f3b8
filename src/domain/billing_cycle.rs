//! Billing cadence of a subscription.

use std::{fmt, str::FromStr};

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::errors::SubscriptionError;

/// Average number of weeks in a month used when normalizing weekly charges.
pub const WEEKS_PER_MONTH: f64 = 4.33;

/// Recurrence period of a subscription charge.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum BillingCycle {
    Weekly,
    #[default]
    Monthly,
    Quarterly,
    Yearly,
}

impl BillingCycle {
    pub const ALL: [BillingCycle; 4] = [
        BillingCycle::Weekly,
        BillingCycle::Monthly,
        BillingCycle::Quarterly,
        BillingCycle::Yearly,
    ];

    /// Calendar-naive cycle length in days.
    pub fn days(self) -> i64 {
        match self {
            BillingCycle::Weekly => 7,
            BillingCycle::Monthly => 30,
            BillingCycle::Quarterly => 90,
            BillingCycle::Yearly => 365,
        }
    }

    pub fn interval(self) -> Duration {
        Duration::days(self.days())
    }

    /// Normalizes a charge of `amount` per cycle to its monthly equivalent.
    pub fn monthly_equivalent(self, amount: f64) -> f64 {
        match self {
            BillingCycle::Weekly => amount * WEEKS_PER_MONTH,
            BillingCycle::Monthly => amount,
            BillingCycle::Quarterly => amount / 3.0,
            BillingCycle::Yearly => amount / 12.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BillingCycle::Weekly => "weekly",
            BillingCycle::Monthly => "monthly",
            BillingCycle::Quarterly => "quarterly",
            BillingCycle::Yearly => "yearly",
        }
    }
}

impl fmt::Display for BillingCycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            BillingCycle::Weekly => "Weekly",
            BillingCycle::Monthly => "Monthly",
            BillingCycle::Quarterly => "Quarterly",
            BillingCycle::Yearly => "Yearly",
        };
        f.write_str(label)
    }
}

impl FromStr for BillingCycle {
    type Err = SubscriptionError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        BillingCycle::ALL
            .into_iter()
            .find(|cycle| cycle.as_str() == normalized)
            .ok_or_else(|| {
                SubscriptionError::validation(
                    "billing_cycle",
                    format!("`{value}` is not one of weekly, monthly, quarterly, yearly"),
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(left: f64, right: f64) -> bool {
        (left - right).abs() < 1e-9
    }

    #[test]
    fn monthly_equivalent_matches_table() {
        assert!(close(BillingCycle::Yearly.monthly_equivalent(120.0), 10.0));
        assert!(close(BillingCycle::Weekly.monthly_equivalent(10.0), 43.3));
        assert!(close(BillingCycle::Quarterly.monthly_equivalent(90.0), 30.0));
        assert!(close(BillingCycle::Monthly.monthly_equivalent(9.99), 9.99));
    }

    #[test]
    fn cycle_lengths_are_calendar_naive() {
        let days: Vec<i64> = BillingCycle::ALL.iter().map(|cycle| cycle.days()).collect();
        assert_eq!(days, vec![7, 30, 90, 365]);
        assert_eq!(BillingCycle::Quarterly.interval(), Duration::days(90));
    }

    #[test]
    fn parses_and_serializes_lowercase_names() {
        assert_eq!("Quarterly".parse::<BillingCycle>().unwrap(), BillingCycle::Quarterly);
        assert!("fortnightly".parse::<BillingCycle>().is_err());
        let json = serde_json::to_string(&BillingCycle::Yearly).unwrap();
        assert_eq!(json, "\"yearly\"");
    }
}
