//! Closed set of subscription categories.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::errors::SubscriptionError;

/// Spending category a subscription is filed under.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Category {
    Entertainment,
    Music,
    Video,
    Gaming,
    Software,
    Cloud,
    News,
    Fitness,
    Food,
    Shopping,
    Other,
}

impl Category {
    pub const ALL: [Category; 11] = [
        Category::Entertainment,
        Category::Music,
        Category::Video,
        Category::Gaming,
        Category::Software,
        Category::Cloud,
        Category::News,
        Category::Fitness,
        Category::Food,
        Category::Shopping,
        Category::Other,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Category::Entertainment => "Entertainment",
            Category::Music => "Music",
            Category::Video => "Video",
            Category::Gaming => "Gaming",
            Category::Software => "Software",
            Category::Cloud => "Cloud",
            Category::News => "News",
            Category::Fitness => "Fitness",
            Category::Food => "Food",
            Category::Shopping => "Shopping",
            Category::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = SubscriptionError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        Category::ALL
            .into_iter()
            .find(|category| category.label().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| {
                SubscriptionError::validation("category", format!("unknown category `{value}`"))
            })
    }
}
