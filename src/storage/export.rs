//! Portable JSON document bundling a user's profile, settings, and subscriptions.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{
    domain::{Subscription, UserProfile},
    utils::persistence::{load_json, save_json},
};

use super::Result;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ExportSettings {
    pub notification_days_before: u32,
}

/// The `subscription-data.json` export.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DataExport {
    pub user: UserProfile,
    pub settings: ExportSettings,
    pub subscriptions: Vec<Subscription>,
}

impl DataExport {
    pub fn new(
        user: UserProfile,
        notification_days_before: u32,
        subscriptions: Vec<Subscription>,
    ) -> Self {
        Self {
            user,
            settings: ExportSettings {
                notification_days_before,
            },
            subscriptions,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

pub fn save_export(export: &DataExport, path: &Path) -> Result<()> {
    save_json(export, path)
}

pub fn load_export(path: &Path) -> Result<DataExport> {
    load_json(path)
}
