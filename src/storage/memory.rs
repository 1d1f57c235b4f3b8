use std::collections::HashMap;

use uuid::Uuid;

use crate::domain::Subscription;

use super::{Result, SubscriptionRepository};

/// Volatile repository keeping every user's records in memory.
#[derive(Debug, Default, Clone)]
pub struct InMemoryRepository {
    records: HashMap<Uuid, Vec<Subscription>>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the repository with existing records, grouped by owner.
    pub fn with_records(records: impl IntoIterator<Item = Subscription>) -> Self {
        let mut repo = Self::default();
        for subscription in records {
            repo.records
                .entry(subscription.owner_id)
                .or_default()
                .push(subscription);
        }
        repo
    }
}

impl SubscriptionRepository for InMemoryRepository {
    fn list(&self, owner_id: Uuid) -> Result<Vec<Subscription>> {
        Ok(self.records.get(&owner_id).cloned().unwrap_or_default())
    }

    fn insert(&mut self, subscription: Subscription) -> Result<()> {
        self.records
            .entry(subscription.owner_id)
            .or_default()
            .push(subscription);
        Ok(())
    }

    fn replace(&mut self, subscription: Subscription) -> Result<bool> {
        let Some(records) = self.records.get_mut(&subscription.owner_id) else {
            return Ok(false);
        };
        match records.iter_mut().find(|existing| existing.id == subscription.id) {
            Some(existing) => {
                *existing = subscription;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn remove(&mut self, owner_id: Uuid, id: Uuid) -> Result<bool> {
        let Some(records) = self.records.get_mut(&owner_id) else {
            return Ok(false);
        };
        let before = records.len();
        records.retain(|subscription| subscription.id != id);
        Ok(records.len() != before)
    }
}
