use std::path::{Path, PathBuf};

use tracing::debug;
use uuid::Uuid;

use crate::{
    domain::Subscription,
    utils::{
        paths,
        persistence::{load_json, save_json},
    },
};

use super::{Result, SubscriptionRepository};

const FILE_PREFIX: &str = "subscriptions-";
const FILE_EXTENSION: &str = "json";

/// Filesystem-backed repository storing one JSON array per user.
#[derive(Debug, Clone)]
pub struct JsonRepository {
    dir: PathBuf,
}

impl JsonRepository {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Repository rooted at `<base>/subscriptions`.
    pub fn in_base_dir(base: &Path) -> Self {
        Self::new(paths::subscriptions_dir_in(base))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn file_for(&self, owner_id: Uuid) -> PathBuf {
        self.dir
            .join(format!("{FILE_PREFIX}{owner_id}.{FILE_EXTENSION}"))
    }

    fn write(&self, owner_id: Uuid, records: &[Subscription]) -> Result<()> {
        let path = self.file_for(owner_id);
        save_json(records, &path)?;
        debug!(path = %path.display(), records = records.len(), "saved subscriptions");
        Ok(())
    }
}

impl SubscriptionRepository for JsonRepository {
    fn list(&self, owner_id: Uuid) -> Result<Vec<Subscription>> {
        let path = self.file_for(owner_id);
        if !path.exists() {
            return Ok(Vec::new());
        }
        load_json(&path)
    }

    fn insert(&mut self, subscription: Subscription) -> Result<()> {
        let owner_id = subscription.owner_id;
        let mut records = self.list(owner_id)?;
        records.push(subscription);
        self.write(owner_id, &records)
    }

    fn replace(&mut self, subscription: Subscription) -> Result<bool> {
        let owner_id = subscription.owner_id;
        let mut records = self.list(owner_id)?;
        let Some(existing) = records
            .iter_mut()
            .find(|existing| existing.id == subscription.id)
        else {
            return Ok(false);
        };
        *existing = subscription;
        self.write(owner_id, &records)?;
        Ok(true)
    }

    fn remove(&mut self, owner_id: Uuid, id: Uuid) -> Result<bool> {
        let mut records = self.list(owner_id)?;
        let before = records.len();
        records.retain(|subscription| subscription.id != id);
        if records.len() == before {
            return Ok(false);
        }
        self.write(owner_id, &records)?;
        Ok(true)
    }
}
