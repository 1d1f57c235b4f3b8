//! Persistence collaborators holding subscription records per user.

pub mod export;
pub mod json_backend;
pub mod memory;

use uuid::Uuid;

use crate::{domain::Subscription, errors::SubscriptionError};

pub type Result<T> = std::result::Result<T, SubscriptionError>;

/// User-keyed store of subscription records.
///
/// Implementations persist records verbatim; validation and id assignment happen in
/// [`crate::core::services::SubscriptionService`] before anything reaches the store.
pub trait SubscriptionRepository: Send {
    /// Full snapshot of one user's subscriptions in insertion order.
    fn list(&self, owner_id: Uuid) -> Result<Vec<Subscription>>;

    fn insert(&mut self, subscription: Subscription) -> Result<()>;

    /// Replaces the stored record with the same owner and id. Returns `false` when absent.
    fn replace(&mut self, subscription: Subscription) -> Result<bool>;

    /// Removes a record. Returns `false` when absent.
    fn remove(&mut self, owner_id: Uuid, id: Uuid) -> Result<bool>;

    fn get(&self, owner_id: Uuid, id: Uuid) -> Result<Option<Subscription>> {
        Ok(self
            .list(owner_id)?
            .into_iter()
            .find(|subscription| subscription.id == id))
    }
}

pub use export::{load_export, save_export, DataExport, ExportSettings};
pub use json_backend::JsonRepository;
pub use memory::InMemoryRepository;
