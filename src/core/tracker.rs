use chrono::{DateTime, Utc};
use tracing::info;
use uuid::Uuid;

use crate::{
    config::Config,
    domain::{Subscription, SubscriptionDraft, SubscriptionPatch, Transaction, UserProfile},
    storage::{DataExport, SubscriptionRepository},
};

use super::{
    clock::{Clock, SystemClock},
    ledger::{self, LedgerFilter},
    listing::SubscriptionQuery,
    services::{DispatchReport, NotificationService, Notifier, ServiceResult, SubscriptionService},
    views::{recompute, DerivedViews, RecomputeOptions},
};

/// One user's session over the subscription store.
///
/// Every mutation is written through the service and followed by a full recomputation, so the
/// returned [`DerivedViews`] always reflect the stored snapshot at the clock's current time.
pub struct SubscriptionTracker {
    owner_id: Uuid,
    service: SubscriptionService,
    clock: Box<dyn Clock>,
    config: Config,
}

impl SubscriptionTracker {
    /// Session on the system clock. Drafts without a currency get `config.default_currency`.
    pub fn new(owner_id: Uuid, service: SubscriptionService, config: Config) -> ServiceResult<Self> {
        Self::with_clock(owner_id, service, config, Box::new(SystemClock))
    }

    pub fn with_clock(
        owner_id: Uuid,
        service: SubscriptionService,
        config: Config,
        clock: Box<dyn Clock>,
    ) -> ServiceResult<Self> {
        let service = service.with_default_currency(&config.default_currency)?;
        Ok(Self {
            owner_id,
            service,
            clock,
            config,
        })
    }

    pub fn owner_id(&self) -> Uuid {
        self.owner_id
    }

    /// Reference time used by every read.
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn repository(&self) -> &dyn SubscriptionRepository {
        self.service.repository()
    }

    pub fn subscriptions(&self) -> ServiceResult<Vec<Subscription>> {
        self.service.list(self.owner_id)
    }

    pub fn list(&self, query: &SubscriptionQuery) -> ServiceResult<Vec<Subscription>> {
        Ok(query.apply(&self.subscriptions()?))
    }

    pub fn views(&self) -> ServiceResult<DerivedViews> {
        let snapshot = self.subscriptions()?;
        Ok(recompute(
            &snapshot,
            self.clock.now(),
            RecomputeOptions::from(&self.config),
        ))
    }

    pub fn ledger(&self, filter: &LedgerFilter) -> ServiceResult<Vec<Transaction>> {
        let now = self.clock.now();
        let history = ledger::generate_ledger(&self.subscriptions()?, now);
        Ok(filter.apply(&history, now))
    }

    pub fn add(&mut self, draft: SubscriptionDraft) -> ServiceResult<(Subscription, DerivedViews)> {
        let created = self.service.create(self.owner_id, draft)?;
        Ok((created, self.views()?))
    }

    pub fn edit(&mut self, id: Uuid, patch: SubscriptionPatch) -> ServiceResult<DerivedViews> {
        self.service.update(self.owner_id, id, patch)?;
        self.views()
    }

    pub fn remove(&mut self, id: Uuid) -> ServiceResult<DerivedViews> {
        self.service.delete(self.owner_id, id)?;
        self.views()
    }

    pub fn toggle_active(&mut self, id: Uuid) -> ServiceResult<DerivedViews> {
        self.service.toggle_active(self.owner_id, id)?;
        self.views()
    }

    pub fn dispatch_reminders(
        &self,
        notifier: &mut dyn Notifier,
        destination: &str,
    ) -> ServiceResult<DispatchReport> {
        NotificationService::dispatch_reminders(
            notifier,
            destination,
            &self.subscriptions()?,
            self.clock.now(),
            i64::from(self.config.notification_days_before),
        )
    }

    /// Bundles the profile, reminder settings, and every stored subscription.
    pub fn export(&self, user: UserProfile) -> ServiceResult<DataExport> {
        let subscriptions = self.subscriptions()?;
        info!(
            owner_id = %self.owner_id,
            subscriptions = subscriptions.len(),
            "exported subscription data"
        );
        Ok(DataExport::new(
            user,
            self.config.notification_days_before,
            subscriptions,
        ))
    }
}
