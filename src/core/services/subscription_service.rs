//! Validated CRUD over a user's subscriptions.

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::{
    domain::{Subscription, SubscriptionDraft, SubscriptionPatch},
    errors::SubscriptionError,
    storage::SubscriptionRepository,
    utils::identity::{ColorPicker, IdGenerator, PaletteColors, UuidGenerator},
};

use super::{validation, ServiceResult};

const FALLBACK_CURRENCY: &str = "USD";

/// Write boundary for subscription records.
///
/// Every field is validated before the repository is touched, so a rejected write leaves the
/// stored snapshot unchanged.
pub struct SubscriptionService {
    repository: Box<dyn SubscriptionRepository>,
    ids: Box<dyn IdGenerator>,
    colors: Box<dyn ColorPicker>,
    default_currency: String,
}

impl SubscriptionService {
    pub fn new(repository: Box<dyn SubscriptionRepository>) -> Self {
        Self::with_generators(
            repository,
            Box::new(UuidGenerator),
            Box::new(PaletteColors::random()),
        )
    }

    pub fn with_generators(
        repository: Box<dyn SubscriptionRepository>,
        ids: Box<dyn IdGenerator>,
        colors: Box<dyn ColorPicker>,
    ) -> Self {
        Self {
            repository,
            ids,
            colors,
            default_currency: FALLBACK_CURRENCY.into(),
        }
    }

    /// Currency applied to drafts that omit one.
    pub fn with_default_currency(mut self, code: &str) -> ServiceResult<Self> {
        self.default_currency = validation::validate_currency(code)?;
        Ok(self)
    }

    pub fn repository(&self) -> &dyn SubscriptionRepository {
        self.repository.as_ref()
    }

    pub fn list(&self, owner_id: Uuid) -> ServiceResult<Vec<Subscription>> {
        self.repository.list(owner_id)
    }

    /// Strict lookup: unknown ids are reported as [`SubscriptionError::NotFound`].
    pub fn get(&self, owner_id: Uuid, id: Uuid) -> ServiceResult<Subscription> {
        self.repository
            .get(owner_id, id)?
            .ok_or(SubscriptionError::NotFound(id))
    }

    /// Validates a draft, assigns its id and color, and stores it.
    pub fn create(
        &mut self,
        owner_id: Uuid,
        draft: SubscriptionDraft,
    ) -> ServiceResult<Subscription> {
        let subscription = self.accept_draft(owner_id, draft).inspect_err(|err| {
            warn!(%owner_id, error = %err, "rejected new subscription");
        })?;
        self.repository.insert(subscription.clone())?;
        info!(
            %owner_id,
            id = %subscription.id,
            name = %subscription.name,
            "added subscription"
        );
        Ok(subscription)
    }

    /// Merges `patch` into the stored record. Unknown ids are a no-op returning `false`.
    pub fn update(
        &mut self,
        owner_id: Uuid,
        id: Uuid,
        patch: SubscriptionPatch,
    ) -> ServiceResult<bool> {
        let Some(existing) = self.repository.get(owner_id, id)? else {
            debug!(%owner_id, %id, "update ignored for unknown subscription");
            return Ok(false);
        };
        let merged = apply_patch(existing, patch).inspect_err(|err| {
            warn!(%owner_id, %id, error = %err, "rejected subscription update");
        })?;
        let replaced = self.repository.replace(merged)?;
        if replaced {
            info!(%owner_id, %id, "updated subscription");
        }
        Ok(replaced)
    }

    /// Removes a record. Unknown ids are a no-op returning `false`.
    pub fn delete(&mut self, owner_id: Uuid, id: Uuid) -> ServiceResult<bool> {
        let removed = self.repository.remove(owner_id, id)?;
        if removed {
            info!(%owner_id, %id, "deleted subscription");
        } else {
            debug!(%owner_id, %id, "delete ignored for unknown subscription");
        }
        Ok(removed)
    }

    /// Flips `active`, returning the new state, or `None` for unknown ids.
    pub fn toggle_active(&mut self, owner_id: Uuid, id: Uuid) -> ServiceResult<Option<bool>> {
        let Some(existing) = self.repository.get(owner_id, id)? else {
            return Ok(None);
        };
        let active = !existing.active;
        self.update(owner_id, id, SubscriptionPatch::active(active))?;
        Ok(Some(active))
    }

    fn accept_draft(
        &mut self,
        owner_id: Uuid,
        draft: SubscriptionDraft,
    ) -> ServiceResult<Subscription> {
        let name = validation::require_text("name", draft.name)?;
        let amount = draft
            .amount
            .ok_or_else(|| SubscriptionError::missing("amount"))
            .and_then(validation::validate_amount)?;
        let category = validation::require_text("category", draft.category)
            .and_then(|label| validation::validate_category(&label))?;
        let start_date = validation::parse_date("start_date", draft.start_date)?;
        let next_billing_date =
            validation::parse_date("next_billing_date", draft.next_billing_date)?;
        let notify_days_before = draft
            .notify_days_before
            .ok_or_else(|| SubscriptionError::missing("notify_days_before"))
            .and_then(validation::validate_notify_days)?;
        validation::validate_schedule(start_date, next_billing_date)?;
        let currency = match draft.currency {
            Some(code) => validation::validate_currency(&code)?,
            None => self.default_currency.clone(),
        };
        let website = validation::validate_website(draft.website)?;
        let description = draft
            .description
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty());

        let color = match draft.color.filter(|color| !color.trim().is_empty()) {
            Some(color) => color,
            None => self.colors.pick(),
        };

        Ok(Subscription {
            id: self.ids.next_id(),
            owner_id,
            name,
            description,
            amount,
            currency,
            billing_cycle: draft.billing_cycle.unwrap_or_default(),
            start_date,
            next_billing_date,
            category,
            color,
            notify_days_before,
            active: draft.active.unwrap_or(true),
            website,
        })
    }
}

/// Applies every provided field to a copy of `existing`, validating as it goes.
fn apply_patch(
    mut existing: Subscription,
    patch: SubscriptionPatch,
) -> ServiceResult<Subscription> {
    if let Some(name) = patch.name {
        existing.name = validation::require_text("name", Some(name))?;
    }
    if let Some(description) = patch.description {
        let trimmed = description.trim();
        existing.description = (!trimmed.is_empty()).then(|| trimmed.to_string());
    }
    if let Some(amount) = patch.amount {
        existing.amount = validation::validate_amount(amount)?;
    }
    if let Some(code) = patch.currency {
        existing.currency = validation::validate_currency(&code)?;
    }
    if let Some(cycle) = patch.billing_cycle {
        existing.billing_cycle = cycle;
    }
    if let Some(category) = patch.category {
        existing.category = validation::validate_category(&category)?;
    }
    if let Some(raw) = patch.start_date {
        existing.start_date = validation::parse_date("start_date", Some(raw))?;
    }
    if let Some(raw) = patch.next_billing_date {
        existing.next_billing_date = validation::parse_date("next_billing_date", Some(raw))?;
    }
    if let Some(days) = patch.notify_days_before {
        existing.notify_days_before = validation::validate_notify_days(days)?;
    }
    if let Some(active) = patch.active {
        existing.active = active;
    }
    if let Some(color) = patch.color.filter(|color| !color.trim().is_empty()) {
        existing.color = color;
    }
    if patch.website.is_some() {
        existing.website = validation::validate_website(patch.website)?;
    }
    validation::validate_schedule(existing.start_date, existing.next_billing_date)?;
    Ok(existing)
}
