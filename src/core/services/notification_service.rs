//! Reminder delivery through a pluggable [`Notifier`].

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use crate::{
    core::notifications::{self, UpcomingPayment},
    domain::Subscription,
    errors::SubscriptionError,
};

use super::{validation, ServiceResult};

/// Receipt returned by a [`Notifier`] for an accepted message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotificationAck {
    pub destination: String,
    pub subject: String,
}

/// Outbound channel for reminders. Fire-and-forget: an `Ok` means the message was handed off.
pub trait Notifier {
    fn notify(
        &mut self,
        destination: &str,
        subject: &str,
        body: &str,
    ) -> ServiceResult<NotificationAck>;
}

/// Writes each notification to the log instead of delivering it.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(
        &mut self,
        destination: &str,
        subject: &str,
        body: &str,
    ) -> ServiceResult<NotificationAck> {
        info!(destination, subject, body, "notification");
        Ok(NotificationAck {
            destination: destination.to_string(),
            subject: subject.to_string(),
        })
    }
}

/// Outcome of a reminder sweep.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DispatchReport {
    pub sent: Vec<NotificationAck>,
    /// Names of subscriptions whose reminder was refused, with the reason.
    pub failed: Vec<(String, String)>,
}

impl DispatchReport {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

pub struct NotificationService;

impl NotificationService {
    /// Sends one reminder per subscription due within `lead_days`.
    ///
    /// A refused message is recorded in the report and does not stop the sweep.
    pub fn dispatch_reminders(
        notifier: &mut dyn Notifier,
        destination: &str,
        subscriptions: &[Subscription],
        now: DateTime<Utc>,
        lead_days: i64,
    ) -> ServiceResult<DispatchReport> {
        validation::validate_email(destination)?;
        let mut report = DispatchReport::default();
        for payment in notifications::reminders_due(subscriptions, now, lead_days) {
            let (subject, body) = reminder_message(&payment);
            match notifier.notify(destination, &subject, &body) {
                Ok(ack) => report.sent.push(ack),
                Err(err) => {
                    warn!(
                        subscription = %payment.subscription.name,
                        error = %err,
                        "reminder not delivered"
                    );
                    report
                        .failed
                        .push((payment.subscription.name.clone(), err.to_string()));
                }
            }
        }
        info!(
            sent = report.sent.len(),
            failed = report.failed.len(),
            "reminder sweep finished"
        );
        Ok(report)
    }

    /// Sends a sample message confirming the reminder settings.
    pub fn send_test_notification(
        notifier: &mut dyn Notifier,
        destination: &str,
        lead_days: u32,
    ) -> ServiceResult<NotificationAck> {
        validation::validate_email(destination)?;
        let body = format!(
            "This is a test notification. You will receive reminders {lead_days} days before your subscription payments."
        );
        notifier
            .notify(destination, "Test Notification", &body)
            .map_err(|err| {
                warn!(destination, error = %err, "test notification failed");
                match err {
                    SubscriptionError::Notification(message) => {
                        SubscriptionError::Notification(message)
                    }
                    other => SubscriptionError::Notification(other.to_string()),
                }
            })
    }
}

fn reminder_message(payment: &UpcomingPayment) -> (String, String) {
    let subscription = &payment.subscription;
    let subject = format!("Upcoming payment: {}", subscription.name);
    let when = match payment.days_until_billing {
        0 => "today".to_string(),
        1 => "tomorrow".to_string(),
        days => format!("in {days} days"),
    };
    let body = format!(
        "{} will charge {:.2} {} {} ({}).",
        subscription.name,
        subscription.amount,
        subscription.currency,
        when,
        subscription.next_billing_date.format("%b %d, %Y"),
    );
    (subject, body)
}
