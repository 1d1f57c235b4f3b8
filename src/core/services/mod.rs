pub mod notification_service;
pub mod subscription_service;
pub mod validation;

pub use notification_service::{
    DispatchReport, NotificationAck, NotificationService, Notifier, TracingNotifier,
};
pub use subscription_service::SubscriptionService;

use crate::errors::SubscriptionError;

pub type ServiceResult<T> = Result<T, SubscriptionError>;
