use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::common::{require_text, validate_email};
use crate::errors::SubscriptionError;

/// Account details of the user owning a subscription set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserProfile {
    #[serde(skip)]
    pub id: Uuid,
    pub username: String,
    pub email: String,
}

impl UserProfile {
    /// Builds a profile after checking that both fields are present and the email is well formed.
    pub fn new(
        id: Uuid,
        username: impl Into<String>,
        email: impl Into<String>,
    ) -> Result<Self, SubscriptionError> {
        let username = require_text("username", Some(username.into()))?;
        let email = require_text("email", Some(email.into()))?;
        validate_email(&email)?;
        Ok(Self {
            id,
            username,
            email,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_blank_username_and_bad_email() {
        let err = UserProfile::new(Uuid::nil(), "  ", "a@b.io").unwrap_err();
        assert_eq!(err.field(), Some("username"));
        let err = UserProfile::new(Uuid::nil(), "sam", "not-an-email").unwrap_err();
        assert_eq!(err.field(), Some("email"));
    }

    #[test]
    fn trims_accepted_fields() {
        let profile = UserProfile::new(Uuid::nil(), " sam ", "sam@example.com").unwrap();
        assert_eq!(profile.username, "sam");
    }
}
