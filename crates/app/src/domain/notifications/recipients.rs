//! Notification Recipients

use async_trait::async_trait;
use mockall::automock;
use serde::{Deserialize, Serialize};

/// Where an operator notification goes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipient {
    pub email: String,
    pub name: Option<String>,
}

impl Recipient {
    /// Name to greet the recipient with.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.email)
    }
}

/// Finds the operator who receives stock alerts and sales reports.
#[automock]
#[async_trait]
pub trait RecipientResolver: Send + Sync {
    /// `None` when no operator is configured; the notification is then skipped.
    async fn resolve(&self) -> Option<Recipient>;
}

/// Resolver backed by a fixed, configured operator.
#[derive(Debug, Clone, Default)]
pub struct StaticRecipientResolver {
    recipient: Option<Recipient>,
}

impl StaticRecipientResolver {
    #[must_use]
    pub fn new(recipient: Option<Recipient>) -> Self {
        Self { recipient }
    }
}

#[async_trait]
impl RecipientResolver for StaticRecipientResolver {
    async fn resolve(&self) -> Option<Recipient> {
        self.recipient.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn static_resolver_returns_configured_recipient() {
        let recipient = Recipient {
            email: "ops@example.com".to_string(),
            name: Some("Ops".to_string()),
        };

        let resolver = StaticRecipientResolver::new(Some(recipient.clone()));

        assert_eq!(resolver.resolve().await, Some(recipient));
        assert_eq!(StaticRecipientResolver::default().resolve().await, None);
    }

    #[test]
    fn display_name_falls_back_to_email() {
        let recipient = Recipient {
            email: "ops@example.com".to_string(),
            name: None,
        };

        assert_eq!(recipient.display_name(), "ops@example.com");
    }
}
