//! Notifications Config

use clap::Args;

use crate::domain::notifications::Recipient;

/// Operator notification settings.
#[derive(Debug, Args)]
pub struct NotificationsConfig {
    /// Email address of the operator who receives stock alerts and sales reports
    #[arg(long, env = "OPERATOR_EMAIL")]
    pub operator_email: Option<String>,

    /// Display name of the operator
    #[arg(long, env = "OPERATOR_NAME")]
    pub operator_name: Option<String>,

    /// Maximum number of low-stock alerts waiting for the worker
    #[arg(long, env = "ALERT_QUEUE_CAPACITY", default_value_t = 1024)]
    pub alert_queue_capacity: usize,
}

impl NotificationsConfig {
    /// The configured operator, if an email address is set.
    #[must_use]
    pub fn recipient(&self) -> Option<Recipient> {
        let email = self.operator_email.as_deref()?.trim();

        if email.is_empty() {
            return None;
        }

        Some(Recipient {
            email: email.to_string(),
            name: self.operator_name.clone(),
        })
    }
}
