//! Notifications
//!
//! The core decides *that* a message is sent and *what* it says. Delivery itself is an
//! external collaborator behind [`NotificationTransport`].

pub mod dispatcher;
pub mod errors;
pub mod messages;
pub mod recipients;
pub mod transport;

pub use dispatcher::{Delivery, NotificationDispatcher};
pub use errors::NotificationError;
pub use messages::{LowStockAlert, Message, format_amount};
pub use recipients::{MockRecipientResolver, Recipient, RecipientResolver, StaticRecipientResolver};
pub use transport::{LogTransport, MockNotificationTransport, NotificationTransport};
