//! Storefront Domain Concerns

pub mod alerts;
pub mod carts;
pub mod checkout;
pub mod inventory;
pub mod notifications;
pub mod orders;
pub mod products;
pub mod reports;
pub mod users;
