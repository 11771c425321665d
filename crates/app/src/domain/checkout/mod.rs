//! Checkout
//!
//! Turns a user's cart into a completed order in one transaction: stock is locked,
//! lines are priced from the locked rows, stock is decremented and the cart is cleared.
//! Low-stock alerts are handed to the alert queue only after the commit.

pub mod errors;
pub mod service;

pub use errors::CheckoutError;
pub use service::*;
