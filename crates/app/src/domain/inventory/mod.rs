//! Inventory Ledger
//!
//! Owns `available_quantity`. Every operation runs on a caller-supplied transaction so the
//! checkout can validate, lock and decrement stock inside one unit of work.

pub mod errors;
pub(crate) mod ledger;
pub mod records;

pub use errors::InventoryError;
