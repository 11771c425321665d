//! Storefront checkout and replenishment core.

pub mod config;
pub mod context;
pub mod database;
pub mod domain;
pub mod observability;

#[cfg(test)]
mod test;

mod uuids;
