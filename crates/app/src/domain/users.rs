//! Users
//!
//! Accounts live with the authentication collaborator; this core only needs a stable
//! identifier to own carts and orders.

use crate::uuids::TypedUuid;

/// User Record marker
#[derive(Debug)]
pub struct UserRecord;

/// User UUID
pub type UserUuid = TypedUuid<UserRecord>;
