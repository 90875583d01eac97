//! SeaORM entities.

pub mod attendee;
pub mod event;
pub mod user;

use sea_orm::ActiveValue::{self, NotSet, Set};

/// Unsaved domain entities carry id `0`; leave the key to the database then.
pub(crate) fn primary_key(id: i64) -> ActiveValue<i64> {
    if id == 0 { NotSet } else { Set(id) }
}
