//! Storage layer for carpool.
//!
//! Roster records are kept per roster (main and sub) and keyed by date.
//! The [`RecordStore`] trait is the seam between the roster logic and
//! persistence: [`SqliteStore`] is the real backend and [`MemoryStore`]
//! is an in-memory fake for tests.

mod memory;
pub mod schema;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::{SqliteStore, StoreStats};

use crate::auth::User;
use crate::error::Result;
use crate::roster::{Roster, RosterDate, RosterRecord};

/// Persistence for roster records and editor logins.
///
/// Writes are last-write-wins; the store makes no promise about ordering
/// between concurrent writers beyond that.
pub trait RecordStore {
    /// Create or wholesale replace the record for its roster and date.
    ///
    /// # Errors
    ///
    /// Returns a store error if the write fails.
    fn upsert(&self, record: &RosterRecord) -> Result<()>;

    /// Write one day: `main` replaces the main record for its date, and the
    /// sub record for that date becomes `sub`, or is removed when `sub` is
    /// `None`. Either every change lands or none does.
    ///
    /// # Errors
    ///
    /// Returns a store error if any write fails; the stored day is then
    /// left as it was.
    fn replace_day(&self, main: &RosterRecord, sub: Option<&RosterRecord>) -> Result<()>;

    /// Remove `date` from both rosters at once. Removing a missing day is
    /// not an error.
    ///
    /// # Errors
    ///
    /// Returns a store error if the write fails; neither roster is changed
    /// in that case.
    fn remove_day(&self, date: &RosterDate) -> Result<()>;

    /// Records with `start <= date <= end`, ascending by date.
    ///
    /// # Errors
    ///
    /// Returns a store error if the read fails or a stored row is invalid.
    fn query_range(
        &self,
        roster: Roster,
        start: &RosterDate,
        end: &RosterDate,
    ) -> Result<Vec<RosterRecord>>;

    /// Every record of `roster`, ascending by date.
    ///
    /// # Errors
    ///
    /// Returns a store error if the read fails or a stored row is invalid.
    fn query_all(&self, roster: Roster) -> Result<Vec<RosterRecord>>;

    /// Remove the record for `date`. Removing a missing record is not an error.
    ///
    /// # Errors
    ///
    /// Returns a store error if the write fails.
    fn delete(&self, roster: Roster, date: &RosterDate) -> Result<()>;

    /// Look up a login.
    ///
    /// # Errors
    ///
    /// Returns a store error if the read fails.
    fn find_user(&self, username: &str) -> Result<Option<User>>;

    /// Create or replace a login.
    ///
    /// # Errors
    ///
    /// Returns a store error if the write fails.
    fn put_user(&self, user: &User) -> Result<()>;

    /// Number of stored logins.
    ///
    /// # Errors
    ///
    /// Returns a store error if the read fails.
    fn count_users(&self) -> Result<usize>;
}
