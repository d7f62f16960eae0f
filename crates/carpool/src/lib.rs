//! `carpool` - A roster tracker for a shared carpool
//!
//! This library records, per date, who drove, rode, was absent, or had the
//! day off, keeps a secondary sub roster for days the fifth member drives,
//! and tallies driving days and carry balances over any stretch of history.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod auth;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod roster;
pub mod store;
pub mod tracker;

pub use auth::{authenticate, register_user, Session, ViewMode};
pub use config::Config;
pub use error::{Error, Result};
pub use logging::init_logging;
pub use roster::{
    resolve_attendance, resolve_sub_roster, tally, tally_range, AbsenceFlags, CumulativeEntry,
    Roster, RosterDate, RosterRecord, Slot, StatusCode, SubRosterRule,
};
pub use store::{MemoryStore, RecordStore, SqliteStore, StoreStats};
pub use tracker::{DayForm, Overview, RangeReport, Submission, Tracker};
