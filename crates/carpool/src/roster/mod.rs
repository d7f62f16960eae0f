//! Roster domain: slots, status codes, records, and the rules that produce
//! and summarize them.
//!
//! Everything here is pure and synchronous. Storage lives in
//! [`crate::store`].

mod date;
mod record;
mod resolve;
mod slot;
mod status;
mod tally;

pub use date::RosterDate;
pub use record::RosterRecord;
pub use resolve::{resolve_attendance, resolve_sub_roster, AbsenceFlags, SubRosterRule};
pub use slot::{Roster, Slot, MAIN_SLOTS, SUB_SLOTS};
pub use status::StatusCode;
pub use tally::{tally, tally_range, CumulativeEntry, INITIAL_CARRY};
