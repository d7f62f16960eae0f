//! Plain-text tables for roster reports.

use std::fmt::Write;

use crate::roster::{CumulativeEntry, Roster, RosterRecord};

/// One row per record: the date followed by each slot's status code.
#[must_use]
pub fn records_table(roster: Roster, records: &[RosterRecord]) -> String {
    let mut out = String::from("date      ");
    for slot in roster.slots() {
        let _ = write!(out, "  {slot}");
    }
    out.push('\n');

    if records.is_empty() {
        out.push_str("(no records)\n");
        return out;
    }

    for record in records {
        out.push_str(record.date().as_str());
        for slot in roster.slots() {
            let code = record.status(*slot).map_or('-', |status| status.code());
            let _ = write!(out, "   {code}");
        }
        out.push('\n');
    }
    out
}

/// One row per slot with its driving days and carry balance.
#[must_use]
pub fn tally_table(entries: &[CumulativeEntry]) -> String {
    let mut out = String::from("slot   days   carry\n");
    for entry in entries {
        let _ = writeln!(
            out,
            "{:<4} {:>6} {:>7}",
            entry.slot.as_str(),
            entry.day_count,
            entry.carry_balance
        );
    }
    out
}
