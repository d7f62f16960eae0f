//! Running day counts and carry balances.

use std::collections::BTreeSet;

use serde::Serialize;

use super::{RosterRecord, Slot, StatusCode};
use crate::error::{Error, Result};

/// Carry balance every slot starts with.
pub const INITIAL_CARRY: i64 = 1;

/// One slot's running totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CumulativeEntry {
    /// The slot these totals belong to.
    pub slot: Slot,
    /// Number of records in which the slot drove.
    pub day_count: u32,
    /// Turns owed: starts at [`INITIAL_CARRY`] and drops by one per drive.
    /// Not clamped; it goes negative once a slot has driven more than once.
    pub carry_balance: i64,
}

impl CumulativeEntry {
    /// Totals before any record is counted.
    #[must_use]
    pub fn initial(slot: Slot) -> Self {
        Self {
            slot,
            day_count: 0,
            carry_balance: INITIAL_CARRY,
        }
    }

    /// The `(day_count, carry_balance)` pair.
    #[must_use]
    pub fn pair(&self) -> (u32, i64) {
        (self.day_count, self.carry_balance)
    }
}

/// Tally drives over `records`, one entry per slot in `slots` order.
///
/// Records are counted in the order given; callers pass them sorted by
/// date. Each record must cover exactly the slots in `slots`.
///
/// # Errors
///
/// Returns [`Error::DuplicateSlot`] if `slots` names a slot twice, or
/// [`Error::SlotMismatch`] for the first record whose slot set differs from
/// `slots`.
pub fn tally(records: &[RosterRecord], slots: &[Slot]) -> Result<Vec<CumulativeEntry>> {
    let mut expected = BTreeSet::new();
    for slot in slots {
        if !expected.insert(*slot) {
            return Err(Error::DuplicateSlot { slot: *slot });
        }
    }
    let mut entries: Vec<CumulativeEntry> =
        slots.iter().copied().map(CumulativeEntry::initial).collect();

    for record in records {
        let found: BTreeSet<Slot> = record.slots().collect();
        if found != expected {
            return Err(Error::SlotMismatch {
                date: record.date().to_string(),
                expected: join(&expected),
                found: join(&found),
            });
        }

        for entry in &mut entries {
            if record.status(entry.slot) == Some(StatusCode::Drove) {
                entry.day_count += 1;
                entry.carry_balance -= 1;
            }
        }
    }

    Ok(entries)
}

/// Tally a caller-filtered date range.
///
/// Same computation as [`tally`]; only the records passed in differ.
///
/// # Errors
///
/// Returns [`Error::DuplicateSlot`] or [`Error::SlotMismatch`] as [`tally`]
/// does.
pub fn tally_range(
    records_in_range: &[RosterRecord],
    slots: &[Slot],
) -> Result<Vec<CumulativeEntry>> {
    tally(records_in_range, slots)
}

fn join(slots: &BTreeSet<Slot>) -> String {
    slots
        .iter()
        .map(|slot| slot.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::{
        resolve_attendance, resolve_sub_roster, AbsenceFlags, RosterDate, SubRosterRule,
        MAIN_SLOTS, SUB_SLOTS,
    };

    fn day(date: &str, driver: Slot, absences: &AbsenceFlags) -> RosterRecord {
        resolve_attendance(&RosterDate::parse(date).unwrap(), driver, false, absences).unwrap()
    }

    fn pairs(entries: &[CumulativeEntry]) -> Vec<(u32, i64)> {
        entries.iter().map(CumulativeEntry::pair).collect()
    }

    #[test]
    fn test_empty_history() {
        let entries = tally(&[], MAIN_SLOTS).unwrap();
        assert_eq!(pairs(&entries), vec![(0, 1); 5]);
    }

    #[test]
    fn test_two_day_scenario() {
        let records = vec![
            day("2024-01-01", Slot::M1, &AbsenceFlags::new()),
            day("2024-01-02", Slot::M2, &AbsenceFlags::new().with(Slot::M3)),
        ];
        let entries = tally(&records, MAIN_SLOTS).unwrap();
        assert_eq!(
            pairs(&entries),
            vec![(1, 0), (1, 0), (0, 1), (0, 1), (0, 1)]
        );
    }

    #[test]
    fn test_holiday_never_counts() {
        let record = resolve_attendance(
            &RosterDate::parse("2024-12-25").unwrap(),
            Slot::M3,
            true,
            &AbsenceFlags::new(),
        )
        .unwrap();
        let entries = tally(&[record], MAIN_SLOTS).unwrap();
        assert_eq!(pairs(&entries), vec![(0, 1); 5]);
    }

    #[test]
    fn test_carry_goes_negative() {
        let records: Vec<_> = ["2024-01-01", "2024-01-02", "2024-01-03"]
            .iter()
            .map(|d| day(d, Slot::M4, &AbsenceFlags::new()))
            .collect();
        let entries = tally(&records, MAIN_SLOTS).unwrap();
        assert_eq!(entries[3].pair(), (3, -2));
    }

    #[test]
    fn test_output_follows_slot_order() {
        let records = vec![day("2024-01-01", Slot::M5, &AbsenceFlags::new())];
        let reversed: Vec<Slot> = MAIN_SLOTS.iter().rev().copied().collect();
        let entries = tally(&records, &reversed).unwrap();
        assert_eq!(entries[0].slot, Slot::M5);
        assert_eq!(entries[0].pair(), (1, 0));
        assert_eq!(entries[4].slot, Slot::M1);
    }

    #[test]
    fn test_sub_records_against_main_slots_mismatch() {
        let sub = resolve_sub_roster(
            &RosterDate::parse("2024-01-01").unwrap(),
            Slot::M2,
            &AbsenceFlags::new(),
            SubRosterRule::HonorAbsences,
        )
        .unwrap();
        let err = tally(&[sub.clone()], MAIN_SLOTS).unwrap_err();
        assert!(matches!(err, Error::SlotMismatch { .. }));

        let entries = tally(&[sub], SUB_SLOTS).unwrap();
        assert_eq!(pairs(&entries), vec![(0, 1), (1, 0), (0, 1), (0, 1)]);
    }

    #[test]
    fn test_recomputation_is_identical() {
        let records = vec![
            day("2024-01-01", Slot::M1, &AbsenceFlags::new()),
            day("2024-01-02", Slot::M1, &AbsenceFlags::new()),
        ];
        let first = tally(&records, MAIN_SLOTS).unwrap();
        let second = tally(&records, MAIN_SLOTS).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_duplicate_slots_rejected() {
        let records = vec![day("2024-01-01", Slot::M1, &AbsenceFlags::new())];
        let slots = [Slot::M1, Slot::M1, Slot::M2, Slot::M3, Slot::M4, Slot::M5];

        let err = tally(&records, &slots).unwrap_err();
        assert!(matches!(err, Error::DuplicateSlot { slot: Slot::M1 }));
        assert!(matches!(
            tally(&[], &slots),
            Err(Error::DuplicateSlot { slot: Slot::M1 })
        ));
    }

    #[test]
    fn test_tally_range_matches_tally() {
        let records = vec![day("2024-02-01", Slot::M2, &AbsenceFlags::new())];
        assert_eq!(
            tally_range(&records, MAIN_SLOTS).unwrap(),
            tally(&records, MAIN_SLOTS).unwrap()
        );
    }
}
