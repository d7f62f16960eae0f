//! One date's attendance row.

use std::collections::BTreeMap;

use serde::Serialize;

use super::{Roster, RosterDate, Slot, StatusCode};
use crate::error::{Error, Result};

/// The full slot-to-status assignment of one roster on one date.
///
/// Records are replaced wholesale; there is no field-level mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RosterRecord {
    date: RosterDate,
    roster: Roster,
    #[serde(flatten)]
    statuses: BTreeMap<Slot, StatusCode>,
}

impl RosterRecord {
    /// Build a record, checking that it covers exactly the roster's slots
    /// and has at most one driver.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IncompleteRecord`] if the slots differ from the
    /// roster's slot set and [`Error::MultipleDrivers`] if more than one
    /// slot drove.
    pub fn new(
        roster: Roster,
        date: RosterDate,
        statuses: BTreeMap<Slot, StatusCode>,
    ) -> Result<Self> {
        let covers = statuses.len() == roster.slots().len()
            && roster.slots().iter().all(|slot| statuses.contains_key(slot));
        if !covers {
            return Err(Error::IncompleteRecord {
                roster,
                date: date.to_string(),
            });
        }

        let drivers = statuses
            .values()
            .filter(|status| **status == StatusCode::Drove)
            .count();
        if drivers > 1 {
            return Err(Error::MultipleDrivers {
                date: date.to_string(),
            });
        }

        Ok(Self {
            date,
            roster,
            statuses,
        })
    }

    /// The record's date key.
    #[must_use]
    pub fn date(&self) -> &RosterDate {
        &self.date
    }

    /// The roster this record belongs to.
    #[must_use]
    pub fn roster(&self) -> Roster {
        self.roster
    }

    /// Status of `slot`, or `None` if the slot is not in this roster.
    #[must_use]
    pub fn status(&self, slot: Slot) -> Option<StatusCode> {
        self.statuses.get(&slot).copied()
    }

    /// Slots and statuses in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (Slot, StatusCode)> + '_ {
        self.statuses.iter().map(|(slot, status)| (*slot, *status))
    }

    /// Slots covered by this record, in slot order.
    pub fn slots(&self) -> impl Iterator<Item = Slot> + '_ {
        self.statuses.keys().copied()
    }

    /// The slot that drove, if any.
    #[must_use]
    pub fn driver(&self) -> Option<Slot> {
        self.iter()
            .find(|(_, status)| *status == StatusCode::Drove)
            .map(|(slot, _)| slot)
    }

    /// Whether the record marks a day off.
    #[must_use]
    pub fn is_holiday(&self) -> bool {
        self.statuses
            .values()
            .any(|status| *status == StatusCode::Holiday)
    }
}
