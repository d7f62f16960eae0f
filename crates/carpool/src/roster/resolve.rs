//! Turning a submitted day into roster records.
//!
//! Both resolvers are pure: they either return a complete record or an
//! error, and never touch storage.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::{Roster, RosterDate, RosterRecord, Slot, StatusCode};
use crate::error::{Error, Result};

/// Which slots were marked absent on a submitted day.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AbsenceFlags {
    absent: BTreeSet<Slot>,
}

impl AbsenceFlags {
    /// No one absent.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from submitted field names, matched exactly.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownSlot`] for any name that is not a canonical
    /// slot name.
    pub fn from_names<I, S>(names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let absent = names
            .into_iter()
            .map(|name| name.as_ref().parse::<Slot>())
            .collect::<Result<BTreeSet<_>>>()?;
        Ok(Self { absent })
    }

    /// Set the flag for `slot`.
    pub fn set(&mut self, slot: Slot, absent: bool) {
        if absent {
            self.absent.insert(slot);
        } else {
            self.absent.remove(&slot);
        }
    }

    /// Builder form of [`AbsenceFlags::set`] for an absent slot.
    #[must_use]
    pub fn with(mut self, slot: Slot) -> Self {
        self.set(slot, true);
        self
    }

    /// Whether `slot` is flagged absent.
    #[must_use]
    pub fn is_absent(&self, slot: Slot) -> bool {
        self.absent.contains(&slot)
    }

    /// Absent slots in slot order.
    pub fn iter(&self) -> impl Iterator<Item = Slot> + '_ {
        self.absent.iter().copied()
    }
}

impl FromIterator<Slot> for AbsenceFlags {
    fn from_iter<T: IntoIterator<Item = Slot>>(iter: T) -> Self {
        Self {
            absent: iter.into_iter().collect(),
        }
    }
}

/// Resolve the main-roster record for a submitted day.
///
/// Every slot starts as `Absent` or `Present` from its flag, the driver is
/// then set to `Drove`, and a holiday finally overwrites every slot with
/// `Holiday`, the driver included.
///
/// # Errors
///
/// Returns [`Error::InvalidDriverState`] if the driver is flagged absent.
pub fn resolve_attendance(
    date: &RosterDate,
    driver: Slot,
    holiday: bool,
    absences: &AbsenceFlags,
) -> Result<RosterRecord> {
    if absences.is_absent(driver) {
        return Err(Error::InvalidDriverState { driver });
    }

    let mut statuses: BTreeMap<Slot, StatusCode> = Roster::Main
        .slots()
        .iter()
        .map(|slot| {
            let status = if absences.is_absent(*slot) {
                StatusCode::Absent
            } else {
                StatusCode::Present
            };
            (*slot, status)
        })
        .collect();

    statuses.insert(driver, StatusCode::Drove);

    if holiday {
        for status in statuses.values_mut() {
            *status = StatusCode::Holiday;
        }
    }

    trace!(%date, %driver, holiday, "resolved main roster");
    RosterRecord::new(Roster::Main, date.clone(), statuses)
}

/// How the sub roster treats absence flags.
///
/// Two rule sets have been used for the sub roster. The choice is explicit
/// configuration rather than a merge of the two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubRosterRule {
    /// Absent sub slots are `Absent`; an absent sub-driver does not drive.
    #[default]
    HonorAbsences,
    /// Everyone is `Present` except the sub-driver, who drove.
    IgnoreAbsences,
}

/// Resolve the sub-roster record for a day on which `m5` drove.
///
/// Absence flags come from the main-roster submission and are only read
/// under [`SubRosterRule::HonorAbsences`].
///
/// # Errors
///
/// Returns [`Error::InvalidSubDriver`] if `sub_driver` is not a sub-roster
/// slot.
pub fn resolve_sub_roster(
    date: &RosterDate,
    sub_driver: Slot,
    main_absences: &AbsenceFlags,
    rule: SubRosterRule,
) -> Result<RosterRecord> {
    if !Roster::Sub.contains(sub_driver) {
        return Err(Error::InvalidSubDriver { slot: sub_driver });
    }

    let statuses: BTreeMap<Slot, StatusCode> = Roster::Sub
        .slots()
        .iter()
        .map(|slot| {
            let is_driver = *slot == sub_driver;
            let status = match rule {
                SubRosterRule::HonorAbsences => {
                    match (is_driver, main_absences.is_absent(*slot)) {
                        (true, false) => StatusCode::Drove,
                        (_, true) => StatusCode::Absent,
                        (false, false) => StatusCode::Present,
                    }
                }
                SubRosterRule::IgnoreAbsences if is_driver => StatusCode::Drove,
                SubRosterRule::IgnoreAbsences => StatusCode::Present,
            };
            (*slot, status)
        })
        .collect();

    trace!(%date, %sub_driver, ?rule, "resolved sub roster");
    RosterRecord::new(Roster::Sub, date.clone(), statuses)
}
