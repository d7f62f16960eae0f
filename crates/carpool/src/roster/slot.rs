//! Roster slots and the two fixed slot sets.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A named participant position.
///
/// The same label may appear in both rosters; which person it denotes
/// depends on the [`Roster`] that owns the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Slot {
    /// Slot `m1`.
    M1,
    /// Slot `m2`.
    M2,
    /// Slot `m3`.
    M3,
    /// Slot `m4`.
    M4,
    /// Slot `m5`. Main roster only; when it drives, the sub roster is recorded.
    M5,
}

/// Slots of the main roster, in display order.
pub const MAIN_SLOTS: &[Slot] = &[Slot::M1, Slot::M2, Slot::M3, Slot::M4, Slot::M5];

/// Slots of the sub roster, in display order.
pub const SUB_SLOTS: &[Slot] = &[Slot::M1, Slot::M2, Slot::M3, Slot::M4];

impl Slot {
    /// The canonical lowercase name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::M1 => "m1",
            Self::M2 => "m2",
            Self::M3 => "m3",
            Self::M4 => "m4",
            Self::M5 => "m5",
        }
    }

    /// Parse a driver selection, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownSlot`] if the name is not a slot.
    pub fn parse_driver(name: &str) -> Result<Self> {
        name.trim().to_lowercase().parse()
    }

    /// Whether this slot's driving day triggers a sub-roster record.
    #[must_use]
    pub fn triggers_sub_roster(self) -> bool {
        self == Self::M5
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Exact, case-sensitive parse of a canonical slot name.
impl FromStr for Slot {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        MAIN_SLOTS
            .iter()
            .copied()
            .find(|slot| slot.as_str() == s)
            .ok_or_else(|| Error::unknown_slot(s))
    }
}

/// Which roster a record belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Roster {
    /// The five-person main routine.
    Main,
    /// The four-person sub routine, recorded on days `m5` drives.
    Sub,
}

impl Roster {
    /// The fixed slot set of this roster.
    #[must_use]
    pub fn slots(self) -> &'static [Slot] {
        match self {
            Self::Main => MAIN_SLOTS,
            Self::Sub => SUB_SLOTS,
        }
    }

    /// Whether `slot` belongs to this roster.
    #[must_use]
    pub fn contains(self, slot: Slot) -> bool {
        self.slots().contains(&slot)
    }
}

impl fmt::Display for Roster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Main => write!(f, "main"),
            Self::Sub => write!(f, "sub"),
        }
    }
}
