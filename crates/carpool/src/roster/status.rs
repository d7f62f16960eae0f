//! Attendance status codes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A slot's attendance on one date.
///
/// Persisted as a single character; the codes must stay stable because
/// existing data is stored with them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatusCode {
    /// Drove that day.
    #[serde(rename = "D")]
    Drove,
    /// Rode along.
    #[serde(rename = "P")]
    Present,
    /// Did not ride.
    #[serde(rename = "A")]
    Absent,
    /// Nobody rode.
    #[serde(rename = "H")]
    Holiday,
}

impl StatusCode {
    /// The storage code.
    #[must_use]
    pub fn code(self) -> char {
        match self {
            Self::Drove => 'D',
            Self::Present => 'P',
            Self::Absent => 'A',
            Self::Holiday => 'H',
        }
    }

    /// Decode a storage code.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidStatusCode`] for anything but `D`, `P`, `A`, `H`.
    pub fn from_code(code: char) -> Result<Self> {
        match code {
            'D' => Ok(Self::Drove),
            'P' => Ok(Self::Present),
            'A' => Ok(Self::Absent),
            'H' => Ok(Self::Holiday),
            other => Err(Error::InvalidStatusCode {
                code: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for StatusCode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::from_code(c),
            _ => Err(Error::InvalidStatusCode {
                code: s.to_string(),
            }),
        }
    }
}
