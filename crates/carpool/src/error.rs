//! Error types for carpool.
//!
//! This module defines all error types used throughout the carpool crate.
//! Roster rule violations are typed variants so callers can decide how to
//! surface them; storage failures carry the underlying `rusqlite` error.

use std::path::PathBuf;
use thiserror::Error;

use crate::roster::{Roster, Slot};

/// The main error type for carpool operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Roster Rule Errors ===
    /// The selected driver was also flagged absent.
    #[error("the selected driver cannot be marked as absent: {driver}")]
    InvalidDriverState {
        /// The driver that was flagged absent.
        driver: Slot,
    },

    /// Records were tallied against a slot set they do not cover.
    #[error("slot mismatch on {date}: expected [{expected}], found [{found}]")]
    SlotMismatch {
        /// Date of the offending record.
        date: String,
        /// Slots the caller asked to tally.
        expected: String,
        /// Slots the record actually holds.
        found: String,
    },

    /// The sub-driver is not a member of the sub roster.
    #[error("{slot} is not a sub-roster slot")]
    InvalidSubDriver {
        /// The rejected slot.
        slot: Slot,
    },

    /// The main driver is `m5` but no sub-driver was given.
    #[error("a sub-driver is required when {driver} drives")]
    MissingSubDriver {
        /// The main-roster driver.
        driver: Slot,
    },

    /// A record marks more than one slot as having driven.
    #[error("record for {date} has more than one driver")]
    MultipleDrivers {
        /// Date of the offending record.
        date: String,
    },

    /// A tally was asked to count the same slot twice.
    #[error("slot {slot} is listed more than once")]
    DuplicateSlot {
        /// The repeated slot.
        slot: Slot,
    },

    /// A record does not assign a status to every slot of its roster.
    #[error("{roster} record for {date} does not cover every slot")]
    IncompleteRecord {
        /// The roster the record belongs to.
        roster: Roster,
        /// Date of the offending record.
        date: String,
    },

    // === Input Errors ===
    /// A slot name outside the fixed slot sets.
    #[error("unknown slot: '{name}'")]
    UnknownSlot {
        /// The name that was given.
        name: String,
    },

    /// A date that is not a zero-padded `YYYY-MM-DD` calendar date.
    #[error("invalid date '{value}': expected YYYY-MM-DD")]
    InvalidDate {
        /// The value that was given.
        value: String,
    },

    /// A stored status that is not one of `D`, `P`, `A`, `H`.
    #[error("invalid status code: '{code}'")]
    InvalidStatusCode {
        /// The code that was read.
        code: String,
    },

    // === Auth Errors ===
    /// Unknown user or wrong password.
    #[error("invalid username or password")]
    InvalidCredentials,

    /// A visitor tried an editor-only operation.
    #[error("{operation} requires an editor login")]
    Unauthorized {
        /// The operation that was refused.
        operation: &'static str,
    },

    /// A password could not be hashed for storage.
    #[error("failed to hash password: {message}")]
    PasswordHash {
        /// Description of the hashing failure.
        message: String,
    },

    // === Storage Errors ===
    /// The record store failed.
    #[error("record store unavailable: {0}")]
    StoreUnavailable(#[from] rusqlite::Error),

    /// Failed to open or create the database.
    #[error("failed to open database at {path}: {source}")]
    DatabaseOpen {
        /// Path to the database file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: rusqlite::Error,
    },

    /// Failed to create a required directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },
}

/// A specialized Result type for carpool operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create an unknown slot error.
    #[must_use]
    pub fn unknown_slot(name: impl Into<String>) -> Self {
        Self::UnknownSlot { name: name.into() }
    }

    /// Create an invalid date error.
    #[must_use]
    pub fn invalid_date(value: impl Into<String>) -> Self {
        Self::InvalidDate {
            value: value.into(),
        }
    }

    /// Check if this error is a roster business-rule violation.
    ///
    /// These are rejected submissions, not faults.
    #[must_use]
    pub fn is_rule_violation(&self) -> bool {
        matches!(
            self,
            Self::InvalidDriverState { .. }
                | Self::InvalidSubDriver { .. }
                | Self::MissingSubDriver { .. }
                | Self::MultipleDrivers { .. }
        )
    }

    /// Check if this error came from the record store.
    #[must_use]
    pub fn is_store_error(&self) -> bool {
        matches!(
            self,
            Self::StoreUnavailable(_) | Self::DatabaseOpen { .. }
        )
    }

    /// Check if this error is an authentication or authorization failure.
    #[must_use]
    pub fn is_auth_error(&self) -> bool {
        matches!(self, Self::InvalidCredentials | Self::Unauthorized { .. })
    }
}
