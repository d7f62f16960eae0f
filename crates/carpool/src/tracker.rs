//! Day submission, deletion, and reporting over an injected record store.
//!
//! The [`Tracker`] is what a front end talks to. It turns a submitted form
//! into complete records before writing anything, so a rejected submission
//! leaves the store untouched.

use serde::Serialize;
use tracing::{debug, info};

use crate::auth::Session;
use crate::error::{Error, Result};
use crate::roster::{
    resolve_attendance, resolve_sub_roster, tally, tally_range, AbsenceFlags, CumulativeEntry,
    Roster, RosterDate, RosterRecord, Slot, SubRosterRule,
};
use crate::store::RecordStore;

/// A typed day submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayForm {
    /// The day being recorded.
    pub date: RosterDate,
    /// Main-roster driver.
    pub driver: Slot,
    /// Whether the whole day is off.
    pub holiday: bool,
    /// Slots flagged absent.
    pub absences: AbsenceFlags,
    /// Sub-roster driver, needed when `m5` drives.
    pub sub_driver: Option<Slot>,
}

impl DayForm {
    /// Build a form from raw field values.
    ///
    /// Driver names are matched case-insensitively; absence names must be
    /// canonical. A blank sub-driver counts as none.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDate`] or [`Error::UnknownSlot`] for malformed
    /// fields.
    pub fn parse<I, S>(
        date: &str,
        driver: &str,
        holiday: bool,
        absent_names: I,
        sub_driver: Option<&str>,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let sub_driver = sub_driver
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(Slot::parse_driver)
            .transpose()?;

        Ok(Self {
            date: RosterDate::parse(date)?,
            driver: Slot::parse_driver(driver)?,
            holiday,
            absences: AbsenceFlags::from_names(absent_names)?,
            sub_driver,
        })
    }
}

/// Records written by one submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Submission {
    /// The main-roster record.
    pub main: RosterRecord,
    /// The sub-roster record, if the day produced one.
    pub sub: Option<RosterRecord>,
}

/// Full history with the main-roster tally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Overview {
    /// Every main record, ascending by date.
    pub main_records: Vec<RosterRecord>,
    /// Every sub record, ascending by date.
    pub sub_records: Vec<RosterRecord>,
    /// Tally of `main_records`.
    pub main_tally: Vec<CumulativeEntry>,
}

/// Both rosters and their tallies over an inclusive date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RangeReport {
    /// First date of the range.
    pub start: RosterDate,
    /// Last date of the range.
    pub end: RosterDate,
    /// Main records in range.
    pub main_records: Vec<RosterRecord>,
    /// Sub records in range.
    pub sub_records: Vec<RosterRecord>,
    /// Tally of `main_records`.
    pub main_tally: Vec<CumulativeEntry>,
    /// Tally of `sub_records`.
    pub sub_tally: Vec<CumulativeEntry>,
}

/// Roster operations over a record store.
#[derive(Debug)]
pub struct Tracker<S: RecordStore> {
    store: S,
    sub_rule: SubRosterRule,
}

impl<S: RecordStore> Tracker<S> {
    /// Create a tracker over `store`.
    pub fn new(store: S, sub_rule: SubRosterRule) -> Self {
        Self { store, sub_rule }
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The sub-roster rule in force.
    pub fn sub_rule(&self) -> SubRosterRule {
        self.sub_rule
    }

    /// Record a day, replacing whatever was stored for its date.
    ///
    /// When `m5` drives a sub-roster record is written too, holiday or not;
    /// the holiday only rewrites the main record. Otherwise any sub record
    /// left from an earlier submission for the same date is removed, so the
    /// stored day always matches the latest form. Both rosters are written
    /// in one store operation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Unauthorized`] for visitors, a roster rule error if
    /// the form is rejected (nothing is written in that case), or a store
    /// error.
    pub fn submit_day(&self, session: &Session, form: &DayForm) -> Result<Submission> {
        session.require_editor("submit")?;

        let main = resolve_attendance(&form.date, form.driver, form.holiday, &form.absences)?;

        let sub = if form.driver.triggers_sub_roster() {
            let sub_driver = form.sub_driver.ok_or(Error::MissingSubDriver {
                driver: form.driver,
            })?;
            Some(resolve_sub_roster(
                &form.date,
                sub_driver,
                &form.absences,
                self.sub_rule,
            )?)
        } else {
            if form.sub_driver.is_some() {
                debug!(date = %form.date, driver = %form.driver, "ignoring sub-driver");
            }
            None
        };

        self.store.replace_day(&main, sub.as_ref())?;

        info!(
            date = %form.date,
            driver = ?main.driver(),
            holiday = form.holiday,
            sub = sub.is_some(),
            "Recorded day"
        );
        Ok(Submission { main, sub })
    }

    /// Remove a day from both rosters. Deleting a missing day is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Unauthorized`] for visitors or a store error.
    pub fn delete_day(&self, session: &Session, date: &RosterDate) -> Result<()> {
        session.require_editor("delete")?;
        self.store.remove_day(date)?;
        info!(%date, "Deleted day");
        Ok(())
    }

    /// Every record with the main-roster tally over the whole history.
    ///
    /// # Errors
    ///
    /// Returns a store error, or [`Error::SlotMismatch`] if a stored record
    /// does not fit its roster.
    pub fn overview(&self) -> Result<Overview> {
        let main_records = self.store.query_all(Roster::Main)?;
        let sub_records = self.store.query_all(Roster::Sub)?;
        let main_tally = tally(&main_records, Roster::Main.slots())?;

        debug!(
            main = main_records.len(),
            sub = sub_records.len(),
            "Built overview"
        );
        Ok(Overview {
            main_records,
            sub_records,
            main_tally,
        })
    }

    /// Records and tallies of both rosters for `start..=end`.
    ///
    /// An inverted range is empty and tallies to the initial totals.
    ///
    /// # Errors
    ///
    /// Returns a store error, or [`Error::SlotMismatch`] if a stored record
    /// does not fit its roster.
    pub fn range_report(&self, start: &RosterDate, end: &RosterDate) -> Result<RangeReport> {
        let main_records = self.store.query_range(Roster::Main, start, end)?;
        let sub_records = self.store.query_range(Roster::Sub, start, end)?;
        let main_tally = tally_range(&main_records, Roster::Main.slots())?;
        let sub_tally = tally_range(&sub_records, Roster::Sub.slots())?;

        debug!(
            %start,
            %end,
            main = main_records.len(),
            sub = sub_records.len(),
            "Built range report"
        );
        Ok(RangeReport {
            start: start.clone(),
            end: end.clone(),
            main_records,
            sub_records,
            main_tally,
            sub_tally,
        })
    }
}
