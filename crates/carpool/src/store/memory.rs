//! In-memory record store.

use std::cell::RefCell;
use std::collections::BTreeMap;

use super::RecordStore;
use crate::auth::User;
use crate::error::Result;
use crate::roster::{Roster, RosterDate, RosterRecord};

/// A [`RecordStore`] backed by ordered maps, for tests and dry runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RefCell<BTreeMap<Roster, BTreeMap<RosterDate, RosterRecord>>>,
    users: RefCell<BTreeMap<String, User>>,
}

impl MemoryStore {
    /// An empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records held for `roster`.
    #[must_use]
    pub fn len(&self, roster: Roster) -> usize {
        self.records.borrow().get(&roster).map_or(0, BTreeMap::len)
    }

    /// Whether no records are held for either roster.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.borrow().values().all(BTreeMap::is_empty)
    }
}

impl RecordStore for MemoryStore {
    fn upsert(&self, record: &RosterRecord) -> Result<()> {
        self.records
            .borrow_mut()
            .entry(record.roster())
            .or_default()
            .insert(record.date().clone(), record.clone());
        Ok(())
    }

    fn replace_day(&self, main: &RosterRecord, sub: Option<&RosterRecord>) -> Result<()> {
        let mut records = self.records.borrow_mut();
        let date = main.date().clone();
        records
            .entry(Roster::Main)
            .or_default()
            .insert(date.clone(), main.clone());
        let subs = records.entry(Roster::Sub).or_default();
        match sub {
            Some(record) => subs.insert(date, record.clone()),
            None => subs.remove(&date),
        };
        Ok(())
    }

    fn remove_day(&self, date: &RosterDate) -> Result<()> {
        for records in self.records.borrow_mut().values_mut() {
            records.remove(date);
        }
        Ok(())
    }

    fn query_range(
        &self,
        roster: Roster,
        start: &RosterDate,
        end: &RosterDate,
    ) -> Result<Vec<RosterRecord>> {
        // BTreeMap::range panics on an inverted range
        if start > end {
            return Ok(Vec::new());
        }
        Ok(self
            .records
            .borrow()
            .get(&roster)
            .map(|records| {
                records
                    .range(start.clone()..=end.clone())
                    .map(|(_, record)| record.clone())
                    .collect()
            })
            .unwrap_or_default())
    }

    fn query_all(&self, roster: Roster) -> Result<Vec<RosterRecord>> {
        Ok(self
            .records
            .borrow()
            .get(&roster)
            .map(|records| records.values().cloned().collect())
            .unwrap_or_default())
    }

    fn delete(&self, roster: Roster, date: &RosterDate) -> Result<()> {
        if let Some(records) = self.records.borrow_mut().get_mut(&roster) {
            records.remove(date);
        }
        Ok(())
    }

    fn find_user(&self, username: &str) -> Result<Option<User>> {
        Ok(self.users.borrow().get(username).cloned())
    }

    fn put_user(&self, user: &User) -> Result<()> {
        self.users
            .borrow_mut()
            .insert(user.username.clone(), user.clone());
        Ok(())
    }

    fn count_users(&self) -> Result<usize> {
        Ok(self.users.borrow().len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::{resolve_attendance, resolve_sub_roster, AbsenceFlags, Slot, SubRosterRule};

    fn record(date: &str, driver: Slot) -> RosterRecord {
        resolve_attendance(
            &RosterDate::parse(date).unwrap(),
            driver,
            false,
            &AbsenceFlags::new(),
        )
        .unwrap()
    }

    fn date(value: &str) -> RosterDate {
        RosterDate::parse(value).unwrap()
    }

    #[test]
    fn test_upsert_replaces() {
        let store = MemoryStore::new();
        store.upsert(&record("2024-01-01", Slot::M1)).unwrap();
        store.upsert(&record("2024-01-01", Slot::M2)).unwrap();

        let all = store.query_all(Roster::Main).unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].driver(), Some(Slot::M2));
    }

    #[test]
    fn test_query_all_sorted() {
        let store = MemoryStore::new();
        store.upsert(&record("2024-01-03", Slot::M1)).unwrap();
        store.upsert(&record("2024-01-01", Slot::M2)).unwrap();

        let dates: Vec<String> = store
            .query_all(Roster::Main)
            .unwrap()
            .iter()
            .map(|r| r.date().to_string())
            .collect();
        assert_eq!(dates, vec!["2024-01-01", "2024-01-03"]);
        assert!(store.query_all(Roster::Sub).unwrap().is_empty());
    }

    #[test]
    fn test_query_range_inclusive_and_inverted() {
        let store = MemoryStore::new();
        for d in ["2024-01-01", "2024-01-02", "2024-01-03"] {
            store.upsert(&record(d, Slot::M1)).unwrap();
        }

        let hits = store
            .query_range(Roster::Main, &date("2024-01-02"), &date("2024-01-03"))
            .unwrap();
        assert_eq!(hits.len(), 2);

        let none = store
            .query_range(Roster::Main, &date("2024-01-03"), &date("2024-01-01"))
            .unwrap();
        assert!(none.is_empty());
    }

    #[test]
    fn test_replace_day_drops_stale_sub() {
        let store = MemoryStore::new();
        let sub = resolve_sub_roster(
            &date("2024-01-01"),
            Slot::M2,
            &AbsenceFlags::new(),
            SubRosterRule::HonorAbsences,
        )
        .unwrap();
        store
            .replace_day(&record("2024-01-01", Slot::M5), Some(&sub))
            .unwrap();
        assert_eq!(store.len(Roster::Sub), 1);

        store
            .replace_day(&record("2024-01-01", Slot::M1), None)
            .unwrap();
        assert_eq!(store.len(Roster::Main), 1);
        assert_eq!(store.len(Roster::Sub), 0);

        store.remove_day(&date("2024-01-01")).unwrap();
        store.remove_day(&date("2024-01-01")).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_delete_idempotent() {
        let store = MemoryStore::new();
        store.upsert(&record("2024-01-01", Slot::M1)).unwrap();
        assert_eq!(store.len(Roster::Main), 1);

        store.delete(Roster::Main, &date("2024-01-01")).unwrap();
        store.delete(Roster::Main, &date("2024-01-01")).unwrap();
        store.delete(Roster::Sub, &date("2024-01-01")).unwrap();
        assert!(store.is_empty());
    }
}
