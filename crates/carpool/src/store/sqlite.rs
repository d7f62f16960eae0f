//! `SQLite` record store.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use rusqlite::{params, params_from_iter, Connection, OptionalExtension};
use tracing::{debug, info};

use super::schema::{self, table_name};
use super::RecordStore;
use crate::auth::User;
use crate::error::{Error, Result};
use crate::roster::{Roster, RosterDate, RosterRecord, Slot, StatusCode};

/// Persistent storage for roster records using `SQLite`.
///
/// Each roster has its own table with one row per date and one
/// single-character status column per slot.
#[derive(Debug)]
pub struct SqliteStore {
    /// Path to the database file.
    path: PathBuf,
    /// Database connection.
    conn: Connection,
}

/// A stored row before validation: the date and one code per slot.
type RawRow = (String, Vec<String>);

impl SqliteStore {
    /// Open or create a database at the given path.
    ///
    /// Creates the parent directories and database file if they don't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or the tables
    /// cannot be created.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreate {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        debug!("Opening database at {}", path.display());
        let conn = Connection::open(&path).map_err(|source| Error::DatabaseOpen {
            path: path.clone(),
            source,
        })?;

        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL;")?;
        schema::initialize_schema(&conn)?;

        info!("Database opened at {}", path.display());
        Ok(Self { path, conn })
    }

    /// Create an in-memory store.
    ///
    /// # Errors
    ///
    /// Returns an error if the in-memory database cannot be created.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|source| Error::DatabaseOpen {
            path: PathBuf::from(":memory:"),
            source,
        })?;

        schema::initialize_schema(&conn)?;

        Ok(Self {
            path: PathBuf::from(":memory:"),
            conn,
        })
    }

    /// Get the path to the database file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Count the records of a roster.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn count(&self, roster: Roster) -> Result<i64> {
        let sql = format!("SELECT COUNT(*) FROM {}", table_name(roster));
        let count: i64 = self.conn.query_row(&sql, [], |row| row.get(0))?;
        Ok(count)
    }

    /// Get database statistics.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn stats(&self) -> Result<StoreStats> {
        let main_records = self.count(Roster::Main)?;
        let sub_records = self.count(Roster::Sub)?;
        let users: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))?;

        let (first_date, last_date): (Option<String>, Option<String>) = self.conn.query_row(
            "SELECT MIN(date), MAX(date) FROM main_routine",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?;

        let db_size_bytes = if self.path.to_string_lossy() == ":memory:" {
            0
        } else {
            std::fs::metadata(&self.path).map(|m| m.len()).unwrap_or(0)
        };

        Ok(StoreStats {
            main_records,
            sub_records,
            users,
            first_date,
            last_date,
            db_size_bytes,
        })
    }

    /// Make every write to the sub roster fail.
    #[cfg(test)]
    pub(crate) fn refuse_sub_writes(&self) -> Result<()> {
        self.conn.execute_batch(
            "CREATE TRIGGER refuse_sub_insert BEFORE INSERT ON sub_routine
             BEGIN SELECT RAISE(ABORT, 'sub roster is read-only'); END;
             CREATE TRIGGER refuse_sub_delete BEFORE DELETE ON sub_routine
             BEGIN SELECT RAISE(ABORT, 'sub roster is read-only'); END;",
        )?;
        Ok(())
    }

    /// Run a SELECT over a roster table and validate every row.
    fn select(
        &self,
        roster: Roster,
        filter: &str,
        args: &[&dyn rusqlite::ToSql],
    ) -> Result<Vec<RosterRecord>> {
        let columns = slot_columns(roster);
        let sql = format!(
            "SELECT date, {columns} FROM {table} {filter} ORDER BY date ASC",
            table = table_name(roster),
        );
        let slot_count = roster.slots().len();

        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt
            .query_map(args, |row| {
                let date: String = row.get(0)?;
                let codes = (1..=slot_count)
                    .map(|i| row.get::<_, String>(i))
                    .collect::<rusqlite::Result<Vec<_>>>()?;
                Ok((date, codes))
            })?
            .collect::<std::result::Result<Vec<RawRow>, _>>()?;

        rows.into_iter()
            .map(|row| row_to_record(roster, row))
            .collect()
    }
}

impl RecordStore for SqliteStore {
    fn upsert(&self, record: &RosterRecord) -> Result<()> {
        write_record(&self.conn, record)
    }

    fn replace_day(&self, main: &RosterRecord, sub: Option<&RosterRecord>) -> Result<()> {
        let tx = self.conn.unchecked_transaction()?;
        write_record(&tx, main)?;
        match sub {
            Some(record) => write_record(&tx, record)?,
            None => {
                delete_record(&tx, Roster::Sub, main.date())?;
            }
        }
        tx.commit()?;
        debug!("Replaced day {}", main.date());
        Ok(())
    }

    fn remove_day(&self, date: &RosterDate) -> Result<()> {
        let tx = self.conn.unchecked_transaction()?;
        for roster in [Roster::Main, Roster::Sub] {
            delete_record(&tx, roster, date)?;
        }
        tx.commit()?;
        Ok(())
    }

    fn query_range(
        &self,
        roster: Roster,
        start: &RosterDate,
        end: &RosterDate,
    ) -> Result<Vec<RosterRecord>> {
        self.select(
            roster,
            "WHERE date >= ?1 AND date <= ?2",
            &[&start.as_str(), &end.as_str()],
        )
    }

    fn query_all(&self, roster: Roster) -> Result<Vec<RosterRecord>> {
        self.select(roster, "", &[])
    }

    fn delete(&self, roster: Roster, date: &RosterDate) -> Result<()> {
        delete_record(&self.conn, roster, date)?;
        Ok(())
    }

    fn find_user(&self, username: &str) -> Result<Option<User>> {
        let user = self
            .conn
            .query_row(
                "SELECT username, passwd FROM users WHERE username = ?1",
                [username],
                |row| {
                    Ok(User {
                        username: row.get(0)?,
                        password_hash: row.get(1)?,
                    })
                },
            )
            .optional()?;
        Ok(user)
    }

    fn put_user(&self, user: &User) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO users (username, passwd) VALUES (?1, ?2)",
            params![user.username, user.password_hash],
        )?;
        Ok(())
    }

    fn count_users(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))?;
        Ok(usize::try_from(count).unwrap_or_default())
    }
}

/// Insert or replace one record on `conn`.
fn write_record(conn: &Connection, record: &RosterRecord) -> Result<()> {
    let roster = record.roster();
    let placeholders = (1..=roster.slots().len() + 1)
        .map(|i| format!("?{i}"))
        .collect::<Vec<_>>()
        .join(", ");
    let sql = format!(
        "INSERT OR REPLACE INTO {table} (date, {columns}) VALUES ({placeholders})",
        table = table_name(roster),
        columns = slot_columns(roster),
    );

    let mut values = vec![record.date().to_string()];
    values.extend(record.iter().map(|(_, status)| status.to_string()));

    conn.execute(&sql, params_from_iter(values.iter()))?;
    debug!("Upserted {} record for {}", roster, record.date());
    Ok(())
}

/// Delete one roster's record for `date` on `conn`, returning rows removed.
fn delete_record(conn: &Connection, roster: Roster, date: &RosterDate) -> Result<usize> {
    let sql = format!("DELETE FROM {} WHERE date = ?1", table_name(roster));
    let affected = conn.execute(&sql, [date.as_str()])?;
    debug!("Deleted {} {} record(s) for {}", affected, roster, date);
    Ok(affected)
}

/// Comma-separated status columns of a roster, in slot order.
fn slot_columns(roster: Roster) -> String {
    roster
        .slots()
        .iter()
        .map(|slot| slot.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Convert a stored row into a validated record.
fn row_to_record(roster: Roster, (date, codes): RawRow) -> Result<RosterRecord> {
    let date = RosterDate::parse(&date)?;
    let statuses: BTreeMap<Slot, StatusCode> = roster
        .slots()
        .iter()
        .zip(&codes)
        .map(|(slot, code)| Ok((*slot, code.parse::<StatusCode>()?)))
        .collect::<Result<_>>()?;
    RosterRecord::new(roster, date, statuses)
}

/// Statistics about the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreStats {
    /// Number of main routine records.
    pub main_records: i64,
    /// Number of sub routine records.
    pub sub_records: i64,
    /// Number of editor logins.
    pub users: i64,
    /// Earliest main routine date.
    pub first_date: Option<String>,
    /// Latest main routine date.
    pub last_date: Option<String>,
    /// Size of the database file in bytes.
    pub db_size_bytes: u64,
}
