//! `SQLite` schema definitions for carpool.
//!
//! This module contains the SQL statements for creating the roster tables.
//! Status columns hold the single-character codes `D`, `P`, `A`, `H`, and
//! `date` holds the `YYYY-MM-DD` key.

use rusqlite::Connection;

use crate::error::Result;
use crate::roster::Roster;

/// SQL statement to create the main routine table.
pub const CREATE_MAIN_ROUTINE_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS main_routine (
    date TEXT PRIMARY KEY NOT NULL,
    m1 TEXT NOT NULL CHECK (m1 IN ('D', 'P', 'A', 'H')),
    m2 TEXT NOT NULL CHECK (m2 IN ('D', 'P', 'A', 'H')),
    m3 TEXT NOT NULL CHECK (m3 IN ('D', 'P', 'A', 'H')),
    m4 TEXT NOT NULL CHECK (m4 IN ('D', 'P', 'A', 'H')),
    m5 TEXT NOT NULL CHECK (m5 IN ('D', 'P', 'A', 'H')),
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
)
";

/// SQL statement to create the sub routine table.
pub const CREATE_SUB_ROUTINE_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS sub_routine (
    date TEXT PRIMARY KEY NOT NULL,
    m1 TEXT NOT NULL CHECK (m1 IN ('D', 'P', 'A', 'H')),
    m2 TEXT NOT NULL CHECK (m2 IN ('D', 'P', 'A', 'H')),
    m3 TEXT NOT NULL CHECK (m3 IN ('D', 'P', 'A', 'H')),
    m4 TEXT NOT NULL CHECK (m4 IN ('D', 'P', 'A', 'H')),
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
)
";

/// SQL statement to create the users table.
pub const CREATE_USERS_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS users (
    username TEXT PRIMARY KEY NOT NULL,
    passwd TEXT NOT NULL
)
";

/// All schema creation statements in order.
pub const SCHEMA_STATEMENTS: &[&str] = &[
    CREATE_MAIN_ROUTINE_TABLE,
    CREATE_SUB_ROUTINE_TABLE,
    CREATE_USERS_TABLE,
];

/// Create any missing tables.
///
/// # Errors
///
/// Returns an error if a statement fails.
pub fn initialize_schema(conn: &Connection) -> Result<()> {
    for statement in SCHEMA_STATEMENTS {
        conn.execute(statement, [])?;
    }
    Ok(())
}

/// Table holding a roster's records.
#[must_use]
pub fn table_name(roster: Roster) -> &'static str {
    match roster {
        Roster::Main => "main_routine",
        Roster::Sub => "sub_routine",
    }
}
