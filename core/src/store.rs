//! SQLite persistence layer — the save-slot key-value store.
//!
//! RULE: only store.rs talks to the database. The engine serializes the
//! whole SimulationState to JSON and keeps it under a fixed key; the blob
//! carries no version tag and is never validated field-by-field.

use crate::error::SimResult;
use rusqlite::{params, Connection, OptionalExtension};

/// The fixed key the month's state blob lives under.
pub const SAVE_KEY: &str = "kakei-month";

pub struct SaveStore {
    conn: Connection,
    path: Option<String>, // None for :memory:, Some(path) for file
}

impl SaveStore {
    pub fn open(path: &str) -> SimResult<Self> {
        let conn = Connection::open_with_flags(
            path,
            rusqlite::OpenFlags::SQLITE_OPEN_READ_WRITE
                | rusqlite::OpenFlags::SQLITE_OPEN_CREATE
                | rusqlite::OpenFlags::SQLITE_OPEN_URI,
        )?;
        // WAL mode only for real files (:memory: ignores it).
        let _ = conn.execute_batch("PRAGMA journal_mode=WAL;");
        Ok(Self {
            conn,
            path: Some(path.to_string()),
        })
    }

    /// Open an in-memory database (used in tests).
    pub fn in_memory() -> SimResult<Self> {
        let conn = Connection::open(":memory:")?;
        Ok(Self { conn, path: None })
    }

    /// Create the save-slot table if it does not exist.
    pub fn migrate(&self) -> SimResult<()> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS save_slot (
                slot_key   TEXT PRIMARY KEY,
                state_json TEXT NOT NULL,
                saved_at   INTEGER NOT NULL
             );",
        )?;
        Ok(())
    }

    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Upsert the state blob under `key`.
    pub fn save_state(&self, key: &str, state_json: &str) -> SimResult<()> {
        self.conn.execute(
            "INSERT INTO save_slot (slot_key, state_json, saved_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(slot_key) DO UPDATE SET
                state_json = excluded.state_json,
                saved_at   = excluded.saved_at",
            params![key, state_json, chrono::Utc::now().timestamp()],
        )?;
        Ok(())
    }

    pub fn load_state(&self, key: &str) -> SimResult<Option<String>> {
        let json = self
            .conn
            .query_row(
                "SELECT state_json FROM save_slot WHERE slot_key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(json)
    }

    /// Remove the blob under `key`. A missing row is not an error.
    pub fn clear(&self, key: &str) -> SimResult<()> {
        self.conn
            .execute("DELETE FROM save_slot WHERE slot_key = ?1", params![key])?;
        Ok(())
    }
}
