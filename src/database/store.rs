//! `WordStore` backed by the shared SQLite connection.

use super::db;
use crate::error::StoreError;
use crate::models::{ReviewUpdate, Word, WordStore};
use chrono::{DateTime, Utc};
use rusqlite::Connection;
use std::sync::{Arc, Mutex, MutexGuard};

/// Word store scoped to one owner.
#[derive(Clone)]
pub struct SqliteWordStore {
    conn: Arc<Mutex<Connection>>,
    owner: String,
}

impl SqliteWordStore {
    pub fn new(conn: Arc<Mutex<Connection>>, owner: impl Into<String>) -> Self {
        Self {
            conn,
            owner: owner.into(),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, StoreError> {
        self.conn
            .lock()
            .map_err(|_| StoreError::Unavailable("Connection lock poisoned".into()))
    }
}

impl WordStore for SqliteWordStore {
    fn due_words(&self, now: DateTime<Utc>) -> Result<Vec<Word>, StoreError> {
        let conn = self.lock()?;
        db::get_due_words(&self.owner, now, &conn)
    }

    fn apply_review(&self, id: i64, update: &ReviewUpdate) -> Result<(), StoreError> {
        let conn = self.lock()?;
        db::update_review(&self.owner, id, update, &conn)
    }
}
