//! Database operations for the vocabulary application
//!
//! Handles SQLite database initialization, CRUD operations for saved words,
//! the simulated calendar and persistence of SM-2 review state.
//! Every word belongs to an owner; queries and updates are scoped to it.

use crate::error::StoreError;
use crate::models::{
    Category, NewWord, ReviewUpdate, Vocabulary, VocabularyEntry, Word, WordReviewState,
};
use chrono::{DateTime, Days, SecondsFormat, Utc};
use rusqlite::{Connection, OptionalExtension, Row, params};
use std::path::Path;

pub type Result<T> = std::result::Result<T, StoreError>;

const WORD_COLUMNS: &str = "id, term, translation, definition, context, category, \
     repetitions, ease_factor, interval_days, next_review_at, created_at";

/// Opens (or creates) the database file and makes sure the schema exists.
///
/// `now` seeds the simulated calendar on first run.
pub fn init_database(path: &Path, now: DateTime<Utc>) -> Result<Connection> {
    let conn = Connection::open(path)?;
    init_schema(&conn, now)?;
    log::info!("Opened word store at {}", path.display());
    Ok(conn)
}

/// Creates tables for words and app state.
/// Sets the current date to `now` if not already initialized.
pub fn init_schema(conn: &Connection, now: DateTime<Utc>) -> Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS words (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            owner TEXT NOT NULL,
            term TEXT NOT NULL,
            translation TEXT NOT NULL,
            definition TEXT,
            context TEXT,
            category TEXT NOT NULL DEFAULT 'learning',
            repetitions INTEGER NOT NULL DEFAULT 0,
            ease_factor REAL NOT NULL DEFAULT 2.5,
            interval_days INTEGER NOT NULL DEFAULT 0,
            next_review_at TEXT NOT NULL,
            created_at TEXT NOT NULL,
            UNIQUE(owner, term)
        );
        CREATE INDEX IF NOT EXISTS idx_words_owner_due ON words(owner, next_review_at);
        CREATE TABLE IF NOT EXISTS app_state (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        );",
    )?;

    conn.execute(
        "INSERT OR IGNORE INTO app_state (key, value) VALUES ('current_date', ?1)",
        params![format_timestamp(now)],
    )?;

    Ok(())
}

/// Fixed nanosecond precision so that text order matches time order.
pub fn format_timestamp(time: DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

fn parse_timestamp(value: &str, field_name: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(
                0,
                rusqlite::types::Type::Text,
                Box::new(StoreError::InvalidTimestamp(format!(
                    "{} '{}': {}",
                    field_name, value, e
                ))),
            )
        })
}

fn row_to_word(row: &Row) -> rusqlite::Result<Word> {
    let category: String = row.get("category")?;
    let category = category.parse::<Category>().map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
    })?;

    let next_review_at: String = row.get("next_review_at")?;
    let created_at: String = row.get("created_at")?;

    Ok(Word {
        id: row.get("id")?,
        term: row.get("term")?,
        translation: row.get("translation")?,
        definition: row.get("definition")?,
        context: row.get("context")?,
        category,
        review: WordReviewState {
            repetitions: row.get("repetitions")?,
            ease_factor: row.get("ease_factor")?,
            interval_days: row.get("interval_days")?,
            next_review_at: parse_timestamp(&next_review_at, "next_review_at")?,
        },
        created_at: parse_timestamp(&created_at, "created_at")?,
    })
}

/// Retrieves the simulated current date from the database
pub fn get_current_date(conn: &Connection) -> Result<DateTime<Utc>> {
    let value: String = conn.query_row(
        "SELECT value FROM app_state WHERE key = 'current_date'",
        [],
        |row| row.get(0),
    )?;

    DateTime::parse_from_rfc3339(&value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| StoreError::InvalidTimestamp(format!("current_date '{}': {}", value, e)))
}

/// Advances the simulated date by one calendar day and returns it
pub fn advance_day(conn: &Connection) -> Result<DateTime<Utc>> {
    let current = get_current_date(conn)?;
    let next_day = current
        .checked_add_days(Days::new(1))
        .ok_or_else(|| StoreError::InvalidTimestamp("current_date out of range".to_string()))?;

    conn.execute(
        "UPDATE app_state SET value = ?1 WHERE key = 'current_date'",
        params![format_timestamp(next_day)],
    )?;
    log::info!("Simulated date advanced to {}", next_day.format("%Y-%m-%d"));

    Ok(next_day)
}

/// Saves a word with default SM-2 review state, due immediately.
///
/// Returns the word ID. If the owner already saved this term, the existing
/// word is kept untouched and its ID returned.
pub fn add_word(owner: &str, word: &NewWord, now: DateTime<Utc>, conn: &Connection) -> Result<i64> {
    let review = WordReviewState::new(now);
    let inserted = conn.execute(
        "INSERT OR IGNORE INTO words (owner, term, translation, definition, context, category,
            repetitions, ease_factor, interval_days, next_review_at, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
        params![
            owner,
            word.term,
            word.translation,
            word.definition,
            word.context,
            Category::default().as_str(),
            review.repetitions,
            review.ease_factor,
            review.interval_days,
            format_timestamp(review.next_review_at),
            format_timestamp(now),
        ],
    )?;

    let id: i64 = conn.query_row(
        "SELECT id FROM words WHERE owner = ?1 AND term = ?2",
        params![owner, word.term],
        |row| row.get(0),
    )?;

    if inserted > 0 {
        log::info!("Saved word '{}' ({}) for {}", word.term, id, owner);
    } else {
        log::debug!("Word '{}' already saved for {}", word.term, owner);
    }

    Ok(id)
}

/// Retrieves all words of an owner in the order they were saved
pub fn get_words(owner: &str, conn: &Connection) -> Result<Vec<Word>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM words WHERE owner = ?1 ORDER BY id ASC",
        WORD_COLUMNS
    ))?;

    let words = stmt
        .query_map(params![owner], row_to_word)?
        .collect::<rusqlite::Result<Vec<Word>>>()?;

    Ok(words)
}

pub fn get_word(owner: &str, id: i64, conn: &Connection) -> Result<Option<Word>> {
    let word = conn
        .query_row(
            &format!("SELECT {} FROM words WHERE id = ?1 AND owner = ?2", WORD_COLUMNS),
            params![id, owner],
            row_to_word,
        )
        .optional()?;
    Ok(word)
}

/// Retrieves words due for review
///
/// Returns words where next_review_at <= now,
/// ordered by next_review_at (most overdue first).
pub fn get_due_words(owner: &str, now: DateTime<Utc>, conn: &Connection) -> Result<Vec<Word>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM words
         WHERE owner = ?1 AND next_review_at <= ?2
         ORDER BY next_review_at ASC, id ASC",
        WORD_COLUMNS
    ))?;

    let words = stmt
        .query_map(params![owner, format_timestamp(now)], row_to_word)?
        .collect::<rusqlite::Result<Vec<Word>>>()?;

    Ok(words)
}

/// Writes the scheduling fields and category of one word in a single statement
pub fn update_review(owner: &str, id: i64, update: &ReviewUpdate, conn: &Connection) -> Result<()> {
    let state = &update.state;
    let changed = conn.execute(
        "UPDATE words
         SET repetitions = ?1, ease_factor = ?2, interval_days = ?3, next_review_at = ?4, category = ?5
         WHERE id = ?6 AND owner = ?7",
        params![
            state.repetitions,
            state.ease_factor,
            state.interval_days,
            format_timestamp(state.next_review_at),
            update.category.as_str(),
            id,
            owner
        ],
    )?;

    if changed == 0 {
        return Err(ownership_error(owner, id, conn));
    }

    log::debug!(
        "Word {} now {} and due {}",
        id,
        update.category,
        format_timestamp(state.next_review_at)
    );
    Ok(())
}

pub fn delete_word(owner: &str, id: i64, conn: &Connection) -> Result<()> {
    let changed = conn.execute(
        "DELETE FROM words WHERE id = ?1 AND owner = ?2",
        params![id, owner],
    )?;

    if changed == 0 {
        return Err(ownership_error(owner, id, conn));
    }

    log::info!("Deleted word {} for {}", id, owner);
    Ok(())
}

/// Tells a missing word apart from one that belongs to someone else
fn ownership_error(owner: &str, id: i64, conn: &Connection) -> StoreError {
    let found = conn
        .query_row("SELECT 1 FROM words WHERE id = ?1", params![id], |row| {
            row.get::<_, i64>(0)
        })
        .optional();

    match found {
        Ok(None) => StoreError::NotFound(id),
        Ok(Some(_)) => StoreError::NotOwned {
            id,
            owner: owner.to_string(),
        },
        Err(e) => e.into(),
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct VocabularyStats {
    pub total: usize,
    pub learning: usize,
    pub learned: usize,
    pub difficult: usize,
    pub due: usize,
}

impl VocabularyStats {
    pub fn count(&self, category: Category) -> usize {
        match category {
            Category::Learning => self.learning,
            Category::Learned => self.learned,
            Category::Difficult => self.difficult,
        }
    }
}

pub fn vocabulary_stats(owner: &str, now: DateTime<Utc>, conn: &Connection) -> Result<VocabularyStats> {
    let mut stats = VocabularyStats::default();

    let mut stmt =
        conn.prepare("SELECT category, COUNT(*) FROM words WHERE owner = ?1 GROUP BY category")?;
    let counts = stmt
        .query_map(params![owner], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?))
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    for (category, count) in counts {
        let count = count as usize;
        stats.total += count;
        match category.parse::<Category>()? {
            Category::Learning => stats.learning += count,
            Category::Learned => stats.learned += count,
            Category::Difficult => stats.difficult += count,
        }
    }

    let due: i64 = conn.query_row(
        "SELECT COUNT(*) FROM words WHERE owner = ?1 AND next_review_at <= ?2",
        params![owner, format_timestamp(now)],
        |row| row.get(0),
    )?;
    stats.due = due as usize;

    Ok(stats)
}

/// Collects an owner's words into an exportable vocabulary
pub fn load_vocabulary(owner: &str, name: &str, conn: &Connection) -> Result<Vocabulary> {
    let words = get_words(owner, conn)?;
    Ok(Vocabulary {
        name: name.to_string(),
        words: words.iter().map(VocabularyEntry::from).collect(),
    })
}

/// Saves every entry of an imported vocabulary; already saved terms are skipped.
///
/// Returns the number of newly added words. Either all entries are stored or none.
pub fn import_vocabulary(
    owner: &str,
    vocabulary: &Vocabulary,
    now: DateTime<Utc>,
    conn: &Connection,
) -> Result<usize> {
    let tx = conn.unchecked_transaction()?;
    let before = count_words(owner, &tx)?;

    for entry in &vocabulary.words {
        add_word(owner, &NewWord::from(entry.clone()), now, &tx)?;
    }

    let added = count_words(owner, &tx)? - before;
    tx.commit()?;

    log::info!(
        "Imported {} new words from '{}' for {}",
        added,
        vocabulary.name,
        owner
    );
    Ok(added)
}

fn count_words(owner: &str, conn: &Connection) -> Result<usize> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM words WHERE owner = ?1",
        params![owner],
        |row| row.get(0),
    )?;
    Ok(count as usize)
}
