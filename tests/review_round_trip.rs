use chrono::{DateTime, Duration, TimeZone, Utc};
use rusqlite::Connection;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;
use vocab_app::database::{SqliteWordStore, db};
use vocab_app::models::{
    Category, FixedClock, NewWord, Quality, ReviewSession, SessionState, sm2,
};

fn day(n: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 9, n, 18, 45, 30).unwrap() + Duration::microseconds(250)
}

#[test]
fn reviews_survive_reopening_the_database() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("words.sqlite3");

    let conn = db::init_database(&path, day(1)).unwrap();
    let kot = db::add_word("ala", &NewWord::new("kot", "cat"), day(1), &conn).unwrap();
    let pies = db::add_word("ala", &NewWord::new("pies", "dog"), day(2), &conn).unwrap();
    let conn = Arc::new(Mutex::new(conn));

    let store = SqliteWordStore::new(Arc::clone(&conn), "ala");
    let mut session = ReviewSession::start(store, FixedClock(day(3))).unwrap();
    let easy = session.rate(Quality::Easy).unwrap();
    let hard = session.rate(Quality::Hard).unwrap();
    assert_eq!(session.state(), SessionState::Complete);
    assert_eq!((easy.word_id, hard.word_id), (kot, pies));
    drop(session);
    drop(conn);

    let conn = Connection::open(&path).unwrap();
    let kot_stored = db::get_word("ala", kot, &conn).unwrap().unwrap();
    assert_eq!(kot_stored.review, easy.state);
    assert_eq!(kot_stored.category, Category::Learned);
    let pies_stored = db::get_word("ala", pies, &conn).unwrap().unwrap();
    assert_eq!(pies_stored.review, hard.state);
    assert_eq!(pies_stored.category, Category::Difficult);

    // Both come back after one day
    assert!(db::get_due_words("ala", day(3), &conn).unwrap().is_empty());
    assert_eq!(db::get_due_words("ala", day(4), &conn).unwrap().len(), 2);
}

#[test]
fn successive_sessions_follow_the_schedule() {
    let dir = TempDir::new().unwrap();
    let conn = db::init_database(&dir.path().join("words.sqlite3"), day(1)).unwrap();
    let id = db::add_word("ala", &NewWord::new("dom", "house"), day(1), &conn).unwrap();
    let conn = Arc::new(Mutex::new(conn));
    let store = SqliteWordStore::new(Arc::clone(&conn), "ala");

    let mut expected = db::get_word("ala", id, &conn.lock().unwrap()).unwrap().unwrap().review;
    let mut today = day(1);
    let mut intervals = Vec::new();

    for _ in 0..4 {
        let mut session = ReviewSession::start(store.clone(), FixedClock(today)).unwrap();
        assert_eq!(session.total_count(), 1);
        let outcome = session.rate(Quality::Easy).unwrap();

        expected = sm2::compute_next_state(Quality::Easy, &expected, today);
        assert_eq!(outcome.state, expected);
        intervals.push(outcome.state.interval_days);

        // Nothing else is due until the scheduled date
        let early = ReviewSession::start(store.clone(), FixedClock(today)).unwrap();
        assert_eq!(early.state(), SessionState::EmptyComplete);

        today = outcome.state.next_review_at;
    }

    assert_eq!(intervals, vec![1, 6, 17, 48]);
}
