pub mod config;
pub mod database;
pub mod error;
pub mod export;
pub mod models;

pub use database::SqliteWordStore;
pub use error::{SessionError, StoreError};
pub use models::{Category, Quality, ReviewSession, Word, WordReviewState};
