pub mod category;
pub mod clock;
pub mod quality;
pub mod review_session;
pub mod review_state;
pub mod sm2;
pub mod store;
pub mod vocabulary;
pub mod word;

pub use category::Category;
pub use clock::{Clock, FixedClock, SystemClock};
pub use quality::Quality;
pub use review_session::{ReviewOutcome, ReviewSession, SessionState};
pub use review_state::WordReviewState;
pub use store::{ReviewUpdate, WordStore};
pub use vocabulary::{Vocabulary, VocabularyEntry};
pub use word::{NewWord, Word};
