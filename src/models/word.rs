//! A saved vocabulary word: the term picked while reading plus its scheduling data.
use super::{Category, WordReviewState};
use chrono::{DateTime, Utc};

#[derive(Clone, Debug, PartialEq)]
pub struct Word {
    pub id: i64,
    pub term: String,
    pub translation: String,
    pub definition: Option<String>,
    /// Sentence the word was selected from.
    pub context: Option<String>,
    pub category: Category,
    pub review: WordReviewState,
    pub created_at: DateTime<Utc>,
}

/// Input for saving a word to the vocabulary.
#[derive(Clone, Debug, Default)]
pub struct NewWord {
    pub term: String,
    pub translation: String,
    pub definition: Option<String>,
    pub context: Option<String>,
}

impl NewWord {
    pub fn new(term: impl Into<String>, translation: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            translation: translation.into(),
            ..Default::default()
        }
    }

    pub fn with_definition(mut self, definition: impl Into<String>) -> Self {
        self.definition = Some(definition.into());
        self
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_word_builder() {
        let word = NewWord::new("cześć", "hello")
            .with_definition("informal greeting")
            .with_context("Cześć, jak się masz?");

        assert_eq!(word.term, "cześć");
        assert_eq!(word.translation, "hello");
        assert_eq!(word.definition.as_deref(), Some("informal greeting"));
        assert_eq!(word.context.as_deref(), Some("Cześć, jak się masz?"));
    }
}
