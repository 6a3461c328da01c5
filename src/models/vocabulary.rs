//! Portable vocabulary list used for JSON import and export.
//! Scheduling data is not exported; imported words start from scratch.
use super::{NewWord, Word};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VocabularyEntry {
    pub term: String,
    pub translation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub definition: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Vocabulary {
    pub name: String,
    pub words: Vec<VocabularyEntry>,
}

impl From<&Word> for VocabularyEntry {
    fn from(word: &Word) -> Self {
        Self {
            term: word.term.clone(),
            translation: word.translation.clone(),
            definition: word.definition.clone(),
            context: word.context.clone(),
        }
    }
}

impl From<VocabularyEntry> for NewWord {
    fn from(entry: VocabularyEntry) -> Self {
        Self {
            term: entry.term,
            translation: entry.translation,
            definition: entry.definition,
            context: entry.context,
        }
    }
}
