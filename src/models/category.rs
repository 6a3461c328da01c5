//! Coarse progress label derived from the most recent rating.
use super::Quality;
use crate::error::StoreError;
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Category {
    #[default]
    Learning,
    Learned,
    Difficult,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Learning, Category::Learned, Category::Difficult];

    /// Kept apart from the scheduler so that SM-2 stays unaware of categories.
    pub fn from_quality(quality: Quality) -> Self {
        match quality {
            Quality::Easy => Category::Learned,
            Quality::Hard => Category::Difficult,
            Quality::Neutral => Category::Learning,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Learning => "learning",
            Category::Learned => "learned",
            Category::Difficult => "difficult",
        }
    }
}

impl FromStr for Category {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "learning" => Ok(Category::Learning),
            "learned" => Ok(Category::Learned),
            "difficult" => Ok(Category::Difficult),
            other => Err(StoreError::InvalidCategory(other.to_string())),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
