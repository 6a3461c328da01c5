//! Recall quality reported by the user for a flashcard.
use crate::error::InvalidQuality;
use std::fmt;

/// Only three ratings are offered; anything >= 3 counts as a successful recall.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Quality {
    Hard = 1,
    Neutral = 3,
    Easy = 5,
}

impl Quality {
    pub const ALL: [Quality; 3] = [Quality::Hard, Quality::Neutral, Quality::Easy];

    pub fn value(self) -> u8 {
        self as u8
    }

    pub fn is_success(self) -> bool {
        self.value() >= 3
    }

    pub fn label(self) -> &'static str {
        match self {
            Quality::Hard => "Hard",
            Quality::Neutral => "Neutral",
            Quality::Easy => "Easy",
        }
    }
}

impl TryFrom<u8> for Quality {
    type Error = InvalidQuality;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Quality::Hard),
            3 => Ok(Quality::Neutral),
            5 => Ok(Quality::Easy),
            other => Err(InvalidQuality(other)),
        }
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.label(), self.value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_recognized_values() {
        assert_eq!(Quality::try_from(1), Ok(Quality::Hard));
        assert_eq!(Quality::try_from(3), Ok(Quality::Neutral));
        assert_eq!(Quality::try_from(5), Ok(Quality::Easy));
    }

    #[test]
    fn test_rejects_values_outside_the_set() {
        for value in [0, 2, 4, 6, 255] {
            assert_eq!(Quality::try_from(value), Err(InvalidQuality(value)));
        }
    }

    #[test]
    fn test_success_threshold() {
        assert!(!Quality::Hard.is_success());
        assert!(Quality::Neutral.is_success());
        assert!(Quality::Easy.is_success());
    }
}
