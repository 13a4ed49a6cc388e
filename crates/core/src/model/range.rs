use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::QuestionMode;

/// Largest number a practice range may include.
pub const MAX_NUMBER: u32 = 10_000;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum InvalidRangeError {
    #[error("min below 1")]
    MinBelowOne,

    #[error("max above limit")]
    MaxAboveLimit,

    #[error("empty range")]
    EmptyRange,

    #[error("non-numeric input")]
    NonNumeric,
}

/// Raw range settings as typed by the user, not yet validated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeDraft {
    pub min: String,
    pub max: String,
    pub mode: QuestionMode,
    pub practice: bool,
}

impl RangeDraft {
    #[must_use]
    pub fn new(
        min: impl Into<String>,
        max: impl Into<String>,
        mode: QuestionMode,
        practice: bool,
    ) -> Self {
        Self {
            min: min.into(),
            max: max.into(),
            mode,
            practice,
        }
    }

    /// Validate and normalize the draft into a usable range.
    ///
    /// Bounds are parsed as integers after whitespace trimming, so a signed
    /// value like "-3" reports `MinBelowOne` rather than `NonNumeric`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRangeError` when a bound does not parse, lies outside
    /// `1..=MAX_NUMBER`, or the bounds select no numbers at all.
    pub fn validate(&self) -> Result<RangeConfig, InvalidRangeError> {
        let min = parse_bound(&self.min)?;
        let max = parse_bound(&self.max)?;

        if min < 1 {
            return Err(InvalidRangeError::MinBelowOne);
        }
        if max > i64::from(MAX_NUMBER) {
            return Err(InvalidRangeError::MaxAboveLimit);
        }
        if max < min {
            return Err(InvalidRangeError::EmptyRange);
        }

        let min = u32::try_from(min).map_err(|_| InvalidRangeError::NonNumeric)?;
        let max = u32::try_from(max).map_err(|_| InvalidRangeError::NonNumeric)?;
        RangeConfig::new(min, max, self.mode, self.practice)
    }
}

impl Default for RangeDraft {
    fn default() -> Self {
        Self {
            min: "11".to_string(),
            max: "75".to_string(),
            mode: QuestionMode::Squares,
            practice: false,
        }
    }
}

/// A validated number range plus the session flags chosen alongside it.
///
/// Construction fails on violated bounds; nothing is ever clamped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct RangeConfig {
    min: u32,
    max: u32,
    mode: QuestionMode,
    practice: bool,
}

impl RangeConfig {
    /// Build a config from already-numeric bounds, enforcing
    /// `1 <= min <= max <= MAX_NUMBER`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRangeError` when the bounds violate those limits.
    pub fn new(
        min: u32,
        max: u32,
        mode: QuestionMode,
        practice: bool,
    ) -> Result<Self, InvalidRangeError> {
        if min < 1 {
            return Err(InvalidRangeError::MinBelowOne);
        }
        if max > MAX_NUMBER {
            return Err(InvalidRangeError::MaxAboveLimit);
        }
        if max < min {
            return Err(InvalidRangeError::EmptyRange);
        }

        Ok(Self {
            min,
            max,
            mode,
            practice,
        })
    }

    #[must_use]
    pub fn min(&self) -> u32 {
        self.min
    }

    #[must_use]
    pub fn max(&self) -> u32 {
        self.max
    }

    #[must_use]
    pub fn mode(&self) -> QuestionMode {
        self.mode
    }

    #[must_use]
    pub fn practice(&self) -> bool {
        self.practice
    }

    /// Number of integers the range selects, always at least 1.
    #[must_use]
    pub fn count(&self) -> usize {
        (self.max - self.min + 1) as usize
    }
}

fn parse_bound(raw: &str) -> Result<i64, InvalidRangeError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| InvalidRangeError::NonNumeric)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(min: &str, max: &str) -> RangeDraft {
        RangeDraft::new(min, max, QuestionMode::Squares, false)
    }

    #[test]
    fn accepts_valid_bounds() {
        let config = draft("11", "75").validate().unwrap();
        assert_eq!(config.min(), 11);
        assert_eq!(config.max(), 75);
        assert_eq!(config.count(), 65);
    }

    #[test]
    fn accepts_single_number_range() {
        let config = draft("7", "7").validate().unwrap();
        assert_eq!(config.count(), 1);
    }

    #[test]
    fn trims_whitespace_before_parsing() {
        let config = draft(" 3 ", "  9").validate().unwrap();
        assert_eq!(config.min(), 3);
        assert_eq!(config.max(), 9);
    }

    #[test]
    fn rejects_min_below_one() {
        assert_eq!(
            draft("0", "10").validate().unwrap_err(),
            InvalidRangeError::MinBelowOne
        );
        assert_eq!(
            draft("-3", "10").validate().unwrap_err(),
            InvalidRangeError::MinBelowOne
        );
    }

    #[test]
    fn rejects_max_above_limit() {
        assert_eq!(
            draft("1", "10001").validate().unwrap_err(),
            InvalidRangeError::MaxAboveLimit
        );
    }

    #[test]
    fn accepts_max_at_limit() {
        assert!(draft("1", "10000").validate().is_ok());
    }

    #[test]
    fn rejects_inverted_bounds_as_empty() {
        assert_eq!(
            draft("20", "10").validate().unwrap_err(),
            InvalidRangeError::EmptyRange
        );
    }

    #[test]
    fn rejects_non_numeric_input() {
        assert_eq!(
            draft("abc", "10").validate().unwrap_err(),
            InvalidRangeError::NonNumeric
        );
        assert_eq!(
            draft("1", "").validate().unwrap_err(),
            InvalidRangeError::NonNumeric
        );
        assert_eq!(
            draft("1.5", "10").validate().unwrap_err(),
            InvalidRangeError::NonNumeric
        );
    }

    #[test]
    fn error_messages_are_stable() {
        assert_eq!(InvalidRangeError::MinBelowOne.to_string(), "min below 1");
        assert_eq!(
            InvalidRangeError::MaxAboveLimit.to_string(),
            "max above limit"
        );
        assert_eq!(InvalidRangeError::EmptyRange.to_string(), "empty range");
        assert_eq!(
            InvalidRangeError::NonNumeric.to_string(),
            "non-numeric input"
        );
    }

    #[test]
    fn programmatic_construction_enforces_bounds() {
        assert!(RangeConfig::new(0, 5, QuestionMode::Roots, false).is_err());
        assert!(RangeConfig::new(5, 4, QuestionMode::Roots, false).is_err());
        assert!(RangeConfig::new(1, MAX_NUMBER, QuestionMode::Roots, true).is_ok());
    }

    #[test]
    fn default_draft_matches_shipped_settings() {
        let config = RangeDraft::default().validate().unwrap();
        assert_eq!(config.min(), 11);
        assert_eq!(config.max(), 75);
        assert_eq!(config.mode(), QuestionMode::Squares);
        assert!(!config.practice());
    }
}
