//! Review scores and product rating aggregation

use serde::{Deserialize, Serialize};

use crate::ValidationError;

pub const MIN_SCORE: i32 = 1;
pub const MAX_SCORE: i32 = 5;

/// Review score, always within 1..=5
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct Score(i32);

impl Score {
    pub fn new(value: i32) -> Result<Self, ValidationError> {
        if !(MIN_SCORE..=MAX_SCORE).contains(&value) {
            return Err(ValidationError::OutOfRange {
                field: "score",
                min: MIN_SCORE as i64,
                max: MAX_SCORE as i64,
                value: value as i64,
            });
        }
        Ok(Self(value))
    }

    pub fn get(self) -> i32 {
        self.0
    }
}

impl TryFrom<i32> for Score {
    type Error = ValidationError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Score> for i32 {
    fn from(score: Score) -> i32 {
        score.0
    }
}

/// Mean of the given scores rounded half up to two decimals; 0 when empty.
///
/// Rounding happens on the exact rational value, so 2/3 becomes 0.67 and
/// 4.125 becomes 4.13 regardless of float representation.
pub fn average_score<I>(scores: I) -> f64
where
    I: IntoIterator<Item = Score>,
{
    let (sum, count) = scores
        .into_iter()
        .fold((0i64, 0i64), |(sum, count), s| (sum + s.0 as i64, count + 1));
    if count == 0 {
        return 0.0;
    }
    let hundredths = (sum * 200 + count) / (2 * count);
    hundredths as f64 / 100.0
}
