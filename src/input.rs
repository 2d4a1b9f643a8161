//! Validation of user-entered filter values. The state engine trusts its
//! inputs, so anything typed by a user goes through here first.

use chrono::NaiveDate;
use thiserror::Error;

use crate::config::InputConfig;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("{0:?} is not a year")]
    NotAYear(String),
    #[error("year {year} outside {min}..={max}")]
    YearOutOfRange { year: i32, min: i32, max: i32 },
    #[error("{0:?} is not a vote share between 0 and 1")]
    InvalidShare(String),
}

/// Parses a year and returns January 1st of it.
pub fn parse_year_input(raw: &str, config: &InputConfig) -> Result<NaiveDate, InputError> {
    let year: i32 = raw
        .trim()
        .parse()
        .map_err(|_| InputError::NotAYear(raw.to_string()))?;
    if year < config.year_min || year > config.year_max {
        return Err(InputError::YearOutOfRange {
            year,
            min: config.year_min,
            max: config.year_max,
        });
    }
    NaiveDate::from_ymd_opt(year, 1, 1).ok_or_else(|| InputError::NotAYear(raw.to_string()))
}

pub fn parse_share_input(raw: &str) -> Result<f64, InputError> {
    let share: f64 = raw
        .trim()
        .parse()
        .map_err(|_| InputError::InvalidShare(raw.to_string()))?;
    if !(0.0..=1.0).contains(&share) {
        return Err(InputError::InvalidShare(raw.to_string()));
    }
    Ok(share)
}
