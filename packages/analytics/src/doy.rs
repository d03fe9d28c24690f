//! Day-of-year arithmetic shared by the shift and trend analyzers.
//!
//! Observations carry a day-of-year (1-366) with no year context, so all
//! calendar math happens in one fixed reference year. 2016 is a leap
//! year, which makes every day-of-year and a Feb 29 period boundary
//! representable.

use chrono::{Datelike as _, NaiveDate};
use switchy_database::DatabaseValue;

use crate::AnalyticsError;

/// Reference year used to reduce dates to day-of-year values.
pub const ORDINAL_YEAR: i32 = 2016;

/// Last day-of-year of each month in the 366-day reference calendar.
const MONTH_END_DOY: [u32; 12] = [31, 60, 91, 121, 152, 182, 213, 244, 274, 305, 335, 366];

/// Maps a day-of-year (1-366) to its calendar month (1-12).
///
/// One fixed lookup against the leap-year month boundaries, chosen over
/// `day / 30.5` rounding which misallocates boundary days. Day-of-year
/// values recorded in non-leap years land at most one day early within
/// the same month after February, which is acceptable for monthly
/// bucketing.
#[must_use]
pub fn month_of_day(doy: u32) -> Option<u32> {
    if doy == 0 {
        return None;
    }
    MONTH_END_DOY
        .iter()
        .position(|&end| doy <= end)
        .map(|i| u32::try_from(i).unwrap_or(0) + 1)
}

/// Parses a `YYYY-MM-DD` date string.
///
/// # Errors
///
/// Returns [`AnalyticsError::InvalidInput`] if the string is not a valid
/// date.
pub fn parse_date(s: &str) -> Result<NaiveDate, AnalyticsError> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| AnalyticsError::InvalidInput {
        message: format!("Invalid date '{s}': {e}. Expected format: YYYY-MM-DD"),
    })
}

/// Reduces a date to its day-of-year in the reference year.
///
/// The year component of the input is ignored; only month and day
/// matter.
///
/// # Errors
///
/// Returns [`AnalyticsError::InvalidInput`] for dates that do not exist
/// in the reference calendar (cannot happen for parsed dates, since 2016
/// contains every month/day combination).
pub fn day_of_year(date: NaiveDate) -> Result<u32, AnalyticsError> {
    NaiveDate::from_ymd_opt(ORDINAL_YEAR, date.month(), date.day())
        .map(|d| d.ordinal())
        .ok_or_else(|| AnalyticsError::InvalidInput {
            message: format!("Date {date} has no day-of-year in the reference calendar"),
        })
}

/// A day-of-year window, possibly wrapping the year boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Period {
    /// First day of the window (1-366).
    pub start_day: u32,
    /// Last day of the window (1-366).
    pub end_day: u32,
}

impl Period {
    /// Builds a period from two boundary dates.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError::InvalidInput`] if either date string is
    /// malformed.
    pub fn from_dates(from: &str, to: &str) -> Result<Self, AnalyticsError> {
        Ok(Self {
            start_day: day_of_year(parse_date(from)?)?,
            end_day: day_of_year(parse_date(to)?)?,
        })
    }

    /// Whether the window crosses the year boundary (e.g. Dec-Feb).
    #[must_use]
    pub const fn wraps(self) -> bool {
        self.start_day > self.end_day
    }

    /// Renders the SQL predicate selecting days inside this window.
    ///
    /// A non-wrapping window becomes `col BETWEEN $i AND $i+1`; a
    /// wrapping one becomes `(col >= $i OR col <= $i+1)`. Swapping the
    /// boundaries instead of wrapping would select the complementary
    /// season and is deliberately not done.
    ///
    /// Returns the fragment, the two bound parameters, and the next free
    /// parameter index.
    #[must_use]
    pub fn predicate(self, col: &str, idx: u32) -> (String, Vec<DatabaseValue>, u32) {
        let start_idx = idx;
        let end_idx = idx + 1;

        let frag = if self.wraps() {
            format!("({col} >= ${start_idx} OR {col} <= ${end_idx})")
        } else {
            format!("{col} BETWEEN ${start_idx} AND ${end_idx}")
        };

        let params = vec![
            DatabaseValue::Int32(i32::try_from(self.start_day).unwrap_or(1)),
            DatabaseValue::Int32(i32::try_from(self.end_day).unwrap_or(366)),
        ];

        (frag, params, idx + 2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_lookup_boundaries() {
        assert_eq!(month_of_day(1), Some(1));
        assert_eq!(month_of_day(31), Some(1));
        assert_eq!(month_of_day(32), Some(2));
        assert_eq!(month_of_day(60), Some(2));
        assert_eq!(month_of_day(61), Some(3));
        assert_eq!(month_of_day(335), Some(11));
        assert_eq!(month_of_day(336), Some(12));
        assert_eq!(month_of_day(366), Some(12));
    }

    #[test]
    fn month_lookup_total_over_valid_range() {
        for doy in 1..=366 {
            let month = month_of_day(doy).unwrap_or_else(|| panic!("day {doy} unmapped"));
            assert!((1..=12).contains(&month));
        }
        assert_eq!(month_of_day(0), None);
        assert_eq!(month_of_day(367), None);
    }

    #[test]
    fn month_lookup_is_monotone() {
        for doy in 1..366 {
            assert!(month_of_day(doy) <= month_of_day(doy + 1));
        }
    }

    #[test]
    fn day_of_year_ignores_input_year() {
        let d2015 = parse_date("2015-07-01").unwrap();
        let d1999 = parse_date("1999-07-01").unwrap();
        assert_eq!(day_of_year(d2015).unwrap(), day_of_year(d1999).unwrap());
        // July 1 in the leap reference calendar.
        assert_eq!(day_of_year(d2015).unwrap(), 183);
    }

    #[test]
    fn parse_date_rejects_garbage() {
        assert!(parse_date("2015-13-01").is_err());
        assert!(parse_date("yesterday").is_err());
        assert!(parse_date("").is_err());
    }

    #[test]
    fn forward_period_renders_between() {
        let period = Period::from_dates("2015-01-01", "2015-06-30").unwrap();
        assert!(!period.wraps());

        let (frag, params, next) = period.predicate("o.day_of_year", 3);
        assert_eq!(frag, "o.day_of_year BETWEEN $3 AND $4");
        assert_eq!(params.len(), 2);
        assert_eq!(next, 5);
    }

    #[test]
    fn wrapping_period_renders_or() {
        // Dec-Feb: winter window crossing the year boundary.
        let period = Period::from_dates("2015-12-01", "2015-02-28").unwrap();
        assert!(period.wraps());

        let (frag, params, next) = period.predicate("o.day_of_year", 1);
        assert_eq!(frag, "(o.day_of_year >= $1 OR o.day_of_year <= $2)");
        assert!(matches!(params[0], DatabaseValue::Int32(336)));
        assert!(matches!(params[1], DatabaseValue::Int32(59)));
        assert_eq!(next, 3);
    }
}
