//! Calendar math: month lengths, weekdays, day keys and month arithmetic.
//!
//! Months are 0-based throughout (`0` is January) so that a `(year, month0)`
//! pair maps directly onto the month grid. Out-of-range month indexes carry
//! into the year, e.g. `(2023, 13)` is February 2024.

use chrono::{Datelike, Days, NaiveDate};
use thiserror::Error;

/// Days in a week, also the width of the month grid.
pub const DAYS_IN_WEEK: usize = 7;

/// English month names indexed by `month0`.
pub const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const MONTH_LENGTHS: [u32; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Day-key parse failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateKeyError {
    /// Not shaped like `YYYY-MM-DD`.
    #[error("`{0}` is not a YYYY-MM-DD day key")]
    Malformed(String),
    /// Shaped correctly but names no calendar day.
    #[error("`{0}` is not a calendar date")]
    NoSuchDay(String),
}

/// Gregorian leap-year rule.
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in `month0` of `year`.
pub fn days_in_month(year: i32, month0: u32) -> u32 {
    let (year, month0) = normalize_month(year, i64::from(month0));
    if month0 == 1 && is_leap_year(year) {
        29
    } else {
        MONTH_LENGTHS[month0 as usize]
    }
}

/// Weekday of the first day of the month, `0` = Sunday through `6` = Saturday.
///
/// Computed from the Gregorian offset table rather than through `NaiveDate`,
/// so every `i32` year has an answer, including years past chrono's range.
pub fn first_weekday_of_month(year: i32, month0: u32) -> u32 {
    const OFFSETS: [i64; 12] = [0, 3, 2, 5, 0, 3, 5, 1, 4, 6, 2, 4];
    let (year, month0) = normalize_month(year, i64::from(month0));
    let mut y = i64::from(year);
    if month0 < 2 {
        y -= 1;
    }
    let weekday =
        (y + y.div_euclid(4) - y.div_euclid(100) + y.div_euclid(400) + OFFSETS[month0 as usize] + 1)
            .rem_euclid(7);
    weekday as u32
}

/// Formats `date` as a zero-padded `YYYY-MM-DD` day key.
pub fn format_date_key(date: NaiveDate) -> String {
    format!("{:04}-{:02}-{:02}", date.year(), date.month(), date.day())
}

/// Parses a canonical `YYYY-MM-DD` day key.
///
/// Only the exact form produced by [`format_date_key`] is accepted.
pub fn parse_date_key(key: &str) -> Result<NaiveDate, DateKeyError> {
    let bytes = key.as_bytes();
    let shaped = bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());
    if !shaped {
        return Err(DateKeyError::Malformed(key.to_string()));
    }

    let malformed = |_| DateKeyError::Malformed(key.to_string());
    let year: i32 = key[0..4].parse().map_err(malformed)?;
    let month: u32 = key[5..7].parse().map_err(malformed)?;
    let day: u32 = key[8..10].parse().map_err(malformed)?;
    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| DateKeyError::NoSuchDay(key.to_string()))
}

/// True when `key` parses and re-formats to itself.
pub fn is_day_key(key: &str) -> bool {
    parse_date_key(key).is_ok()
}

/// Same year, month and day.
pub fn is_same_day(a: NaiveDate, b: NaiveDate) -> bool {
    a.year() == b.year() && a.month() == b.month() && a.day() == b.day()
}

/// Same year and month.
pub fn is_same_month(a: NaiveDate, b: NaiveDate) -> bool {
    a.year() == b.year() && a.month() == b.month()
}

/// Shifts `date` by `delta` months.
///
/// The day of month is kept and rolls over into the following month when the
/// target month is shorter: 2024-01-31 plus one month is 2024-03-02. Returns
/// `None` only when the result is outside the representable date range.
pub fn add_months(date: NaiveDate, delta: i32) -> Option<NaiveDate> {
    let (year, month0) =
        normalize_month(date.year(), i64::from(date.month0()) + i64::from(delta));
    NaiveDate::from_ymd_opt(year, month0 + 1, 1)?
        .checked_add_days(Days::new(u64::from(date.day() - 1)))
}

/// English name for `month0`, wrapping out-of-range indexes.
pub fn month_name(month0: u32) -> &'static str {
    MONTHS[(month0 % 12) as usize]
}

/// Dates shown in the month view, in whole weeks starting on Sunday.
///
/// Leading days come from the previous month, trailing days from the next.
/// The trailing run is `7 - len % 7` days, so a month ending on Saturday gets
/// a full extra week.
pub fn month_grid(year: i32, month0: u32) -> Vec<NaiveDate> {
    let (year, month0) = normalize_month(year, i64::from(month0));
    let Some(first) = NaiveDate::from_ymd_opt(year, month0 + 1, 1) else {
        return Vec::new();
    };
    let lead = first_weekday_of_month(year, month0) as usize;
    let Some(start) = first.checked_sub_days(Days::new(lead as u64)) else {
        return Vec::new();
    };

    let len = lead + days_in_month(year, month0) as usize;
    let total = len + (DAYS_IN_WEEK - len % DAYS_IN_WEEK);
    start.iter_days().take(total).collect()
}

/// The month currently on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MonthCursor {
    year: i32,
    month0: u32,
}

impl MonthCursor {
    /// Cursor for `(year, month0)`, normalizing month overflow.
    pub fn new(year: i32, month0: u32) -> Self {
        let (year, month0) = normalize_month(year, i64::from(month0));
        Self { year, month0 }
    }

    /// Cursor on the month containing `date`.
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month0: date.month0(),
        }
    }

    /// Viewed year.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Viewed month, 0-based.
    pub fn month0(&self) -> u32 {
        self.month0
    }

    /// Cursor shifted by `delta` months.
    pub fn shifted(&self, delta: i32) -> Self {
        let (year, month0) = normalize_month(self.year, i64::from(self.month0) + i64::from(delta));
        Self { year, month0 }
    }

    /// The previous month.
    pub fn prev(&self) -> Self {
        self.shifted(-1)
    }

    /// The next month.
    pub fn next(&self) -> Self {
        self.shifted(1)
    }

    /// True when `date` falls in the viewed month.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month0() == self.month0
    }

    /// Length of the viewed month.
    pub fn days_in_month(&self) -> u32 {
        days_in_month(self.year, self.month0)
    }

    /// Grid dates for the viewed month.
    pub fn grid(&self) -> Vec<NaiveDate> {
        month_grid(self.year, self.month0)
    }

    /// Heading such as `March 2024`.
    pub fn title(&self) -> String {
        format!("{} {}", month_name(self.month0), self.year)
    }
}

fn normalize_month(year: i32, month0: i64) -> (i32, u32) {
    let total = i64::from(year) * 12 + month0;
    let year = total
        .div_euclid(12)
        .clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32;
    (year, total.rem_euclid(12) as u32)
}
