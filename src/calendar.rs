use chrono::{Datelike, Local, NaiveDate};
use std::fmt;
use std::str::FromStr;

use crate::codec;
use crate::error::{Error, ErrorKind};

/// Smallest year a `CalendarDate` can carry.
pub const MIN_YEAR: i32 = 1;
/// Largest year a `CalendarDate` can carry (4-digit years only).
pub const MAX_YEAR: i32 = 9999;

pub const MONTHS_PER_YEAR: u32 = 12;

pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days of the 0-based `month0` in `year`.
///
/// `month0` values outside of `0..12` are wrapped into the neighbouring years,
/// so `days_in_month(2024, -1)` yields the days of December 2023.
pub fn days_in_month(year: i32, month0: i32) -> u32 {
    let year = year + month0.div_euclid(MONTHS_PER_YEAR as i32);
    match month0.rem_euclid(MONTHS_PER_YEAR as i32) {
        0 | 2 | 4 | 6 | 7 | 9 | 11 => 31,
        3 | 5 | 8 | 10 => 30,
        _ if is_leap_year(year) => 29,
        _ => 28,
    }
}

/// Days since 1970-01-01 of the given proleptic gregorian date.
fn days_from_civil(year: i32, month: u32, day: u32) -> i64 {
    let y = i64::from(year) - if month <= 2 { 1 } else { 0 };
    let m = i64::from(month);
    let era = if y >= 0 { y } else { y - 399 } / 400;
    let yoe = y - era * 400;
    let mp = if m > 2 { m - 3 } else { m + 9 };
    let doy = (153 * mp + 2) / 5 + i64::from(day) - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * 146_097 + doe - 719_468
}

/// Weekday of a date with Monday = 0 ... Sunday = 6.
pub fn weekday_from_monday(year: i32, month0: u32, day: u32) -> u32 {
    // 1970-01-01 was a Thursday
    (days_from_civil(year, month0 + 1, day) + 3).rem_euclid(7) as u32
}

/// A plain calendar date without time or timezone.
///
/// Months are 0-based (`0` is January). A `CalendarDate` always denotes a day
/// that exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarDate {
    year: i32,
    month0: u32,
    day: u32,
}

impl CalendarDate {
    pub fn new(year: i32, month0: u32, day: u32) -> Option<Self> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) || month0 >= MONTHS_PER_YEAR {
            return None;
        }

        if day == 0 || day > days_in_month(year, month0 as i32) {
            return None;
        }

        Some(CalendarDate { year, month0, day })
    }

    pub fn today() -> Self {
        let today = Local::now().date_naive();
        CalendarDate::from_naive(today).unwrap_or(CalendarDate {
            year: 1970,
            month0: 0,
            day: 1,
        })
    }

    pub fn from_naive(date: NaiveDate) -> Option<Self> {
        CalendarDate::new(date.year(), date.month0(), date.day())
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// Month starting at `0` for January.
    pub fn month0(&self) -> u32 {
        self.month0
    }

    /// Month starting at `1` for January.
    pub fn month(&self) -> u32 {
        self.month0 + 1
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    pub fn days_in_month(&self) -> u32 {
        days_in_month(self.year, self.month0 as i32)
    }

    pub fn first_of_month(&self) -> Self {
        CalendarDate { day: 1, ..*self }
    }

    pub fn same_month(&self, other: &CalendarDate) -> bool {
        self.year == other.year && self.month0 == other.month0
    }

    /// Moves by `delta` months and resets the day to the first of that month.
    ///
    /// Returns `None` if the target month lies outside of the supported years.
    pub fn shift_months(&self, delta: i32) -> Option<Self> {
        let total = i64::from(self.year) * i64::from(MONTHS_PER_YEAR)
            + i64::from(self.month0)
            + i64::from(delta);
        let year = total.div_euclid(i64::from(MONTHS_PER_YEAR));
        let month0 = total.rem_euclid(i64::from(MONTHS_PER_YEAR)) as u32;

        if year < i64::from(MIN_YEAR) || year > i64::from(MAX_YEAR) {
            return None;
        }

        CalendarDate::new(year as i32, month0, 1)
    }

    /// Date in month `self` shifted by `delta` months on the given `day`.
    pub fn with_month_offset(&self, delta: i32, day: u32) -> Option<Self> {
        self.shift_months(delta)
            .and_then(|first| CalendarDate::new(first.year, first.month0, day))
    }
}

impl Default for CalendarDate {
    fn default() -> Self {
        CalendarDate::today()
    }
}

impl From<CalendarDate> for NaiveDate {
    fn from(date: CalendarDate) -> Self {
        // Every CalendarDate lies well within chrono's supported range.
        NaiveDate::from_ymd_opt(date.year, date.month(), date.day).unwrap_or(NaiveDate::MIN)
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&codec::format(self))
    }
}

impl FromStr for CalendarDate {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        codec::parse(s).ok_or_else(|| {
            Error::new(
                ErrorKind::DateParse,
                &format!("'{}' is not a valid date (expected DD.MM.YYYY)", s),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leap_years() {
        assert!(is_leap_year(2024));
        assert!(is_leap_year(2000));
        assert!(!is_leap_year(1900));
        assert!(!is_leap_year(2023));
    }

    #[test]
    fn month_lengths() {
        assert_eq!(days_in_month(2024, 1), 29);
        assert_eq!(days_in_month(2023, 1), 28);
        assert_eq!(days_in_month(2024, 3), 30);
        assert_eq!(days_in_month(2024, 11), 31);
        // wraps into the previous year
        assert_eq!(days_in_month(2024, -1), 31);
        assert_eq!(days_in_month(2025, -11), 29);
    }

    #[test]
    fn weekdays() {
        // 2024-01-01 was a Monday, 2024-02-01 a Thursday
        assert_eq!(weekday_from_monday(2024, 0, 1), 0);
        assert_eq!(weekday_from_monday(2024, 1, 1), 3);
        assert_eq!(weekday_from_monday(2000, 0, 1), 5);
        assert_eq!(weekday_from_monday(1970, 0, 1), 3);
    }

    #[test]
    fn weekdays_agree_with_chrono() {
        for year in 1890..2110 {
            for month0 in 0..12 {
                let naive = NaiveDate::from_ymd_opt(year, month0 + 1, 1)
                    .expect("first of month is always valid");
                assert_eq!(
                    weekday_from_monday(year, month0, 1),
                    naive.weekday().num_days_from_monday(),
                    "{}-{}",
                    year,
                    month0 + 1
                );
            }
        }
    }

    #[test]
    fn rejects_impossible_dates() {
        assert!(CalendarDate::new(2024, 1, 30).is_none());
        assert!(CalendarDate::new(2023, 1, 29).is_none());
        assert!(CalendarDate::new(2024, 12, 1).is_none());
        assert!(CalendarDate::new(2024, 0, 0).is_none());
        assert!(CalendarDate::new(0, 0, 1).is_none());
        assert!(CalendarDate::new(10000, 0, 1).is_none());
        assert!(CalendarDate::new(2024, 1, 29).is_some());
    }

    #[test]
    fn shift_resets_day() {
        let date = CalendarDate::new(2024, 2, 31).unwrap();
        assert_eq!(date.shift_months(1), CalendarDate::new(2024, 3, 1));
        assert_eq!(date.shift_months(-1), CalendarDate::new(2024, 1, 1));
        assert_eq!(date.shift_months(10), CalendarDate::new(2025, 0, 1));
        assert_eq!(date.shift_months(-15), CalendarDate::new(2022, 11, 1));
    }

    #[test]
    fn shift_stops_at_supported_range() {
        let first = CalendarDate::new(MIN_YEAR, 0, 1).unwrap();
        assert!(first.shift_months(-1).is_none());
        let last = CalendarDate::new(MAX_YEAR, 11, 1).unwrap();
        assert!(last.shift_months(1).is_none());
    }

    #[test]
    fn month_offset_keeps_day() {
        let date = CalendarDate::new(2024, 0, 15).unwrap();
        assert_eq!(date.with_month_offset(-1, 31), CalendarDate::new(2023, 11, 31));
        assert_eq!(date.with_month_offset(1, 29), CalendarDate::new(2024, 1, 29));
        assert_eq!(date.with_month_offset(1, 30), None);
    }

    #[test]
    fn converts_to_naive() {
        let date = CalendarDate::new(2024, 5, 15).unwrap();
        let naive: NaiveDate = date.into();
        assert_eq!(naive, NaiveDate::from_ymd_opt(2024, 6, 15).unwrap());
        assert_eq!(CalendarDate::from_naive(naive), Some(date));
    }

    #[test]
    fn parses_from_str() {
        let date: CalendarDate = "01.03.2024".parse().expect("valid date");
        assert_eq!(date, CalendarDate::new(2024, 2, 1).unwrap());
        assert_eq!(date.to_string(), "01.03.2024");
        assert!("31.04.2024".parse::<CalendarDate>().is_err());
    }
}
