//! Conversion between [`CalendarDate`] and its textual `DD.MM.YYYY` form.
//!
//! Parsing never fails loudly: any text that does not denote a real date
//! yields `None`, which callers treat as "no date".

use nom::{
    character::complete::{char, digit1},
    combinator::{all_consuming, map_res},
    sequence::{terminated, tuple},
    IResult,
};
use std::convert::TryFrom;

use crate::calendar::CalendarDate;

pub const SEPARATOR: char = '.';

fn number(input: &str) -> IResult<&str, u32> {
    map_res(digit1, str::parse::<u32>)(input)
}

fn day_month_year(input: &str) -> IResult<&str, (u32, u32, u32)> {
    all_consuming(tuple((
        terminated(number, char(SEPARATOR)),
        terminated(number, char(SEPARATOR)),
        number,
    )))(input)
}

pub fn parse(text: &str) -> Option<CalendarDate> {
    let (_, (day, month, year)) = day_month_year(text).ok()?;

    if day == 0 || month == 0 || year == 0 {
        return None;
    }

    let year = i32::try_from(year).ok()?;
    let date = CalendarDate::new(year, month - 1, day)?;

    // Reject anything that did not survive construction unchanged.
    if (date.year(), date.month(), date.day()) != (year, month, day) {
        return None;
    }

    Some(date)
}

pub fn format(date: &CalendarDate) -> String {
    format!(
        "{:02}{sep}{:02}{sep}{:04}",
        date.day(),
        date.month(),
        date.year(),
        sep = SEPARATOR
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::days_in_month;

    fn date(year: i32, month: u32, day: u32) -> CalendarDate {
        CalendarDate::new(year, month - 1, day).expect("valid test date")
    }

    #[test]
    fn parses_padded_and_unpadded() {
        assert_eq!(parse("14.01.1999"), Some(date(1999, 1, 14)));
        assert_eq!(parse("1.2.2024"), Some(date(2024, 2, 1)));
        assert_eq!(parse("29.02.2024"), Some(date(2024, 2, 29)));
    }

    #[test]
    fn rejects_impossible_days() {
        assert_eq!(parse("31.02.2024"), None);
        assert_eq!(parse("29.02.2023"), None);
        assert_eq!(parse("31.04.2024"), None);
        assert_eq!(parse("32.01.2024"), None);
        assert_eq!(parse("01.13.2024"), None);
    }

    #[test]
    fn rejects_malformed_text() {
        for text in &[
            "",
            "1.1",
            "a.b.c",
            "1.1.2024.1",
            "00.01.2024",
            "01.00.2024",
            "01.01.0000",
            "01..2024",
            ".01.2024",
            "01.01.",
            " 01.01.2024",
            "01.01.2024 ",
            "+1.01.2024",
            "01/01/2024",
            "99999999999.01.2024",
            "01.01.10000",
        ] {
            assert_eq!(parse(text), None, "'{}' should be rejected", text);
        }
    }

    #[test]
    fn accepts_years_below_one_hundred() {
        assert_eq!(parse("01.01.0099"), Some(date(99, 1, 1)));
        assert_eq!(parse("31.12.0001"), Some(date(1, 12, 31)));
        assert_eq!(parse("01.01.0000"), None);
    }

    #[test]
    fn formats_with_padding() {
        assert_eq!(format(&date(2024, 3, 5)), "05.03.2024");
        assert_eq!(format(&date(987, 12, 31)), "31.12.0987");
    }

    #[test]
    fn roundtrips_every_day_of_two_centuries() {
        for year in 1900..=2100 {
            for month in 1..=12 {
                for day in 1..=days_in_month(year, month as i32 - 1) {
                    let d = date(year, month, day);
                    assert_eq!(parse(&format(&d)), Some(d));
                }
            }
        }
    }
}
