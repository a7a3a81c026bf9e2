use chrono::{Datelike, NaiveDate};

/// Leap year used to resolve month/day pairs, so Feb 29 is always valid.
pub const REFERENCE_YEAR: i32 = 2024;

/// Zero-based day of year for a `MM.DD` or `MM.DD-MM.DD` date string.
///
/// Only the part before the first `-` is read. Returns `None` when the month
/// or day is missing, zero, not a number, or not a real calendar day in
/// [`REFERENCE_YEAR`]. Years are never read from the input.
pub fn day_of_year(date: &str) -> Option<u32> {
    let (month, day) = parse_month_day(date)?;
    NaiveDate::from_ymd_opt(REFERENCE_YEAR, month, day).map(|d| d.ordinal0())
}

fn parse_month_day(date: &str) -> Option<(u32, u32)> {
    let start = date.split('-').next().unwrap_or_default();
    let mut parts = start.split('.');
    let month = parse_component(parts.next()?)?;
    let day = parse_component(parts.next()?)?;
    Some((month, day))
}

fn parse_component(raw: &str) -> Option<u32> {
    match raw.trim().parse::<u32>() {
        Ok(0) | Err(_) => None,
        Ok(value) => Some(value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_and_last_day() {
        assert_eq!(day_of_year("01.01"), Some(0));
        assert_eq!(day_of_year("12.31"), Some(365));
    }

    #[test]
    fn leap_day_is_valid() {
        assert_eq!(day_of_year("02.29"), Some(59));
        assert_eq!(day_of_year("03.01"), Some(60));
    }

    #[test]
    fn range_uses_start() {
        assert_eq!(day_of_year("03.01-03.05"), day_of_year("03.01"));
        assert_eq!(day_of_year("04.05-06"), Some(95));
        assert_eq!(day_of_year("07.07-11"), day_of_year("07.07"));
    }

    #[test]
    fn unpadded_components() {
        assert_eq!(day_of_year("5.1"), day_of_year("05.01"));
    }

    #[test]
    fn malformed_dates_have_no_day() {
        for date in ["00.05", "05.00", "13.40", "04.31", "", "abc", "05", "05.", ".05", "a.b"] {
            assert_eq!(day_of_year(date), None, "{date:?}");
        }
    }

    #[test]
    fn year_is_ignored() {
        assert_eq!(day_of_year("06.15.2023"), day_of_year("06.15"));
    }
}
