use chrono::NaiveDate;

use daycal::date::{
    DateKeyError, MonthCursor, add_months, days_in_month, first_weekday_of_month, format_date_key,
    is_leap_year, is_same_day, is_same_month, month_grid, parse_date_key,
};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).expect("valid date")
}

#[test]
fn february_length_follows_leap_rule() {
    assert_eq!(days_in_month(2024, 1), 29);
    assert_eq!(days_in_month(2023, 1), 28);
    assert_eq!(days_in_month(1900, 1), 28);
    assert_eq!(days_in_month(2000, 1), 29);
    assert!(is_leap_year(2000));
    assert!(!is_leap_year(2100));
}

#[test]
fn month_lengths_and_overflow() {
    let lengths: Vec<u32> = (0..12).map(|m| days_in_month(2023, m)).collect();
    assert_eq!(lengths, [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31]);
    // Month 13 of 2023 is February 2024.
    assert_eq!(days_in_month(2023, 13), 29);
}

#[test]
fn first_weekday_matches_chrono() {
    use chrono::Datelike;
    for year in [1600, 1999, 2000, 2023, 2024, 2100] {
        for month0 in 0..12 {
            let expected = d(year, month0 + 1, 1).weekday().num_days_from_sunday();
            assert_eq!(first_weekday_of_month(year, month0), expected, "{year}-{month0}");
        }
    }
    // 2024-03-01 was a Friday.
    assert_eq!(first_weekday_of_month(2024, 2), 5);
}

#[test]
fn first_weekday_repeats_every_400_years_past_chrono_range() {
    assert!(chrono::NaiveDate::from_ymd_opt(402_024, 3, 1).is_none());
    for month0 in 0..12 {
        assert_eq!(
            first_weekday_of_month(402_024, month0),
            first_weekday_of_month(2024, month0)
        );
        assert_eq!(
            first_weekday_of_month(-397_976, month0),
            first_weekday_of_month(2024, month0)
        );
    }
}

#[test]
fn day_keys_round_trip_and_reject_noncanonical_input() {
    assert_eq!(format_date_key(parse_date_key("2024-01-05").unwrap()), "2024-01-05");
    assert_eq!(format_date_key(d(987, 7, 4)), "0987-07-04");

    assert_eq!(
        parse_date_key("2024-1-5"),
        Err(DateKeyError::Malformed("2024-1-5".to_string()))
    );
    assert_eq!(
        parse_date_key("2023-02-29"),
        Err(DateKeyError::NoSuchDay("2023-02-29".to_string()))
    );
    assert!(parse_date_key("2024/01/05").is_err());
    assert!(parse_date_key("").is_err());
}

#[test]
fn same_day_and_same_month() {
    assert!(is_same_day(d(2024, 3, 10), d(2024, 3, 10)));
    assert!(!is_same_day(d(2024, 3, 10), d(2024, 3, 11)));
    assert!(is_same_month(d(2024, 3, 1), d(2024, 3, 31)));
    assert!(!is_same_month(d(2024, 3, 1), d(2023, 3, 1)));
}

#[test]
fn add_months_rolls_day_over_like_native_dates() {
    assert_eq!(add_months(d(2024, 1, 31), 1), Some(d(2024, 3, 2)));
    assert_eq!(add_months(d(2023, 1, 31), 1), Some(d(2023, 3, 3)));
    assert_eq!(add_months(d(2024, 1, 15), -1), Some(d(2023, 12, 15)));
    assert_eq!(add_months(d(2024, 11, 30), 14), Some(d(2026, 1, 30)));
}

#[test]
fn month_grid_pads_whole_weeks() {
    // March 2024 starts on Friday: 5 leading days, 31 days, 6 trailing.
    let grid = month_grid(2024, 2);
    assert_eq!(grid.len(), 42);
    assert_eq!(grid[0], d(2024, 2, 25));
    assert_eq!(grid[5], d(2024, 3, 1));
    assert_eq!(grid[41], d(2024, 4, 6));

    // February 2026 starts on Sunday and ends on Saturday: a full extra week.
    let grid = month_grid(2026, 1);
    assert_eq!(grid.len(), 35);
    assert_eq!(grid[0], d(2026, 2, 1));
    assert_eq!(grid[34], d(2026, 3, 7));
}

#[test]
fn cursor_navigates_without_skipping_months() {
    let cursor = MonthCursor::from_date(d(2024, 1, 31));
    assert_eq!(cursor.next(), MonthCursor::new(2024, 1));
    assert_eq!(cursor.prev(), MonthCursor::new(2023, 11));
    assert_eq!(cursor.next().title(), "February 2024");
    assert_eq!(cursor.next().days_in_month(), 29);
    let february = cursor.next().grid();
    assert_eq!(february, month_grid(2024, 1));
    assert_eq!(february[0], d(2024, 1, 28));
    assert_eq!(february.len(), 35);
    assert!(cursor.contains(d(2024, 1, 1)));
    assert!(!cursor.contains(d(2024, 2, 1)));
    assert_eq!(MonthCursor::new(2024, 12), MonthCursor::new(2025, 0));
}
