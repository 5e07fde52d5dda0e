use chrono::NaiveDate;
use rstest::*;
use tracing_test::traced_test;

use crate::time::*;

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[rstest]
#[case::iso("2023-01-01", ymd(2023, 1, 1))]
#[case::slashes("2023/02/14", ymd(2023, 2, 14))]
#[case::us("04/30/2023", ymd(2023, 4, 30))]
#[case::long_month("5 June 2023", ymd(2023, 6, 5))]
#[case::short_month_comma("Jul 4, 2023", ymd(2023, 7, 4))]
#[case::datetime("2023-08-09 13:45:00", ymd(2023, 8, 9))]
#[case::rfc3339("2023-09-10T23:59:59+02:00", ymd(2023, 9, 10))]
#[case::padded("  2023-10-11 ", ymd(2023, 10, 11))]
fn test_parse_date(#[case] input: &str, #[case] expected: NaiveDate) {
    assert_eq!(parse_date(input).unwrap(), expected);
}

#[test]
#[traced_test]
fn test_parse_date_falls_back_to_datetime() {
    assert_eq!(parse_date("2023-08-09T13:45").unwrap(), ymd(2023, 8, 9));
    assert!(logs_contain("trying datetime layouts"));
}

#[rstest]
#[case::garbage("not a date")]
#[case::empty("")]
#[case::bad_day("2023-02-30")]
fn test_parse_date_invalid(#[case] input: &str) {
    let err = parse_date(input).unwrap_err();
    assert!(matches!(err.downcast_ref::<TimeError>(), Some(TimeError::UnparseableDate(_))));
}

#[rstest]
#[case::mid_year(ymd(2024, 6, 17), ymd(2024, 5, 1))]
#[case::january(ymd(2024, 1, 31), ymd(2023, 12, 1))]
#[case::first_of_month(ymd(2024, 3, 1), ymd(2024, 2, 1))]
fn test_first_day_of_previous_month(#[case] today: NaiveDate, #[case] expected: NaiveDate) {
    assert_eq!(first_day_of_previous_month(today).unwrap(), expected);
}

#[rstest]
#[case::leap_february(ymd(2024, 2, 3), ymd(2024, 2, 29))]
#[case::february(ymd(2023, 2, 3), ymd(2023, 2, 28))]
#[case::december(ymd(2023, 12, 25), ymd(2023, 12, 31))]
#[case::thirty_days(ymd(2023, 9, 30), ymd(2023, 9, 30))]
fn test_last_day_of_month(#[case] today: NaiveDate, #[case] expected: NaiveDate) {
    assert_eq!(last_day_of_month(today).unwrap(), expected);
}
