use super::fixtures::date;
use crate::dates::{parse_date, DateModes, DateRange};

#[test]
fn test_parse_date_accepts_month_day_year() {
    assert_eq!(parse_date("12/30/2016").unwrap(), date(2016, 12, 30));
    assert_eq!(parse_date(" 1/2/2017 ").unwrap(), date(2017, 1, 2));
}

#[test]
fn test_parse_date_rejects_other_formats() {
    for bad in ["2016-12-30", "30/12/2016", "12/32/2016", "", "today"] {
        let err = parse_date(bad).unwrap_err();
        assert!(err.is_invalid_input(), "{} should be invalid input", bad);
        assert!(err.to_string().contains("MM/DD/YYYY"));
    }
}

#[test]
fn test_range_yields_every_day_inclusive() {
    let cases = [
        (date(2016, 12, 30), date(2016, 12, 30)),
        (date(2016, 12, 24), date(2016, 12, 30)),
        // crosses a year and a leap day
        (date(2015, 12, 31), date(2016, 3, 1)),
    ];
    for (start, end) in cases {
        let range = DateRange::new(start, end).unwrap();
        let dates: Vec<_> = range.iter().collect();

        let expected_len = (end - start).num_days() as usize + 1;
        assert_eq!(dates.len(), expected_len);
        assert_eq!(range.len(), expected_len);
        assert_eq!(dates.first(), Some(&start));
        assert_eq!(dates.last(), Some(&end));
        for pair in dates.windows(2) {
            assert_eq!((pair[1] - pair[0]).num_days(), 1);
        }
    }
}

#[test]
fn test_range_is_restartable() {
    let range = DateRange::parse("12/24/2016", "12/26/2016").unwrap();
    let first: Vec<_> = range.iter().collect();
    let second: Vec<_> = (&range).into_iter().collect();
    assert_eq!(first, second);
    assert_eq!(
        first,
        vec![date(2016, 12, 24), date(2016, 12, 25), date(2016, 12, 26)]
    );

    let mut iter = range.iter();
    assert_eq!(iter.len(), 3);
    iter.next();
    assert_eq!(iter.len(), 2);
}

#[test]
fn test_range_start_after_end_is_invalid() {
    let err = DateRange::new(date(2016, 12, 31), date(2016, 12, 30)).unwrap_err();
    assert!(err.is_invalid_input());
}

#[test]
fn test_range_requires_both_bounds() {
    assert_eq!(DateRange::from_bounds(None, None).unwrap(), None);
    assert!(DateRange::from_bounds(Some("12/30/2016"), None)
        .unwrap_err()
        .is_invalid_input());
    assert!(DateRange::from_bounds(None, Some("12/30/2016"))
        .unwrap_err()
        .is_invalid_input());
    assert!(DateRange::from_bounds(Some("12/30/2016"), Some("bogus"))
        .unwrap_err()
        .is_invalid_input());
}

#[test]
fn test_no_mode_means_today() {
    let modes = DateModes::parse(None, None, None, false).unwrap();
    assert!(modes.implies_today());
    assert_eq!(modes.dates(date(2017, 1, 5)), vec![date(2017, 1, 5)]);
}

#[test]
fn test_modes_combine_in_order_without_repeats() {
    let modes = DateModes::parse(
        Some("12/29/2016"),
        Some("12/30/2016"),
        Some("12/30/2016"),
        true,
    )
    .unwrap();
    assert!(!modes.implies_today());
    assert_eq!(
        modes.dates(date(2017, 1, 5)),
        vec![date(2016, 12, 29), date(2016, 12, 30), date(2017, 1, 5)]
    );
}

#[test]
fn test_single_date_mode_skips_today() {
    let modes = DateModes::parse(None, None, Some("12/24/2016"), false).unwrap();
    assert_eq!(modes.dates(date(2017, 1, 5)), vec![date(2016, 12, 24)]);
}

#[test]
fn test_modes_reject_incomplete_range() {
    let err = DateModes::parse(Some("12/29/2016"), None, Some("12/30/2016"), false).unwrap_err();
    assert!(err.is_invalid_input());
    assert!(err.to_string().contains("end"));
}

#[test]
fn test_today_inside_range_is_not_repeated() {
    let modes = DateModes::parse(Some("01/01/2016"), Some("12/31/2016"), None, true).unwrap();
    let dates = modes.dates(date(2016, 6, 15));
    assert_eq!(dates.len(), 366);
    assert_eq!(dates.last(), Some(&date(2016, 12, 31)));
}

#[test]
fn test_date_equal_to_today_is_listed_once() {
    let modes = DateModes::parse(Some("12/24/2016"), Some("12/25/2016"), Some("01/05/2017"), true)
        .unwrap();
    assert_eq!(
        modes.dates(date(2017, 1, 5)),
        vec![date(2016, 12, 24), date(2016, 12, 25), date(2017, 1, 5)]
    );
}

#[test]
fn test_range_contains_its_bounds_only() {
    let range = DateRange::parse("12/24/2016", "12/26/2016").unwrap();
    assert!(range.contains(date(2016, 12, 24)));
    assert!(range.contains(date(2016, 12, 26)));
    assert!(!range.contains(date(2016, 12, 23)));
    assert!(!range.contains(date(2016, 12, 27)));
}
