use std::cmp::Ordering;

use cleressian_date::{
    CalendarDate, DAYS_PER_GRAND_CYCLE, DateDelta, Template, YEARS_PER_GRAND_CYCLE, days_in_month, days_in_year,
    is_leap_year,
};
use proptest::prelude::*;

/// Any valid date in the first twenty grand cycles
fn arb_date() -> impl Strategy<Value = CalendarDate> {
    (1u32..=20, 1u8..=23, 1u8..=13, 1u8..=10, 1u8..=34).prop_map(|(grand_cycle, cycle, year, month, day)| {
        let day = day.min(days_in_month(cycle, year, month));
        CalendarDate::new(grand_cycle, cycle, year, month, day).unwrap()
    })
}

/// A date far enough from 1:1:1 that a few thousand days never cross it
fn arb_later_date() -> impl Strategy<Value = CalendarDate> {
    arb_date().prop_filter("away from the epoch", |date| date.grand_cycle() > 1)
}

proptest! {
    #[test]
    fn absolute_round_trip(date in arb_date()) {
        let absolute = date.to_absolute();
        prop_assert!(absolute.is_valid());
        prop_assert_eq!(CalendarDate::from_absolute(absolute.year, absolute.day).unwrap(), date);
    }

    #[test]
    fn leap_rule(cycle in 1u8..=23, year in 1u8..=13) {
        let leap = year % 3 == 0 || (cycle == 23 && year == 13);
        prop_assert_eq!(is_leap_year(cycle, year), leap);
        prop_assert_eq!(days_in_year(cycle, year), if leap { 313 } else { 312 });
        prop_assert_eq!(days_in_month(cycle, year, 10), if leap { 7 } else { 6 });
    }

    #[test]
    fn every_grand_cycle_window_has_the_same_length(start in 1u64..5_000) {
        let total: u64 = (start..start + YEARS_PER_GRAND_CYCLE)
            .map(|year| u64::from(CalendarDate::from_absolute(year, 1).unwrap().days_in_year()))
            .sum();
        prop_assert_eq!(total, DAYS_PER_GRAND_CYCLE);
    }

    #[test]
    fn ordering_is_antisymmetric(a in arb_date(), b in arb_date()) {
        prop_assert_eq!(CalendarDate::compare(&a, &b), CalendarDate::compare(&b, &a).reverse());
        prop_assert_eq!(CalendarDate::compare(&a, &b) == Ordering::Equal, a == b);
        prop_assert_eq!(a.cmp(&b), a.to_absolute().cmp(&b.to_absolute()));
    }

    #[test]
    fn ordering_is_transitive(a in arb_date(), b in arb_date(), c in arb_date()) {
        if a <= b && b <= c {
            prop_assert!(a <= c);
        }
    }

    #[test]
    fn adding_days_is_reversible(date in arb_later_date(), days in -5_000i64..5_000) {
        let shifted = date.plus(0, days).unwrap();
        prop_assert_eq!(shifted.minus(0, days).unwrap(), date);
        prop_assert_eq!(shifted.cmp(&date), days.cmp(&0));
    }

    #[test]
    fn next_day_is_one_day_away(date in arb_date()) {
        let next = date.plus(0, 1).unwrap();
        prop_assert!(next > date);
        prop_assert_eq!(CalendarDate::distance(&date, &next), DateDelta::new(0, 1));
    }

    #[test]
    fn distance_is_symmetric(a in arb_date(), b in arb_date()) {
        let delta = CalendarDate::distance(&a, &b);
        prop_assert_eq!(delta, CalendarDate::distance(&b, &a));
        prop_assert!(delta.years >= 0);
        prop_assert!((0..313).contains(&delta.days));
        prop_assert_eq!(CalendarDate::distance(&a, &a), DateDelta::ZERO);
        prop_assert_eq!(b - a, if a <= b { delta } else { -delta });
    }

    #[test]
    fn distance_is_undone_by_plus(a in arb_date(), b in arb_date()) {
        let (earlier, later) = if a <= b { (a, b) } else { (b, a) };
        prop_assume!(earlier.day_of_year() <= later.day_of_year());
        let delta = CalendarDate::distance(&earlier, &later);
        prop_assert_eq!(earlier.checked_add(delta).unwrap(), later);
    }

    #[test]
    fn borrowed_distance_is_undone_within_a_day(a in arb_date(), b in arb_date()) {
        let (earlier, later) = if a <= b { (a, b) } else { (b, a) };
        prop_assume!(earlier.day_of_year() > later.day_of_year());
        let delta = CalendarDate::distance(&earlier, &later);
        let landed = earlier.plus(delta.years, delta.days).unwrap();

        // the borrow counts the earlier year's length; the carry counts the year before `later`
        let year_before = CalendarDate::from_absolute(later.absolute_year() - 1, 1).unwrap();
        if year_before.days_in_year() == earlier.days_in_year() {
            prop_assert_eq!(landed, later);
        } else {
            prop_assert_eq!(CalendarDate::distance(&landed, &later), DateDelta::new(0, 1));
        }
    }

    #[test]
    fn standard_template_round_trip(date in arb_date()) {
        let template = Template::new("%g:%c:%y %B %d").unwrap();
        let text = template.format(&date);
        prop_assert_eq!(template.parse(&text).unwrap(), date);
        prop_assert_eq!(text.parse::<CalendarDate>().unwrap(), date);
    }

    #[test]
    fn absolute_template_round_trip(date in arb_date()) {
        let text = date.format("%X").unwrap();
        prop_assert_eq!(CalendarDate::parse(&text, "%X").unwrap(), date);
    }

    #[test]
    fn padded_template_round_trip(date in arb_date()) {
        let text = date.format("%04g-%02c-%02y-%02m-%02d").unwrap();
        prop_assert_eq!(CalendarDate::parse(&text, "%04g-%02c-%02y-%02m-%02d").unwrap(), date);
    }

    #[test]
    fn parse_never_panics(text in "\\PC{0,24}", template in "[%gcymdjYbBxX0-9:. ]{0,12}") {
        let _ = CalendarDate::parse(&text, &template);
    }

    #[test]
    fn format_never_panics(date in arb_date(), template in "[%gcymdjYbBxX0-9:. ]{0,12}") {
        let _ = date.format(&template);
    }
}
