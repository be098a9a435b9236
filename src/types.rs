use crate::consts::{
    CYCLES_PER_GRAND_CYCLE, DAYS_IN_LEAP_YEAR, DAYS_IN_LONG_MONTH, DAYS_IN_SHORT_MONTH, DAYS_IN_YEAR,
    INTERCALARY_MONTH, LEAP_YEAR_STRIDE, MONTH_ABBREV_LEN, MONTH_NAMES, MONTHS_PER_YEAR, YEARS_PER_CYCLE,
};
use crate::error::FieldError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU32;
use std::num::NonZeroU8;
use std::str::FromStr;

/// A grand cycle value guaranteed to be at least 1 (the counter is otherwise unbounded)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct GrandCycle(NonZeroU32);

impl GrandCycle {
    /// The first grand cycle
    pub const MIN: Self = Self(NonZeroU32::MIN);

    /// Creates a new `GrandCycle`, validating that it's non-zero
    ///
    /// # Errors
    /// Returns `FieldError::InvalidGrandCycle` if the value is 0.
    pub fn new(value: u32) -> Result<Self, FieldError> {
        NonZeroU32::new(value).map(Self).ok_or(FieldError::InvalidGrandCycle(value))
    }

    /// Returns the grand cycle value as u32
    #[inline]
    pub const fn get(self) -> u32 {
        self.0.get()
    }
}

impl TryFrom<u32> for GrandCycle {
    type Error = FieldError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<GrandCycle> for u32 {
    fn from(grand_cycle: GrandCycle) -> Self {
        grand_cycle.0.get()
    }
}

impl fmt::Display for GrandCycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A cycle value guaranteed to be in the range `1..=CYCLES_PER_GRAND_CYCLE` (1..=23)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Cycle(NonZeroU8);

impl Cycle {
    pub const MIN: Self = Self(NonZeroU8::MIN);

    /// Creates a new Cycle, validating that it's non-zero and <= `CYCLES_PER_GRAND_CYCLE`
    ///
    /// # Errors
    /// Returns `FieldError::InvalidCycle` if the value is 0 or > 23.
    pub fn new(value: u8) -> Result<Self, FieldError> {
        let non_zero = NonZeroU8::new(value).ok_or(FieldError::InvalidCycle(value))?;
        if value > CYCLES_PER_GRAND_CYCLE {
            return Err(FieldError::InvalidCycle(value));
        }
        Ok(Self(non_zero))
    }

    /// Returns the cycle value as u8
    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }
}

impl TryFrom<u8> for Cycle {
    type Error = FieldError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Cycle> for u8 {
    fn from(cycle: Cycle) -> Self {
        cycle.0.get()
    }
}

impl fmt::Display for Cycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A year-of-cycle value guaranteed to be in the range `1..=YEARS_PER_CYCLE` (1..=13)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Year(NonZeroU8);

impl Year {
    pub const MIN: Self = Self(NonZeroU8::MIN);

    /// Creates a new Year, validating that it's non-zero and <= `YEARS_PER_CYCLE`
    ///
    /// # Errors
    /// Returns `FieldError::InvalidYear` if the value is 0 or > 13.
    pub fn new(value: u8) -> Result<Self, FieldError> {
        let non_zero = NonZeroU8::new(value).ok_or(FieldError::InvalidYear(value))?;
        if value > YEARS_PER_CYCLE {
            return Err(FieldError::InvalidYear(value));
        }
        Ok(Self(non_zero))
    }

    /// Returns the year value as u8
    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }
}

impl TryFrom<u8> for Year {
    type Error = FieldError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Year> for u8 {
    fn from(year: Year) -> Self {
        year.0.get()
    }
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One of the ten months. The tenth, Neyu, is the short intercalary month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
#[repr(u8)]
pub enum Month {
    Sirelle = 1,
    Tiri = 2,
    Enna = 3,
    Fis = 4,
    Klesni = 5,
    Pelio = 6,
    Kria = 7,
    Sui = 8,
    Brilia = 9,
    Neyu = 10,
}

impl Month {
    /// All months in calendar order
    pub const ALL: [Self; MONTHS_PER_YEAR as usize] = [
        Self::Sirelle,
        Self::Tiri,
        Self::Enna,
        Self::Fis,
        Self::Klesni,
        Self::Pelio,
        Self::Kria,
        Self::Sui,
        Self::Brilia,
        Self::Neyu,
    ];

    /// Creates a Month from its 1-based index
    ///
    /// # Errors
    /// Returns `FieldError::InvalidMonth` if the value is 0 or > `MONTHS_PER_YEAR`.
    pub fn new(value: u8) -> Result<Self, FieldError> {
        match value {
            1..=MONTHS_PER_YEAR => Ok(Self::ALL[usize::from(value - 1)]),
            _ => Err(FieldError::InvalidMonth(value)),
        }
    }

    /// Returns the month index (1..=10)
    #[inline]
    pub const fn get(self) -> u8 {
        self as u8
    }

    /// Full month name, e.g. "Sirelle"
    pub const fn name(self) -> &'static str {
        MONTH_NAMES[self as usize]
    }

    /// Abbreviated month name, e.g. "Sir"
    pub fn abbrev(self) -> &'static str {
        let name = self.name();
        name.get(..MONTH_ABBREV_LEN).unwrap_or(name)
    }

    /// Looks a month up by its abbreviated name (exact match)
    ///
    /// # Errors
    /// Returns `FieldError::UnknownMonthName` if no month has that abbreviation.
    pub fn from_abbrev(abbrev: &str) -> Result<Self, FieldError> {
        Self::ALL
            .into_iter()
            .find(|month| month.abbrev() == abbrev)
            .ok_or_else(|| FieldError::UnknownMonthName(abbrev.to_owned()))
    }
}

impl FromStr for Month {
    type Err = FieldError;

    /// Resolves a full month name by exact lookup
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|month| month.name() == s)
            .ok_or_else(|| FieldError::UnknownMonthName(s.to_owned()))
    }
}

impl TryFrom<u8> for Month {
    type Error = FieldError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Month> for u8 {
    fn from(month: Month) -> Self {
        month.get()
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A day value guaranteed to be valid for a given cycle, year and month
/// Uses `NonZeroU8` internally, so 0 is not a valid day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(into = "u8")]
pub struct Day(NonZeroU8);

impl Day {
    /// The first day of any month
    pub const MIN: Self = Self(NonZeroU8::MIN);

    /// Creates a new Day, validating it against the length of the given month
    ///
    /// # Errors
    /// Returns `FieldError::InvalidDay` if the value is 0 or past the end of the month.
    pub fn new(value: u8, cycle: Cycle, year: Year, month: Month) -> Result<Self, FieldError> {
        let max = days_in_month(cycle.get(), year.get(), month.get());
        let invalid = || FieldError::InvalidDay {
            cycle: cycle.get(),
            year: year.get(),
            month: month.get(),
            day: value,
            max,
        };

        let non_zero = NonZeroU8::new(value).ok_or_else(invalid)?;
        if value > max {
            return Err(invalid());
        }
        Ok(Self(non_zero))
    }

    /// Returns the day value as u8
    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }
}

impl From<Day> for u8 {
    fn from(day: Day) -> Self {
        day.0.get()
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// Calendar rules. The grand cycle never matters: the leap pattern repeats
// identically in every grand cycle.

/// Whether `cycle:year` is a leap year: every third year of a cycle, plus the
/// last year of the last cycle.
pub const fn is_leap_year(cycle: u8, year: u8) -> bool {
    year % LEAP_YEAR_STRIDE == 0 || (cycle == CYCLES_PER_GRAND_CYCLE && year == YEARS_PER_CYCLE)
}

/// Number of days in `month` of `cycle:year`. Only the intercalary month
/// changes length, gaining a day in leap years.
pub const fn days_in_month(cycle: u8, year: u8, month: u8) -> u8 {
    debug_assert!(month != 0 && month <= MONTHS_PER_YEAR);

    if month == INTERCALARY_MONTH {
        DAYS_IN_SHORT_MONTH + is_leap_year(cycle, year) as u8
    } else {
        DAYS_IN_LONG_MONTH
    }
}

/// Number of days in `cycle:year`, either 312 or 313.
pub const fn days_in_year(cycle: u8, year: u8) -> u16 {
    if is_leap_year(cycle, year) { DAYS_IN_LEAP_YEAR } else { DAYS_IN_YEAR }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grand_cycle_new() {
        assert!(GrandCycle::new(1).is_ok());
        assert!(GrandCycle::new(u32::MAX).is_ok());
        assert!(matches!(GrandCycle::new(0), Err(FieldError::InvalidGrandCycle(0))));
    }

    #[test]
    fn test_cycle_new_valid() {
        for c in 1..=23 {
            assert!(Cycle::new(c).is_ok(), "Cycle {c} should be valid");
        }
    }

    #[test]
    fn test_cycle_new_invalid() {
        assert!(matches!(Cycle::new(0), Err(FieldError::InvalidCycle(0))));
        assert!(matches!(Cycle::new(24), Err(FieldError::InvalidCycle(24))));
    }

    #[test]
    fn test_year_new_valid() {
        for y in 1..=13 {
            assert!(Year::new(y).is_ok(), "Year {y} should be valid");
        }
    }

    #[test]
    fn test_year_new_invalid() {
        assert!(matches!(Year::new(0), Err(FieldError::InvalidYear(0))));
        assert!(matches!(Year::new(14), Err(FieldError::InvalidYear(14))));
    }

    #[test]
    fn test_year_try_from_u8() {
        let year: Year = 7.try_into().unwrap();
        assert_eq!(year.get(), 7);

        let result: Result<Year, _> = 0.try_into();
        assert!(result.is_err());
    }

    #[test]
    fn test_month_new() {
        assert_eq!(Month::new(1).unwrap(), Month::Sirelle);
        assert_eq!(Month::new(10).unwrap(), Month::Neyu);
        assert!(matches!(Month::new(0), Err(FieldError::InvalidMonth(0))));
        assert!(matches!(Month::new(11), Err(FieldError::InvalidMonth(11))));
    }

    #[test]
    fn test_month_names() {
        let abbrevs: Vec<_> = Month::ALL.iter().map(|m| m.abbrev()).collect();
        assert_eq!(
            abbrevs,
            ["Sir", "Tir", "Enn", "Fis", "Kle", "Pel", "Kri", "Sui", "Bri", "Ney"]
        );
        assert_eq!(Month::Klesni.name(), "Klesni");
        assert_eq!(Month::Klesni.to_string(), "Klesni");
        for (index, month) in Month::ALL.iter().enumerate() {
            assert_eq!(usize::from(month.get()), index + 1);
        }
    }

    #[test]
    fn test_month_from_str_is_exact() {
        assert_eq!("Tiri".parse::<Month>().unwrap(), Month::Tiri);
        assert!(matches!(
            "tiri".parse::<Month>(),
            Err(FieldError::UnknownMonthName(name)) if name == "tiri"
        ));
        assert!("".parse::<Month>().is_err());
        assert!("Tir".parse::<Month>().is_err());
    }

    #[test]
    fn test_month_from_abbrev() {
        assert_eq!(Month::from_abbrev("Bri").unwrap(), Month::Brilia);
        assert_eq!(Month::from_abbrev("Fis").unwrap(), Month::Fis);
        assert!(Month::from_abbrev("Brilia").is_err());
    }

    #[test]
    fn test_month_serde() {
        let json = serde_json::to_string(&Month::Kria).unwrap();
        assert_eq!(json, "7");

        let parsed: Month = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, Month::Kria);
        assert!(serde_json::from_str::<Month>("11").is_err());
    }

    #[test]
    fn test_cycle_serde() {
        let cycle = Cycle::new(23).unwrap();
        let json = serde_json::to_string(&cycle).unwrap();
        assert_eq!(json, "23");
        assert_eq!(serde_json::from_str::<Cycle>(&json).unwrap(), cycle);
        assert!(serde_json::from_str::<Cycle>("24").is_err());
    }

    #[test]
    fn test_day_new() {
        let c1 = Cycle::new(1).unwrap();
        let y1 = Year::new(1).unwrap();
        let y3 = Year::new(3).unwrap();

        assert!(Day::new(34, c1, y1, Month::Sirelle).is_ok());
        assert!(Day::new(35, c1, y1, Month::Sirelle).is_err());
        assert!(Day::new(6, c1, y1, Month::Neyu).is_ok());
        assert!(Day::new(7, c1, y3, Month::Neyu).is_ok());
        assert!(Day::new(8, c1, y3, Month::Neyu).is_err());
    }

    #[test]
    fn test_day_new_invalid_reports_bound() {
        let result = Day::new(7, Cycle::new(1).unwrap(), Year::new(1).unwrap(), Month::Neyu);
        assert!(matches!(
            result,
            Err(FieldError::InvalidDay {
                cycle: 1,
                year: 1,
                month: 10,
                day: 7,
                max: 6
            })
        ));

        let result = Day::new(0, Cycle::new(1).unwrap(), Year::new(1).unwrap(), Month::Tiri);
        assert!(matches!(result, Err(FieldError::InvalidDay { day: 0, max: 34, .. })));
    }

    #[test]
    fn test_is_leap_year_cases() {
        struct TestCase {
            cycle:       u8,
            year:        u8,
            is_leap:     bool,
            description: &'static str,
        }

        let cases = [
            TestCase {
                cycle:       1,
                year:        3,
                is_leap:     true,
                description: "third year of a cycle",
            },
            TestCase {
                cycle:       7,
                year:        12,
                is_leap:     true,
                description: "twelfth year of a cycle",
            },
            TestCase {
                cycle:       1,
                year:        1,
                is_leap:     false,
                description: "first year of a cycle",
            },
            TestCase {
                cycle:       1,
                year:        13,
                is_leap:     false,
                description: "last year of an ordinary cycle",
            },
            TestCase {
                cycle:       22,
                year:        13,
                is_leap:     false,
                description: "last year of the second-to-last cycle",
            },
            TestCase {
                cycle:       23,
                year:        13,
                is_leap:     true,
                description: "last year of the grand cycle",
            },
            TestCase {
                cycle:       23,
                year:        11,
                is_leap:     false,
                description: "ordinary year of the last cycle",
            },
        ];

        for case in &cases {
            assert_eq!(
                is_leap_year(case.cycle, case.year),
                case.is_leap,
                "{}:{} ({})",
                case.cycle,
                case.year,
                case.description
            );
        }
    }

    #[test]
    fn test_leap_rule_exhaustive() {
        for cycle in 1..=23 {
            for year in 1..=13 {
                let expected = year % 3 == 0 || (cycle == 23 && year == 13);
                assert_eq!(is_leap_year(cycle, year), expected, "{cycle}:{year}");
            }
        }
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(1, 3, 10), 7);
        assert_eq!(days_in_month(1, 1, 10), 6);
        for month in 1..=9 {
            assert_eq!(days_in_month(1, 1, month), 34, "Month {month} should have 34 days");
            assert_eq!(days_in_month(1, 3, month), 34, "Month {month} should have 34 days");
        }
    }

    #[test]
    fn test_days_in_year() {
        assert_eq!(days_in_year(1, 3), 313);
        assert_eq!(days_in_year(1, 1), 312);
        for cycle in 1..=23 {
            for year in 1..=13 {
                let days = days_in_year(cycle, year);
                assert_eq!(days == 313, is_leap_year(cycle, year));
                assert!(days == 312 || days == 313);
            }
        }
    }
}
