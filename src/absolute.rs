//! Linear (absolute year, day of year) form of a date.
//!
//! The absolute form counts years from 1:1:1 without regard to cycles. It is
//! the single conversion used by arithmetic, ordering, distance and the
//! `%Y`/`%j` format codes.

use serde::{Deserialize, Serialize};

use crate::consts::{DAYS_IN_LONG_MONTH, YEARS_PER_CYCLE, YEARS_PER_GRAND_CYCLE};
use crate::error::FieldError;
use crate::prelude::*;
use crate::types::{Cycle, Day, GrandCycle, Month, Year, days_in_year};
use crate::CalendarDate;

/// A date as an absolute year and a day within that year (both 1-based).
///
/// Always derived from a [`CalendarDate`], never authoritative on its own.
/// Orders by year, then day.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display,
)]
#[display(fmt = "{year:04}.{day:03}")]
pub struct AbsoluteDate {
    pub year: u64,
    pub day:  u16,
}

impl AbsoluteDate {
    pub const fn new(year: u64, day: u16) -> Self {
        Self { year, day }
    }

    /// Whether this pair names a real date.
    pub fn is_valid(self) -> bool {
        CalendarDate::try_from(self).is_ok()
    }
}

impl Default for AbsoluteDate {
    fn default() -> Self {
        Self::new(1, 1)
    }
}

/// Splits an absolute year into (grand cycle, cycle, year of cycle).
///
/// Defined for every integer so that arithmetic can look at years before 1
/// while normalizing. Multiples of 13 land on year 13 and multiples of 299 on
/// cycle 23, never on 0.
pub(crate) const fn split_year(absolute_year: i64) -> (i64, u8, u8) {
    let per_grand = YEARS_PER_GRAND_CYCLE as i64;
    let per_cycle = YEARS_PER_CYCLE as i64;

    let grand_cycle = (absolute_year - 1).div_euclid(per_grand) + 1;
    let offset = (absolute_year - 1).rem_euclid(per_grand);
    let cycle = (offset / per_cycle + 1) as u8;
    let year = (offset % per_cycle + 1) as u8;
    (grand_cycle, cycle, year)
}

/// Length in days of an absolute year.
pub(crate) const fn absolute_year_length(absolute_year: i64) -> u16 {
    let (_, cycle, year) = split_year(absolute_year);
    days_in_year(cycle, year)
}

impl CalendarDate {
    /// Builds a date from an absolute year and day of year.
    ///
    /// # Errors
    /// Returns `FieldError::InvalidAbsoluteYear` for year 0 or a year past the
    /// last grand cycle, and `FieldError::InvalidDayOfYear` if `day` is not in
    /// `1..=days_in_year` for that year.
    pub fn from_absolute(year: u64, day: u16) -> Result<Self, FieldError> {
        let signed = i64::try_from(year)
            .ok()
            .filter(|&y| y >= 1)
            .ok_or(FieldError::InvalidAbsoluteYear(year))?;

        let (grand_cycle, cycle, year_of_cycle) = split_year(signed);
        let grand_cycle = u32::try_from(grand_cycle)
            .map_err(|_| FieldError::InvalidAbsoluteYear(year))
            .and_then(GrandCycle::new)?;

        if day == 0 || day > days_in_year(cycle, year_of_cycle) {
            return Err(FieldError::InvalidDayOfYear(day));
        }

        let cycle = Cycle::new(cycle)?;
        let year_of_cycle = Year::new(year_of_cycle)?;
        let long_month = u16::from(DAYS_IN_LONG_MONTH);
        // day <= 313, so both casts are lossless
        let month = Month::new((1 + (day - 1) / long_month) as u8)?;
        let day = Day::new(((day - 1) % long_month + 1) as u8, cycle, year_of_cycle, month)?;

        Ok(Self::from_parts(grand_cycle, cycle, year_of_cycle, month, day))
    }

    /// Projects this date onto its absolute year and day of year.
    pub const fn to_absolute(&self) -> AbsoluteDate {
        let year = YEARS_PER_GRAND_CYCLE * (self.grand_cycle() as u64 - 1)
            + YEARS_PER_CYCLE as u64 * (self.cycle() as u64 - 1)
            + self.year() as u64;
        let day = DAYS_IN_LONG_MONTH as u16 * (self.month() as u16 - 1) + self.day() as u16;
        AbsoluteDate { year, day }
    }

    /// The absolute year (`%Y`)
    pub const fn absolute_year(&self) -> u64 {
        self.to_absolute().year
    }

    /// The day of the year (`%j`)
    pub const fn day_of_year(&self) -> u16 {
        self.to_absolute().day
    }
}

impl From<CalendarDate> for AbsoluteDate {
    fn from(date: CalendarDate) -> Self {
        date.to_absolute()
    }
}

impl TryFrom<AbsoluteDate> for CalendarDate {
    type Error = FieldError;

    fn try_from(value: AbsoluteDate) -> Result<Self, Self::Error> {
        Self::from_absolute(value.year, value.day)
    }
}
