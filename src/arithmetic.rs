//! Date arithmetic, ordering and distance, all carried out on the absolute form.

use std::cmp::Ordering;
use std::ops::{Mul, Neg, Sub};

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::absolute::absolute_year_length;
use crate::consts::{DAYS_PER_GRAND_CYCLE, YEARS_PER_GRAND_CYCLE};
use crate::prelude::*;
use crate::{CalendarDate, CalendarError};

/// A span of whole years plus days.
///
/// Years are absolute years, so a delta of one year can be 312 or 313 days
/// depending on where it is applied.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, From, Into,
)]
#[display(fmt = "{years} years, {days} days")]
pub struct DateDelta {
    pub years: i64,
    pub days:  i64,
}

impl DateDelta {
    pub const ZERO: Self = Self::new(0, 0);

    pub const fn new(years: i64, days: i64) -> Self {
        Self { years, days }
    }
}

impl Neg for DateDelta {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.years, -self.days)
    }
}

impl Mul<i64> for DateDelta {
    type Output = Self;

    fn mul(self, rhs: i64) -> Self {
        Self::new(self.years * rhs, self.days * rhs)
    }
}

impl CalendarDate {
    /// Adds `years` absolute years and `days` days.
    ///
    /// Years are added first; the day of year is then carried into following
    /// years (or borrowed from preceding ones) until it fits the length of the
    /// year it lands in. Adding a year to the last day of a leap year therefore
    /// lands on the first day of the year after.
    ///
    /// # Errors
    /// Returns `CalendarError::OutOfRange` if the result falls before 1:1:1 or
    /// past the last representable grand cycle.
    pub fn plus(&self, years: i64, days: i64) -> Result<Self, CalendarError> {
        let out_of_range = || CalendarError::OutOfRange { years, days };
        let start = self.to_absolute();
        let per_grand_year = YEARS_PER_GRAND_CYCLE as i64;
        let per_grand_day = DAYS_PER_GRAND_CYCLE as i64;

        let year = i64::try_from(start.year).map_err(|_| out_of_range())?;
        let year = year.checked_add(years).ok_or_else(out_of_range)?;
        let day = i64::from(start.day).checked_add(days).ok_or_else(out_of_range)?;

        // Any 299 consecutive years hold the same number of days, so whole grand
        // cycles can be moved into the year before carrying one year at a time.
        let grand_cycles = (day - 1).div_euclid(per_grand_day);
        let mut day = (day - 1).rem_euclid(per_grand_day) + 1;
        let mut year = grand_cycles
            .checked_mul(per_grand_year)
            .and_then(|shift| year.checked_add(shift))
            .ok_or_else(out_of_range)?;

        // The carry below moves forward by less than one grand cycle.
        if year <= -per_grand_year {
            return Err(out_of_range());
        }

        loop {
            let length = i64::from(absolute_year_length(year));
            if day <= length {
                break;
            }
            day -= length;
            year = year.checked_add(1).ok_or_else(out_of_range)?;
        }
        trace!(years, days, year, day, "normalized date arithmetic");

        let year = u64::try_from(year).map_err(|_| out_of_range())?;
        let day = u16::try_from(day).map_err(|_| out_of_range())?;
        Self::from_absolute(year, day).map_err(|_| out_of_range())
    }

    /// Subtracts `years` and `days`; the same as `plus(-years, -days)`.
    ///
    /// # Errors
    /// Returns `CalendarError::OutOfRange` under the same conditions as [`CalendarDate::plus`].
    pub fn minus(&self, years: i64, days: i64) -> Result<Self, CalendarError> {
        match (years.checked_neg(), days.checked_neg()) {
            (Some(neg_years), Some(neg_days)) => self.plus(neg_years, neg_days),
            _ => Err(CalendarError::OutOfRange { years, days }),
        }
    }

    /// Applies a delta with [`CalendarDate::plus`].
    ///
    /// # Errors
    /// Returns `CalendarError::OutOfRange` if the result leaves the calendar.
    pub fn checked_add(&self, delta: DateDelta) -> Result<Self, CalendarError> {
        self.plus(delta.years, delta.days)
    }

    /// Applies a delta with [`CalendarDate::minus`].
    ///
    /// # Errors
    /// Returns `CalendarError::OutOfRange` if the result leaves the calendar.
    pub fn checked_sub(&self, delta: DateDelta) -> Result<Self, CalendarError> {
        self.minus(delta.years, delta.days)
    }

    /// Three-way comparison by absolute year, then day of year.
    pub fn compare(a: &Self, b: &Self) -> Ordering {
        a.to_absolute().cmp(&b.to_absolute())
    }

    /// Unsigned distance between two dates, in either order.
    ///
    /// When the later date's day of year is smaller than the earlier one's,
    /// the days borrow a year, counted with the length of the earlier date's
    /// year. The day part is always below the length of a year.
    pub fn distance(a: &Self, b: &Self) -> DateDelta {
        let (earlier, later) = if a <= b { (a, b) } else { (b, a) };
        let (from, to) = (earlier.to_absolute(), later.to_absolute());
        let years = i64::try_from(to.year - from.year).unwrap_or(i64::MAX);

        if from.day <= to.day {
            DateDelta::new(years, i64::from(to.day - from.day))
        } else {
            let days = i64::from(to.day) + i64::from(earlier.days_in_year()) - i64::from(from.day);
            DateDelta::new(years - 1, days)
        }
    }
}

impl PartialOrd for CalendarDate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CalendarDate {
    fn cmp(&self, other: &Self) -> Ordering {
        Self::compare(self, other)
    }
}

impl Sub for CalendarDate {
    type Output = DateDelta;

    /// Signed distance: positive when `self` is the later date
    fn sub(self, rhs: Self) -> DateDelta {
        let distance = Self::distance(&self, &rhs);
        if self < rhs { -distance } else { distance }
    }
}
