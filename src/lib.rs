//! Dates in the Clerèssian calendar.
//!
//! A date is a grand cycle (unbounded), a cycle (1-23), a year of the cycle
//! (1-13), a month (1-10) and a day. The first nine months have 34 days; the
//! tenth has 6, or 7 in a leap year. Every third year of a cycle is a leap
//! year, and so is the very last year of a grand cycle (23:13).
//!
//! ```
//! use cleressian_date::{CalendarDate, DateFields};
//!
//! let date = CalendarDate::new(1, 1, 1, 10, 6)?;
//! let next = date.plus(0, 1)?;
//! assert_eq!(next.to_string(), "1:1:2 Sirelle 1");
//!
//! let parsed = CalendarDate::parse("0002.001", "%X")?;
//! assert_eq!(parsed, next);
//!
//! let later = next.replace(DateFields::new().month_name("Kria")?)?;
//! assert_eq!(later.format("%b %02d")?, "Kri 01");
//! # Ok::<(), cleressian_date::CalendarError>(())
//! ```

mod absolute;
mod arithmetic;
mod consts;
mod error;
mod format;
mod prelude;
mod types;

#[cfg(test)]
mod test_utils;

pub use absolute::AbsoluteDate;
pub use arithmetic::DateDelta;
pub use consts::*;
pub use error::{CalendarError, Field, FieldError};
pub use format::Template;
pub use types::{Cycle, Day, GrandCycle, Month, Year, days_in_month, days_in_year, is_leap_year};

use std::fmt;
use std::str::FromStr;

/// A validated, immutable Clerèssian date.
///
/// Every value satisfies all field ranges at once, including the day's upper
/// bound, which depends on the cycle, year and month. Operations that change a
/// date return a new one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CalendarDate {
    grand_cycle: GrandCycle,
    cycle:       Cycle,
    year:        Year,
    month:       Month,
    day:         Day,
}

impl CalendarDate {
    /// Creates a date from its five fields, validated in dependency order
    /// (grand cycle, cycle, year, month, then day).
    ///
    /// # Errors
    /// Returns the `FieldError` of the first field that is out of range.
    pub fn new(grand_cycle: u32, cycle: u8, year: u8, month: u8, day: u8) -> Result<Self, FieldError> {
        let grand_cycle = GrandCycle::new(grand_cycle)?;
        let cycle = Cycle::new(cycle)?;
        let year = Year::new(year)?;
        let month = Month::new(month)?;
        let day = Day::new(day, cycle, year, month)?;
        Ok(Self::from_parts(grand_cycle, cycle, year, month, day))
    }

    /// Assembles a date from already-validated parts
    pub(crate) const fn from_parts(grand_cycle: GrandCycle, cycle: Cycle, year: Year, month: Month, day: Day) -> Self {
        Self {
            grand_cycle,
            cycle,
            year,
            month,
            day,
        }
    }

    pub const fn grand_cycle(&self) -> u32 {
        self.grand_cycle.get()
    }

    pub const fn cycle(&self) -> u8 {
        self.cycle.get()
    }

    /// Returns the year within the cycle (1..=13)
    pub const fn year(&self) -> u8 {
        self.year.get()
    }

    /// Returns the month index (1..=10)
    pub const fn month(&self) -> u8 {
        self.month.get()
    }

    pub const fn day(&self) -> u8 {
        self.day.get()
    }

    /// Returns the Month type
    pub const fn month_typed(&self) -> Month {
        self.month
    }

    /// Full name of the month, e.g. "Sirelle"
    pub const fn month_name(&self) -> &'static str {
        self.month.name()
    }

    pub const fn is_leap_year(&self) -> bool {
        is_leap_year(self.cycle(), self.year())
    }

    pub const fn days_in_month(&self) -> u8 {
        days_in_month(self.cycle(), self.year(), self.month())
    }

    pub const fn days_in_year(&self) -> u16 {
        days_in_year(self.cycle(), self.year())
    }

    /// Returns a copy with the fields set in `fields` overridden.
    ///
    /// The result is validated as a fresh construction, so changing only the
    /// month can fail when the day does not exist in the new month.
    ///
    /// # Errors
    /// Returns a `FieldError` if the combined fields do not form a valid date.
    pub fn replace(&self, fields: DateFields) -> Result<Self, FieldError> {
        fields.or(DateFields::from(*self)).build()
    }
}

impl Default for CalendarDate {
    /// 1:1:1 Sirelle 1, the first day of the calendar
    fn default() -> Self {
        Self::from_parts(
            GrandCycle::MIN,
            Cycle::MIN,
            Year::MIN,
            Month::Sirelle,
            Day::MIN,
        )
    }
}

/// Field values for building or replacing a date.
///
/// Unset fields default to 1 when building and are taken from the original
/// date when replacing. Values are range-checked only by [`DateFields::build`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct DateFields {
    grand_cycle: Option<u32>,
    cycle:       Option<u32>,
    year:        Option<u32>,
    month:       Option<u32>,
    day:         Option<u32>,
}

impl DateFields {
    pub const fn new() -> Self {
        Self {
            grand_cycle: None,
            cycle:       None,
            year:        None,
            month:       None,
            day:         None,
        }
    }

    #[must_use]
    pub const fn grand_cycle(mut self, grand_cycle: u32) -> Self {
        self.grand_cycle = Some(grand_cycle);
        self
    }

    #[must_use]
    pub const fn cycle(mut self, cycle: u8) -> Self {
        self.cycle = Some(cycle as u32);
        self
    }

    #[must_use]
    pub const fn year(mut self, year: u8) -> Self {
        self.year = Some(year as u32);
        self
    }

    /// Sets the month index; use [`Month::get`] to pass a [`Month`]
    #[must_use]
    pub const fn month(mut self, month: u8) -> Self {
        self.month = Some(month as u32);
        self
    }

    /// Sets the month from its full name.
    ///
    /// # Errors
    /// Returns `FieldError::UnknownMonthName` unless `name` exactly matches a
    /// month name.
    pub fn month_name(self, name: &str) -> Result<Self, FieldError> {
        name.parse::<Month>().map(|month| self.month(month.get()))
    }

    #[must_use]
    pub const fn day(mut self, day: u8) -> Self {
        self.day = Some(day as u32);
        self
    }

    /// The value set for `field`, if any. Derived fields are never set.
    pub const fn get(&self, field: Field) -> Option<u32> {
        match field {
            Field::GrandCycle => self.grand_cycle,
            Field::Cycle => self.cycle,
            Field::Year => self.year,
            Field::Month => self.month,
            Field::Day => self.day,
            Field::DayOfYear | Field::AbsoluteYear => None,
        }
    }

    /// Sets `field` and returns its previous value. Derived fields are ignored.
    pub(crate) fn set(&mut self, field: Field, value: u32) -> Option<u32> {
        let slot = match field {
            Field::GrandCycle => &mut self.grand_cycle,
            Field::Cycle => &mut self.cycle,
            Field::Year => &mut self.year,
            Field::Month => &mut self.month,
            Field::Day => &mut self.day,
            Field::DayOfYear | Field::AbsoluteYear => return None,
        };
        slot.replace(value)
    }

    /// Fills every unset field from `base`
    #[must_use]
    pub const fn or(self, base: Self) -> Self {
        Self {
            grand_cycle: or_else(self.grand_cycle, base.grand_cycle),
            cycle:       or_else(self.cycle, base.cycle),
            year:        or_else(self.year, base.year),
            month:       or_else(self.month, base.month),
            day:         or_else(self.day, base.day),
        }
    }

    /// Builds a date, defaulting unset fields to 1.
    ///
    /// # Errors
    /// Returns the `FieldError` of the first invalid field, checked in
    /// dependency order.
    pub fn build(self) -> Result<CalendarDate, FieldError> {
        let narrow = |field: Field, value: Option<u32>| -> Result<u8, FieldError> {
            let value = value.unwrap_or(u32::from(MIN_FIELD));
            u8::try_from(value).map_err(|_| FieldError::Overflow {
                field,
                digits: value.to_string(),
            })
        };

        CalendarDate::new(
            self.grand_cycle.unwrap_or(u32::from(MIN_FIELD)),
            narrow(Field::Cycle, self.cycle)?,
            narrow(Field::Year, self.year)?,
            narrow(Field::Month, self.month)?,
            narrow(Field::Day, self.day)?,
        )
    }
}

const fn or_else(value: Option<u32>, fallback: Option<u32>) -> Option<u32> {
    match value {
        Some(value) => Some(value),
        None => fallback,
    }
}

impl From<CalendarDate> for DateFields {
    fn from(date: CalendarDate) -> Self {
        Self::new()
            .grand_cycle(date.grand_cycle())
            .cycle(date.cycle())
            .year(date.year())
            .month(date.month())
            .day(date.day())
    }
}

impl TryFrom<DateFields> for CalendarDate {
    type Error = FieldError;

    fn try_from(fields: DateFields) -> Result<Self, Self::Error> {
        fields.build()
    }
}

impl fmt::Display for CalendarDate {
    /// Renders the standard representation, `%x`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        format::write_standard(f, self)
    }
}

impl FromStr for CalendarDate {
    type Err = CalendarError;

    /// Parses the standard representation, `%x`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s, DEFAULT_TEMPLATE)
    }
}

impl serde::Serialize for CalendarDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for CalendarDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
