//! Error types for the cleressian_date crate.

use std::fmt;

use crate::consts::{CYCLES_PER_GRAND_CYCLE, DAYS_IN_LEAP_YEAR, MONTHS_PER_YEAR, YEARS_PER_CYCLE};

/// A quantity that can be read from or written into a date.
///
/// The first five are the stored fields of a
/// [`CalendarDate`](crate::CalendarDate); the last two are derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    GrandCycle,
    Cycle,
    Year,
    Month,
    Day,
    DayOfYear,
    AbsoluteYear,
}

impl Field {
    /// Name used in messages and diagnostics
    pub const fn name(self) -> &'static str {
        match self {
            Self::GrandCycle => "grand cycle",
            Self::Cycle => "cycle",
            Self::Year => "year",
            Self::Month => "month",
            Self::Day => "day",
            Self::DayOfYear => "day of year",
            Self::AbsoluteYear => "absolute year",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A field value that cannot be part of a valid date.
///
/// Construction is all-or-nothing: a value is never clamped into range.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    #[error("invalid grand cycle: {0} (must be at least 1)")]
    InvalidGrandCycle(u32),

    #[error("invalid cycle: {0} (must be 1-{max})", max = CYCLES_PER_GRAND_CYCLE)]
    InvalidCycle(u8),

    #[error("invalid year: {0} (must be 1-{max})", max = YEARS_PER_CYCLE)]
    InvalidYear(u8),

    #[error("invalid month: {0} (must be 1-{max})", max = MONTHS_PER_YEAR)]
    InvalidMonth(u8),

    #[error("invalid month name: {0:?}")]
    UnknownMonthName(String),

    /// The upper bound depends on the cycle, year and month.
    #[error("invalid day {day} for {cycle}:{year} month {month} (must be 1-{max})")]
    InvalidDay {
        cycle: u8,
        year:  u8,
        month: u8,
        day:   u8,
        max:   u8,
    },

    #[error("invalid day of year: {0} (must be 1-{max} depending on the year)", max = DAYS_IN_LEAP_YEAR)]
    InvalidDayOfYear(u16),

    #[error("invalid absolute year: {0}")]
    InvalidAbsoluteYear(u64),

    /// A value does not even fit the field's integer type.
    #[error("{field} value {digits} is too large")]
    Overflow { field: Field, digits: String },
}

/// Error type for all fallible operations in the cleressian_date crate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CalendarError {
    /// A constructed, replaced or parsed date violates a field invariant.
    #[error(transparent)]
    InvalidField(#[from] FieldError),

    /// Text given to `parse` does not match the template.
    #[error("date text {input:?} does not match template {template:?}")]
    FormatMismatch { input: String, template: String },

    /// Arithmetic left the representable range (before 1:1:1 or past the
    /// last grand cycle).
    #[error("adding {years} years and {days} days leaves the calendar range")]
    OutOfRange { years: i64, days: i64 },

    #[error("invalid template {template:?}: {reason}")]
    InvalidTemplate { template: String, reason: String },
}

impl CalendarError {
    pub(crate) fn mismatch(input: &str, template: &str) -> Self {
        Self::FormatMismatch {
            input:    input.to_owned(),
            template: template.to_owned(),
        }
    }
}
