use crate::CalendarDate;

/// Builds a date that the test knows to be valid
pub fn date(grand_cycle: u32, cycle: u8, year: u8, month: u8, day: u8) -> CalendarDate {
    CalendarDate::new(grand_cycle, cycle, year, month, day)
        .unwrap_or_else(|err| panic!("{grand_cycle}:{cycle}:{year} {month} {day} is not a valid date: {err}"))
}

/// Builds a date from its absolute form
pub fn absolute(year: u64, day: u16) -> CalendarDate {
    CalendarDate::from_absolute(year, day).unwrap_or_else(|err| panic!("{year}.{day} is not a valid date: {err}"))
}
