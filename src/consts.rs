/// Number of cycles in one grand cycle
pub const CYCLES_PER_GRAND_CYCLE: u8 = 23;

/// Number of years in one cycle
pub const YEARS_PER_CYCLE: u8 = 13;

/// Number of years in one grand cycle (23 cycles of 13 years)
pub const YEARS_PER_GRAND_CYCLE: u64 = CYCLES_PER_GRAND_CYCLE as u64 * YEARS_PER_CYCLE as u64;

/// Number of months in every year
pub const MONTHS_PER_YEAR: u8 = 10;

/// The intercalary month, the only one whose length varies
pub const INTERCALARY_MONTH: u8 = 10;

/// Days in each of the nine regular months
pub const DAYS_IN_LONG_MONTH: u8 = 34;

/// Days in the intercalary month of a common year
pub const DAYS_IN_SHORT_MONTH: u8 = 6;

/// Days in a common year
pub const DAYS_IN_YEAR: u16 = 9 * DAYS_IN_LONG_MONTH as u16 + DAYS_IN_SHORT_MONTH as u16;

/// Days in a leap year
pub const DAYS_IN_LEAP_YEAR: u16 = DAYS_IN_YEAR + 1;

/// Every third year of a cycle is a leap year
pub(crate) const LEAP_YEAR_STRIDE: u8 = 3;

/// Leap years in one grand cycle: four per cycle, plus 23:13
pub(crate) const LEAP_YEARS_PER_GRAND_CYCLE: u64 =
    (YEARS_PER_CYCLE / LEAP_YEAR_STRIDE) as u64 * CYCLES_PER_GRAND_CYCLE as u64 + 1;

/// Days in one grand cycle. Any run of 299 consecutive years has this length.
pub const DAYS_PER_GRAND_CYCLE: u64 = YEARS_PER_GRAND_CYCLE * DAYS_IN_YEAR as u64 + LEAP_YEARS_PER_GRAND_CYCLE;

/// Lowest value of every structured field
pub const MIN_FIELD: u8 = 1;

/// Month names (index 0 is unused, months are 1-indexed)
pub const MONTH_NAMES: [&str; 11] = [
    "", // index 0 unused (months are 1-indexed)
    "Sirelle",
    "Tiri",
    "Enna",
    "Fis",
    "Klesni",
    "Pelio",
    "Kria",
    "Sui",
    "Brilia",
    "Neyu",
];

/// Length of an abbreviated month name (`%b`)
pub const MONTH_ABBREV_LEN: usize = 3;

/// Standard date representation, what `%x` expands to
pub const STANDARD_TEMPLATE: &str = "%g:%c:%y %B %d";

/// Absolute date representation, what `%X` expands to
pub const ABSOLUTE_TEMPLATE: &str = "%04Y.%03j";

/// Template used by `Display`, `FromStr` and serde
pub const DEFAULT_TEMPLATE: &str = "%x";
