//! strftime/strptime-style templates.
//!
//! | Code  | Meaning                                  |
//! |-------|------------------------------------------|
//! | `%g`  | grand cycle                              |
//! | `%c`  | cycle (1-23)                             |
//! | `%y`  | year of cycle (1-13)                     |
//! | `%m`  | month number (1-10)                      |
//! | `%d`  | day of month                             |
//! | `%j`  | day of year (1-313)                      |
//! | `%Y`  | absolute year                            |
//! | `%b`  | abbreviated month name (`Sir`)           |
//! | `%B`  | full month name (`Sirelle`)              |
//! | `%x`  | shorthand for `%g:%c:%y %B %d`           |
//! | `%X`  | shorthand for `%04Y.%03j`                |
//! | `%%`  | a literal `%`                            |
//!
//! Numeric codes take an optional zero-padded width, `%0<N><code>`. When
//! formatting, the width only ever adds leading zeros. When parsing, it is the
//! minimum number of digits. Any other `%` sequence is literal text.

use std::fmt::{self, Write};

use regex::{Captures, Regex};
use tracing::{debug, warn};

use crate::consts::{ABSOLUTE_TEMPLATE, DEFAULT_TEMPLATE, STANDARD_TEMPLATE};
use crate::error::{CalendarError, Field, FieldError};
use crate::types::Month;
use crate::{CalendarDate, DateFields};

/// A numeric format code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Numeric {
    GrandCycle,
    Cycle,
    Year,
    Month,
    Day,
    DayOfYear,
    AbsoluteYear,
}

impl Numeric {
    const fn from_code(code: char) -> Option<Self> {
        match code {
            'g' => Some(Self::GrandCycle),
            'c' => Some(Self::Cycle),
            'y' => Some(Self::Year),
            'm' => Some(Self::Month),
            'd' => Some(Self::Day),
            'j' => Some(Self::DayOfYear),
            'Y' => Some(Self::AbsoluteYear),
            _ => None,
        }
    }

    const fn field(self) -> Field {
        match self {
            Self::GrandCycle => Field::GrandCycle,
            Self::Cycle => Field::Cycle,
            Self::Year => Field::Year,
            Self::Month => Field::Month,
            Self::Day => Field::Day,
            Self::DayOfYear => Field::DayOfYear,
            Self::AbsoluteYear => Field::AbsoluteYear,
        }
    }

    fn value(self, date: &CalendarDate) -> u64 {
        match self {
            Self::GrandCycle => u64::from(date.grand_cycle()),
            Self::Cycle => u64::from(date.cycle()),
            Self::Year => u64::from(date.year()),
            Self::Month => u64::from(date.month()),
            Self::Day => u64::from(date.day()),
            Self::DayOfYear => u64::from(date.day_of_year()),
            Self::AbsoluteYear => date.absolute_year(),
        }
    }
}

/// One element of a tokenized template
#[derive(Debug, Clone, PartialEq, Eq)]
enum Piece {
    Literal(String),
    Number { code: Numeric, width: u16 },
    MonthAbbrev,
    MonthName,
}

/// What a capture group of the grammar decodes into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Number(Numeric),
    MonthAbbrev,
    MonthName,
}

/// A compiled format template.
///
/// Compiling tokenizes the template once and builds the anchored grammar used
/// for parsing, so a `Template` is the thing to keep around when the same
/// template is used repeatedly.
#[derive(Debug, Clone)]
pub struct Template {
    source:  String,
    pieces:  Vec<Piece>,
    grammar: Regex,
    slots:   Vec<Slot>,
}

impl Template {
    /// Compiles `template`.
    ///
    /// # Errors
    /// Returns `CalendarError::InvalidTemplate` if a width is above
    /// `u16::MAX` or the resulting grammar is too large to compile.
    pub fn new(template: &str) -> Result<Self, CalendarError> {
        let pieces = tokenize(template)?;
        let (pattern, slots) = grammar(&pieces);
        let grammar = Regex::new(&pattern).map_err(|err| CalendarError::InvalidTemplate {
            template: template.to_owned(),
            reason:   err.to_string(),
        })?;
        debug!(template, %pattern, "compiled date template");

        Ok(Self {
            source: template.to_owned(),
            pieces,
            grammar,
            slots,
        })
    }

    /// The template text this was compiled from
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Renders `date` with this template.
    pub fn format(&self, date: &CalendarDate) -> String {
        render_string(&self.pieces, date)
    }

    /// Parses `text`, which must match the whole template.
    ///
    /// Fields are resolved in this order: `%Y` sets the grand cycle, cycle and
    /// year; `%j` sets the month and day (within the `%Y` year, or year 1);
    /// then each individually captured field overrides what came before. An
    /// override that changes an already-set value is logged as a warning and
    /// wins. Fields never captured default to 1.
    ///
    /// # Errors
    /// Returns `CalendarError::FormatMismatch` if the text does not match and
    /// `CalendarError::InvalidField` if the captured fields do not form a
    /// valid date.
    pub fn parse(&self, text: &str) -> Result<CalendarDate, CalendarError> {
        let captures = self
            .grammar
            .captures(text)
            .ok_or_else(|| CalendarError::mismatch(text, &self.source))?;
        let captured = Captured::decode(&self.slots, &captures)?;
        captured.resolve()
    }
}

impl CalendarDate {
    /// Renders this date with a `strftime`-style template.
    ///
    /// # Errors
    /// Returns `CalendarError::InvalidTemplate` if a width is above
    /// `u16::MAX`.
    pub fn format(&self, template: &str) -> Result<String, CalendarError> {
        let pieces = tokenize(template)?;
        Ok(render_string(&pieces, self))
    }

    /// Parses `text` with a `strptime`-style template.
    ///
    /// # Errors
    /// See [`Template::new`] and [`Template::parse`].
    pub fn parse(text: &str, template: &str) -> Result<Self, CalendarError> {
        Template::new(template)?.parse(text)
    }
}

/// Writes the `%x` representation of `date`
pub(crate) fn write_standard(out: &mut impl Write, date: &CalendarDate) -> fmt::Result {
    let pieces = tokenize(DEFAULT_TEMPLATE).map_err(|_| fmt::Error)?;
    render(out, &pieces, date)
}

/// Splits a template into pieces, expanding `%x` and `%X`.
fn tokenize(template: &str) -> Result<Vec<Piece>, CalendarError> {
    let mut pieces = Vec::new();
    let mut literal = String::new();
    let mut rest = template;

    while let Some(pos) = rest.find('%') {
        literal.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];

        let Some((directive, consumed)) = directive(after, template)? else {
            literal.push('%');
            rest = after;
            continue;
        };
        rest = &after[consumed..];

        match directive {
            Directive::Percent => literal.push('%'),
            Directive::Piece(piece) => {
                flush(&mut pieces, &mut literal);
                pieces.push(piece);
            },
            Directive::Expand(shortcut) => {
                flush(&mut pieces, &mut literal);
                pieces.extend(tokenize(shortcut)?);
            },
        }
    }
    literal.push_str(rest);
    flush(&mut pieces, &mut literal);

    Ok(pieces)
}

enum Directive {
    Percent,
    Piece(Piece),
    Expand(&'static str),
}

/// Reads the directive following a `%`, returning it with the number of bytes
/// it spans. `None` means the `%` is literal text.
fn directive(after: &str, template: &str) -> Result<Option<(Directive, usize)>, CalendarError> {
    let mut chars = after.chars();
    let Some(first) = chars.next() else {
        return Ok(None);
    };

    let directive = match first {
        '%' => Directive::Percent,
        'b' => Directive::Piece(Piece::MonthAbbrev),
        'B' => Directive::Piece(Piece::MonthName),
        'x' => Directive::Expand(STANDARD_TEMPLATE),
        'X' => Directive::Expand(ABSOLUTE_TEMPLATE),
        '0' => {
            let digits = after[1..].bytes().take_while(u8::is_ascii_digit).count();
            let code = after[1 + digits..].chars().next().and_then(Numeric::from_code);
            return match code {
                Some(code) if digits > 0 => {
                    let width = after[1..=digits].parse().map_err(|_| CalendarError::InvalidTemplate {
                        template: template.to_owned(),
                        reason:   format!("width {} is larger than {}", &after[1..=digits], u16::MAX),
                    })?;
                    Ok(Some((Directive::Piece(Piece::Number { code, width }), digits + 2)))
                },
                _ => Ok(None),
            };
        },
        other => match Numeric::from_code(other) {
            Some(code) => Directive::Piece(Piece::Number { code, width: 1 }),
            None => return Ok(None),
        },
    };

    Ok(Some((directive, first.len_utf8())))
}

fn flush(pieces: &mut Vec<Piece>, literal: &mut String) {
    if !literal.is_empty() {
        pieces.push(Piece::Literal(std::mem::take(literal)));
    }
}

fn render(out: &mut impl Write, pieces: &[Piece], date: &CalendarDate) -> fmt::Result {
    for piece in pieces {
        match piece {
            Piece::Literal(text) => out.write_str(text)?,
            Piece::Number { code, width } => {
                write!(out, "{:0width$}", code.value(date), width = usize::from(*width))?;
            },
            Piece::MonthAbbrev => out.write_str(date.month_typed().abbrev())?,
            Piece::MonthName => out.write_str(date.month_name())?,
        }
    }
    Ok(())
}

fn render_string(pieces: &[Piece], date: &CalendarDate) -> String {
    let mut out = String::new();
    // fmt::Write for String never fails, and widths are bounded by u16
    let _ = render(&mut out, pieces, date);
    out
}

/// Builds the anchored grammar for `pieces`, one capture group per slot.
fn grammar(pieces: &[Piece]) -> (String, Vec<Slot>) {
    let mut pattern = String::from("^");
    let mut slots = Vec::new();

    for piece in pieces {
        match piece {
            Piece::Literal(text) => pattern.push_str(&regex::escape(text)),
            Piece::Number { code, width } => {
                // ASCII digits only; `\d` would also accept other scripts
                let _ = write!(pattern, "([0-9]{{{},}})", (*width).max(1));
                slots.push(Slot::Number(*code));
            },
            Piece::MonthAbbrev => {
                pattern.push_str(&alternation(Month::abbrev));
                slots.push(Slot::MonthAbbrev);
            },
            Piece::MonthName => {
                pattern.push_str(&alternation(Month::name));
                slots.push(Slot::MonthName);
            },
        }
    }
    pattern.push('$');

    (pattern, slots)
}

fn alternation(name: fn(Month) -> &'static str) -> String {
    let names: Vec<_> = Month::ALL.into_iter().map(|month| regex::escape(name(month))).collect();
    format!("({})", names.join("|"))
}

/// Values captured from one successful match, in template order
#[derive(Debug, Default)]
struct Captured {
    absolute_year: Option<u64>,
    day_of_year:   Option<u16>,
    explicit:      Vec<(Field, u32)>,
}

impl Captured {
    fn decode(slots: &[Slot], captures: &Captures<'_>) -> Result<Self, FieldError> {
        let mut captured = Self::default();

        for (index, slot) in slots.iter().enumerate() {
            let Some(text) = captures.get(index + 1).map(|m| m.as_str()) else {
                continue;
            };
            match *slot {
                Slot::Number(Numeric::AbsoluteYear) => {
                    captured.absolute_year = Some(number(Field::AbsoluteYear, text)?);
                },
                Slot::Number(Numeric::DayOfYear) => {
                    captured.day_of_year = Some(number(Field::DayOfYear, text)?);
                },
                Slot::Number(code) => captured.explicit.push((code.field(), number(code.field(), text)?)),
                Slot::MonthAbbrev => {
                    let month = Month::from_abbrev(text)?;
                    captured.explicit.push((Field::Month, u32::from(month.get())));
                },
                Slot::MonthName => {
                    let month = text.parse::<Month>()?;
                    captured.explicit.push((Field::Month, u32::from(month.get())));
                },
            }
        }

        Ok(captured)
    }

    fn resolve(self) -> Result<CalendarDate, CalendarError> {
        let mut fields = DateFields::new();

        if let Some(year) = self.absolute_year {
            let anchor = CalendarDate::from_absolute(year, 1)?;
            fields = fields
                .grand_cycle(anchor.grand_cycle())
                .cycle(anchor.cycle())
                .year(anchor.year());
        }

        if let Some(day) = self.day_of_year {
            let anchor = CalendarDate::from_absolute(self.absolute_year.unwrap_or(1), day)?;
            fields = fields.month(anchor.month()).day(anchor.day());
        }

        for (field, value) in self.explicit {
            match fields.set(field, value) {
                Some(prior) if prior != value => {
                    warn!(field = field.name(), prior, new = value, "parsed field overrides an earlier value");
                },
                _ => {},
            }
        }

        Ok(fields.build()?)
    }
}

/// Decodes an ASCII digit run, rejecting values that overflow `T`.
fn number<T: TryFrom<u64>>(field: Field, digits: &str) -> Result<T, FieldError> {
    digits
        .parse::<u64>()
        .ok()
        .and_then(|value| T::try_from(value).ok())
        .ok_or_else(|| FieldError::Overflow {
            field,
            digits: digits.to_owned(),
        })
}
