// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Date and date-time value parsers.
//!
//! The compact forms are fixed-width digit runs (`YYYYMMDD`, `HHMMSS`);
//! the parsers read the runs whole and validate the result against the
//! calendar instead of spelling out per-digit ranges.

use chumsky::Parser;
use chumsky::extra::ParserExtra;
use chumsky::label::LabelError;
use chumsky::prelude::*;

use crate::value::digits::{ValueExpected, fixed_uint};

/// Calendar date carried by the wire formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValueDate {
    /// Four-digit year.
    pub year: i16,

    /// Month of the year, 1-12.
    pub month: i8,

    /// Day of the month, 1-31.
    pub day: i8,
}

impl ValueDate {
    /// Convert to `jiff::civil::Date`. Values built by the parsers always
    /// name a real date.
    #[must_use]
    pub fn civil_date(self) -> jiff::civil::Date {
        jiff::civil::date(self.year, self.month, self.day)
    }
}

impl From<jiff::civil::Date> for ValueDate {
    fn from(date: jiff::civil::Date) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
            day: date.day(),
        }
    }
}

/// Compact date, `YYYYMMDD`: eight digits, no separators. The whole value
/// is checked against the calendar, so `20100230` is rejected along with
/// out-of-range months and days.
pub fn value_date<'src, I, E>() -> impl Parser<'src, I, ValueDate, E>
where
    I: Input<'src, Token = char, Span = SimpleSpan> + chumsky::input::ValueInput<'src>,
    E: ParserExtra<'src, I>,
    E::Error: LabelError<'src, I, ValueExpected>,
{
    fixed_uint(4)
        .then(fixed_uint(2))
        .then(fixed_uint(2))
        .try_map(|((year, month), day), span| {
            let (year, month, day) = (year as i16, month as i8, day as i8);
            match jiff::civil::Date::new(year, month, day) {
                Ok(_) => Ok(ValueDate { year, month, day }),
                Err(_) => Err(E::Error::expected_found([ValueExpected::Date], None, span)),
            }
        })
}

/// Wall-clock time carried by the wire formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValueTime {
    /// Hour component, 0-23.
    pub hour: i8,
    /// Minute component, 0-59.
    pub minute: i8,
    /// Second component, 0-59.
    pub second: i8,
    /// Whether the time is in UTC (indicated by a trailing 'Z').
    pub utc: bool,
    /// Cached parsed civil time
    jiff: jiff::civil::Time,
}

impl ValueTime {
    /// Create a new `ValueTime` from components.
    ///
    /// # Errors
    /// If hour, minute, or second are out of valid ranges.
    pub fn new(hour: i8, minute: i8, second: i8, utc: bool) -> Result<Self, jiff::Error> {
        let jiff = jiff::civil::Time::new(hour, minute, second, 0)?;
        Ok(Self {
            hour,
            minute,
            second,
            utc,
            jiff,
        })
    }

    /// The midnight time value.
    #[must_use]
    pub fn midnight() -> Self {
        Self {
            hour: 0,
            minute: 0,
            second: 0,
            utc: false,
            jiff: jiff::civil::Time::midnight(),
        }
    }

    /// Get the cached `jiff::civil::Time`.
    #[must_use]
    pub const fn civil_time(&self) -> jiff::civil::Time {
        self.jiff
    }
}

impl From<jiff::civil::Time> for ValueTime {
    fn from(t: jiff::civil::Time) -> Self {
        Self {
            hour: t.hour(),
            minute: t.minute(),
            second: t.second(),
            utc: false,
            jiff: t,
        }
    }
}

/// Compact time, `HHMMSS` with an optional trailing `Z`: three two-digit
/// runs validated as a wall-clock time.
pub fn value_time<'src, I, E>() -> impl Parser<'src, I, ValueTime, E>
where
    I: Input<'src, Token = char, Span = SimpleSpan> + chumsky::input::ValueInput<'src>,
    E: ParserExtra<'src, I>,
    E::Error: LabelError<'src, I, ValueExpected>,
{
    fixed_uint(2)
        .then(fixed_uint(2))
        .then(fixed_uint(2))
        .then(just('Z').or_not())
        .try_map(|(((hour, minute), second), utc), span| {
            ValueTime::new(hour as i8, minute as i8, second as i8, utc.is_some())
                .map_err(|_| E::Error::expected_found([ValueExpected::Time], None, span))
        })
}

/// Date-time value in the compact `YYYYMMDDTHHMMSS[Z]` form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValueDateTime {
    /// Date component.
    pub date: ValueDate,

    /// Time component.
    pub time: ValueTime,
}

impl ValueDateTime {
    /// Create a new `ValueDateTime` from date and time components.
    #[must_use]
    pub fn new(date: ValueDate, time: ValueTime) -> Self {
        Self { date, time }
    }

    /// Convert to `jiff::civil::DateTime`.
    #[must_use]
    pub fn civil_date_time(&self) -> jiff::civil::DateTime {
        jiff::civil::DateTime::from_parts(self.date.civil_date(), self.time.civil_time())
    }
}

impl From<jiff::civil::DateTime> for ValueDateTime {
    fn from(dt: jiff::civil::DateTime) -> Self {
        Self {
            date: dt.date().into(),
            time: dt.time().into(),
        }
    }
}

/// Compact date-time: a date and a time joined by `T`.
pub fn value_date_time<'src, I, E>() -> impl Parser<'src, I, ValueDateTime, E>
where
    I: Input<'src, Token = char, Span = SimpleSpan> + chumsky::input::ValueInput<'src>,
    E: ParserExtra<'src, I>,
    E::Error: LabelError<'src, I, ValueExpected>,
{
    value_date()
        .then_ignore(just('T'))
        .then(value_time())
        .map(|(date, time)| ValueDateTime::new(date, time))
}

/// End-date value: a date with an optional time part, defaulting to
/// midnight.
pub fn value_end_date<'src, I, E>() -> impl Parser<'src, I, ValueDateTime, E>
where
    I: Input<'src, Token = char, Span = SimpleSpan> + chumsky::input::ValueInput<'src>,
    E: ParserExtra<'src, I>,
    E::Error: LabelError<'src, I, ValueExpected>,
{
    value_date()
        .then(just('T').ignore_then(value_time()).or_not())
        .map(|(date, time)| ValueDateTime::new(date, time.unwrap_or_else(ValueTime::midnight)))
}
