// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Recurrence rule value type for the key/value (RFC 5545) format.

use std::fmt::{self, Display};

use chumsky::extra::ParserExtra;
use chumsky::input::Input;
use chumsky::label::LabelError;
use chumsky::prelude::*;
use chumsky::span::SimpleSpan;

use crate::keyword::{
    KW_DAY_FR, KW_DAY_MO, KW_DAY_SA, KW_DAY_SU, KW_DAY_TH, KW_DAY_TU, KW_DAY_WE, KW_RRULE_BYDAY,
    KW_RRULE_BYMONTH, KW_RRULE_BYYEARDAY, KW_RRULE_COUNT, KW_RRULE_FREQ, KW_RRULE_FREQ_DAILY,
    KW_RRULE_FREQ_MONTHLY, KW_RRULE_FREQ_WEEKLY, KW_RRULE_FREQ_YEARLY, KW_RRULE_INTERVAL,
    KW_RRULE_UNTIL,
};
use crate::value::date::{ValueDateTime, value_end_date};
use crate::value::digits::{ValueExpected, ranged_uint, u32_value};

/// Recurrence rule
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecurrenceRuleValue {
    /// Frequency of recurrence
    pub freq: RecurrenceFrequency,
    /// Until date for recurrence
    pub until: Option<ValueDateTime>,
    /// Number of occurrences
    pub count: Option<u32>,
    /// Interval between recurrences
    pub interval: Option<u32>,
    /// Day of week specifier
    pub by_day: Vec<WeekDayNum>,
    /// Day of year specifier
    pub by_year_day: Vec<i16>,
    /// Month specifier
    pub by_month: Vec<u8>,
}

/// Recurrence frequency
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[expect(missing_docs)]
pub enum RecurrenceFrequency {
    #[default]
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl RecurrenceFrequency {
    /// The wire keyword of this frequency.
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            RecurrenceFrequency::Daily => KW_RRULE_FREQ_DAILY,
            RecurrenceFrequency::Weekly => KW_RRULE_FREQ_WEEKLY,
            RecurrenceFrequency::Monthly => KW_RRULE_FREQ_MONTHLY,
            RecurrenceFrequency::Yearly => KW_RRULE_FREQ_YEARLY,
        }
    }

    /// Look a frequency up by its wire keyword.
    #[must_use]
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            KW_RRULE_FREQ_DAILY => Some(RecurrenceFrequency::Daily),
            KW_RRULE_FREQ_WEEKLY => Some(RecurrenceFrequency::Weekly),
            KW_RRULE_FREQ_MONTHLY => Some(RecurrenceFrequency::Monthly),
            KW_RRULE_FREQ_YEARLY => Some(RecurrenceFrequency::Yearly),
            _ => None,
        }
    }
}

impl Display for RecurrenceFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.keyword())
    }
}

/// Day of week with optional occurrence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekDayNum {
    /// Day of the week
    pub day: WeekDay,
    /// Occurrence in month (optional)
    pub occurrence: Option<i8>,
}

/// Day of the week
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[expect(missing_docs)]
pub enum WeekDay {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl WeekDay {
    /// The two-letter wire token of this weekday.
    #[must_use]
    pub const fn token(self) -> &'static str {
        match self {
            WeekDay::Sunday => KW_DAY_SU,
            WeekDay::Monday => KW_DAY_MO,
            WeekDay::Tuesday => KW_DAY_TU,
            WeekDay::Wednesday => KW_DAY_WE,
            WeekDay::Thursday => KW_DAY_TH,
            WeekDay::Friday => KW_DAY_FR,
            WeekDay::Saturday => KW_DAY_SA,
        }
    }

    /// Look a weekday up by its two-letter wire token.
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            KW_DAY_SU => Some(WeekDay::Sunday),
            KW_DAY_MO => Some(WeekDay::Monday),
            KW_DAY_TU => Some(WeekDay::Tuesday),
            KW_DAY_WE => Some(WeekDay::Wednesday),
            KW_DAY_TH => Some(WeekDay::Thursday),
            KW_DAY_FR => Some(WeekDay::Friday),
            KW_DAY_SA => Some(WeekDay::Saturday),
            _ => None,
        }
    }
}

impl Display for WeekDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token())
    }
}

impl From<WeekDay> for jiff::civil::Weekday {
    fn from(day: WeekDay) -> Self {
        match day {
            WeekDay::Sunday => jiff::civil::Weekday::Sunday,
            WeekDay::Monday => jiff::civil::Weekday::Monday,
            WeekDay::Tuesday => jiff::civil::Weekday::Tuesday,
            WeekDay::Wednesday => jiff::civil::Weekday::Wednesday,
            WeekDay::Thursday => jiff::civil::Weekday::Thursday,
            WeekDay::Friday => jiff::civil::Weekday::Friday,
            WeekDay::Saturday => jiff::civil::Weekday::Saturday,
        }
    }
}

impl From<jiff::civil::Weekday> for WeekDay {
    fn from(day: jiff::civil::Weekday) -> Self {
        match day {
            jiff::civil::Weekday::Sunday => WeekDay::Sunday,
            jiff::civil::Weekday::Monday => WeekDay::Monday,
            jiff::civil::Weekday::Tuesday => WeekDay::Tuesday,
            jiff::civil::Weekday::Wednesday => WeekDay::Wednesday,
            jiff::civil::Weekday::Thursday => WeekDay::Thursday,
            jiff::civil::Weekday::Friday => WeekDay::Friday,
            jiff::civil::Weekday::Saturday => WeekDay::Saturday,
        }
    }
}

/// Parse the semicolon-delimited `recur` value (RFC 5545 Section 3.3.10).
///
/// The rule parts may appear in any order; `FREQ` is required.
/// Unrecognized rule parts (e.g. `WKST`, `BYSETPOS`) are consumed and
/// ignored; when a part is repeated, the last occurrence wins.
pub fn value_rrule<'src, I, E>() -> impl Parser<'src, I, RecurrenceRuleValue, E>
where
    I: Input<'src, Token = char, Span = SimpleSpan> + chumsky::input::ValueInput<'src>,
    E: ParserExtra<'src, I>,
    E::Error: LabelError<'src, I, ValueExpected>,
{
    recur_rrule_part()
        .separated_by(just(';'))
        .at_least(1)
        .collect()
        .try_map(build_from_parts::<I, E::Error>)
}

fn build_from_parts<'src, I, Err>(
    parts: Vec<Part>,
    span: I::Span,
) -> Result<RecurrenceRuleValue, Err>
where
    I: Input<'src, Token = char, Span = SimpleSpan> + chumsky::input::ValueInput<'src>,
    Err: LabelError<'src, I, ValueExpected>,
{
    let mut freq = None;
    let mut until = None;
    let mut count = None;
    let mut interval = None;
    let mut by_day = Vec::new();
    let mut by_year_day = Vec::new();
    let mut by_month = Vec::new();

    for part in parts {
        match part {
            Part::Freq(f) => freq = Some(f),
            Part::Until(u) => until = Some(u),
            Part::Count(c) => count = Some(c),
            Part::Interval(i) => interval = Some(i),
            Part::ByDay(v) => by_day = v,
            Part::ByYearDay(v) => by_year_day = v,
            Part::ByMonth(v) => by_month = v,
            Part::Unrecognized => {}
        }
    }

    // Validate required FREQ
    let freq =
        freq.ok_or_else(|| Err::expected_found([ValueExpected::RRuleRequiredFreq], None, span))?;

    Ok(RecurrenceRuleValue {
        freq,
        until,
        count,
        interval,
        by_day,
        by_year_day,
        by_month,
    })
}

#[derive(Debug, Clone)]
enum Part {
    Freq(RecurrenceFrequency),
    Until(ValueDateTime),
    Count(u32),
    Interval(u32),
    ByDay(Vec<WeekDayNum>),
    ByYearDay(Vec<i16>),
    ByMonth(Vec<u8>),
    Unrecognized,
}

/// A single `KEY=value` rule part. Known keys get their value grammar; a
/// part that matches no known key — or whose value fails its range check —
/// falls through to the ignored arm, which swallows the segment.
fn recur_rrule_part<'src, I, E>() -> impl Parser<'src, I, Part, E>
where
    I: Input<'src, Token = char, Span = SimpleSpan> + chumsky::input::ValueInput<'src>,
    E: ParserExtra<'src, I>,
    E::Error: LabelError<'src, I, ValueExpected>,
{
    let kw = |kw| just(kw).ignore_then(just('='));

    let freq = kw(KW_RRULE_FREQ).ignore_then(freq()).map(Part::Freq);

    // UNTIL can be a date or date-time
    let until = kw(KW_RRULE_UNTIL)
        .ignore_then(value_end_date())
        .map(Part::Until);

    let count = kw(KW_RRULE_COUNT)
        .ignore_then(u32_positive())
        .map(Part::Count);

    let interval = kw(KW_RRULE_INTERVAL)
        .ignore_then(u32_positive())
        .map(Part::Interval);

    let by_day = kw(KW_RRULE_BYDAY)
        .ignore_then(weekdaynum().separated_by(just(',')).at_least(1).collect())
        .map(Part::ByDay);

    let by_year_day = kw(KW_RRULE_BYYEARDAY)
        .ignore_then(yeardaynum().separated_by(just(',')).at_least(1).collect())
        .map(Part::ByYearDay);

    let by_month = kw(KW_RRULE_BYMONTH)
        .ignore_then(monthnum().separated_by(just(',')).at_least(1).collect())
        .map(Part::ByMonth);

    // Anything else up to the next ';' is ignored
    let unrecognized = any()
        .filter(|c: &char| *c != ';')
        .repeated()
        .at_least(1)
        .ignored()
        .to(Part::Unrecognized);

    choice((
        freq,
        until,
        count,
        interval,
        by_day,
        by_year_day,
        by_month,
        unrecognized,
    ))
}

/// One of the four supported frequency keywords.
fn freq<'src, I, E>() -> impl Parser<'src, I, RecurrenceFrequency, E>
where
    I: Input<'src, Token = char, Span = SimpleSpan> + chumsky::input::ValueInput<'src>,
    E: ParserExtra<'src, I>,
    E::Error: LabelError<'src, I, ValueExpected>,
{
    any()
        .filter(char::is_ascii_uppercase)
        .repeated()
        .at_least(1)
        .at_most(8)
        .collect::<String>()
        .try_map(|word, span| {
            RecurrenceFrequency::from_keyword(&word)
                .ok_or_else(|| E::Error::expected_found([ValueExpected::Frequency], None, span))
        })
}

/// A `BYDAY` entry: a weekday token behind an optional signed ordinal
/// (1-53, two digits at most).
fn weekdaynum<'src, I, E>() -> impl Parser<'src, I, WeekDayNum, E>
where
    I: Input<'src, Token = char, Span = SimpleSpan> + chumsky::input::ValueInput<'src>,
    E: ParserExtra<'src, I>,
    E::Error: LabelError<'src, I, ValueExpected>,
{
    sign()
        .then(ranged_uint(2, 1..=53))
        .map(|(sign, ordinal)| (sign * ordinal as i32) as i8)
        .or_not()
        .then(weekday())
        .map(|(occurrence, day)| WeekDayNum { day, occurrence })
}

/// A `BYYEARDAY` entry: a signed day-of-year ordinal, 1-366.
fn yeardaynum<'src, I, E>() -> impl Parser<'src, I, i16, E>
where
    I: Input<'src, Token = char, Span = SimpleSpan> + chumsky::input::ValueInput<'src>,
    E: ParserExtra<'src, I>,
    E::Error: LabelError<'src, I, ValueExpected>,
{
    sign()
        .then(ranged_uint(3, 1..=366))
        .map(|(sign, day)| (sign * day as i32) as i16)
}

/// A `BYMONTH` entry: a month number, 1-12.
fn monthnum<'src, I, E>() -> impl Parser<'src, I, u8, E>
where
    I: Input<'src, Token = char, Span = SimpleSpan> + chumsky::input::ValueInput<'src>,
    E: ParserExtra<'src, I>,
    E::Error: LabelError<'src, I, ValueExpected>,
{
    ranged_uint(2, 1..=12).map(|month| month as u8)
}

/// A leading `+` or `-`, read as a multiplier. Defaults to positive.
fn sign<'src, I, E>() -> impl Parser<'src, I, i32, E> + Copy
where
    I: Input<'src, Token = char, Span = SimpleSpan> + chumsky::input::ValueInput<'src>,
    E: ParserExtra<'src, I>,
{
    choice((just('+').to(1), just('-').to(-1)))
        .or_not()
        .map(|sign| sign.unwrap_or(1))
}

/// A positive integer: any `u32` except zero.
fn u32_positive<'src, I, E>() -> impl Parser<'src, I, u32, E>
where
    I: Input<'src, Token = char, Span = SimpleSpan> + chumsky::input::ValueInput<'src>,
    E: ParserExtra<'src, I>,
    E::Error: LabelError<'src, I, ValueExpected>,
{
    u32_value().try_map(|value, span| match value {
        0 => Err(E::Error::expected_found(
            [ValueExpected::PositiveU32],
            None,
            span,
        )),
        value => Ok(value),
    })
}

/// A two-letter weekday token, resolved through the token table.
pub(crate) fn weekday<'src, I, E>() -> impl Parser<'src, I, WeekDay, E>
where
    I: Input<'src, Token = char, Span = SimpleSpan> + chumsky::input::ValueInput<'src>,
    E: ParserExtra<'src, I>,
    E::Error: LabelError<'src, I, ValueExpected>,
{
    any()
        .repeated()
        .exactly(2)
        .collect::<String>()
        .try_map(|token: String, span| {
            WeekDay::from_token(&token)
                .ok_or_else(|| E::Error::expected_found([ValueExpected::Weekday], None, span))
        })
}
