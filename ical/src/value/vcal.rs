// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Recurrence rule value type for the line-oriented (vCalendar 1.0) format.

use chumsky::extra::ParserExtra;
use chumsky::input::Input;
use chumsky::label::LabelError;
use chumsky::prelude::*;
use chumsky::span::SimpleSpan;

use crate::keyword::{
    KW_VCAL_DAILY, KW_VCAL_MONTHLY_BY_DAY, KW_VCAL_MONTHLY_BY_POSITION, KW_VCAL_WEEKLY,
    KW_VCAL_YEARLY_BY_DAY, KW_VCAL_YEARLY_BY_MONTH,
};
use crate::value::date::{ValueDateTime, value_end_date};
use crate::value::digits::{ValueExpected, u32_value};
use crate::value::rrule::{WeekDay, weekday};

/// Rule tag of the line-oriented format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VcalTag {
    /// `D` — repeat every N days.
    Daily,
    /// `W` — repeat weekly on selected weekdays.
    Weekly,
    /// `MP` — repeat monthly by ordinal weekday position.
    MonthlyByPosition,
    /// `MD` — repeat monthly by day of month.
    MonthlyByDay,
    /// `YM` — repeat yearly by month and day.
    YearlyByMonth,
    /// `YD` — repeat yearly by day of year.
    YearlyByDay,
}

impl VcalTag {
    /// The wire token of this tag.
    #[must_use]
    pub const fn token(self) -> &'static str {
        match self {
            VcalTag::Daily => KW_VCAL_DAILY,
            VcalTag::Weekly => KW_VCAL_WEEKLY,
            VcalTag::MonthlyByPosition => KW_VCAL_MONTHLY_BY_POSITION,
            VcalTag::MonthlyByDay => KW_VCAL_MONTHLY_BY_DAY,
            VcalTag::YearlyByMonth => KW_VCAL_YEARLY_BY_MONTH,
            VcalTag::YearlyByDay => KW_VCAL_YEARLY_BY_DAY,
        }
    }
}

/// How the series ends: after a number of occurrences or at an end date.
///
/// `Count(0)` means the series is unbounded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VcalTerminator {
    /// `#N` terminator.
    Count(u32),
    /// `YYYYMMDD[THHMMSS]` terminator.
    Until(ValueDateTime),
}

/// A parsed recurrence rule line.
///
/// The parser only captures the pieces the engine consumes: weekday tokens
/// for `W` rules and the terminator. Other modifiers (ordinal positions,
/// day numbers) are skipped on input — the event anchor already carries
/// them — but can be set for emission.
#[derive(Debug, Clone, PartialEq)]
pub struct VcalRule {
    /// Rule tag.
    pub tag: VcalTag,
    /// Repeat interval in the tag's unit. Defaults to 1.
    pub interval: u32,
    /// Selected weekdays (`W` rules).
    pub weekdays: Vec<WeekDay>,
    /// Ordinal weekday position (`MP` rules, emission only).
    pub position: Option<(u8, WeekDay)>,
    /// Numeric modifier (`MD`/`YM`/`YD` rules, emission only).
    pub day_number: Option<i16>,
    /// Series terminator.
    pub terminator: VcalTerminator,
}

/// Format Definition:
///
/// ```txt
/// vcal-rule   = tag [interval] *modifier SP terminator
/// tag         = "D" / "W" / "MP" / "MD" / "YM" / "YD"
/// interval    = 1*DIGIT
/// modifier    = weekday / junk       ; weekday tokens only honored for "W"
/// terminator  = "#" 1*DIGIT / enddate
/// ```
///
/// Modifier characters that are not weekday tokens are consumed one at a
/// time until the terminator is found. A missing terminator is read as
/// `#0` (unbounded).
pub fn value_vcal_rule<'src, I, E>() -> impl Parser<'src, I, VcalRule, E>
where
    I: Input<'src, Token = char, Span = SimpleSpan> + chumsky::input::ValueInput<'src>,
    E: ParserExtra<'src, I>,
    E::Error: LabelError<'src, I, ValueExpected>,
{
    let tag = choice((
        just(KW_VCAL_MONTHLY_BY_POSITION).to(VcalTag::MonthlyByPosition),
        just(KW_VCAL_MONTHLY_BY_DAY).to(VcalTag::MonthlyByDay),
        just(KW_VCAL_YEARLY_BY_MONTH).to(VcalTag::YearlyByMonth),
        just(KW_VCAL_YEARLY_BY_DAY).to(VcalTag::YearlyByDay),
        just(KW_VCAL_DAILY).to(VcalTag::Daily),
        just(KW_VCAL_WEEKLY).to(VcalTag::Weekly),
    ));

    let space = just(' ').repeated();
    let weekdays = space
        .ignore_then(weekday())
        .then_ignore(space)
        .repeated()
        .collect::<Vec<_>>();

    let terminator = || {
        choice((
            just('#').ignore_then(u32_value()).map(VcalTerminator::Count),
            value_end_date().map(VcalTerminator::Until),
        ))
    };

    // Skip modifier characters until a terminator shows up
    let tail = any().and_is(terminator().not()).repeated();

    tag.then(u32_value().or_not())
        .then(weekdays)
        .then_ignore(tail)
        .then(terminator().or_not())
        .then_ignore(just(' ').repeated())
        .map(|(((tag, interval), weekdays), terminator)| VcalRule {
            tag,
            interval: interval.unwrap_or(1),
            weekdays,
            position: None,
            day_number: None,
            terminator: terminator.unwrap_or(VcalTerminator::Count(0)),
        })
}

#[cfg(test)]
mod tests {
    use chumsky::extra;
    use chumsky::input::Stream;

    use super::*;

    fn parse(src: &'_ str) -> Result<VcalRule, Vec<Rich<'_, char>>> {
        let stream = Stream::from_iter(src.chars());
        value_vcal_rule::<'_, _, extra::Err<_>>()
            .parse(stream)
            .into_result()
    }

    #[test]
    fn parses_daily_with_count() {
        let rule = parse("D2 #5").unwrap();
        assert_eq!(rule.tag, VcalTag::Daily);
        assert_eq!(rule.interval, 2);
        assert_eq!(rule.terminator, VcalTerminator::Count(5));
    }

    #[test]
    fn parses_interval_default() {
        let rule = parse("D #0").unwrap();
        assert_eq!(rule.interval, 1);
        assert_eq!(rule.terminator, VcalTerminator::Count(0));
    }

    #[test]
    fn parses_weekly_with_weekdays_and_until() {
        let rule = parse("W2 MO TH 20090701T000000").unwrap();
        assert_eq!(rule.tag, VcalTag::Weekly);
        assert_eq!(rule.interval, 2);
        assert_eq!(rule.weekdays, vec![WeekDay::Monday, WeekDay::Thursday]);

        let VcalTerminator::Until(until) = rule.terminator else {
            panic!("expected until terminator");
        };
        assert_eq!(until.date.year, 2009);
        assert_eq!(until.date.month, 7);
        assert_eq!(until.date.day, 1);
    }

    #[test]
    fn parses_weekly_without_weekdays() {
        let rule = parse("W1 #10").unwrap();
        assert!(rule.weekdays.is_empty());
        assert_eq!(rule.terminator, VcalTerminator::Count(10));
    }

    #[test]
    fn skips_unrecognized_modifiers() {
        let rule = parse("MP1 1+ MO #10").unwrap();
        assert_eq!(rule.tag, VcalTag::MonthlyByPosition);
        assert_eq!(rule.interval, 1);
        assert_eq!(rule.terminator, VcalTerminator::Count(10));

        let rule = parse("MD1 31 #0").unwrap();
        assert_eq!(rule.tag, VcalTag::MonthlyByDay);
        assert_eq!(rule.terminator, VcalTerminator::Count(0));

        let rule = parse("YD3 100 20251231").unwrap();
        assert_eq!(rule.tag, VcalTag::YearlyByDay);
        assert_eq!(rule.interval, 3);
        assert!(matches!(rule.terminator, VcalTerminator::Until(_)));
    }

    #[test]
    fn parses_missing_terminator_as_unbounded() {
        let rule = parse("D1").unwrap();
        assert_eq!(rule.terminator, VcalTerminator::Count(0));
    }

    #[test]
    fn rejects_unknown_tags() {
        for src in ["", "X1 #1", "FREQ=DAILY"] {
            assert!(parse(src).is_err(), "Parse {src:?} should fail");
        }
    }
}
