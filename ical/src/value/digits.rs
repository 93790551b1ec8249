// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Shared numeric parsers for the value grammars.

use std::borrow::Cow;
use std::ops::RangeInclusive;

use chumsky::Parser;
use chumsky::error::RichPattern;
use chumsky::extra::ParserExtra;
use chumsky::input::Input;
use chumsky::label::LabelError;
use chumsky::prelude::*;
use chumsky::span::SimpleSpan;

/// Failure reasons when a specific value type was expected but not found.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueExpected {
    /// A date value was expected
    Date,
    /// A time value was expected
    Time,
    /// A frequency keyword was expected
    Frequency,
    /// A weekday token was expected
    Weekday,
    /// A 32-bit unsigned integer value was expected
    U32,
    /// A positive 32-bit unsigned integer value was expected
    PositiveU32,
    /// A number outside its permitted range
    OutOfRange,
    /// A recurrence rule requires a FREQ part
    RRuleRequiredFreq,
}

impl From<ValueExpected> for RichPattern<'_, char> {
    fn from(expected: ValueExpected) -> Self {
        match expected {
            ValueExpected::Date => Self::Label(Cow::Borrowed("invalid date")),
            ValueExpected::Time => Self::Label(Cow::Borrowed("invalid time")),
            ValueExpected::Frequency => Self::Label(Cow::Borrowed("unknown frequency")),
            ValueExpected::Weekday => Self::Label(Cow::Borrowed("unknown weekday token")),
            ValueExpected::U32 => Self::Label(Cow::Borrowed("u32 out of range")),
            ValueExpected::PositiveU32 => Self::Label(Cow::Borrowed("expected a positive integer")),
            ValueExpected::OutOfRange => Self::Label(Cow::Borrowed("number out of range")),
            ValueExpected::RRuleRequiredFreq => Self::Label(Cow::Borrowed("missing FREQ part")),
        }
    }
}

/// A single decimal digit as its numeric value.
pub(crate) fn digit<'src, I, E>() -> impl Parser<'src, I, u32, E> + Copy
where
    I: Input<'src, Token = char, Span = SimpleSpan> + chumsky::input::ValueInput<'src>,
    E: ParserExtra<'src, I>,
{
    select! { c @ '0'..='9' => u32::from(c as u8 - b'0') }
}

fn fold_digits(digits: Vec<u32>) -> u32 {
    digits
        .into_iter()
        .fold(0u32, |n, d| n.saturating_mul(10).saturating_add(d))
}

/// Exactly `width` decimal digits folded into one number. Leading zeros
/// carry no meaning.
pub(crate) fn fixed_uint<'src, I, E>(width: usize) -> impl Parser<'src, I, u32, E>
where
    I: Input<'src, Token = char, Span = SimpleSpan> + chumsky::input::ValueInput<'src>,
    E: ParserExtra<'src, I>,
{
    digit()
        .repeated()
        .exactly(width)
        .collect::<Vec<_>>()
        .map(fold_digits)
}

/// One to `max_digits` decimal digits whose value must fall inside
/// `range`. The digit run is taken greedily; the range is checked on the
/// folded value rather than encoded digit-by-digit in the grammar.
pub(crate) fn ranged_uint<'src, I, E>(
    max_digits: usize,
    range: RangeInclusive<u32>,
) -> impl Parser<'src, I, u32, E>
where
    I: Input<'src, Token = char, Span = SimpleSpan> + chumsky::input::ValueInput<'src>,
    E: ParserExtra<'src, I>,
    E::Error: LabelError<'src, I, ValueExpected>,
{
    digit()
        .repeated()
        .at_least(1)
        .at_most(max_digits)
        .collect::<Vec<_>>()
        .map(fold_digits)
        .try_map(move |value, span| {
            if range.contains(&value) {
                Ok(value)
            } else {
                Err(E::Error::expected_found(
                    [ValueExpected::OutOfRange],
                    None,
                    span,
                ))
            }
        })
}

/// Parse a `u32` from 1 to 10 decimal digits. Zero is accepted.
pub(crate) fn u32_value<'src, I, E>() -> impl Parser<'src, I, u32, E>
where
    I: Input<'src, Token = char, Span = SimpleSpan> + chumsky::input::ValueInput<'src>,
    E: ParserExtra<'src, I>,
    E::Error: LabelError<'src, I, ValueExpected>,
{
    select! { c @ '0'..='9' => c }
        .repeated()
        .at_least(1)
        .at_most(10) // u32 max is 10 digits
        .collect::<String>()
        .try_map_with(|str, e| {
            lexical::parse_partial::<u32, _>(&str)
                .map(|(v, _)| v)
                .map_err(|_| E::Error::expected_found([ValueExpected::U32], None, e.span()))
        })
}

#[cfg(test)]
mod tests {
    use chumsky::input::Stream;

    use super::*;

    #[test]
    fn folds_fixed_width_digit_runs() {
        fn parse(width: usize, src: &str) -> Result<u32, Vec<Rich<'_, char>>> {
            let stream = Stream::from_iter(src.chars());
            fixed_uint::<'_, _, extra::Err<_>>(width)
                .parse(stream)
                .into_result()
        }

        assert_eq!(parse(4, "2009"), Ok(2009));
        assert_eq!(parse(4, "0042"), Ok(42));
        assert_eq!(parse(2, "07"), Ok(7));

        for (width, src) in [(4, "209"), (4, "20x9"), (2, "7")] {
            assert!(parse(width, src).is_err(), "{src} should fail at width {width}");
        }
    }

    #[test]
    fn enforces_value_ranges() {
        fn parse(src: &str) -> Result<u32, Vec<Rich<'_, char>>> {
            let stream = Stream::from_iter(src.chars());
            ranged_uint::<'_, _, extra::Err<_>>(2, 1..=12)
                .parse(stream)
                .into_result()
        }

        assert_eq!(parse("1"), Ok(1));
        assert_eq!(parse("09"), Ok(9));
        assert_eq!(parse("12"), Ok(12));

        for src in ["0", "13", "99", ""] {
            assert!(parse(src).is_err(), "{src} should be out of range");
        }
    }

    #[test]
    fn parses_u32() {
        fn parse(src: &str) -> Result<u32, Vec<Rich<'_, char>>> {
            let stream = Stream::from_iter(src.chars());
            u32_value::<'_, _, extra::Err<_>>()
                .parse(stream)
                .into_result()
        }

        for (src, expected) in [("0", 0), ("1", 1), ("42", 42), ("4294967295", u32::MAX)] {
            assert_eq!(parse(src).unwrap(), expected, "Failed for {src}");
        }

        for src in ["", "-1", "x"] {
            assert!(parse(src).is_err(), "Parse {src} should fail");
        }
    }
}
