// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use chumsky::input::Stream;
use chumsky::prelude::*;

use crate::error::ParseRuleError;
use crate::value::{RecurrenceRuleValue, VcalRule, value_rrule, value_vcal_rule};

/// Parse a key/value (RFC 5545) recurrence rule value.
///
/// # Examples
///
/// ```
/// # use cadence_ical::parse_rrule;
/// let rule = parse_rrule("FREQ=WEEKLY;INTERVAL=2;BYDAY=MO,TH").unwrap();
/// assert_eq!(rule.interval, Some(2));
/// assert_eq!(rule.by_day.len(), 2);
/// ```
///
/// # Errors
///
/// Returns [`ParseRuleError`] when the input does not match the grammar or
/// carries no `FREQ` part.
pub fn parse_rrule(src: &str) -> Result<RecurrenceRuleValue, ParseRuleError> {
    let stream = Stream::from_iter(src.chars());
    value_rrule::<'_, _, extra::Err<Rich<char>>>()
        .parse(stream)
        .into_result()
        .map_err(ParseRuleError::from_errors)
}

/// Parse a line-oriented (vCalendar 1.0) recurrence rule.
///
/// # Examples
///
/// ```
/// # use cadence_ical::{VcalTerminator, parse_vcal_rule};
/// let rule = parse_vcal_rule("D2 #5").unwrap();
/// assert_eq!(rule.interval, 2);
/// assert_eq!(rule.terminator, VcalTerminator::Count(5));
/// ```
///
/// # Errors
///
/// Returns [`ParseRuleError`] when the input does not start with a known
/// rule tag.
pub fn parse_vcal_rule(src: &str) -> Result<VcalRule, ParseRuleError> {
    let stream = Stream::from_iter(src.chars());
    value_vcal_rule::<'_, _, extra::Err<Rich<char>>>()
        .parse(stream)
        .into_result()
        .map_err(ParseRuleError::from_errors)
}
