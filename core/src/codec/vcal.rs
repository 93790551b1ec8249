// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Import/export of the line-oriented (vCalendar 1.0) rule format.

use cadence_ical::{VcalRule, VcalTag, VcalTerminator, parse_vcal_rule};
use jiff::Span;

use crate::datetime::weekday_bit;
use crate::recurrence::{Recurrence, RecurrenceKind, Termination};

impl Recurrence {
    /// Reads a vCalendar 1.0 recurrence line into this rule.
    ///
    /// Input that does not match the format marks the rule non-recurring
    /// and leaves the remaining fields untouched.
    pub fn parse_vcal(&mut self, text: &str) {
        let normalized = text.trim().to_ascii_uppercase();
        let rule = match parse_vcal_rule(&normalized) {
            Ok(rule) => rule,
            Err(err) => {
                tracing::debug!(%err, "not a recurrence line");
                self.set_kind(RecurrenceKind::None);
                return;
            }
        };

        self.set_kind(match rule.tag {
            VcalTag::Daily => RecurrenceKind::Daily,
            VcalTag::Weekly => RecurrenceKind::Weekly,
            VcalTag::MonthlyByPosition => RecurrenceKind::MonthlyByWeekday,
            VcalTag::MonthlyByDay => RecurrenceKind::MonthlyByDate,
            VcalTag::YearlyByMonth => RecurrenceKind::YearlyByDate,
            VcalTag::YearlyByDay => RecurrenceKind::YearlyByDayOfYear,
        });
        self.set_interval(i64::from(rule.interval));

        if rule.tag == VcalTag::Weekly {
            let mut mask = 0u8;
            for day in &rule.weekdays {
                mask |= weekday_bit((*day).into());
            }
            // A weekly rule without tokens repeats on the anchor's weekday
            if mask == 0 {
                mask = weekday_bit(self.start.date().weekday());
            }
            self.set_weekday_mask(mask);
        }

        match rule.terminator {
            VcalTerminator::Count(count) => self.set_count(i64::from(count)),
            VcalTerminator::Until(until) => self.set_until(Some(until.civil_date_time())),
        }
    }

    /// Writes this rule as a vCalendar 1.0 recurrence line. Non-recurring
    /// rules render as the empty string.
    #[must_use]
    pub fn emit_vcal(&self) -> String {
        let anchor = self.start.date();
        let mut rule = VcalRule {
            tag: VcalTag::Daily,
            interval: self.interval,
            weekdays: Vec::new(),
            position: None,
            day_number: None,
            terminator: self.emit_terminator(),
        };

        match self.kind {
            RecurrenceKind::None => return String::new(),
            RecurrenceKind::Daily => rule.tag = VcalTag::Daily,
            RecurrenceKind::Weekly => {
                rule.tag = VcalTag::Weekly;
                rule.weekdays = (0..7)
                    .filter(|bit| self.weekday_mask & (1 << bit) != 0)
                    .filter_map(|bit| jiff::civil::Weekday::from_sunday_zero_offset(bit).ok())
                    .map(Into::into)
                    .collect();
            }
            RecurrenceKind::MonthlyByWeekday => {
                rule.tag = VcalTag::MonthlyByPosition;
                rule.position = Some((self.weekday_position(), anchor.weekday().into()));
            }
            RecurrenceKind::MonthlyByDate => {
                rule.tag = VcalTag::MonthlyByDay;
                rule.day_number = Some(i16::from(anchor.day()));
            }
            // The line format has no yearly by-weekday tag; the closest
            // rendition anchors on the month
            RecurrenceKind::YearlyByDate | RecurrenceKind::YearlyByWeekday => {
                rule.tag = VcalTag::YearlyByMonth;
                rule.day_number = Some(i16::from(anchor.month()));
            }
            RecurrenceKind::YearlyByDayOfYear => {
                rule.tag = VcalTag::YearlyByDay;
                rule.day_number = Some(anchor.day_of_year());
            }
        }

        rule.to_string()
    }

    /// The wire terminator: the end date pushed one day out (the formats
    /// use a half-open end on output), or `#count`, with `#0` standing for
    /// "unbounded".
    pub(crate) fn emit_terminator(&self) -> VcalTerminator {
        match self.termination {
            Termination::Until(until) => {
                let shifted = until.checked_add(Span::new().days(1)).unwrap_or(until);
                VcalTerminator::Until(shifted.into())
            }
            Termination::Count(count) => VcalTerminator::Count(count),
            Termination::None => VcalTerminator::Count(0),
        }
    }
}
