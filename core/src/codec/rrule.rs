// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Import/export of the key/value (iCalendar 2.0) rule format.

use cadence_ical::{RecurrenceFrequency, RecurrenceRuleValue, WeekDayNum, parse_rrule};
use jiff::Span;

use crate::datetime::weekday_bit;
use crate::recurrence::{Recurrence, RecurrenceKind, Termination};

impl Recurrence {
    /// Reads a key/value recurrence rule into this rule.
    ///
    /// Unknown keys are ignored. Input without a usable `FREQ` marks the
    /// rule non-recurring and leaves the remaining fields untouched.
    pub fn parse_ical(&mut self, text: &str) {
        let normalized = text.trim().to_ascii_uppercase();
        let value = match parse_rrule(&normalized) {
            Ok(value) => value,
            Err(err) => {
                tracing::debug!(%err, "not a recurrence rule value");
                self.set_kind(RecurrenceKind::None);
                return;
            }
        };

        self.set_interval(i64::from(value.interval.unwrap_or(1)));

        let kind = match value.freq {
            RecurrenceFrequency::Daily => RecurrenceKind::Daily,
            RecurrenceFrequency::Weekly => RecurrenceKind::Weekly,
            RecurrenceFrequency::Monthly if value.by_day.is_empty() => {
                RecurrenceKind::MonthlyByDate
            }
            RecurrenceFrequency::Monthly => RecurrenceKind::MonthlyByWeekday,
            RecurrenceFrequency::Yearly if !value.by_year_day.is_empty() => {
                RecurrenceKind::YearlyByDayOfYear
            }
            RecurrenceFrequency::Yearly if !value.by_day.is_empty() => {
                RecurrenceKind::YearlyByWeekday
            }
            RecurrenceFrequency::Yearly => RecurrenceKind::YearlyByDate,
        };
        self.set_kind(kind);

        if kind == RecurrenceKind::Weekly && !value.by_day.is_empty() {
            let mut mask = 0u8;
            for day in &value.by_day {
                mask |= weekday_bit(day.day.into());
            }
            self.set_weekday_mask(mask);
        }

        if let Some(until) = value.until {
            self.set_until(Some(until.civil_date_time()));
        }
        if let Some(count) = value.count {
            self.set_count(i64::from(count));
        }
    }

    /// Writes this rule as a key/value recurrence rule. Non-recurring
    /// rules render as the empty string.
    #[must_use]
    pub fn emit_ical(&self) -> String {
        let anchor = self.start.date();
        let mut value = RecurrenceRuleValue {
            interval: Some(self.interval),
            ..Default::default()
        };

        match self.kind {
            RecurrenceKind::None => return String::new(),
            RecurrenceKind::Daily => value.freq = RecurrenceFrequency::Daily,
            RecurrenceKind::Weekly => {
                value.freq = RecurrenceFrequency::Weekly;
                value.by_day = (0..7)
                    .filter(|bit| self.weekday_mask & (1 << bit) != 0)
                    .filter_map(|bit| jiff::civil::Weekday::from_sunday_zero_offset(bit).ok())
                    .map(|day| WeekDayNum {
                        day: day.into(),
                        occurrence: None,
                    })
                    .collect();
            }
            RecurrenceKind::MonthlyByDate => value.freq = RecurrenceFrequency::Monthly,
            RecurrenceKind::MonthlyByWeekday => {
                value.freq = RecurrenceFrequency::Monthly;
                value.by_day = vec![WeekDayNum {
                    day: anchor.weekday().into(),
                    occurrence: Some(self.weekday_position() as i8),
                }];
            }
            RecurrenceKind::YearlyByDate => value.freq = RecurrenceFrequency::Yearly,
            RecurrenceKind::YearlyByDayOfYear => {
                value.freq = RecurrenceFrequency::Yearly;
                value.by_year_day = vec![anchor.day_of_year()];
            }
            RecurrenceKind::YearlyByWeekday => {
                value.freq = RecurrenceFrequency::Yearly;
                let ordinal = self.week_of_month_ordinal().clamp(-128, 127) as i8;
                value.by_day = vec![WeekDayNum {
                    day: anchor.weekday().into(),
                    occurrence: Some(ordinal),
                }];
                value.by_month = vec![anchor.month() as u8];
            }
        }

        match self.termination {
            Termination::Until(until) => {
                // Half-open end on output: push the inclusive bound one day out
                let shifted = until.checked_add(Span::new().days(1)).unwrap_or(until);
                value.until = Some(shifted.into());
            }
            Termination::Count(count) => value.count = Some(count),
            Termination::None => {}
        }

        value.to_string()
    }
}
