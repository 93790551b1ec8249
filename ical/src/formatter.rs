// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Emitters for the recurrence-rule wire formats.
//!
//! Each wire value renders through `Display`, so emission is
//! `value.to_string()` and writing into an existing buffer is
//! `write!(buf, "{value}")`.

use std::fmt::{self, Display};

use crate::keyword::{
    KW_RRULE_BYDAY, KW_RRULE_BYMONTH, KW_RRULE_BYYEARDAY, KW_RRULE_COUNT, KW_RRULE_FREQ,
    KW_RRULE_INTERVAL, KW_RRULE_UNTIL,
};
use crate::value::{
    RecurrenceRuleValue, ValueDate, ValueDateTime, ValueTime, VcalRule, VcalTerminator, WeekDayNum,
};

/// `YYYYMMDD`
impl Display for ValueDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}{:02}{:02}", self.year, self.month, self.day)
    }
}

/// `HHMMSS[Z]`
impl Display for ValueTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let utc = if self.utc { "Z" } else { "" };
        write!(f, "{:02}{:02}{:02}{}", self.hour, self.minute, self.second, utc)
    }
}

/// `YYYYMMDDTHHMMSS[Z]`
impl Display for ValueDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}T{}", self.date, self.time)
    }
}

/// `[ord]WD`, e.g. `MO`, `4TH`, `-1FR`
impl Display for WeekDayNum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(occurrence) = self.occurrence {
            write!(f, "{occurrence}")?;
        }
        write!(f, "{}", self.day)
    }
}

/// Semicolon-delimited rule parts: `FREQ` first, then `INTERVAL`, the
/// `BY*` lists, and the terminating `UNTIL`/`COUNT`.
impl Display for RecurrenceRuleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{KW_RRULE_FREQ}={}", self.freq)?;

        if let Some(interval) = self.interval {
            write!(f, ";{KW_RRULE_INTERVAL}={interval}")?;
        }

        if !self.by_day.is_empty() {
            write!(f, ";{KW_RRULE_BYDAY}=")?;
            for (i, day) in self.by_day.iter().enumerate() {
                if i > 0 {
                    write!(f, ",")?;
                }
                write!(f, "{day}")?;
            }
        }

        if !self.by_year_day.is_empty() {
            write!(f, ";{KW_RRULE_BYYEARDAY}=")?;
            for (i, day) in self.by_year_day.iter().enumerate() {
                if i > 0 {
                    write!(f, ",")?;
                }
                write!(f, "{day}")?;
            }
        }

        if !self.by_month.is_empty() {
            write!(f, ";{KW_RRULE_BYMONTH}=")?;
            for (i, month) in self.by_month.iter().enumerate() {
                if i > 0 {
                    write!(f, ",")?;
                }
                write!(f, "{month}")?;
            }
        }

        if let Some(until) = &self.until {
            write!(f, ";{KW_RRULE_UNTIL}={until}")?;
        }

        if let Some(count) = self.count {
            write!(f, ";{KW_RRULE_COUNT}={count}")?;
        }

        Ok(())
    }
}

/// `#N` or the end date.
impl Display for VcalTerminator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VcalTerminator::Count(n) => write!(f, "#{n}"),
            VcalTerminator::Until(until) => write!(f, "{until}"),
        }
    }
}

/// `<tag><interval> <modifiers> <terminator>`
impl Display for VcalRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.tag.token(), self.interval)?;

        for day in &self.weekdays {
            write!(f, " {day}")?;
        }

        if let Some((position, day)) = &self.position {
            write!(f, " {position}+ {day}")?;
        }

        if let Some(day_number) = self.day_number {
            write!(f, " {day_number}")?;
        }

        write!(f, " {}", self.terminator)
    }
}

#[cfg(test)]
mod tests {
    use crate::value::{
        RecurrenceFrequency, RecurrenceRuleValue, ValueDate, ValueDateTime, ValueTime, VcalRule,
        VcalTag, VcalTerminator, WeekDay, WeekDayNum,
    };

    fn datetime(year: i16, month: i8, day: i8) -> ValueDateTime {
        ValueDateTime::new(ValueDate { year, month, day }, ValueTime::midnight())
    }

    #[test]
    fn formats_date_time() {
        assert_eq!(datetime(2009, 7, 1).to_string(), "20090701T000000");
    }

    #[test]
    fn formats_rrule_with_count() {
        let rule = RecurrenceRuleValue {
            freq: RecurrenceFrequency::Daily,
            interval: Some(2),
            count: Some(3),
            ..Default::default()
        };
        assert_eq!(rule.to_string(), "FREQ=DAILY;INTERVAL=2;COUNT=3");
    }

    #[test]
    fn formats_rrule_with_byday_ordinal() {
        let rule = RecurrenceRuleValue {
            freq: RecurrenceFrequency::Yearly,
            interval: Some(1),
            count: Some(10),
            by_day: vec![WeekDayNum {
                day: WeekDay::Thursday,
                occurrence: Some(4),
            }],
            by_month: vec![11],
            ..Default::default()
        };
        assert_eq!(
            rule.to_string(),
            "FREQ=YEARLY;INTERVAL=1;BYDAY=4TH;BYMONTH=11;COUNT=10"
        );
    }

    #[test]
    fn formats_vcal_weekly_with_until() {
        let rule = VcalRule {
            tag: VcalTag::Weekly,
            interval: 2,
            weekdays: vec![WeekDay::Monday, WeekDay::Thursday],
            position: None,
            day_number: None,
            terminator: VcalTerminator::Until(datetime(2009, 7, 1)),
        };
        assert_eq!(rule.to_string(), "W2 MO TH 20090701T000000");
    }

    #[test]
    fn formats_vcal_monthly_position() {
        let rule = VcalRule {
            tag: VcalTag::MonthlyByPosition,
            interval: 1,
            weekdays: Vec::new(),
            position: Some((2, WeekDay::Monday)),
            day_number: None,
            terminator: VcalTerminator::Count(0),
        };
        assert_eq!(rule.to_string(), "MP1 2+ MO #0");
    }
}
