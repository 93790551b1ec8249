// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Import/export of the structured, named-field rule form.

use jiff::civil::{Date, Weekday};
use serde::{Deserialize, Serialize};

use crate::datetime::{end_of_day, nth_weekday_of_month, weekday_bit};
use crate::recurrence::{Recurrence, RecurrenceKind, Termination};

const MONTH_NAMES: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

const WEEKDAY_NAMES: [&str; 7] = [
    "sunday",
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
];

/// Structured, named-field rendition of a recurrence rule.
///
/// An unset rule is all-empty; `interval` and `range-type` are the
/// mandatory fields of a set one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct RecurrenceHash {
    /// Step size in the cycle's unit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interval: Option<u32>,

    /// Base repetition cycle.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cycle: Option<HashCycle>,

    /// Pattern refinement within the cycle.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub pattern: Option<HashPattern>,

    /// Day of month, or the ordinal weekday position for weekday patterns.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub daynumber: Option<u8>,

    /// English month name, lowercase.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub month: Option<String>,

    /// English weekday names, lowercase.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub day: Vec<String>,

    /// How the series ends.
    #[serde(rename = "range-type", skip_serializing_if = "Option::is_none")]
    pub range_type: Option<HashRangeType>,

    /// Occurrence count or end date, matching `range-type`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<HashRange>,

    /// Excluded days, keyed `YYYYMMDD`.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub exceptions: Vec<String>,

    /// Completed days, keyed `YYYYMMDD`.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub completions: Vec<String>,
}

/// Base repetition cycle of the hash form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashCycle {
    /// Repeat by days.
    Daily,
    /// Repeat by weeks.
    Weekly,
    /// Repeat by months.
    Monthly,
    /// Repeat by years.
    Yearly,
}

/// Pattern refinement of a monthly or yearly cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashPattern {
    /// Monthly on a fixed day of month.
    Daynumber,
    /// Monthly or yearly on an ordinal weekday.
    Weekday,
    /// Yearly on a fixed month and day.
    Monthday,
    /// Yearly on a fixed day of year.
    Yearday,
}

/// How the series ends in the hash form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashRangeType {
    /// Bounded by an occurrence count.
    Number,
    /// Bounded by an end date.
    Date,
    /// Unbounded.
    None,
}

/// Value of the `range` field: a count or a date string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HashRange {
    /// Occurrence count.
    Number(u32),
    /// Date in `YYYY-MM-DD` or `YYYYMMDD` form.
    Date(String),
}

impl Recurrence {
    /// Reads the named-field form into this rule.
    ///
    /// Returns `false` — marking the rule non-recurring — when the
    /// mandatory `interval` or `range-type` fields are missing. Unknown
    /// weekday and month tokens are ignored.
    pub fn from_hash(&mut self, hash: &RecurrenceHash) -> bool {
        let (Some(interval), Some(range_type)) = (hash.interval, hash.range_type) else {
            self.set_kind(RecurrenceKind::None);
            return false;
        };

        self.set_interval(i64::from(interval));

        let kind = match (hash.cycle, hash.pattern) {
            (Some(HashCycle::Daily), _) => RecurrenceKind::Daily,
            (Some(HashCycle::Weekly), _) => RecurrenceKind::Weekly,
            (Some(HashCycle::Monthly), Some(HashPattern::Weekday)) => {
                RecurrenceKind::MonthlyByWeekday
            }
            (Some(HashCycle::Monthly), _) => RecurrenceKind::MonthlyByDate,
            (Some(HashCycle::Yearly), Some(HashPattern::Yearday)) => {
                RecurrenceKind::YearlyByDayOfYear
            }
            (Some(HashCycle::Yearly), Some(HashPattern::Weekday)) => {
                RecurrenceKind::YearlyByWeekday
            }
            (Some(HashCycle::Yearly), _) => RecurrenceKind::YearlyByDate,
            (None, _) => RecurrenceKind::None,
        };
        self.set_kind(kind);

        // Weekday list: build the mask and remember the last token for the
        // weekday-pattern kinds
        let mut mask = 0u8;
        let mut last_weekday = None;
        for name in &hash.day {
            match weekday_from_name(name) {
                Some(weekday) => {
                    mask |= weekday_bit(weekday);
                    last_weekday = Some(weekday);
                }
                None if name.is_empty() => {}
                None => tracing::warn!(token = %name, "ignoring unknown weekday name"),
            }
        }
        if mask != 0 {
            self.set_weekday_mask(mask);
        }

        match range_type {
            HashRangeType::Number => {
                if let Some(HashRange::Number(count)) = hash.range {
                    self.set_count(i64::from(count));
                }
            }
            HashRangeType::Date => {
                if let Some(HashRange::Date(text)) = &hash.range {
                    match parse_loose_date(text) {
                        Some(date) => self.set_until(Some(date.to_datetime(end_of_day()))),
                        None => tracing::warn!(range = %text, "ignoring unparseable end date"),
                    }
                }
            }
            HashRangeType::None => {
                self.set_count(0);
                self.set_until(None);
            }
        }

        // Re-anchor the start on the fields the kind derives from it
        let day_of_month = hash.daynumber.and_then(|day| i8::try_from(day).ok());
        match kind {
            RecurrenceKind::MonthlyByDate => {
                self.rebuild_start(None, day_of_month);
            }
            RecurrenceKind::YearlyByDate => {
                self.rebuild_start(hash.month.as_deref().and_then(month_from_name), day_of_month);
            }
            RecurrenceKind::MonthlyByWeekday => {
                self.snap_start_to_nth_weekday(hash.daynumber, last_weekday);
            }
            RecurrenceKind::YearlyByWeekday => {
                self.rebuild_start(hash.month.as_deref().and_then(month_from_name), None);
                self.snap_start_to_nth_weekday(hash.daynumber, last_weekday);
            }
            _ => {}
        }

        self.exceptions = hash.exceptions.iter().cloned().collect();
        self.completions = hash.completions.iter().cloned().collect();
        true
    }

    /// Writes this rule in the named-field form. Non-recurring rules
    /// render as the empty hash.
    #[must_use]
    pub fn to_hash(&self) -> RecurrenceHash {
        let anchor = self.start.date();
        let mut hash = RecurrenceHash::default();
        if self.kind == RecurrenceKind::None {
            return hash;
        }

        hash.interval = Some(self.interval);
        match self.kind {
            RecurrenceKind::None => {}
            RecurrenceKind::Daily => hash.cycle = Some(HashCycle::Daily),
            RecurrenceKind::Weekly => {
                hash.cycle = Some(HashCycle::Weekly);
                hash.day = (0..7)
                    .filter(|bit| self.weekday_mask & (1 << bit) != 0)
                    .filter_map(|bit| WEEKDAY_NAMES.get(bit as usize))
                    .map(ToString::to_string)
                    .collect();
            }
            RecurrenceKind::MonthlyByDate => {
                hash.cycle = Some(HashCycle::Monthly);
                hash.pattern = Some(HashPattern::Daynumber);
                hash.daynumber = Some(anchor.day() as u8);
            }
            RecurrenceKind::MonthlyByWeekday => {
                hash.cycle = Some(HashCycle::Monthly);
                hash.pattern = Some(HashPattern::Weekday);
                hash.daynumber = Some(self.weekday_position());
                hash.day = vec![weekday_name(anchor.weekday())];
            }
            RecurrenceKind::YearlyByDate => {
                hash.cycle = Some(HashCycle::Yearly);
                hash.pattern = Some(HashPattern::Monthday);
                hash.daynumber = Some(anchor.day() as u8);
                hash.month = month_name(anchor.month());
            }
            RecurrenceKind::YearlyByDayOfYear => {
                hash.cycle = Some(HashCycle::Yearly);
                hash.pattern = Some(HashPattern::Yearday);
            }
            RecurrenceKind::YearlyByWeekday => {
                hash.cycle = Some(HashCycle::Yearly);
                hash.pattern = Some(HashPattern::Weekday);
                hash.daynumber = Some(self.weekday_position());
                hash.month = month_name(anchor.month());
                hash.day = vec![weekday_name(anchor.weekday())];
            }
        }

        match self.termination {
            Termination::Count(count) => {
                hash.range_type = Some(HashRangeType::Number);
                hash.range = Some(HashRange::Number(count));
            }
            Termination::Until(until) => {
                hash.range_type = Some(HashRangeType::Date);
                hash.range = Some(HashRange::Date(
                    until.date().strftime("%Y-%m-%d").to_string(),
                ));
            }
            Termination::None => hash.range_type = Some(HashRangeType::None),
        }

        hash.exceptions = self.exceptions.iter().map(ToString::to_string).collect();
        hash.completions = self.completions.iter().map(ToString::to_string).collect();
        hash
    }

    /// Rebuilds the anchor date from replacement month/day fields, keeping
    /// whatever the replacement leaves untouched. Combinations that name no
    /// real date are ignored.
    fn rebuild_start(&mut self, month: Option<i8>, day: Option<i8>) {
        let anchor = self.start.date();
        let month = month.unwrap_or(anchor.month());
        let day = day.unwrap_or(anchor.day());
        match Date::new(anchor.year(), month, day) {
            Ok(date) => self.start = date.to_datetime(self.start.time()),
            Err(_) => {
                tracing::warn!(month, day, "ignoring fields naming no real date");
            }
        }
    }

    /// Snaps the anchor to the nth occurrence of a weekday in its month.
    /// Missing fields fall back to the anchor's own position and weekday.
    fn snap_start_to_nth_weekday(&mut self, nth: Option<u8>, weekday: Option<Weekday>) {
        let anchor = self.start.date();
        let nth = nth.unwrap_or_else(|| crate::datetime::nth_weekday_index(anchor.day()));
        let weekday = weekday.unwrap_or_else(|| anchor.weekday());
        if let Some(date) = nth_weekday_of_month(anchor.year(), anchor.month(), weekday, nth) {
            self.start = date.to_datetime(self.start.time());
        }
    }
}

fn month_from_name(name: &str) -> Option<i8> {
    MONTH_NAMES
        .iter()
        .position(|month| name.eq_ignore_ascii_case(month))
        .map(|index| index as i8 + 1)
}

fn month_name(month: i8) -> Option<String> {
    MONTH_NAMES
        .get(month as usize - 1)
        .map(ToString::to_string)
}

fn weekday_from_name(name: &str) -> Option<Weekday> {
    let index = WEEKDAY_NAMES
        .iter()
        .position(|day| name.eq_ignore_ascii_case(day))?;
    Weekday::from_sunday_zero_offset(index as i8).ok()
}

fn weekday_name(weekday: Weekday) -> String {
    WEEKDAY_NAMES[weekday.to_sunday_zero_offset() as usize].to_string()
}

fn parse_loose_date(text: &str) -> Option<Date> {
    Date::strptime("%Y-%m-%d", text)
        .or_else(|_| Date::strptime("%Y%m%d", text))
        .ok()
}

#[cfg(test)]
mod tests {
    use jiff::civil::datetime;

    use super::*;

    fn anchored(year: i16, month: i8, day: i8, hour: i8) -> Recurrence {
        Recurrence::new(datetime(year, month, day, hour, 0, 0, 0))
    }

    fn weekly_hash() -> RecurrenceHash {
        RecurrenceHash {
            interval: Some(2),
            cycle: Some(HashCycle::Weekly),
            day: vec!["monday".into(), "thursday".into()],
            range_type: Some(HashRangeType::Number),
            range: Some(HashRange::Number(4)),
            ..Default::default()
        }
    }

    #[test]
    fn missing_mandatory_fields_invalidate_the_rule() {
        let mut r = anchored(2009, 1, 1, 9);
        r.set_kind(RecurrenceKind::Daily);
        assert!(!r.from_hash(&RecurrenceHash::default()));
        assert_eq!(r.kind(), RecurrenceKind::None);

        let mut r = anchored(2009, 1, 1, 9);
        let no_range_type = RecurrenceHash {
            interval: Some(1),
            cycle: Some(HashCycle::Daily),
            ..Default::default()
        };
        assert!(!r.from_hash(&no_range_type));
        assert_eq!(r.kind(), RecurrenceKind::None);
    }

    #[test]
    fn reads_weekly_hash() {
        let mut r = anchored(2009, 1, 5, 10);
        assert!(r.from_hash(&weekly_hash()));
        assert_eq!(r.kind(), RecurrenceKind::Weekly);
        assert_eq!(r.interval(), 2);
        assert_eq!(r.weekday_mask(), 0b0001_0010);
        assert_eq!(r.count(), Some(4));
    }

    #[test]
    fn unknown_weekday_tokens_are_ignored() {
        let mut r = anchored(2009, 1, 5, 10);
        let mut hash = weekly_hash();
        hash.day.push(String::new());
        hash.day.push("notaday".into());
        assert!(r.from_hash(&hash));
        assert_eq!(r.weekday_mask(), 0b0001_0010);
    }

    #[test]
    fn date_range_sets_end_of_day_bound() {
        let mut r = anchored(2009, 1, 1, 9);
        let hash = RecurrenceHash {
            interval: Some(1),
            cycle: Some(HashCycle::Daily),
            range_type: Some(HashRangeType::Date),
            range: Some(HashRange::Date("2009-06-30".into())),
            ..Default::default()
        };
        assert!(r.from_hash(&hash));
        assert_eq!(r.until(), Some(datetime(2009, 6, 30, 23, 59, 59, 0)));
    }

    #[test]
    fn none_range_clears_both_bounds() {
        let mut r = anchored(2009, 1, 1, 9);
        r.set_kind(RecurrenceKind::Daily);
        r.set_count(5);
        let hash = RecurrenceHash {
            interval: Some(1),
            cycle: Some(HashCycle::Daily),
            range_type: Some(HashRangeType::None),
            ..Default::default()
        };
        assert!(r.from_hash(&hash));
        assert_eq!(r.termination(), Termination::None);
    }

    #[test]
    fn yearly_monthday_hash_reanchors_the_start() {
        let mut r = anchored(2009, 1, 1, 9);
        let hash = RecurrenceHash {
            interval: Some(1),
            cycle: Some(HashCycle::Yearly),
            pattern: Some(HashPattern::Monthday),
            daynumber: Some(26),
            month: Some("november".into()),
            range_type: Some(HashRangeType::None),
            ..Default::default()
        };
        assert!(r.from_hash(&hash));
        assert_eq!(r.kind(), RecurrenceKind::YearlyByDate);
        assert_eq!(r.start(), datetime(2009, 11, 26, 9, 0, 0, 0));
    }

    #[test]
    fn weekday_hash_snaps_to_the_nth_weekday() {
        let mut r = anchored(2009, 1, 1, 9);
        let hash = RecurrenceHash {
            interval: Some(1),
            cycle: Some(HashCycle::Monthly),
            pattern: Some(HashPattern::Weekday),
            daynumber: Some(2),
            day: vec!["monday".into()],
            range_type: Some(HashRangeType::None),
            ..Default::default()
        };
        assert!(r.from_hash(&hash));
        assert_eq!(r.kind(), RecurrenceKind::MonthlyByWeekday);
        // second Monday of January 2009
        assert_eq!(r.start(), datetime(2009, 1, 12, 9, 0, 0, 0));
    }

    #[test]
    fn copies_exception_and_completion_keys() {
        let mut r = anchored(2009, 1, 1, 9);
        let hash = RecurrenceHash {
            interval: Some(1),
            cycle: Some(HashCycle::Daily),
            range_type: Some(HashRangeType::None),
            exceptions: vec!["20090103".into(), "20090102".into()],
            completions: vec!["20090104".into()],
            ..Default::default()
        };
        assert!(r.from_hash(&hash));
        assert!(r.exceptions().contains_key("20090102"));
        assert!(r.exceptions().contains_key("20090103"));
        assert!(r.completions().contains_key("20090104"));
    }

    #[test]
    fn writes_the_empty_hash_for_non_recurring_rules() {
        let r = anchored(2009, 1, 1, 9);
        assert_eq!(r.to_hash(), RecurrenceHash::default());
    }

    #[test]
    fn round_trips_weekly_hash() {
        let mut r = anchored(2009, 1, 5, 10);
        assert!(r.from_hash(&weekly_hash()));

        let emitted = r.to_hash();
        assert_eq!(emitted.cycle, Some(HashCycle::Weekly));
        assert_eq!(emitted.day, vec!["monday", "thursday"]);

        let mut parsed = anchored(2009, 1, 5, 10);
        assert!(parsed.from_hash(&emitted));
        assert_eq!(parsed, r);
    }

    #[test]
    fn round_trips_until_through_the_date_range() {
        let mut r = anchored(2009, 1, 1, 9);
        r.set_kind(RecurrenceKind::Daily);
        r.set_until(Some(datetime(2009, 6, 30, 23, 59, 59, 0)));

        let emitted = r.to_hash();
        assert_eq!(emitted.range_type, Some(HashRangeType::Date));
        assert_eq!(emitted.range, Some(HashRange::Date("2009-06-30".into())));

        let mut parsed = anchored(2009, 1, 1, 9);
        assert!(parsed.from_hash(&emitted));
        assert_eq!(parsed.until(), r.until());
    }

    #[test]
    fn serializes_with_kebab_case_field_names() {
        let mut r = anchored(2009, 1, 5, 10);
        assert!(r.from_hash(&weekly_hash()));

        let json = serde_json::to_value(r.to_hash()).unwrap();
        assert_eq!(json["cycle"], "weekly");
        assert_eq!(json["range-type"], "number");
        assert_eq!(json["range"], 4);
        assert_eq!(json["day"][0], "monday");
        assert!(json.get("month").is_none());
    }
}
