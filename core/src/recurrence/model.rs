// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use jiff::civil::DateTime;

use crate::recurrence::DaySet;

/// Years at or past this value mark an end date as "no end date".
/// Accepted on input for compatibility, never produced on output.
const UNTIL_SENTINEL_YEAR: i16 = 9999;

/// How an event repeats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RecurrenceKind {
    /// No recurrence; the anchor is the only occurrence.
    #[default]
    None,
    /// Every N days.
    Daily,
    /// Every N weeks, on the weekdays selected by the mask.
    Weekly,
    /// Every N months, on the anchor's day of month.
    MonthlyByDate,
    /// Every N months, on the anchor's Nth weekday of the month.
    MonthlyByWeekday,
    /// Every N years, on the anchor's month and day.
    YearlyByDate,
    /// Every N years, on the anchor's day of year.
    YearlyByDayOfYear,
    /// Every N years, on the anchor's Nth weekday of its month.
    YearlyByWeekday,
}

/// Bound on a recurrence series.
///
/// A count and an end date are mutually exclusive; holding them as one sum
/// type makes the exclusion structural.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Termination {
    /// The series never ends.
    #[default]
    None,
    /// The series ends after this many occurrences, the anchor included.
    Count(u32),
    /// The series ends at this instant, inclusive.
    Until(DateTime),
}

/// A recurrence rule: an anchor instant plus a description of how the
/// event repeats, how the series ends, and which days are skipped.
///
/// Occurrences inherit the anchor's time of day. All fields are mutable;
/// setters silently reject out-of-range input and leave the previous state
/// untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct Recurrence {
    pub(crate) start: DateTime,
    pub(crate) kind: RecurrenceKind,
    pub(crate) interval: u32,
    pub(crate) termination: Termination,
    pub(crate) weekday_mask: u8,
    pub(crate) exceptions: DaySet,
    pub(crate) completions: DaySet,
}

impl Recurrence {
    /// Creates a non-recurring rule anchored at `start`.
    #[must_use]
    pub fn new(start: DateTime) -> Self {
        Self {
            start,
            kind: RecurrenceKind::None,
            interval: 1,
            termination: Termination::None,
            weekday_mask: 0,
            exceptions: DaySet::new(),
            completions: DaySet::new(),
        }
    }

    /// The anchor instant.
    #[must_use]
    pub fn start(&self) -> DateTime {
        self.start
    }

    /// Moves the anchor.
    pub fn set_start(&mut self, start: DateTime) {
        self.start = start;
    }

    /// The recurrence kind.
    #[must_use]
    pub fn kind(&self) -> RecurrenceKind {
        self.kind
    }

    /// Sets the recurrence kind.
    pub fn set_kind(&mut self, kind: RecurrenceKind) {
        self.kind = kind;
    }

    /// Whether the rule repeats at all.
    #[must_use]
    pub fn is_recurring(&self) -> bool {
        self.kind != RecurrenceKind::None
    }

    /// The step size in the kind's unit. Always at least 1.
    #[must_use]
    pub fn interval(&self) -> u32 {
        self.interval
    }

    /// Sets the step size. Values below 1 are ignored.
    pub fn set_interval(&mut self, interval: i64) {
        if let Ok(interval) = u32::try_from(interval) {
            if interval >= 1 {
                self.interval = interval;
            }
        }
    }

    /// How the series ends.
    #[must_use]
    pub fn termination(&self) -> Termination {
        self.termination
    }

    /// The occurrence bound, when one is set.
    #[must_use]
    pub fn count(&self) -> Option<u32> {
        match self.termination {
            Termination::Count(count) => Some(count),
            _ => None,
        }
    }

    /// Bounds the series to `count` occurrences, clearing any end date.
    /// A non-positive count only clears an existing count bound.
    pub fn set_count(&mut self, count: i64) {
        match u32::try_from(count) {
            Ok(count) if count >= 1 => self.termination = Termination::Count(count),
            _ => {
                if matches!(self.termination, Termination::Count(_)) {
                    self.termination = Termination::None;
                }
            }
        }
    }

    /// The inclusive end instant, when one is set.
    #[must_use]
    pub fn until(&self) -> Option<DateTime> {
        match self.termination {
            Termination::Until(until) => Some(until),
            _ => None,
        }
    }

    /// Ends the series at `until` (inclusive), clearing any count bound.
    /// `None` — or the year-9999 placeholder — only clears an existing end
    /// date.
    pub fn set_until(&mut self, until: Option<DateTime>) {
        match until {
            Some(until) if until.year() < UNTIL_SENTINEL_YEAR => {
                self.termination = Termination::Until(until);
            }
            _ => {
                if matches!(self.termination, Termination::Until(_)) {
                    self.termination = Termination::None;
                }
            }
        }
    }

    /// The weekly weekday mask, Sunday = bit 0 through Saturday = bit 6.
    #[must_use]
    pub fn weekday_mask(&self) -> u8 {
        self.weekday_mask
    }

    /// Sets the weekly weekday mask.
    pub fn set_weekday_mask(&mut self, mask: u8) {
        self.weekday_mask = mask & 0x7f;
    }

    /// Days excluded from the series.
    #[must_use]
    pub fn exceptions(&self) -> &DaySet {
        &self.exceptions
    }

    /// Mutable access to the excluded days.
    pub fn exceptions_mut(&mut self) -> &mut DaySet {
        &mut self.exceptions
    }

    /// Days already satisfied. Treated like exceptions when searching for
    /// the next active occurrence, but stored and exported separately.
    #[must_use]
    pub fn completions(&self) -> &DaySet {
        &self.completions
    }

    /// Mutable access to the completed days.
    pub fn completions_mut(&mut self) -> &mut DaySet {
        &mut self.completions
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::datetime;

    use super::*;

    fn rule() -> Recurrence {
        Recurrence::new(datetime(2009, 1, 1, 9, 0, 0, 0))
    }

    #[test]
    fn defaults_to_no_recurrence() {
        let r = rule();
        assert_eq!(r.kind(), RecurrenceKind::None);
        assert!(!r.is_recurring());
        assert_eq!(r.interval(), 1);
        assert_eq!(r.termination(), Termination::None);
        assert_eq!(r.weekday_mask(), 0);
        assert!(r.exceptions().is_empty());
        assert!(r.completions().is_empty());
    }

    #[test]
    fn ignores_non_positive_intervals() {
        let mut r = rule();
        r.set_interval(3);
        assert_eq!(r.interval(), 3);
        r.set_interval(0);
        assert_eq!(r.interval(), 3);
        r.set_interval(-5);
        assert_eq!(r.interval(), 3);
    }

    #[test]
    fn count_and_until_are_mutually_exclusive() {
        let mut r = rule();
        r.set_count(5);
        assert_eq!(r.count(), Some(5));
        assert_eq!(r.until(), None);

        r.set_until(Some(datetime(2009, 6, 30, 0, 0, 0, 0)));
        assert_eq!(r.count(), None);
        assert_eq!(r.until(), Some(datetime(2009, 6, 30, 0, 0, 0, 0)));

        r.set_count(2);
        assert_eq!(r.count(), Some(2));
        assert_eq!(r.until(), None);
    }

    #[test]
    fn clearing_until_preserves_count() {
        let mut r = rule();
        r.set_count(5);
        r.set_until(None);
        assert_eq!(r.count(), Some(5));

        r.set_until(Some(datetime(2009, 6, 30, 0, 0, 0, 0)));
        r.set_until(None);
        assert_eq!(r.termination(), Termination::None);
    }

    #[test]
    fn clearing_count_preserves_until() {
        let mut r = rule();
        r.set_until(Some(datetime(2009, 6, 30, 0, 0, 0, 0)));
        r.set_count(0);
        assert_eq!(r.until(), Some(datetime(2009, 6, 30, 0, 0, 0, 0)));

        r.set_count(-1);
        assert_eq!(r.until(), Some(datetime(2009, 6, 30, 0, 0, 0, 0)));
    }

    #[test]
    fn treats_year_9999_as_no_end_date() {
        let mut r = rule();
        r.set_until(Some(datetime(9999, 12, 31, 0, 0, 0, 0)));
        assert_eq!(r.until(), None);

        r.set_count(5);
        r.set_until(Some(datetime(9999, 1, 1, 0, 0, 0, 0)));
        assert_eq!(r.count(), Some(5), "placeholder end date must not clear count");

        r.set_until(Some(datetime(2009, 6, 30, 0, 0, 0, 0)));
        r.set_until(Some(datetime(9999, 1, 1, 0, 0, 0, 0)));
        assert_eq!(r.termination(), Termination::None);
    }

    #[test]
    fn masks_weekday_bits_to_seven_days() {
        let mut r = rule();
        r.set_weekday_mask(0xff);
        assert_eq!(r.weekday_mask(), 0x7f);
    }
}
