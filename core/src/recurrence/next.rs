// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Next-occurrence queries.
//!
//! All queries are total: they answer with a date or `None`, never panic,
//! and never loop without a bound.

use jiff::Span;
use jiff::civil::{Date, DateTime};

use crate::datetime::{
    date_with_day_of_year, div_ceil_i64, is_leap_year, months_between, nth_weekday_index,
    nth_weekday_of_month, shift_year_month, sunday_week_index, week_anchor, weekday_bit,
};
use crate::recurrence::{Recurrence, RecurrenceKind, Termination};

/// Bound on the search for a representable leap-day year. The Gregorian
/// leap pattern repeats every 400 years, so a miss within the bound is a
/// miss forever.
const LEAP_SEARCH_BOUND: u32 = 400;

impl Recurrence {
    /// The earliest occurrence at or after `pivot`, honoring the count and
    /// end-date bounds but ignoring exceptions and completions.
    ///
    /// Pivots at or before the anchor always yield the anchor itself.
    #[must_use]
    pub fn next_after(&self, pivot: DateTime) -> Option<DateTime> {
        if self.start >= pivot {
            return Some(self.start);
        }

        match self.kind {
            RecurrenceKind::None => None,
            RecurrenceKind::Daily => self.next_daily(pivot),
            RecurrenceKind::Weekly => self.next_weekly(pivot),
            RecurrenceKind::MonthlyByDate => self.next_monthly_by_date(pivot),
            RecurrenceKind::MonthlyByWeekday => self.next_monthly_by_weekday(pivot),
            RecurrenceKind::YearlyByDate => self.next_yearly_by_date(pivot),
            RecurrenceKind::YearlyByDayOfYear => self.next_yearly_by_day_of_year(pivot),
            RecurrenceKind::YearlyByWeekday => self.next_yearly_by_weekday(pivot),
        }
    }

    /// Like [`next_after`](Self::next_after), but skips occurrences whose
    /// day appears among the exceptions or completions.
    #[must_use]
    pub fn next_active_after(&self, pivot: DateTime) -> Option<DateTime> {
        let mut probe = pivot;
        loop {
            let candidate = self.next_after(probe)?;
            if !self.is_skipped(candidate.date()) {
                return Some(candidate);
            }
            probe = candidate.checked_add(Span::new().days(1)).ok()?;
        }
    }

    /// Whether any occurrence remains that is neither excluded nor
    /// completed. Rules without an end date always have one.
    #[must_use]
    pub fn has_active_occurrence(&self) -> bool {
        if self.until().is_none() {
            return true;
        }

        let mut probe = self.start;
        while let Some(candidate) = self.next_after(probe) {
            if !self.is_skipped(candidate.date()) {
                return true;
            }
            // One day past the candidate: a day is considered at most once
            let Ok(next) = candidate.checked_add(Span::new().days(1)) else {
                return false;
            };
            probe = next;
        }
        false
    }

    fn is_skipped(&self, date: Date) -> bool {
        self.exceptions.contains(date) || self.completions.contains(date)
    }

    /// The count bound, when one is set.
    fn count_bound(&self) -> Option<i64> {
        match self.termination {
            Termination::Count(count) => Some(i64::from(count)),
            _ => None,
        }
    }

    /// Applies the end-date bound to a candidate. The bound is
    /// day-granular: a candidate on the end date itself is kept even when
    /// its time of day is later.
    fn bounded(&self, candidate: DateTime) -> Option<DateTime> {
        match self.termination {
            Termination::Until(until) if candidate.date() > until.date() => None,
            _ => Some(candidate),
        }
    }

    fn next_daily(&self, pivot: DateTime) -> Option<DateTime> {
        let interval = i64::from(self.interval);
        let days = i64::from((pivot.date() - self.start.date()).get_days());
        let steps = div_ceil_i64(days, interval);

        if let Some(count) = self.count_bound() {
            if steps >= count {
                return None;
            }
        }

        let candidate = self
            .start
            .checked_add(Span::new().days(steps * interval))
            .ok()?;
        self.bounded(candidate)
    }

    fn next_weekly(&self, pivot: DateTime) -> Option<DateTime> {
        if self.weekday_mask == 0 {
            return None;
        }

        let interval = i64::from(self.interval);
        let step = interval * 7;
        let start_week = week_anchor(self.start.date())?;
        let pivot_week = week_anchor(pivot.date())?;

        // Align the week distance up to the next multiple of the step
        let delta = i64::from((pivot_week - start_week).get_days());
        let aligned = div_ceil_i64(delta, step) * step;

        if let Some(count) = self.count_bound() {
            if (aligned / 7) / interval >= count {
                return None;
            }
        }

        // First day of the week following the pivot's
        let week_end = pivot_week.checked_add(Span::new().days(7)).ok()?;
        let time = self.start.time();
        let mut day = start_week.checked_add(Span::new().days(aligned)).ok()?;

        // Move up to the pivot inside its week
        while day < week_end && DateTime::from_parts(day, time) < pivot {
            day = day.checked_add(Span::new().days(1)).ok()?;
        }

        // Scan the rest of the week for a selected weekday; when the week
        // is exhausted, restart the search from the following week
        while day < week_end {
            if self.weekday_mask & weekday_bit(day.weekday()) != 0 {
                return self.bounded(DateTime::from_parts(day, time));
            }
            day = day.checked_add(Span::new().days(1)).ok()?;
        }
        self.next_after(week_end.at(0, 0, 0, 0))
    }

    fn next_monthly_by_date(&self, pivot: DateTime) -> Option<DateTime> {
        let interval = i64::from(self.interval);
        let anchor = self.start.date();
        let day = anchor.day();

        let mut months = months_between(anchor, pivot.date());
        if pivot.date().day() > day {
            months += 1;
        }
        let mut offset = div_ceil_i64(months, interval) * interval;

        let time = self.start.time();
        loop {
            if let Some(count) = self.count_bound() {
                if offset / interval >= count {
                    return None;
                }
            }

            let (year, month) = shift_year_month(anchor.year(), anchor.month(), offset);
            match Date::new(year, month, day) {
                Ok(date) => return self.bounded(DateTime::from_parts(date, time)),
                // Months without the anchor's day (e.g. Feb 31) are skipped.
                // A 12-month step keeps the month fixed, so an impossible
                // day would never resolve: bail out instead of looping.
                Err(_) => {
                    if self.interval == 12 && (month != 2 || day > 29) {
                        return None;
                    }
                    offset += interval;
                }
            }
        }
    }

    fn next_monthly_by_weekday(&self, pivot: DateTime) -> Option<DateTime> {
        let interval = i64::from(self.interval);
        let anchor = self.start.date();
        let nth = nth_weekday_index(anchor.day());
        let weekday = anchor.weekday();

        let months = months_between(anchor, pivot.date());
        let mut offset = div_ceil_i64(months, interval) * interval - interval;

        let time = self.start.time();
        loop {
            offset += interval;
            if let Some(count) = self.count_bound() {
                if offset / interval >= count {
                    return None;
                }
            }

            let (year, month) = shift_year_month(anchor.year(), anchor.month(), offset);
            let date = nth_weekday_of_month(year, month, weekday, nth)?;
            if date >= pivot.date() {
                return self.bounded(DateTime::from_parts(date, time));
            }
        }
    }

    fn next_yearly_by_date(&self, pivot: DateTime) -> Option<DateTime> {
        let interval = i64::from(self.interval);
        let anchor = self.start.date();
        let (month, day) = (anchor.month(), anchor.day());

        // The pivot's next anniversary year
        let mut year = pivot.date().year();
        if (pivot.date().month(), pivot.date().day()) > (month, day) {
            year += 1;
        }
        if month == 2 && day == 29 {
            while !is_leap_year(year) {
                year += 1;
            }
        }

        let mut offset = i64::from(year - anchor.year());
        offset = div_ceil_i64(offset, interval) * interval;

        let time = self.start.time();
        let mut probes = 0;
        loop {
            if let Some(count) = self.count_bound() {
                if offset >= count {
                    return None;
                }
            }

            let year = i16::try_from(i64::from(anchor.year()) + offset).ok()?;
            match Date::new(year, month, day) {
                Ok(date) => return self.bounded(DateTime::from_parts(date, time)),
                // Interval-aligned years may miss the leap day
                Err(_) => {
                    offset += interval;
                    probes += 1;
                    if probes > LEAP_SEARCH_BOUND {
                        return None;
                    }
                }
            }
        }
    }

    fn next_yearly_by_day_of_year(&self, pivot: DateTime) -> Option<DateTime> {
        let interval = i64::from(self.interval);
        let anchor = self.start.date();
        let day_of_year = anchor.day_of_year();

        let mut index = i64::from(pivot.date().year() - anchor.year()) / interval + 1;
        if let Some(count) = self.count_bound() {
            if index > count || (index == count && pivot.date().day_of_year() > day_of_year) {
                return None;
            }
        }

        let time = self.start.time();
        let mut year = i64::from(anchor.year()) + (index - 1) * interval;
        let mut date = date_with_day_of_year(i16::try_from(year).ok()?, day_of_year)?;
        if date < pivot.date() {
            index += 1;
            if let Some(count) = self.count_bound() {
                if index > count {
                    return None;
                }
            }
            year += interval;
            date = date_with_day_of_year(i16::try_from(year).ok()?, day_of_year)?;
        }
        self.bounded(DateTime::from_parts(date, time))
    }

    fn next_yearly_by_weekday(&self, pivot: DateTime) -> Option<DateTime> {
        let interval = i64::from(self.interval);
        let anchor = self.start.date();
        let nth = nth_weekday_index(anchor.day());
        let weekday = anchor.weekday();

        let years = i64::from(pivot.date().year() - anchor.year());
        let mut offset = div_ceil_i64(years, interval) * interval - interval;

        let time = self.start.time();
        loop {
            offset += interval;
            if let Some(count) = self.count_bound() {
                if offset / interval >= count {
                    return None;
                }
            }

            let year = i16::try_from(i64::from(anchor.year()) + offset).ok()?;
            let date = nth_weekday_of_month(year, anchor.month(), weekday, nth)?;
            if date >= pivot.date() {
                return self.bounded(DateTime::from_parts(date, time));
            }
        }
    }

    /// The ordinal used when emitting a yearly by-weekday rule: how many
    /// Sunday-started weeks separate the anchor from the first of its
    /// month, one-based.
    pub(crate) fn week_of_month_ordinal(&self) -> i64 {
        let anchor = self.start.date();
        sunday_week_index(anchor) - sunday_week_index(anchor.first_of_month()) + 1
    }

    /// The ordinal used when emitting monthly by-weekday rules: the
    /// anchor's weekday position, with 5 standing for "last" when one more
    /// week would leave the month.
    pub(crate) fn weekday_position(&self) -> u8 {
        let anchor = self.start.date();
        if anchor.day() + 7 > anchor.days_in_month() {
            5
        } else {
            nth_weekday_index(anchor.day())
        }
    }
}
