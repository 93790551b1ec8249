// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use jiff::Span;
use jiff::civil::{Date, Time, Weekday};

/// NOTE: Day keys are exchanged with external stores, so the format must be
/// stable across runs: eight zero-padded digits, `YYYYMMDD`.
pub(crate) fn day_key(date: Date) -> String {
    format_day_key(date.year(), date.month(), date.day())
}

pub(crate) fn format_day_key(year: i16, month: i8, day: i8) -> String {
    format!("{year:04}{month:02}{day:02}")
}

/// End-of-day time used when an end date is given without a time part.
pub(crate) const fn end_of_day() -> Time {
    Time::constant(23, 59, 59, 0)
}

/// The mask bit of a weekday, Sunday = bit 0 through Saturday = bit 6.
pub(crate) fn weekday_bit(weekday: Weekday) -> u8 {
    1 << weekday.to_sunday_zero_offset()
}

/// The Monday opening the ISO week that contains `date`.
pub(crate) fn week_anchor(date: Date) -> Option<Date> {
    let offset = i64::from(date.weekday().to_monday_zero_offset());
    date.checked_sub(Span::new().days(offset)).ok()
}

/// Whole months from the anchor's `(year, month)` to the pivot's.
pub(crate) fn months_between(anchor: Date, pivot: Date) -> i64 {
    i64::from(pivot.year() - anchor.year()) * 12 + i64::from(pivot.month() - anchor.month())
}

/// Shift a `(year, month)` pair by a whole number of months.
pub(crate) fn shift_year_month(year: i16, month: i8, offset: i64) -> (i16, i8) {
    let total = i64::from(year) * 12 + i64::from(month) - 1 + offset;
    let year = i16::try_from(total.div_euclid(12)).unwrap_or(i16::MAX);
    let month = total.rem_euclid(12) as i8 + 1;
    (year, month)
}

/// The ordinal position of a day-of-month within its month, 1-5.
pub(crate) fn nth_weekday_index(day: i8) -> u8 {
    ((day + 6) / 7) as u8
}

/// The `nth` occurrence of `weekday` within the given month. When the month
/// has fewer than `nth` such weekdays, the last one is returned instead.
pub(crate) fn nth_weekday_of_month(
    year: i16,
    month: i8,
    weekday: Weekday,
    nth: u8,
) -> Option<Date> {
    let first = Date::new(year, month, 1).ok()?;
    let offset =
        (weekday.to_sunday_zero_offset() - first.weekday().to_sunday_zero_offset()).rem_euclid(7);
    let mut day = 1 + offset + 7 * (nth.clamp(1, 5) as i8 - 1);
    while day > first.days_in_month() {
        day -= 7;
    }
    Date::new(year, month, day).ok()
}

/// Index of the Sunday-started week containing `date`, counted from a fixed
/// Sunday epoch. Only differences of these indices are meaningful.
pub(crate) fn sunday_week_index(date: Date) -> i64 {
    // 1970-01-04 is a Sunday
    let epoch = Date::constant(1970, 1, 4);
    i64::from((date - epoch).get_days()).div_euclid(7)
}

/// The date carrying the given day-of-year. Day numbers past the end of the
/// year roll over into the next one.
pub(crate) fn date_with_day_of_year(year: i16, day_of_year: i16) -> Option<Date> {
    let first = Date::new(year, 1, 1).ok()?;
    first
        .checked_add(Span::new().days(i64::from(day_of_year) - 1))
        .ok()
}

pub(crate) fn is_leap_year(year: i16) -> bool {
    Date::new(year, 2, 29).is_ok()
}

/// Signed integer ceiling division, matching the semantics of the
/// (currently unstable) standard library `div_ceil` for signed integers.
pub(crate) fn div_ceil_i64(lhs: i64, rhs: i64) -> i64 {
    let d = lhs / rhs;
    let r = lhs % rhs;
    if (r > 0 && rhs > 0) || (r < 0 && rhs < 0) {
        d + 1
    } else {
        d
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;

    #[test]
    fn formats_day_keys() {
        assert_eq!(day_key(date(2009, 1, 3)), "20090103");
        assert_eq!(day_key(date(987, 12, 31)), "09871231");
        assert_eq!(format_day_key(2024, 2, 29), "20240229");
    }

    #[test]
    fn maps_weekdays_to_mask_bits() {
        assert_eq!(weekday_bit(Weekday::Sunday), 1);
        assert_eq!(weekday_bit(Weekday::Monday), 2);
        assert_eq!(weekday_bit(Weekday::Saturday), 64);
    }

    #[test]
    fn anchors_weeks_on_monday() {
        // 2009-01-05 is a Monday
        assert_eq!(week_anchor(date(2009, 1, 5)), Some(date(2009, 1, 5)));
        assert_eq!(week_anchor(date(2009, 1, 8)), Some(date(2009, 1, 5)));
        assert_eq!(week_anchor(date(2009, 1, 11)), Some(date(2009, 1, 5)));
        // ISO week 1 of 2009 starts in calendar year 2008
        assert_eq!(week_anchor(date(2008, 12, 30)), Some(date(2008, 12, 29)));
        assert_eq!(week_anchor(date(2009, 1, 1)), Some(date(2008, 12, 29)));
    }

    #[test]
    fn counts_months_between_dates() {
        assert_eq!(months_between(date(2009, 1, 31), date(2009, 1, 1)), 0);
        assert_eq!(months_between(date(2009, 1, 31), date(2009, 3, 15)), 2);
        assert_eq!(months_between(date(2009, 11, 1), date(2010, 2, 1)), 3);
        assert_eq!(months_between(date(2009, 3, 1), date(2009, 1, 1)), -2);
    }

    #[test]
    fn shifts_year_month_pairs() {
        assert_eq!(shift_year_month(2009, 1, 0), (2009, 1));
        assert_eq!(shift_year_month(2009, 1, 2), (2009, 3));
        assert_eq!(shift_year_month(2009, 11, 3), (2010, 2));
        assert_eq!(shift_year_month(2009, 1, -1), (2008, 12));
        assert_eq!(shift_year_month(2009, 12, 13), (2011, 1));
    }

    #[test]
    fn computes_ordinal_position() {
        assert_eq!(nth_weekday_index(1), 1);
        assert_eq!(nth_weekday_index(7), 1);
        assert_eq!(nth_weekday_index(8), 2);
        assert_eq!(nth_weekday_index(12), 2);
        assert_eq!(nth_weekday_index(31), 5);
    }

    #[test]
    fn finds_nth_weekday_of_month() {
        // 2nd Monday of January 2009
        assert_eq!(
            nth_weekday_of_month(2009, 1, Weekday::Monday, 2),
            Some(date(2009, 1, 12))
        );
        // 2nd Monday of February 2009
        assert_eq!(
            nth_weekday_of_month(2009, 2, Weekday::Monday, 2),
            Some(date(2009, 2, 9))
        );
        // 4th Thursday of November 2009
        assert_eq!(
            nth_weekday_of_month(2009, 11, Weekday::Thursday, 4),
            Some(date(2009, 11, 26))
        );
    }

    #[test]
    fn falls_back_to_last_weekday_of_month() {
        // February 2009 has four of each weekday
        assert_eq!(
            nth_weekday_of_month(2009, 2, Weekday::Saturday, 5),
            Some(date(2009, 2, 28))
        );
        assert_eq!(
            nth_weekday_of_month(2009, 2, Weekday::Sunday, 5),
            Some(date(2009, 2, 22))
        );
        // March 2009 has five Mondays
        assert_eq!(
            nth_weekday_of_month(2009, 3, Weekday::Monday, 5),
            Some(date(2009, 3, 30))
        );
    }

    #[test]
    fn computes_sunday_week_ordinals() {
        // 2009-11-26 is the 4th Thursday of November
        let ordinal = sunday_week_index(date(2009, 11, 26))
            - sunday_week_index(date(2009, 11, 1))
            + 1;
        assert_eq!(ordinal, 4);
    }

    #[test]
    fn resolves_day_of_year() {
        assert_eq!(date_with_day_of_year(2009, 1), Some(date(2009, 1, 1)));
        assert_eq!(date_with_day_of_year(2009, 32), Some(date(2009, 2, 1)));
        assert_eq!(date_with_day_of_year(2008, 366), Some(date(2008, 12, 31)));
        // rolls over in non-leap years
        assert_eq!(date_with_day_of_year(2009, 366), Some(date(2010, 1, 1)));
    }

    #[test]
    fn detects_leap_years() {
        assert!(is_leap_year(2008));
        assert!(is_leap_year(2000));
        assert!(!is_leap_year(2009));
        assert!(!is_leap_year(1900));
    }
}
