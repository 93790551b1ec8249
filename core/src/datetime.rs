// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

mod util;

pub(crate) use util::{
    date_with_day_of_year, day_key, div_ceil_i64, end_of_day, format_day_key, is_leap_year,
    months_between, nth_weekday_index, nth_weekday_of_month, shift_year_month, sunday_week_index,
    week_anchor, weekday_bit,
};
