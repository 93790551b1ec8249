// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Keywords of the recurrence-rule wire formats.

// RFC 5545 Section 3.3.10 — recurrence rule parts
pub const KW_RRULE_FREQ: &str = "FREQ";
pub const KW_RRULE_UNTIL: &str = "UNTIL";
pub const KW_RRULE_COUNT: &str = "COUNT";
pub const KW_RRULE_INTERVAL: &str = "INTERVAL";
pub const KW_RRULE_BYDAY: &str = "BYDAY";
pub const KW_RRULE_BYYEARDAY: &str = "BYYEARDAY";
pub const KW_RRULE_BYMONTH: &str = "BYMONTH";

pub const KW_RRULE_FREQ_DAILY: &str = "DAILY";
pub const KW_RRULE_FREQ_WEEKLY: &str = "WEEKLY";
pub const KW_RRULE_FREQ_MONTHLY: &str = "MONTHLY";
pub const KW_RRULE_FREQ_YEARLY: &str = "YEARLY";

// Weekday tokens, shared by both formats
pub const KW_DAY_SU: &str = "SU";
pub const KW_DAY_MO: &str = "MO";
pub const KW_DAY_TU: &str = "TU";
pub const KW_DAY_WE: &str = "WE";
pub const KW_DAY_TH: &str = "TH";
pub const KW_DAY_FR: &str = "FR";
pub const KW_DAY_SA: &str = "SA";

// vCalendar 1.0 recurrence rule tags
pub const KW_VCAL_DAILY: &str = "D";
pub const KW_VCAL_WEEKLY: &str = "W";
pub const KW_VCAL_MONTHLY_BY_POSITION: &str = "MP";
pub const KW_VCAL_MONTHLY_BY_DAY: &str = "MD";
pub const KW_VCAL_YEARLY_BY_MONTH: &str = "YM";
pub const KW_VCAL_YEARLY_BY_DAY: &str = "YD";
