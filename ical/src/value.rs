// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Wire value types and their parsers.

mod date;
mod digits;
mod rrule;
mod vcal;

pub use date::{
    ValueDate, ValueDateTime, ValueTime, value_date, value_date_time, value_end_date,
};
pub use digits::ValueExpected;
pub use rrule::{
    RecurrenceFrequency, RecurrenceRuleValue, WeekDay, WeekDayNum, value_rrule,
};
pub use vcal::{VcalRule, VcalTag, VcalTerminator, value_vcal_rule};
