// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Parse and emit calendar recurrence rules in their textual wire formats:
//! the line-oriented vCalendar 1.0 `RRULE` and the key/value iCalendar 2.0
//! `RRULE` value.

#![warn(
    trivial_casts,
    trivial_numeric_casts,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unsafe_code,
    unstable_features,
    unused_import_braces,
    unused_qualifications,
    clippy::dbg_macro,
    clippy::indexing_slicing,
    clippy::pedantic
)]
// Allow certain clippy lints that are too restrictive for this crate
#![allow(clippy::similar_names, clippy::single_match_else, clippy::match_bool)]

mod error;
pub mod formatter;
pub mod keyword;
mod parser;
pub mod value;

pub use crate::error::ParseRuleError;
pub use crate::parser::{parse_rrule, parse_vcal_rule};
pub use crate::value::{
    RecurrenceFrequency, RecurrenceRuleValue, ValueDate, ValueDateTime, ValueTime, VcalRule,
    VcalTag, VcalTerminator, WeekDay, WeekDayNum,
};
